//! # Transform Converter
//!
//! Builds the parent -> child [`RigidTransform`] (typically odom -> drone body)
//! from the same remapped MVO position and IMU attitude as the pose.

use crate::convert::remap::{remap_orientation, remap_position};
use crate::messages::{Header, RigidTransform, Time};
use crate::telemetry::types::TelemetryLog;

/// Converts a telemetry snapshot into a rigid transform.
///
/// Frame ids are stored as given; they are neither validated nor interpreted.
///
/// # Examples
///
/// ```
/// use tello_bridge::convert::transform::convert_transform;
/// use tello_bridge::messages::Time;
/// use tello_bridge::telemetry::types::TelemetryLog;
///
/// let mut log = TelemetryLog::default();
/// log.mvo.pos_y = 30.0;
/// log.imu.q0 = 1.0;
///
/// let tf = convert_transform(Time::default(), "odom", "base_link", &log);
/// assert_eq!(tf.header.frame_id, "odom");
/// assert_eq!(tf.child_frame_id, "base_link");
/// assert_eq!(tf.translation.y, -3.0);
/// ```
#[must_use]
pub fn convert_transform(
    stamp: Time,
    parent_frame_id: &str,
    child_frame_id: &str,
    log: &TelemetryLog,
) -> RigidTransform {
    RigidTransform {
        header: Header::new(stamp, parent_frame_id),
        child_frame_id: child_frame_id.to_string(),
        translation: remap_position(&log.mvo),
        rotation: remap_orientation(&log.imu),
    }
}
