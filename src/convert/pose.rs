//! # Pose Converter
//!
//! Builds a [`PoseEstimate`] from the MVO and IMU sub-records.
//!
//! The MVO position is known to be low-accuracy; it is re-expressed as-is.

use crate::convert::remap::{remap_orientation, remap_position};
use crate::messages::{Header, PoseEstimate, Time, Vector3};
use crate::telemetry::types::TelemetryLog;

/// Converts a telemetry snapshot into a pose estimate in `frame_id`.
///
/// Linear velocity carries `vel_x` on all three axes. This reproduces the
/// drone driver's established output and is kept until the intended mapping
/// is confirmed.
///
/// # Examples
///
/// ```
/// use tello_bridge::convert::pose::convert_pose;
/// use tello_bridge::messages::Time;
/// use tello_bridge::telemetry::types::TelemetryLog;
///
/// let mut log = TelemetryLog::default();
/// log.mvo.pos_x = 100.0;
/// log.mvo.pos_y = 50.0;
/// log.mvo.pos_z = 20.0;
/// log.mvo.vel_x = 1.5;
/// log.imu.q0 = 1.0;
///
/// let pose = convert_pose(Time::default(), "odom", &log);
/// assert_eq!((pose.position.x, pose.position.y, pose.position.z), (10.0, -5.0, 2.0));
/// assert_eq!(pose.orientation.w, 1.0);
/// assert_eq!(pose.linear_velocity.z, 1.5);
/// ```
#[must_use]
pub fn convert_pose(stamp: Time, frame_id: &str, log: &TelemetryLog) -> PoseEstimate {
    let vel_x = f64::from(log.mvo.vel_x);

    PoseEstimate {
        header: Header::new(stamp, frame_id),
        position: remap_position(&log.mvo),
        orientation: remap_orientation(&log.imu),
        linear_velocity: Vector3::new(vel_x, vel_x, vel_x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Quaternion;
    use crate::telemetry::types::{InertialData, VisualOdometry};

    fn sample_log() -> TelemetryLog {
        TelemetryLog {
            mvo: VisualOdometry {
                pos_x: 100.0,
                pos_y: 50.0,
                pos_z: 20.0,
                vel_x: 1.5,
                vel_y: -2.0,
                vel_z: 3.25,
            },
            imu: InertialData {
                q0: 1.0,
                ..InertialData::default()
            },
        }
    }

    #[test]
    fn test_end_to_end_example() {
        let pose = convert_pose(Time::new(10, 5), "odom", &sample_log());

        assert_eq!(pose.header.stamp, Time::new(10, 5));
        assert_eq!(pose.header.frame_id, "odom");
        assert_eq!(pose.position, Vector3::new(10.0, -5.0, 2.0));
        assert_eq!(pose.orientation, Quaternion::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(pose.linear_velocity, Vector3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_velocity_uses_vel_x_on_every_axis() {
        // vel_y / vel_z are deliberately ignored; see convert_pose docs.
        let mut log = sample_log();
        log.mvo.vel_x = -0.75;
        log.mvo.vel_y = 9.0;
        log.mvo.vel_z = 9.0;

        let v = convert_pose(Time::default(), "odom", &log).linear_velocity;
        assert_eq!(v.x, -0.75);
        assert_eq!(v.y, -0.75);
        assert_eq!(v.z, -0.75);
    }

    #[test]
    fn test_position_property() {
        let mut log = sample_log();
        log.mvo.pos_x = -37.3;
        log.mvo.pos_y = 12.9;
        log.mvo.pos_z = 0.1;

        let p = convert_pose(Time::default(), "odom", &log).position;
        assert_eq!(p.x, f64::from(log.mvo.pos_x) / 10.0);
        assert_eq!(p.y, -f64::from(log.mvo.pos_y) / 10.0);
        assert_eq!(p.z, f64::from(log.mvo.pos_z) / 10.0);
    }

    #[test]
    fn test_orientation_remap() {
        let mut log = sample_log();
        log.imu = InertialData {
            q0: 0.5,
            q1: 0.5,
            q2: 0.5,
            q3: 0.5,
            ..InertialData::default()
        };

        let q = convert_pose(Time::default(), "odom", &log).orientation;
        assert_eq!(q, Quaternion::new(0.5, -0.5, -0.5, 0.5));
        assert!((q.norm_squared() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_values_pass_through() {
        let mut log = sample_log();
        log.mvo.pos_z = f32::NAN;
        log.mvo.vel_x = f32::INFINITY;

        let pose = convert_pose(Time::default(), "odom", &log);
        assert!(pose.position.z.is_nan());
        assert_eq!(pose.linear_velocity.y, f64::INFINITY);
    }

    #[test]
    fn test_frame_id_is_stored_verbatim() {
        let pose = convert_pose(Time::default(), "", &sample_log());
        assert_eq!(pose.header.frame_id, "");

        let pose = convert_pose(Time::default(), "tello/odom frame", &sample_log());
        assert_eq!(pose.header.frame_id, "tello/odom frame");
    }
}
