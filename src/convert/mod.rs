//! # Conversion Module
//!
//! Pure conversions from drone telemetry to output records.
//!
//! This module handles:
//! - Axis remapping and unit scaling (shared tables in [`remap`])
//! - Pose, IMU and odom -> drone transform records from MVO/IMU snapshots
//! - 1:1 flight status field mapping
//!
//! Nothing here performs I/O, logs, or keeps state; every function may be
//! called from any thread.

pub mod remap;
pub mod pose;
pub mod imu;
pub mod transform;
pub mod flight_status;

pub use flight_status::{map_flight_status, FlightStatusRecord};
pub use imu::convert_imu;
pub use pose::convert_pose;
pub use transform::convert_transform;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{ImuEstimate, PoseEstimate, RigidTransform, Time};
    use crate::telemetry::types::{FlightStatusLog, TelemetryLog};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_inputs_and_outputs_are_send_sync() {
        assert_send_sync::<TelemetryLog>();
        assert_send_sync::<FlightStatusLog>();
        assert_send_sync::<FlightStatusRecord>();
        assert_send_sync::<PoseEstimate>();
        assert_send_sync::<ImuEstimate>();
        assert_send_sync::<RigidTransform>();
    }

    #[test]
    fn test_converts_from_other_threads() {
        let log = TelemetryLog::default();
        let (pose, imu) = std::thread::scope(|s| {
            let pose = s.spawn(|| convert_pose(Time::default(), "odom", &log));
            let imu = s.spawn(|| convert_imu(Time::default(), "imu", &log));
            (pose.join().unwrap(), imu.join().unwrap())
        });

        assert_eq!(pose.orientation, imu.orientation);
    }
}
