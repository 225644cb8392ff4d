//! # IMU Converter

use crate::convert::remap::remap_orientation;
use crate::messages::{Header, ImuEstimate, Time, Vector3};
use crate::telemetry::types::TelemetryLog;

/// Converts the inertial sub-record into an [`ImuEstimate`] in `frame_id`.
///
/// Gyro and accelerometer axes are copied without remapping or scaling; only
/// the attitude quaternion goes through the orientation remap.
#[must_use]
pub fn convert_imu(stamp: Time, frame_id: &str, log: &TelemetryLog) -> ImuEstimate {
    let imu = &log.imu;

    ImuEstimate {
        header: Header::new(stamp, frame_id),
        orientation: remap_orientation(imu),
        angular_velocity: Vector3::new(
            f64::from(imu.gyro_x),
            f64::from(imu.gyro_y),
            f64::from(imu.gyro_z),
        ),
        linear_acceleration: Vector3::new(
            f64::from(imu.acc_x),
            f64::from(imu.acc_y),
            f64::from(imu.acc_z),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::pose::convert_pose;
    use crate::messages::Quaternion;
    use crate::telemetry::types::InertialData;

    fn sample_log() -> TelemetryLog {
        TelemetryLog {
            imu: InertialData {
                q0: 0.5,
                q1: 0.5,
                q2: -0.5,
                q3: 0.5,
                gyro_x: 0.1,
                gyro_y: -0.2,
                gyro_z: 0.3,
                acc_x: 0.25,
                acc_y: -0.5,
                acc_z: -9.81,
            },
            ..TelemetryLog::default()
        }
    }

    #[test]
    fn test_header() {
        let msg = convert_imu(Time::new(3, 4), "imu", &sample_log());
        assert_eq!(msg.header.stamp, Time::new(3, 4));
        assert_eq!(msg.header.frame_id, "imu");
    }

    #[test]
    fn test_rates_and_accelerations_copied() {
        let log = sample_log();
        let msg = convert_imu(Time::default(), "imu", &log);

        assert_eq!(msg.angular_velocity.x, f64::from(log.imu.gyro_x));
        assert_eq!(msg.angular_velocity.y, f64::from(log.imu.gyro_y));
        assert_eq!(msg.angular_velocity.z, f64::from(log.imu.gyro_z));
        assert_eq!(msg.linear_acceleration.x, f64::from(log.imu.acc_x));
        assert_eq!(msg.linear_acceleration.y, f64::from(log.imu.acc_y));
        assert_eq!(msg.linear_acceleration.z, f64::from(log.imu.acc_z));
    }

    #[test]
    fn test_orientation_remap() {
        let msg = convert_imu(Time::default(), "imu", &sample_log());
        assert_eq!(msg.orientation, Quaternion::new(0.5, 0.5, -0.5, 0.5));
    }

    #[test]
    fn test_orientation_matches_pose() {
        let log = sample_log();
        let imu = convert_imu(Time::default(), "imu", &log);
        let pose = convert_pose(Time::default(), "odom", &log);
        assert_eq!(imu.orientation, pose.orientation);
    }

    #[test]
    fn test_non_finite_values_pass_through() {
        let mut log = sample_log();
        log.imu.gyro_y = f32::NAN;
        log.imu.acc_x = f32::NEG_INFINITY;

        let msg = convert_imu(Time::default(), "imu", &log);
        assert!(msg.angular_velocity.y.is_nan());
        assert_eq!(msg.linear_acceleration.x, f64::NEG_INFINITY);
    }
}
