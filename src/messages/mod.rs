//! # Output Messages
//!
//! Timestamped, frame-tagged records produced by the converters and handed to
//! the messaging collaborator. Field layout follows the usual robotics
//! middleware conventions (header + vector/quaternion payloads, quaternions
//! stored `x, y, z, w`).
//!
//! Vector and quaternion components serialize as JSON numbers when finite and
//! as the strings `"NaN"`, `"inf"` and `"-inf"` otherwise, so non-finite
//! values survive a JSON round trip instead of collapsing to `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock stamp split into whole seconds and nanoseconds.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tello_bridge::messages::Time;
///
/// let t = Time::from(Utc.timestamp_opt(1_700_000_000, 250).unwrap());
/// assert_eq!(t.sec, 1_700_000_000);
/// assert_eq!(t.nanosec, 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Time {
    pub sec: i64,
    pub nanosec: u32,
}

impl Time {
    #[must_use]
    pub fn new(sec: i64, nanosec: u32) -> Self {
        Self { sec, nanosec }
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            sec: value.timestamp(),
            nanosec: value.timestamp_subsec_nanos(),
        }
    }
}

/// Stamp and coordinate frame of a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

impl Header {
    pub fn new(stamp: Time, frame_id: impl Into<String>) -> Self {
        Self {
            stamp,
            frame_id: frame_id.into(),
        }
    }
}

/// Three-component vector (positions, velocities, rates, accelerations).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    #[serde(with = "float_repr")]
    pub x: f64,
    #[serde(with = "float_repr")]
    pub y: f64,
    #[serde(with = "float_repr")]
    pub z: f64,
}

impl Vector3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds a vector from `[x, y, z]`.
    #[must_use]
    pub fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Rotation quaternion, vector part first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    #[serde(with = "float_repr")]
    pub x: f64,
    #[serde(with = "float_repr")]
    pub y: f64,
    #[serde(with = "float_repr")]
    pub z: f64,
    #[serde(with = "float_repr")]
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Builds a quaternion from `[x, y, z, w]`.
    #[must_use]
    pub fn from_array(q: [f64; 4]) -> Self {
        Self::new(q[0], q[1], q[2], q[3])
    }

    /// Squared norm, `1.0` for a unit quaternion.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }
}

/// Position, orientation and linear velocity estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseEstimate {
    pub header: Header,
    pub position: Vector3,
    pub orientation: Quaternion,
    pub linear_velocity: Vector3,
}

/// Orientation, angular velocity and linear acceleration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImuEstimate {
    pub header: Header,
    pub orientation: Quaternion,
    pub angular_velocity: Vector3,
    pub linear_acceleration: Vector3,
}

/// Rigid transform from `header.frame_id` (parent) to `child_frame_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    pub header: Header,
    pub child_frame_id: String,
    pub translation: Vector3,
    pub rotation: Quaternion,
}

/// `f64` as a JSON number, or a string naming the value when not finite.
mod float_repr {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAN: &str = "NaN";
    const INFINITY: &str = "inf";
    const NEG_INFINITY: &str = "-inf";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value.is_sign_positive() {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Named(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Named(name) => match name.as_str() {
                NAN => Ok(f64::NAN),
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    Unexpected::Str(other),
                    &"a number, \"NaN\", \"inf\" or \"-inf\"",
                )),
            },
        }
    }
}
