//! # Telemetry Input Types
//!
//! Snapshots reported by the drone, as handed over by the log decoder.
//!
//! [`TelemetryLog`] carries the visual-odometry (MVO) and inertial (IMU)
//! sub-records. [`FlightStatusLog`] is a flat, name-keyed record of scalar
//! status fields; it is keyed rather than typed because the decoder may omit
//! fields, and an omission must be reported instead of defaulted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Visual-odometry sub-record.
///
/// Positions are in tenths of a metre, in the drone's native axis convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualOdometry {
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub vel_z: f32,
}

/// Inertial sub-record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InertialData {
    /// Quaternion scalar part
    pub q0: f32,
    pub q1: f32,
    pub q2: f32,
    pub q3: f32,
    /// Angular rate in rad/s
    pub gyro_x: f32,
    pub gyro_y: f32,
    pub gyro_z: f32,
    /// Linear acceleration in m/s²
    pub acc_x: f32,
    pub acc_y: f32,
    pub acc_z: f32,
}

/// One telemetry snapshot (MVO + IMU).
///
/// # Examples
///
/// ```
/// use tello_bridge::telemetry::types::TelemetryLog;
///
/// let log = TelemetryLog::default();
/// assert_eq!(log.mvo.pos_x, 0.0);
/// assert_eq!(log.imu.q0, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetryLog {
    pub mvo: VisualOdometry,
    pub imu: InertialData,
}

/// A single scalar flight status value.
///
/// The drone reports most flags as integers, so a flag may arrive as either
/// `Bool` or `Int`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

/// Flat flight status snapshot keyed by field name.
///
/// # Examples
///
/// ```
/// use tello_bridge::telemetry::types::{FieldValue, FlightStatusLog};
///
/// let mut log = FlightStatusLog::new();
/// log.insert("height", 12);
/// assert_eq!(log.get("height"), Some(FieldValue::Int(12)));
/// assert_eq!(log.get("wifi_strength"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightStatusLog {
    fields: BTreeMap<String, FieldValue>,
}

impl FlightStatusLog {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.fields.get(name).copied()
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FlightStatusLog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
