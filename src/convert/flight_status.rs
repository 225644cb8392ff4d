//! # Flight Status Mapper
//!
//! Maps a [`FlightStatusLog`] onto a typed [`FlightStatusRecord`], one output
//! field per input field.
//!
//! The whole mapping is one declarative table (the `flight_status_table!`
//! invocation below). From it the macro generates:
//!
//! - the [`FlightStatusRecord`] struct (so a table entry without a struct field,
//!   or the reverse, cannot compile),
//! - [`FLIGHT_STATUS_FIELDS`], the `(input, output)` list used by tests and
//!   observers,
//! - the mapper itself, which reads every input exactly once, in table order.
//!
//! ## Groups
//!
//! | Group | Fields |
//! |-------|--------|
//! | Battery | 4 |
//! | State | 10 |
//! | Stats | 9 |
//! | Sensors | 7 |
//! | Misc | 2 |
//! | Wifi | 2 |
//!
//! Groups only document the layout; every field is a direct copy.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TelloBridgeError};
use crate::telemetry::types::{FieldValue, FlightStatusLog};

/// Conceptual grouping of flight status fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Battery,
    State,
    Stats,
    Sensors,
    Misc,
    Wifi,
}

/// Output type of a flight status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
}

impl FieldKind {
    /// Type name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int => "i32",
            FieldKind::Float => "f64",
        }
    }
}

/// One entry of the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name in [`FlightStatusLog`]
    pub input: &'static str,
    /// Field name in [`FlightStatusRecord`]
    pub output: &'static str,
    pub group: FieldGroup,
    pub kind: FieldKind,
}

/// Conversion from a decoded [`FieldValue`] into a record field type.
pub trait StatusValue: Sized + Into<FieldValue> {
    const KIND: FieldKind;

    /// Returns `None` if `value` cannot be represented exactly.
    fn from_field(value: FieldValue) -> Option<Self>;
}

impl StatusValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_field(value: FieldValue) -> Option<Self> {
        // The drone encodes most flags as 0/1 integers.
        match value {
            FieldValue::Bool(v) => Some(v),
            FieldValue::Int(0) => Some(false),
            FieldValue::Int(1) => Some(true),
            _ => None,
        }
    }
}

impl StatusValue for i32 {
    const KIND: FieldKind = FieldKind::Int;

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(v) => i32::try_from(v).ok(),
            FieldValue::Float(v)
                if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) =>
            {
                Some(v as i32)
            }
            _ => None,
        }
    }
}

impl StatusValue for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(v) => Some(v),
            FieldValue::Int(v) => {
                // Widening through i128 catches i64::MAX rounding up to 2^63.
                let widened = v as f64;
                (widened as i128 == i128::from(v)).then_some(widened)
            }
            FieldValue::Bool(_) => None,
        }
    }
}

fn take<T: StatusValue>(log: &FlightStatusLog, field: &'static str) -> Result<T> {
    let value = log
        .get(field)
        .ok_or(TelloBridgeError::MissingField { field })?;

    T::from_field(value).ok_or(TelloBridgeError::InvalidField {
        field,
        expected: T::KIND.name(),
    })
}

macro_rules! flight_status_table {
    (
        $(
            $group:ident {
                $( $(#[$attr:meta])* $output:ident : $ty:ty = $input:literal ),+ $(,)?
            }
        )+
    ) => {
        /// Flat flight status record, one field per [`FlightStatusLog`] field.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct FlightStatusRecord {
            $($( $(#[$attr])* pub $output: $ty, )+)+
        }

        /// Every mapped field, in table order.
        pub const FLIGHT_STATUS_FIELDS: &[FieldMapping] = &[
            $($(
                FieldMapping {
                    input: $input,
                    output: stringify!($output),
                    group: FieldGroup::$group,
                    kind: <$ty as StatusValue>::KIND,
                },
            )+)+
        ];

        impl FlightStatusRecord {
            fn from_log(log: &FlightStatusLog) -> Result<Self> {
                Ok(Self {
                    $($( $output: take::<$ty>(log, $input)?, )+)+
                })
            }

            /// `(output name, value)` pairs in table order.
            #[must_use]
            pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
                vec![ $($( (stringify!($output), self.$output.into()), )+)+ ]
            }
        }
    };
}

flight_status_table! {
    Battery {
        battery_low: bool = "battery_low",
        battery_lower: bool = "battery_lower",
        /// Remaining charge, 0-100
        battery_percentage: i32 = "battery_percentage",
        drone_battery_left: i32 = "drone_battery_left",
    }
    State {
        battery_state: bool = "battery_state",
        camera_state: i32 = "camera_state",
        electrical_machinery_state: i32 = "electrical_machinery_state",
        down_visual_state: bool = "down_visual_state",
        gravity_state: bool = "gravity_state",
        imu_calibration_state: i32 = "imu_calibration_state",
        imu_state: bool = "imu_state",
        power_state: bool = "power_state",
        pressure_state: bool = "pressure_state",
        wind_state: bool = "wind_state",
    }
    Stats {
        drone_hover: bool = "drone_hover",
        em_open: bool = "em_open",
        em_sky: bool = "em_sky",
        em_ground: bool = "em_ground",
        factory_mode: bool = "factory_mode",
        fly_mode: i32 = "fly_mode",
        front_in: bool = "front_in",
        front_lsc: bool = "front_lsc",
        front_out: bool = "front_out",
    }
    Sensors {
        fly_speed: f64 = "fly_speed",
        east_speed: i32 = "east_speed",
        ground_speed: i32 = "ground_speed",
        /// Height above takeoff, decimetres
        height: i32 = "height",
        light_strength: i32 = "light_strength",
        north_speed: i32 = "north_speed",
        /// Reported by the drone as `temperature_height`
        temperature_high: i32 = "temperature_height",
    }
    Misc {
        outage_recording: bool = "outage_recording",
        smart_video_exit_mode: i32 = "smart_video_exit_mode",
    }
    Wifi {
        wifi_disturb: i32 = "wifi_disturb",
        wifi_strength: i32 = "wifi_strength",
    }
}

/// Maps a flight status snapshot onto a [`FlightStatusRecord`].
///
/// Pure: no logging, no side effects. Unknown extra fields are ignored.
///
/// # Errors
///
/// - [`TelloBridgeError::MissingField`] naming the first absent field, in
///   table order
/// - [`TelloBridgeError::InvalidField`] if a value does not fit its output type
///
/// # Examples
///
/// ```
/// use tello_bridge::convert::flight_status::map_flight_status;
/// use tello_bridge::error::TelloBridgeError;
/// use tello_bridge::telemetry::types::FlightStatusLog;
///
/// let result = map_flight_status(&FlightStatusLog::new());
/// assert!(matches!(
///     result,
///     Err(TelloBridgeError::MissingField { field: "battery_low" })
/// ));
/// ```
pub fn map_flight_status(log: &FlightStatusLog) -> Result<FlightStatusRecord> {
    FlightStatusRecord::from_log(log)
}
