//! # Tello Bridge Library
//!
//! Converts Tello drone telemetry into pose, IMU, transform and flight status
//! records.
//!
//! The [`convert`] module is the pure core: axis remapping, unit scaling and
//! exhaustive flight status field mapping, with no I/O or logging. The
//! [`bridge`], [`telemetry::logger`] and [`config`] modules wire that core to
//! frame configuration, diagnostics, recording and JSON Lines replay.

pub mod config;
pub mod error;
pub mod messages;
pub mod telemetry;
pub mod convert;
pub mod bridge;
