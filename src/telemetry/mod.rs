//! # Telemetry Module
//!
//! Drone telemetry input types and flight status recording.
//!
//! This module handles:
//! - Input snapshots as produced by the drone log decoder
//! - Formatting flight status records as JSONL (JSON Lines)
//! - Writing to rotating log files
//! - Managing file rotation (max N records per file)
//! - Retaining only last M files

pub mod types;
pub mod logger;
