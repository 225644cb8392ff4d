//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, TelloBridgeError};

/// Log levels accepted by `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub frames: FramesConfig,

    #[serde(default)]
    pub replay: ReplayConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    #[serde(default)]
    pub recording: RecordingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Coordinate frame ids stamped on output records
///
/// No defaults: the frames belong to the consuming system.
#[derive(Debug, Deserialize, Clone)]
pub struct FramesConfig {
    pub odom_frame_id: String,
    pub imu_frame_id: String,
    pub drone_frame_id: String,
}

/// Replay input/output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ReplayConfig {
    #[serde(default = "default_replay_input")]
    pub input: String,

    /// `-` writes to stdout
    #[serde(default = "default_replay_output")]
    pub output: String,
}

/// Flight status diagnostics configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_trace_flight_status")]
    pub trace_flight_status: bool,
}

/// Flight status recording configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RecordingConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_max_records_per_file")]
    pub max_records_per_file: usize,

    #[serde(default = "default_max_files_to_keep")]
    pub max_files_to_keep: usize,

    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Application logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for a daily rolling log file; empty logs to stderr
    #[serde(default)]
    pub file: String,
}

// Default value functions
fn default_replay_input() -> String { "telemetry.jsonl".to_string() }
fn default_replay_output() -> String { "-".to_string() }

fn default_trace_flight_status() -> bool { true }

fn default_log_dir() -> String { "./logs".to_string() }
fn default_max_records_per_file() -> usize { 10000 }
fn default_max_files_to_keep() -> usize { 10 }
fn default_log_format() -> String { "jsonl".to_string() }

fn default_log_level() -> String { "info".to_string() }

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            input: default_replay_input(),
            output: default_replay_output(),
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            trace_flight_status: default_trace_flight_status(),
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            max_records_per_file: default_max_records_per_file(),
            max_files_to_keep: default_max_files_to_keep(),
            format: default_log_format(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

fn invalid(msg: impl std::fmt::Display) -> TelloBridgeError {
    TelloBridgeError::Config(toml::de::Error::custom(msg))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tello_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Validate frame ids
        for (name, value) in [
            ("odom_frame_id", &self.frames.odom_frame_id),
            ("imu_frame_id", &self.frames.imu_frame_id),
            ("drone_frame_id", &self.frames.drone_frame_id),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{} cannot be empty", name)));
            }
        }

        // Validate replay endpoints
        if self.replay.input.is_empty() {
            return Err(invalid("replay input cannot be empty"));
        }

        if self.replay.output.is_empty() {
            return Err(invalid("replay output cannot be empty (use \"-\" for stdout)"));
        }

        // Validate recording configuration
        if self.recording.enabled && self.recording.log_dir.is_empty() {
            return Err(invalid("recording log_dir cannot be empty when enabled"));
        }

        if self.recording.max_records_per_file == 0 {
            return Err(invalid("max_records_per_file must be greater than 0"));
        }

        if self.recording.max_files_to_keep == 0 {
            return Err(invalid("max_files_to_keep must be greater than 0"));
        }

        if self.recording.format != "jsonl" {
            return Err(invalid("recording format must be 'jsonl' (only supported format)"));
        }

        // Validate log level
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(invalid(format!(
                "logging level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}
