//! # Error Types
//!
//! Custom error types for Tello Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Tello Bridge
#[derive(Debug, Error)]
pub enum TelloBridgeError {
    /// A flight status field expected by the mapping table is absent
    #[error("missing flight status field: {field}")]
    MissingField {
        /// Input field name
        field: &'static str,
    },

    /// A flight status field is present but cannot be represented in its output type
    #[error("invalid value for flight status field {field}: expected {expected}")]
    InvalidField {
        /// Input field name
        field: &'static str,
        /// Output type the value had to fit
        expected: &'static str,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON Lines encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Tello Bridge
pub type Result<T> = std::result::Result<T, TelloBridgeError>;
