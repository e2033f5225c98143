//! Error types
//!
//! Only construction and buffer binding can fail. Stepping and resetting
//! never do: episode ends are ordinary transitions, not errors.

use thiserror::Error;

/// Result type for environment setup
pub type Result<T> = std::result::Result<T, EnvError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// Width or height is zero
    #[error("invalid {name}: must be positive, got {value}")]
    InvalidDimension { name: &'static str, value: u32 },

    /// A caller-provided buffer has the wrong length
    #[error("{buffer} buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Configuration value out of its legal range
    #[error("invalid configuration for '{param}': {message}")]
    InvalidConfig { param: &'static str, message: String },

    /// Configuration could not be (de)serialized
    #[error("config serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EnvError {
    fn from(err: serde_json::Error) -> Self {
        EnvError::Serialization(err.to_string())
    }
}
