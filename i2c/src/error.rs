//! Error types for the I2C core

use std::path::PathBuf;
use thiserror::Error;

/// A command failed one of the validation rules.
///
/// The rules exist to keep caller-supplied strings from becoming arbitrary
/// arguments to a privileged binary, so every variant names the value it
/// rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Bus number outside the allowed 0..=10 range
    #[error("Invalid bus number: {0}")]
    InvalidBus(i32),

    /// Device address is not a 0x-prefixed 1-2 digit hex token
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    /// Register is not a 0x-prefixed 1-2 digit hex token
    #[error("Invalid register format: {0}")]
    InvalidRegister(String),

    /// Operation is neither "read" nor "write"
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Write command without a value
    #[error("Missing value for write operation")]
    MissingValue,

    /// Write value is not a 0x-prefixed 1-2 digit hex token
    #[error("Invalid value format: {0}")]
    InvalidValue(String),

    /// Mode is not "b", "w", or "i" with a count in 1..=32
    #[error("Invalid mode: {0}")]
    InvalidMode(String),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist and defaults were disallowed
    #[error("Configuration not found: {0}")]
    NotFound(PathBuf),

    /// Configuration contents failed a sanity check
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_messages_carry_the_rejected_value() {
        assert_eq!(
            ValidationError::InvalidBus(-1).to_string(),
            "Invalid bus number: -1"
        );
        assert_eq!(
            ValidationError::InvalidAddress("48".to_string()).to_string(),
            "Invalid address format: 48"
        );
        assert_eq!(
            ValidationError::InvalidMode("i 33".to_string()).to_string(),
            "Invalid mode: i 33"
        );
    }
}
