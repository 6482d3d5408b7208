//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path of the file that failed to read.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A config file or merged tree could not be parsed as TOML.
    #[error("failed to parse config {path}: {source}")]
    ParseError {
        /// Path of the input that failed to parse.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A config value failed validation.
    #[error("invalid config value for {field}: {message}")]
    ValidationError {
        /// Dotted path of the offending field (e.g. `remote.endpoint`).
        field: String,
        /// Human-readable description of the problem.
        message: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
