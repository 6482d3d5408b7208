//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are within
//! acceptable ranges. Runs after all layers are merged so the errors
//! describe the configuration the process would actually use.

use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_remote(config)?;
    validate_log(config)?;
    Ok(())
}

fn validate_remote(config: &Config) -> ConfigResult<()> {
    let r = &config.remote;

    let url = Url::parse(&r.endpoint).map_err(|e| ConfigError::ValidationError {
        field: "remote.endpoint".to_owned(),
        message: format!("'{}' is not a valid URL: {e}", r.endpoint),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError {
            field: "remote.endpoint".to_owned(),
            message: format!(
                "unsupported scheme '{}'; expected http or https",
                url.scheme()
            ),
        });
    }

    if r.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "remote.timeout_secs".to_owned(),
            message: "timeout_secs must be at least 1".to_owned(),
        });
    }

    Ok(())
}

fn validate_log(config: &Config) -> ConfigResult<()> {
    let l = &config.log;

    // The level string is handed to EnvFilter at logging setup, which
    // reports its own parse errors; only the format is checked here.
    if !matches!(l.format.as_str(), "pretty" | "compact" | "json") {
        return Err(ConfigError::ValidationError {
            field: "log.format".to_owned(),
            message: format!(
                "unsupported format '{}'; expected one of: pretty, compact, json",
                l.format
            ),
        });
    }

    Ok(())
}
