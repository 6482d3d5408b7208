//! Bridge from `gantry_config::Config` to domain types.
//!
//! Conversion lives here so the config crate stays free of dependencies on
//! the rest of the workspace.

use gantry_actions::CompletionTiming;
use gantry_config::{CompletionSetting, Config};
use gantry_telemetry::{LogConfig, LogFormat};

/// Convert config to [`LogConfig`].
#[must_use]
pub(crate) fn to_log_config(cfg: &Config) -> LogConfig {
    let format = match cfg.log.format.as_str() {
        "pretty" => LogFormat::Pretty,
        "json" => LogFormat::Json,
        _ => LogFormat::Compact,
    };

    LogConfig::new(&cfg.log.level).with_format(format)
}

/// Convert the config-layer completion setting to the domain type.
#[must_use]
pub(crate) fn to_completion_timing(setting: CompletionSetting) -> CompletionTiming {
    match setting {
        CompletionSetting::Confirmed => CompletionTiming::Confirmed,
        CompletionSetting::Optimistic => CompletionTiming::Optimistic,
    }
}
