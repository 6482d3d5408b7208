//! Configuration struct definitions.
//!
//! All types in this module are self-contained with no dependencies on other
//! gantry crates. Domain types are mirrored here and converted at the
//! integration boundary (CLI startup). Every struct implements [`Default`]
//! so that a bare `[section]` header in TOML produces a working
//! configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration for Gantry tools.
///
/// Loaded from layered TOML files (user, workspace) with environment
/// variable overrides. Every section defaults to working values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote endpoint and request timeout.
    pub remote: RemoteConfig,
    /// Behaviour knobs for project actions.
    pub actions: ActionsConfig,
    /// Logging level and format.
    pub log: LogSettings,
}

// ---------------------------------------------------------------------------
// RemoteConfig
// ---------------------------------------------------------------------------

/// Remote endpoint the mutation client talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:6006/graphql".to_owned(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// ActionsConfig
// ---------------------------------------------------------------------------

/// Behaviour knobs for destructive project actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// When the delete completion hook runs relative to the remote call.
    pub delete_completion: CompletionSetting,
}

/// When a delete completion hook runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionSetting {
    /// Run the hook only after the remote confirms the delete.
    #[default]
    Confirmed,
    /// Run the hook as soon as the delete is dispatched.
    Optimistic,
}

// ---------------------------------------------------------------------------
// LogSettings
// ---------------------------------------------------------------------------

/// Logging level, format, and colour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"trace"`).
    pub level: String,
    /// Log format: `"pretty"`, `"compact"`, or `"json"`.
    pub format: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
        }
    }
}
