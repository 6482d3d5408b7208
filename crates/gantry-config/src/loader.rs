//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `~/.config/gantry/config.toml` (user)
//! 3. Merge `{workspace}/gantry.toml` (workspace)
//! 4. Apply `GANTRY_*` environment overrides
//! 5. Deserialize merged tree → `Config`
//! 6. Validate
//! 7. Return `ResolvedConfig`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A loaded configuration together with the files that contributed to it.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged and validated configuration.
    pub config: Config,
    /// Paths of the config files that were found and merged, in load order.
    pub loaded_files: Vec<String>,
}

/// Load the configuration with layered file precedence.
///
/// `workspace_root` is the root of the current project (usually `cwd`).
/// If `None`, the workspace layer is skipped.
///
/// `config_dir_override` provides an alternate directory for user-level
/// config discovery, bypassing the platform config directory.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, or if the
/// final merged configuration fails validation.
pub fn load(
    workspace_root: Option<&Path>,
    config_dir_override: Option<&Path>,
) -> ConfigResult<ResolvedConfig> {
    let env_vars = collect_env_vars();

    // 1. Parse embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut loaded_files = Vec::new();

    // 2. User config (~/.config/gantry/config.toml).
    let user_path = match config_dir_override {
        Some(dir) => Some(dir.join("config.toml")),
        None => user_config_path(),
    };
    if let Some(path) = user_path {
        if let Some(overlay) = try_load_file(&path)? {
            deep_merge(&mut merged, &overlay);
            loaded_files.push(path.display().to_string());
            info!(path = %path.display(), "loaded user config");
        }
    }

    // 3. Workspace config ({workspace}/gantry.toml).
    if let Some(ws_root) = workspace_root {
        let ws_path = ws_root.join("gantry.toml");
        if let Some(overlay) = try_load_file(&ws_path)? {
            deep_merge(&mut merged, &overlay);
            loaded_files.push(ws_path.display().to_string());
            info!(path = %ws_path.display(), "loaded workspace config");
        }
    }

    // 4. Environment overrides win over every file layer.
    let env_count = apply_env_overrides(&mut merged, &env_vars);
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable overrides");
    }

    // 5. Deserialize merged tree.
    let config: Config = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: "<merged config>".to_owned(),
            source: e,
        })?;

    // 6. Validate.
    validate::validate(&config)?;

    // 7. Return ResolvedConfig.
    Ok(ResolvedConfig {
        config,
        loaded_files,
    })
}

/// Load a config from a specific file path (no layering).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    validate::validate(&config)?;
    Ok(config)
}

/// Try to load a file, returning `None` if the file doesn't exist.
///
/// Uses a single read operation to avoid TOCTOU races (no separate
/// exists/metadata checks before reading).
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

/// Platform-specific user config path (`~/.config/gantry/config.toml` on
/// Linux). `None` when no home directory can be determined; the user layer
/// is simply skipped in that case.
fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "gantry")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Collect `GANTRY_*` environment variables.
fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("GANTRY_"))
        .collect()
}

/// Apply environment variable overrides to the merged tree. Returns the
/// number of fields set.
fn apply_env_overrides(merged: &mut toml::Value, env_vars: &HashMap<String, String>) -> usize {
    let mut applied = 0_usize;

    if let Some(endpoint) = env_vars.get("GANTRY_ENDPOINT") {
        set_path(
            merged,
            &["remote", "endpoint"],
            toml::Value::String(endpoint.clone()),
        );
        applied = applied.saturating_add(1);
    }

    if let Some(level) = env_vars.get("GANTRY_LOG") {
        set_path(merged, &["log", "level"], toml::Value::String(level.clone()));
        applied = applied.saturating_add(1);
    }

    applied
}

/// Set a leaf value at a dotted path, creating intermediate tables as needed.
fn set_path(root: &mut toml::Value, path: &[&str], value: toml::Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    let toml::Value::Table(table) = root else {
        return;
    };

    if rest.is_empty() {
        table.insert((*head).to_owned(), value);
        return;
    }

    let child = table
        .entry((*head).to_owned())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    set_path(child, rest, value);
}
