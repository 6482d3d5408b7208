//! Layered configuration for Gantry tools.
//!
//! This crate provides a single [`Config`] type covering the remote
//! endpoint, project action behaviour, and logging.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gantry_config::Config;
//!
//! # fn main() -> Result<(), gantry_config::ConfigError> {
//! // Load with full precedence chain (defaults → user → workspace → env).
//! let resolved = Config::load(Some(std::path::Path::new(".")))?;
//! println!("endpoint: {}", resolved.config.remote.endpoint);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`GANTRY_ENDPOINT`, `GANTRY_LOG`)
//! 2. **Workspace** (`{workspace}/gantry.toml`)
//! 3. **User** (`~/.config/gantry/config.toml`)
//! 4. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! # Design
//!
//! This crate has **no dependencies on other gantry crates**. Conversion
//! from config types to domain types happens at the integration boundary
//! (CLI startup).

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Configuration error types.
pub mod error;
/// Configuration file discovery and layered loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

// Re-export primary types at the crate root.
pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// See [`loader::load`] for the algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the
    /// final configuration fails validation.
    pub fn load(workspace_root: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(workspace_root, None)
    }

    /// Load configuration with an explicit user config directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the
    /// final configuration fails validation.
    pub fn load_with_config_dir(
        workspace_root: Option<&std::path::Path>,
        config_dir: &std::path::Path,
    ) -> ConfigResult<ResolvedConfig> {
        loader::load(workspace_root, Some(config_dir))
    }

    /// Load configuration from a single file (no layering).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or
    /// fails validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
