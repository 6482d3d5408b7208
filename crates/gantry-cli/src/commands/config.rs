//! Config command - show resolved configuration.

use colored::Colorize;
use gantry_config::ResolvedConfig;

use crate::theme::Theme;

/// Print the files that contributed to the configuration and the resolved
/// result as TOML.
pub(crate) fn show_config(resolved: &ResolvedConfig) -> anyhow::Result<()> {
    if resolved.loaded_files.is_empty() {
        println!("{}", Theme::info("No config files found; using defaults"));
    } else {
        println!("\n{}", Theme::header("Config files"));
        for path in &resolved.loaded_files {
            println!("  {}", path.dimmed());
        }
    }

    println!("\n{}", Theme::header("Resolved configuration"));
    println!("{}", toml::to_string_pretty(&resolved.config)?);
    Ok(())
}
