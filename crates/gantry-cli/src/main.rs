//! Gantry command-line interface.
//!
//! Thin terminal frontend over the gantry crates: loads layered
//! configuration, wires the remote mutation client into an action
//! coordinator, and renders menus and confirmation prompts.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::Result;
use clap::{Parser, Subcommand};

use gantry_core::ProjectRef;
use gantry_telemetry::{LogConfig, LogFormat};

mod commands;
mod completion_handler;
mod config_bridge;
mod theme;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(author, version, about = "Project maintenance actions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the action menu for a project without running anything
    Actions {
        /// Project id
        id: String,
        /// Project name
        name: String,
    },

    /// Run the interactive action loop against the configured remote
    Run {
        /// Project id
        id: String,
        /// Project name
        name: String,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the resolved configuration and where it came from
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config once; logging still comes up if it is broken.
    let workspace_root = std::env::current_dir().ok();
    let config_result = gantry_config::Config::load(workspace_root.as_deref());

    let log_config = match config_result.as_ref().ok() {
        Some(resolved) => {
            let mut lc = config_bridge::to_log_config(&resolved.config);
            if cli.verbose {
                "debug".clone_into(&mut lc.level);
            }
            lc
        },
        None => {
            let level = if cli.verbose { "debug" } else { "info" };
            LogConfig::new(level).with_format(LogFormat::Compact)
        },
    };
    if let Err(e) = gantry_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Actions { id, name } => {
            commands::actions::list_actions(&ProjectRef::new(id, name))?;
        },
        Commands::Run { id, name } => {
            let resolved = config_result?;
            commands::run::run_actions(ProjectRef::new(id, name), &resolved.config).await?;
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                commands::config::show_config(&config_result?)?;
            },
        },
    }

    Ok(())
}
