//! Run command - interactive action loop for one project.
//!
//! This is the terminal rendition of a project page: a menu over the
//! coordinator's descriptors, confirmation prompts rendering the registry
//! copy, the remove-data sub-form, and a deferred sessions filter. Prompts
//! mark the loop's idle points; settlements and staged filter values are
//! applied there, never mid-interaction.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use tracing::debug;

use gantry_actions::{
    ActionCoordinator, CompletionHooks, Confirmed, ProjectAction, Selection, SystemClipboard,
};
use gantry_client::RemoteMutations;
use gantry_config::Config;
use gantry_core::ProjectRef;
use gantry_search::{SearchFilter, SearchProvider};

use crate::completion_handler::{TerminalAlert, TerminalHooks};
use crate::config_bridge;
use crate::theme::Theme;

/// Chrome entries appended after the action descriptors.
const FILTER_ENTRY: &str = "Filter sessions";
const SWITCH_ENTRY: &str = "Switch project";
const QUIT_ENTRY: &str = "Quit";

/// Run the interactive loop until the user quits or the project is deleted.
pub(crate) async fn run_actions(project: ProjectRef, cfg: &Config) -> Result<()> {
    let remote = RemoteMutations::new(
        &cfg.remote.endpoint,
        Duration::from_secs(cfg.remote.timeout_secs),
    )?;

    let hooks = Arc::new(TerminalHooks::new());
    let coordinator = ActionCoordinator::new(
        project,
        Arc::new(remote.clone()),
        Arc::clone(&hooks) as Arc<dyn CompletionHooks>,
        Arc::new(TerminalAlert),
        Arc::new(SystemClipboard::new()),
    )
    .with_delete_completion(config_bridge::to_completion_timing(
        cfg.actions.delete_completion,
    ));

    // The sessions view under this project shares one deferred filter.
    let provider = SearchProvider::new();
    let filter = SearchFilter::require(Some(provider.handle()))?;

    loop {
        // We just came back from a prompt, so the loop is idle: apply
        // anything that settled and commit staged filter writes.
        let applied = coordinator.drain_settled();
        if applied > 0 {
            debug!(applied, "applied deferred settlements");
        }
        provider.commit_pending();

        if hooks.project_deleted() {
            println!("{}", Theme::info("This project is gone; leaving"));
            return Ok(());
        }

        let current = coordinator.project();
        println!("\n{}", Theme::header(&current.to_string()));
        let active = filter.get()?;
        if !active.is_empty() {
            println!("{}", Theme::dimmed(&format!("session filter: {active}")));
        }

        let menu = coordinator.menu();
        let enabled: Vec<_> = menu.iter().filter(|d| !d.disabled).collect();
        let mut items: Vec<String> = enabled.iter().map(|d| d.label.to_owned()).collect();
        items.push(FILTER_ENTRY.to_owned());
        items.push(SWITCH_ENTRY.to_owned());
        items.push(QUIT_ENTRY.to_owned());

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Action")
            .items(&items)
            .default(0)
            .interact();
        let Ok(choice) = choice else {
            // Prompt was interrupted; treat like quit.
            return Ok(());
        };

        if choice < enabled.len() {
            let action = enabled[choice].action;
            handle_action(&coordinator, &remote, action).await?;
        } else {
            match items[choice].as_str() {
                FILTER_ENTRY => prompt_filter(&filter)?,
                SWITCH_ENTRY => prompt_switch(&coordinator)?,
                _ => return Ok(()),
            }
        }
    }
}

/// Route one selected action through the coordinator.
async fn handle_action(
    coordinator: &ActionCoordinator,
    remote: &RemoteMutations,
    action: ProjectAction,
) -> Result<()> {
    match coordinator.select(action) {
        Selection::CopiedName => {
            println!("{}", Theme::success("Project name copied"));
        },
        Selection::Ignored => {
            println!(
                "{}",
                Theme::warning("That action is unavailable for this project")
            );
        },
        Selection::ConfirmationOpen(ProjectAction::RemoveData) => {
            prompt_remove_data(coordinator, remote).await?;
        },
        Selection::ConfirmationOpen(action) => {
            prompt_confirmation(coordinator, action).await?;
        },
    }
    Ok(())
}

/// Render the confirmation dialog and, if accepted, dispatch and wait for
/// the outcome to settle.
async fn prompt_confirmation(coordinator: &ActionCoordinator, action: ProjectAction) -> Result<()> {
    let message = coordinator
        .confirmation_message(action)
        .unwrap_or_else(|| format!("Run {action}?"));

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(false)
        .interact()?;

    if !confirmed {
        coordinator.cancel(action);
        println!("{}", Theme::info("Cancelled"));
        return Ok(());
    }

    match coordinator.confirm(action) {
        Confirmed::Dispatched(handle) => {
            handle.settled().await;
            coordinator.drain_settled();
        },
        Confirmed::InFlight => {
            println!(
                "{}",
                Theme::info("A previous request for this action is still settling")
            );
        },
        Confirmed::Ignored => {},
    }
    Ok(())
}

/// The remove-data sub-form: collect a cutoff, call the mutation directly,
/// then report completion back to the coordinator.
async fn prompt_remove_data(
    coordinator: &ActionCoordinator,
    remote: &RemoteMutations,
) -> Result<()> {
    let raw = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Remove data recorded before (YYYY-MM-DD, empty to cancel)")
        .allow_empty(true)
        .interact_text()?;
    let raw = raw.trim();

    if raw.is_empty() {
        coordinator.cancel(ProjectAction::RemoveData);
        println!("{}", Theme::info("Cancelled"));
        return Ok(());
    }

    let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        coordinator.cancel(ProjectAction::RemoveData);
        println!("{}", Theme::error("Not a valid date; expected YYYY-MM-DD"));
        return Ok(());
    };
    let Some(cutoff) = date.and_hms_opt(0, 0, 0) else {
        coordinator.cancel(ProjectAction::RemoveData);
        println!("{}", Theme::error("Not a valid date"));
        return Ok(());
    };

    let id = coordinator.project().id;
    match remote.remove_project_data(&id, cutoff.and_utc()).await {
        Ok(()) => {
            coordinator.remove_data_completed();
        },
        Err(e) => {
            coordinator.cancel(ProjectAction::RemoveData);
            println!(
                "{}",
                Theme::error(&format!("Failed to remove data: {}", e.user_message()))
            );
        },
    }
    Ok(())
}

/// Stage a sessions filter; the loop commits it at its next idle point.
fn prompt_filter(filter: &SearchFilter) -> Result<()> {
    let value = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Session filter (empty to clear)")
        .allow_empty(true)
        .interact_text()?;

    filter.set(value.trim())?;
    Ok(())
}

/// Point the coordinator at a different project, resetting dialog state.
fn prompt_switch(coordinator: &ActionCoordinator) -> Result<()> {
    let id = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Project id")
        .interact_text()?;
    let name = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Project name")
        .interact_text()?;

    coordinator.set_project(ProjectRef::new(id.trim(), name.trim().to_owned()));
    Ok(())
}
