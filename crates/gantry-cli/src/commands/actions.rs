//! Actions command - print the action menu for a project.

use colored::Colorize;
use gantry_actions::ActionRegistry;
use gantry_core::ProjectRef;

use crate::theme::Theme;

/// Print the menu with availability markers, as the interactive loop would
/// offer it.
pub(crate) fn list_actions(project: &ProjectRef) -> anyhow::Result<()> {
    println!("\n{}", Theme::header(&format!("Actions for {project}")));
    println!(
        "{:<18} {:<22} {}",
        "ACTION".dimmed(),
        "KEY".dimmed(),
        "NOTES".dimmed()
    );
    println!("{}", Theme::separator());

    for descriptor in ActionRegistry::menu(project) {
        let note = if descriptor.disabled {
            "disabled for the default project".dimmed().to_string()
        } else if descriptor.action.is_destructive() {
            "asks for confirmation".yellow().to_string()
        } else {
            String::new()
        };

        let label = if descriptor.disabled {
            descriptor.label.dimmed().to_string()
        } else {
            descriptor.label.to_string()
        };

        println!(
            "{label:<18} {:<22} {note}",
            descriptor.action.key().dimmed()
        );
    }

    println!();
    Ok(())
}
