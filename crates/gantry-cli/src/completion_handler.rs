//! Terminal implementations of the coordinator's completion collaborators.

use std::sync::atomic::{AtomicBool, Ordering};

use gantry_actions::{CompletionHooks, FailureAlert};

use crate::theme::Theme;

/// Prints a status line per completed action and remembers a delete, so the
/// interactive loop can stop serving a project that no longer exists.
#[derive(Debug, Default)]
pub(crate) struct TerminalHooks {
    deleted: AtomicBool,
}

impl TerminalHooks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the delete completion has fired.
    pub(crate) fn project_deleted(&self) -> bool {
        self.deleted.load(Ordering::SeqCst)
    }
}

impl CompletionHooks for TerminalHooks {
    fn on_delete(&self) {
        self.deleted.store(true, Ordering::SeqCst);
        println!("{}", Theme::success("Project deleted"));
    }

    fn on_clear(&self) {
        println!("{}", Theme::success("All project data cleared"));
    }

    fn on_remove_data(&self) {
        println!("{}", Theme::success("Older data removed"));
    }
}

/// Failure notifications as red stderr lines, keeping stdout clean for the
/// menu and copied values.
#[derive(Debug, Default)]
pub(crate) struct TerminalAlert;

impl FailureAlert for TerminalAlert {
    fn alert(&self, message: &str) {
        eprintln!("{}", Theme::error(message));
    }
}
