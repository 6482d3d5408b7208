//! Menu construction for project actions.
//!
//! The registry is a pure function from a project's identity to the ordered
//! list of menu entries. Nothing is cached; callers rebuild the menu
//! whenever they render, so a name change is reflected immediately.

use std::fmt;

use gantry_core::ProjectRef;

use crate::action::ProjectAction;

/// One entry in a project's action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// The action this entry triggers.
    pub action: ProjectAction,
    /// Label shown to the user.
    pub label: &'static str,
    /// Whether the entry is shown but not selectable.
    pub disabled: bool,
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disabled {
            write!(f, "{} (disabled)", self.label)
        } else {
            write!(f, "{}", self.label)
        }
    }
}

/// Derives the action menu and confirmation copy for a project.
pub struct ActionRegistry;

impl ActionRegistry {
    /// The ordered menu for a project.
    ///
    /// Always four entries: copy name, clear, remove data, delete. The
    /// delete entry is disabled exactly when the project is the reserved
    /// default project, which must always exist.
    #[must_use]
    pub fn menu(project: &ProjectRef) -> Vec<ActionDescriptor> {
        ProjectAction::ALL
            .iter()
            .map(|&action| ActionDescriptor {
                action,
                label: action.label(),
                disabled: action == ProjectAction::Delete && project.is_default(),
            })
            .collect()
    }

    /// Whether an action is currently selectable for a project.
    #[must_use]
    pub fn is_enabled(action: ProjectAction, project: &ProjectRef) -> bool {
        !(action == ProjectAction::Delete && project.is_default())
    }

    /// Title for the confirmation dialog of a destructive action.
    #[must_use]
    pub fn dialog_title(action: ProjectAction) -> Option<&'static str> {
        match action {
            ProjectAction::Delete => Some("Delete Project"),
            ProjectAction::Clear => Some("Clear Project"),
            ProjectAction::RemoveData => Some("Remove Data"),
            ProjectAction::CopyName => None,
        }
    }

    /// Body copy for the confirmation dialog of a destructive action.
    ///
    /// Remove-data has no static copy; its dialog body is the cutoff
    /// sub-form.
    #[must_use]
    pub fn confirmation_message(action: ProjectAction, project: &ProjectRef) -> Option<String> {
        match action {
            ProjectAction::Delete => Some(format!(
                "Are you sure you want to delete project {}? This cannot be undone.",
                project.name
            )),
            ProjectAction::Clear => Some(format!(
                "Are you sure you want to clear project {}? All traces and evaluations \
                 for this project will be deleted. This cannot be undone.",
                project.name
            )),
            ProjectAction::RemoveData | ProjectAction::CopyName => None,
        }
    }
}
