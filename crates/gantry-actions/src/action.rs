//! Project action classification.
//!
//! [`ProjectAction`] is the closed set of operations a project's action menu
//! offers. Copying the name is harmless and runs immediately; the other
//! three destroy data and are gated behind explicit confirmation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation offered on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectAction {
    /// Copy the project name to the clipboard.
    CopyName,
    /// Delete every trace and evaluation in the project.
    #[serde(rename = "clear_project")]
    Clear,
    /// Remove project data older than a cutoff, collected by a sub-form.
    #[serde(rename = "remove_project_data")]
    RemoveData,
    /// Delete the project itself.
    #[serde(rename = "delete_project")]
    Delete,
}

impl ProjectAction {
    /// Every action in menu order.
    pub const ALL: [Self; 4] = [Self::CopyName, Self::Clear, Self::RemoveData, Self::Delete];

    /// The destructive actions, in menu order. Each owns a confirmation gate.
    pub const DESTRUCTIVE: [Self; 3] = [Self::Clear, Self::RemoveData, Self::Delete];

    /// Stable key identifying this action in configuration and logs.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::CopyName => "copy_name",
            Self::Clear => "clear_project",
            Self::RemoveData => "remove_project_data",
            Self::Delete => "delete_project",
        }
    }

    /// Menu label shown to the user.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CopyName => "Copy Name",
            Self::Clear => "Clear All Data",
            Self::RemoveData => "Remove Data",
            Self::Delete => "Delete",
        }
    }

    /// Whether this action destroys data and therefore requires confirmation.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        !matches!(self, Self::CopyName)
    }
}

impl fmt::Display for ProjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_stable() {
        assert_eq!(ProjectAction::CopyName.key(), "copy_name");
        assert_eq!(ProjectAction::Clear.key(), "clear_project");
        assert_eq!(ProjectAction::RemoveData.key(), "remove_project_data");
        assert_eq!(ProjectAction::Delete.key(), "delete_project");
    }

    #[test]
    fn test_labels() {
        assert_eq!(ProjectAction::CopyName.label(), "Copy Name");
        assert_eq!(ProjectAction::Clear.label(), "Clear All Data");
        assert_eq!(ProjectAction::RemoveData.label(), "Remove Data");
        assert_eq!(ProjectAction::Delete.label(), "Delete");
    }

    #[test]
    fn test_destructive_classification() {
        assert!(!ProjectAction::CopyName.is_destructive());
        for action in ProjectAction::DESTRUCTIVE {
            assert!(action.is_destructive());
        }
    }

    #[test]
    fn test_menu_order() {
        assert_eq!(
            ProjectAction::ALL,
            [
                ProjectAction::CopyName,
                ProjectAction::Clear,
                ProjectAction::RemoveData,
                ProjectAction::Delete,
            ]
        );
    }

    #[test]
    fn test_serde_uses_keys() {
        let json = serde_json::to_string(&ProjectAction::Delete).unwrap();
        assert_eq!(json, "\"delete_project\"");

        let parsed: ProjectAction = serde_json::from_str("\"clear_project\"").unwrap();
        assert_eq!(parsed, ProjectAction::Clear);

        // Display matches the serialized key
        assert_eq!(ProjectAction::RemoveData.to_string(), "remove_project_data");
    }
}
