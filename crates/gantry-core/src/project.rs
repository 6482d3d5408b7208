//! Project identity types.
//!
//! A project is addressed by an opaque server-assigned [`ProjectId`]. The
//! action layer additionally needs the project's display name, because one
//! name is reserved: the `"default"` project always exists and can never be
//! deleted. [`ProjectRef`] bundles the two and is treated as read-only by
//! everything that holds it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the reserved project that cannot be deleted.
pub const DEFAULT_PROJECT_NAME: &str = "default";

/// Opaque remote identifier for a project.
///
/// Ids are minted by the server and round-tripped verbatim; they are never
/// parsed or synthesized locally. Serializes as the bare string so it can be
/// embedded directly in mutation variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Create a project ID from a server-assigned string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project:{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A project's identity as the action layer sees it: id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Opaque remote identifier.
    pub id: ProjectId,
    /// Human-readable project name.
    pub name: String,
}

impl ProjectRef {
    /// Create a project reference.
    #[must_use]
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether this is the reserved default project.
    ///
    /// The default project is the one destination that always exists, so
    /// deleting it is never offered.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_PROJECT_NAME
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
