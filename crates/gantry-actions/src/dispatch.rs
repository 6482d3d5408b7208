//! Mutation dispatch for confirmed actions.
//!
//! Once an action passes its confirmation gate, the
//! [`MutationDispatcher`] builds the action-specific payload, sends it
//! through the [`ProjectMutations`] transport, and folds whatever comes
//! back into exactly one [`MutationOutcome`]. There is no retry: one
//! confirmed action, one dispatch, one outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use gantry_core::{ProjectId, ProjectRef};

use crate::action::ProjectAction;
use crate::error::MutationResult;

/// Unique identifier correlating a dispatch with its settlement in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(pub Uuid);

impl DispatchId {
    /// Create a new random dispatch ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispatch:{}", self.0)
    }
}

/// Named input object for the clear mutation.
///
/// The clear operation takes its arguments wrapped in an input object
/// rather than as bare variables; the delete operation sends the bare
/// project id. The dispatcher preserves that wire difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearProjectInput {
    /// The project to clear.
    pub id: ProjectId,
}

impl ClearProjectInput {
    /// Build the input for a project.
    #[must_use]
    pub fn new(id: ProjectId) -> Self {
        Self { id }
    }
}

/// The settled result of one dispatched mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum MutationOutcome {
    /// The remote executed the mutation.
    Success,
    /// The mutation failed; the message is what the user should see.
    Failure {
        /// Failure description.
        message: String,
    },
}

impl MutationOutcome {
    /// Whether the mutation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The failure message, if any.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { message } => Some(message),
        }
    }
}

impl fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure { message } => write!(f, "failure: {message}"),
        }
    }
}

/// Transport boundary for project mutations.
///
/// Implementations own the wire protocol; the dispatcher owns payload
/// construction and outcome folding. The remove-data flow never passes
/// through here because its sub-form talks to the transport directly.
///
/// # Example
///
/// ```rust,ignore
/// use gantry_actions::dispatch::ProjectMutations;
/// use gantry_actions::error::MutationResult;
///
/// struct HttpMutations { /* client, endpoint */ }
///
/// #[async_trait::async_trait]
/// impl ProjectMutations for HttpMutations {
///     async fn delete_project(&self, id: &ProjectId) -> MutationResult<()> {
///         // POST the delete mutation...
///         Ok(())
///     }
///
///     async fn clear_project(&self, input: ClearProjectInput) -> MutationResult<()> {
///         // POST the clear mutation...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ProjectMutations: Send + Sync {
    /// Delete a project by id.
    async fn delete_project(&self, id: &ProjectId) -> MutationResult<()>;

    /// Clear all traces and evaluations from a project.
    async fn clear_project(&self, input: ClearProjectInput) -> MutationResult<()>;
}

/// Builds payloads for confirmed actions and folds transport results into
/// outcomes.
#[derive(Clone)]
pub struct MutationDispatcher {
    mutations: Arc<dyn ProjectMutations>,
}

impl MutationDispatcher {
    /// Create a dispatcher over a transport.
    #[must_use]
    pub fn new(mutations: Arc<dyn ProjectMutations>) -> Self {
        Self { mutations }
    }

    /// Dispatch a confirmed action against a project.
    ///
    /// Returns `None` for actions that have no direct mutation: copying the
    /// name is local, and remove-data settles through its sub-form. For
    /// delete and clear, returns exactly one outcome; errors are folded
    /// into [`MutationOutcome::Failure`] rather than propagated.
    pub async fn dispatch(
        &self,
        action: ProjectAction,
        project: &ProjectRef,
    ) -> Option<MutationOutcome> {
        let result = match action {
            ProjectAction::CopyName | ProjectAction::RemoveData => {
                tracing::debug!(action = %action, "action has no direct mutation");
                return None;
            },
            ProjectAction::Delete => self.mutations.delete_project(&project.id).await,
            ProjectAction::Clear => {
                self.mutations
                    .clear_project(ClearProjectInput::new(project.id.clone()))
                    .await
            },
        };

        Some(Self::fold(action, project, result))
    }

    fn fold(
        action: ProjectAction,
        project: &ProjectRef,
        result: MutationResult<()>,
    ) -> MutationOutcome {
        match result {
            Ok(()) => {
                tracing::debug!(action = %action, project = %project, "mutation succeeded");
                MutationOutcome::Success
            },
            Err(error) => {
                tracing::warn!(action = %action, project = %project, error = %error, "mutation failed");
                MutationOutcome::Failure {
                    message: error.user_message().to_string(),
                }
            },
        }
    }
}

impl fmt::Debug for MutationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationDispatcher").finish_non_exhaustive()
    }
}
