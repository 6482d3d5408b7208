//! Gantry Actions - confirmation-gated maintenance actions on a project.
//!
//! This crate implements the control flow behind a project's action menu:
//! one harmless entry (copy the project name) and three destructive ones
//! (clear all data, remove data before a cutoff, delete the project) that
//! must pass through an explicit confirmation step before anything is sent
//! to the server.
//!
//! # Components
//!
//! - **Actions**: [`ProjectAction`] is the closed set of menu entries;
//!   [`ActionRegistry`] derives the ordered menu and the confirmation copy
//!   for a given project.
//! - **Gates**: [`ConfirmationGate`] is the two-state pending-confirmation
//!   machine; [`GateSet`] holds one per destructive action.
//! - **Dispatch**: [`MutationDispatcher`] turns a confirmed action into a
//!   remote call through the [`ProjectMutations`] trait and folds the result
//!   into a [`MutationOutcome`].
//! - **Coordination**: [`ActionCoordinator`] sequences the whole flow
//!   (select, confirm or cancel, dispatch, settle) and completes into
//!   injected [`CompletionHooks`], [`FailureAlert`], and [`Clipboard`]
//!   collaborators.
//!
//! Gate transitions apply synchronously; dispatch settlements are staged on
//! a deferred queue and applied when the owner calls
//! [`ActionCoordinator::drain_settled`].
//!
//! # Example
//!
//! ```
//! use gantry_actions::{ActionRegistry, ProjectAction};
//! use gantry_core::ProjectRef;
//!
//! let project = ProjectRef::new("p1", "default");
//! let menu = ActionRegistry::menu(&project);
//!
//! // Delete is offered last and disabled for the reserved default project.
//! assert_eq!(menu.len(), 4);
//! assert_eq!(menu[3].action, ProjectAction::Delete);
//! assert!(menu[3].disabled);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod action;
pub mod clipboard;
pub mod coordinator;
pub mod dispatch;
/// Error types and results for the action layer.
pub mod error;
pub mod gate;
pub mod registry;

pub use action::ProjectAction;
pub use clipboard::{Clipboard, SystemClipboard};
pub use coordinator::{
    ActionCoordinator, CompletionHooks, CompletionTiming, Confirmed, DispatchHandle, FailureAlert,
    Selection, Settlement,
};
pub use dispatch::{
    ClearProjectInput, DispatchId, MutationDispatcher, MutationOutcome, ProjectMutations,
};
pub use error::{MutationError, MutationResult};
pub use gate::{ConfirmationGate, GateSet, GateState};
pub use registry::{ActionDescriptor, ActionRegistry};
