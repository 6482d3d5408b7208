//! Prelude module - commonly used types for convenient import.
//!
//! Use `use gantry_actions::prelude::*;` to import all essential types.

// Action types
pub use crate::ProjectAction;

// Registry types
pub use crate::{ActionDescriptor, ActionRegistry};

// Gate types
pub use crate::{ConfirmationGate, GateSet, GateState};

// Dispatch types
pub use crate::{
    ClearProjectInput, DispatchId, MutationDispatcher, MutationOutcome, ProjectMutations,
};

// Coordinator types
pub use crate::{
    ActionCoordinator, CompletionHooks, CompletionTiming, Confirmed, DispatchHandle, FailureAlert,
    Selection, Settlement,
};

// Clipboard types
pub use crate::{Clipboard, SystemClipboard};

// Errors
pub use crate::{MutationError, MutationResult};
