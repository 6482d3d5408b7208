//! Confirmation gates for destructive actions.
//!
//! A [`ConfirmationGate`] is the smallest possible pending-confirmation
//! machine: closed or open, nothing else. Opening and closing are urgent
//! state changes and apply synchronously, so the next render after a
//! transition always observes it. The gate carries no memory of past
//! cycles and is reused for the lifetime of its coordinator.
//!
//! [`GateSet`] owns one gate per destructive action. Gates are fully
//! independent: opening one never touches another.

use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::action::ProjectAction;

/// The two states of a confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// No confirmation pending.
    Closed,
    /// Confirmation dialog is showing.
    Open,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
        }
    }
}

/// A reusable open/closed confirmation state for one destructive action.
///
/// All transitions are idempotent in effect: requesting an open gate or
/// cancelling a closed one changes nothing. The return values report
/// whether the call actually transitioned, which is what sequencing
/// decisions key off.
#[derive(Debug)]
pub struct ConfirmationGate {
    state: RwLock<GateState>,
}

impl ConfirmationGate {
    /// Create a gate in the closed state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(GateState::Closed),
        }
    }

    /// Request confirmation: closed becomes open.
    ///
    /// Returns `true` if the gate newly opened, `false` if it was already
    /// open (the request is absorbed).
    pub fn request(&self) -> bool {
        let mut state = self.write();
        match *state {
            GateState::Closed => {
                *state = GateState::Open;
                true
            },
            GateState::Open => false,
        }
    }

    /// Cancel a pending confirmation: open becomes closed, nothing else
    /// happens.
    ///
    /// Returns `true` if the gate was open.
    pub fn cancel(&self) -> bool {
        let mut state = self.write();
        match *state {
            GateState::Open => {
                *state = GateState::Closed;
                true
            },
            GateState::Closed => false,
        }
    }

    /// Accept a confirmation: open becomes closed.
    ///
    /// Returns `true` if the gate was open, meaning the confirm is valid
    /// and the caller should sequence the dispatch side effect. Confirming
    /// a closed gate is a defined no-op and returns `false`.
    pub fn confirm(&self) -> bool {
        let mut state = self.write();
        match *state {
            GateState::Open => {
                *state = GateState::Closed;
                true
            },
            GateState::Closed => false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GateState {
        *self.state.read().unwrap_or_else(|e| {
            tracing::warn!("ConfirmationGate lock poisoned, recovering");
            e.into_inner()
        })
    }

    /// Whether a confirmation is pending.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state() == GateState::Open
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, GateState> {
        self.state.write().unwrap_or_else(|e| {
            tracing::warn!("ConfirmationGate lock poisoned, recovering");
            e.into_inner()
        })
    }
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::new()
    }
}

/// One confirmation gate per destructive action.
#[derive(Debug, Default)]
pub struct GateSet {
    clear: ConfirmationGate,
    remove_data: ConfirmationGate,
    delete: ConfirmationGate,
}

impl GateSet {
    /// Create a set with every gate closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gate for an action, or `None` for actions that need no
    /// confirmation.
    #[must_use]
    pub fn get(&self, action: ProjectAction) -> Option<&ConfirmationGate> {
        match action {
            ProjectAction::Clear => Some(&self.clear),
            ProjectAction::RemoveData => Some(&self.remove_data),
            ProjectAction::Delete => Some(&self.delete),
            ProjectAction::CopyName => None,
        }
    }

    /// Whether the gate for an action is open. `false` for ungated actions.
    #[must_use]
    pub fn is_open(&self, action: ProjectAction) -> bool {
        self.get(action).is_some_and(ConfirmationGate::is_open)
    }

    /// Force every gate closed. Used when the project identity changes.
    pub fn reset_all(&self) {
        for action in ProjectAction::DESTRUCTIVE {
            if let Some(gate) = self.get(action) {
                gate.cancel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Single gate transitions
    // -----------------------------------------------------------------------

    #[test]
    fn test_gate_starts_closed() {
        let gate = ConfirmationGate::new();
        assert_eq!(gate.state(), GateState::Closed);
        assert!(!gate.is_open());
    }

    #[test]
    fn test_request_is_idempotent() {
        let gate = ConfirmationGate::new();
        assert!(gate.request());
        assert!(gate.is_open());

        // A second request is absorbed; the gate stays open.
        assert!(!gate.request());
        assert!(gate.is_open());
    }

    #[test]
    fn test_cancel_only_closes_open_gate() {
        let gate = ConfirmationGate::new();
        assert!(!gate.cancel());

        gate.request();
        assert!(gate.cancel());
        assert!(!gate.is_open());
    }

    #[test]
    fn test_confirm_reports_validity() {
        let gate = ConfirmationGate::new();

        // Confirming a closed gate is a no-op.
        assert!(!gate.confirm());

        gate.request();
        assert!(gate.confirm());
        assert!(!gate.is_open());

        // The confirm consumed the open state; a repeat is invalid.
        assert!(!gate.confirm());
    }

    #[test]
    fn test_gate_is_reusable() {
        let gate = ConfirmationGate::new();
        for _ in 0..3 {
            assert!(gate.request());
            assert!(gate.confirm());
        }
    }

    // -----------------------------------------------------------------------
    // GateSet
    // -----------------------------------------------------------------------

    #[test]
    fn test_copy_name_has_no_gate() {
        let gates = GateSet::new();
        assert!(gates.get(ProjectAction::CopyName).is_none());
        assert!(!gates.is_open(ProjectAction::CopyName));
    }

    #[test]
    fn test_gates_are_independent() {
        let gates = GateSet::new();
        gates
            .get(ProjectAction::Clear)
            .unwrap()
            .request();
        assert!(gates.is_open(ProjectAction::Clear));
        assert!(!gates.is_open(ProjectAction::Delete));
        assert!(!gates.is_open(ProjectAction::RemoveData));

        gates
            .get(ProjectAction::Delete)
            .unwrap()
            .request();
        gates.get(ProjectAction::Clear).unwrap().cancel();
        assert!(!gates.is_open(ProjectAction::Clear));
        assert!(gates.is_open(ProjectAction::Delete));
    }

    #[test]
    fn test_reset_all_closes_everything() {
        let gates = GateSet::new();
        for action in ProjectAction::DESTRUCTIVE {
            gates.get(action).unwrap().request();
        }

        gates.reset_all();
        for action in ProjectAction::DESTRUCTIVE {
            assert!(!gates.is_open(action));
        }
    }

    #[test]
    fn test_gate_state_serde() {
        let json = serde_json::to_string(&GateState::Open).unwrap();
        assert_eq!(json, "\"open\"");
        assert_eq!(GateState::Open.to_string(), "open");
    }
}
