//! Action coordinator — sequences the confirm-then-dispatch flow.
//!
//! The [`ActionCoordinator`] ties together:
//! - The [`ActionRegistry`] (what the menu offers for this project)
//! - The [`GateSet`] (pending confirmations, one gate per destructive action)
//! - The [`MutationDispatcher`] (remote calls for confirmed actions)
//! - Injected collaborators: [`CompletionHooks`], [`FailureAlert`], and
//!   [`Clipboard`]
//!
//! # Flow
//!
//! 1. A selection either copies the name (no gate, no mutation) or opens
//!    the action's confirmation gate
//! 2. Cancel closes the gate with no further effect
//! 3. Confirm closes the gate immediately, then dispatches the mutation on
//!    a detached task; the caller never waits on the network
//! 4. The settled outcome is staged on a deferred queue;
//!    [`drain_settled`](ActionCoordinator::drain_settled) applies it when
//!    the owning loop is idle, firing hooks and alerts
//! 5. Remove-data never dispatches here: its sub-form completes out of
//!    band and reports back through
//!    [`remove_data_completed`](ActionCoordinator::remove_data_completed)
//!
//! Hooks observe completion; they never influence whether an action runs.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};

use gantry_core::{DeferredQueue, ProjectRef};

use crate::action::ProjectAction;
use crate::clipboard::Clipboard;
use crate::dispatch::{DispatchId, MutationDispatcher, MutationOutcome, ProjectMutations};
use crate::gate::GateSet;
use crate::registry::{ActionDescriptor, ActionRegistry};

/// Callbacks fired when an action completes.
///
/// The owner of the coordinator (a page, a screen, a test) injects an
/// implementation to follow up on completed actions, typically by
/// refreshing or navigating. Each hook fires at most once per confirmed
/// action.
pub trait CompletionHooks: Send + Sync {
    /// The project was deleted.
    fn on_delete(&self);
    /// The project's traces and evaluations were cleared.
    fn on_clear(&self);
    /// The remove-data sub-form completed.
    fn on_remove_data(&self);
}

/// Synchronous user-facing failure notification.
///
/// Dispatch failures are folded into a single message and surfaced here;
/// they are never silently dropped and never propagated as errors.
pub trait FailureAlert: Send + Sync {
    /// Show a failure message to the user.
    fn alert(&self, message: &str);
}

/// When the delete completion hook fires relative to the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTiming {
    /// After the delete settles successfully; failures raise an alert.
    /// This matches how clear completes and is the default.
    #[default]
    Confirmed,
    /// At confirm time, before the mutation settles. A later failure is
    /// logged but not alerted, and the hook is not fired twice. This
    /// reproduces the legacy delete flow bit for bit.
    Optimistic,
}

impl fmt::Display for CompletionTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::Optimistic => write!(f, "optimistic"),
        }
    }
}

/// Result of selecting a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The project name was copied to the clipboard.
    CopiedName,
    /// The action's confirmation gate is now open (it may already have
    /// been; repeated requests are absorbed).
    ConfirmationOpen(ProjectAction),
    /// The entry was disabled or unknown; nothing happened.
    Ignored,
}

impl Selection {
    /// Whether the selection opened (or re-affirmed) a confirmation.
    #[must_use]
    pub fn is_confirmation_open(&self) -> bool {
        matches!(self, Self::ConfirmationOpen(_))
    }

    /// Whether the selection did nothing.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Result of confirming an action.
#[derive(Debug)]
pub enum Confirmed {
    /// The mutation was dispatched; the handle resolves once it settles
    /// into the deferred queue.
    Dispatched(DispatchHandle),
    /// A dispatch for this action is still unsettled; the confirm closed
    /// the dialog but issued nothing.
    InFlight,
    /// The gate was not open, or the action has no confirm step here.
    Ignored,
}

impl Confirmed {
    /// Whether a mutation was dispatched.
    #[must_use]
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }

    /// Whether the confirm was deduplicated against an unsettled dispatch.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Whether the confirm was a no-op.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Completion handle for one dispatched mutation.
///
/// Dropping the handle detaches the dispatch; it still settles into the
/// coordinator's queue. Await [`settled`](Self::settled) when ordering
/// matters, then drain.
pub struct DispatchHandle {
    id: DispatchId,
    task: tokio::task::JoinHandle<()>,
}

impl DispatchHandle {
    /// The dispatch this handle tracks.
    #[must_use]
    pub fn id(&self) -> DispatchId {
        self.id.clone()
    }

    /// Wait until the dispatch has settled into the deferred queue.
    pub async fn settled(self) {
        let _ = self.task.await;
    }
}

impl fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// A dispatch outcome waiting to be applied by the next drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// The dispatch that produced this outcome.
    pub id: DispatchId,
    /// The action that was dispatched.
    pub action: ProjectAction,
    /// How the mutation settled.
    pub outcome: MutationOutcome,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.id, self.action, self.outcome)
    }
}

/// A settlement stamped with the project generation that produced it.
struct Staged {
    generation: u64,
    settlement: Settlement,
}

/// Coordinates a project's action menu: selection, confirmation, dispatch,
/// and settlement.
///
/// One coordinator serves one project at a time. Its gates and in-flight
/// marks are private to it; two coordinators never share dialog state.
/// Methods take `&self` and are cheap; the only suspension point in the
/// whole flow is inside the detached dispatch task.
pub struct ActionCoordinator {
    project: RwLock<ProjectRef>,
    gates: GateSet,
    dispatcher: MutationDispatcher,
    hooks: Arc<dyn CompletionHooks>,
    alerts: Arc<dyn FailureAlert>,
    clipboard: Arc<dyn Clipboard>,
    settled: Arc<DeferredQueue<Staged>>,
    in_flight: Mutex<HashSet<ProjectAction>>,
    /// Bumped on project change; settlements from an older generation are
    /// discarded instead of applied.
    generation: AtomicU64,
    delete_completion: CompletionTiming,
}

impl ActionCoordinator {
    /// Create a coordinator for a project.
    #[must_use]
    pub fn new(
        project: ProjectRef,
        mutations: Arc<dyn ProjectMutations>,
        hooks: Arc<dyn CompletionHooks>,
        alerts: Arc<dyn FailureAlert>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            project: RwLock::new(project),
            gates: GateSet::new(),
            dispatcher: MutationDispatcher::new(mutations),
            hooks,
            alerts,
            clipboard,
            settled: Arc::new(DeferredQueue::new()),
            in_flight: Mutex::new(HashSet::new()),
            generation: AtomicU64::new(0),
            delete_completion: CompletionTiming::default(),
        }
    }

    /// Set when the delete completion hook fires.
    #[must_use]
    pub fn with_delete_completion(mut self, timing: CompletionTiming) -> Self {
        self.delete_completion = timing;
        self
    }

    /// The project this coordinator currently serves.
    #[must_use]
    pub fn project(&self) -> ProjectRef {
        self.project
            .read()
            .unwrap_or_else(|e| {
                tracing::warn!("ActionCoordinator project lock poisoned, recovering");
                e.into_inner()
            })
            .clone()
    }

    /// The ordered menu for the current project.
    #[must_use]
    pub fn menu(&self) -> Vec<ActionDescriptor> {
        ActionRegistry::menu(&self.project())
    }

    /// Confirmation copy for an action against the current project.
    #[must_use]
    pub fn confirmation_message(&self, action: ProjectAction) -> Option<String> {
        ActionRegistry::confirmation_message(action, &self.project())
    }

    /// Handle a menu selection.
    ///
    /// Copying the name happens synchronously with no gate and no
    /// mutation. Destructive selections open the action's gate. A disabled
    /// entry (delete on the default project) is treated as a no-op rather
    /// than an error, guarding against stale or forged selections.
    pub fn select(&self, action: ProjectAction) -> Selection {
        let project = self.project();

        if action == ProjectAction::CopyName {
            self.clipboard.set_text(&project.name);
            tracing::debug!(project = %project, "copied project name");
            return Selection::CopiedName;
        }

        if !ActionRegistry::is_enabled(action, &project) {
            tracing::debug!(action = %action, project = %project, "ignoring disabled selection");
            return Selection::Ignored;
        }

        let Some(gate) = self.gates.get(action) else {
            return Selection::Ignored;
        };
        let newly_opened = gate.request();
        tracing::debug!(action = %action, newly_opened, "confirmation requested");
        Selection::ConfirmationOpen(action)
    }

    /// Cancel a pending confirmation. Closes the gate and nothing else; a
    /// dispatch already in flight is unaffected.
    ///
    /// Returns `true` if a gate actually closed.
    pub fn cancel(&self, action: ProjectAction) -> bool {
        let Some(gate) = self.gates.get(action) else {
            return false;
        };
        let closed = gate.cancel();
        if closed {
            tracing::debug!(action = %action, "confirmation cancelled");
        }
        closed
    }

    /// Accept a pending confirmation and dispatch the mutation.
    ///
    /// The gate closes immediately; the mutation runs on a detached task
    /// and settles into the deferred queue, so this never blocks on the
    /// network. Confirming a closed gate is a no-op. While a dispatch for
    /// the same action is unsettled, further confirms close the dialog but
    /// issue nothing.
    ///
    /// Remove-data is not confirmable here: its sub-form completes out of
    /// band (see [`remove_data_completed`](Self::remove_data_completed)).
    ///
    /// Must be called within a tokio runtime.
    pub fn confirm(&self, action: ProjectAction) -> Confirmed {
        if !matches!(action, ProjectAction::Delete | ProjectAction::Clear) {
            return Confirmed::Ignored;
        }
        let Some(gate) = self.gates.get(action) else {
            return Confirmed::Ignored;
        };
        if !gate.confirm() {
            tracing::debug!(action = %action, "confirm without open gate, ignoring");
            return Confirmed::Ignored;
        }

        // Gate is closed from here on; the dialog is gone before any
        // network traffic starts.

        {
            let mut in_flight = self.lock_in_flight();
            if !in_flight.insert(action) {
                tracing::debug!(action = %action, "dispatch already in flight, not re-issuing");
                return Confirmed::InFlight;
            }
        }

        let project = self.project();
        let id = DispatchId::new();
        tracing::info!(dispatch = %id, action = %action, project = %project, "dispatching mutation");

        if action == ProjectAction::Delete && self.delete_completion == CompletionTiming::Optimistic
        {
            // Legacy timing: the hook fires before the outcome is known.
            self.hooks.on_delete();
        }

        let dispatcher = self.dispatcher.clone();
        let settled = Arc::clone(&self.settled);
        let generation = self.generation.load(Ordering::SeqCst);
        let task_id = id.clone();
        let task = tokio::spawn(async move {
            if let Some(outcome) = dispatcher.dispatch(action, &project).await {
                settled.push(Staged {
                    generation,
                    settlement: Settlement {
                        id: task_id,
                        action,
                        outcome,
                    },
                });
            }
        });

        Confirmed::Dispatched(DispatchHandle { id, task })
    }

    /// Apply every settled outcome: clear in-flight marks, fire completion
    /// hooks, raise failure alerts.
    ///
    /// This is the deferred half of the flow; call it when the owning loop
    /// is idle. Settlements staged before the last project change are
    /// discarded. Returns the number of settlements applied.
    pub fn drain_settled(&self) -> usize {
        let current = self.generation.load(Ordering::SeqCst);
        let mut applied = 0_usize;
        for staged in self.settled.drain() {
            if staged.generation != current {
                tracing::debug!(
                    settlement = %staged.settlement,
                    "discarding settlement from previous project"
                );
                continue;
            }
            self.apply(staged.settlement);
            applied = applied.saturating_add(1);
        }
        applied
    }

    fn apply(&self, settlement: Settlement) {
        {
            let mut in_flight = self.lock_in_flight();
            in_flight.remove(&settlement.action);
        }

        match (settlement.action, &settlement.outcome) {
            (ProjectAction::Clear, MutationOutcome::Success) => {
                tracing::info!(dispatch = %settlement.id, "project cleared");
                self.hooks.on_clear();
            },
            (ProjectAction::Clear, MutationOutcome::Failure { message }) => {
                tracing::warn!(dispatch = %settlement.id, error = %message, "clear failed");
                self.alerts
                    .alert(&format!("Failed to clear project: {message}"));
            },
            (ProjectAction::Delete, MutationOutcome::Success) => {
                tracing::info!(dispatch = %settlement.id, "project deleted");
                if self.delete_completion == CompletionTiming::Confirmed {
                    self.hooks.on_delete();
                }
            },
            (ProjectAction::Delete, MutationOutcome::Failure { message }) => {
                match self.delete_completion {
                    CompletionTiming::Confirmed => {
                        tracing::warn!(dispatch = %settlement.id, error = %message, "delete failed");
                        self.alerts
                            .alert(&format!("Failed to delete project: {message}"));
                    },
                    CompletionTiming::Optimistic => {
                        // The hook already fired at confirm; legacy parity
                        // keeps the failure out of the user's face.
                        tracing::warn!(
                            dispatch = %settlement.id,
                            error = %message,
                            "delete failed after optimistic completion"
                        );
                    },
                }
            },
            _ => {
                tracing::debug!(settlement = %settlement, "settlement for non-dispatching action");
            },
        }
    }

    /// Report that the remove-data sub-form completed.
    ///
    /// If the remove-data gate is open, fires the completion hook and then
    /// closes the gate, in that order. Returns `true` if the completion
    /// was accepted; a completion with no open gate is a no-op.
    pub fn remove_data_completed(&self) -> bool {
        let Some(gate) = self.gates.get(ProjectAction::RemoveData) else {
            return false;
        };
        if !gate.is_open() {
            tracing::debug!("remove-data completion without open gate, ignoring");
            return false;
        }
        tracing::info!(project = %self.project(), "remove-data sub-form completed");
        self.hooks.on_remove_data();
        gate.cancel();
        true
    }

    /// Point the coordinator at a different project.
    ///
    /// All gates close, in-flight marks clear, and undrained settlements
    /// (including ones that arrive later from the old project's
    /// dispatches) are discarded. Setting the same project is a no-op.
    pub fn set_project(&self, project: ProjectRef) {
        {
            let mut current = self.project.write().unwrap_or_else(|e| {
                tracing::warn!("ActionCoordinator project lock poisoned, recovering");
                e.into_inner()
            });
            if *current == project {
                return;
            }
            tracing::debug!(from = %current, to = %project, "switching project");
            *current = project;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.gates.reset_all();
        self.lock_in_flight().clear();
        let dropped = self.settled.drain().len();
        if dropped > 0 {
            tracing::debug!(dropped, "discarded staged settlements on project switch");
        }
    }

    /// Whether the gate for an action is open.
    #[must_use]
    pub fn is_open(&self, action: ProjectAction) -> bool {
        self.gates.is_open(action)
    }

    /// Whether a dispatch for an action is still unsettled.
    #[must_use]
    pub fn in_flight(&self, action: ProjectAction) -> bool {
        self.lock_in_flight().contains(&action)
    }

    /// Number of settlements waiting for the next drain.
    #[must_use]
    pub fn pending_settlements(&self) -> usize {
        self.settled.len()
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, HashSet<ProjectAction>> {
        self.in_flight.lock().unwrap_or_else(|e| {
            tracing::warn!("ActionCoordinator in-flight lock poisoned, recovering");
            e.into_inner()
        })
    }
}

impl fmt::Debug for ActionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCoordinator")
            .field("project", &self.project())
            .field("delete_completion", &self.delete_completion)
            .field("pending_settlements", &self.pending_settlements())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Semaphore;

    use gantry_core::ProjectId;

    use crate::dispatch::ClearProjectInput;
    use crate::error::{MutationError, MutationResult};

    /// A transport that records calls, answers from a script, and can hold
    /// dispatches until the test releases a permit.
    struct ScriptedMutations {
        delete_error: Option<MutationError>,
        clear_error: Option<MutationError>,
        hold: Option<Arc<Semaphore>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedMutations {
        fn ok() -> Self {
            Self {
                delete_error: None,
                clear_error: None,
                hold: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_clear(message: &str) -> Self {
            Self {
                clear_error: Some(MutationError::Rejected {
                    message: message.to_string(),
                }),
                ..Self::ok()
            }
        }

        fn failing_delete(message: &str) -> Self {
            Self {
                delete_error: Some(MutationError::Transport(message.to_string())),
                ..Self::ok()
            }
        }

        fn held(hold: Arc<Semaphore>) -> Self {
            Self {
                hold: Some(hold),
                ..Self::ok()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        async fn answer(&self, error: &Option<MutationError>) -> MutationResult<()> {
            if let Some(hold) = &self.hold {
                hold.acquire().await.expect("hold closed").forget();
            }
            match error {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ProjectMutations for ScriptedMutations {
        async fn delete_project(&self, id: &ProjectId) -> MutationResult<()> {
            self.calls.lock().unwrap().push(format!("delete:{}", id.as_str()));
            self.answer(&self.delete_error).await
        }

        async fn clear_project(&self, input: ClearProjectInput) -> MutationResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("clear:{}", input.id.as_str()));
            self.answer(&self.clear_error).await
        }
    }

    /// Hooks that count invocations.
    #[derive(Default)]
    struct RecordingHooks {
        deletes: AtomicUsize,
        clears: AtomicUsize,
        removes: AtomicUsize,
    }

    impl RecordingHooks {
        fn counts(&self) -> (usize, usize, usize) {
            (
                self.deletes.load(Ordering::SeqCst),
                self.clears.load(Ordering::SeqCst),
                self.removes.load(Ordering::SeqCst),
            )
        }
    }

    impl CompletionHooks for RecordingHooks {
        fn on_delete(&self) {
            self.deletes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_clear(&self) {
            self.clears.fetch_add(1, Ordering::SeqCst);
        }

        fn on_remove_data(&self) {
            self.removes.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Alert sink that records messages.
    #[derive(Default)]
    struct RecordingAlert {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingAlert {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl FailureAlert for RecordingAlert {
        fn alert(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    /// Clipboard that records copied text.
    #[derive(Default)]
    struct MemoryClipboard {
        copied: Mutex<Vec<String>>,
    }

    impl MemoryClipboard {
        fn copied(&self) -> Vec<String> {
            self.copied.lock().unwrap().clone()
        }
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&self, text: &str) {
            self.copied.lock().unwrap().push(text.to_string());
        }
    }

    struct Fixture {
        coordinator: ActionCoordinator,
        mutations: Arc<ScriptedMutations>,
        hooks: Arc<RecordingHooks>,
        alerts: Arc<RecordingAlert>,
        clipboard: Arc<MemoryClipboard>,
    }

    fn fixture_for(project: ProjectRef, mutations: ScriptedMutations) -> Fixture {
        let mutations = Arc::new(mutations);
        let hooks = Arc::new(RecordingHooks::default());
        let alerts = Arc::new(RecordingAlert::default());
        let clipboard = Arc::new(MemoryClipboard::default());
        let coordinator = ActionCoordinator::new(
            project,
            Arc::clone(&mutations) as Arc<dyn ProjectMutations>,
            Arc::clone(&hooks) as Arc<dyn CompletionHooks>,
            Arc::clone(&alerts) as Arc<dyn FailureAlert>,
            Arc::clone(&clipboard) as Arc<dyn Clipboard>,
        );
        Fixture {
            coordinator,
            mutations,
            hooks,
            alerts,
            clipboard,
        }
    }

    fn fixture(mutations: ScriptedMutations) -> Fixture {
        fixture_for(ProjectRef::new("p1", "my-project"), mutations)
    }

    async fn confirm_and_settle(fixture: &Fixture, action: ProjectAction) {
        let outcome = fixture.coordinator.confirm(action);
        let Confirmed::Dispatched(handle) = outcome else {
            panic!("expected dispatch for {action}");
        };
        handle.settled().await;
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    #[test]
    fn test_copy_name_is_synchronous_and_ungated() {
        let f = fixture(ScriptedMutations::ok());

        let selection = f.coordinator.select(ProjectAction::CopyName);
        assert_eq!(selection, Selection::CopiedName);
        assert_eq!(f.clipboard.copied(), vec!["my-project"]);

        // No gate opened, no mutation issued.
        for action in ProjectAction::DESTRUCTIVE {
            assert!(!f.coordinator.is_open(action));
        }
        assert!(f.mutations.calls().is_empty());
    }

    #[test]
    fn test_select_opens_gate_idempotently() {
        let f = fixture(ScriptedMutations::ok());

        let first = f.coordinator.select(ProjectAction::Clear);
        assert_eq!(first, Selection::ConfirmationOpen(ProjectAction::Clear));
        assert!(f.coordinator.is_open(ProjectAction::Clear));

        // Selecting again while open is absorbed.
        let second = f.coordinator.select(ProjectAction::Clear);
        assert_eq!(second, Selection::ConfirmationOpen(ProjectAction::Clear));
        assert!(f.coordinator.is_open(ProjectAction::Clear));
    }

    #[test]
    fn test_delete_ignored_on_default_project() {
        let f = fixture_for(ProjectRef::new("p1", "default"), ScriptedMutations::ok());

        let selection = f.coordinator.select(ProjectAction::Delete);
        assert!(selection.is_ignored());
        assert!(!f.coordinator.is_open(ProjectAction::Delete));

        // Other destructive actions stay available.
        assert!(
            f.coordinator
                .select(ProjectAction::Clear)
                .is_confirmation_open()
        );
    }

    #[test]
    fn test_gates_do_not_interfere() {
        let f = fixture(ScriptedMutations::ok());

        f.coordinator.select(ProjectAction::Clear);
        f.coordinator.select(ProjectAction::Delete);
        assert!(f.coordinator.is_open(ProjectAction::Clear));
        assert!(f.coordinator.is_open(ProjectAction::Delete));

        assert!(f.coordinator.cancel(ProjectAction::Clear));
        assert!(!f.coordinator.is_open(ProjectAction::Clear));
        assert!(f.coordinator.is_open(ProjectAction::Delete));
    }

    // -----------------------------------------------------------------------
    // Cancellation
    // -----------------------------------------------------------------------

    #[test]
    fn test_cancel_issues_nothing() {
        let f = fixture(ScriptedMutations::ok());

        f.coordinator.select(ProjectAction::Delete);
        assert!(f.coordinator.cancel(ProjectAction::Delete));

        assert!(f.mutations.calls().is_empty());
        assert_eq!(f.hooks.counts(), (0, 0, 0));
        assert!(f.alerts.messages().is_empty());

        // Cancelling again reports nothing closed.
        assert!(!f.coordinator.cancel(ProjectAction::Delete));
        assert!(!f.coordinator.cancel(ProjectAction::CopyName));
    }

    // -----------------------------------------------------------------------
    // Confirm and settle: clear
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_clear_success_fires_hook_only_after_drain() {
        let f = fixture(ScriptedMutations::ok());

        f.coordinator.select(ProjectAction::Clear);
        let outcome = f.coordinator.confirm(ProjectAction::Clear);
        // The gate closes before the mutation settles.
        assert!(!f.coordinator.is_open(ProjectAction::Clear));

        let Confirmed::Dispatched(handle) = outcome else {
            panic!("expected dispatch");
        };
        handle.settled().await;

        // Settled but not yet drained: the hook has not fired.
        assert_eq!(f.coordinator.pending_settlements(), 1);
        assert_eq!(f.hooks.counts(), (0, 0, 0));

        assert_eq!(f.coordinator.drain_settled(), 1);
        assert_eq!(f.hooks.counts(), (0, 1, 0));
        assert!(f.alerts.messages().is_empty());
        assert_eq!(f.mutations.calls(), vec!["clear:p1"]);
    }

    #[tokio::test]
    async fn test_clear_failure_alerts_and_skips_hook() {
        let f = fixture(ScriptedMutations::failing_clear("database is locked"));

        f.coordinator.select(ProjectAction::Clear);
        confirm_and_settle(&f, ProjectAction::Clear).await;
        assert_eq!(f.coordinator.drain_settled(), 1);

        assert_eq!(f.hooks.counts(), (0, 0, 0));
        assert_eq!(
            f.alerts.messages(),
            vec!["Failed to clear project: database is locked"]
        );
    }

    // -----------------------------------------------------------------------
    // Confirm and settle: delete timings
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_delete_confirmed_timing_waits_for_success() {
        let f = fixture(ScriptedMutations::ok());

        f.coordinator.select(ProjectAction::Delete);
        confirm_and_settle(&f, ProjectAction::Delete).await;

        // Hook only after the drain applies the successful settlement.
        assert_eq!(f.hooks.counts(), (0, 0, 0));
        assert_eq!(f.coordinator.drain_settled(), 1);
        assert_eq!(f.hooks.counts(), (1, 0, 0));
        assert!(f.alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_delete_confirmed_timing_alerts_on_failure() {
        let f = fixture(ScriptedMutations::failing_delete("connection reset"));

        f.coordinator.select(ProjectAction::Delete);
        confirm_and_settle(&f, ProjectAction::Delete).await;
        assert_eq!(f.coordinator.drain_settled(), 1);

        assert_eq!(f.hooks.counts(), (0, 0, 0));
        assert_eq!(
            f.alerts.messages(),
            vec!["Failed to delete project: connection reset"]
        );
    }

    #[tokio::test]
    async fn test_delete_optimistic_timing_fires_hook_at_confirm() {
        let f = fixture(ScriptedMutations::ok());
        let coordinator = f
            .coordinator
            .with_delete_completion(CompletionTiming::Optimistic);

        coordinator.select(ProjectAction::Delete);
        let outcome = coordinator.confirm(ProjectAction::Delete);
        // Hook fired before the mutation settled.
        assert_eq!(f.hooks.counts(), (1, 0, 0));

        let Confirmed::Dispatched(handle) = outcome else {
            panic!("expected dispatch");
        };
        handle.settled().await;
        assert_eq!(coordinator.drain_settled(), 1);

        // Not fired a second time on success.
        assert_eq!(f.hooks.counts(), (1, 0, 0));
    }

    #[tokio::test]
    async fn test_delete_optimistic_timing_swallows_failure() {
        let f = fixture(ScriptedMutations::failing_delete("gone away"));
        let coordinator = f
            .coordinator
            .with_delete_completion(CompletionTiming::Optimistic);

        coordinator.select(ProjectAction::Delete);
        let outcome = coordinator.confirm(ProjectAction::Delete);
        assert_eq!(f.hooks.counts(), (1, 0, 0));

        let Confirmed::Dispatched(handle) = outcome else {
            panic!("expected dispatch");
        };
        handle.settled().await;
        assert_eq!(coordinator.drain_settled(), 1);

        // Legacy parity: no alert, no second hook.
        assert!(f.alerts.messages().is_empty());
        assert_eq!(f.hooks.counts(), (1, 0, 0));
    }

    // -----------------------------------------------------------------------
    // Defensive no-ops
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_confirm_without_open_gate_is_noop() {
        let f = fixture(ScriptedMutations::ok());

        assert!(f.coordinator.confirm(ProjectAction::Clear).is_ignored());
        assert!(f.coordinator.confirm(ProjectAction::CopyName).is_ignored());
        assert!(f.mutations.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_remove_data_never_dispatches() {
        let f = fixture(ScriptedMutations::ok());

        f.coordinator.select(ProjectAction::RemoveData);
        let outcome = f.coordinator.confirm(ProjectAction::RemoveData);
        assert!(outcome.is_ignored());
        // The sub-form owns this flow; the gate stays open.
        assert!(f.coordinator.is_open(ProjectAction::RemoveData));
        assert!(f.mutations.calls().is_empty());
    }

    // -----------------------------------------------------------------------
    // In-flight guard
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_in_flight_guard_blocks_duplicate_dispatch() {
        let hold = Arc::new(Semaphore::new(0));
        let f = fixture(ScriptedMutations::held(Arc::clone(&hold)));

        f.coordinator.select(ProjectAction::Clear);
        let first = f.coordinator.confirm(ProjectAction::Clear);
        assert!(first.is_dispatched());
        assert!(f.coordinator.in_flight(ProjectAction::Clear));

        // Reopen and confirm again while the first dispatch is held.
        f.coordinator.select(ProjectAction::Clear);
        let second = f.coordinator.confirm(ProjectAction::Clear);
        assert!(second.is_in_flight());
        // The duplicate confirm still closed the dialog.
        assert!(!f.coordinator.is_open(ProjectAction::Clear));

        hold.add_permits(1);
        let Confirmed::Dispatched(handle) = first else {
            panic!("expected dispatch");
        };
        handle.settled().await;
        assert_eq!(f.coordinator.drain_settled(), 1);

        // Exactly one mutation went out, one hook fired.
        assert_eq!(f.mutations.calls(), vec!["clear:p1"]);
        assert_eq!(f.hooks.counts(), (0, 1, 0));

        // Guard released after the drain; a new confirm dispatches again.
        f.coordinator.select(ProjectAction::Clear);
        let third = f.coordinator.confirm(ProjectAction::Clear);
        assert!(third.is_dispatched());
        hold.add_permits(1);
        let Confirmed::Dispatched(handle) = third else {
            panic!("expected dispatch");
        };
        handle.settled().await;
        assert_eq!(f.coordinator.drain_settled(), 1);
        assert_eq!(f.hooks.counts(), (0, 2, 0));
    }

    #[tokio::test]
    async fn test_different_actions_dispatch_concurrently() {
        let hold = Arc::new(Semaphore::new(0));
        let f = fixture(ScriptedMutations::held(Arc::clone(&hold)));

        f.coordinator.select(ProjectAction::Clear);
        f.coordinator.select(ProjectAction::Delete);
        let clear = f.coordinator.confirm(ProjectAction::Clear);
        let delete = f.coordinator.confirm(ProjectAction::Delete);
        assert!(clear.is_dispatched());
        assert!(delete.is_dispatched());
        assert!(f.coordinator.in_flight(ProjectAction::Clear));
        assert!(f.coordinator.in_flight(ProjectAction::Delete));

        hold.add_permits(2);
        let Confirmed::Dispatched(clear) = clear else {
            panic!("expected dispatch");
        };
        let Confirmed::Dispatched(delete) = delete else {
            panic!("expected dispatch");
        };
        clear.settled().await;
        delete.settled().await;

        assert_eq!(f.coordinator.drain_settled(), 2);
        assert_eq!(f.hooks.counts(), (1, 1, 0));
    }

    // -----------------------------------------------------------------------
    // Remove-data completion
    // -----------------------------------------------------------------------

    #[test]
    fn test_remove_data_completion_fires_hook_then_closes() {
        let f = fixture(ScriptedMutations::ok());

        f.coordinator.select(ProjectAction::RemoveData);
        assert!(f.coordinator.remove_data_completed());

        assert_eq!(f.hooks.counts(), (0, 0, 1));
        assert!(!f.coordinator.is_open(ProjectAction::RemoveData));
        assert!(f.mutations.calls().is_empty());

        // A completion with no open gate is ignored.
        assert!(!f.coordinator.remove_data_completed());
        assert_eq!(f.hooks.counts(), (0, 0, 1));
    }

    // -----------------------------------------------------------------------
    // Project switching
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_set_project_resets_dialog_state() {
        let hold = Arc::new(Semaphore::new(0));
        let f = fixture(ScriptedMutations::held(Arc::clone(&hold)));

        f.coordinator.select(ProjectAction::Delete);
        f.coordinator.select(ProjectAction::Clear);
        let outcome = f.coordinator.confirm(ProjectAction::Clear);
        assert!(f.coordinator.in_flight(ProjectAction::Clear));

        f.coordinator.set_project(ProjectRef::new("p2", "other"));

        // Gates and in-flight marks are gone.
        assert!(!f.coordinator.is_open(ProjectAction::Delete));
        assert!(!f.coordinator.in_flight(ProjectAction::Clear));

        // The old dispatch settles after the switch; the drain discards it.
        hold.add_permits(1);
        let Confirmed::Dispatched(handle) = outcome else {
            panic!("expected dispatch");
        };
        handle.settled().await;
        assert_eq!(f.coordinator.drain_settled(), 0);
        assert_eq!(f.hooks.counts(), (0, 0, 0));
    }

    #[test]
    fn test_set_same_project_keeps_state() {
        let f = fixture(ScriptedMutations::ok());

        f.coordinator.select(ProjectAction::Clear);
        f.coordinator.set_project(ProjectRef::new("p1", "my-project"));
        assert!(f.coordinator.is_open(ProjectAction::Clear));
    }

    #[test]
    fn test_rename_to_default_disables_delete() {
        let f = fixture(ScriptedMutations::ok());

        f.coordinator.set_project(ProjectRef::new("p1", "default"));
        let menu = f.coordinator.menu();
        assert!(menu[3].disabled);
        assert!(f.coordinator.select(ProjectAction::Delete).is_ignored());
    }

    // -----------------------------------------------------------------------
    // Misc
    // -----------------------------------------------------------------------

    #[test]
    fn test_confirmation_message_uses_current_project() {
        let f = fixture(ScriptedMutations::ok());
        let message = f
            .coordinator
            .confirmation_message(ProjectAction::Delete)
            .unwrap();
        assert!(message.contains("my-project"));
    }

    #[test]
    fn test_completion_timing_serde_and_default() {
        assert_eq!(CompletionTiming::default(), CompletionTiming::Confirmed);
        let json = serde_json::to_string(&CompletionTiming::Optimistic).unwrap();
        assert_eq!(json, "\"optimistic\"");
        assert_eq!(CompletionTiming::Confirmed.to_string(), "confirmed");
    }

    #[test]
    fn test_debug() {
        let f = fixture(ScriptedMutations::ok());
        let debug = format!("{:?}", f.coordinator);
        assert!(debug.contains("ActionCoordinator"));
        assert!(debug.contains("my-project"));
    }
}
