//! Search-filter provider and handles.
//!
//! The provider owns two pieces of state: the committed filter value that
//! every consumer reads, and a staging queue of writes waiting for the
//! next commit. Filter writes are deliberately low priority; committing
//! them is the owner's idle-time work, and the last staged write wins.

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use gantry_core::DeferredQueue;

use crate::error::{SearchFilterError, SearchFilterResult};

struct FilterState {
    committed: RwLock<String>,
    staged: DeferredQueue<String>,
}

impl FilterState {
    fn committed(&self) -> String {
        self.committed
            .read()
            .unwrap_or_else(|e| {
                tracing::warn!("search filter lock poisoned, recovering");
                e.into_inner()
            })
            .clone()
    }
}

/// Owner of the search-filter state for one project subtree.
///
/// Create one per project page, hand out [`handle`](Self::handle)s to the
/// views underneath, and call [`commit_pending`](Self::commit_pending)
/// when idle.
pub struct SearchProvider {
    state: Arc<FilterState>,
}

impl SearchProvider {
    /// Create a provider with an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(FilterState {
                committed: RwLock::new(String::new()),
                staged: DeferredQueue::new(),
            }),
        }
    }

    /// A handle for a descendant view.
    ///
    /// Handles hold the provider weakly; once the provider is dropped they
    /// return [`SearchFilterError::ProviderDropped`] instead of stale data.
    #[must_use]
    pub fn handle(&self) -> SearchFilter {
        SearchFilter {
            state: Arc::downgrade(&self.state),
        }
    }

    /// The committed filter value.
    #[must_use]
    pub fn value(&self) -> String {
        self.state.committed()
    }

    /// Whether any writes are staged for the next commit.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.state.staged.is_empty()
    }

    /// Apply staged writes to the committed value, last write wins.
    ///
    /// Returns `true` if anything was applied. Consumers observe the new
    /// value from the next read on.
    pub fn commit_pending(&self) -> bool {
        let staged = self.state.staged.drain();
        let Some(value) = staged.into_iter().next_back() else {
            return false;
        };
        let mut committed = self.state.committed.write().unwrap_or_else(|e| {
            tracing::warn!("search filter lock poisoned, recovering");
            e.into_inner()
        });
        tracing::debug!(filter = %value, "committing search filter");
        *committed = value;
        true
    }
}

impl Default for SearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SearchProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchProvider")
            .field("committed", &self.value())
            .field("pending", &self.state.staged.len())
            .finish()
    }
}

/// A view's handle onto the shared search filter.
///
/// Cheap to clone; all clones observe the same provider.
#[derive(Clone)]
pub struct SearchFilter {
    state: Weak<FilterState>,
}

impl SearchFilter {
    /// Guard for views that receive the filter as an optional dependency.
    ///
    /// # Errors
    ///
    /// Returns [`SearchFilterError::MissingProvider`] when no provider was
    /// passed down, which indicates the view is mounted outside a provider
    /// scope.
    pub fn require(filter: Option<SearchFilter>) -> SearchFilterResult<SearchFilter> {
        filter.ok_or(SearchFilterError::MissingProvider)
    }

    /// Read the committed filter value.
    ///
    /// # Errors
    ///
    /// Returns [`SearchFilterError::ProviderDropped`] if the owning
    /// provider no longer exists.
    pub fn get(&self) -> SearchFilterResult<String> {
        let state = self.upgrade()?;
        Ok(state.committed())
    }

    /// Stage a filter write for the provider's next commit.
    ///
    /// The committed value is unchanged until
    /// [`SearchProvider::commit_pending`] runs.
    ///
    /// # Errors
    ///
    /// Returns [`SearchFilterError::ProviderDropped`] if the owning
    /// provider no longer exists.
    pub fn set(&self, value: impl Into<String>) -> SearchFilterResult<()> {
        let state = self.upgrade()?;
        state.staged.push(value.into());
        Ok(())
    }

    fn upgrade(&self) -> SearchFilterResult<Arc<FilterState>> {
        self.state
            .upgrade()
            .ok_or(SearchFilterError::ProviderDropped)
    }
}

impl fmt::Debug for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchFilter")
            .field("provider_alive", &(self.state.strong_count() > 0))
            .finish()
    }
}
