/// Errors from using a search filter handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchFilterError {
    /// A view asked for a filter with no provider in scope. This is a
    /// wiring mistake in the calling code and should fail fast.
    #[error("search filter must be used within a search provider scope")]
    MissingProvider,

    /// The owning provider was dropped while a handle was still live.
    #[error("search provider was dropped")]
    ProviderDropped,
}

/// Result type for search-filter operations.
pub type SearchFilterResult<T> = Result<T, SearchFilterError>;
