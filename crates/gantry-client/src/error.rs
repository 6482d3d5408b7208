//! Client construction error types.

use thiserror::Error;

/// Errors that can occur while constructing the remote client.
///
/// Mutation failures are reported separately through
/// [`MutationError`](gantry_actions::MutationError); this type only covers
/// problems that prevent a client from existing at all.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint URL '{url}': {message}")]
    InvalidEndpoint {
        /// The offending URL string.
        url: String,
        /// Parse failure detail.
        message: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Result type for client construction.
pub type ClientResult<T> = Result<T, ClientError>;
