/// Errors that can occur while dispatching a project mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// The remote received the mutation and refused to execute it.
    #[error("mutation rejected: {message}")]
    Rejected {
        /// The remote's failure message.
        message: String,
    },

    /// The request never completed (connection failure, timeout, or an
    /// unusable reply). Timeouts are not distinguished from other transport
    /// failures.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl MutationError {
    /// The message a user should see for this failure.
    ///
    /// For rejections this is the remote's own message; for transport
    /// failures it is the underlying description.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message } => message,
            Self::Transport(message) => message,
        }
    }
}

/// Result type for mutation dispatch.
pub type MutationResult<T> = Result<T, MutationError>;
