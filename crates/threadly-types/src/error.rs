use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in threadly-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no signed-in user")]
    NotSignedIn,

    #[error("auth storage error: {0}")]
    Storage(String),
}

/// Errors surfaced by the session state machine.
///
/// Every collaborator failure is caught at the session boundary and turned
/// into exactly one of these kinds. All are local-recoverable; none aborts
/// the session, and no operation retries automatically.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Fetching chats or messages from the store failed.
    #[error("fetch failed: {0}")]
    Fetch(#[source] RepositoryError),

    /// Creating a new chat failed.
    #[error("chat creation failed: {0}")]
    Create(#[source] RepositoryError),

    /// Deleting a chat failed.
    #[error("chat deletion failed: {0}")]
    Delete(#[source] RepositoryError),

    /// Renaming a chat failed.
    #[error("chat rename failed: {0}")]
    Rename(#[source] RepositoryError),

    /// Persisting a user or assistant message failed.
    #[error("message persistence failed: {0}")]
    SendPersist(#[source] RepositoryError),

    /// The completion collaborator failed after the user message was saved.
    #[error("completion failed: {0}")]
    Completion(#[source] LlmError),

    /// The requested model is not in the enumerated set.
    #[error("unknown model: '{0}'")]
    InvalidModel(String),

    /// A message was dispatched with no chat selected.
    #[error("no active chat")]
    NoActiveChat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_session_error_wraps_repository_error() {
        let err = SessionError::Fetch(RepositoryError::Connection);
        assert_eq!(err.to_string(), "fetch failed: database connection error");
    }

    #[test]
    fn test_invalid_model_display() {
        let err = SessionError::InvalidModel("gpt-4".to_string());
        assert_eq!(err.to_string(), "unknown model: 'gpt-4'");
    }
}
