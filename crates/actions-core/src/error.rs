//! Session error type

use std::sync::Arc;

/// Result type for session accessors
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Failure of a session step.
///
/// Cloning is cheap: provider failures are shared, so a cached failure
/// re-surfaces as the same underlying error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// The repository coordinate could not be derived
    #[error("Git context not detected. Are you in a GitHub repo?")]
    ContextNotDetected(#[source] Arc<actions_git::Error>),

    /// A provider call failed
    #[error(transparent)]
    Provider(Arc<actions_client::Error>),
}

impl SessionError {
    /// The provider error, if this failure came from a provider call.
    pub fn provider(&self) -> Option<&actions_client::Error> {
        match self {
            SessionError::Provider(e) => Some(e),
            SessionError::ContextNotDetected(_) => None,
        }
    }

    /// Whether two errors are the same cached failure.
    pub fn same_failure(&self, other: &SessionError) -> bool {
        match (self, other) {
            (SessionError::Provider(a), SessionError::Provider(b)) => Arc::ptr_eq(a, b),
            (SessionError::ContextNotDetected(a), SessionError::ContextNotDetected(b)) => {
                Arc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl From<actions_client::Error> for SessionError {
    fn from(e: actions_client::Error) -> Self {
        SessionError::Provider(Arc::new(e))
    }
}

impl From<actions_git::Error> for SessionError {
    fn from(e: actions_git::Error) -> Self {
        SessionError::ContextNotDetected(Arc::new(e))
    }
}
