//! Error types for actions-git

/// Result type for actions-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while detecting the git context
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Remote '{name}' is not configured")]
    RemoteNotFound { name: String },

    #[error("Remote '{name}' has no usable URL")]
    RemoteUrlMissing { name: String },

    #[error("Remote URL '{url}' does not point at {host}")]
    UnrecognizedRemote { url: String, host: String },

    #[error("HEAD is detached; no branch is checked out")]
    DetachedHead,

    #[error("HEAD has no commits yet")]
    UnbornHead,

    #[error("Invalid coordinate: {field} is empty")]
    EmptyField { field: &'static str },

    #[error("Invalid host pattern: {0}")]
    Pattern(#[from] regex::Error),
}
