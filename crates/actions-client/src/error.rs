//! Error types for actions-client

/// Result type for actions-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by provider calls
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, TLS, timeout or body read failure
    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-2xx status
    #[error("{operation} failed with HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// A 2xx body could not be decoded
    #[error("{operation} returned an unexpected payload: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No workflows found in {owner}/{repo}")]
    NoWorkflows { owner: String, repo: String },

    #[error("No runs found for {owner}/{repo} on branch {}", .branch.as_deref().unwrap_or("any"))]
    NoRuns {
        owner: String,
        repo: String,
        branch: Option<String>,
    },

    #[error("invalid GitHub token: contains characters not allowed in a header")]
    InvalidToken,

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// HTTP status of the failed call, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
