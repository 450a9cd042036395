//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
///
/// Failures of the tools themselves never appear here: the facade turns
/// them into tool error messages.
#[derive(Debug, Error)]
pub enum Error {
    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed request parameters
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Unknown tool requested
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Unknown prompt requested
    #[error("unknown prompt: {0}")]
    UnknownPrompt(String),

    /// Provider client could not be built from configuration
    #[error("client configuration error: {0}")]
    Client(#[from] actions_client::Error),

    /// Git context configuration is invalid
    #[error("git configuration error: {0}")]
    Git(#[from] actions_git::Error),
}
