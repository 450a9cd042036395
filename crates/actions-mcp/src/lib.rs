//! MCP Server for GitHub Actions
//!
//! This crate exposes GitHub Actions operations for the repository the
//! server runs in via the Model Context Protocol (MCP). All context is
//! auto-detected: the owner and repository come from the git remote, the
//! branch from `HEAD`.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (IDE / agent) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ actions-mcp (tool facade) ]
//!        | one Session per tool call
//!        v
//! [ actions-core (Session) ] --> [ actions-git (coordinate) ]
//!        |
//!        v
//! [ actions-client (GitHub REST) ]
//! ```
//!
//! # Tools
//!
//! - `trigger_workflow` - Dispatch the repository's workflow on the current branch
//! - `get_logs` - Logs of the latest run on the current branch
//! - `rerun_workflow` - Re-run the latest run
//! - `summarize_logs` - Analysis prompt built from the latest run's logs
//!
//! # Prompts
//!
//! - `summarize_logs` - Same analysis text, served as an MCP prompt

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod prompts;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::Args;
pub use context::ServerContext;
pub use error::{Error, Result};
pub use handlers::{ToolOutput, handle_tool_call};
pub use server::ActionsMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolResult, get_tool_definitions};
