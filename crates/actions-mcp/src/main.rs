//! GitHub Actions MCP Server
//!
//! A Model Context Protocol server that lets agentic IDEs trigger, inspect
//! and re-run the GitHub Actions workflow of the repository it is started in.
//!
//! # Usage
//!
//! ```bash
//! actions-mcp [--root <path>] [--workflow-name <name>]
//! ```
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN`: Bearer token for the REST API
//! - `GITHUB_API_URL`: API base, for GitHub Enterprise
//! - `GITHUB_HOST`: Host that git remotes must point at
//! - `RUST_LOG`: Control log verbosity (default: `actions_mcp=info`)
//!
//! A `.env` file in the working directory is loaded first.
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use actions_mcp::{ActionsMcpServer, Args};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("actions_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.has_token() {
        tracing::warn!("GITHUB_TOKEN is not set; requests will be anonymous and writes will fail");
    }

    tracing::info!(root = ?args.root, api_base = %args.api_base, "Starting actions-mcp server");

    let context = args.build_context()?;
    let mut server = ActionsMcpServer::new(context);
    server.run().await?;

    Ok(())
}
