//! Command line and environment configuration

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actions_client::{ClientConfig, DEFAULT_API_BASE, GithubClient, WorkflowSelector};
use actions_git::{DEFAULT_HOST, GitContext, RemotePattern};
use clap::Parser;

use crate::Result;
use crate::context::{DEFAULT_MAX_LOG_CHARS, ServerContext};

/// MCP server for GitHub Actions
#[derive(Debug, Clone, Parser)]
#[command(name = "actions-mcp")]
#[command(about = "MCP server exposing GitHub Actions for the current repository")]
#[command(version)]
pub struct Args {
    /// Directory inside the repository to inspect
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// GitHub token used as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Host that remotes must point at
    #[arg(long, env = "GITHUB_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Remote that identifies the repository
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Prefer the workflow with this display name
    #[arg(long)]
    pub workflow_name: Option<String>,

    /// Prefer the workflow defined at this path
    #[arg(long)]
    pub workflow_path: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Log characters embedded in the analysis prompt
    #[arg(long, default_value_t = DEFAULT_MAX_LOG_CHARS)]
    pub max_log_chars: usize,
}

impl Args {
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_base.trim_end_matches('/'))
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.token {
            Some(token) => config.with_token(token.as_str()),
            None => config,
        }
    }

    pub fn selector(&self) -> WorkflowSelector {
        WorkflowSelector {
            name: self.workflow_name.clone(),
            path: self.workflow_path.clone(),
        }
    }

    /// Build the shared tool context: HTTP client, git context source and
    /// workflow preference.
    pub fn build_context(&self) -> Result<ServerContext> {
        let client = GithubClient::new(self.client_config())?;
        let source = GitContext::new(&self.root)
            .with_remote(&self.remote)
            .with_pattern(RemotePattern::new(&self.host)?);

        Ok(ServerContext::new(Arc::new(client), Arc::new(source))
            .with_selector(self.selector())
            .with_max_log_chars(self.max_log_chars))
    }
}
