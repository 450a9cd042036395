//! GitHub Actions REST client
//!
//! A stateless async facade over the GitHub Actions API. The client owns the
//! base endpoint, auth header and request timeout; every operation takes
//! already-resolved identifiers and returns provider data or a typed error.
//!
//! # Operations
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | `resolve_workflow` | `GET /repos/{owner}/{repo}/actions/workflows` |
//! | `resolve_latest_run` | `GET /repos/{owner}/{repo}/actions/[workflows/{id}/]runs` |
//! | `fetch_logs` | `GET /repos/{owner}/{repo}/actions/runs/{id}/logs` |
//! | `trigger_run` | `POST /repos/{owner}/{repo}/actions/workflows/{id}/dispatches` |
//! | `rerun_run` | `POST /repos/{owner}/{repo}/actions/runs/{id}/rerun` |

pub mod api;
pub mod config;
pub mod error;
pub mod github;
pub mod models;

pub use api::ActionsApi;
pub use config::{ClientConfig, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use github::GithubClient;
pub use models::{
    Acknowledgement, LogBundle, Workflow, WorkflowRun, WorkflowSelector, select_workflow,
};
