//! Provider operations trait

use async_trait::async_trait;

use crate::Result;
use crate::models::{Acknowledgement, LogBundle, Workflow, WorkflowRun, WorkflowSelector};

/// The five provider operations a session drives.
///
/// Implementations hold only read-only configuration, so one instance is
/// shared by every concurrent session.
#[async_trait]
pub trait ActionsApi: Send + Sync {
    /// List the repository's workflows and pick one with [`crate::select_workflow`].
    ///
    /// Fails with [`crate::Error::NoWorkflows`] when the list is empty.
    async fn resolve_workflow(
        &self,
        owner: &str,
        repo: &str,
        selector: &WorkflowSelector,
    ) -> Result<Workflow>;

    /// Most recent run, filtered by branch and/or workflow.
    ///
    /// Fails with [`crate::Error::NoRuns`] when nothing matches.
    async fn resolve_latest_run(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
        workflow_id: Option<u64>,
    ) -> Result<WorkflowRun>;

    /// Raw logs of a run. An empty payload is a valid result.
    async fn fetch_logs(&self, owner: &str, repo: &str, run_id: u64) -> Result<LogBundle>;

    /// Dispatch a new run of `workflow_id` on `branch`.
    async fn trigger_run(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: u64,
        branch: &str,
    ) -> Result<Acknowledgement>;

    /// Re-queue a finished run.
    async fn rerun_run(&self, owner: &str, repo: &str, run_id: u64) -> Result<Acknowledgement>;
}
