//! In-memory [`ActionsApi`] that records every call.
//!
//! Realism level: **FAKE**: no HTTP, selection rules and empty-list errors
//! mirror the real client.

use std::sync::Mutex;

use actions_client::{
    Acknowledgement, ActionsApi, Error, LogBundle, Result, Workflow, WorkflowRun,
    WorkflowSelector, select_workflow,
};
use async_trait::async_trait;

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ResolveWorkflow {
        owner: String,
        repo: String,
    },
    ResolveLatestRun {
        branch: Option<String>,
        workflow_id: Option<u64>,
    },
    FetchLogs {
        run_id: u64,
    },
    TriggerRun {
        workflow_id: u64,
        branch: String,
    },
    RerunRun {
        run_id: u64,
    },
}

/// Configurable fake provider.
///
/// # Example
///
/// ```rust,no_run
/// use actions_test_utils::fake::FakeActionsApi;
///
/// let api = FakeActionsApi::new()
///     .with_workflow(1, "CI", ".github/workflows/ci.yml")
///     .with_run(500, "completed")
///     .with_logs("step1 ok");
/// assert_eq!(api.call_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct FakeActionsApi {
    workflows: Vec<Workflow>,
    runs: Vec<WorkflowRun>,
    logs: LogBundle,
    logs_status: Option<u16>,
    workflows_status: Option<u16>,
    calls: Mutex<Vec<ApiCall>>,
}

impl FakeActionsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workflow(mut self, id: u64, name: &str, path: &str) -> Self {
        self.workflows.push(Workflow {
            id,
            name: name.to_string(),
            path: path.to_string(),
            state: Some("active".to_string()),
        });
        self
    }

    /// Append a run; the first appended run is the latest.
    pub fn with_run(mut self, id: u64, status: &str) -> Self {
        self.runs.push(WorkflowRun {
            id,
            name: Some("CI".to_string()),
            status: Some(status.to_string()),
            conclusion: (status == "completed").then(|| "success".to_string()),
            head_branch: Some("main".to_string()),
            head_sha: None,
            event: Some("push".to_string()),
            run_number: Some(id % 1000),
            workflow_id: None,
            html_url: None,
            created_at: None,
            updated_at: None,
        });
        self
    }

    pub fn with_logs(mut self, text: &str) -> Self {
        self.logs = LogBundle::new(text.to_string(), Some("text/plain".to_string()));
        self
    }

    /// Make `fetch_logs` fail with an HTTP status.
    pub fn failing_logs(mut self, status: u16) -> Self {
        self.logs_status = Some(status);
        self
    }

    /// Make `resolve_workflow` fail with an HTTP status.
    pub fn failing_workflows(mut self, status: u16) -> Self {
        self.workflows_status = Some(status);
        self
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of recorded calls for which `pred` holds.
    pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.lock().iter().filter(|call| pred(call)).count()
    }

    fn record(&self, call: ApiCall) {
        self.lock().push(call);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ApiCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn status_error(operation: &'static str, status: u16) -> Error {
    Error::Status {
        operation,
        status,
        body: "fake failure".to_string(),
    }
}

#[async_trait]
impl ActionsApi for FakeActionsApi {
    async fn resolve_workflow(
        &self,
        owner: &str,
        repo: &str,
        selector: &WorkflowSelector,
    ) -> Result<Workflow> {
        self.record(ApiCall::ResolveWorkflow {
            owner: owner.to_string(),
            repo: repo.to_string(),
        });
        if let Some(status) = self.workflows_status {
            return Err(status_error("list workflows", status));
        }
        select_workflow(&self.workflows, selector)
            .cloned()
            .ok_or_else(|| Error::NoWorkflows {
                owner: owner.to_string(),
                repo: repo.to_string(),
            })
    }

    async fn resolve_latest_run(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
        workflow_id: Option<u64>,
    ) -> Result<WorkflowRun> {
        self.record(ApiCall::ResolveLatestRun {
            branch: branch.map(str::to_string),
            workflow_id,
        });
        self.runs.first().cloned().ok_or_else(|| Error::NoRuns {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.map(str::to_string),
        })
    }

    async fn fetch_logs(&self, _owner: &str, _repo: &str, run_id: u64) -> Result<LogBundle> {
        self.record(ApiCall::FetchLogs { run_id });
        match self.logs_status {
            Some(status) => Err(status_error("download run logs", status)),
            None => Ok(self.logs.clone()),
        }
    }

    async fn trigger_run(
        &self,
        _owner: &str,
        _repo: &str,
        workflow_id: u64,
        branch: &str,
    ) -> Result<Acknowledgement> {
        self.record(ApiCall::TriggerRun {
            workflow_id,
            branch: branch.to_string(),
        });
        Ok(Acknowledgement {
            status: 204,
            body: None,
        })
    }

    async fn rerun_run(&self, _owner: &str, _repo: &str, run_id: u64) -> Result<Acknowledgement> {
        self.record(ApiCall::RerunRun { run_id });
        Ok(Acknowledgement {
            status: 201,
            body: None,
        })
    }
}
