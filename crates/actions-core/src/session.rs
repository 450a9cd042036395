//! Per-invocation session

use actions_client::{ActionsApi, LogBundle, Workflow, WorkflowRun, WorkflowSelector};
use actions_git::{ContextSource, RepoCoordinate};

use crate::{SessionError, SessionResult, Slot};

/// Sequencer and cache for one tool invocation.
///
/// Steps always run in dependency order (workflow, then latest run, then
/// logs) and each provider call happens at most once per session. A failed
/// step stays failed; asking again returns the same error without a new
/// request.
///
/// # Example
///
/// ```ignore
/// let mut session = Session::open(&client, &GitContext::new("."), WorkflowSelector::default())?;
/// let run = session.latest_run().await?;
/// let logs = session.logs().await?;
/// ```
pub struct Session<'a> {
    api: &'a dyn ActionsApi,
    coordinate: RepoCoordinate,
    selector: WorkflowSelector,
    workflow: Slot<Workflow>,
    run: Slot<WorkflowRun>,
    logs: Slot<LogBundle>,
}

impl<'a> Session<'a> {
    /// Start a session for an already resolved coordinate.
    pub fn new(
        api: &'a dyn ActionsApi,
        coordinate: RepoCoordinate,
        selector: WorkflowSelector,
    ) -> Self {
        Self {
            api,
            coordinate,
            selector,
            workflow: Slot::Unresolved,
            run: Slot::Unresolved,
            logs: Slot::Unresolved,
        }
    }

    /// Resolve the coordinate from `source` and start a session.
    ///
    /// Fails with [`SessionError::ContextNotDetected`] before any provider
    /// call when the coordinate cannot be derived.
    pub fn open(
        api: &'a dyn ActionsApi,
        source: &dyn ContextSource,
        selector: WorkflowSelector,
    ) -> SessionResult<Self> {
        let coordinate = source.resolve().map_err(SessionError::from)?;
        tracing::debug!(%coordinate, "Opened session");
        Ok(Self::new(api, coordinate, selector))
    }

    pub fn coordinate(&self) -> &RepoCoordinate {
        &self.coordinate
    }

    /// The workflow this session targets.
    pub async fn workflow(&mut self) -> SessionResult<Workflow> {
        if let Some(cached) = self.workflow.get() {
            tracing::debug!(coordinate = %self.coordinate, "Workflow served from session cache");
            return cached;
        }

        let outcome = self
            .api
            .resolve_workflow(
                self.coordinate.owner(),
                self.coordinate.repo(),
                &self.selector,
            )
            .await
            .map_err(SessionError::from);
        self.workflow.settle(outcome)
    }

    /// Most recent run of the workflow on the session's branch.
    pub async fn latest_run(&mut self) -> SessionResult<WorkflowRun> {
        if let Some(cached) = self.run.get() {
            tracing::debug!(coordinate = %self.coordinate, "Run served from session cache");
            return cached;
        }

        let workflow = self.workflow().await?;
        let outcome = self
            .api
            .resolve_latest_run(
                self.coordinate.owner(),
                self.coordinate.repo(),
                Some(self.coordinate.branch()),
                Some(workflow.id),
            )
            .await
            .map_err(SessionError::from);
        self.run.settle(outcome)
    }

    /// Logs of the latest run. Empty logs are a successful result.
    pub async fn logs(&mut self) -> SessionResult<LogBundle> {
        if let Some(cached) = self.logs.get() {
            tracing::debug!(coordinate = %self.coordinate, "Logs served from session cache");
            return cached;
        }

        let run = self.latest_run().await?;
        let outcome = self
            .api
            .fetch_logs(self.coordinate.owner(), self.coordinate.repo(), run.id)
            .await
            .map_err(SessionError::from);
        self.logs.settle(outcome)
    }

    pub fn workflow_slot(&self) -> &Slot<Workflow> {
        &self.workflow
    }

    pub fn run_slot(&self) -> &Slot<WorkflowRun> {
        &self.run
    }

    pub fn logs_slot(&self) -> &Slot<LogBundle> {
        &self.logs
    }
}
