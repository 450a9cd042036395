//! Shared configuration handed to every tool invocation

use std::sync::Arc;

use actions_client::{ActionsApi, WorkflowSelector};
use actions_core::{Session, SessionResult};
use actions_git::ContextSource;

/// Default cap on log characters embedded in the analysis prompt
pub const DEFAULT_MAX_LOG_CHARS: usize = 60_000;

/// Read-only state shared by all tool calls.
///
/// Holds the provider client and the context source; every tool call opens
/// its own [`Session`] from it, so calls never share cached results.
#[derive(Clone)]
pub struct ServerContext {
    api: Arc<dyn ActionsApi>,
    source: Arc<dyn ContextSource>,
    selector: WorkflowSelector,
    max_log_chars: usize,
}

impl ServerContext {
    pub fn new(api: Arc<dyn ActionsApi>, source: Arc<dyn ContextSource>) -> Self {
        Self {
            api,
            source,
            selector: WorkflowSelector::default(),
            max_log_chars: DEFAULT_MAX_LOG_CHARS,
        }
    }

    /// Prefer a workflow by name and/or path.
    pub fn with_selector(mut self, selector: WorkflowSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_max_log_chars(mut self, max_log_chars: usize) -> Self {
        self.max_log_chars = max_log_chars;
        self
    }

    pub fn api(&self) -> &dyn ActionsApi {
        self.api.as_ref()
    }

    pub fn selector(&self) -> &WorkflowSelector {
        &self.selector
    }

    pub fn max_log_chars(&self) -> usize {
        self.max_log_chars
    }

    /// Detect the git context and start a fresh session.
    pub fn open_session(&self) -> SessionResult<Session<'_>> {
        Session::open(self.api.as_ref(), self.source.as_ref(), self.selector.clone())
    }
}
