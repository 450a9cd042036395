//! MCP Tool Handlers
//!
//! The tool facade. Each handler opens a fresh session, drives it only as
//! deep as the tool needs, and flattens any failure into a single
//! `Error <action>: <cause>` message. Structured errors stop here.

use actions_core::{SessionError, SessionResult};
use serde_json::{Value, json};

use crate::context::ServerContext;
use crate::prompts::{NO_LOGS_MESSAGE, clip_log_tail, logs_analysis_prompt};
use crate::{Error, Result};

/// What a tool call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Structured provider data
    Json(Value),
    /// Plain text (logs, rendered prompt, informational message)
    Text(String),
    /// Flattened failure message
    Failure(String),
}

impl ToolOutput {
    pub fn is_failure(&self) -> bool {
        matches!(self, ToolOutput::Failure(_))
    }

    /// The text shown to the client.
    pub fn render(&self) -> Result<String> {
        match self {
            ToolOutput::Json(value) => Ok(serde_json::to_string_pretty(value)?),
            ToolOutput::Text(text) | ToolOutput::Failure(text) => Ok(text.clone()),
        }
    }
}

/// Handle a tool call by dispatching to the appropriate handler
///
/// Only an unknown tool name is an `Err`; tool failures come back as
/// [`ToolOutput::Failure`].
pub async fn handle_tool_call(
    ctx: &ServerContext,
    tool_name: &str,
    _arguments: Value,
) -> Result<ToolOutput> {
    let output = match tool_name {
        "trigger_workflow" => trigger_workflow(ctx).await,
        "get_logs" => get_logs(ctx).await,
        "rerun_workflow" => rerun_workflow(ctx).await,
        "summarize_logs" => summarize_logs(ctx).await,
        _ => return Err(Error::UnknownTool(tool_name.to_string())),
    };
    Ok(output)
}

/// Handle trigger_workflow - dispatch the workflow on the current branch
pub async fn trigger_workflow(ctx: &ServerContext) -> ToolOutput {
    flatten("triggering workflow", run_trigger(ctx).await, ToolOutput::Json)
}

/// Handle get_logs - logs of the latest run
pub async fn get_logs(ctx: &ServerContext) -> ToolOutput {
    flatten("getting logs", run_get_logs(ctx).await, ToolOutput::Text)
}

/// Handle rerun_workflow - re-run the latest run
pub async fn rerun_workflow(ctx: &ServerContext) -> ToolOutput {
    flatten("re-running workflow", run_rerun(ctx).await, ToolOutput::Json)
}

/// Handle summarize_logs - analysis prompt for the latest run
pub async fn summarize_logs(ctx: &ServerContext) -> ToolOutput {
    flatten("summarizing logs", render_summary(ctx).await, ToolOutput::Text)
}

/// Text of the `summarize_logs` analysis, or the no-logs message.
pub async fn render_summary(ctx: &ServerContext) -> SessionResult<String> {
    let mut session = ctx.open_session()?;
    let run = session.latest_run().await?;
    let logs = session.logs().await?;

    if logs.is_empty() {
        return Ok(NO_LOGS_MESSAGE.to_string());
    }

    let text = logs.text();
    let clipped = clip_log_tail(&text, ctx.max_log_chars());
    Ok(logs_analysis_prompt(&run, &clipped))
}

async fn run_trigger(ctx: &ServerContext) -> SessionResult<Value> {
    let mut session = ctx.open_session()?;
    let workflow = session.workflow().await?;
    let coordinate = session.coordinate();

    let ack = ctx
        .api()
        .trigger_run(
            coordinate.owner(),
            coordinate.repo(),
            workflow.id,
            coordinate.branch(),
        )
        .await?;

    Ok(json!({
        "status": "dispatched",
        "repository": format!("{}/{}", coordinate.owner(), coordinate.repo()),
        "workflow_id": workflow.id,
        "workflow": workflow.name,
        "ref": coordinate.branch(),
        "http_status": ack.status,
        "response": ack.body,
    }))
}

async fn run_get_logs(ctx: &ServerContext) -> SessionResult<String> {
    let mut session = ctx.open_session()?;
    let logs = session.logs().await?;

    if logs.is_empty() {
        return Ok(NO_LOGS_MESSAGE.to_string());
    }
    Ok(logs.text().into_owned())
}

async fn run_rerun(ctx: &ServerContext) -> SessionResult<Value> {
    let mut session = ctx.open_session()?;
    let run = session.latest_run().await?;
    let coordinate = session.coordinate();

    let ack = ctx
        .api()
        .rerun_run(coordinate.owner(), coordinate.repo(), run.id)
        .await?;

    Ok(json!({
        "status": "rerun requested",
        "repository": format!("{}/{}", coordinate.owner(), coordinate.repo()),
        "run_id": run.id,
        "previous_status": run.status,
        "previous_conclusion": run.conclusion,
        "http_status": ack.status,
        "response": ack.body,
    }))
}

fn flatten<T>(
    action: &str,
    outcome: SessionResult<T>,
    success: impl FnOnce(T) -> ToolOutput,
) -> ToolOutput {
    match outcome {
        Ok(value) => success(value),
        Err(e) => {
            log_failure(action, &e);
            ToolOutput::Failure(format!("Error {action}: {e}"))
        }
    }
}

fn log_failure(action: &str, error: &SessionError) {
    match error {
        SessionError::ContextNotDetected(cause) => {
            tracing::warn!(action, cause = %cause, "Git context not detected");
        }
        SessionError::Provider(cause) => {
            tracing::warn!(action, status = ?cause.status(), error = %cause, "Provider call failed");
        }
    }
}
