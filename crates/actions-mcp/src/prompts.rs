//! MCP prompts and the log analysis template

use std::borrow::Cow;

use actions_client::WorkflowRun;
use serde::Serialize;

/// Reply used instead of the template when the latest run has no logs
pub const NO_LOGS_MESSAGE: &str = "No logs found for the latest run.";

/// Prompt definition for MCP protocol
#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    pub name: String,
    pub description: String,
    pub arguments: Vec<serde_json::Value>,
}

/// Get all available prompt definitions
pub fn get_prompt_definitions() -> Vec<PromptDefinition> {
    vec![PromptDefinition {
        name: "summarize_logs".to_string(),
        description: "Summarize the latest GitHub Actions run for the current repository and \
                      suggest fixes for failures"
            .to_string(),
        arguments: Vec::new(),
    }]
}

/// Keep the last `max_chars` characters of `logs`, marking the cut.
pub fn clip_log_tail(logs: &str, max_chars: usize) -> Cow<'_, str> {
    let total = logs.chars().count();
    if total <= max_chars {
        return Cow::Borrowed(logs);
    }

    let skip = total - max_chars;
    let start = logs
        .char_indices()
        .nth(skip)
        .map(|(idx, _)| idx)
        .unwrap_or(logs.len());
    Cow::Owned(format!(
        "[... {skip} earlier characters omitted ...]\n{}",
        &logs[start..]
    ))
}

/// Render the analysis prompt for one run.
pub fn logs_analysis_prompt(run: &WorkflowRun, logs: &str) -> String {
    let mut header = format!("Workflow run ID: **{}**\n", run.id);
    if let Some(name) = run.name.as_deref() {
        header.push_str(&format!("Workflow: {name}\n"));
    }
    if let Some(branch) = run.head_branch.as_deref() {
        header.push_str(&format!("Branch: {branch}\n"));
    }
    let status = match (run.status.as_deref(), run.conclusion.as_deref()) {
        (Some(status), Some(conclusion)) => Some(format!("{status} ({conclusion})")),
        (Some(status), None) => Some(status.to_string()),
        (None, Some(conclusion)) => Some(conclusion.to_string()),
        (None, None) => None,
    };
    if let Some(status) = status {
        header.push_str(&format!("Reported status: {status}\n"));
    }
    if let Some(url) = run.html_url.as_deref() {
        header.push_str(&format!("Run page: {url}\n"));
    }

    format!(
        r#"You are an experienced CI/CD engineer reviewing a GitHub Actions workflow run.

{header}
Logs:
```
{logs}
```

Please provide:

1. A short structured summary of the run:
   - Overall result (success, failure, or warnings)
   - The main steps that ran
   - Steps that failed or emitted errors
   - Slow steps or other bottlenecks worth noting

2. For every failure, a technical diagnosis:
   - **What failed:** the failing step and the error it produced
   - **Likely cause:** e.g. a compile error, a missing dependency, a permissions problem
   - **Fix:** concrete changes to the code or workflow that resolve it
   - **Prevention:** how to keep it from coming back

Keep the answer in concise bullet points and base every statement on the logs above."#
    )
}
