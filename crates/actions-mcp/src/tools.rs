//! MCP Tool definitions
//!
//! Every tool takes no arguments: owner, repository and branch are detected
//! from the working copy, and the workflow is chosen by the server's
//! configured selector.
//!
//! | Tool | Depth reached |
//! |------|---------------|
//! | `trigger_workflow` | coordinate -> workflow -> dispatch |
//! | `get_logs` | coordinate -> workflow -> latest run -> logs |
//! | `rerun_workflow` | coordinate -> workflow -> latest run -> rerun |
//! | `summarize_logs` | coordinate -> workflow -> latest run -> logs -> prompt |

use serde::{Deserialize, Serialize};

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}

fn no_arguments() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {}
    })
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "trigger_workflow".to_string(),
            description: "Dispatch the repository's workflow on the current branch".to_string(),
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "get_logs".to_string(),
            description: "Get the logs of the latest workflow run on the current branch"
                .to_string(),
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "rerun_workflow".to_string(),
            description: "Re-run the latest workflow run on the current branch".to_string(),
            input_schema: no_arguments(),
        },
        ToolDefinition {
            name: "summarize_logs".to_string(),
            description: "Build an analysis prompt from the latest workflow run's logs"
                .to_string(),
            input_schema: no_arguments(),
        },
    ]
}
