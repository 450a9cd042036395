//! MCP Server implementation
//!
//! The main server struct that coordinates MCP protocol handling with the
//! GitHub Actions tool facade.

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::context::ServerContext;
use crate::handlers::{ToolOutput, handle_tool_call, render_summary};
use crate::prompts::{PromptDefinition, get_prompt_definitions};
use crate::protocol::{
    GetPromptParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION,
    PromptsCapability, ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, codes,
};
use crate::tools::{ToolDefinition, ToolResult, get_tool_definitions};
use crate::{Error, Result};

/// MCP Server for GitHub Actions
///
/// Each `tools/call` opens its own session from the shared
/// [`ServerContext`], so concurrent or repeated calls never share cached
/// provider results.
///
/// # Example
///
/// ```ignore
/// use actions_mcp::{ActionsMcpServer, Args};
/// use clap::Parser;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let context = Args::parse().build_context()?;
///     let mut server = ActionsMcpServer::new(context);
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct ActionsMcpServer {
    context: ServerContext,

    /// Whether the server has been initialized
    initialized: bool,

    /// Available MCP tools
    tools: Vec<ToolDefinition>,

    /// Available MCP prompts
    prompts: Vec<PromptDefinition>,
}

impl ActionsMcpServer {
    /// Create a new MCP server instance
    pub fn new(context: ServerContext) -> Self {
        Self {
            context,
            initialized: false,
            tools: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// Initialize the server
    ///
    /// Loads tool and prompt definitions. Git context is not checked here;
    /// it is detected per call so the server can start anywhere.
    pub async fn initialize(&mut self) -> Result<()> {
        tracing::info!("Initializing MCP server");

        self.tools = get_tool_definitions();
        self.prompts = get_prompt_definitions();

        self.initialized = true;
        Ok(())
    }

    /// Run the MCP server on stdin/stdout
    pub async fn run(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Process newline-delimited JSON-RPC messages until `reader` closes.
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.initialize().await?;
        tracing::info!("MCP server ready, listening on stdio");

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(line).await {
                Ok(response) => response,
                Err(e) => {
                    let error_response = JsonRpcResponse::error(
                        None,
                        codes::INTERNAL_ERROR,
                        format!("Internal error: {}", e),
                    );
                    serde_json::to_string(&error_response)?
                }
            };

            // Notifications produce no response
            if !response.is_empty() {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string for
    /// notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                let response =
                    JsonRpcResponse::error(None, codes::PARSE_ERROR, format!("Parse error: {e}"));
                return Ok(serde_json::to_string(&response)?);
            }
        };

        if request.jsonrpc != "2.0" {
            let response = JsonRpcResponse::error(
                request.id,
                codes::INVALID_REQUEST,
                "Invalid Request: jsonrpc must be \"2.0\"".to_string(),
            );
            return Ok(serde_json::to_string(&response)?);
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id)?,
            "initialized" | "notifications/initialized" => return Ok(String::new()),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            "prompts/list" => self.handle_prompts_list(request.id),
            "prompts/get" => self.handle_prompts_get(request.id, request.params).await?,
            method if request.id.is_none() && method.starts_with("notifications/") => {
                return Ok(String::new());
            }
            _ => JsonRpcResponse::error(
                request.id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Handle the initialize request
    fn handle_initialize(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                prompts: Some(PromptsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "actions-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": &self.tools }))
    }

    /// Handle tools/call request
    ///
    /// Tool failures are successful responses carrying `isError: true`.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                let err = Error::InvalidParams(e.to_string());
                return Ok(JsonRpcResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    err.to_string(),
                ));
            }
        };

        tracing::info!(tool = %tool_params.name, "Tool call");

        let tool_result =
            match handle_tool_call(&self.context, &tool_params.name, tool_params.arguments).await {
                Ok(output @ ToolOutput::Failure(_)) => ToolResult::error(output.render()?),
                Ok(output) => ToolResult::text(output.render()?),
                Err(e) => ToolResult::error(e.to_string()),
            };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(tool_result)?))
    }

    /// Handle prompts/list request
    fn handle_prompts_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "prompts": &self.prompts }))
    }

    /// Handle prompts/get request
    ///
    /// Failures are rendered into the prompt text rather than returned as
    /// JSON-RPC errors.
    async fn handle_prompts_get(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let prompt_params: GetPromptParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                let err = Error::InvalidParams(e.to_string());
                return Ok(JsonRpcResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    err.to_string(),
                ));
            }
        };

        let Some(definition) = self
            .prompts
            .iter()
            .find(|p| p.name == prompt_params.name)
        else {
            let err = Error::UnknownPrompt(prompt_params.name);
            return Ok(JsonRpcResponse::error(
                id,
                codes::INVALID_PARAMS,
                err.to_string(),
            ));
        };

        let text = match render_summary(&self.context).await {
            Ok(text) => text,
            Err(e) => format!("Error summarizing logs: {e}"),
        };

        Ok(JsonRpcResponse::success(
            id,
            json!({
                "description": definition.description,
                "messages": [{
                    "role": "user",
                    "content": { "type": "text", "text": text }
                }]
            }),
        ))
    }

    /// Shared tool context
    pub fn context(&self) -> &ServerContext {
        &self.context
    }

    /// Check if the server is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get available tools
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Get available prompts
    pub fn prompts(&self) -> &[PromptDefinition] {
        &self.prompts
    }
}
