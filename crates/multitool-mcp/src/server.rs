//! MCP Server implementation
//!
//! Reads newline-delimited JSON-RPC messages, dispatches them and writes
//! one response line per request. Notifications get no response.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::registry::ToolRegistry;
use crate::tools::ToolResult;
use crate::{Error, Result};

pub const SERVER_NAME: &str = "multitool";

/// MCP Server over a fixed tool registry
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use multitool_mcp::{McpServer, ServerConfig, builtin_registry};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ServerConfig::default();
///     let registry = builtin_registry(config.transcript_source(), config.git_cli())?;
///     McpServer::new(Arc::new(registry)).run().await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        tracing::info!(tools = self.registry.len(), "MCP server ready, listening on stdio");
        self.serve(stdin, stdout).await
    }

    /// Serve line-delimited messages from `reader` until end of input.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    tracing::warn!(error = %e, "Message is not valid UTF-8");
                    let response = respond(JsonRpcResponse::error(
                        None,
                        PARSE_ERROR,
                        format!("Parse error: {e}"),
                    ))?;
                    write_line(&mut writer, &response).await?;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(line).await {
                Ok(response) => response,
                Err(e) => serde_json::to_string(&JsonRpcResponse::error(
                    None,
                    INTERNAL_ERROR,
                    format!("Internal error: {e}"),
                ))?,
            };
            if response.is_empty() {
                continue;
            }
            write_line(&mut writer, &response).await?;
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single message.
    ///
    /// Returns the serialized response, or an empty string for notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                return respond(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(request) => request,
            Err(e) => {
                let id = value.get("id").cloned();
                return respond(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ));
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification");
            return Ok(String::new());
        }

        let id = request.id;
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id)?,
            "tools/call" => self.handle_tools_call(id, request.params).await?,
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        respond(response)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let params: InitializeParams = match params {
            Value::Null => InitializeParams::default(),
            other => match serde_json::from_value(other) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        format!("Invalid params: {e}"),
                    );
                }
            },
        };

        tracing::info!(
            client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
            protocol = params.protocol_version.as_deref().unwrap_or("unspecified"),
            "Client initialized"
        );

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }

    fn handle_tools_list(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let tools = serde_json::to_value(self.registry.list())?;
        Ok(JsonRpcResponse::success(id, json!({ "tools": tools })))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                ));
            }
        };

        let result = self.call_tool(&params.name, params.arguments).await;
        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Run a tool; every failure becomes an error result.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult {
        let handler = match self.registry.resolve(name) {
            Ok(handler) => handler,
            Err(e) => {
                tracing::warn!(tool = %name, "Unknown tool requested");
                return ToolResult::error(e.to_string());
            }
        };

        match handler.call(arguments).await {
            Ok(result) => {
                tracing::info!(tool = %name, size = result.text_chars(), "Tool call completed");
                result
            }
            Err(e) => {
                tracing::error!(tool = %name, error = %e, "Tool call failed");
                ToolResult::error(format!("{name} failed: {e}"))
            }
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, response: &str) -> Result<()> {
    writer.write_all(response.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

fn respond(response: JsonRpcResponse) -> Result<String> {
    serde_json::to_string(&response).map_err(Error::from)
}
