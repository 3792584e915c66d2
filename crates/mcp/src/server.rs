//! SDK-hosted MCP server: an in-process tool table speaking the JSON-RPC
//! subset the query engine's `mcp_message` dispatch needs (spec §4.6).

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use serde_json::Value;

use crate::manager::{McpServer, ToolInfo};
use claude_agent_types::ClaudeAgentError;

const METHOD_NOT_FOUND: i64 = -32601;
const INTERNAL_ERROR: i64 = -32603;
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Type alias for an async tool handler. The returned value is the tool's
/// `MCPToolResult` shape: `{content: [...], is_error?: bool}`.
pub type ToolHandler = Box<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = Result<Value, ClaudeAgentError>> + Send>>
        + Send
        + Sync,
>;

/// An in-process MCP server built from SDK-registered tools.
pub struct SdkMcpServer {
    name: String,
    version: String,
    tools: HashMap<String, (ToolInfo, ToolHandler)>,
}

impl SdkMcpServer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), version: "1.0.0".to_string(), tools: HashMap::new() }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn register_tool<F, Fut>(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        input_schema: Value,
        handler: F,
    ) where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ClaudeAgentError>> + Send + 'static,
    {
        let name = name.into();
        let info = ToolInfo { name: name.clone(), description, input_schema };
        let boxed_handler: ToolHandler =
            Box::new(move |args| Box::pin(handler(args)) as Pin<Box<dyn Future<Output = _> + Send>>);
        self.tools.insert(name, (info, boxed_handler));
    }
}

#[async_trait]
impl McpServer for SdkMcpServer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_tools(&self) -> Result<Vec<ToolInfo>, ClaudeAgentError> {
        Ok(self.tools.values().map(|(info, _)| info.clone()).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ClaudeAgentError> {
        match self.tools.get(name) {
            Some((_, handler)) => handler(arguments).await,
            None => Err(ClaudeAgentError::NotFound(format!("tool: {}", name))),
        }
    }

    async fn handle_client_message(&self, message: Value) -> Result<Value, ClaudeAgentError> {
        let id = message.get("id").cloned();
        let method = message.get("method").and_then(|m| m.as_str());

        match method {
            Some("initialize") => Ok(success(
                id,
                serde_json::json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {"tools": {}},
                    "serverInfo": {"name": self.name, "version": self.version},
                }),
            )),
            Some("notifications/initialized") => Ok(success(id, serde_json::json!({}))),
            Some("tools/list") => {
                let tools = self.list_tools().await?;
                Ok(success(id, serde_json::json!({ "tools": tools })))
            }
            Some("tools/call") => {
                let params = message.get("params");
                let tool_name = params.and_then(|p| p.get("name")).and_then(|n| n.as_str());
                let Some(tool_name) = tool_name else {
                    return Ok(error(id, METHOD_NOT_FOUND, "missing tool name"));
                };
                if !self.tools.contains_key(tool_name) {
                    return Ok(error(id, METHOD_NOT_FOUND, "tool not found"));
                }
                let arguments =
                    params.and_then(|p| p.get("arguments")).cloned().unwrap_or(serde_json::json!({}));
                match self.call_tool(tool_name, arguments).await {
                    Ok(result) => Ok(success(id, result)),
                    Err(e) => Ok(error(id, INTERNAL_ERROR, &e.to_string())),
                }
            }
            _ => Ok(error(id, METHOD_NOT_FOUND, "method not found")),
        }
    }
}

fn success(id: Option<Value>, result: Value) -> Value {
    serde_json::json!({"jsonrpc": "2.0", "id": id, "result": result})
}

fn error(id: Option<Value>, code: i64, message: &str) -> Value {
    serde_json::json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
}
