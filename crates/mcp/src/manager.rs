//! Registry of in-process MCP servers (spec §3 "MCP server table").
//!
//! The table maps `server_name -> { name, tools[] }` and is read by the
//! query engine's `mcp_message` dispatch worker (spec §4.6). Registration
//! happens before the query is started; after that the table is only read,
//! so `McpServerManager` is a cheap `Clone` handle over a shared map.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use claude_agent_types::ClaudeAgentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Information about an MCP tool, shaped for `tools/list` responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Trait for MCP server implementations hosted in-process by the SDK.
#[async_trait::async_trait]
pub trait McpServer: Send + Sync {
    /// Unique identifier used to register and address this server.
    fn name(&self) -> &str;

    /// List available tools with their schemas.
    async fn list_tools(&self) -> Result<Vec<ToolInfo>, ClaudeAgentError>;

    /// Invoke a tool by name with the given arguments.
    async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ClaudeAgentError>;

    /// Handle one JSON-RPC 2.0 request/notification addressed to this
    /// server (spec §4.6). Returns the JSON-RPC response object, already
    /// wrapped appropriately for notifications with no `id`.
    async fn handle_client_message(
        &self,
        message: Value,
    ) -> Result<serde_json::Value, ClaudeAgentError>;
}

/// Registry of in-process MCP servers, keyed by server name.
#[derive(Clone)]
pub struct McpServerManager {
    servers: Arc<RwLock<HashMap<String, Arc<dyn McpServer>>>>,
}

impl McpServerManager {
    pub fn new() -> Self {
        Self { servers: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Register a server, replacing any prior registration under the same name.
    pub async fn register(&self, server: Box<dyn McpServer>) {
        let name = server.name().to_string();
        self.servers.write().await.insert(name, Arc::from(server));
    }

    /// Look up a server by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn McpServer>> {
        self.servers.read().await.get(name).cloned()
    }

    /// List the names of all registered servers.
    pub async fn list_servers(&self) -> Vec<String> {
        self.servers.read().await.keys().cloned().collect()
    }

    /// True if no servers are registered.
    pub async fn is_empty(&self) -> bool {
        self.servers.read().await.is_empty()
    }

    /// List all tools across all registered servers, paired with the name
    /// of the server that owns each one.
    pub async fn list_all_tools(&self) -> Result<Vec<(String, ToolInfo)>, ClaudeAgentError> {
        // Snapshot so we don't hold the map lock across each server's own await.
        let servers: Vec<(String, Arc<dyn McpServer>)> = {
            let guard = self.servers.read().await;
            guard.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        };

        let mut all_tools = Vec::new();
        for (server_name, server) in servers {
            let tools = server.list_tools().await?;
            for tool in tools {
                all_tools.push((server_name.clone(), tool));
            }
        }
        Ok(all_tools)
    }
}

impl Default for McpServerManager {
    fn default() -> Self {
        Self::new()
    }
}
