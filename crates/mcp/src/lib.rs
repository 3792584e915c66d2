//! In-process MCP integration for the Claude Agent SDK.
//!
//! Implements the minimal JSON-RPC 2.0 responder the query engine serves on
//! behalf of the agent process: `initialize`, `tools/list`, `tools/call`,
//! and `notifications/initialized`.

pub mod manager;
pub mod schema;
pub mod server;

pub use manager::{McpServer, McpServerManager, ToolInfo};
pub use schema::ToolDefinition;
pub use server::SdkMcpServer;
