//! Interactive client for bidirectional conversations.

use futures::stream::BoxStream;

use claude_agent_core::{ClaudeAgent, ControlResponse};
use claude_agent_types::hooks::HookEvent;
use claude_agent_types::{ClaudeAgentError, ClaudeAgentOptions, Message};

/// Client for bidirectional, interactive conversations with the agent CLI.
///
/// Provides full control over the conversation flow: interrupts, permission
/// mode and model changes, file rewinding, and registration of hooks,
/// `can_use_tool` callbacks, and in-process MCP servers (register before
/// `connect`; callback ids and server tables are fixed at the initialize
/// handshake).
///
/// # Example
///
/// ```rust,no_run
/// use claude_agent_api::ClaudeAgentClient;
/// use claude_agent_types::ClaudeAgentOptions;
/// use futures::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = ClaudeAgentClient::new(None);
///     client.connect().await.unwrap();
///
///     let mut stream = client.query("Hello, Claude!").await.unwrap();
///     while let Some(result) = stream.next().await {
///         println!("{:?}", result);
///     }
///
///     client.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct ClaudeAgentClient {
    agent: ClaudeAgent,
}

impl ClaudeAgentClient {
    /// Create a new client.
    pub fn new(options: Option<ClaudeAgentOptions>) -> Self {
        let opts = options.unwrap_or_default();
        Self { agent: ClaudeAgent::new(opts) }
    }

    /// Set the transport implementation.
    ///
    /// Useful for testing with mock transports or using custom transport implementations.
    pub fn set_transport(&mut self, transport: Box<dyn claude_agent_transport::Transport>) {
        self.agent.set_transport(transport);
    }

    /// Register a hook callback for `event`, optionally restricted to tool
    /// names matching `matcher`. Must be called before `connect`.
    pub async fn register_hook(
        &self,
        event: HookEvent,
        matcher: Option<String>,
        timeout: Option<f64>,
        callback: claude_agent_core::HookCallback,
    ) {
        self.agent.register_hook(event, matcher, timeout, callback).await;
    }

    /// Set the `can_use_tool` permission callback. Must be called before
    /// `connect`.
    pub async fn set_permission_callback(&self, callback: claude_agent_core::PermissionCallback) {
        self.agent.set_permission_callback(callback).await;
    }

    /// Register an in-process MCP server. Must be called before `connect`.
    pub async fn register_mcp_server(&self, server: Box<dyn claude_agent_mcp::McpServer>) {
        self.agent.register_mcp_server(server).await;
    }

    /// Connect to the agent CLI and run the initialize handshake.
    pub async fn connect(&mut self) -> Result<(), ClaudeAgentError> {
        self.agent.connect(None).await
    }

    /// Send a query and receive a stream of messages.
    pub async fn query(
        &mut self,
        prompt: &str,
    ) -> Result<BoxStream<'static, Result<Message, ClaudeAgentError>>, ClaudeAgentError> {
        self.agent.query(prompt).await
    }

    /// A handle for pushing further user turns onto the current connection.
    pub fn stream_input(&self) -> claude_agent_core::agent::StreamInput {
        self.agent.stream_input()
    }

    /// Send interrupt signal.
    pub async fn interrupt(&self) -> Result<ControlResponse, ClaudeAgentError> {
        self.agent.interrupt().await
    }

    /// Set permission mode.
    ///
    /// Valid modes:
    /// - "default": CLI prompts for dangerous tools
    /// - "acceptEdits": Auto-accept file edits
    /// - "plan": Planning mode
    /// - "bypassPermissions": Allow all tools (use with caution)
    pub async fn set_permission_mode(
        &self,
        mode: &str,
    ) -> Result<ControlResponse, ClaudeAgentError> {
        self.agent.set_permission_mode(mode).await
    }

    /// Set the AI model.
    ///
    /// Examples:
    /// - "claude-sonnet-4-5"
    /// - "claude-opus-4-1-20250805"
    pub async fn set_model(
        &self,
        model: Option<&str>,
    ) -> Result<ControlResponse, ClaudeAgentError> {
        self.agent.set_model(model).await
    }

    /// Query the in-process MCP server table and status as the agent sees it.
    pub async fn get_mcp_status(&self) -> Result<ControlResponse, ClaudeAgentError> {
        self.agent.get_mcp_status().await
    }

    /// Roll back file edits to the checkpoint taken before `user_message_id`.
    pub async fn rewind_files(
        &self,
        user_message_id: &str,
    ) -> Result<ControlResponse, ClaudeAgentError> {
        self.agent.rewind_files(user_message_id).await
    }

    /// Disconnect from the agent.
    pub async fn disconnect(&mut self) -> Result<(), ClaudeAgentError> {
        self.agent.disconnect().await
    }

    /// Get the current session ID.
    pub fn session_id(&self) -> Option<&str> {
        self.agent.current_session().map(|s| s.id.as_str())
    }

    /// Resolve once the first `result`-typed message has passed through the
    /// connection. Resolves immediately if one already has.
    pub async fn wait_for_first_result(&self) {
        self.agent.wait_for_first_result().await;
    }
}
