//! Tool-permission dispatch (`can_use_tool`).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::RwLock;

use claude_agent_types::hooks::{PermissionResult, PermissionUpdate, ToolPermissionContext};
use claude_agent_types::ClaudeAgentError;

/// Type alias for permission callback functions.
pub type PermissionCallback = Arc<
    dyn Fn(
            String,
            serde_json::Value,
            ToolPermissionContext,
        )
            -> Pin<Box<dyn Future<Output = Result<PermissionResult, ClaudeAgentError>> + Send>>
        + Send
        + Sync,
>;

/// Dispatches agent-initiated `can_use_tool` requests to a user callback.
#[derive(Clone)]
pub struct PermissionHandler {
    callback: Arc<RwLock<Option<PermissionCallback>>>,
}

impl PermissionHandler {
    pub fn new() -> Self {
        Self { callback: Arc::new(RwLock::new(None)) }
    }

    /// Set the permission callback, replacing any previously set one.
    pub async fn set_callback(&self, callback: PermissionCallback) {
        *self.callback.write().await = Some(callback);
    }

    /// Dispatch a `can_use_tool` request.
    ///
    /// With no callback configured this is a hard error rather than an
    /// implicit allow: a silently-permissive SDK would make every tool call
    /// succeed whether or not the embedding application meant to gate them.
    pub async fn can_use_tool(
        &self,
        tool_name: &str,
        input: serde_json::Value,
        suggestions: Vec<PermissionUpdate>,
    ) -> Result<PermissionResult, ClaudeAgentError> {
        let guard = self.callback.read().await;
        match guard.as_ref() {
            Some(callback) => {
                let context = ToolPermissionContext { suggestions };
                callback(tool_name.to_string(), input, context).await
            },
            None => Err(ClaudeAgentError::RemoteError(
                "no canUseTool callback configured".to_string(),
            )),
        }
    }

    pub async fn has_callback(&self) -> bool {
        self.callback.read().await.is_some()
    }
}

impl Default for PermissionHandler {
    fn default() -> Self {
        Self::new()
    }
}
