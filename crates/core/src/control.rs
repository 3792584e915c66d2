//! Client-initiated control request/response correlation.
//!
//! `ControlProtocol` is the half of the control channel the query engine
//! drives itself: `interrupt`, `initialize`, `set_permission_mode`,
//! `set_model`, `get_mcp_status` and `rewind_files` all funnel through
//! `send_request`, which hands the request to the background writer over
//! `request_tx` and waits on a `oneshot` keyed by `request_id`. Responses
//! arrive out of band, decoded off the transport's read stream, and are
//! routed back in by `handle_response`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, Mutex};
use uuid::Uuid;

use claude_agent_types::ClaudeAgentError;

/// How long `send_request` waits for a matching response before giving up,
/// for every control subtype except `initialize`.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How long `initialize` waits for its response. Spec'd separately from
/// `DEFAULT_REQUEST_TIMEOUT` since the agent's handshake (hook registration,
/// MCP server discovery) can take longer than a routine control call.
const DEFAULT_INITIALIZE_TIMEOUT: Duration = Duration::from_secs(60);

/// Control protocol handler for request/response routing.
pub struct ControlProtocol {
    pending_requests: Arc<Mutex<HashMap<String, oneshot::Sender<ControlResponse>>>>,
    request_tx: mpsc::Sender<ControlRequest>,
    timeout: Duration,
}

/// A control request to send to the agent.
#[derive(Debug, Clone)]
pub struct ControlRequest {
    pub request_id: String,
    pub request: ControlRequestType,
}

/// Client-initiated control request subtypes.
#[derive(Debug, Clone)]
pub enum ControlRequestType {
    Interrupt,
    Initialize { hooks: Option<serde_json::Value> },
    SetPermissionMode { mode: String },
    SetModel { model: Option<String> },
    RewindFiles { user_message_id: String },
    GetMcpStatus,
}

/// A control response received from the agent.
#[derive(Debug, Clone)]
pub struct ControlResponse {
    pub request_id: String,
    pub success: bool,
    pub response: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl ControlProtocol {
    /// Create a new control protocol handler.
    pub fn new() -> (Self, mpsc::Receiver<ControlRequest>) {
        let (tx, rx) = mpsc::channel(32);
        (
            Self {
                pending_requests: Arc::new(Mutex::new(HashMap::new())),
                request_tx: tx,
                timeout: DEFAULT_REQUEST_TIMEOUT,
            },
            rx,
        )
    }

    /// Send a control request and wait for its response, subject to
    /// `DEFAULT_REQUEST_TIMEOUT`. Resolves to `Cancelled` if the pending
    /// request is dropped out from under it (e.g. by `cancel_all` during
    /// close) instead of completing normally.
    pub async fn send_request(
        &self,
        request_type: ControlRequestType,
    ) -> Result<ControlResponse, ClaudeAgentError> {
        let request_id = Uuid::new_v4().to_string();
        let (response_tx, response_rx) = oneshot::channel();

        let timeout = match request_type {
            ControlRequestType::Initialize { .. } => DEFAULT_INITIALIZE_TIMEOUT,
            _ => self.timeout,
        };

        {
            let mut pending = self.pending_requests.lock().await;
            pending.insert(request_id.clone(), response_tx);
        }

        let request = ControlRequest { request_id: request_id.clone(), request: request_type };

        if self.request_tx.send(request).await.is_err() {
            self.pending_requests.lock().await.remove(&request_id);
            return Err(ClaudeAgentError::Closed);
        }

        match tokio::time::timeout(timeout, response_rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(ClaudeAgentError::Cancelled),
            Err(_) => {
                self.pending_requests.lock().await.remove(&request_id);
                Err(ClaudeAgentError::Timeout)
            },
        }
    }

    /// Route an incoming control response to the task awaiting it.
    pub async fn handle_response(&self, response: ControlResponse) -> Result<(), ClaudeAgentError> {
        let mut pending = self.pending_requests.lock().await;
        if let Some(tx) = pending.remove(&response.request_id) {
            let _ = tx.send(response);
        }
        Ok(())
    }

    /// Drop every pending request, unblocking `send_request` callers with
    /// `Cancelled`. Called when the query is closed or the transport dies.
    pub async fn cancel_all(&self) {
        self.pending_requests.lock().await.clear();
    }

    pub async fn interrupt(&self) -> Result<ControlResponse, ClaudeAgentError> {
        self.send_request(ControlRequestType::Interrupt).await
    }

    pub async fn initialize(
        &self,
        hooks: Option<serde_json::Value>,
    ) -> Result<ControlResponse, ClaudeAgentError> {
        self.send_request(ControlRequestType::Initialize { hooks }).await
    }

    pub async fn set_permission_mode(
        &self,
        mode: &str,
    ) -> Result<ControlResponse, ClaudeAgentError> {
        self.send_request(ControlRequestType::SetPermissionMode { mode: mode.to_string() }).await
    }

    pub async fn set_model(
        &self,
        model: Option<&str>,
    ) -> Result<ControlResponse, ClaudeAgentError> {
        self.send_request(ControlRequestType::SetModel { model: model.map(|s| s.to_string()) })
            .await
    }

    pub async fn get_mcp_status(&self) -> Result<ControlResponse, ClaudeAgentError> {
        self.send_request(ControlRequestType::GetMcpStatus).await
    }

    pub async fn rewind_files(
        &self,
        user_message_id: &str,
    ) -> Result<ControlResponse, ClaudeAgentError> {
        self.send_request(ControlRequestType::RewindFiles {
            user_message_id: user_message_id.to_string(),
        })
        .await
    }
}

impl Default for ControlProtocol {
    fn default() -> Self {
        Self::new().0
    }
}
