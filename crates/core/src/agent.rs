//! The query engine: the hub that owns the transport, correlates control
//! requests in both directions, and dispatches agent-initiated callbacks.
//!
//! # Architecture
//!
//! - **Transport**: a subprocess (or mock) yielding a broadcast-backed
//!   message stream; every subscriber (the background dispatch loop, every
//!   `query()` call) gets its own independent view of the same records.
//! - **Control loop**: one task, spawned by `connect`, that owns the
//!   outgoing-request receiver and a dedicated read subscription. It writes
//!   client-initiated requests as they're enqueued by `ControlProtocol`, and
//!   for every incoming record either routes a `control_response` back to
//!   the waiting `send_request` call, or spawns a short-lived dispatch
//!   worker for an incoming `control_request` (`can_use_tool`,
//!   `hook_callback`, `mcp_message`).
//! - **Query streams**: `query()` writes the prompt, then returns its own
//!   subscription over the transport, filtering out control/system-init
//!   records and decoding the rest as `Message`.
//!
//! # Lifecycle
//!
//! 1. `ClaudeAgent::new(options)`
//! 2. `connect()` — spawns the transport, starts the control loop, sends
//!    `initialize` (with the hook callback-id table), creates a session.
//! 3. `query()` any number of times.
//! 4. `disconnect()` — idempotent; aborts the control loop, cancels any
//!    pending control requests, closes the transport.

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;

use claude_agent_mcp::McpServerManager;
use claude_agent_transport::{SubprocessTransport, Transport};
use claude_agent_types::hooks::HookInput;
use claude_agent_types::{ClaudeAgentError, ClaudeAgentOptions, Message};

use crate::control::{ControlProtocol, ControlRequestType, ControlResponse};
use crate::hooks::HookRegistry;
use crate::permissions::PermissionHandler;
use crate::session::{Session, SessionManager};

type SharedTransport = Arc<tokio::sync::RwLock<Option<Box<dyn Transport>>>>;

/// The core Claude Agent: the SDK's query engine.
pub struct ClaudeAgent {
    options: ClaudeAgentOptions,
    transport: SharedTransport,
    control_loop_abort: Option<tokio::task::AbortHandle>,
    session_manager: SessionManager,
    hook_registry: HookRegistry,
    permission_handler: PermissionHandler,
    mcp_manager: McpServerManager,
    control: Arc<ControlProtocol>,
    control_rx: Option<tokio::sync::mpsc::Receiver<crate::control::ControlRequest>>,
    server_info: Arc<tokio::sync::RwLock<Option<serde_json::Value>>>,
    first_result: Arc<FirstResultSignal>,
}

/// One-shot signal fired the first time a `result`-typed message passes
/// through the control loop. Later results leave it signalled; a caller
/// joining after the fact observes it as already-fired rather than hanging.
#[derive(Default)]
struct FirstResultSignal {
    fired: std::sync::atomic::AtomicBool,
    notify: tokio::sync::Notify,
}

impl FirstResultSignal {
    fn fire(&self) {
        if !self.fired.swap(true, std::sync::atomic::Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    async fn wait(&self) {
        // Register interest before checking the flag: `Notify` stores a
        // permit for a future created before `notify_waiters` runs, so this
        // ordering avoids the race of firing between the check and the wait.
        let notified = self.notify.notified();
        if self.fired.load(std::sync::atomic::Ordering::SeqCst) {
            return;
        }
        notified.await;
    }
}

impl ClaudeAgent {
    /// Create a new Claude Agent.
    pub fn new(options: ClaudeAgentOptions) -> Self {
        let (protocol, rx) = ControlProtocol::new();
        Self {
            options,
            transport: Arc::new(tokio::sync::RwLock::new(None)),
            control_loop_abort: None,
            session_manager: SessionManager::new(),
            hook_registry: HookRegistry::new(),
            permission_handler: PermissionHandler::new(),
            mcp_manager: McpServerManager::new(),
            control: Arc::new(protocol),
            control_rx: Some(rx),
            server_info: Arc::new(tokio::sync::RwLock::new(None)),
            first_result: Arc::new(FirstResultSignal::default()),
        }
    }

    /// Set the transport implementation, e.g. a `MockTransport` in tests.
    pub fn set_transport(&mut self, transport: Box<dyn Transport>) {
        self.transport = Arc::new(tokio::sync::RwLock::new(Some(transport)));
    }

    /// Register a hook callback, applied for `event` and (optionally)
    /// restricted to tool names matching `matcher`. Must be called before
    /// `connect`, since callback ids are assigned once at `initialize`.
    pub async fn register_hook(
        &self,
        event: claude_agent_types::hooks::HookEvent,
        matcher: Option<String>,
        timeout: Option<f64>,
        callback: crate::hooks::HookCallback,
    ) {
        self.hook_registry.register(event, matcher, timeout, callback).await;
    }

    /// Set the `can_use_tool` callback.
    pub async fn set_permission_callback(&self, callback: crate::permissions::PermissionCallback) {
        self.permission_handler.set_callback(callback).await;
    }

    /// Register an in-process MCP server, reachable by name via
    /// `mcp_servers` configuration and agent-initiated `mcp_message`
    /// requests. Must be called before `connect`.
    pub async fn register_mcp_server(&self, server: Box<dyn claude_agent_mcp::McpServer>) {
        self.mcp_manager.register(server).await;
    }

    /// Connect to the agent CLI (or configured transport) and run the
    /// initialize handshake.
    pub async fn connect(&mut self, prompt: Option<&str>) -> Result<(), ClaudeAgentError> {
        {
            let mut guard = self.transport.write().await;
            if guard.is_none() {
                *guard = Some(Box::new(SubprocessTransport::new(
                    prompt.map(|s| s.to_string()),
                    true,
                    self.options.clone(),
                )));
            }
            guard.as_mut().expect("just set above").connect().await?;
        }

        let control_rx = self
            .control_rx
            .take()
            .ok_or(ClaudeAgentError::Initialization("agent already connected".to_string()))?;

        let abort_handle = spawn_control_loop(
            self.transport.clone(),
            control_rx,
            self.control.clone(),
            self.hook_registry.clone(),
            self.permission_handler.clone(),
            self.mcp_manager.clone(),
            self.server_info.clone(),
            self.first_result.clone(),
        );
        self.control_loop_abort = Some(abort_handle);

        let hooks_payload = self.hook_registry.assign_and_build_payload().await;
        let response = self.control.initialize(hooks_payload).await?;
        if !response.success {
            return Err(ClaudeAgentError::RemoteError(
                response.error.unwrap_or_else(|| "initialize failed".to_string()),
            ));
        }
        if let Some(data) = response.response {
            *self.server_info.write().await = Some(data);
        }

        self.session_manager.create_session();

        Ok(())
    }

    /// Write `prompt` as a user message and return a stream of the agent's
    /// replies. The stream is independent of `self`'s lifetime: dropping
    /// the agent handle does not end it, since the underlying reader task
    /// keeps the transport alive via its own `Arc`.
    pub async fn query(
        &self,
        prompt: &str,
    ) -> Result<BoxStream<'static, Result<Message, ClaudeAgentError>>, ClaudeAgentError> {
        write_to_transport(&self.transport, &user_message_json(prompt)).await?;

        let transport = self.transport.clone();
        let stream = async_stream::stream! {
            let guard = transport.read().await;
            let Some(active) = guard.as_ref() else {
                yield Err(ClaudeAgentError::NotReady);
                return;
            };
            let mut json_stream = active.read_messages().await;

            while let Some(result) = json_stream.next().await {
                match result {
                    Ok(value) => {
                        if let Some(parsed) = decode_agent_message(value) {
                            yield parsed;
                        }
                    }
                    Err(e) => yield Err(e),
                }
            }
        };

        Ok(Box::pin(stream))
    }

    /// The raw `system`/`init` payload the agent sent back during `initialize`.
    pub async fn get_server_info(&self) -> Option<serde_json::Value> {
        self.server_info.read().await.clone()
    }

    /// Resolve once the first `result`-typed message has passed through the
    /// control loop. Resolves immediately if one already has.
    pub async fn wait_for_first_result(&self) {
        self.first_result.wait().await;
    }

    /// A handle for pushing further user turns onto this connection after
    /// the initial `query()`, without waiting for the prior turn to finish.
    pub fn stream_input(&self) -> StreamInput {
        StreamInput { transport: self.transport.clone() }
    }

    pub async fn interrupt(&self) -> Result<ControlResponse, ClaudeAgentError> {
        self.control.interrupt().await
    }

    pub async fn set_permission_mode(&self, mode: &str) -> Result<ControlResponse, ClaudeAgentError> {
        self.control.set_permission_mode(mode).await
    }

    pub async fn set_model(&self, model: Option<&str>) -> Result<ControlResponse, ClaudeAgentError> {
        self.control.set_model(model).await
    }

    pub async fn get_mcp_status(&self) -> Result<ControlResponse, ClaudeAgentError> {
        self.control.get_mcp_status().await
    }

    pub async fn rewind_files(&self, user_message_id: &str) -> Result<ControlResponse, ClaudeAgentError> {
        let response = self.control.rewind_files(user_message_id).await?;
        Ok(response)
    }

    /// Disconnect from the agent. Idempotent: calling this on an agent that
    /// was never connected, or twice in a row, is a no-op success.
    pub async fn disconnect(&mut self) -> Result<(), ClaudeAgentError> {
        if let Some(abort_handle) = self.control_loop_abort.take() {
            abort_handle.abort();
        }
        self.control.cancel_all().await;

        let mut guard = self.transport.write().await;
        if let Some(mut transport) = guard.take() {
            transport.close().await?;
        }

        if let Some(session) = self.session_manager.current_session_mut() {
            session.deactivate();
        }

        Ok(())
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session_manager.current_session()
    }

    pub fn hook_registry(&self) -> &HookRegistry {
        &self.hook_registry
    }

    pub fn mcp_manager(&self) -> &McpServerManager {
        &self.mcp_manager
    }

    pub fn permission_handler(&self) -> &PermissionHandler {
        &self.permission_handler
    }
}

/// Handle for streaming additional user turns into an already-running
/// query, independent of the agent that created it.
pub struct StreamInput {
    transport: SharedTransport,
}

impl StreamInput {
    /// Send another user turn on the same connection.
    pub async fn send(&self, prompt: &str) -> Result<(), ClaudeAgentError> {
        write_to_transport(&self.transport, &user_message_json(prompt)).await
    }

    /// Signal that no further user turns will be sent.
    pub async fn end(&self) -> Result<(), ClaudeAgentError> {
        let guard = self.transport.read().await;
        let active = guard.as_ref().ok_or(ClaudeAgentError::NotReady)?;
        active.end_input().await
    }
}

fn user_message_json(prompt: &str) -> String {
    let user_msg = serde_json::json!({
        "type": "user",
        "message": {
            "role": "user",
            "content": [{"type": "text", "text": prompt}],
        },
    });
    serde_json::to_string(&user_msg).expect("json serialises")
}

/// Filters out control/system-init records; decodes everything else.
fn decode_agent_message(value: serde_json::Value) -> Option<Result<Message, ClaudeAgentError>> {
    let msg_type = value.get("type").and_then(|t| t.as_str()).unwrap_or("");
    if msg_type == "control_request" || msg_type == "control_response" || msg_type == "control_cancel_request" {
        return None;
    }
    if msg_type == "system" && value.get("subtype").and_then(|t| t.as_str()) == Some("init") {
        return None;
    }

    Some(
        serde_json::from_value(value)
            .map_err(|e| ClaudeAgentError::Malformed(format!("could not decode agent message: {}", e))),
    )
}

async fn write_to_transport(transport: &SharedTransport, data: &str) -> Result<(), ClaudeAgentError> {
    let guard = transport.read().await;
    let active = guard.as_ref().ok_or(ClaudeAgentError::NotReady)?;
    active.write(data).await
}

/// Spawns the single background task that owns the outgoing control-request
/// receiver and a dedicated read subscription, per spec's concurrency model
/// of one control loop per query plus one dispatch worker task per
/// agent-initiated control request.
#[allow(clippy::too_many_arguments)]
fn spawn_control_loop(
    transport: SharedTransport,
    mut control_rx: tokio::sync::mpsc::Receiver<crate::control::ControlRequest>,
    control: Arc<ControlProtocol>,
    hook_registry: HookRegistry,
    permission_handler: PermissionHandler,
    mcp_manager: McpServerManager,
    server_info: Arc<tokio::sync::RwLock<Option<serde_json::Value>>>,
    first_result: Arc<FirstResultSignal>,
) -> tokio::task::AbortHandle {
    tokio::spawn(async move {
        let mut incoming_stream = {
            let guard = transport.read().await;
            match guard.as_ref() {
                Some(active) => active.read_messages().await,
                None => return,
            }
        };

        loop {
            tokio::select! {
                maybe_req = control_rx.recv() => {
                    let Some(req) = maybe_req else { break };
                    let payload = encode_client_request(&req.request);
                    let envelope = serde_json::json!({
                        "type": "control_request",
                        "request_id": req.request_id,
                        "request": payload,
                    });
                    let text = serde_json::to_string(&envelope).expect("json serialises");
                    if write_to_transport(&transport, &text).await.is_err() {
                        break;
                    }
                }

                maybe_msg = incoming_stream.next() => {
                    match maybe_msg {
                        Some(Ok(value)) => {
                            handle_incoming(
                                value,
                                &transport,
                                &control,
                                &hook_registry,
                                &permission_handler,
                                &mcp_manager,
                                &server_info,
                                &first_result,
                            ).await;
                        }
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "control loop read error");
                        }
                        None => break,
                    }
                }
            }
        }

        control.cancel_all().await;
    })
    .abort_handle()
}

fn encode_client_request(request: &ControlRequestType) -> serde_json::Value {
    match request {
        ControlRequestType::Interrupt => serde_json::json!({"subtype": "interrupt"}),
        ControlRequestType::Initialize { hooks } => {
            serde_json::json!({"subtype": "initialize", "hooks": hooks})
        },
        ControlRequestType::SetPermissionMode { mode } => {
            serde_json::json!({"subtype": "set_permission_mode", "mode": mode})
        },
        ControlRequestType::SetModel { model } => {
            serde_json::json!({"subtype": "set_model", "model": model})
        },
        ControlRequestType::RewindFiles { user_message_id } => {
            serde_json::json!({"subtype": "rewind_files", "user_message_id": user_message_id})
        },
        ControlRequestType::GetMcpStatus => serde_json::json!({"subtype": "mcp_status"}),
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_incoming(
    value: serde_json::Value,
    transport: &SharedTransport,
    control: &Arc<ControlProtocol>,
    hook_registry: &HookRegistry,
    permission_handler: &PermissionHandler,
    mcp_manager: &McpServerManager,
    server_info: &Arc<tokio::sync::RwLock<Option<serde_json::Value>>>,
    first_result: &Arc<FirstResultSignal>,
) {
    let msg_type = value.get("type").and_then(|t| t.as_str()).unwrap_or("");
    if msg_type == "result" {
        first_result.fire();
    }

    match msg_type {
        "control_request" => {
            let request_id =
                value.get("request_id").and_then(|s| s.as_str()).unwrap_or("").to_string();
            let request = value.get("request").cloned().unwrap_or(serde_json::Value::Null);

            let transport = transport.clone();
            let hook_registry = hook_registry.clone();
            let permission_handler = permission_handler.clone();
            let mcp_manager = mcp_manager.clone();

            tokio::spawn(async move {
                let result =
                    dispatch_agent_request(request, &hook_registry, &permission_handler, &mcp_manager)
                        .await;
                let envelope = match result {
                    Ok(data) => serde_json::json!({
                        "type": "control_response",
                        "response": {"subtype": "success", "request_id": request_id, "response": data},
                    }),
                    Err(e) => serde_json::json!({
                        "type": "control_response",
                        "response": {"subtype": "error", "request_id": request_id, "error": e.to_string()},
                    }),
                };
                let text = serde_json::to_string(&envelope).expect("json serialises");
                let _ = write_to_transport(&transport, &text).await;
            });
        },
        "control_response" => {
            let response = value.get("response").cloned().unwrap_or(serde_json::Value::Null);
            let request_id =
                response.get("request_id").and_then(|s| s.as_str()).unwrap_or("").to_string();
            let subtype = response.get("subtype").and_then(|s| s.as_str()).unwrap_or("");
            let control_response = ControlResponse {
                request_id,
                success: subtype == "success",
                response: response.get("response").cloned(),
                error: response.get("error").and_then(|e| e.as_str()).map(str::to_string),
            };
            let _ = control.handle_response(control_response).await;
        },
        "control_cancel_request" => {
            // Acknowledged as a no-op: the SDK doesn't retry or abort
            // in-flight dispatch workers, so there's nothing to cancel.
            tracing::debug!("received control_cancel_request; ignoring");
        },
        "system" if value.get("subtype").and_then(|s| s.as_str()) == Some("init") => {
            *server_info.write().await = value.get("data").cloned();
        },
        _ => {},
    }
}

/// Dispatch one agent-initiated `control_request` payload, returning the
/// value to place under `response.response` on success.
async fn dispatch_agent_request(
    request: serde_json::Value,
    hook_registry: &HookRegistry,
    permission_handler: &PermissionHandler,
    mcp_manager: &McpServerManager,
) -> Result<serde_json::Value, ClaudeAgentError> {
    let subtype = request.get("subtype").and_then(|s| s.as_str()).unwrap_or("");

    match subtype {
        "can_use_tool" => {
            let tool_name = request
                .get("tool_name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ClaudeAgentError::Malformed("can_use_tool missing tool_name".to_string()))?;
            let input = request.get("input").cloned().unwrap_or(serde_json::Value::Null);
            let suggestions = request
                .get("permission_suggestions")
                .cloned()
                .map(serde_json::from_value)
                .transpose()?
                .unwrap_or_default();

            let result = permission_handler.can_use_tool(tool_name, input, suggestions).await?;
            Ok(serde_json::to_value(result).expect("PermissionResult serialises"))
        },
        "hook_callback" => {
            let callback_id = request
                .get("callback_id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ClaudeAgentError::Malformed("hook_callback missing callback_id".to_string()))?;
            let input: HookInput = serde_json::from_value(
                request.get("input").cloned().unwrap_or(serde_json::Value::Null),
            )
            .map_err(|e| ClaudeAgentError::Malformed(format!("invalid hook input: {}", e)))?;
            let tool_use_id =
                request.get("tool_use_id").and_then(|v| v.as_str()).map(str::to_string);

            let output = hook_registry.dispatch(callback_id, input, tool_use_id).await?;
            Ok(output.to_json())
        },
        "mcp_message" => {
            let server_name = request
                .get("server_name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ClaudeAgentError::Malformed("mcp_message missing server_name".to_string()))?;
            let message = request
                .get("message")
                .cloned()
                .ok_or_else(|| ClaudeAgentError::Malformed("mcp_message missing message".to_string()))?;

            let server = mcp_manager
                .get(server_name)
                .await
                .ok_or_else(|| ClaudeAgentError::NotFound(format!("MCP server: {}", server_name)))?;
            let jsonrpc_response = server.handle_client_message(message).await?;
            Ok(serde_json::json!({ "mcp_response": jsonrpc_response }))
        },
        other => Err(ClaudeAgentError::Malformed(format!("unsupported control subtype: {}", other))),
    }
}
