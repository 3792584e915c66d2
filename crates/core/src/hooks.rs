//! Hook registry: callback-id assignment and dispatch.
//!
//! Hooks are registered locally (event, optional matcher, callback) before
//! the query starts. At `initialize` time every registered hook is given a
//! stable `hook_N` id, in registration order, and the resulting
//! `{event: [{matcher, hookCallbackIds}]}` table is sent to the agent as
//! part of the initialize control request. From then on the agent drives
//! execution: it decides which callback ids apply to a given tool call and
//! invokes them one at a time via `hook_callback` control requests carrying
//! the id. `HookRegistry::dispatch` looks up the callback by id and
//! re-applies its configured matcher against the event's tool name before
//! invoking it, skipping a non-matching tool with a no-op output.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use claude_agent_types::hooks::{HookEvent, HookInput, HookOutput};
use claude_agent_types::ClaudeAgentError;

/// Type alias for hook callback functions.
pub type HookCallback = Arc<
    dyn Fn(
            HookInput,
            Option<String>,
        ) -> Pin<Box<dyn Future<Output = Result<HookOutput, ClaudeAgentError>> + Send>>
        + Send
        + Sync,
>;

struct RegisteredHook {
    event: HookEvent,
    matcher: Option<String>,
    timeout: Option<f64>,
    callback: HookCallback,
}

/// Registry of hook callbacks, shared cheaply (`Clone` is an `Arc` bump).
#[derive(Clone)]
pub struct HookRegistry {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    hooks: Vec<RegisteredHook>,
    /// callback_id -> index into `hooks`, assigned by `assign_callback_ids`.
    assigned: std::collections::HashMap<String, usize>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(Inner::default())) }
    }

    /// Register a hook callback for an event, optionally restricted to tool
    /// names matching `matcher` (applied by the agent, not here).
    pub async fn register(
        &self,
        event: HookEvent,
        matcher: Option<String>,
        timeout: Option<f64>,
        callback: HookCallback,
    ) {
        let mut inner = self.inner.write().await;
        inner.hooks.push(RegisteredHook { event, matcher, timeout, callback });
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.hooks.is_empty()
    }

    /// Assign `hook_0, hook_1, ...` ids in registration order and build the
    /// `hooks` payload carried on the `initialize` control request. Returns
    /// `None` if no hooks are registered, so `initialize` omits the field.
    pub async fn assign_and_build_payload(&self) -> Option<serde_json::Value> {
        let mut inner = self.inner.write().await;
        if inner.hooks.is_empty() {
            return None;
        }

        inner.assigned.clear();
        let mut by_event: std::collections::BTreeMap<&'static str, Vec<serde_json::Value>> =
            std::collections::BTreeMap::new();

        for (index, hook) in inner.hooks.iter().enumerate() {
            let callback_id = format!("hook_{}", index);
            inner.assigned.insert(callback_id.clone(), index);
            by_event.entry(hook.event.as_str()).or_default().push(serde_json::json!({
                "matcher": hook.matcher,
                "hookCallbackIds": [callback_id],
            }));
        }

        let payload = serde_json::Map::from_iter(
            by_event.into_iter().map(|(event, groups)| (event.to_string(), serde_json::json!(groups))),
        );
        Some(serde_json::Value::Object(payload))
    }

    /// Invoke the callback registered under `callback_id`, enforcing its
    /// configured timeout if any.
    ///
    /// Re-applies the hook's own matcher against the event's tool name
    /// before invoking: an empty or absent pattern matches everything,
    /// otherwise the match is an exact string comparison against
    /// `input.tool_name()` (spec'd as literal equality, not substring or
    /// regex). Events without a tool name (e.g. `Stop`) always match.
    /// A non-matching event is skipped and reported as a no-op output
    /// rather than an error, since this is routine filtering, not a
    /// failure.
    pub async fn dispatch(
        &self,
        callback_id: &str,
        input: HookInput,
        tool_use_id: Option<String>,
    ) -> Result<HookOutput, ClaudeAgentError> {
        let (callback, timeout, matcher) = {
            let inner = self.inner.read().await;
            let index = *inner
                .assigned
                .get(callback_id)
                .ok_or_else(|| ClaudeAgentError::NotFound(format!("hook callback id: {}", callback_id)))?;
            let hook = &inner.hooks[index];
            (hook.callback.clone(), hook.timeout, hook.matcher.clone())
        };

        if let Some(tool_name) = input.tool_name() {
            if let Some(pattern) = matcher.as_deref().filter(|p| !p.is_empty()) {
                if pattern != tool_name {
                    return Ok(HookOutput::default());
                }
            }
        }

        let future = callback(input, tool_use_id);
        match timeout {
            Some(seconds) => tokio::time::timeout(Duration::from_secs_f64(seconds), future)
                .await
                .map_err(|_| ClaudeAgentError::Timeout)?,
            None => future.await,
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
