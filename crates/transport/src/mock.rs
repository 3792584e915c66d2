//! In-memory transport for testing the query engine without a real CLI.
//!
//! A first-class transport rather than a test-only helper, so tests that
//! exercise the query engine's correlation and dispatch logic can reach it
//! from outside the crate that defines `Query`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use claude_agent_types::ClaudeAgentError;

use crate::Transport;

/// A transport backed by a broadcast channel instead of a child process.
///
/// Incoming messages (and injected errors) are queued with [`push_message`]
/// / [`push_error`]; written records are captured in [`sent_messages`].
/// [`fail_next_write`] and [`fail_connect`] let a test force a specific
/// failure point without racing a real process.
///
/// [`push_message`]: MockTransport::push_message
/// [`push_error`]: MockTransport::push_error
/// [`sent_messages`]: MockTransport::sent_messages
/// [`fail_next_write`]: MockTransport::fail_next_write
/// [`fail_connect`]: MockTransport::fail_connect
pub struct MockTransport {
    sent: Arc<Mutex<Vec<String>>>,
    tx: broadcast::Sender<Result<serde_json::Value, ClaudeAgentError>>,
    ready: Arc<AtomicBool>,
    next_write_error: Arc<Mutex<Option<ClaudeAgentError>>>,
    next_connect_error: Arc<Mutex<Option<ClaudeAgentError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(1000);
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            tx,
            ready: Arc::new(AtomicBool::new(false)),
            next_write_error: Arc::new(Mutex::new(None)),
            next_connect_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Queue a JSON value as though the peer had sent it.
    pub fn push_message(&self, value: serde_json::Value) {
        let _ = self.tx.send(Ok(value));
    }

    /// Queue an error as though it had come from the transport's read side.
    pub fn push_error(&self, err: ClaudeAgentError) {
        let _ = self.tx.send(Err(err));
    }

    /// All records written so far, in order.
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Make the next `write` call fail with `err` instead of recording data.
    pub fn fail_next_write(&self, err: ClaudeAgentError) {
        *self.next_write_error.lock().unwrap() = Some(err);
    }

    /// Make the next `connect` call fail with `err`.
    pub fn fail_connect(&self, err: ClaudeAgentError) {
        *self.next_connect_error.lock().unwrap() = Some(err);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            sent: self.sent.clone(),
            tx: self.tx.clone(),
            ready: self.ready.clone(),
            next_write_error: self.next_write_error.clone(),
            next_connect_error: self.next_connect_error.clone(),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&mut self) -> Result<(), ClaudeAgentError> {
        if let Some(err) = self.next_connect_error.lock().unwrap().take() {
            return Err(err);
        }
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn write(&self, data: &str) -> Result<(), ClaudeAgentError> {
        if !self.ready.load(Ordering::SeqCst) {
            return Err(ClaudeAgentError::NotReady);
        }
        if let Some(err) = self.next_write_error.lock().unwrap().take() {
            return Err(err);
        }
        self.sent.lock().unwrap().push(data.to_string());
        Ok(())
    }

    async fn read_messages(&self) -> BoxStream<'_, Result<serde_json::Value, ClaudeAgentError>> {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx);
        Box::pin(stream.map(|item| match item {
            Ok(payload) => payload,
            Err(e) => Err(ClaudeAgentError::Transport(format!("broadcast lagged: {}", e))),
        }))
    }

    async fn close(&mut self) -> Result<(), ClaudeAgentError> {
        self.ready.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn end_input(&self) -> Result<(), ClaudeAgentError> {
        Ok(())
    }
}
