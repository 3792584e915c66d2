use thiserror::Error;

/// Errors surfaced by the transport, the query engine, and the in-process
/// MCP responder.
///
/// `NotReady`, `NonStreaming`, `Timeout`, `Cancelled`, `Closed`,
/// `Terminated`, `BufferExceeded`, `Malformed`, `RemoteError` and
/// `NotFound` are the terminal states callers are expected to match on;
/// the remaining variants wrap lower-level failures (CLI discovery,
/// process spawn, JSON decoding, configuration).
#[derive(Debug, Error, Clone)]
pub enum ClaudeAgentError {
    /// The transport has not been connected, or was already closed.
    #[error("transport not ready")]
    NotReady,

    /// A streaming-only operation was attempted on a non-streaming query.
    #[error("operation requires streaming mode")]
    NonStreaming,

    /// A control request's per-call timeout elapsed before a response
    /// arrived.
    #[error("control request timed out")]
    Timeout,

    /// The caller's context was cancelled while a control request was in
    /// flight.
    #[error("operation cancelled")]
    Cancelled,

    /// The query (or transport) was closed while the operation was in
    /// flight.
    #[error("query closed")]
    Closed,

    /// The agent process exited. Carries the exit code when known.
    #[error("agent process terminated (exit code {exit_code:?})")]
    Terminated { exit_code: Option<i32> },

    /// A single record on the wire exceeded the configured buffer limit.
    #[error("record exceeded max buffer size ({bytes} bytes)")]
    BufferExceeded { bytes: usize },

    /// A value did not match the shape an operation required.
    #[error("malformed message: {0}")]
    Malformed(String),

    /// The peer returned `subtype: "error"` for a control request.
    #[error("remote error: {0}")]
    RemoteError(String),

    /// A named resource (CLI binary, callback ID, MCP server/tool) was not
    /// found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An I/O failure in the underlying transport.
    #[error("I/O error: {0}")]
    IOError(String),

    #[error("CLI not found: {0}")]
    CLINotFound(String),

    #[error("CLI connection error: {0}")]
    CLIConnection(String),

    #[error("process error: {0}")]
    Process(String),

    #[error("JSON decode error: {0}")]
    JSONDecode(String),

    #[error("message parse error: {0}")]
    MessageParse(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("control protocol error: {0}")]
    ControlProtocol(String),

    #[error("MCP error: {0}")]
    Mcp(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("initialization error: {0}")]
    Initialization(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for ClaudeAgentError {
    fn from(err: std::io::Error) -> Self {
        ClaudeAgentError::IOError(err.to_string())
    }
}

impl From<serde_json::Error> for ClaudeAgentError {
    fn from(err: serde_json::Error) -> Self {
        ClaudeAgentError::JSONDecode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClaudeAgentError>;
