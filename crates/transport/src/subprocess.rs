//! Subprocess transport implementation for the agent CLI.
//!
//! This module provides a subprocess-based transport implementation that spawns
//! the agent CLI as a child process and communicates via stdin/stdout.
//!
//! # Architecture
//!
//! The transport uses a broadcast channel to distribute messages to multiple
//! subscribers, allowing the agent to drop and recreate the stream between
//! turns without losing messages.
//!
//! # Features
//!
//! - **Automatic CLI Discovery**: Searches common installation locations
//! - **Input Validation**: Validates CLI paths are executable files
//! - **Version Gate**: Warns (without aborting) when the discovered CLI is older
//!   than the minimum supported version
//! - **Timeout Handling**: Prevents indefinite hangs during connection
//! - **Resource Cleanup**: Properly aborts background tasks on close
//! - **Broadcast Channel**: Distributes messages to multiple subscribers
//!
//! # Example
//!
//! ```rust,no_run
//! use claude_agent_transport::{Transport, SubprocessTransport};
//! use claude_agent_types::ClaudeAgentOptions;
//! use futures::StreamExt;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut transport = SubprocessTransport::new(
//!         Some("Hello, Claude!".to_string()),
//!         true,
//!         ClaudeAgentOptions::default(),
//!     );
//!
//!     Transport::connect(&mut transport).await?;
//!     transport.write("What is 2+2?").await?;
//!
//!     {
//!         let mut stream = transport.read_messages().await;
//!         while let Some(result) = stream.next().await {
//!             match result {
//!                 Ok(msg) => println!("Received: {}", msg),
//!                 Err(e) => eprintln!("Error: {}", e),
//!             }
//!         }
//!     }
//!
//!     transport.close().await?;
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::Mutex;

use claude_agent_types::config::{
    McpServersConfig, OutputFormatConfig, PluginConfig, SystemPromptConfig, SystemPromptPreset,
    ToolsConfig,
};
use claude_agent_types::{ClaudeAgentError, ClaudeAgentOptions};

use crate::Transport;

/// Minimum CLI version this SDK has been validated against.
const MIN_CLI_VERSION: (u64, u64, u64) = (2, 0, 0);

/// SDK identifier reported to the agent process via `CLAUDE_CODE_ENTRYPOINT`.
const SDK_ENTRYPOINT: &str = "sdk-rs";

/// SDK version reported via `CLAUDE_AGENT_SDK_VERSION`.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable that disables the version gate entirely.
const SKIP_VERSION_CHECK_ENV: &str = "CLAUDE_AGENT_SDK_SKIP_VERSION_CHECK";

/// Platform command-line length above which `--agents` is spilled to a temp file.
#[cfg(windows)]
const AGENTS_INLINE_LIMIT: usize = 8_000;
#[cfg(not(windows))]
const AGENTS_INLINE_LIMIT: usize = 100_000;

/// Subprocess transport using the agent CLI.
///
/// Spawns the CLI as a child process and communicates with it via stdin for
/// sending messages and stdout for receiving streaming JSON responses.
///
/// # Thread Safety
///
/// This implementation is `Send + Sync`. Internal state is protected by
/// `Arc<Mutex<>>` and atomics so it can be shared across tasks.
///
/// # Broadcast Channel
///
/// Messages are distributed via a broadcast channel with a capacity of 1000
/// messages. If there are no subscribers, messages are silently dropped.
pub struct SubprocessTransport {
    options: ClaudeAgentOptions,
    prompt: Option<String>,
    streaming: bool,
    stderr_callback: Option<Arc<dyn Fn(String) + Send + Sync>>,

    process: Option<Child>,
    stdin: Option<Arc<Mutex<ChildStdin>>>,
    inbox: Option<tokio::sync::broadcast::Sender<Result<serde_json::Value, ClaudeAgentError>>>,
    reader_abort_handle: Option<tokio::task::AbortHandle>,
    stderr_abort_handle: Option<tokio::task::AbortHandle>,
    temp_files: Vec<PathBuf>,

    /// Flips to `false` on close, process exit, or the first write failure.
    ready: Arc<AtomicBool>,
    /// Sticky error recorded by a failed write, returned by subsequent writes.
    sticky_error: Arc<std::sync::Mutex<Option<ClaudeAgentError>>>,
    /// Set once `end_input` has shut the write half down, so repeat calls are a no-op.
    input_ended: Arc<AtomicBool>,
}

impl SubprocessTransport {
    /// Create a new subprocess transport.
    ///
    /// `streaming` selects between `--input-format stream-json` (bidirectional,
    /// prompt delivered as the first user message) and one-shot `--print -- <prompt>`.
    pub fn new(prompt: Option<String>, streaming: bool, options: ClaudeAgentOptions) -> Self {
        Self {
            options,
            prompt,
            streaming,
            stderr_callback: None,
            process: None,
            stdin: None,
            inbox: None,
            reader_abort_handle: None,
            stderr_abort_handle: None,
            temp_files: Vec::new(),
            ready: Arc::new(AtomicBool::new(false)),
            sticky_error: Arc::new(std::sync::Mutex::new(None)),
            input_ended: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attach a callback invoked once per line the child writes to stderr.
    pub fn with_stderr_callback(mut self, callback: Arc<dyn Fn(String) + Send + Sync>) -> Self {
        self.stderr_callback = Some(callback);
        self
    }

    /// Find the agent CLI binary.
    fn find_cli(&self) -> Result<PathBuf, ClaudeAgentError> {
        if let Some(ref path) = self.options.cli_path {
            return Self::validate_executable(path);
        }

        if let Ok(path) = which::which("claude") {
            return Ok(path);
        }

        let common_paths = [
            dirs::home_dir().map(|h| h.join(".claude/local/claude")),
            Some(PathBuf::from("/usr/local/bin/claude")),
            Some(PathBuf::from("/opt/homebrew/bin/claude")),
        ];

        for path_opt in common_paths.iter().flatten() {
            if let Ok(path) = Self::validate_executable(path_opt) {
                return Ok(path);
            }
        }

        Err(ClaudeAgentError::CLINotFound(
            "Claude Code CLI not found on PATH or in common install locations. \
             Install it, or set `cli_path` explicitly."
                .to_string(),
        ))
    }

    fn validate_executable(path: &Path) -> Result<PathBuf, ClaudeAgentError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| ClaudeAgentError::CLINotFound(format!("cannot access {}: {}", path.display(), e)))?;

        if !metadata.is_file() {
            return Err(ClaudeAgentError::CLINotFound(format!("not a file: {}", path.display())));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(ClaudeAgentError::CLINotFound(format!(
                    "not executable: {}",
                    path.display()
                )));
            }
        }

        Ok(path.to_path_buf())
    }

    /// Run `<cli> -v` with a 2-second deadline and warn if the CLI predates
    /// `MIN_CLI_VERSION`. Never fails the connection: extraction failure and
    /// low versions are both non-fatal.
    async fn check_version(cli_path: &Path) {
        if std::env::var(SKIP_VERSION_CHECK_ENV).is_ok() {
            return;
        }

        let output = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            Command::new(cli_path).arg("-v").output(),
        )
        .await;

        let output = match output {
            Ok(Ok(out)) => out,
            _ => {
                tracing::warn!("could not determine CLI version (timed out or failed to run -v)");
                return;
            },
        };

        let text = String::from_utf8_lossy(&output.stdout);
        match Self::extract_version(&text) {
            Some(found) if found < MIN_CLI_VERSION => {
                tracing::warn!(
                    found = format!("{}.{}.{}", found.0, found.1, found.2),
                    minimum = format!("{}.{}.{}", MIN_CLI_VERSION.0, MIN_CLI_VERSION.1, MIN_CLI_VERSION.2),
                    "CLI version is older than the minimum supported version"
                );
            },
            Some(_) => {},
            None => {
                tracing::warn!(output = %text.trim(), "could not parse a version triple from `-v` output");
            },
        }
    }

    fn extract_version(text: &str) -> Option<(u64, u64, u64)> {
        for token in text.split(|c: char| !c.is_ascii_digit() && c != '.') {
            let parts: Vec<&str> = token.split('.').collect();
            if parts.len() == 3 {
                if let (Ok(a), Ok(b), Ok(c)) =
                    (parts[0].parse(), parts[1].parse(), parts[2].parse())
                {
                    return Some((a, b, c));
                }
            }
        }
        None
    }

    /// Build the CLI command with arguments, per the argument construction
    /// table. Returns the command plus any temp files created along the way
    /// (e.g. a spilled `--agents` payload) for later cleanup.
    fn build_command(&self) -> Result<(Command, Vec<PathBuf>), ClaudeAgentError> {
        let cli_path = self.find_cli()?;
        let mut cmd = Command::new(&cli_path);
        let mut temp_files = Vec::new();

        if let Some(ref cwd) = self.options.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &self.options.env {
            cmd.env(key, value);
        }

        cmd.env("CLAUDE_CODE_ENTRYPOINT", SDK_ENTRYPOINT);
        cmd.env("CLAUDE_AGENT_SDK_VERSION", SDK_VERSION);
        if self.options.enable_file_checkpointing {
            cmd.env("CLAUDE_CODE_ENABLE_SDK_FILE_CHECKPOINTING", "true");
        }
        if let Ok(pwd) = std::env::current_dir() {
            cmd.env("PWD", pwd);
        }

        cmd.arg("--output-format").arg("stream-json");
        cmd.arg("--verbose");

        match &self.options.system_prompt {
            None => {
                cmd.arg("--system-prompt").arg("");
            },
            Some(SystemPromptConfig::Text(text)) => {
                cmd.arg("--system-prompt").arg(text);
            },
            Some(SystemPromptConfig::Preset(SystemPromptPreset::Preset { append, .. })) => {
                if let Some(append_text) = append.as_ref().filter(|a| !a.is_empty()) {
                    cmd.arg("--append-system-prompt").arg(append_text);
                }
            },
        }

        if let Some(ref tools) = self.options.tools {
            match tools {
                ToolsConfig::List(list) => {
                    cmd.arg("--tools").arg(list.join(","));
                },
                ToolsConfig::Preset(_) => {
                    cmd.arg("--tools").arg("default");
                },
            }
        }

        cmd.arg("--allowedTools").arg(self.options.allowed_tools.join(","));
        cmd.arg("--disallowedTools").arg(self.options.disallowed_tools.join(","));
        cmd.arg("--betas").arg(self.options.betas.join(","));

        for dir in &self.options.add_dirs {
            cmd.arg("--add-dir").arg(dir);
        }

        let setting_sources = self
            .options
            .setting_sources
            .as_ref()
            .map(|sources| {
                sources
                    .iter()
                    .map(|s| serde_json::to_value(s).ok().and_then(|v| v.as_str().map(String::from)))
                    .collect::<Option<Vec<_>>>()
                    .unwrap_or_default()
                    .join(",")
            })
            .unwrap_or_default();
        cmd.arg("--setting-sources").arg(setting_sources);

        if let Some(turns) = self.options.max_turns {
            cmd.arg("--max-turns").arg(turns.to_string());
        }
        if let Some(tokens) = self.options.max_thinking_tokens {
            cmd.arg("--max-thinking-tokens").arg(tokens.to_string());
        }
        if let Some(budget) = self.options.max_budget_usd {
            cmd.arg("--max-budget-usd").arg(format!("{}", budget));
        }

        if let Some(ref model) = self.options.model {
            cmd.arg("--model").arg(model);
        }
        if let Some(ref fallback) = self.options.fallback_model {
            cmd.arg("--fallback-model").arg(fallback);
        }
        if let Some(ref tool_name) = self.options.permission_prompt_tool_name {
            cmd.arg("--permission-prompt-tool").arg(tool_name);
        }
        if let Some(ref mode) = self.options.permission_mode {
            cmd.arg("--permission-mode").arg(mode.to_string());
        }
        if let Some(ref resume) = self.options.resume {
            cmd.arg("--resume").arg(resume);
        }

        if self.options.continue_conversation {
            cmd.arg("--continue");
        }
        if self.options.fork_session {
            cmd.arg("--fork-session");
        }
        if self.options.include_partial_messages {
            cmd.arg("--include-partial-messages");
        }

        match &self.options.mcp_servers {
            Some(McpServersConfig::Map(map)) if !map.is_empty() => {
                let config = serde_json::json!({ "mcpServers": map });
                cmd.arg("--mcp-config").arg(config.to_string());
            },
            Some(McpServersConfig::Path(path)) => {
                cmd.arg("--mcp-config").arg(path);
            },
            _ => {},
        }

        if let Some(settings) = self.build_settings()? {
            cmd.arg("--settings").arg(settings);
        }

        if let Some(ref agents) = self.options.agents {
            let serialised = serde_json::to_string(agents)
                .map_err(|e| ClaudeAgentError::Config(format!("failed to serialise agents: {}", e)))?;
            let candidate_len = cli_path.as_os_str().len() + serialised.len();
            if candidate_len > AGENTS_INLINE_LIMIT {
                let path = std::env::temp_dir()
                    .join(format!("claude-agent-sdk-agents-{}.json", uuid::Uuid::new_v4()));
                std::fs::write(&path, &serialised)
                    .map_err(|e| ClaudeAgentError::Config(format!("failed to write agents temp file: {}", e)))?;
                cmd.arg("--agents").arg(format!("@{}", path.display()));
                temp_files.push(path);
            } else {
                cmd.arg("--agents").arg(serialised);
            }
        }

        for plugin in &self.options.plugins {
            if let PluginConfig::Local { path } = plugin {
                cmd.arg("--plugin-dir").arg(path);
            }
        }

        if let Some(OutputFormatConfig::JsonSchema { schema }) = &self.options.output_format {
            cmd.arg("--json-schema").arg(schema.to_string());
        }

        for (flag, value) in &self.options.extra_args {
            let flag_str = if flag.starts_with("--") { flag.clone() } else { format!("--{}", flag) };
            cmd.arg(flag_str);
            if let Some(v) = value {
                cmd.arg(v);
            }
        }

        if self.streaming {
            cmd.arg("--input-format").arg("stream-json");
        } else {
            cmd.arg("--print").arg("--");
            cmd.arg(self.prompt.as_deref().unwrap_or_default());
        }

        cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());

        Ok((cmd, temp_files))
    }

    /// Compose `settings` and `sandbox` into a single `--settings` payload.
    ///
    /// Neither set → omit. Only `settings` → pass through. Both → parse
    /// `settings` as inline JSON if it looks like an object, else treat it as
    /// a file path (falling back to an empty object on read failure), merge
    /// `sandbox` under the `sandbox` key, and re-serialise.
    fn build_settings(&self) -> Result<Option<String>, ClaudeAgentError> {
        let sandbox = match &self.options.sandbox {
            None => return Ok(self.options.settings.clone()),
            Some(sandbox) => sandbox,
        };

        let mut base: serde_json::Value = match &self.options.settings {
            None => serde_json::json!({}),
            Some(settings) => {
                let trimmed = settings.trim();
                if trimmed.starts_with('{') && trimmed.ends_with('}') {
                    serde_json::from_str(trimmed).unwrap_or_else(|_| serde_json::json!({}))
                } else {
                    std::fs::read_to_string(settings)
                        .ok()
                        .and_then(|text| serde_json::from_str(&text).ok())
                        .unwrap_or_else(|| serde_json::json!({}))
                }
            },
        };

        let sandbox_value = serde_json::to_value(sandbox)
            .map_err(|e| ClaudeAgentError::Config(format!("failed to serialise sandbox settings: {}", e)))?;
        if let Some(map) = base.as_object_mut() {
            map.insert("sandbox".to_string(), sandbox_value);
        }

        Ok(Some(base.to_string()))
    }

    fn record_sticky_error(&self, err: ClaudeAgentError) -> ClaudeAgentError {
        self.ready.store(false, Ordering::SeqCst);
        *self.sticky_error.lock().unwrap() = Some(err.clone());
        err
    }
}

#[async_trait]
impl Transport for SubprocessTransport {
    async fn connect(&mut self) -> Result<(), ClaudeAgentError> {
        if self.ready.load(Ordering::SeqCst) {
            return Ok(());
        }

        const CONNECT_TIMEOUT_SECS: u64 = 30;
        tokio::time::timeout(tokio::time::Duration::from_secs(CONNECT_TIMEOUT_SECS), async {
            let cli_path = self.find_cli()?;
            Self::check_version(&cli_path).await;

            let (mut cmd, temp_files) = self.build_command()?;
            self.temp_files = temp_files;

            let mut child = cmd.spawn().map_err(|e| {
                ClaudeAgentError::CLIConnection(format!("failed to spawn CLI process: {}", e))
            })?;

            let stdin = child
                .stdin
                .take()
                .ok_or_else(|| ClaudeAgentError::CLIConnection("failed to get stdin handle".to_string()))?;
            self.stdin = Some(Arc::new(Mutex::new(stdin)));

            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| ClaudeAgentError::CLIConnection("failed to get stdout handle".to_string()))?;
            let stderr = child.stderr.take();

            const BROADCAST_CHANNEL_CAPACITY: usize = 1000;
            let (tx, _) = tokio::sync::broadcast::channel(BROADCAST_CHANNEL_CAPACITY);
            self.inbox = Some(tx.clone());

            let max_buffer_size =
                self.options.max_buffer_size.unwrap_or(crate::reader::DEFAULT_BUFFER_SIZE);
            let reader_abort_handle = tokio::spawn(async move {
                use crate::reader::MessageReader;
                use futures::StreamExt;

                let reader = MessageReader::with_capacity(stdout, max_buffer_size);
                let mut stream = Box::pin(reader);

                while let Some(msg_res) = stream.next().await {
                    if let Err(ref e) = msg_res {
                        tracing::warn!(error = %e, "error framing agent stdout");
                    }
                    let _ = tx.send(msg_res);
                }
            })
            .abort_handle();
            self.reader_abort_handle = Some(reader_abort_handle);

            if let Some(stderr) = stderr {
                let callback = self.stderr_callback.clone();
                let stderr_abort_handle = tokio::spawn(async move {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        match &callback {
                            Some(cb) => cb(line),
                            None => tracing::warn!(line = %line, "agent stderr"),
                        }
                    }
                })
                .abort_handle();
                self.stderr_abort_handle = Some(stderr_abort_handle);
            }

            if !self.streaming {
                self.stdin = None;
            }

            self.process = Some(child);
            self.ready.store(true, Ordering::SeqCst);

            Ok::<(), ClaudeAgentError>(())
        })
        .await
        .map_err(|_| {
            ClaudeAgentError::CLIConnection(format!(
                "connection timed out after {} seconds",
                CONNECT_TIMEOUT_SECS
            ))
        })?
    }

    async fn write(&self, data: &str) -> Result<(), ClaudeAgentError> {
        if !self.ready.load(Ordering::SeqCst) {
            if let Some(err) = self.sticky_error.lock().unwrap().clone() {
                return Err(err);
            }
            return Err(ClaudeAgentError::NotReady);
        }

        let stdin = self.stdin.as_ref().ok_or(ClaudeAgentError::NotReady)?;
        let mut guard = stdin.lock().await;

        let result = async {
            guard.write_all(data.as_bytes()).await?;
            guard.write_all(b"\n").await?;
            guard.flush().await?;
            Ok::<(), std::io::Error>(())
        }
        .await;

        match result {
            Ok(()) => {
                tracing::debug!(bytes = data.len(), "wrote record to agent stdin");
                Ok(())
            },
            Err(e) => Err(self.record_sticky_error(ClaudeAgentError::IOError(e.to_string()))),
        }
    }

    async fn read_messages(&self) -> BoxStream<'_, Result<serde_json::Value, ClaudeAgentError>> {
        use futures::StreamExt;
        use tokio_stream::wrappers::BroadcastStream;

        match &self.inbox {
            Some(tx) => {
                let rx = tx.subscribe();
                let stream = BroadcastStream::new(rx);
                Box::pin(stream.map(|item| match item {
                    Ok(payload) => payload,
                    Err(e) => Err(ClaudeAgentError::Transport(format!("broadcast lagged: {}", e))),
                }))
            },
            None => Box::pin(stream::once(async { Err(ClaudeAgentError::NotReady) })),
        }
    }

    async fn close(&mut self) -> Result<(), ClaudeAgentError> {
        self.ready.store(false, Ordering::SeqCst);

        for path in self.temp_files.drain(..) {
            let _ = std::fs::remove_file(path);
        }

        if let Some(abort_handle) = self.reader_abort_handle.take() {
            abort_handle.abort();
        }
        if let Some(abort_handle) = self.stderr_abort_handle.take() {
            abort_handle.abort();
        }

        self.stdin = None;

        if let Some(mut process) = self.process.take() {
            let _ = process.start_kill();
            process
                .wait()
                .await
                .map_err(|e| ClaudeAgentError::Process(format!("failed to wait for process exit: {}", e)))?;
        }

        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn end_input(&self) -> Result<(), ClaudeAgentError> {
        if self.input_ended.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Some(stdin) = self.stdin.as_ref() {
            let mut guard = stdin.lock().await;
            guard.shutdown().await.map_err(ClaudeAgentError::from)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claude_agent_types::config::{PermissionMode, SandboxSettings, SettingSource, SystemPromptConfig, SystemPromptPreset};
    use serde_json::json;
    use std::collections::HashMap;
    use std::fs::{self, File};
    use std::io::Write;

    fn dummy_cli_path() -> &'static std::path::PathBuf {
        static PATH: std::sync::OnceLock<std::path::PathBuf> = std::sync::OnceLock::new();
        PATH.get_or_init(|| {
            let mut temp_dir = std::env::temp_dir();
            temp_dir.push("dummy_claude_cli_subprocess_test");
            let file_path = temp_dir;

            let mut file = File::create(&file_path).expect("failed to create dummy CLI");
            writeln!(file, "#!/bin/sh").expect("failed to write shebang");
            writeln!(file, "exit 0").expect("failed to write exit");

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = fs::metadata(&file_path).expect("metadata failed").permissions();
                perms.set_mode(0o755);
                fs::set_permissions(&file_path, perms).expect("set_permissions failed");
            }

            file_path
        })
    }

    fn make_options() -> ClaudeAgentOptions {
        let mut options = ClaudeAgentOptions { ..Default::default() };
        options.cli_path = Some(dummy_cli_path().clone());
        options
    }

    fn build(options: ClaudeAgentOptions, streaming: bool, prompt: Option<&str>) -> String {
        let transport = SubprocessTransport::new(prompt.map(String::from), streaming, options);
        let (cmd, _) = transport.build_command().expect("failed to build command");
        format!("{:?}", cmd)
    }

    #[test]
    fn basic_streaming_command() {
        let cmd_str = build(make_options(), true, Some("Hello"));
        assert!(cmd_str.contains("--output-format"));
        assert!(cmd_str.contains("stream-json"));
        assert!(cmd_str.contains("--input-format"));
    }

    #[test]
    fn non_streaming_uses_print() {
        let cmd_str = build(make_options(), false, Some("2+2?"));
        assert!(cmd_str.contains("--print"));
        assert!(cmd_str.contains("2+2?"));
        assert!(!cmd_str.contains("--input-format"));
    }

    #[test]
    fn system_prompt_text() {
        let mut options = make_options();
        options.system_prompt = Some(SystemPromptConfig::Text("Be helpful".to_string()));
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--system-prompt"));
        assert!(cmd_str.contains("Be helpful"));
    }

    #[test]
    fn system_prompt_preset_without_append_emits_nothing() {
        let mut options = make_options();
        options.system_prompt = Some(SystemPromptConfig::Preset(SystemPromptPreset::Preset {
            preset: "claude_code".to_string(),
            append: None,
        }));
        let cmd_str = build(options, true, None);
        assert!(!cmd_str.contains("--system-prompt"));
        assert!(!cmd_str.contains("--append-system-prompt"));
    }

    #[test]
    fn system_prompt_preset_with_append() {
        let mut options = make_options();
        options.system_prompt = Some(SystemPromptConfig::Preset(SystemPromptPreset::Preset {
            preset: "claude_code".to_string(),
            append: Some("Be concise.".to_string()),
        }));
        let cmd_str = build(options, true, None);
        assert!(!cmd_str.contains("--system-prompt"));
        assert!(cmd_str.contains("--append-system-prompt"));
        assert!(cmd_str.contains("Be concise."));
    }

    #[test]
    fn tools_and_limits() {
        let mut options = make_options();
        options.allowed_tools = vec!["Read".to_string(), "Write".to_string()];
        options.disallowed_tools = vec!["Bash".to_string()];
        options.model = Some("claude-sonnet-4-5".to_string());
        options.permission_mode = Some(PermissionMode::AcceptEdits);
        options.max_turns = Some(5);

        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--allowedTools"));
        assert!(cmd_str.contains("Read,Write"));
        assert!(cmd_str.contains("--disallowedTools"));
        assert!(cmd_str.contains("Bash"));
        assert!(cmd_str.contains("--model"));
        assert!(cmd_str.contains("claude-sonnet-4-5"));
        assert!(cmd_str.contains("--permission-mode"));
        assert!(cmd_str.contains("acceptEdits"));
        assert!(cmd_str.contains("--max-turns"));
        assert!(cmd_str.contains('5'));
    }

    #[test]
    fn fallback_model() {
        let mut options = make_options();
        options.model = Some("opus".to_string());
        options.fallback_model = Some("sonnet".to_string());
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--fallback-model"));
        assert!(cmd_str.contains("sonnet"));
    }

    #[test]
    fn max_thinking_tokens_and_budget() {
        let mut options = make_options();
        options.max_thinking_tokens = Some(5000);
        options.max_budget_usd = Some(1.5);
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--max-thinking-tokens"));
        assert!(cmd_str.contains("5000"));
        assert!(cmd_str.contains("--max-budget-usd"));
        assert!(cmd_str.contains("1.5"));
    }

    #[test]
    fn add_dirs_and_setting_sources() {
        let mut options = make_options();
        options.add_dirs = vec![PathBuf::from("/path/to/dir1"), PathBuf::from("/path/to/dir2")];
        options.setting_sources = Some(vec![SettingSource::User, SettingSource::Project]);
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--add-dir"));
        assert!(cmd_str.contains("/path/to/dir1"));
        assert!(cmd_str.contains("/path/to/dir2"));
        assert!(cmd_str.contains("--setting-sources"));
    }

    #[test]
    fn session_continuation() {
        let mut options = make_options();
        options.continue_conversation = true;
        options.resume = Some("session-123".to_string());
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--continue"));
        assert!(cmd_str.contains("--resume"));
        assert!(cmd_str.contains("session-123"));
    }

    #[test]
    fn settings_file_only() {
        let mut options = make_options();
        options.settings = Some("/path/to/settings.json".to_string());
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--settings"));
        assert!(cmd_str.contains("/path/to/settings.json"));
    }

    #[test]
    fn settings_and_sandbox_merge_inline_json() {
        let mut options = make_options();
        options.settings = Some(r#"{"theme":"dark"}"#.to_string());
        options.sandbox = Some(SandboxSettings { enabled: true, ..Default::default() });
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--settings"));
        assert!(cmd_str.contains("theme"));
        assert!(cmd_str.contains("sandbox"));
    }

    #[test]
    fn extra_args() {
        let mut options = make_options();
        let mut extra = HashMap::new();
        extra.insert("new-flag".to_string(), Some("value".to_string()));
        extra.insert("boolean-flag".to_string(), None);
        options.extra_args = extra;
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--new-flag"));
        assert!(cmd_str.contains("value"));
        assert!(cmd_str.contains("--boolean-flag"));
    }

    #[test]
    fn mcp_servers_map() {
        let mut options = make_options();
        let mut servers = HashMap::new();
        servers.insert("test-server".to_string(), json!({"command": "test-cmd", "args": ["arg1"]}));
        options.mcp_servers = Some(McpServersConfig::Map(servers));
        let cmd_str = build(options, true, None);
        assert!(cmd_str.contains("--mcp-config"));
        assert!(cmd_str.contains("mcpServers"));
        assert!(cmd_str.contains("test-server"));
        assert!(cmd_str.contains("test-cmd"));
    }

    #[test]
    fn extract_version_parses_triple() {
        assert_eq!(SubprocessTransport::extract_version("claude 2.3.1"), Some((2, 3, 1)));
        assert_eq!(SubprocessTransport::extract_version("no version here"), None);
    }
}
