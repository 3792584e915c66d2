//! Type definitions for Claude Agent SDK.

pub mod config;
pub mod error;
pub mod hooks;
pub mod message;

pub use config::ClaudeAgentOptions;
pub use error::{ClaudeAgentError, Result};
pub use message::{Message, MessageContent};
