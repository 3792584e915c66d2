//! Hooks example - Implementing hook callbacks.

use claude_agent_core::{HookCallback, HookRegistry};
use claude_agent_types::hooks::{HookEvent, HookInput, HookOutput};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Create hook registry
    let registry = HookRegistry::new();

    // Register a tool execution hook
    let tool_hook: HookCallback = Arc::new(|input: HookInput, tool_use_id| {
        Box::pin(async move {
            println!("Tool execution hook triggered!");
            println!("  Tool: {:?}", input.tool_name());
            println!("  Tool use id: {:?}", tool_use_id);

            Ok(HookOutput::default())
        })
    });

    registry.register(HookEvent::PreToolUse, None, None, tool_hook).await;

    // Register a hook that only triggers for specific tools
    let write_hook: HookCallback = Arc::new(|input: HookInput, _tool_use_id| {
        Box::pin(async move {
            println!("Write/Edit operation detected: {:?}", input.tool_name());
            Ok(HookOutput {
                reason: Some("Logging write operation".to_string()),
                ..Default::default()
            })
        })
    });

    registry
        .register(HookEvent::PreToolUse, Some("Write|Edit".to_string()), None, write_hook)
        .await;

    println!("Hook registry configured, {} hooks registered", if registry.is_empty().await { 0 } else { 2 });
    println!("These would be triggered during ClaudeAgent query execution");
}
