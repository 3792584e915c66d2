//! Tool permission callback example - Custom permission logic.

use claude_agent_api::ClaudeAgentClient;
use claude_agent_core::PermissionCallback;
use claude_agent_types::hooks::PermissionResult;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let client = ClaudeAgentClient::new(None);

    // Create a custom permission callback
    let callback: PermissionCallback = Arc::new(|tool_name, input, _ctx| {
        Box::pin(async move {
            println!("Permission check for tool: {}", tool_name);
            println!("Input: {:?}", input);

            // Example: deny destructive operations
            if tool_name.contains("Delete") || tool_name.contains("Remove") {
                return Ok(PermissionResult::Deny {
                    message: "Destructive operations are not allowed".to_string(),
                    interrupt: false,
                });
            }

            // Allow all other operations
            Ok(PermissionResult::Allow { updated_input: None, updated_permissions: None })
        })
    });

    client.set_permission_callback(callback).await;

    println!("Permission handler configured");
    println!("Destructive tools (Delete, Remove) will be denied");
    println!("All other tools will be allowed");
}
