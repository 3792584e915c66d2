//! Tool callbacks tests.

use claude_agent_core::hooks::{HookCallback, HookRegistry};
use claude_agent_types::hooks::{HookEvent, HookInput, HookInputBase, HookOutput};
use std::sync::{Arc, Mutex};

fn make_test_callback(counter: Arc<Mutex<i32>>) -> HookCallback {
    Arc::new(move |_input: HookInput, _tool_use_id: Option<String>| {
        let counter = counter.clone();
        Box::pin(async move {
            *counter.lock().unwrap() += 1;
            Ok(HookOutput { continue_: Some(true), ..Default::default() })
        })
    })
}

#[tokio::test]
async fn test_tool_execution_callback() {
    let counter = Arc::new(Mutex::new(0));
    let registry = HookRegistry::new();

    registry.register(HookEvent::PreToolUse, None, None, make_test_callback(counter.clone())).await;
    registry.assign_and_build_payload().await;

    let input = HookInput::PreToolUse {
        base: HookInputBase {
            session_id: "test".to_string(),
            transcript_path: "/tmp/test".to_string(),
            cwd: ".".to_string(),
            permission_mode: None,
        },
        tool_name: "Bash".to_string(),
        tool_input: serde_json::json!({"command": "echo hello"}),
    };

    let output = registry.dispatch("hook_0", input, None).await.unwrap();

    assert_eq!(output.continue_, Some(true));
    assert_eq!(*counter.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_tool_matcher_filter() {
    let counter = Arc::new(Mutex::new(0));
    let registry = HookRegistry::new();

    registry
        .register(HookEvent::PreToolUse, Some("Write".to_string()), None, make_test_callback(counter.clone()))
        .await;
    registry.assign_and_build_payload().await;

    let input = HookInput::PreToolUse {
        base: HookInputBase {
            session_id: "test".to_string(),
            transcript_path: "/tmp/test".to_string(),
            cwd: ".".to_string(),
            permission_mode: None,
        },
        tool_name: "Bash".to_string(), // Won't match "Write"
        tool_input: serde_json::Value::Null,
    };

    let output = registry.dispatch("hook_0", input, None).await.unwrap();

    // Should not trigger because Bash doesn't match Write
    assert_eq!(output.continue_, None);
    assert_eq!(*counter.lock().unwrap(), 0);
}
