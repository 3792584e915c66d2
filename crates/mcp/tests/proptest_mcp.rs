//! Property-based tests for MCP types using proptest.

use proptest::prelude::*;
use serde_json::json;

use claude_agent_mcp::manager::ToolInfo;

proptest! {
    /// Test that ToolInfo serialization round-trips correctly.
    #[test]
    fn test_tool_info_roundtrip(
        name in "[a-z_][a-z0-9_]{0,30}",
        description in prop::option::of("[a-zA-Z0-9 ,.!?]{0,100}")
    ) {
        let tool = ToolInfo {
            name: name.clone(),
            description: description.clone(),
            input_schema: json!({"type": "object"}),
        };

        let json_str = serde_json::to_string(&tool).unwrap();
        let deserialized: ToolInfo = serde_json::from_str(&json_str).unwrap();

        prop_assert_eq!(deserialized.name, name);
        prop_assert_eq!(deserialized.description, description);
    }

    /// Test that JSON serialization never panics for valid inputs.
    #[test]
    fn test_json_serialization_no_panic(
        key in "[a-z]{1,20}",
        value in "[a-zA-Z0-9]{0,50}"
    ) {
        let obj = json!({
            key: value
        });

        let _ = obj.to_string();
        prop_assert!(true);
    }

    /// Test that tool names have valid format.
    #[test]
    fn test_tool_name_format(name in "[a-z_][a-z0-9_]{0,30}") {
        // Tool names should start with a letter or underscore
        prop_assert!(name.starts_with(|c: char| c.is_ascii_lowercase() || c == '_'));

        // Tool names should only contain alphanumeric and underscore
        prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}
