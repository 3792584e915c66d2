//! Hook and permission wire types.
//!
//! `HookInput` models the seven tagged variants the agent sends in a
//! `hook_callback` control request (dispatch on `hook_event_name`).
//! `HookOutput` is the Rust-side value a hook callback returns; its `to_json`
//! method encodes the exact wire shape the agent expects, including the
//! `async: true` short-circuit and the `hookSpecificOutput` nesting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum HookEvent {
    PreToolUse,
    PostToolUse,
    PostToolUseFailure,
    UserPromptSubmit,
    Stop,
    SubagentStop,
    PreCompact,
}

impl HookEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::PostToolUseFailure => "PostToolUseFailure",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::Stop => "Stop",
            Self::SubagentStop => "SubagentStop",
            Self::PreCompact => "PreCompact",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookMatcher {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

/// Fields common to every hook input variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookInputBase {
    pub session_id: String,
    pub transcript_path: String,
    pub cwd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_mode: Option<String>,
}

/// The seven hook input shapes, dispatched on `hook_event_name`.
///
/// Unknown `hook_event_name` values fail to deserialize, which is the
/// decoder-error behaviour the agent-initiated hook callback dispatch expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "hook_event_name")]
pub enum HookInput {
    PreToolUse {
        #[serde(flatten)]
        base: HookInputBase,
        tool_name: String,
        tool_input: serde_json::Value,
    },
    PostToolUse {
        #[serde(flatten)]
        base: HookInputBase,
        tool_name: String,
        tool_input: serde_json::Value,
        tool_response: serde_json::Value,
    },
    PostToolUseFailure {
        #[serde(flatten)]
        base: HookInputBase,
        tool_name: String,
        tool_input: serde_json::Value,
        error: String,
    },
    UserPromptSubmit {
        #[serde(flatten)]
        base: HookInputBase,
        prompt: String,
    },
    Stop {
        #[serde(flatten)]
        base: HookInputBase,
        #[serde(default)]
        stop_hook_active: bool,
    },
    SubagentStop {
        #[serde(flatten)]
        base: HookInputBase,
        #[serde(default)]
        stop_hook_active: bool,
    },
    PreCompact {
        #[serde(flatten)]
        base: HookInputBase,
        trigger: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        custom_instructions: Option<String>,
    },
}

impl HookInput {
    pub fn event(&self) -> HookEvent {
        match self {
            Self::PreToolUse { .. } => HookEvent::PreToolUse,
            Self::PostToolUse { .. } => HookEvent::PostToolUse,
            Self::PostToolUseFailure { .. } => HookEvent::PostToolUseFailure,
            Self::UserPromptSubmit { .. } => HookEvent::UserPromptSubmit,
            Self::Stop { .. } => HookEvent::Stop,
            Self::SubagentStop { .. } => HookEvent::SubagentStop,
            Self::PreCompact { .. } => HookEvent::PreCompact,
        }
    }

    pub fn base(&self) -> &HookInputBase {
        match self {
            Self::PreToolUse { base, .. }
            | Self::PostToolUse { base, .. }
            | Self::PostToolUseFailure { base, .. }
            | Self::UserPromptSubmit { base, .. }
            | Self::Stop { base, .. }
            | Self::SubagentStop { base, .. }
            | Self::PreCompact { base, .. } => base,
        }
    }

    /// Tool name for the events that carry one, used by matcher application.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Self::PreToolUse { tool_name, .. }
            | Self::PostToolUse { tool_name, .. }
            | Self::PostToolUseFailure { tool_name, .. } => Some(tool_name),
            _ => None,
        }
    }
}

/// Hook-specific fields nested under `hookSpecificOutput` on the wire.
#[derive(Debug, Clone, Default)]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub permission_decision: Option<String>,
    pub updated_input: Option<serde_json::Value>,
    pub additional_context: Option<String>,
}

/// The value a registered hook callback returns.
///
/// `async_` short-circuits every other field: see `to_json`.
#[derive(Debug, Clone, Default)]
pub struct HookOutput {
    pub async_: bool,
    pub async_timeout: Option<u64>,
    pub continue_: Option<bool>,
    pub suppress_output: Option<bool>,
    pub stop_reason: Option<String>,
    pub decision: Option<String>,
    pub system_message: Option<String>,
    pub reason: Option<String>,
    pub hook_specific_output: Option<HookSpecificOutput>,
}

impl HookOutput {
    /// Encodes `async: true` (plus optional `asyncTimeout`) and nothing else
    /// when `async_` is set; otherwise the present scalar fields plus an
    /// optional `hookSpecificOutput` object.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();

        if self.async_ {
            map.insert("async".into(), serde_json::Value::Bool(true));
            if let Some(timeout) = self.async_timeout {
                map.insert("asyncTimeout".into(), serde_json::json!(timeout));
            }
            return serde_json::Value::Object(map);
        }

        if let Some(c) = self.continue_ {
            map.insert("continue".into(), serde_json::Value::Bool(c));
        }
        if let Some(s) = self.suppress_output {
            map.insert("suppressOutput".into(), serde_json::Value::Bool(s));
        }
        if let Some(ref r) = self.stop_reason {
            map.insert("stopReason".into(), serde_json::json!(r));
        }
        if let Some(ref d) = self.decision {
            map.insert("decision".into(), serde_json::json!(d));
        }
        if let Some(ref m) = self.system_message {
            map.insert("systemMessage".into(), serde_json::json!(m));
        }
        if let Some(ref r) = self.reason {
            map.insert("reason".into(), serde_json::json!(r));
        }
        if let Some(ref hso) = self.hook_specific_output {
            let mut inner = serde_json::Map::new();
            inner.insert("hookEventName".into(), serde_json::json!(hso.hook_event_name));
            if let Some(ref pd) = hso.permission_decision {
                inner.insert("permissionDecision".into(), serde_json::json!(pd));
            }
            if let Some(ref ui) = hso.updated_input {
                inner.insert("updatedInput".into(), ui.clone());
            }
            if let Some(ref ac) = hso.additional_context {
                inner.insert("additionalContext".into(), serde_json::json!(ac));
            }
            map.insert("hookSpecificOutput".into(), serde_json::Value::Object(inner));
        }

        serde_json::Value::Object(map)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionUpdate {
    #[serde(rename = "type")]
    pub update_type: PermissionUpdateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<PermissionRuleValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<PermissionBehavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PermissionUpdateDestination>,
}

impl PermissionUpdate {
    pub fn add_rules(
        rules: Vec<PermissionRuleValue>,
        behavior: PermissionBehavior,
        destination: Option<PermissionUpdateDestination>,
    ) -> Self {
        Self {
            update_type: PermissionUpdateType::AddRules,
            rules: Some(rules),
            behavior: Some(behavior),
            mode: None,
            directories: None,
            destination,
        }
    }

    pub fn replace_rules(
        rules: Vec<PermissionRuleValue>,
        behavior: PermissionBehavior,
        destination: Option<PermissionUpdateDestination>,
    ) -> Self {
        Self {
            update_type: PermissionUpdateType::ReplaceRules,
            rules: Some(rules),
            behavior: Some(behavior),
            mode: None,
            directories: None,
            destination,
        }
    }

    pub fn remove_rules(
        rules: Vec<PermissionRuleValue>,
        behavior: PermissionBehavior,
        destination: Option<PermissionUpdateDestination>,
    ) -> Self {
        Self {
            update_type: PermissionUpdateType::RemoveRules,
            rules: Some(rules),
            behavior: Some(behavior),
            mode: None,
            directories: None,
            destination,
        }
    }

    pub fn set_mode(mode: String, destination: Option<PermissionUpdateDestination>) -> Self {
        Self {
            update_type: PermissionUpdateType::SetMode,
            rules: None,
            behavior: None,
            mode: Some(mode),
            directories: None,
            destination,
        }
    }

    pub fn add_directories(
        directories: Vec<String>,
        destination: Option<PermissionUpdateDestination>,
    ) -> Self {
        Self {
            update_type: PermissionUpdateType::AddDirectories,
            rules: None,
            behavior: None,
            mode: None,
            directories: Some(directories),
            destination,
        }
    }

    pub fn remove_directories(
        directories: Vec<String>,
        destination: Option<PermissionUpdateDestination>,
    ) -> Self {
        Self {
            update_type: PermissionUpdateType::RemoveDirectories,
            rules: None,
            behavior: None,
            mode: None,
            directories: Some(directories),
            destination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PermissionUpdateType {
    AddRules,
    ReplaceRules,
    RemoveRules,
    SetMode,
    AddDirectories,
    RemoveDirectories,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRuleValue {
    pub tool_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PermissionBehavior {
    Allow,
    Deny,
    Ask,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PermissionUpdateDestination {
    UserSettings,
    ProjectSettings,
    LocalSettings,
    Session,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPermissionContext {
    #[serde(default)]
    pub suggestions: Vec<PermissionUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "behavior", rename_all = "camelCase")]
pub enum PermissionResult {
    #[serde(rename = "allow")]
    Allow {
        #[serde(skip_serializing_if = "Option::is_none")]
        updated_input: Option<HashMap<String, serde_json::Value>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        updated_permissions: Option<Vec<PermissionUpdate>>,
    },
    #[serde(rename = "deny")]
    Deny {
        #[serde(default)]
        message: String,
        #[serde(default)]
        interrupt: bool,
    },
}
