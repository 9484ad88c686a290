//! Tool descriptor and tool output types.

use serde::{Deserialize, Serialize};

/// A tool advertised to the calling agent: name, description, input schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Result of a tool invocation, shaped for the MCP `tools/call` response.
///
/// Failures are reported in-band as `Error: ...` text; there is no separate
/// error flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ToolOutputContent>,
}

/// A single piece of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolOutputContent {
    Text { text: String },
}

impl ToolOutput {
    /// Create a text output.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolOutputContent::Text { text: text.into() }],
        }
    }

    /// Create an error output, prefixed with `Error: `.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::text(format!("Error: {message}"))
    }

    /// Render a JSON result: strings verbatim, anything else pretty-printed.
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::text(s.clone()),
            other => Self::text(
                serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
            ),
        }
    }

    /// The concatenated text of all content blocks.
    pub fn as_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolOutputContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn definition_serializes_input_schema_in_camel_case() {
        let def = ToolDefinition {
            name: "get_account".into(),
            description: "Get account".into(),
            input_schema: json!({"type": "object", "properties": {}}),
        };
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["inputSchema"]["type"], "object");
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn output_serializes_as_text_content() {
        let value = serde_json::to_value(ToolOutput::text("hi")).unwrap();
        assert_eq!(value, json!({"content": [{"type": "text", "text": "hi"}]}));
    }

    #[test]
    fn error_output_is_prefixed() {
        let out = ToolOutput::error("Unknown tool: nope");
        assert_eq!(out.as_text(), "Error: Unknown tool: nope");
    }

    #[test]
    fn from_value_pretty_prints_objects() {
        let out = ToolOutput::from_value(&json!({"user": {"id": 1}}));
        assert_eq!(out.as_text(), "{\n  \"user\": {\n    \"id\": 1\n  }\n}");
    }

    #[test]
    fn from_value_keeps_strings_verbatim() {
        let out = ToolOutput::from_value(&json!("plain"));
        assert_eq!(out.as_text(), "plain");
    }
}
