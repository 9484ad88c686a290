//! Argument extraction from a tool's loosely-typed argument bag.

use serde_json::Value;
use wiw_api::Params;

/// The argument bag of one tool call.
///
/// Nothing here validates: absent ids render as `null` and are left for the
/// remote service to reject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs(Params);

impl ToolArgs {
    /// Wrap a JSON value. Anything other than an object is an empty bag.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// The whole bag, as query parameters.
    pub fn params(&self) -> &Params {
        &self.0
    }

    /// The path segment for `key`: strings verbatim, anything else as JSON.
    pub fn id(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "null".to_string(),
        }
    }

    /// The whole bag, as a request body.
    pub fn payload(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// The bag minus `key`, as a request body. Field order is kept.
    pub fn payload_without(&self, key: &str) -> Value {
        Value::Object(
            self.0
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl From<Value> for ToolArgs {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}
