//! Tool registry for name-based dispatch.

use std::collections::HashMap;

use serde_json::Value;
use wiw_api::WhenIWorkClient;
use wiw_types::{ToolDefinition, ToolError};

use crate::args::ToolArgs;
use crate::catalog::Operation;

/// Immutable lookup table from tool name to [`Operation`], built once at
/// startup.
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
    operations: HashMap<&'static str, Operation>,
}

impl ToolRegistry {
    /// Create a registry holding the full catalogue.
    pub fn new() -> Self {
        Self {
            definitions: Operation::ALL.iter().map(|op| op.definition()).collect(),
            operations: Operation::ALL.iter().map(|op| (op.name(), *op)).collect(),
        }
    }

    /// All tool definitions, in discovery order.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Resolve a tool name.
    pub fn lookup(&self, name: &str) -> Result<Operation, ToolError> {
        self.operations
            .get(name)
            .copied()
            .ok_or_else(|| ToolError::UnknownTool {
                name: name.to_string(),
            })
    }

    /// Check if a tool exists by name.
    pub fn has_tool(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Execute a tool by name with the given argument bag.
    ///
    /// The name is resolved before anything touches the network, so an
    /// unknown tool makes no call. The client then logs in if it holds no
    /// token yet (see [`WhenIWorkClient::authenticate`]) and runs the
    /// operation.
    pub async fn dispatch(
        &self,
        client: &WhenIWorkClient,
        name: &str,
        arguments: Value,
    ) -> Result<Value, ToolError> {
        let operation = self.lookup(name)?;
        client.authenticate().await?;
        tracing::debug!("Dispatching tool {name}");
        Ok(operation.invoke(client, &ToolArgs::from_value(arguments)).await?)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiw_api::Credentials;
    use wiw_types::{ApiError, ConfigError};

    fn offline_client() -> WhenIWorkClient {
        WhenIWorkClient::new(
            Credentials::new("k")
                .with_token("t")
                .with_base_url("http://127.0.0.1:9"),
        )
        .unwrap()
    }

    #[test]
    fn definitions_follow_catalogue_order() {
        let registry = ToolRegistry::new();
        let names: Vec<&str> = registry
            .definitions()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names.len(), 38);
        assert_eq!(names[0], "list_users");
        assert_eq!(names[21], "clock_in");
        assert_eq!(names[27], "cancel_request");
        assert_eq!(names[37], "send_message");
    }

    #[test]
    fn lookup_known_and_unknown() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.lookup("clock_out").unwrap(), Operation::ClockOut);
        assert!(registry.has_tool("get_payroll"));
        assert!(!registry.has_tool("delete_account"));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), Operation::ALL.len());
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_names_it() {
        let registry = ToolRegistry::new();
        let err = registry
            .dispatch(&offline_client(), "nonexistent_tool", json!({}))
            .await
            .unwrap_err();
        match err {
            ToolError::UnknownTool { name } => assert_eq!(name, "nonexistent_tool"),
            other => panic!("Expected UnknownTool, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dispatch_without_any_credentials_fails_before_the_request() {
        let registry = ToolRegistry::new();
        let client = WhenIWorkClient::new(Credentials::new("k").with_base_url("http://127.0.0.1:9"))
            .unwrap();
        let err = registry
            .dispatch(&client, "list_users", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Api(ApiError::Config(ConfigError::MissingCredentials))
        ));
    }
}
