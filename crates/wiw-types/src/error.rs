//! Error hierarchy for the When I Work MCP server.

use thiserror::Error;

/// Errors from talking to the When I Work REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login was rejected, or the login response carried no token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// An authenticated call was attempted before any token was held.
    #[error("Not authenticated. Log in before making API requests")]
    NotAuthenticated,

    /// The service answered with a non-success status. `message` is the
    /// server-reported `error` field, or `API Error: <status text>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    #[error("Invalid header value for '{0}'")]
    InvalidHeader(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// HTTP status carried by the error, if the service produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from tool dispatch.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Username and password are required when no token is provided")]
    MissingCredentials,
}
