//! Shared types and error hierarchy for the When I Work MCP server.

pub mod error;
pub mod tool;

pub use error::{ApiError, ConfigError, ToolError};
pub use tool::*;
