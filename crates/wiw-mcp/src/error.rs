//! Error types for the MCP transport.

use thiserror::Error;

/// Errors that end the serve loop. Per-request faults are answered in-band.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
