//! Model Context Protocol server for the When I Work tool catalogue.
//!
//! Newline-delimited JSON-RPC 2.0 over stdio.

pub mod error;
pub mod jsonrpc;
pub mod server;

pub use error::McpError;
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
