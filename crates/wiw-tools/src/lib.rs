//! Tool catalogue and name-based dispatch onto the When I Work API client.

mod args;
mod catalog;
mod registry;

pub use args::ToolArgs;
pub use catalog::Operation;
pub use registry::ToolRegistry;
