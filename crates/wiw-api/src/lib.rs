//! When I Work REST API client.
//!
//! One generic authenticated request primitive ([`WhenIWorkClient::request`])
//! plus thin per-resource wrappers that only pick a path and an HTTP verb.

mod client;
mod credentials;
mod query;
mod resources;

pub use client::{RequestOptions, WhenIWorkClient};
pub use credentials::{Credentials, DEFAULT_BASE_URL};
pub use query::{Params, query_string};
