//! HTTP client functionality

pub mod http;

// Re-exports
pub use http::{describe_request, execute, ExecOptions, Response, USER_AGENT_STRING};
