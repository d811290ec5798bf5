//! convert-to-requests library interface
//!
//! Converts requests copied from a browser's developer tools ("copy as
//! cURL", "copy as fetch") into Python `requests` code, or executes them.
//!
//! # Module Organization
//!
//! - [`import`] - curl and fetch parsers producing a [`request::RequestData`]
//! - [`codegen`] - Python code generation
//! - [`client`] - request execution
//! - [`errors`] - Error types (ConvertError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Main execution logic

pub mod cli;
pub mod client;
pub mod codegen;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod http;
pub mod import;
pub mod mime;
pub mod request;
pub mod status;
pub mod strings;
