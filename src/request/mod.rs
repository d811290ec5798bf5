//! Request model
//!
//! Provides the intermediate request description produced by the curl and
//! fetch parsers and consumed by code generation and execution.

mod data;

pub use data::{insert_header, Headers, RequestData};
