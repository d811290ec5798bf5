//! HTTP method constants and utilities

use tracing::warn;

use crate::errors::{ConvertError, Result};

/// HTTP GET method
pub const GET: &str = "GET";

/// HTTP POST method
pub const POST: &str = "POST";

/// HTTP HEAD method
pub const HEAD: &str = "HEAD";

/// Methods browsers emit in "copy as cURL" / "copy as fetch" output
pub const STANDARD_METHODS: &[&str] = &[
    GET, "OPTIONS", HEAD, POST, "PUT", "PATCH", "DELETE", "TRACE", "CONNECT",
];

/// Check if a string is a standard HTTP method
pub fn is_standard(method: &str) -> bool {
    STANDARD_METHODS.iter().any(|&m| m.eq_ignore_ascii_case(method))
}

/// Infer HTTP method based on whether the request has a body
pub fn infer(has_data: bool) -> &'static str {
    if has_data {
        POST
    } else {
        GET
    }
}

/// Uppercase a method and check it is a valid HTTP token
pub fn normalize(method: &str) -> Result<String> {
    let upper = method.trim().to_ascii_uppercase();
    if upper.is_empty() || !upper.bytes().all(is_token_byte) {
        return Err(ConvertError::InvalidMethod { method: method.to_string() });
    }
    if !is_standard(&upper) {
        warn!(method = %upper, "Non-standard HTTP method");
    }
    Ok(upper)
}

/// RFC 9110 `tchar`
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
