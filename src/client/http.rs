//! Request execution over HTTP
//!
//! Sends a [`RequestData`] exactly as parsed: same method, URL, headers
//! and body bytes. Only the call site lives here; connection handling,
//! TLS, redirects and content decoding are left to reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Version};
use tracing::{debug, info};

use crate::codegen::{python_bytes, python_headers};
use crate::errors::{ConvertError, Result};
use crate::mime::decode_body;
use crate::request::RequestData;

/// Sent when the request itself has no `User-Agent`
pub const USER_AGENT_STRING: &str = concat!("convert-to-requests/", env!("CARGO_PKG_VERSION"));

/// Executor toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Print the request and the response status line on stderr
    pub verbose: bool,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

/// A received response, body fully read
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub version: Version,
    /// Final URL after redirects
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    /// e.g. `HTTP/1.1 200 OK`
    pub fn status_line(&self) -> String {
        format!(
            "{:?} {} {}",
            self.version,
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string()
    }

    /// Body decoded with the charset from Content-Type (UTF-8 otherwise)
    pub fn text(&self) -> String {
        let content_type = self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        decode_body(&self.body, content_type)
    }

    /// Fail unless the status is 2xx
    pub fn raise_for_status(&self) -> Result<()> {
        if self.status.is_success() {
            return Ok(());
        }
        Err(ConvertError::HttpStatus {
            status: self.status.as_u16(),
            reason: self.status.canonical_reason().unwrap_or("Unknown").to_string(),
            url: self.url.clone(),
        })
    }
}

/// One-line description of a request, as printed by `exec --verbose`
pub fn describe_request(req: &RequestData) -> String {
    let data = req.data.as_deref().map(python_bytes).unwrap_or_else(|| "None".to_string());
    format!("{} {} headers={} data={}", req.method, req.url, python_headers(&req.headers), data)
}

/// Send `req` and read the whole response
pub fn execute(req: &RequestData, options: &ExecOptions) -> Result<Response> {
    if options.verbose {
        eprintln!("{}", describe_request(req));
    }

    let method = Method::from_bytes(req.method.as_bytes())
        .map_err(|_| ConvertError::InvalidMethod { method: req.method.clone() })?;
    let headers = build_headers(req)?;

    let client = Client::builder()
        .user_agent(USER_AGENT_STRING)
        .timeout(options.timeout)
        .build()?;

    let mut builder = client.request(method, &req.url).headers(headers);
    if let Some(data) = &req.data {
        builder = builder.body(data.clone());
    }

    info!(method = %req.method, url = %req.url, "Sending request");
    let response = builder.send()?;

    let status = response.status();
    let version = response.version();
    let url = response.url().to_string();
    let headers = response.headers().clone();
    let body = response.bytes()?.to_vec();
    info!(status = status.as_u16(), bytes = body.len(), "Received response");

    let response = Response { status, version, url, headers, body };
    if options.verbose {
        eprintln!("{}", response.status_line());
    }
    Ok(response)
}

fn build_headers(req: &RequestData) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(req.headers.len());
    for (name, value) in &req.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConvertError::InvalidHeader { header: name.clone() })?;
        let header_value = HeaderValue::from_bytes(value.as_bytes())
            .map_err(|_| ConvertError::InvalidHeader { header: format!("{name}: {value}") })?;
        debug!(header = %name, "Adding request header");
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
