//! Python code generation
//!
//! Renders a [`RequestData`] as a `requests.request(...)` call. Literals
//! follow Python's `repr()` so that the generated code evaluates back to
//! exactly the same method, URL, headers and body:
//!
//! ```
//! use convert_to_requests::codegen::{to_python_code, RenderOptions};
//! use convert_to_requests::import::curl_to_request;
//!
//! let req = curl_to_request("curl 'https://obfusk.ch' -H 'User-Agent: Mozilla/5.0'", false).unwrap();
//! assert_eq!(
//!     to_python_code(&req, &RenderOptions::default()),
//!     "requests.request('GET', 'https://obfusk.ch', headers={'User-Agent': 'Mozilla/5.0'})",
//! );
//! ```

use std::fmt::Write;

use crate::request::{Headers, RequestData};

const INDENT: &str = "    ";

/// How the headers mapping is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Everything on one line
    #[default]
    Compact,
    /// One header per line, closing brace on its own line
    Pretty,
}

/// Rendering toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub layout: Layout,
    /// Emit a complete script that sends the request and prints the body
    pub script: bool,
}

/// Render `req` as Python code
pub fn to_python_code(req: &RequestData, options: &RenderOptions) -> String {
    let call = python_call(&req.method, &req.url, &req.headers, req.data.as_deref(), options.layout);
    if !options.script {
        return call;
    }
    format!("import requests\n\nr = {call}\nr.raise_for_status()\nprint(r.text, end=\"\")")
}

/// Render a single `requests.request(...)` call
///
/// `headers=` is left out when there are no headers and `data=` when there
/// is no body.
pub fn python_call(method: &str, url: &str, headers: &Headers, data: Option<&[u8]>, layout: Layout) -> String {
    let mut code = format!("requests.request({}, {}", python_str(method), python_str(url));
    if !headers.is_empty() {
        code.push_str(", headers=");
        match layout {
            Layout::Compact => code.push_str(&python_headers(headers)),
            Layout::Pretty => code.push_str(&python_headers_pretty(headers)),
        }
    }
    if let Some(data) = data {
        code.push_str(", data=");
        code.push_str(&python_bytes(data));
    }
    code.push(')');
    code
}

/// Headers as a one-line dict literal
pub fn python_headers(headers: &Headers) -> String {
    let entries: Vec<String> = headers
        .iter()
        .map(|(name, value)| format!("{}: {}", python_str(name), python_str(value)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

fn python_headers_pretty(headers: &Headers) -> String {
    let mut out = String::from("{\n");
    for (name, value) in headers {
        let _ = writeln!(out, "{INDENT}{}: {},", python_str(name), python_str(value));
    }
    out.push('}');
    out
}

/// Python string literal, quoted the way `repr()` quotes it
pub fn python_str(s: &str) -> String {
    let quote = pick_quote(s.contains('\''), s.contains('"'));
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if needs_escape(c) => {
                let _ = match c as u32 {
                    n @ 0..=0xff => write!(out, "\\x{n:02x}"),
                    n @ 0x100..=0xffff => write!(out, "\\u{n:04x}"),
                    n => write!(out, "\\U{n:08x}"),
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Python bytes literal (`b'...'`), quoted the way `repr()` quotes it
pub fn python_bytes(data: &[u8]) -> String {
    let quote = pick_quote(data.contains(&b'\''), data.contains(&b'"'));
    let mut out = String::with_capacity(data.len() + 3);
    out.push('b');
    out.push(quote);
    for &b in data {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(b as char),
            b => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push(quote);
    out
}

fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

/// Characters Python does not consider printable
///
/// Covers controls, separators other than space, format characters and
/// private use. Unassigned code points are not tracked and stay unescaped,
/// which still evaluates to the same string.
fn needs_escape(c: char) -> bool {
    c.is_control()
        || (c.is_whitespace() && c != ' ')
        || matches!(
            c,
            // format (Cf)
            '\u{ad}'
                | '\u{600}'..='\u{605}'
                | '\u{61c}'
                | '\u{6dd}'
                | '\u{70f}'
                | '\u{890}'..='\u{891}'
                | '\u{8e2}'
                | '\u{180e}'
                | '\u{200b}'..='\u{200f}'
                | '\u{202a}'..='\u{202e}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206f}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{110bd}'
                | '\u{110cd}'
                | '\u{13430}'..='\u{1343f}'
                | '\u{1bca0}'..='\u{1bca3}'
                | '\u{1d173}'..='\u{1d17a}'
                | '\u{e0001}'
                | '\u{e0020}'..='\u{e007f}'
                // private use (Co)
                | '\u{e000}'..='\u{f8ff}'
                | '\u{f0000}'..='\u{ffffd}'
                | '\u{100000}'..='\u{10fffd}'
        )
}
