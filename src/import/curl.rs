//! cURL command parsing
//!
//! Parses commands produced by "copy as cURL" (Firefox, Chromium) into a
//! [`RequestData`].
//!
//! # Example
//!
//! ```
//! use convert_to_requests::import::curl_to_request;
//!
//! let req = curl_to_request("curl 'https://example.com' -H 'Accept: application/json'", false).unwrap();
//! assert_eq!(req.method, "GET");
//! assert_eq!(req.headers["Accept"], "application/json");
//! ```

use base64::Engine;
use tracing::debug;

use super::literal::{self, QuoteStyle};
use crate::errors::{ConvertError, Result};
use crate::http::method;
use crate::request::{insert_header, Headers, RequestData};

/// Curl arguments with a meaning for the request model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurlFlag {
    Url,
    Header,
    Request,
    Data,
    UserAgent,
    Cookie,
    Referer,
    User,
    Head,
    Get,
    Compressed,
    /// Understood, but nothing in the request model corresponds to it
    Unsupported { takes_value: bool },
}

impl CurlFlag {
    fn lookup(name: &str) -> Option<Self> {
        use CurlFlag::*;

        let flag = match name {
            "--url" => Url,
            "-H" | "--header" => Header,
            "-X" | "--request" => Request,
            "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii" => Data,
            "-A" | "--user-agent" => UserAgent,
            "-b" | "--cookie" => Cookie,
            "-e" | "--referer" => Referer,
            "-u" | "--user" => User,
            "-I" | "--head" => Head,
            "-G" | "--get" => Get,
            "--compressed" => Compressed,
            "-o" | "--output" | "-m" | "--max-time" | "--connect-timeout" | "-x" | "--proxy"
            | "-U" | "--proxy-user" | "-E" | "--cert" | "--cert-type" | "--key" | "--key-type"
            | "--cacert" | "--capath" | "--ciphers" | "-c" | "--cookie-jar" | "--max-redirs"
            | "-w" | "--write-out" | "-D" | "--dump-header" | "-F" | "--form"
            | "--form-string" | "--data-urlencode" | "-T" | "--upload-file" | "-r" | "--range"
            | "--resolve" | "--retry" | "--limit-rate" | "-K" | "--config" | "--interface"
            | "--oauth2-bearer" | "--aws-sigv4" | "-Y" | "--speed-limit" | "-y"
            | "--speed-time" | "-z" | "--time-cond" | "--local-port" | "--dns-servers" => {
                Unsupported { takes_value: true }
            }
            "-L" | "--location" | "--location-trusted" | "-k" | "--insecure" | "-s"
            | "--silent" | "-S" | "--show-error" | "-v" | "--verbose" | "-i" | "--include"
            | "-f" | "--fail" | "--fail-with-body" | "-g" | "--globoff" | "-N" | "--no-buffer"
            | "-0" | "--http1.0" | "--http1.1" | "--http2" | "--http2-prior-knowledge"
            | "--http3" | "-4" | "--ipv4" | "-6" | "--ipv6" | "-#" | "--progress-bar" | "-O"
            | "--remote-name" | "-J" | "--remote-header-name" | "--basic" | "--digest"
            | "--ntlm" | "--negotiate" | "--anyauth" | "--tr-encoding" | "--raw"
            | "--path-as-is" | "--tlsv1.2" | "--tlsv1.3" | "-q" | "--disable"
            | "--no-keepalive" | "--tcp-nodelay" => Unsupported { takes_value: false },
            _ => return None,
        };
        Some(flag)
    }

    fn takes_value(self) -> bool {
        use CurlFlag::*;

        match self {
            Url | Header | Request | Data | UserAgent | Cookie | Referer | User => true,
            Head | Get | Compressed => false,
            Unsupported { takes_value } => takes_value,
        }
    }
}

/// One flag occurrence; a token like `-sSL` yields several
#[derive(Debug, PartialEq, Eq)]
struct FlagUse {
    name: String,
    flag: Option<CurlFlag>,
    attached: Option<String>,
}

impl FlagUse {
    fn unknown(token: &str) -> Self {
        Self { name: token.to_string(), flag: None, attached: None }
    }
}

/// Parse a curl command line into a request
///
/// `dollar_strings` enables decoding of bash `$'...'` strings; see
/// [`literal::parse_dollar_string`] for why this is opt-in.
pub fn curl_to_request(command: &str, dollar_strings: bool) -> Result<RequestData> {
    let tokens = tokenize(command, dollar_strings)?;
    debug!(count = tokens.len(), "Tokenized curl command");

    let mut args = tokens.into_iter().peekable();
    if args.peek().map(String::as_str) == Some("curl") {
        args.next();
    }

    let mut request = CurlRequest::default();
    while let Some(token) = args.next() {
        if !is_flag(&token) {
            request.positional(token);
            continue;
        }

        for FlagUse { name, flag, attached } in expand_flag(&token) {
            let Some(flag) = flag else {
                debug!(flag = %name, "Unknown curl argument");
                // an unknown long flag takes the next word unless that looks
                // like another flag or like the URL itself
                let value = if name.starts_with("--") {
                    let url_pending = request.url.is_none();
                    args.next_if(|next| !next.starts_with('-') && !(url_pending && next.contains("://")))
                } else {
                    None
                };
                match value {
                    Some(value) => request.ignored.push(format!("{name} {value}")),
                    None => request.ignored.push(name),
                }
                continue;
            };
            let value = if flag.takes_value() {
                match attached.or_else(|| args.next()) {
                    Some(value) => value,
                    None => return Err(ConvertError::MissingValue { flag: name }),
                }
            } else {
                String::new()
            };
            request.apply(flag, &name, value)?;
        }
    }

    request.finish()
}

fn is_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Resolve a flag token, splitting bundled short flags (`-sSL`) and
/// attached short values (`-XPOST`)
fn expand_flag(token: &str) -> Vec<FlagUse> {
    if let Some(flag) = CurlFlag::lookup(token) {
        return vec![FlagUse { name: token.to_string(), flag: Some(flag), attached: None }];
    }
    if token.starts_with("--") {
        return vec![FlagUse::unknown(token)];
    }

    let mut uses = Vec::new();
    let mut rest = &token[1..];
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        let name = format!("-{c}");
        match CurlFlag::lookup(&name) {
            Some(flag) if flag.takes_value() => {
                let attached = (!rest.is_empty()).then(|| rest.to_string());
                uses.push(FlagUse { name, flag: Some(flag), attached });
                return uses;
            }
            Some(flag) => uses.push(FlagUse { name, flag: Some(flag), attached: None }),
            None => return vec![FlagUse::unknown(token)],
        }
    }
    uses
}

/// Request fields accumulated while walking the arguments
#[derive(Debug, Default)]
struct CurlRequest {
    method: Option<String>,
    url: Option<String>,
    headers: Headers,
    data: Option<Vec<u8>>,
    get: bool,
    ignored: Vec<String>,
}

impl CurlRequest {
    fn positional(&mut self, token: String) {
        if self.url.is_none() {
            self.url = Some(token);
        } else {
            debug!(argument = %token, "Extra positional argument");
            self.ignored.push(token);
        }
    }

    fn apply(&mut self, flag: CurlFlag, name: &str, value: String) -> Result<()> {
        debug!(argument = %name, ?flag, "Curl argument");
        match flag {
            CurlFlag::Url => self.positional(value),
            CurlFlag::Header => {
                let (header, header_value) = parse_header(&value)?;
                insert_header(&mut self.headers, header, header_value);
            }
            CurlFlag::Request => self.method = Some(method::normalize(&value)?),
            CurlFlag::Data => self.data = Some(value.into_bytes()),
            CurlFlag::UserAgent => insert_header(&mut self.headers, "User-Agent".into(), value),
            CurlFlag::Cookie => insert_header(&mut self.headers, "Cookie".into(), value),
            CurlFlag::Referer => insert_header(&mut self.headers, "Referer".into(), value),
            CurlFlag::User => {
                if value.contains(':') {
                    let credentials = base64::engine::general_purpose::STANDARD.encode(&value);
                    insert_header(
                        &mut self.headers,
                        "Authorization".into(),
                        format!("Basic {credentials}"),
                    );
                } else {
                    // curl would prompt for the password
                    self.ignored.push(format!("{name} {value}"));
                }
            }
            CurlFlag::Head => self.method = Some(method::HEAD.to_string()),
            CurlFlag::Get => self.get = true,
            CurlFlag::Compressed => {}
            CurlFlag::Unsupported { takes_value: true } => {
                self.ignored.push(format!("{name} {value}"));
            }
            CurlFlag::Unsupported { takes_value: false } => self.ignored.push(name.to_string()),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<RequestData> {
        let mut url = self.url.ok_or(ConvertError::MissingUrl)?;
        if self.get {
            if let Some(data) = self.data.take() {
                if !data.is_empty() {
                    url.push(if url.contains('?') { '&' } else { '?' });
                    url.push_str(&String::from_utf8_lossy(&data));
                }
            }
        }
        Ok(RequestData::new(self.method, url, self.headers, self.data, self.ignored))
    }
}

/// Parse a header string "Name: Value"
///
/// `Name;` is curl's way of sending a header with an empty value.
fn parse_header(header: &str) -> Result<(String, String)> {
    match header.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        None => match header.trim().strip_suffix(';') {
            Some(name) if !name.trim().is_empty() => Ok((name.trim().to_string(), String::new())),
            _ => Err(ConvertError::InvalidHeader { header: header.to_string() }),
        },
        _ => Err(ConvertError::InvalidHeader { header: header.to_string() }),
    }
}

/// Split a command line into words using POSIX shell quoting rules
pub fn tokenize(command: &str, dollar_strings: bool) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut rest = command;

    while let Some(c) = rest.chars().next() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                if in_word {
                    tokens.push(std::mem::take(&mut current));
                    in_word = false;
                }
                rest = &rest[1..];
            }
            '\\' => {
                let escaped = &rest[1..];
                if let Some(tail) = escaped.strip_prefix("\r\n").or_else(|| escaped.strip_prefix('\n')) {
                    // line continuation
                    rest = tail;
                    continue;
                }
                let Some(e) = escaped.chars().next() else {
                    return Err(ConvertError::Syntax {
                        position: command.len() - rest.len(),
                        expected: "character after backslash".to_string(),
                        found: String::new(),
                    });
                };
                current.push(e);
                in_word = true;
                rest = &escaped[e.len_utf8()..];
            }
            '\'' | '"' => {
                let (text, tail) = literal::parse_quoted(rest, QuoteStyle::Shell)?;
                current.push_str(&text);
                in_word = true;
                rest = tail;
            }
            '$' if dollar_strings && rest.starts_with("$'") => {
                let (text, tail) = literal::parse_dollar_string(rest)?;
                current.push_str(&text);
                in_word = true;
                rest = tail;
            }
            _ => {
                current.push(c);
                in_word = true;
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if in_word {
        tokens.push(current);
    }

    Ok(tokens)
}
