//! Content-Type helpers for decoding response bodies

use encoding_rs::{Encoding, UTF_8};
use mime::Mime;

/// The `charset` parameter of a Content-Type header, if any
///
/// # Examples
/// ```
/// use convert_to_requests::mime::charset;
/// // values come back lowercased
/// assert_eq!(charset("text/html; charset=ISO-8859-1").as_deref(), Some("iso-8859-1"));
/// assert_eq!(charset("application/json"), None);
/// ```
pub fn charset(content_type: &str) -> Option<String> {
    let m: Mime = content_type.parse().ok()?;
    m.get_param(mime::CHARSET).map(|v| v.as_str().to_string())
}

/// Decode `body` using the charset named in `content_type`
///
/// Unknown or missing charsets fall back to UTF-8; invalid sequences are
/// replaced rather than rejected.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}
