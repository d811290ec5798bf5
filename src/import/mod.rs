//! Request import from browser "copy as" formats
//!
//! - [`curl`]: "copy as cURL" shell commands
//! - [`fetch`]: "copy as fetch" / "copy as Node.js fetch" calls
//! - [`literal`]: the quoted-string decoders both parsers share

pub mod curl;
pub mod fetch;
pub mod literal;

pub use curl::curl_to_request;
pub use fetch::fetch_to_request;
pub use literal::parse_dollar_string;

use crate::errors::Result;
use crate::request::RequestData;

/// Which grammar the input is written in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    #[default]
    Curl,
    Fetch,
}

/// Parser toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub format: InputFormat,
    /// Decode bash `$'...'` strings in curl commands (best effort)
    pub dollar_strings: bool,
}

/// Parse `text` with the grammar selected in `options`
pub fn parse(text: &str, options: &ParseOptions) -> Result<RequestData> {
    match options.format {
        InputFormat::Curl => curl_to_request(text, options.dollar_strings),
        InputFormat::Fetch => fetch_to_request(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dispatches_on_format() {
        let curl = ParseOptions::default();
        let req = parse("curl 'https://example.com' --data-raw x", &curl).unwrap();
        assert_eq!(req.method, "POST");

        let fetch = ParseOptions { format: InputFormat::Fetch, ..Default::default() };
        let req = parse(r#"fetch("https://example.com", {"method": "DELETE"});"#, &fetch).unwrap();
        assert_eq!(req.method, "DELETE");
        assert!(parse("curl 'https://example.com'", &fetch).is_err());
    }

    #[test]
    fn test_dollar_strings_are_opt_in() {
        let input = r"curl 'https://example.com' --data-raw $'\'foo\''";
        assert!(parse(input, &ParseOptions::default()).is_err());
        let options = ParseOptions { dollar_strings: true, ..Default::default() };
        assert_eq!(parse(input, &options).unwrap().data_str(), Some("'foo'"));
    }
}
