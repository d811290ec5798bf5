//! Error types for convert-to-requests

use thiserror::Error;

use crate::strings::truncate_str;

/// Longest input fragment quoted back in an error message
const MAX_FRAGMENT_LEN: usize = 40;

/// Main error type for convert-to-requests
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unterminated string literal: {fragment}")]
    UnterminatedLiteral { fragment: String },

    #[error("Invalid escape sequence in string literal: {fragment}")]
    InvalidEscape { fragment: String },

    #[error("No URL found in curl command")]
    MissingUrl,

    #[error("Missing value for curl argument {flag}")]
    MissingValue { flag: String },

    #[error("Invalid header (expected 'Name: Value'): {header}")]
    InvalidHeader { header: String },

    #[error("Invalid HTTP method: {method:?}")]
    InvalidMethod { method: String },

    #[error("Syntax error at position {position}: expected {expected}, found {found:?}")]
    Syntax {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Invalid fetch option {key:?}: expected {expected}")]
    InvalidOption { key: String, expected: &'static str },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} {reason} for url: {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl ConvertError {
    /// Unterminated literal at the start of `input`
    pub fn unterminated(input: &str) -> Self {
        ConvertError::UnterminatedLiteral { fragment: fragment(input) }
    }

    /// Undecodable escape sequence at the start of `input`
    pub fn invalid_escape(input: &str) -> Self {
        ConvertError::InvalidEscape { fragment: fragment(input) }
    }

    /// Whether this is a syntax error in the parsed input (as opposed to
    /// an execution or environment failure)
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            ConvertError::UnterminatedLiteral { .. }
                | ConvertError::InvalidEscape { .. }
                | ConvertError::MissingUrl
                | ConvertError::MissingValue { .. }
                | ConvertError::InvalidHeader { .. }
                | ConvertError::InvalidMethod { .. }
                | ConvertError::Syntax { .. }
                | ConvertError::InvalidOption { .. }
        )
    }
}

/// Shorten an input fragment for display in an error
pub fn fragment(input: &str) -> String {
    let line = input.lines().next().unwrap_or("");
    truncate_str(line, MAX_FRAGMENT_LEN)
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_truncates_long_input() {
        let long = "x".repeat(100);
        let f = fragment(&long);
        assert_eq!(f.len(), MAX_FRAGMENT_LEN);
        assert!(f.ends_with("..."));
    }

    #[test]
    fn test_fragment_stops_at_newline() {
        assert_eq!(fragment("'abc\n-H foo"), "'abc");
    }

    #[test]
    fn test_is_syntax() {
        assert!(ConvertError::MissingUrl.is_syntax());
        assert!(ConvertError::unterminated("'abc").is_syntax());
        assert!(!ConvertError::Config("bad".to_string()).is_syntax());
        let http = ConvertError::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
            url: "https://example.com".to_string(),
        };
        assert!(!http.is_syntax());
    }

    #[test]
    fn test_messages_name_the_fragment() {
        let err = ConvertError::unterminated("'foo bar");
        assert_eq!(err.to_string(), "Unterminated string literal: 'foo bar");
        let err = ConvertError::MissingValue { flag: "-H".to_string() };
        assert_eq!(err.to_string(), "Missing value for curl argument -H");
    }
}
