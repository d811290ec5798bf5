//! The request description shared by both parsers

use indexmap::IndexMap;

use crate::http::method;

/// Ordered header mapping; inserting an existing name replaces its value
/// in place
pub type Headers = IndexMap<String, String>;

/// An HTTP request recovered from a curl command or fetch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestData {
    /// Uppercase HTTP verb, never empty
    pub method: String,
    /// Target URL exactly as written in the input
    pub url: String,
    pub headers: Headers,
    /// Request body; `None` unless the input supplied one
    pub data: Option<Vec<u8>>,
    /// Inputs that were understood but have no place in this model
    pub ignored: Vec<String>,
}

impl RequestData {
    /// Build a request, defaulting the method from the presence of a body
    pub fn new(
        method: Option<String>,
        url: String,
        headers: Headers,
        data: Option<Vec<u8>>,
        ignored: Vec<String>,
    ) -> Self {
        let method = method.unwrap_or_else(|| method::infer(data.is_some()).to_string());
        Self { method, url, headers, data, ignored }
    }

    /// Body as text, if it is valid UTF-8
    #[cfg(test)]
    pub(crate) fn data_str(&self) -> Option<&str> {
        self.data.as_deref().and_then(|d| std::str::from_utf8(d).ok())
    }
}

/// Insert a header, replacing the value of an existing header whose name
/// matches case-insensitively
pub fn insert_header(headers: &mut Headers, name: String, value: String) {
    match headers.keys().position(|k| k.eq_ignore_ascii_case(&name)) {
        Some(index) => {
            if let Some((_, existing)) = headers.get_index_mut(index) {
                *existing = value;
            }
        }
        None => {
            headers.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_defaults_to_get_without_body() {
        let req = RequestData::new(None, "https://example.com".into(), Headers::new(), None, vec![]);
        assert_eq!(req.method, "GET");
    }

    #[test]
    fn test_method_defaults_to_post_with_body() {
        let req = RequestData::new(None, "https://example.com".into(), Headers::new(), Some(vec![]), vec![]);
        assert_eq!(req.method, "POST");
    }

    #[test]
    fn test_explicit_method_wins() {
        let req = RequestData::new(
            Some("GET".into()),
            "https://example.com".into(),
            Headers::new(),
            Some(b"x".to_vec()),
            vec![],
        );
        assert_eq!(req.method, "GET");
        assert_eq!(req.data_str(), Some("x"));
    }

    #[test]
    fn test_headers_overwrite_in_place() {
        let mut headers = Headers::new();
        headers.insert("A".into(), "1".into());
        headers.insert("B".into(), "2".into());
        headers.insert("A".into(), "3".into());
        let pairs: Vec<_> = headers.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_insert_header_is_case_insensitive() {
        let mut headers = Headers::new();
        insert_header(&mut headers, "User-Agent".into(), "a".into());
        insert_header(&mut headers, "Accept".into(), "*/*".into());
        insert_header(&mut headers, "user-agent".into(), "b".into());
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["User-Agent"], "b");
        assert_eq!(headers.get_index(0).map(|(k, _)| k.as_str()), Some("User-Agent"));
    }
}
