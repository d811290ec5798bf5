//! fetch() call parsing
//!
//! Parses code produced by "copy as fetch" (Firefox, Chromium) and "copy as
//! Node.js fetch" (Chromium):
//!
//! ```text
//! await fetch("https://example.com", {
//!   "headers": { "accept": "application/json" },
//!   "body": null,
//!   "method": "GET",
//!   "mode": "cors"
//! });
//! ```
//!
//! Only the literal syntax those exports use is understood: strings, `null`,
//! booleans, numbers, arrays and objects (quoted or bare keys, trailing
//! commas allowed). "copy as fetch" does not include cookies and Chromium
//! leaves out `User-Agent`; neither can be recovered here.

use tracing::debug;
use winnow::ascii::{multispace0, multispace1};
use winnow::combinator::{alt, cut_err, eof, fail, opt, separated};
use winnow::error::{ContextError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};
use winnow::ModalResult;

use super::literal::{self, QuoteStyle};
use crate::errors::{fragment, ConvertError, Result};
use crate::http::method;
use crate::request::{insert_header, Headers, RequestData};

/// A literal value in a fetch call
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(String),
    Str(String),
    Array(Vec<Literal>),
    Object(Vec<(String, Literal)>),
}

impl Literal {
    fn kind(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Bool(_) => "boolean",
            Literal::Number(_) => "number",
            Literal::Str(_) => "string",
            Literal::Array(_) => "array",
            Literal::Object(_) => "object",
        }
    }
}

/// Options-object keys with a meaning for the request model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchOption {
    Method,
    Headers,
    Body,
    Referrer,
    ReferrerPolicy,
}

impl FetchOption {
    fn lookup(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "method" => Some(FetchOption::Method),
            "headers" => Some(FetchOption::Headers),
            "body" => Some(FetchOption::Body),
            "referrer" => Some(FetchOption::Referrer),
            "referrerpolicy" => Some(FetchOption::ReferrerPolicy),
            _ => None,
        }
    }
}

/// Parse a fetch call into a request
///
/// Options the request model cannot represent (`mode`, `credentials`,
/// `cache`, ...) are listed in [`RequestData::ignored`] as `"<key>="`, in
/// the order they appear.
pub fn fetch_to_request(code: &str) -> Result<RequestData> {
    let (url, options) = fetch_call.parse(code).map_err(|e| {
        let position = e.offset();
        ConvertError::Syntax {
            position,
            expected: describe(e.inner()),
            found: fragment(&code[position..]),
        }
    })?;

    let mut request_method = None;
    let mut headers = Headers::new();
    let mut data = None;
    let mut ignored = Vec::new();

    for (key, value) in options.unwrap_or_default() {
        let Some(option) = FetchOption::lookup(&key) else {
            debug!(option = %key, value = value.kind(), "Ignoring fetch option");
            ignored.push(format!("{key}="));
            continue;
        };
        match (option, value) {
            (FetchOption::Method, Literal::Str(m)) => request_method = Some(method::normalize(&m)?),
            (FetchOption::Headers, Literal::Object(entries)) => {
                for (name, value) in entries {
                    let value = match value {
                        Literal::Str(s) | Literal::Number(s) => s,
                        _ => {
                            return Err(ConvertError::InvalidOption {
                                key: format!("{key}.{name}"),
                                expected: "string",
                            })
                        }
                    };
                    insert_header(&mut headers, name, value);
                }
            }
            (FetchOption::Headers, Literal::Null) => {}
            (FetchOption::Body, Literal::Str(body)) => data = Some(body.into_bytes()),
            (FetchOption::Body, Literal::Null) => data = None,
            (FetchOption::Referrer, Literal::Str(referrer)) => {
                // the header really is spelled "referer"
                if !referrer.is_empty() {
                    insert_header(&mut headers, "referer".to_string(), referrer);
                }
            }
            (FetchOption::ReferrerPolicy, Literal::Str(policy)) => {
                if !policy.is_empty() {
                    insert_header(&mut headers, "referrer-policy".to_string(), policy);
                }
            }
            (FetchOption::Referrer | FetchOption::ReferrerPolicy, Literal::Null) => {}
            (option, _) => {
                return Err(ConvertError::InvalidOption {
                    key,
                    expected: match option {
                        FetchOption::Method => "string",
                        FetchOption::Headers => "object",
                        _ => "string or null",
                    },
                })
            }
        }
    }

    Ok(RequestData::new(request_method, url, headers, data, ignored))
}

/// Summarise what the grammar was looking for when it failed
fn describe(error: &ContextError) -> String {
    let expected: Vec<String> = error
        .context()
        .filter_map(|context| match context {
            StrContext::Expected(value) => Some(value.to_string()),
            StrContext::Label(label) => Some(format!("valid {label}")),
            _ => None,
        })
        .collect();
    if expected.is_empty() {
        "fetch(<url>, <options>) call".to_string()
    } else {
        expected.join(" or ")
    }
}

fn expected(what: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(what))
}

fn expected_char(c: char) -> StrContext {
    StrContext::Expected(StrContextValue::CharLiteral(c))
}

/// `[await] fetch(<string>[, <object>])[;]`
fn fetch_call(input: &mut &str) -> ModalResult<(String, Option<Vec<(String, Literal)>>)> {
    ws.parse_next(input)?;
    opt(("await", multispace1)).parse_next(input)?;
    cut_err("fetch")
        .context(StrContext::Expected(StrContextValue::StringLiteral("fetch")))
        .parse_next(input)?;
    ws.parse_next(input)?;
    cut_err('(').context(expected_char('(')).parse_next(input)?;
    ws.parse_next(input)?;
    let url = cut_err(string_literal)
        .context(expected("string literal URL"))
        .parse_next(input)?;
    ws.parse_next(input)?;

    let mut options = None;
    if opt(',').parse_next(input)?.is_some() {
        ws.parse_next(input)?;
        if !input.starts_with(')') {
            options = Some(
                cut_err(object)
                    .context(expected("options object literal"))
                    .parse_next(input)?,
            );
            (ws, opt(','), ws).parse_next(input)?;
        }
    }

    cut_err(')').context(expected_char(')')).parse_next(input)?;
    (ws, opt(';'), ws).parse_next(input)?;
    cut_err(eof).context(expected("end of input")).parse_next(input)?;

    Ok((url, options))
}

fn ws(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

fn literal_value(input: &mut &str) -> ModalResult<Literal> {
    alt((
        string_literal.map(Literal::Str),
        "null".value(Literal::Null),
        "undefined".value(Literal::Null),
        "true".value(Literal::Bool(true)),
        "false".value(Literal::Bool(false)),
        number.map(Literal::Number),
        object.map(Literal::Object),
        array.map(Literal::Array),
    ))
    .context(expected("literal value"))
    .parse_next(input)
}

/// Quoted string, decoded with JavaScript escapes
fn string_literal(input: &mut &str) -> ModalResult<String> {
    if !input.starts_with(['"', '\'']) {
        return fail::<_, String, _>.parse_next(input);
    }
    match literal::parse_quoted(*input, QuoteStyle::Script) {
        Ok((value, rest)) => {
            *input = rest;
            Ok(value)
        }
        Err(_) => cut_err(fail::<_, String, _>)
            .context(StrContext::Label("string literal"))
            .parse_next(input),
    }
}

fn number(input: &mut &str) -> ModalResult<String> {
    (
        one_of(|c: char| c.is_ascii_digit() || c == '-'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-')),
    )
        .take()
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

fn identifier(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '$')
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

fn object(input: &mut &str) -> ModalResult<Vec<(String, Literal)>> {
    '{'.parse_next(input)?;
    ws.parse_next(input)?;
    let members: Vec<(String, Literal)> = separated(0.., member, (ws, ',', ws)).parse_next(input)?;
    (ws, opt(','), ws).parse_next(input)?;
    cut_err('}').context(expected_char('}')).parse_next(input)?;
    Ok(members)
}

fn member(input: &mut &str) -> ModalResult<(String, Literal)> {
    let key = alt((string_literal, identifier)).parse_next(input)?;
    (ws, cut_err(':').context(expected_char(':')), ws).parse_next(input)?;
    let value = cut_err(literal_value).parse_next(input)?;
    Ok((key, value))
}

fn array(input: &mut &str) -> ModalResult<Vec<Literal>> {
    '['.parse_next(input)?;
    ws.parse_next(input)?;
    let items: Vec<Literal> = separated(0.., literal_value, (ws, ',', ws)).parse_next(input)?;
    (ws, opt(','), ws).parse_next(input)?;
    cut_err(']').context(expected_char(']')).parse_next(input)?;
    Ok(items)
}
