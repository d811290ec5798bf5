//! Quoted string literal decoding
//!
//! Every decoder takes input starting at the opening delimiter and returns
//! the decoded text together with whatever follows the closing delimiter.
//!
//! # Bash `$'...'` strings
//!
//! Firefox and Chromium emit e.g. `--data-raw $'\'foo\''` when a request
//! body contains single quotes. [`parse_dollar_string`] decodes the common
//! escapes, but it is a best-effort reading of bash quoting rather than a
//! shell, so the curl parser only uses it when explicitly asked to.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::errors::{ConvertError, Result};

/// Escape rules applied inside a quoted literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// POSIX shell: no escapes in `'...'`; `\$ \` \" \\` and line
    /// continuations in `"..."`
    Shell,
    /// JavaScript/JSON: the same escapes for `'...'` and `"..."`
    Script,
}

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Decode a `'...'` or `"..."` literal at the start of `input`
pub fn parse_quoted(input: &str, style: QuoteStyle) -> Result<(String, &str)> {
    let quote = match input.chars().next() {
        Some(q @ ('\'' | '"')) => q,
        _ => {
            return Err(ConvertError::Syntax {
                position: 0,
                expected: "quoted string".to_string(),
                found: crate::errors::fragment(input),
            })
        }
    };

    let mut chars = input[1..].char_indices().peekable();
    let mut out = String::new();

    while let Some((i, c)) = chars.next() {
        if c == quote {
            return Ok((out, &input[1 + i + 1..]));
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        match (style, quote) {
            (QuoteStyle::Shell, '\'') => out.push(c),
            (QuoteStyle::Shell, _) => match chars.next() {
                Some((_, '\n')) => {}
                Some((_, e @ ('$' | '`' | '"' | '\\'))) => out.push(e),
                Some((_, e)) => {
                    out.push('\\');
                    out.push(e);
                }
                None => break,
            },
            (QuoteStyle::Script, _) => match chars.next() {
                Some((_, e)) => script_escape(&mut chars, e, &mut out)
                    .ok_or_else(|| ConvertError::invalid_escape(&input[i + 1..]))?,
                None => break,
            },
        }
    }

    Err(ConvertError::unterminated(input))
}

/// Decode one JavaScript escape whose introducing character is `e`
fn script_escape(chars: &mut Chars<'_>, e: char, out: &mut String) -> Option<()> {
    let c = match e {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '0' => '\0',
        '\n' => return Some(()),
        'x' => {
            let (value, n) = take_digits(chars, 16, 2, 0);
            if n != 2 {
                return None;
            }
            char::from_u32(value)?
        }
        'u' => {
            let unit = unicode_escape(chars)?;
            match unit {
                0xD800..=0xDBFF => {
                    // high surrogate, must be followed by \uDC00-\uDFFF
                    if chars.next()?.1 != '\\' || chars.next()?.1 != 'u' {
                        return None;
                    }
                    let low = unicode_escape(chars)?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return None;
                    }
                    char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))?
                }
                _ => char::from_u32(unit)?,
            }
        }
        other => other,
    };
    out.push(c);
    Some(())
}

/// `XXXX` or `{X...}` after `\u`
fn unicode_escape(chars: &mut Chars<'_>) -> Option<u32> {
    if chars.peek().map(|&(_, c)| c) == Some('{') {
        chars.next();
        let (value, n) = take_digits(chars, 16, 6, 0);
        if n == 0 || chars.next()?.1 != '}' {
            return None;
        }
        return Some(value);
    }
    let (value, n) = take_digits(chars, 16, 4, 0);
    (n == 4).then_some(value)
}

/// Consume up to `max` digits in `radix`, accumulating onto `value`
fn take_digits(chars: &mut Chars<'_>, radix: u32, max: usize, mut value: u32) -> (u32, usize) {
    let mut count = 0;
    while count < max {
        match chars.peek().and_then(|&(_, c)| c.to_digit(radix)) {
            Some(d) => {
                value = value * radix + d;
                count += 1;
                chars.next();
            }
            None => break,
        }
    }
    (value, count)
}

/// Parse a bash-style `$'...'` string at the start of `input`
///
/// Supports the escapes bash documents for ANSI-C quoting: `\a \b \e \E
/// \f \n \r \t \v \\ \' \" \?`, octal `\nnn`, hex `\xHH`, `\uHHHH`,
/// `\UHHHHHHHH` and control characters `\cX`. Anything else is rejected
/// rather than guessed at.
pub fn parse_dollar_string(input: &str) -> Result<(String, &str)> {
    let body = input
        .strip_prefix("$'")
        .ok_or_else(|| ConvertError::invalid_escape(input))?;
    let mut chars = body.char_indices().peekable();
    let mut out = String::new();

    while let Some((i, c)) = chars.next() {
        match c {
            '\'' => return Ok((out, &body[i + 1..])),
            '\\' => {
                let (_, e) = chars.next().ok_or_else(|| ConvertError::unterminated(input))?;
                let decoded = dollar_escape(&mut chars, e)
                    .ok_or_else(|| ConvertError::invalid_escape(&body[i..]))?;
                out.push(decoded);
            }
            _ => out.push(c),
        }
    }

    Err(ConvertError::unterminated(input))
}

fn dollar_escape(chars: &mut Chars<'_>, e: char) -> Option<char> {
    let c = match e {
        'a' => '\u{7}',
        'b' => '\u{8}',
        'e' | 'E' => '\u{1b}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{b}',
        '\\' | '\'' | '"' | '?' => e,
        '0'..='7' => {
            let (value, _) = take_digits(chars, 8, 2, e.to_digit(8)?);
            char::from_u32(value)?
        }
        'x' | 'u' | 'U' => {
            let max = match e {
                'x' => 2,
                'u' => 4,
                _ => 8,
            };
            let (value, n) = take_digits(chars, 16, max, 0);
            if n == 0 {
                return None;
            }
            char::from_u32(value)?
        }
        'c' => {
            let (_, x) = chars.next()?;
            char::from_u32(x as u32 & 0x1f)?
        }
        _ => return None,
    };
    Some(c)
}
