//! Go string literal quoting

use std::fmt::Write;
use std::str::Chars;

/// How a Go string literal was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"..."` with backslash escapes.
    Interpreted,
    /// `` `...` `` taken verbatim.
    Raw,
}

/// Decode a Go string literal, including its quotes.
///
/// Returns `None` for anything that is not a well-formed literal or that
/// does not decode to UTF-8 text.
pub fn unquote(literal: &str) -> Option<(QuoteStyle, String)> {
    if literal.len() < 2 {
        return None;
    }
    if let Some(inner) = literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        if inner.contains('`') {
            return None;
        }
        return Some((QuoteStyle::Raw, inner.replace('\r', "")));
    }
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    unescape_interpreted(inner).map(|value| (QuoteStyle::Interpreted, value))
}

fn unescape_interpreted(inner: &str) -> Option<String> {
    let mut out = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\n' | '"' => return None,
            '\\' => match chars.next()? {
                'a' => out.push(0x07),
                'b' => out.push(0x08),
                'f' => out.push(0x0c),
                'n' => out.push(b'\n'),
                'r' => out.push(b'\r'),
                't' => out.push(b'\t'),
                'v' => out.push(0x0b),
                '\\' => out.push(b'\\'),
                '"' => out.push(b'"'),
                '\'' => out.push(b'\''),
                'x' => out.push(u8::try_from(digits(&mut chars, 2, 16)?).ok()?),
                'u' => push_char(&mut out, char::from_u32(digits(&mut chars, 4, 16)?)?),
                'U' => push_char(&mut out, char::from_u32(digits(&mut chars, 8, 16)?)?),
                first @ '0'..='7' => {
                    let rest = digits(&mut chars, 2, 8)?;
                    let value = first.to_digit(8)? * 64 + rest;
                    out.push(u8::try_from(value).ok()?);
                }
                _ => return None,
            },
            c => push_char(&mut out, c),
        }
    }

    String::from_utf8(out).ok()
}

fn digits(chars: &mut Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    (0..count).try_fold(0u32, |acc, _| {
        let digit = chars.next()?.to_digit(radix)?;
        Some(acc * radix + digit)
    })
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Encode `value` as a Go string literal in `style`.
///
/// Returns `None` when a raw literal cannot hold the value because it
/// contains a backtick.
pub fn quote(style: QuoteStyle, value: &str) -> Option<String> {
    match style {
        QuoteStyle::Raw if value.contains('`') => None,
        QuoteStyle::Raw => Some(format!("`{value}`")),
        QuoteStyle::Interpreted => Some(quote_interpreted(value)),
    }
}

fn quote_interpreted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() && (c as u32) <= 0xffff => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
