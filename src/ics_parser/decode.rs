use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::MIN_TIMESTAMP;

/// A logical line split into `NAME[;PARAMS]:VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLine<'a> {
    pub name: &'a str,
    /// Raw parameter text after the first `;` of the name, e.g. `VALUE=DATE`.
    pub params: Option<&'a str>,
    pub value: &'a str,
}

impl<'a> ContentLine<'a> {
    /// `None` when the line has no `:` or nothing before it.
    pub fn parse(line: &'a str) -> Option<Self> {
        let (head, value) = line.split_once(':')?;
        let (name, params) = match head.split_once(';') {
            Some((name, params)) => (name, Some(params)),
            None => (head, None),
        };

        if name.is_empty() {
            return None;
        }

        Some(Self {
            name,
            params,
            value,
        })
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Decodes a DTSTART/DTEND value in UTC date-time or date-only form.
///
/// Anything from the first `;` or `:` onward is ignored before matching.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.split([';', ':']).next().unwrap_or_default();
    let bytes = value.as_bytes();

    match bytes.len() {
        16 if bytes[8] == b'T'
            && bytes[15] == b'Z'
            && all_digits(&bytes[..8])
            && all_digits(&bytes[9..15])
            && bytes[13] <= b'5' =>
        {
            NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%SZ")
                .ok()
                .map(|dt| dt.and_utc())
        }
        8 if all_digits(bytes) => NaiveDate::parse_from_str(value, "%Y%m%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc()),
        _ => None,
    }
}

/// Like [`parse_timestamp`], but falls back to [`MIN_TIMESTAMP`].
///
/// Reporting the failure is left to the caller.
pub fn decode_timestamp(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).unwrap_or(MIN_TIMESTAMP)
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// Reverses TEXT escaping in one left-to-right pass.
///
/// `\\` is consumed as a unit, so `\\n` is a backslash followed by `n`.
/// Unknown escapes are kept as written.
pub fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(',') => out.push(','),
            Some(';') => out.push(';'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
