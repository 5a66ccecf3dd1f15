//! Query string encoding.
//!
//! The [`Encoder`] walks a [`Value`] tree depth-first and writes the textual
//! form into one pre-allocated buffer:
//!
//! - **Root level**: `&`-joined `key=value` pairs, keys percent-encoded
//! - **Nested objects**: `,`-joined `key:value` pairs inside `{}`
//! - **Arrays**: `,`-joined values inside `()`
//!
//! Keys are sorted at every level, so equal values always encode to the same
//! string.
//!
//! ```rust
//! use serde_json_qs::{encode, qs};
//!
//! let value = qs!({ "b": { "d": 3, "c": 2 }, "a": 1, "0": 0 });
//! assert_eq!(encode(value.as_object().unwrap()), "0=0&a=1&b={c:2,d:3}");
//! ```

use crate::chars::{
    needs_backslash, percent_escape, starts_like_number, COLON, COMMA, ESCAPE, SPACE,
};
use crate::{EncodeOptions, Map, Value};
use chrono::{DateTime, Datelike, Timelike, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::trace;

/// Characters `encodeURIComponent` leaves alone; everything else in a
/// root-level key is percent-encoded.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Strings that would otherwise decode as constants.
const RESERVED_WORDS: [&str; 3] = ["null", "true", "false"];

/// Encodes a root-level object into a query string.
///
/// # Examples
///
/// ```rust
/// use serde_json_qs::{encode, qs};
///
/// let value = qs!({ "user": { "name": "Ann Lee", "tags": ["a", ""] } });
/// assert_eq!(
///     encode(value.as_object().unwrap()),
///     "user={name:Ann+Lee,tags:(a,,)}"
/// );
/// ```
#[must_use]
pub fn encode(object: &Map) -> String {
    encode_with_options(object, &EncodeOptions::default())
}

/// Encodes a root-level object, leaving out the keys `options` skips.
#[must_use]
pub fn encode_with_options(object: &Map, options: &EncodeOptions) -> String {
    let mut encoder = Encoder::new();
    encoder.write_root(object, options);
    encoder.into_inner()
}

/// Encodes one value the way it appears nested inside an object or array.
///
/// # Examples
///
/// ```rust
/// use serde_json_qs::{encode_value, Value};
///
/// assert_eq!(encode_value(&Value::from("true")), "\\true");
/// assert_eq!(encode_value(&Value::from(1e21)), "1e21");
/// assert_eq!(encode_value(&Value::Number(f64::NAN)), "null");
/// ```
#[must_use]
pub fn encode_value(value: &Value) -> String {
    let mut encoder = Encoder::new();
    encoder.write_value(value);
    encoder.into_inner()
}

/// Writes values into a query string buffer.
pub struct Encoder {
    output: String,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            output: String::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `key=value` pairs joined by `&`.
    pub fn write_root(&mut self, object: &Map, options: &EncodeOptions) {
        let entries = sorted_entries(object, |key| {
            let skipped = options.is_skipped(key);
            if skipped {
                trace!(key, "skipping root key");
            }
            !skipped
        });

        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.output.push('&');
            }
            self.output.extend(utf8_percent_encode(key, COMPONENT));
            self.output.push('=');
            self.write_value(value);
        }
    }

    /// Writes one value in nested form.
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null | Value::Undefined => self.output.push_str("null"),
            Value::Bool(true) => self.output.push_str("true"),
            Value::Bool(false) => self.output.push_str("false"),
            Value::String(s) if RESERVED_WORDS.contains(&s.as_str()) => {
                self.output.push('\\');
                self.output.push_str(s);
            }
            Value::String(s) => self.write_string(s, starts_like_number(s)),
            Value::Number(n) => self.write_number(*n),
            Value::Array(items) => self.write_array(items),
            Value::Object(object) => self.write_object(object),
            Value::BigInt(b) => {
                self.output.push_str(&b.to_string());
                self.output.push('n');
            }
            Value::Date(date) => self.write_date(date),
        }
    }

    fn write_object(&mut self, object: &Map) {
        self.output.push('{');
        let entries = sorted_entries(object, |_| true);
        let last = entries.len().saturating_sub(1);

        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.output.push(char::from(COMMA));
            }
            self.write_string(key, false);
            self.output.push(char::from(COLON));
            self.write_item(value, i == last);
        }
        self.output.push('}');
    }

    fn write_array(&mut self, items: &[Value]) {
        self.output.push('(');
        let last = items.len().saturating_sub(1);

        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push(char::from(COMMA));
            }
            self.write_item(item, i == last);
        }
        self.output.push(')');
    }

    /// An empty string is written as nothing, except in last position where a
    /// trailing comma keeps it from touching the closing delimiter.
    fn write_item(&mut self, value: &Value, is_last: bool) {
        match value {
            Value::String(s) if s.is_empty() => {
                if is_last {
                    self.output.push(char::from(COMMA));
                }
            }
            _ => self.write_value(value),
        }
    }

    fn write_string(&mut self, s: &str, escape_first: bool) {
        if escape_first {
            self.output.push(char::from(ESCAPE));
        }
        for ch in s.chars() {
            self.write_char(ch);
        }
    }

    #[inline]
    fn write_char(&mut self, ch: char) {
        if !ch.is_ascii() {
            self.output.push(ch);
            return;
        }
        let byte = ch as u8;
        if byte == SPACE {
            self.output.push('+');
        } else if let Some(escaped) = percent_escape(byte) {
            self.output.push_str(escaped);
        } else if needs_backslash(byte) {
            self.output.push(char::from(ESCAPE));
            self.output.push(ch);
        } else {
            self.output.push(ch);
        }
    }

    fn write_number(&mut self, n: f64) {
        if n.is_finite() {
            self.output.push_str(&format_number(n));
        } else {
            self.output.push_str("null");
        }
    }

    fn write_date(&mut self, date: &DateTime<Utc>) {
        let year = date.year();
        if (0..=9999).contains(&year) {
            self.output.push_str(&format!("{:04}", year));
        } else {
            // Extended years carry a sign; a bare `+` would decode as a space.
            self.output.push_str(if year < 0 { "-" } else { "%2B" });
            self.output.push_str(&format!("{:06}", year.unsigned_abs()));
        }

        if date.num_seconds_from_midnight() == 0 && date.nanosecond() == 0 {
            self.output.push_str(&date.format("-%m-%d").to_string());
        } else {
            self.output
                .push_str(&date.format("-%m-%dT%H:%M:%S%.3fZ").to_string());
        }
    }
}

/// Entries without `Undefined` values that pass `keep`, sorted by key.
fn sorted_entries<'a>(
    object: &'a Map,
    mut keep: impl FnMut(&str) -> bool,
) -> Vec<(&'a str, &'a Value)> {
    let mut entries: Vec<_> = object
        .iter()
        .filter(|(key, value)| !value.is_undefined() && keep(key))
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Formats a finite number as the shortest text that reads back to the same
/// `f64`, laid out like ECMAScript's `Number#toString` but without the `+` in
/// positive exponents.
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `4.25e1`.
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;

    let mut out = String::with_capacity(digits.len() + 8);
    if n < 0.0 {
        out.push('-');
    }

    if k <= point && point <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((point - k) as usize));
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-point) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push_str(&(point - 1).to_string());
    }

    out
}
