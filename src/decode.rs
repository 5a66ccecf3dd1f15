//! Query string decoder.
//!
//! Decoding happens one root-level key at a time. The raw value for each key
//! (already percent-decoded by the [`QueryInput`]) is handed to a [`Parser`],
//! a recursive-descent reader that carries its byte cursor through every
//! nested array and object.
//!
//! The value type is sniffed from the first character:
//!
//! | First character             | Mode                                    |
//! |-----------------------------|-----------------------------------------|
//! | `'`                         | string                                  |
//! | `(`                         | array                                   |
//! | `{`                         | object                                  |
//! | digit, or `+`/`-` and digit | number, big integer, or date            |
//! | anything else               | `null`/`true`/`false`, otherwise string |
//!
//! ```rust
//! use serde_json_qs::{decode, QueryPairs, Value};
//!
//! let map = decode(&QueryPairs::parse("a=(1,\\true,{b:x})")).unwrap();
//! let items = map.get("a").and_then(Value::as_array).unwrap();
//! assert_eq!(items[0], Value::from(1));
//! assert_eq!(items[1], Value::from("true"));
//! ```

use crate::chars::{
    is_digit, is_string_end, is_value_end, CLOSE_CURLY, CLOSE_PAREN, COLON, COMMA, ESCAPE, FORBIDDEN_KEY,
    LOWER_N, MINUS, OPEN_CURLY, OPEN_PAREN, PLUS, QUOTE,
};
use crate::error::{Error, Result};
use crate::{DecodeOptions, Map, QueryInput, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use num_bigint::BigInt;
use std::str::FromStr;
use tracing::debug;

const CONSTANTS: [(&str, Value); 3] = [
    ("null", Value::Null),
    ("true", Value::Bool(true)),
    ("false", Value::Bool(false)),
];

/// Longest constant, in bytes.
const MAX_CONSTANT_LEN: usize = 5;

/// Decodes every key of `input` with the default [`DecodeOptions`].
///
/// # Errors
///
/// Fails on the first key whose value is malformed, and on a root key equal to
/// `__proto__`. The error is an [`Error::Key`] naming the offending key.
///
/// # Examples
///
/// ```rust
/// use serde_json_qs::{decode, QueryPairs, Value};
///
/// let map = decode(&QueryPairs::parse("a={b:1,c:+x+}&d=null")).unwrap();
/// assert_eq!(map.get("d"), Some(&Value::Null));
///
/// let err = decode(&QueryPairs::parse("a={b}")).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Failed to decode value for 'a' key: Unterminated key at position 2"
/// );
/// ```
pub fn decode<I: QueryInput + ?Sized>(input: &I) -> Result<Map> {
    decode_with_options(input, &DecodeOptions::default())
}

/// Decodes every key of `input` with custom options.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_with_options<I: QueryInput + ?Sized>(
    input: &I,
    options: &DecodeOptions,
) -> Result<Map> {
    let mut result = Map::new();
    for key in input.keys() {
        if key == FORBIDDEN_KEY {
            debug!(key, "rejected forbidden root key");
            return Err(Error::for_key(key, Error::ForbiddenKey { position: None }));
        }

        let raw = input.get(key).unwrap_or_default();
        let value = decode_value_with_options(raw, options).map_err(|error| {
            debug!(key, %error, "failed to decode query value");
            Error::for_key(key, error)
        })?;
        result.insert(key.to_string(), value);
    }
    Ok(result)
}

/// Decodes a single root-level raw value, e.g. the `(1,2)` of `a=(1,2)`.
///
/// Text after a complete root value is ignored.
///
/// # Errors
///
/// Returns the syntax error of the value, without a key wrapper.
pub fn decode_value(raw: &str) -> Result<Value> {
    decode_value_with_options(raw, &DecodeOptions::default())
}

/// Like [`decode_value`], with custom options.
///
/// # Errors
///
/// See [`decode_value`].
pub fn decode_value_with_options(raw: &str, options: &DecodeOptions) -> Result<Value> {
    Parser::new(raw, options).parse_value(false)
}

/// Recursive-descent reader over one raw value.
///
/// `pos` always sits on a character boundary. Each `parse_*` step leaves it
/// one past the last character it consumed.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    options: &'a DecodeOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &'a DecodeOptions) -> Self {
        Parser {
            input,
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Current byte offset into the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Decodes one value starting at the cursor.
    ///
    /// `nested` values end at the next `,` `)` or `}`; a root value runs to
    /// the end of the input.
    pub fn parse_value(&mut self, nested: bool) -> Result<Value> {
        let start = self.pos;
        match self.peek() {
            Some(QUOTE) => Ok(Value::String(self.parse_string()?)),
            Some(OPEN_PAREN) => self.parse_array(),
            Some(OPEN_CURLY) => self.parse_object(),
            Some(byte) if is_digit(byte) => self.parse_number(nested),
            Some(PLUS | MINUS) if self.peek_at(start + 1).map_or(false, is_digit) => {
                self.parse_number(nested)
            }
            _ => {
                let end = if nested {
                    self.find_end(start)?
                } else {
                    self.input.len()
                };
                if let Some(constant) = self.constant(start, end) {
                    self.pos = end;
                    return Ok(constant);
                }
                Ok(Value::String(self.parse_string()?))
            }
        }
    }

    fn constant(&self, start: usize, end: usize) -> Option<Value> {
        let len = end - start;
        if len == 0 || len > MAX_CONSTANT_LEN || self.peek() == Some(ESCAPE) {
            return None;
        }
        let token = &self.input[start..end];
        CONSTANTS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, value)| value.clone())
    }

    /// Reads string data up to an unescaped `:` `,` `)` or `}`.
    fn parse_string(&mut self) -> Result<String> {
        let mut result = String::new();
        while let Some(byte) = self.peek() {
            match byte {
                CLOSE_CURLY | CLOSE_PAREN if result.is_empty() => {
                    return Err(Error::UnexpectedEndOfString { position: self.pos });
                }
                _ if is_string_end(byte) => break,
                ESCAPE => {
                    self.pos += 1;
                    self.push_char(&mut result);
                }
                _ => self.push_char(&mut result),
            }
        }
        Ok(result)
    }

    fn parse_number(&mut self, nested: bool) -> Result<Value> {
        let start = self.pos;
        let end = if nested {
            self.find_end(start + 1)?
        } else {
            self.input.len()
        };
        self.pos = end;

        let token = &self.input[start..end];
        if token.as_bytes().last() == Some(&LOWER_N) {
            return parse_bigint(&token[..token.len() - 1], start).map(Value::BigInt);
        }
        if let Ok(number) = f64::from_str(token) {
            return Ok(Value::Number(number));
        }
        if self.options.parse_dates {
            if let Some(date) = parse_date(token) {
                return Ok(Value::Date(date));
            }
        }
        Err(Error::InvalidNumber { position: start })
    }

    fn parse_array(&mut self) -> Result<Value> {
        let open = self.pos;
        self.enter(open)?;
        self.pos += 1;

        let mut array = Vec::new();
        while let Some(byte) = self.peek() {
            match byte {
                COMMA => {
                    array.push(Value::String(String::new()));
                    self.pos += 1;
                }
                CLOSE_PAREN => return Ok(self.close(Value::Array(array))),
                _ => {
                    array.push(self.parse_value(true)?);
                    match self.peek() {
                        Some(COMMA) => self.pos += 1,
                        Some(CLOSE_PAREN) => return Ok(self.close(Value::Array(array))),
                        Some(_) => return Err(self.unexpected()),
                        None => break,
                    }
                }
            }
        }
        Err(Error::UnterminatedInput { position: open })
    }

    fn parse_object(&mut self) -> Result<Value> {
        let open = self.pos;
        self.enter(open)?;
        self.pos += 1;

        let mut object = Map::new();
        let mut key = String::new();
        let mut key_pos = self.pos;
        while let Some(byte) = self.peek() {
            match byte {
                COLON => {
                    if key == FORBIDDEN_KEY {
                        return Err(Error::ForbiddenKey {
                            position: Some(key_pos),
                        });
                    }
                    self.pos += 1;
                    let value = self.parse_value(true)?;
                    object.insert(std::mem::take(&mut key), value);
                    match self.peek() {
                        Some(COMMA) => {
                            self.pos += 1;
                            key_pos = self.pos;
                        }
                        Some(CLOSE_CURLY) => return Ok(self.close(Value::Object(object))),
                        Some(_) => return Err(self.unexpected()),
                        None => break,
                    }
                }
                CLOSE_CURLY if key.is_empty() => return Ok(self.close(Value::Object(object))),
                CLOSE_CURLY | COMMA => {
                    return Err(Error::UnterminatedKey { position: self.pos });
                }
                ESCAPE => {
                    self.pos += 1;
                    self.push_char(&mut key);
                }
                _ => self.push_char(&mut key),
            }
        }
        Err(Error::UnterminatedInput { position: open })
    }

    /// Index of the next `,` `)` or `}` at or after `from`.
    fn find_end(&self, from: usize) -> Result<usize> {
        self.input.as_bytes()[from.min(self.input.len())..]
            .iter()
            .position(|&byte| is_value_end(byte))
            .map(|offset| from + offset)
            .ok_or(Error::UnterminatedInput { position: from })
    }

    fn enter(&mut self, position: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
                position,
            });
        }
        Ok(())
    }

    /// Consumes the closing delimiter of the current container.
    fn close(&mut self, container: Value) -> Value {
        self.pos += 1;
        self.depth -= 1;
        container
    }

    fn unexpected(&self) -> Error {
        Error::UnexpectedCharacter {
            found: self.input[self.pos..].chars().next().unwrap_or_default(),
            position: self.pos,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.peek_at(self.pos)
    }

    #[inline]
    fn peek_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }

    /// Appends the character under the cursor, if any, and steps past it.
    fn push_char(&mut self, out: &mut String) {
        if let Some(ch) = self.input[self.pos..].chars().next() {
            out.push(ch);
            self.pos += ch.len_utf8();
        }
    }
}

fn parse_bigint(digits: &str, position: usize) -> Result<BigInt> {
    let invalid = || Error::InvalidBigInt {
        token: digits.to_string(),
        position,
    };
    let (negative, unsigned) = match digits.as_bytes().first() {
        Some(&MINUS) => (true, &digits[1..]),
        Some(&PLUS) => (false, &digits[1..]),
        _ => (false, digits),
    };
    if unsigned.is_empty() || !unsigned.bytes().all(is_digit) {
        return Err(invalid());
    }
    let magnitude = BigInt::from_str(unsigned).map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// RFC 3339, then `…Z` with extended years, then a bare date at UTC midnight.
fn parse_date(token: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(token) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(local) = token.strip_suffix('Z') {
        if let Ok(naive) = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    let day = NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}
