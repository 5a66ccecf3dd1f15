//! # serde_json_qs
//!
//! A compact, URL-safe query string format for JSON-like values, with a
//! Serde-compatible codec.
//!
//! ## What is it?
//!
//! Plain query strings can only carry flat strings. This format nests
//! objects and arrays inside ordinary `key=value` pairs while staying readable
//! in a URL bar: arrays are written in `()`, objects in `{}`, and a backslash
//! escape replaces most percent-encoding.
//!
//! ```text
//! filter={price:{max:100},tags:(new,sale)}&page=2&q=red+shoes
//! ```
//!
//! ## Key Features
//!
//! - **Canonical**: Object keys are sorted at every level, so equal values
//!   always encode to the same string (and hit the same cache entry)
//! - **Typed**: Numbers, booleans, `null`, big integers and dates survive the
//!   round trip without a schema
//! - **Serde Compatible**: Works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Hardened**: The `__proto__` key is rejected and nesting depth is bounded
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_json_qs = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Typed Structs
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_json_qs::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Search {
//!     q: String,
//!     page: u32,
//!     tags: Vec<String>,
//! }
//!
//! let search = Search {
//!     q: "red shoes".to_string(),
//!     page: 2,
//!     tags: vec!["new".to_string(), "sale".to_string()],
//! };
//!
//! let query = to_string(&search).unwrap();
//! assert_eq!(query, "page=2&q=red+shoes&tags=(new,sale)");
//!
//! let back: Search = from_str(&query).unwrap();
//! assert_eq!(back, search);
//! ```
//!
//! ### Dynamic Values with the qs! Macro
//!
//! ```rust
//! use serde_json_qs::{encode, from_query_str, qs};
//!
//! let value = qs!({
//!     "filter": { "status": "active", "ids": [1, 2] },
//!     "empty": ""
//! });
//! let query = encode(value.as_object().unwrap());
//! assert_eq!(query, "empty=&filter={ids:(1,2),status:active}");
//!
//! let map = from_query_str(&query).unwrap();
//! assert_eq!(map.get("filter"), value.as_object().unwrap().get("filter"));
//! ```
//!
//! ## Errors
//!
//! Decoding stops at the first malformed value. The error names the root key
//! and, for syntax errors, the byte offset inside that key's value:
//!
//! ```rust
//! use serde_json_qs::from_query_str;
//!
//! let err = from_query_str("a=(1,2").unwrap_err();
//! assert_eq!(err.key(), Some("a"));
//! assert!(err.is_syntax());
//! ```
//!
//! ## Modules
//!
//! - [`encode`]: value to query string
//! - [`decode`]: query string to value
//! - [`query`]: the key/value transport the decoder reads from
//! - [`ser`] and [`de`]: the bridge between Rust types and [`Value`]
//! - [`format`]: the text format itself
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Typed structs in and out of a query string
//! - **`dynamic_values.rs`** - Working with `Value` dynamically
//! - **`custom_options.rs`** - Skipped keys, date handling and depth limits
//! - **`query_strings.rs`** - Parsed parameters, hostile input and error reporting
//!
//! Run any example with: `cargo run --example <name>`

mod chars;

pub mod de;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod query;
pub mod ser;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use decode::{decode, decode_value, decode_value_with_options, decode_with_options, Parser};
pub use encode::{encode, encode_value, encode_with_options, Encoder};
pub use error::{Error, Result};
pub use map::Map;
pub use options::{DecodeOptions, EncodeOptions, DEFAULT_MAX_DEPTH};
pub use query::{QueryInput, QueryPairs};
pub use ser::{to_value, ValueSerializer};
pub use value::{Value, MAX_SAFE_INTEGER};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses and decodes a raw query string such as `a=1&b=(x,y)`.
///
/// A leading `?` is ignored. When a key repeats, its first value is used.
///
/// # Errors
///
/// Returns the first decoding error, wrapped with the offending key.
pub fn from_query_str(query: &str) -> Result<Map> {
    decode(&QueryPairs::parse(query))
}

/// Like [`from_query_str`], with custom decode options.
///
/// # Errors
///
/// Returns the first decoding error, wrapped with the offending key.
pub fn from_query_str_with_options(query: &str, options: &DecodeOptions) -> Result<Map> {
    decode_with_options(&QueryPairs::parse(query), options)
}

/// Serialize any `T: Serialize` to a query string.
///
/// `T` must serialize to an object, e.g. a struct or a map.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_json_qs::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: -2 }).unwrap(), "x=1&y=-2");
/// ```
///
/// # Errors
///
/// Returns [`Error::RootNotObject`] when `T` is not object-shaped, or the
/// serialization error of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a query string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_json_qs::{to_string_with_options, EncodeOptions};
///
/// #[derive(Serialize)]
/// struct Request { page: u32, token: String }
///
/// let request = Request { page: 1, token: "secret".to_string() };
/// let options = EncodeOptions::new().with_skipped_key("token");
/// assert_eq!(to_string_with_options(&request, &options).unwrap(), "page=1");
/// ```
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Object(object) => Ok(encode_with_options(&object, options)),
        other => Err(Error::RootNotObject(other.kind().to_string())),
    }
}

/// Serialize any `T: Serialize` to a writer as a query string.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let query = to_string(value)?;
    writer
        .write_all(query.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a raw query string.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json_qs::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("?x=1&y=-2").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the query string is malformed or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(query: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(query, &DecodeOptions::default())
}

/// Like [`from_str`], with custom decode options.
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(query: &str, options: &DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let object = from_query_str_with_options(query, options)?;
    from_value(Value::Object(object))
}

/// Deserialize an instance of type `T` from any [`QueryInput`], such as a
/// map of already-parsed request parameters.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json_qs::from_query;
/// use std::collections::HashMap;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Filter { ids: Vec<u32> }
///
/// let mut params = HashMap::new();
/// params.insert("ids".to_string(), "(1,2,3)".to_string());
///
/// let filter: Filter = from_query(&params).unwrap();
/// assert_eq!(filter.ids, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_query<T, I>(input: &I) -> Result<T>
where
    T: DeserializeOwned,
    I: QueryInput + ?Sized,
{
    from_value(Value::Object(decode(input)?))
}

/// Deserialize an instance of type `T` from an I/O stream holding a query
/// string.
///
/// # Errors
///
/// Returns an error if reading fails, the query string is malformed, or the
/// data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(string.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        nickname: Option<String>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice Smith".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "".to_string()],
            nickname: None,
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let query = to_string(&point).unwrap();
        assert_eq!(query, "x=1&y=2");
        let point_back: Point = from_str(&query).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = alice();
        let query = to_string(&user).unwrap();
        assert_eq!(query, "active=true&id=123&name=Alice+Smith&tags=(admin,,)");
        let user_back: User = from_str(&query).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_root_must_be_object() {
        assert_eq!(
            to_string(&vec![1, 2]).unwrap_err(),
            Error::RootNotObject("array".to_string())
        );
    }

    #[test]
    fn test_to_writer_and_from_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice()).unwrap();
        let back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, alice());
    }

    #[test]
    fn test_skipped_keys() {
        let options = EncodeOptions::new().with_skipped_key("tags");
        let query = to_string_with_options(&alice(), &options).unwrap();
        assert_eq!(query, "active=true&id=123&name=Alice+Smith");
    }

    #[test]
    fn test_decode_errors_name_the_key() {
        let err = from_str::<Point>("x=1&y=(").unwrap_err();
        assert_eq!(err.key(), Some("y"));
        assert_eq!(err.position(), Some(0));
        assert!(err.is_syntax());
    }

    #[test]
    fn test_public_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Value>();
        assert_send_sync::<Map>();
        assert_send_sync::<Error>();
        assert_send_sync::<EncodeOptions>();
        assert_send_sync::<DecodeOptions>();
    }
}
