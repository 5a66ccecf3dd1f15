//! Error types for query string encoding and decoding.
//!
//! Every decoding failure is a syntax error carrying a human-readable message
//! and, where one exists, the byte offset of the offending character inside
//! the raw value. Failures raised while decoding a root-level value are
//! wrapped in [`Error::Key`] so the message names the field:
//!
//! ```rust
//! use serde_json_qs::from_query_str;
//!
//! let err = from_query_str("a={b}").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Failed to decode value for 'a' key: Unterminated key at position 2"
//! );
//! assert_eq!(err.key(), Some("a"));
//! assert_eq!(err.position(), Some(2));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A decoded key equals `__proto__`.
    #[error("Forbidden key{}", at_position(.position))]
    ForbiddenKey { position: Option<usize> },

    /// End of input reached while a closing delimiter was still expected.
    #[error("Unterminated input from position {position}")]
    UnterminatedInput { position: usize },

    /// A closing brace (or separator) was reached while a key was still open.
    #[error("Unterminated key at position {position}")]
    UnterminatedKey { position: usize },

    /// A closing delimiter was reached before any string data.
    #[error("Unexpected end of string at position {position}")]
    UnexpectedEndOfString { position: usize },

    /// A numeric token is neither a number nor a date.
    #[error("Invalid number at position {position}")]
    InvalidNumber { position: usize },

    /// A token ending in `n` whose prefix is not an integer.
    #[error("Cannot convert {token} to a BigInt")]
    InvalidBigInt { token: String, position: usize },

    /// A container saw something other than its separator or closer.
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { found: char, position: usize },

    /// Containers nested deeper than the configured limit.
    #[error("Nesting deeper than {limit} levels at position {position}")]
    DepthLimitExceeded { limit: usize, position: usize },

    /// Failure while decoding the value of one root-level key.
    #[error("Failed to decode value for '{key}' key: {source}")]
    Key { key: String, source: Box<Error> },

    /// The top-level value did not serialize to an object.
    #[error("Top-level value must be an object, found {0}")]
    RootNotObject(String),

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

fn at_position(position: &Option<usize>) -> String {
    position
        .map(|position| format!(" at position {}", position))
        .unwrap_or_default()
}

impl Error {
    /// Wraps an error raised while decoding the value of `key`.
    pub fn for_key(key: &str, source: Error) -> Self {
        Error::Key {
            key: key.to_string(),
            source: Box::new(source),
        }
    }

    /// Creates an unsupported type error for types that have no query string form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_json_qs::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for malformed-input errors, including keyed ones.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        match self {
            Error::Key { source, .. } => source.is_syntax(),
            Error::ForbiddenKey { .. }
            | Error::UnterminatedInput { .. }
            | Error::UnterminatedKey { .. }
            | Error::UnexpectedEndOfString { .. }
            | Error::InvalidNumber { .. }
            | Error::InvalidBigInt { .. }
            | Error::UnexpectedCharacter { .. }
            | Error::DepthLimitExceeded { .. } => true,
            Error::RootNotObject(_)
            | Error::UnsupportedType(_)
            | Error::Custom(_)
            | Error::Io(_) => false,
        }
    }

    /// Byte offset of the offending character within the raw value, if known.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Key { source, .. } => source.position(),
            Error::ForbiddenKey { position } => *position,
            Error::UnterminatedInput { position }
            | Error::UnterminatedKey { position }
            | Error::UnexpectedEndOfString { position }
            | Error::InvalidNumber { position }
            | Error::InvalidBigInt { position, .. }
            | Error::UnexpectedCharacter { position, .. }
            | Error::DepthLimitExceeded { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// The root-level key whose value failed to decode.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::Key { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_key_messages() {
        assert_eq!(
            Error::ForbiddenKey { position: None }.to_string(),
            "Forbidden key"
        );
        assert_eq!(
            Error::ForbiddenKey { position: Some(5) }.to_string(),
            "Forbidden key at position 5"
        );
    }

    #[test]
    fn test_keyed_error_delegates() {
        let err = Error::for_key("a", Error::UnterminatedInput { position: 3 });
        assert_eq!(
            err.to_string(),
            "Failed to decode value for 'a' key: Unterminated input from position 3"
        );
        assert!(err.is_syntax());
        assert_eq!(err.position(), Some(3));
        assert_eq!(err.key(), Some("a"));
    }

    #[test]
    fn test_non_syntax_errors() {
        let err = Error::RootNotObject("array".to_string());
        assert!(!err.is_syntax());
        assert_eq!(err.position(), None);
        assert_eq!(err.key(), None);
    }
}
