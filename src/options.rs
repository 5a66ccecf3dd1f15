//! Configuration options for encoding and decoding.
//!
//! - [`EncodeOptions`]: root-level keys the encoder always leaves out
//! - [`DecodeOptions`]: date fallback and nesting limit for the decoder
//!
//! ## Examples
//!
//! ```rust
//! use serde_json_qs::{encode_with_options, qs, EncodeOptions};
//!
//! let value = qs!({ "page": 2, "session": "secret" });
//! let options = EncodeOptions::new().with_skipped_key("session");
//!
//! let query = encode_with_options(value.as_object().unwrap(), &options);
//! assert_eq!(query, "page=2");
//! ```

/// Default limit for nested arrays and objects while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the encoder.
///
/// # Examples
///
/// ```rust
/// use serde_json_qs::EncodeOptions;
///
/// let options = EncodeOptions::new().with_skipped_keys(["token", "nonce"]);
/// assert!(options.is_skipped("token"));
/// assert!(!options.is_skipped("page"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncodeOptions {
    /// Root-level keys that are never written, whatever their value.
    pub skipped_keys: Vec<String>,
}

impl EncodeOptions {
    /// Creates default options (no skipped keys).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one root-level key to always omit.
    #[must_use]
    pub fn with_skipped_key(mut self, key: impl Into<String>) -> Self {
        self.skipped_keys.push(key.into());
        self
    }

    /// Adds several root-level keys to always omit.
    #[must_use]
    pub fn with_skipped_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skipped_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if `key` is omitted at root level.
    #[inline]
    #[must_use]
    pub fn is_skipped(&self, key: &str) -> bool {
        self.skipped_keys.iter().any(|skipped| skipped == key)
    }
}

/// Configuration options for the decoder.
///
/// # Examples
///
/// ```rust
/// use serde_json_qs::DecodeOptions;
///
/// let options = DecodeOptions::new();
/// assert!(options.parse_dates);
/// assert_eq!(options.max_depth, 128);
///
/// let strict = DecodeOptions::new().with_dates(false).with_max_depth(8);
/// assert!(!strict.parse_dates);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DecodeOptions {
    /// Retry numeric tokens that fail to parse as ISO-8601 dates.
    pub parse_dates: bool,
    /// Deepest allowed nesting of arrays and objects.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            parse_dates: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Creates default options (dates on, depth limit of 128).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns the date fallback for numeric tokens on or off.
    #[must_use]
    pub fn with_dates(mut self, parse_dates: bool) -> Self {
        self.parse_dates = parse_dates;
        self
    }

    /// Sets the deepest allowed nesting of arrays and objects.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
