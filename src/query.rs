//! The key/value transport the decoder reads from.
//!
//! The decoder never splits `a=1&b=2` itself. It reads through
//! [`QueryInput`], which hands out the distinct keys and, for each key, a raw
//! value that is already percent-decoded. [`QueryPairs`] parses a raw query
//! string with the `application/x-www-form-urlencoded` rules (`+` is a space,
//! `%XX` is a byte); plain string maps implement the trait too.
//!
//! ```rust
//! use serde_json_qs::{QueryInput, QueryPairs};
//!
//! let pairs = QueryPairs::parse("?a=foo+bar&b=%26&a=ignored");
//! assert_eq!(pairs.keys().collect::<Vec<_>>(), vec!["a", "b"]);
//! assert_eq!(pairs.get("a"), Some("foo bar"));
//! assert_eq!(pairs.get("b"), Some("&"));
//! ```

use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// A source of root-level keys and their percent-decoded raw values.
pub trait QueryInput {
    /// The distinct keys, in the order errors should surface.
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// The raw value for `key`.
    fn get(&self, key: &str) -> Option<&str>;
}

/// Key/value pairs parsed out of a raw query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    /// Parses a query string; a leading `?` is ignored and empty segments are
    /// skipped.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        QueryPairs {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Number of pairs, counting repeated keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All pairs in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for QueryPairs {
    type Err = std::convert::Infallible;

    fn from_str(query: &str) -> Result<Self, Self::Err> {
        Ok(QueryPairs::parse(query))
    }
}

impl From<Vec<(String, String)>> for QueryPairs {
    fn from(pairs: Vec<(String, String)>) -> Self {
        QueryPairs { pairs }
    }
}

impl QueryInput for QueryPairs {
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        QueryInput::keys(self.pairs.as_slice())
    }

    /// The first value wins when a key repeats.
    fn get(&self, key: &str) -> Option<&str> {
        QueryInput::get(self.pairs.as_slice(), key)
    }
}

impl QueryInput for [(String, String)] {
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        let distinct: IndexSet<&str> = self.iter().map(|(k, _)| k.as_str()).collect();
        Box::new(distinct.into_iter())
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl QueryInput for Vec<(String, String)> {
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        QueryInput::keys(self.as_slice())
    }

    fn get(&self, key: &str) -> Option<&str> {
        QueryInput::get(self.as_slice(), key)
    }
}

macro_rules! impl_query_input_for_map {
    ($($map:ident),*) => {
        $(
            impl QueryInput for $map<String, String> {
                fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
                    Box::new(self.keys().map(String::as_str))
                }

                fn get(&self, key: &str) -> Option<&str> {
                    $map::get(self, key).map(String::as_str)
                }
            }
        )*
    };
}

impl_query_input_for_map!(HashMap, BTreeMap, IndexMap);
