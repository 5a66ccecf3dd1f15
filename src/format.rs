//! Query string format reference.
//!
//! This module only holds documentation. It describes the text this crate
//! writes and reads.
//!
//! # Overview
//!
//! A query string is a list of `key=value` pairs joined by `&`. Each root value
//! is written in a compact notation that nests without percent-encoding the
//! structural characters:
//!
//! ```text
//! filter={status:active,tags:(new,sale)}&page=2&q=red+shoes
//! ```
//!
//! # Grammar
//!
//! ```text
//! query      := pair ("&" pair)*
//! pair       := key "=" value
//! value      := "null" | "true" | "false" | number | bigint | date
//!             | string | array | object
//! array      := "(" (value ("," value)*)? ")"
//! object     := "{" (member ("," member)*)? "}"
//! member     := key ":" value
//! number     := ["-" | "+"] digit+ ["." digit+] [("e" | "E") ["-" | "+"] digit+]
//! bigint     := ["-"] digit+ "n"
//! date       := ISO-8601, e.g. 2024-01-15T10:30:00.000Z or 2024-01-15
//! string     := (escaped-char | unescaped-char)*
//! ```
//!
//! Root keys are percent-encoded like `encodeURIComponent` would. Nested keys
//! use the string escapes below.
//!
//! # Values
//!
//! | Value                      | Written as                |
//! |----------------------------|---------------------------|
//! | `null`, `true`, `false`    | `null`, `true`, `false`   |
//! | number                     | `1`, `-0.5`, `1e21`       |
//! | `NaN`, `±Infinity`         | `null`                    |
//! | big integer                | `123n`                    |
//! | date at UTC midnight       | `2024-01-15`              |
//! | other date                 | `2024-01-15T10:30:00.000Z`|
//! | array                      | `(a,b)`                   |
//! | object                     | `{a:1,b:2}`               |
//! | undefined property         | omitted                   |
//!
//! Object keys are sorted at every level, so equal values always produce the
//! same text.
//!
//! # Strings
//!
//! | Character                  | Written as       |
//! |----------------------------|------------------|
//! | space                      | `+`              |
//! | `#` `%` `&` `+`            | `%23` `%25` `%26` `%2B` |
//! | `(` `)` `,` `:` `{` `}` `\`| backslash-escaped|
//! | anything else              | itself           |
//!
//! A string that would otherwise read as something else gets a leading
//! backslash: `\true`, `\null`, `\-1`, `\2024-01-15`.
//!
//! ```rust
//! use serde_json_qs::{encode, qs};
//!
//! let value = qs!({ "a": "true", "b": "-1", "c": "x y" });
//! assert_eq!(encode(value.as_object().unwrap()), "a=\\true&b=\\-1&c=x+y");
//! ```
//!
//! # Empty strings
//!
//! An empty string is written as nothing. When it is the last item of an array
//! or object, an extra `,` is written so the closing delimiter is not mistaken
//! for the end of a non-empty value:
//!
//! ```rust
//! use serde_json_qs::{encode, qs};
//!
//! assert_eq!(encode(qs!({ "a": [""] }).as_object().unwrap()), "a=(,)");
//! assert_eq!(encode(qs!({ "a": ["", ""] }).as_object().unwrap()), "a=(,,)");
//! assert_eq!(encode(qs!({ "a": { "b": "" } }).as_object().unwrap()), "a={b:,}");
//! ```
//!
//! # Decoding
//!
//! The decoder sniffs each value's type from its first character: `(` starts
//! an array, `{` an object, and a digit (or a sign and a digit) a number. A
//! leading `'` makes a string, and is kept as part of it. Anything else is a
//! string unless it is exactly `null`, `true` or `false`.
//!
//! A number token ending in `n` is a big integer. One that does not parse as a
//! number is tried as a date.
//!
//! The key `__proto__` is rejected at every level.
