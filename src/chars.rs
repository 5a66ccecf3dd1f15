//! Byte constants and classifiers shared by the encoder and decoder.
//!
//! Every structural character of the format is ASCII, so both halves of the
//! codec work on UTF-8 bytes: a multi-byte sequence never contains an ASCII
//! byte, which keeps every delimiter position on a `char` boundary.

pub(crate) const AMPERSAND: u8 = b'&';
pub(crate) const CLOSE_CURLY: u8 = b'}';
pub(crate) const CLOSE_PAREN: u8 = b')';
pub(crate) const COLON: u8 = b':';
pub(crate) const COMMA: u8 = b',';
pub(crate) const ESCAPE: u8 = b'\\';
pub(crate) const HASH: u8 = b'#';
pub(crate) const LOWER_N: u8 = b'n';
pub(crate) const MINUS: u8 = b'-';
pub(crate) const OPEN_CURLY: u8 = b'{';
pub(crate) const OPEN_PAREN: u8 = b'(';
pub(crate) const PERCENT: u8 = b'%';
pub(crate) const PLUS: u8 = b'+';
pub(crate) const QUOTE: u8 = b'\'';
pub(crate) const SPACE: u8 = b' ';

/// The one object key the decoder refuses at every nesting level.
pub(crate) const FORBIDDEN_KEY: &str = "__proto__";

#[inline]
pub(crate) const fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// Bytes that end a nested scalar: `,` `)` `}`.
#[inline]
pub(crate) const fn is_value_end(byte: u8) -> bool {
    matches!(byte, COMMA | CLOSE_PAREN | CLOSE_CURLY)
}

/// Bytes that end a string or key: `:` `,` `)` `}`.
#[inline]
pub(crate) const fn is_string_end(byte: u8) -> bool {
    matches!(byte, COLON | COMMA | CLOSE_PAREN | CLOSE_CURLY)
}

/// Structural bytes that get a backslash when they appear inside string data.
#[inline]
pub(crate) const fn needs_backslash(byte: u8) -> bool {
    matches!(
        byte,
        OPEN_PAREN | CLOSE_PAREN | COMMA | COLON | OPEN_CURLY | CLOSE_CURLY | ESCAPE
    )
}

/// Bytes the URL layer would misread, written as `%XX`.
#[inline]
pub(crate) const fn percent_escape(byte: u8) -> Option<&'static str> {
    match byte {
        HASH => Some("%23"),
        PERCENT => Some("%25"),
        AMPERSAND => Some("%26"),
        PLUS => Some("%2B"),
        _ => None,
    }
}

/// Returns `true` when a string starting with `text` would be sniffed as a
/// number by the decoder.
pub(crate) fn starts_like_number(text: &str) -> bool {
    match text.as_bytes() {
        [first, ..] if is_digit(*first) => true,
        [MINUS, ..] => true,
        [PLUS, second, ..] => is_digit(*second),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_like_prefixes() {
        assert!(starts_like_number("123"));
        assert!(starts_like_number("-abc"));
        assert!(starts_like_number("-"));
        assert!(starts_like_number("+1"));
        assert!(!starts_like_number("+a"));
        assert!(!starts_like_number("abc"));
        assert!(!starts_like_number(""));
    }

    #[test]
    fn test_delimiter_classes() {
        assert!(is_value_end(b','));
        assert!(!is_value_end(b':'));
        assert!(is_string_end(b':'));
        assert!(needs_backslash(b'\\'));
        assert!(!needs_backslash(b'a'));
        assert_eq!(percent_escape(b'+'), Some("%2B"));
        assert_eq!(percent_escape(b'a'), None);
    }
}
