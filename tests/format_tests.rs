use chrono::{TimeZone, Utc};
use serde_json_qs::{decode, encode, from_query_str, qs, Error, Map, QueryPairs, Value};

/// `(name, decoded, encoded)`: each pair must encode to exactly `encoded` and
/// decode back to `decoded`.
fn cases() -> Vec<(&'static str, Value, &'static str)> {
    vec![
        ("nested objects", qs!({ "a": { "b": 0 } }), "a={b:0}"),
        ("multiple root properties", qs!({ "a": 0, "b": 1 }), "a=0&b=1"),
        ("multiple nested properties", qs!({ "a": { "b": 1, "c": 2 } }), "a={b:1,c:2}"),
        ("empty root property name", qs!({ "": 1 }), "=1"),
        ("empty nested property name", qs!({ "a": { "": 1 } }), "a={:1}"),
        ("root key with ampersand", qs!({ "foo&bar": 1 }), "foo%26bar=1"),
        ("root key with percent", qs!({ "foo%bar": 1 }), "foo%25bar=1"),
        ("root key with reserved", qs!({ "':(),~=": 1 }), "'%3A()%2C~%3D=1"),
        ("nested key with url chars", qs!({ "a": { "&#%+": 1 } }), "a={%26%23%25%2B:1}"),
        ("nested key with structure", qs!({ "a": { ":(),": 1 } }), "a={\\:\\(\\)\\,:1}"),
        ("nested key backslash", qs!({ "a": { "\\": 1 } }), "a={\\\\:1}"),
        (
            "number-like nested keys",
            qs!({ "a": { "-1": (-1), "0": 0 } }),
            "a={-1:-1,0:0}",
        ),
        ("empty root string", qs!({ "a": "" }), "a="),
        ("empty string property", qs!({ "a": { "b": "" } }), "a={b:,}"),
        ("empty key and string", qs!({ "a": { "": "" } }), "a={:,}"),
        ("empty string item", qs!({ "a": [""] }), "a=(,)"),
        ("two empty string items", qs!({ "a": ["", ""] }), "a=(,,)"),
        ("leading empty string item", qs!({ "a": ["", "x"] }), "a=(,x)"),
        ("string true", qs!({ "a": "true" }), "a=\\true"),
        ("string false", qs!({ "a": "false" }), "a=\\false"),
        ("string null", qs!({ "a": "null" }), "a=\\null"),
        ("string NaN", qs!({ "a": "NaN" }), "a=NaN"),
        ("string Infinity", qs!({ "a": "Infinity" }), "a=Infinity"),
        ("space", qs!({ "a": "foo bar" }), "a=foo+bar"),
        ("hash", qs!({ "a": "foo#bar" }), "a=foo%23bar"),
        ("ampersand", qs!({ "a": "foo&bar" }), "a=foo%26bar"),
        ("percent", qs!({ "a": "foo%bar" }), "a=foo%25bar"),
        ("plus", qs!({ "a": "foo+bar" }), "a=foo%2Bbar"),
        (
            "url chars in nested key and value",
            qs!({ "a": { "+%&": "+%&" } }),
            "a={%2B%25%26:%2B%25%26}",
        ),
        ("digit string", qs!({ "a": "123" }), "a=\\123"),
        ("minus string", qs!({ "a": "-123" }), "a=\\-123"),
        ("backslash string", qs!({ "a": "\\" }), "a=\\\\"),
        (
            "structural characters",
            qs!({ "a": " (){}:, " }),
            "a=+\\(\\)\\{\\}\\:\\,+",
        ),
        ("emoji", qs!({ "a": "💩" }), "a=💩"),
        ("accents", qs!({ "a": "áéíóú" }), "a=áéíóú"),
        ("cjk", qs!({ "a": "你好" }), "a=你好"),
        ("arrays", qs!({ "a": [0, 1] }), "a=(0,1)"),
        ("nested arrays", qs!({ "a": [[0, 1], [2, 3]] }), "a=((0,1),(2,3))"),
        ("object in array", qs!({ "a": [{ "b": 0 }] }), "a=({b:0})"),
        (
            "objects in array",
            qs!({ "a": [{ "b": 0 }, { "c": 1 }] }),
            "a=({b:0},{c:1})",
        ),
        (
            "deeply mixed",
            qs!({ "a": [{ "b": [{ "c": 1 }] }] }),
            "a=({b:({c:1})})",
        ),
        ("empty array", qs!({ "a": [] }), "a=()"),
        ("empty object", qs!({ "a": {} }), "a={}"),
        ("true", qs!({ "true": true }), "true=true"),
        ("false", qs!({ "false": false }), "false=false"),
        ("integer", qs!({ "num": 42 }), "num=42"),
        ("fraction", qs!({ "num": 42.5 }), "num=42.5"),
        ("negative fraction", qs!({ "num": (-42.5) }), "num=-42.5"),
        ("large exponent", qs!({ "num": 1e100 }), "num=1e100"),
        ("small exponent", qs!({ "num": 1e-100 }), "num=1e-100"),
        ("zero", qs!({ "num": 0 }), "num=0"),
        (
            "bigint",
            qs!({ "bigint": (9_007_199_254_740_992_i64) }),
            "bigint=9007199254740992n",
        ),
        ("null", qs!({ "null": null }), "null=null"),
        (
            "complex nested structures",
            qs!({
                "user": {
                    "name": "John's & Jane's",
                    "scores": [100, 95],
                    "preferences": {
                        "theme": "dark",
                        "notifications": true
                    }
                },
                "metadata": null
            }),
            "metadata=null&user={name:John's+%26+Jane's,preferences:{notifications:true,theme:dark},scores:(100,95)}",
        ),
    ]
}

fn object(value: &Value) -> &Map {
    value.as_object().expect("fixture must be an object")
}

#[test]
fn test_fixtures_encode() {
    for (name, decoded, encoded) in cases() {
        assert_eq!(encode(object(&decoded)), encoded, "{}", name);
    }
}

#[test]
fn test_fixtures_decode() {
    for (name, decoded, encoded) in cases() {
        let result = decode(&QueryPairs::parse(encoded))
            .unwrap_or_else(|e| panic!("{}: {} failed with {}", name, encoded, e));
        assert_eq!(&result, object(&decoded), "{}", name);
    }
}

#[test]
fn test_negative_zero_is_not_preserved() {
    assert_eq!(encode(object(&qs!({ "a": (-0.0) }))), "a=0");
}

#[test]
fn test_non_finite_numbers_encode_as_null() {
    assert_eq!(encode(object(&qs!({ "a": (f64::NAN) }))), "a=null");
    assert_eq!(encode(object(&qs!({ "a": (f64::INFINITY) }))), "a=null");
    assert_eq!(encode(object(&qs!({ "a": (f64::NEG_INFINITY) }))), "a=null");
}

#[test]
fn test_undefined_values() {
    assert_eq!(encode(object(&qs!({ "a": [undefined] }))), "a=(null)");
    assert_eq!(encode(object(&qs!({ "a": undefined }))), "");
    assert_eq!(encode(object(&qs!({ "a": { "b": undefined } }))), "a={}");
    assert_eq!(
        encode(object(&qs!({ "a": { "b": "", "c": undefined } }))),
        "a={b:,}"
    );
    assert_eq!(
        encode(object(&qs!({ "a": [0, undefined, 2] }))),
        "a=(0,null,2)"
    );
}

#[test]
fn test_properties_are_sorted() {
    let value = qs!({ "b": { "d": 3, "c": 2 }, "a": 1, "0": 0 });
    assert_eq!(encode(object(&value)), "0=0&a=1&b={c:2,d:3}");
}

#[test]
fn test_dates_round_trip() {
    let dates = [
        (Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(), "2024-01-15T10:30:00.000Z"),
        (Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(), "2024-01-15"),
        (Utc.with_ymd_and_hms(12345, 6, 1, 1, 0, 0).unwrap(), "%2B012345-06-01T01:00:00.000Z"),
        (Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap(), "-000001-01-01"),
    ];
    for (date, text) in dates {
        let mut map = Map::new();
        map.insert("d".to_string(), Value::Date(date));
        map.insert("n".to_string(), Value::Array(vec![Value::Date(date)]));

        let query = encode(&map);
        assert_eq!(query, format!("d={}&n=({})", text, text));
        assert_eq!(from_query_str(&query).unwrap(), map, "{}", query);
    }
}

#[test]
fn test_prototype_pollution_is_rejected() {
    let cases = [
        ("__proto__=1", "__proto__", None),
        ("a={__proto__:1}", "a", Some(1)),
        ("a={\\__proto__:1}", "a", Some(1)),
        ("a={b:1,__proto__:{isAdmin:true}}", "a", Some(5)),
        ("a=({x:{__proto__:1}})", "a", Some(5)),
    ];
    for (query, key, position) in cases {
        let err = from_query_str(query).unwrap_err();
        assert_eq!(err.key(), Some(key), "{}", query);
        assert_eq!(err.position(), position, "{}", query);
        let Error::Key { source, .. } = err else {
            panic!("expected a keyed error for {}", query);
        };
        assert!(matches!(*source, Error::ForbiddenKey { .. }), "{}", query);
    }
}

#[test]
fn test_malformed_input() {
    let cases = [
        ("a=(", "Unterminated input from position 0"),
        ("a=((", "Unterminated input from position 1"),
        ("a=(b", "Unterminated input from position 1"),
        ("a={b:", "Unterminated input from position 3"),
        ("a={b}", "Unterminated key at position 2"),
        ("a={:}", "Unexpected end of string at position 2"),
        ("a=1.n", "Cannot convert 1. to a BigInt"),
        ("a=1x", "Invalid number at position 0"),
        ("a=(a:b)", "Unexpected character ':' at position 2"),
    ];
    for (query, message) in cases {
        let err = from_query_str(query).unwrap_err();
        assert!(err.is_syntax(), "{}", query);
        assert_eq!(
            err.to_string(),
            format!("Failed to decode value for 'a' key: {}", message)
        );
        // Decoding is stateless, so the same input fails the same way.
        assert_eq!(from_query_str(query).unwrap_err(), err);
    }
}

#[test]
fn test_first_failing_key_is_reported() {
    let err = from_query_str("ok=1&bad=(&worse={").unwrap_err();
    assert_eq!(err.key(), Some("bad"));
}

#[test]
fn test_query_string_conveniences() {
    let map = from_query_str("?a=1&a=2&b=x").unwrap();
    assert_eq!(map.get("a"), Some(&Value::from(1)));
    assert_eq!(map.get("b"), Some(&Value::from("x")));
}
