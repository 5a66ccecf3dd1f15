use chrono::{TimeZone, Utc};
use serde_json_qs::{encode, qs, Map, Value};

#[test]
fn test_qs_macro_null_and_undefined() {
    assert_eq!(qs!(null), Value::Null);
    assert_eq!(qs!(undefined), Value::Undefined);
}

#[test]
fn test_qs_macro_booleans() {
    assert_eq!(qs!(true), Value::Bool(true));
    assert_eq!(qs!(false), Value::Bool(false));
}

#[test]
fn test_qs_macro_numbers() {
    assert_eq!(qs!(42), Value::Number(42.0));
    assert_eq!(qs!(3.5), Value::Number(3.5));
    assert_eq!(qs!(-123), Value::Number(-123.0));
    assert!(qs!(u64::MAX).is_bigint());
}

#[test]
fn test_qs_macro_strings() {
    assert_eq!(qs!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(qs!(""), Value::String(String::new()));
}

#[test]
fn test_qs_macro_arrays() {
    assert_eq!(qs!([]), Value::Array(vec![]));

    let mixed_array = qs!([1, "hello", true, null, undefined]);
    assert_eq!(
        mixed_array,
        Value::Array(vec![
            Value::Number(1.0),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
            Value::Undefined,
        ])
    );
}

#[test]
fn test_qs_macro_nested() {
    let nested = qs!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    let Value::Object(ref obj) = nested else {
        panic!("Expected object");
    };
    assert_eq!(obj.len(), 3);

    let user = obj.get("user").and_then(Value::as_object).unwrap();
    assert_eq!(user.get("id"), Some(&Value::Number(123.0)));
    assert_eq!(user.get("name").and_then(Value::as_str), Some("Bob"));
    assert_eq!(user.get("active"), Some(&Value::Bool(true)));

    let tags = obj.get("tags").and_then(Value::as_array).unwrap();
    assert_eq!(tags, &vec![Value::from("admin"), Value::from("developer")]);

    assert_eq!(
        encode(obj),
        "count=42&tags=(admin,developer)&user={active:true,id:123,name:Bob}"
    );
}

#[test]
fn test_qs_macro_expressions() {
    let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    let mut value = qs!({ "ids": (vec![1, 2]), "label": (format!("v{}", 2)) });
    value
        .as_object_mut()
        .unwrap()
        .insert("when".to_string(), Value::Date(date));
    assert_eq!(
        encode(value.as_object().unwrap()),
        "ids=(1,2)&label=v2&when=2024-01-15"
    );
}

#[test]
fn test_value_methods() {
    let null_val = qs!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_undefined());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_array());
    assert!(!null_val.is_object());

    let bool_val = qs!(true);
    assert_eq!(bool_val.as_bool(), Some(true));

    let num_val = qs!(7);
    assert_eq!(num_val.as_i64(), Some(7));
    assert_eq!(num_val.as_f64(), Some(7.0));

    let str_val = qs!("hello");
    assert_eq!(str_val.as_str(), Some("hello"));

    let array_val = qs!([1, 2, 3]);
    assert_eq!(array_val.as_array().map(Vec::len), Some(3));

    let obj_val = qs!({"key": "value"});
    assert_eq!(obj_val.as_object().map(Map::len), Some(1));
}

#[test]
fn test_value_display_uses_nested_form() {
    assert_eq!(qs!({ "a": [1, ""] }).to_string(), "{a:(1,,)}");
    assert_eq!(qs!("true").to_string(), "\\true");
    assert_eq!(qs!(" x").to_string(), "+x");
}
