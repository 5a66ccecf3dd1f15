/// Builds a [`Value`](crate::Value) with JSON-like syntax.
///
/// `undefined` produces [`Value::Undefined`](crate::Value::Undefined), which the
/// encoder leaves out. Any other expression goes through
/// [`to_value`](crate::to_value).
///
/// ```rust
/// use serde_json_qs::{encode, qs};
///
/// let value = qs!({
///     "name": "Alice",
///     "tags": ["admin", "user"],
///     "nickname": undefined
/// });
/// assert_eq!(encode(value.as_object().unwrap()), "name=Alice&tags=(admin,user)");
/// ```
#[macro_export]
macro_rules! qs {
    (null) => {
        $crate::Value::Null
    };

    (undefined) => {
        $crate::Value::Undefined
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::qs!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::qs!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Value};

    #[test]
    fn test_qs_macro_primitives() {
        assert_eq!(qs!(null), Value::Null);
        assert_eq!(qs!(undefined), Value::Undefined);
        assert_eq!(qs!(true), Value::Bool(true));
        assert_eq!(qs!(false), Value::Bool(false));
        assert_eq!(qs!(42), Value::Number(42.0));
        assert_eq!(qs!(3.5), Value::Number(3.5));
        assert_eq!(qs!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_qs_macro_arrays() {
        assert_eq!(qs!([]), Value::Array(vec![]));
        assert_eq!(
            qs!([1, "", null]),
            Value::Array(vec![Value::Number(1.0), Value::from(""), Value::Null])
        );
    }

    #[test]
    fn test_qs_macro_objects() {
        assert_eq!(qs!({}), Value::Object(Map::new()));

        let obj = qs!({
            "name": "Alice",
            "nested": { "age": 30 }
        });

        let Value::Object(map) = obj else {
            panic!("Expected object");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&Value::from("Alice")));
        assert_eq!(
            map.get("nested").and_then(|v| v.as_object()).and_then(|o| o.get("age")),
            Some(&Value::Number(30.0))
        );
    }
}
