//! Serialization of Rust data into [`Value`] trees.
//!
//! [`ValueSerializer`] turns any `T: Serialize` into a [`Value`], which the
//! encoder then writes out as a query string. The crate-root [`to_value`],
//! [`to_string`](crate::to_string) and [`to_writer`](crate::to_writer) are the
//! usual entry points.
//!
//! ## Conventions
//!
//! - Integers within ±(2^53 − 1) become [`Value::Number`]; wider ones become
//!   [`Value::BigInt`] so no precision is lost.
//! - `None` becomes [`Value::Undefined`], so optional struct fields that are
//!   unset disappear from the query string instead of encoding as `null`.
//! - Enums are externally tagged: `Unit` is the string `"Unit"`, other
//!   variants are a one-entry object keyed by the variant name.
//! - Map keys may be strings, chars, numbers, booleans or big integers; they
//!   are stringified.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_json_qs::{to_value, Value};
//!
//! #[derive(Serialize)]
//! struct Filter {
//!     page: u32,
//!     tag: Option<String>,
//! }
//!
//! let value = to_value(&Filter { page: 2, tag: None }).unwrap();
//! let object = value.as_object().unwrap();
//! assert_eq!(object.get("page"), Some(&Value::from(2)));
//! assert_eq!(object.get("tag"), Some(&Value::Undefined));
//! ```

use crate::encode::format_number;
use crate::{Error, Map, Result, Value};
use serde::{ser, Serialize};

/// Serializer whose output is a [`Value`] tree.
pub struct ValueSerializer;

/// Collects sequence and tuple elements into a [`Value::Array`].
pub struct SerializeVec {
    vec: Vec<Value>,
}

/// Collects tuple variant fields, then wraps them under the variant name.
pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

/// Collects map entries and struct fields into a [`Value::Object`].
pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

/// Collects struct variant fields, then wraps them under the variant name.
pub struct SerializeStructVariant {
    name: &'static str,
    map: Map,
}

/// Serializes any `T: Serialize` into a [`Value`].
///
/// # Errors
///
/// Fails when a map key is not a string, number or boolean, or when the
/// `Serialize` impl itself reports an error.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

fn tagged(name: &'static str, value: Value) -> Value {
    let mut object = Map::with_capacity(1);
    object.insert(name.to_string(), value);
    Value::Object(object)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(
            v.iter().map(|&b| Value::Number(b.into())).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Undefined)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: Map::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: Map::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.name, Value::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key_string(to_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.name, Value::Object(self.map)))
    }
}

fn key_string(key: Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(format_number(n)),
        Value::BigInt(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::unsupported_type(&format!(
            "{} as a map key",
            other.kind()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Point(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_integers_split_at_safe_range() {
        assert_eq!(
            to_value(&9_007_199_254_740_991_i64).unwrap(),
            Value::Number(9_007_199_254_740_991.0)
        );
        assert_eq!(
            to_value(&9_007_199_254_740_992_i64).unwrap(),
            Value::BigInt(BigInt::from(9_007_199_254_740_992_i64))
        );
        assert_eq!(
            to_value(&u128::MAX).unwrap(),
            Value::BigInt(BigInt::from(u128::MAX))
        );
        assert_eq!(to_value(&-7_i8).unwrap(), Value::Number(-7.0));
    }

    #[test]
    fn test_none_is_undefined() {
        assert_eq!(to_value(&None::<u8>).unwrap(), Value::Undefined);
        assert_eq!(to_value(&Some(1_u8)).unwrap(), Value::Number(1.0));
        assert_eq!(to_value(&()).unwrap(), Value::Null);
    }

    #[test]
    fn test_enums_are_externally_tagged() {
        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));
        assert_eq!(encode_value(&Shape::Circle(1.5)), "{Circle:1.5}");
        assert_eq!(encode_value(&Shape::Point(1, -2)), "{Point:(1,-2)}");
        assert_eq!(encode_value(&Shape::Rect { w: 3, h: 4 }), "{Rect:{h:4,w:3}}");
    }

    #[test]
    fn test_map_keys_are_stringified() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(20, "twenty");
        let value = to_value(&map).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("1"), Some(&Value::from("one")));
        assert_eq!(object.get("20"), Some(&Value::from("twenty")));

        let mut bad = BTreeMap::new();
        bad.insert(vec![1], 1);
        assert_eq!(
            to_value(&bad).unwrap_err(),
            Error::UnsupportedType("array as a map key".to_string())
        );
    }

    fn encode_value<T: Serialize>(value: &T) -> String {
        crate::encode_value(&to_value(value).unwrap())
    }
}
