//! Deserialization of [`Value`] trees into Rust data.
//!
//! The decoder produces a [`Value`]; [`ValueDeserializer`] hands it to any
//! `T: Deserialize`. The crate-root [`from_str`](crate::from_str),
//! [`from_query`](crate::from_query) and [`from_value`] wrap this.
//!
//! A few conversions are lenient, since query strings carry less type
//! information than Rust structs:
//!
//! - [`Value::Null`] and [`Value::Undefined`] both read as `None`.
//! - String targets also accept numbers, big integers and booleans.
//! - Big integers that fit `i64`, `u64` or `i128` read as integers; wider ones
//!   read as their decimal text.
//! - Dates read as RFC 3339 text, which is what `chrono` expects.
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_json_qs::{from_value, qs};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Page {
//!     number: u32,
//!     label: Option<String>,
//! }
//!
//! let page: Page = from_value(qs!({ "number": 3 })).unwrap();
//! assert_eq!(page, Page { number: 3, label: None });
//! ```

use crate::encode::format_number;
use crate::value::{date_to_rfc3339, number_to_i64};
use crate::{Error, Map, Result, Value};
use num_bigint::BigInt;
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializes a [`Value`] into any `T: DeserializeOwned`.
///
/// # Errors
///
/// Fails when the shape of `value` does not match `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// A deserializer reading from an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

fn visit_bigint<'de, V>(n: BigInt, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if let Ok(i) = i64::try_from(&n) {
        visitor.visit_i64(i)
    } else if let Ok(u) = u64::try_from(&n) {
        visitor.visit_u64(u)
    } else if let Ok(i) = i128::try_from(&n) {
        visitor.visit_i128(i)
    } else {
        visitor.visit_string(n.to_string())
    }
}

fn visit_number<'de, V>(n: f64, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    match number_to_i64(n) {
        Some(i) if n != 0.0 || n.is_sign_positive() => visitor.visit_i64(i),
        _ => visitor.visit_f64(n),
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Undefined => visitor.visit_none(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => visit_number(n, visitor),
            Value::BigInt(n) => visit_bigint(n, visitor),
            Value::String(s) => visitor.visit_string(s),
            Value::Date(date) => visitor.visit_string(date_to_rfc3339(&date)),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null | Value::Undefined => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Number(n) => visitor.visit_string(format_number(n)),
            Value::BigInt(n) => visitor.visit_string(n.to_string()),
            Value::Bool(b) => visitor.visit_string(b.to_string()),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null | Value::Undefined => visitor.visit_unit(),
            other => Err(Error::custom(format!("expected null, found {}", other.kind()))),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer::new(variant, None)),
            Value::Object(obj) if obj.len() == 1 => {
                let Some((variant, value)) = obj.into_iter().next() else {
                    return Err(Error::custom("expected enum variant"));
                };
                visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
            }
            other => Err(Error::custom(format!(
                "expected enum as a string or single-key object, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(MapKeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Object keys are always strings; numeric and boolean key types parse them.
struct MapKeyDeserializer {
    key: String,
}

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident),*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.key.parse() {
                    Ok(parsed) => visitor.$visit(parsed),
                    Err(_) => Err(Error::custom(format!("invalid map key '{}'", self.key))),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for MapKeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(EnumDeserializer::new(self.key, None))
    }

    forward_to_deserialize_any! {
        i128 u128 char str string bytes byte_buf option unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<Value>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let name: de::value::StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(name)?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_value;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Point(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_enum_round_trip() {
        for shape in [
            Shape::Empty,
            Shape::Circle(0.5),
            Shape::Point(-1, 2),
            Shape::Rect { w: 3, h: 4 },
        ] {
            let value = to_value(&shape).unwrap();
            assert_eq!(from_value::<Shape>(value).unwrap(), shape);
        }
    }

    #[test]
    fn test_options_accept_null_and_undefined() {
        assert_eq!(from_value::<Option<u8>>(Value::Null).unwrap(), None);
        assert_eq!(from_value::<Option<u8>>(Value::Undefined).unwrap(), None);
        assert_eq!(from_value::<Option<u8>>(Value::from(4)).unwrap(), Some(4));
    }

    #[test]
    fn test_lenient_strings() {
        assert_eq!(from_value::<String>(Value::from(1.5)).unwrap(), "1.5");
        assert_eq!(from_value::<String>(Value::Bool(true)).unwrap(), "true");
        let big = BigInt::from(u128::MAX) * BigInt::from(2);
        assert_eq!(
            from_value::<String>(Value::BigInt(big.clone())).unwrap(),
            big.to_string()
        );
    }

    #[test]
    fn test_bigint_into_integers() {
        let big = Value::BigInt(BigInt::from(u64::MAX));
        assert_eq!(from_value::<u64>(big).unwrap(), u64::MAX);
        let wide = Value::BigInt(BigInt::from(i128::MIN));
        assert_eq!(from_value::<i128>(wide).unwrap(), i128::MIN);
    }

    #[test]
    fn test_dates_into_chrono() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let back: DateTime<Utc> = from_value(Value::Date(date)).unwrap();
        assert_eq!(back, date);
    }

    #[test]
    fn test_numeric_map_keys() {
        let mut map = Map::new();
        map.insert("1".to_string(), Value::from("one"));
        map.insert("2".to_string(), Value::from("two"));
        let back: BTreeMap<u32, String> = from_value(Value::Object(map)).unwrap();
        assert_eq!(back.get(&2).map(String::as_str), Some("two"));
    }

    #[test]
    fn test_shape_mismatch() {
        assert!(from_value::<Vec<u8>>(Value::from("x")).is_err());
        assert!(from_value::<()>(Value::from(1)).is_err());
    }
}
