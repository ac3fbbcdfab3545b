//! Conversion of `serde::Serialize` types into [`Value`].
//!
//! [`ValueSerializer`] maps the serde data model onto the value kinds the writer
//! understands. Most users go through [`to_value`](crate::to_value) or
//! [`to_string`](crate::to_string).
//!
//! ## Mapping
//!
//! - Integers become [`Number::Integer`]; values outside `i64` become [`Value::BigInt`]
//! - `None`, `()` and unit structs become [`Value::Null`]
//! - Sequences and tuples become arrays; maps and structs become records
//! - Fields skipped with `skip_serializing_if` stay in the record as [`Value::Absent`]
//! - Enum variants with data become a one-entry record keyed by the variant name
//! - Byte buffers become [`Value::Unsupported`]
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde::Serialize;
//! use serde_typst::{TypstOptions, Value, ValueSerializer};
//!
//! let serializer = ValueSerializer::new(&TypstOptions::new());
//! let value = vec![1, 2, 3].serialize(serializer).unwrap();
//! assert!(value.is_array());
//! ```

use crate::value::{ABSENT_MARKER, OPAQUE_MARKER};
use crate::{bigint, calendar, Error, Number, Opaque, Record, Result, TypstOptions, Value};
use serde::{ser, Serialize};

/// A serde serializer producing [`Value`] trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueSerializer {
    skip_none_fields: bool,
    in_field: bool,
}

impl ValueSerializer {
    pub fn new(options: &TypstOptions) -> Self {
        ValueSerializer {
            skip_none_fields: options.skip_none_fields,
            in_field: false,
        }
    }

    fn element(self) -> Self {
        ValueSerializer {
            in_field: false,
            ..self
        }
    }

    fn field(self) -> Self {
        ValueSerializer {
            in_field: true,
            ..self
        }
    }

    fn to_value<T: ?Sized + Serialize>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }
}

pub struct SerializeVec {
    ser: ValueSerializer,
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    ser: ValueSerializer,
    variant: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    ser: ValueSerializer,
    map: Record,
    current_key: Option<String>,
    name: Option<&'static str>,
}

pub struct SerializeStructVariant {
    ser: ValueSerializer,
    variant: &'static str,
    map: Record,
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
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    // Typst has a bytes type but no literal syntax for it.
    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Unsupported(Opaque::new(format!(
            "byte buffer of length {}",
            v.len()
        ))))
    }

    fn serialize_none(self) -> Result<Value> {
        if self.in_field && self.skip_none_fields {
            Ok(Value::Absent)
        } else {
            Ok(Value::Null)
        }
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

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        if name == ABSENT_MARKER {
            Ok(Value::Absent)
        } else {
            Ok(Value::Null)
        }
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        match name {
            bigint::BIGINT_MARKER => bigint::from_marker(self.element().to_value(value)?),
            OPAQUE_MARKER => match self.element().to_value(value)? {
                Value::String(description) => Ok(Value::Unsupported(Opaque::new(description))),
                other => Err(Error::custom(format!(
                    "expected opaque description, found {}",
                    other.kind()
                ))),
            },
            _ => value.serialize(self),
        }
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
        let mut map = Record::with_capacity(1);
        map.insert(variant.to_string(), self.element().to_value(value)?);
        Ok(Value::Record(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            ser: self.element(),
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            ser: self.element(),
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            ser: self.field(),
            map: Record::with_capacity(len.unwrap_or(0)),
            current_key: None,
            name: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap {
            ser: self.field(),
            map: Record::with_capacity(len),
            current_key: None,
            name: Some(name),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            ser: self.field(),
            variant,
            map: Record::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(self.ser.to_value(value)?);
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
        self.vec.push(self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Record::with_capacity(1);
        map.insert(self.variant.to_string(), Value::Array(self.vec));
        Ok(Value::Record(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key_to_string(self.ser.element().to_value(key)?)?);
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
        self.map.insert(key, self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), self.ser.to_value(value)?);
        Ok(())
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        self.map.insert(key.to_string(), Value::Absent);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        if let Some(name) = self.name {
            if let Some(calendar) = calendar::from_marker(name, &self.map) {
                return calendar;
            }
        }
        Ok(Value::Record(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), self.ser.to_value(value)?);
        Ok(())
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        self.map.insert(key.to_string(), Value::Absent);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut outer = Record::with_capacity(1);
        outer.insert(self.variant.to_string(), Value::Record(self.map));
        Ok(Value::Record(outer))
    }
}

fn key_to_string(key: Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(Number::Integer(i)) => Ok(i.to_string()),
        Value::BigInt(bi) => Ok(bi.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::invalid_key(other.kind().as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use serde::Serialize;
    use std::collections::BTreeMap;

    fn value_of<T: Serialize>(value: &T) -> Value {
        value.serialize(ValueSerializer::default()).unwrap()
    }

    #[derive(Serialize)]
    enum Shape {
        Dot,
        Circle(f64),
        Line(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_variants_are_externally_tagged() {
        assert_eq!(value_of(&Shape::Dot), Value::from("Dot"));

        let circle = value_of(&Shape::Circle(1.5));
        assert_eq!(
            circle.as_record().and_then(|r| r.get("Circle")),
            Some(&Value::from(1.5))
        );

        let line = value_of(&Shape::Line(1, 2));
        assert_eq!(
            line.as_record().and_then(|r| r.get("Line")),
            Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
        );

        let rect = value_of(&Shape::Rect { w: 3, h: 4 });
        let inner = rect
            .as_record()
            .and_then(|r| r.get("Rect"))
            .and_then(Value::as_record)
            .unwrap();
        assert_eq!(inner.get("w"), Some(&Value::from(3)));
        assert_eq!(inner.get("h"), Some(&Value::from(4)));
    }

    #[test]
    fn test_large_unsigned_becomes_bigint() {
        assert_eq!(value_of(&u64::MAX), Value::BigInt(BigInt::from(u64::MAX)));
        assert_eq!(value_of(&7u64), Value::from(7));
        assert_eq!(
            value_of(&(i64::MIN as i128 - 1)),
            Value::BigInt(BigInt::from(i64::MIN as i128 - 1))
        );
    }

    #[test]
    fn test_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        let value = value_of(&map);
        let keys: Vec<_> = value.as_record().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["1", "2"]);

        let mut bad = BTreeMap::new();
        bad.insert(vec![1], 1);
        let err = bad.serialize(ValueSerializer::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(ref found) if found == "array"));
    }

    #[test]
    fn test_bytes_are_unsupported() {
        struct Blob;
        impl Serialize for Blob {
            fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_bytes(&[1, 2, 3])
            }
        }
        assert_eq!(value_of(&Blob).kind(), crate::Kind::Unsupported);
    }

    #[test]
    fn test_skipped_fields_are_absent() {
        #[derive(Serialize)]
        struct Patch {
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            body: Option<String>,
        }

        let value = value_of(&Patch {
            title: None,
            body: None,
        });
        let record = value.as_record().unwrap();
        assert_eq!(record.get("title"), Some(&Value::Absent));
        assert_eq!(record.get("body"), Some(&Value::Null));
    }

    #[test]
    fn test_skip_none_fields_only_inside_records() {
        let ser = ValueSerializer::new(&TypstOptions::new().with_skip_none_fields(true));

        let fields: BTreeMap<&str, Option<i32>> = [("a", None), ("b", Some(1))].into_iter().collect();
        let record = fields.serialize(ser).unwrap();
        assert_eq!(record.as_record().unwrap().get("a"), Some(&Value::Absent));

        let elements = vec![None, Some(1)].serialize(ser).unwrap();
        assert_eq!(elements, Value::Array(vec![Value::Null, Value::from(1)]));

        assert_eq!(None::<i32>.serialize(ser).unwrap(), Value::Null);
    }

    #[test]
    fn test_skip_none_fields_keeps_variant_payload() {
        #[derive(Serialize)]
        enum Slot {
            Reserved(Option<String>),
        }

        let options = TypstOptions::new().with_skip_none_fields(true);
        let value = Slot::Reserved(None)
            .serialize(ValueSerializer::new(&options))
            .unwrap();
        assert_eq!(
            value.as_record().and_then(|r| r.get("Reserved")),
            Some(&Value::Null)
        );
        assert_eq!(
            crate::to_string_with_options(&vec![Slot::Reserved(None)], options).unwrap(),
            r#"(("Reserved":none),)"#
        );
    }
}
