//! Field introspection through `serde::Serialize`.
//!
//! [`ValueSerializer`] lowers any `T: Serialize` into a [`Value`] tree. The
//! mapping from the serde data model:
//!
//! | serde                         | `Value`                                  |
//! |-------------------------------|------------------------------------------|
//! | struct                        | `Record { name, fields }`                |
//! | tuple struct                  | `Record` with fields `"0"`, `"1"`, ...   |
//! | newtype struct                | `Record` with a single field `"0"`       |
//! | unit struct                   | `Record` with no fields                  |
//! | enum variant (any form)       | `Record` named `Enum::Variant`           |
//! | `None`, `()`                  | `Null`                                   |
//! | `Some(v)`                     | `v`                                      |
//! | seq, tuple                    | `Seq`                                    |
//! | map                           | `Map`                                    |
//!
//! Fields marked `#[serde(skip)]` are never emitted. A field whose
//! `Serialize` impl fails is replaced by an opaque empty record rather than
//! failing the whole value.

use super::{Record, Value};
use serde::ser::{self, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Failure raised by a `Serialize` impl during introspection
#[derive(Error, Debug, Clone, PartialEq)]
#[error("introspection failed: {0}")]
pub struct IntrospectError(String);

impl ser::Error for IntrospectError {
    fn custom<T: Display>(msg: T) -> Self {
        IntrospectError(msg.to_string())
    }
}

/// Lower a value into a [`Value`] tree
///
/// # Errors
///
/// Returns `IntrospectError` when the value's own `Serialize` impl reports an
/// error at the top level.
pub fn try_introspect<T: Serialize + ?Sized>(value: &T) -> Result<Value, IntrospectError> {
    value.serialize(ValueSerializer)
}

/// Lower a value into a [`Value`] tree, falling back to an opaque record
pub fn introspect<T: Serialize + ?Sized>(value: &T) -> Value {
    try_introspect(value).unwrap_or_else(|err| {
        tracing::debug!(
            type_name = std::any::type_name::<T>(),
            error = %err,
            "value could not be introspected, treating as empty field set"
        );
        Value::Record(Record::opaque())
    })
}

/// The comparable fields of a value's runtime shape
///
/// Non-record values (scalars, sequences, maps, `None`) have no fields.
pub fn fields_of<T: Serialize + ?Sized>(value: &T) -> Vec<(String, Value)> {
    match introspect(value) {
        Value::Record(record) => record.fields,
        _ => Vec::new(),
    }
}

fn variant_name(name: &str, variant: &str) -> String {
    format!("{}::{}", name, variant)
}

/// Serializer producing [`Value`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = IntrospectError;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = RecordBuilder;
    type SerializeTupleVariant = RecordBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = RecordBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value, IntrospectError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, IntrospectError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, IntrospectError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, IntrospectError> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, IntrospectError> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, IntrospectError> {
        Ok(Value::UInt(v.into()))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, IntrospectError> {
        Ok(Value::UInt(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, IntrospectError> {
        Ok(Value::UInt(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, IntrospectError> {
        Ok(Value::UInt(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, IntrospectError> {
        Ok(Value::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, IntrospectError> {
        Ok(Value::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, IntrospectError> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value, IntrospectError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, IntrospectError> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value, IntrospectError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, IntrospectError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, IntrospectError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, IntrospectError> {
        Ok(Value::Record(Record::new(name)))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, IntrospectError> {
        Ok(Value::Record(Record::new(variant_name(name, variant))))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Value, IntrospectError> {
        Ok(Value::Record(Record::new(name).with_field("0", introspect(value))))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, IntrospectError> {
        Ok(Value::Record(
            Record::new(variant_name(name, variant)).with_field("0", introspect(value)),
        ))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, IntrospectError> {
        Ok(SeqBuilder {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, IntrospectError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<RecordBuilder, IntrospectError> {
        Ok(RecordBuilder::new(name.to_string()))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<RecordBuilder, IntrospectError> {
        Ok(RecordBuilder::new(variant_name(name, variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder, IntrospectError> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<RecordBuilder, IntrospectError> {
        Ok(RecordBuilder::new(name.to_string()))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<RecordBuilder, IntrospectError> {
        Ok(RecordBuilder::new(variant_name(name, variant)))
    }
}

/// Accumulates sequence and tuple items
pub struct SeqBuilder {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = IntrospectError;

    fn serialize_element<T: ?Sized + Serialize>(
        &mut self,
        value: &T,
    ) -> Result<(), IntrospectError> {
        self.items.push(introspect(value));
        Ok(())
    }

    fn end(self) -> Result<Value, IntrospectError> {
        Ok(Value::Seq(self.items))
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Value;
    type Error = IntrospectError;

    fn serialize_element<T: ?Sized + Serialize>(
        &mut self,
        value: &T,
    ) -> Result<(), IntrospectError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, IntrospectError> {
        ser::SerializeSeq::end(self)
    }
}

/// Accumulates record fields; positional fields are named by index
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    fn new(type_name: String) -> Self {
        Self {
            record: Record::new(type_name),
        }
    }

    fn push_positional<T: ?Sized + Serialize>(&mut self, value: &T) {
        let index = self.record.len().to_string();
        self.record.push_field(index, introspect(value));
    }

    fn finish(self) -> Value {
        Value::Record(self.record)
    }
}

impl ser::SerializeTupleStruct for RecordBuilder {
    type Ok = Value;
    type Error = IntrospectError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        value: &T,
    ) -> Result<(), IntrospectError> {
        self.push_positional(value);
        Ok(())
    }

    fn end(self) -> Result<Value, IntrospectError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for RecordBuilder {
    type Ok = Value;
    type Error = IntrospectError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        value: &T,
    ) -> Result<(), IntrospectError> {
        self.push_positional(value);
        Ok(())
    }

    fn end(self) -> Result<Value, IntrospectError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Value;
    type Error = IntrospectError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), IntrospectError> {
        self.record.push_field(key, introspect(value));
        Ok(())
    }

    fn end(self) -> Result<Value, IntrospectError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for RecordBuilder {
    type Ok = Value;
    type Error = IntrospectError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), IntrospectError> {
        self.record.push_field(key, introspect(value));
        Ok(())
    }

    fn end(self) -> Result<Value, IntrospectError> {
        Ok(self.finish())
    }
}

/// Accumulates map entries
pub struct MapBuilder {
    entries: Vec<(Value, Value)>,
    pending_key: Option<Value>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = IntrospectError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), IntrospectError> {
        self.pending_key = Some(introspect(key));
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(
        &mut self,
        value: &T,
    ) -> Result<(), IntrospectError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| IntrospectError("map value serialized before its key".to_string()))?;
        self.entries.push((key, introspect(value)));
        Ok(())
    }

    fn end(self) -> Result<Value, IntrospectError> {
        Ok(Value::Map(self.entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Foo {
        id: String,
        bar: i32,
    }

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    struct Marker;

    #[derive(Serialize)]
    struct Pair(u8, char);

    #[derive(Serialize)]
    enum Shape {
        Circle { radius: f32 },
        Square(f64),
        Point,
    }

    #[derive(Serialize)]
    struct WithSkipped {
        kept: bool,
        #[serde(skip)]
        #[allow(dead_code)]
        cache: Vec<u8>,
    }

    #[test]
    fn test_struct_becomes_named_record() {
        let value = introspect(&Foo {
            id: "id".to_string(),
            bar: 1,
        });
        let record = value.as_record().unwrap();
        assert_eq!(record.type_name(), "Foo");
        assert_eq!(record.field("id"), Some(&Value::from("id")));
        assert_eq!(record.field("bar"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_newtype_tuple_and_unit_structs() {
        let meters = introspect(&Meters(2.5));
        assert_eq!(meters.as_record().unwrap().field("0"), Some(&Value::F64(2.5)));

        let marker = introspect(&Marker);
        assert!(marker.as_record().unwrap().is_empty());

        let pair = introspect(&Pair(7, 'x'));
        let record = pair.as_record().unwrap();
        assert_eq!(record.field("0"), Some(&Value::UInt(7)));
        assert_eq!(record.field("1"), Some(&Value::Char('x')));
    }

    #[test]
    fn test_enum_variants_are_qualified_records() {
        let circle = introspect(&Shape::Circle { radius: 1.0 });
        assert_eq!(circle.as_record().unwrap().type_name(), "Shape::Circle");

        let square = introspect(&Shape::Square(2.0));
        assert_eq!(square.as_record().unwrap().type_name(), "Shape::Square");
        assert_eq!(square.as_record().unwrap().field("0"), Some(&Value::F64(2.0)));

        let point = introspect(&Shape::Point);
        assert_eq!(point.as_record().unwrap().type_name(), "Shape::Point");
    }

    #[test]
    fn test_options_sequences_and_maps() {
        assert_eq!(introspect(&None::<String>), Value::Null);
        assert_eq!(introspect(&Some(3u16)), Value::UInt(3));
        assert_eq!(
            introspect(&vec![1i64, 2]),
            Value::Seq(vec![Value::Int(1), Value::Int(2)])
        );

        let mut map = BTreeMap::new();
        map.insert("k", 1.5f64);
        assert_eq!(
            introspect(&map),
            Value::Map(vec![(Value::from("k"), Value::F64(1.5))])
        );
    }

    #[test]
    fn test_skipped_fields_are_not_introspected() {
        let fields = fields_of(&WithSkipped {
            kept: true,
            cache: vec![1, 2, 3],
        });
        assert_eq!(fields, vec![("kept".to_string(), Value::Bool(true))]);
    }

    #[test]
    fn test_scalars_have_no_fields() {
        assert!(fields_of(&42u32).is_empty());
        assert!(fields_of("text").is_empty());
    }

    #[test]
    fn test_unsupported_value_is_opaque_not_error() {
        assert!(try_introspect(&1i128).is_err());
        let value = introspect(&1i128);
        assert!(value.as_record().unwrap().is_opaque());
    }
}
