//! Dynamic value model.
//!
//! Every element handed to a field-by-field comparison is lowered into a
//! [`Value`] tree by the [`introspect`] serializer. Each node carries enough
//! shape to produce its runtime [`FieldType`], which is what type-keyed
//! comparator lookup is resolved against.
//!
//! ## Natural equality and order
//!
//! `PartialEq` on `Value` is exact structural equality (floats compare with
//! `==`, so `NaN != NaN`). [`Value::natural_cmp`] is a total order used by
//! [`NaturalOrderComparator`](crate::comparator::NaturalOrderComparator):
//! values of the same kind compare by content, values of different kinds by a
//! fixed kind rank.

pub mod introspect;

pub use introspect::{fields_of, introspect, try_introspect, IntrospectError};

use fieldwise_core_types::FieldType;
use std::cmp::Ordering;

/// Type name given to values whose `Serialize` impl could not be introspected
pub const OPAQUE_TYPE_NAME: &str = "<opaque>";

/// An introspected value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    /// Map entries in serialization order
    Map(Vec<(Value, Value)>),
    Record(Record),
}

/// A named, ordered set of fields: struct, tuple struct or enum variant
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create a record with no fields
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Record standing in for a value that could not be introspected
    pub fn opaque() -> Self {
        Self::new(OPAQUE_TYPE_NAME)
    }

    /// Builder-style field append
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_field(name, value);
        self
    }

    pub(crate) fn push_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_opaque(&self) -> bool {
        self.type_name == OPAQUE_TYPE_NAME && self.fields.is_empty()
    }
}

impl Value {
    /// Runtime type tag of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Null => FieldType::Null,
            Value::Bool(_) => FieldType::Bool,
            Value::Int(_) => FieldType::Int,
            Value::UInt(_) => FieldType::UInt,
            Value::F32(_) => FieldType::F32,
            Value::F64(_) => FieldType::F64,
            Value::Char(_) => FieldType::Char,
            Value::String(_) => FieldType::String,
            Value::Bytes(_) => FieldType::Bytes,
            Value::Seq(_) => FieldType::Seq,
            Value::Map(_) => FieldType::Map,
            Value::Record(record) => FieldType::Named(record.type_name.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Total order over values; see the module docs
    pub fn natural_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::UInt(a), Value::UInt(b)) => a.cmp(b),
            (Value::F32(a), Value::F32(b)) => a.total_cmp(b),
            (Value::F64(a), Value::F64(b)) => a.total_cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Seq(a), Value::Seq(b)) => cmp_lexicographic(a, b, Value::natural_cmp),
            (Value::Map(a), Value::Map(b)) => cmp_lexicographic(a, b, |(ka, va), (kb, vb)| {
                ka.natural_cmp(kb).then_with(|| va.natural_cmp(vb))
            }),
            (Value::Record(a), Value::Record(b)) => a.type_name.cmp(&b.type_name).then_with(|| {
                cmp_lexicographic(&a.fields, &b.fields, |(na, va), (nb, vb)| {
                    na.cmp(nb).then_with(|| va.natural_cmp(vb))
                })
            }),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::UInt(_) => 3,
            Value::F32(_) => 4,
            Value::F64(_) => 5,
            Value::Char(_) => 6,
            Value::String(_) => 7,
            Value::Bytes(_) => 8,
            Value::Seq(_) => 9,
            Value::Map(_) => 10,
            Value::Record(_) => 11,
        }
    }
}

fn cmp_lexicographic<T>(a: &[T], b: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ordering = cmp(x, y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
