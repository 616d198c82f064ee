//! Runtime type tags for type-keyed comparator lookup
//!
//! A `FieldType` describes the shape of a field's *current* value, not the
//! type it was declared with. Two fields declared as the same enum but holding
//! different variants therefore carry different `Named` tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime type tag of an introspected value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Absent value (`None`, unit)
    Null,
    Bool,
    /// Any signed integer, widened to 64 bits
    Int,
    /// Any unsigned integer, widened to 64 bits
    UInt,
    F32,
    F64,
    Char,
    String,
    Bytes,
    Seq,
    Map,
    /// A record: struct, tuple struct, or enum variant (`Enum::Variant`)
    Named(String),
}

impl FieldType {
    /// Tag for a named record type
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    /// Record type name, if this is a `Named` tag
    pub fn type_name(&self) -> Option<&str> {
        match self {
            FieldType::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldType::Null => "null",
            FieldType::Bool => "bool",
            FieldType::Int => "i64",
            FieldType::UInt => "u64",
            FieldType::F32 => "f32",
            FieldType::F64 => "f64",
            FieldType::Char => "char",
            FieldType::String => "String",
            FieldType::Bytes => "bytes",
            FieldType::Seq => "Seq",
            FieldType::Map => "Map",
            FieldType::Named(name) => name.as_str(),
        };
        f.write_str(label)
    }
}
