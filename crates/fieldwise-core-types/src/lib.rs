//! Core types shared across fieldwise facilities
//!
//! This crate provides foundational types used by the comparison engine
//! and its logging facility:
//!
//! - **Runtime type tags**: `FieldType`, the key for type-based comparator lookup
//! - **Schema constants**: Canonical field keys and event names

pub mod field_type;
pub mod schema;

pub use field_type::FieldType;
