//! Fieldwise Core - field-by-field comparison and collection matching
//!
//! This crate provides the equality machinery behind collection assertions,
//! including:
//! - Introspection of any `Serialize` value into a dynamic [`Value`] tree
//! - Field comparators, with tolerance comparators for `f32`/`f64`
//! - A copy-on-extend [`ComparatorRegistry`] keyed by field name and field type
//! - Pluggable [`ComparisonStrategy`] implementations (natural and field-by-field)
//! - The [`MatchingEngine`] predicates: equal-to, in, contains, contains-only,
//!   contains-exactly and contains-exactly-in-any-order
//! - Failure message and strategy description rendering
//!
//! # Example
//!
//! ```
//! use fieldwise_core::{ComparatorRegistry, FieldByFieldStrategy, MatchingEngine};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Reading {
//!     sensor: String,
//!     value: f64,
//! }
//!
//! let engine = MatchingEngine::new(FieldByFieldStrategy::new(&ComparatorRegistry::default()));
//! let actual = [Reading { sensor: "t1".into(), value: 0.1 + 0.2 }];
//! let expected = [Reading { sensor: "t1".into(), value: 0.3 }];
//! assert!(engine.contains_exactly(&actual, &expected).is_pass());
//! ```

pub mod comparator;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod matching;
pub mod registry;
pub mod report;
pub mod strategy;
pub mod value;

pub use fieldwise_core_types as core_types;

#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use comparator::{FieldComparator, FnComparator, SharedComparator};
pub use config::ComparisonConfig;
pub use core_types::FieldType;
pub use errors::{ExError, ExErrorKind, FieldwiseError, Result};
pub use matching::{MatchingEngine, Mismatch, MismatchKind, Predicate, Verdict};
pub use registry::ComparatorRegistry;
pub use report::{describe_field_by_field, render_failure_message};
pub use strategy::{ComparisonStrategy, FieldByFieldStrategy, NaturalEquality, StrategyDescription};
pub use value::{introspect, Record, Value};
