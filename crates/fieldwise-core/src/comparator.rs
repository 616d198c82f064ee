//! Field comparators.
//!
//! A [`FieldComparator`] decides the ordering of two introspected field values;
//! `Ordering::Equal` means "equal" for field-by-field purposes. Comparators are
//! stored as `Arc<dyn FieldComparator>` so registries and strategies stay cheap
//! to clone and can be shared across threads.

use crate::value::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a comparator
pub type SharedComparator = Arc<dyn FieldComparator>;

/// Comparator over introspected values
pub trait FieldComparator: Send + Sync {
    /// Compare two field values
    fn compare(&self, left: &Value, right: &Value) -> Ordering;

    /// Label used in strategy descriptions
    fn description(&self) -> String;
}

impl fmt::Debug for dyn FieldComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Tolerance comparator for `f64` fields
///
/// `|left - right| <= precision` is equal; otherwise ordered by value. When
/// either side is not an `f64` it falls back to natural order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleComparator {
    precision: f64,
}

impl DoubleComparator {
    pub fn new(precision: f64) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }
}

impl FieldComparator for DoubleComparator {
    fn compare(&self, left: &Value, right: &Value) -> Ordering {
        match (left, right) {
            (Value::F64(a), Value::F64(b)) => within_tolerance(*a, *b, self.precision),
            _ => left.natural_cmp(right),
        }
    }

    fn description(&self) -> String {
        format!("DoubleComparator[precision={:e}]", self.precision)
    }
}

/// Tolerance comparator for `f32` fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatComparator {
    precision: f32,
}

impl FloatComparator {
    pub fn new(precision: f32) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> f32 {
        self.precision
    }
}

impl FieldComparator for FloatComparator {
    fn compare(&self, left: &Value, right: &Value) -> Ordering {
        match (left, right) {
            (Value::F32(a), Value::F32(b)) => {
                within_tolerance(f64::from(*a), f64::from(*b), f64::from(self.precision))
            }
            _ => left.natural_cmp(right),
        }
    }

    fn description(&self) -> String {
        format!("FloatComparator[precision={:e}]", self.precision)
    }
}

fn within_tolerance(a: f64, b: f64, precision: f64) -> Ordering {
    // exact match first so equal infinities compare equal
    if a == b || (a - b).abs() <= precision {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Natural total order over values ([`Value::natural_cmp`])
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrderComparator;

impl FieldComparator for NaturalOrderComparator {
    fn compare(&self, left: &Value, right: &Value) -> Ordering {
        left.natural_cmp(right)
    }

    fn description(&self) -> String {
        "natural order".to_string()
    }
}

/// Comparator backed by a closure
///
/// # Example
///
/// ```
/// use fieldwise_core::comparator::{FieldComparator, FnComparator};
/// use fieldwise_core::value::Value;
/// use std::cmp::Ordering;
///
/// let case_insensitive = FnComparator::new("case insensitive", |a: &Value, b: &Value| {
///     match (a.as_str(), b.as_str()) {
///         (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
///         _ => a.natural_cmp(b),
///     }
/// });
/// assert_eq!(
///     case_insensitive.compare(&Value::from("Yoda"), &Value::from("YODA")),
///     Ordering::Equal
/// );
/// ```
pub struct FnComparator<F> {
    name: String,
    compare: F,
}

impl<F> FnComparator<F>
where
    F: Fn(&Value, &Value) -> Ordering + Send + Sync,
{
    pub fn new(name: impl Into<String>, compare: F) -> Self {
        Self {
            name: name.into(),
            compare,
        }
    }
}

impl<F> FieldComparator for FnComparator<F>
where
    F: Fn(&Value, &Value) -> Ordering + Send + Sync,
{
    fn compare(&self, left: &Value, right: &Value) -> Ordering {
        (self.compare)(left, right)
    }

    fn description(&self) -> String {
        self.name.clone()
    }
}
