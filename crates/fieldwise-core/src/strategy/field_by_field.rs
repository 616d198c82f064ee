//! Field-by-field comparison strategy.
//!
//! Both values are introspected and compared through their fields:
//!
//! 1. `Null` equals only `Null`.
//! 2. The field set comes from the **left** value's own runtime shape. The
//!    right value must have a same-named field that compares equal; fields it
//!    has beyond those are ignored. A left record without fields equals only a
//!    right record without fields.
//! 3. Each field resolves a comparator by name, then by the runtime type of its
//!    current value (the right value's type when the left is `Null`). A resolved
//!    comparator decides; otherwise the same strategy recurses into the field.
//! 4. Fields short-circuit on the first mismatch.
//!
//! Collection elements and sequence items have no field name, so only the
//! type mapping applies to them. `f32`/`f64` values with no comparator of
//! their own use the tolerance comparators from [`ComparisonConfig`].
//! Recursion is bounded by [`ComparisonConfig::max_depth`]; past it values
//! compare with natural `Value` equality.

use super::{ComparisonStrategy, StrategyDescription};
use crate::config::ComparisonConfig;
use crate::errors::Result;
use crate::log_op_error;
use crate::registry::ComparatorRegistry;
use crate::report::describe_field_by_field;
use crate::value::{introspect, Record, Value};
use fieldwise_core_types::FieldType;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// Field-by-field equality with name/type comparator overrides
///
/// The registry is snapshotted at construction; registering more comparators
/// afterwards produces a new registry and never affects this strategy.
#[derive(Debug, Clone)]
pub struct FieldByFieldStrategy {
    registry: Arc<ComparatorRegistry>,
    max_depth: usize,
}

impl Default for FieldByFieldStrategy {
    fn default() -> Self {
        Self::new(&ComparatorRegistry::default())
    }
}

impl FieldByFieldStrategy {
    /// Strategy over a snapshot of `registry` with the default configuration
    pub fn new(registry: &ComparatorRegistry) -> Self {
        Self::build(registry, &ComparisonConfig::default())
    }

    /// Strategy over a snapshot of `registry` using `config`
    ///
    /// `config.max_depth` bounds recursion. Its tolerances apply to `f32`/`f64`
    /// values the registry has no type comparator for.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when `config` fails
    /// [`ComparisonConfig::validate`].
    pub fn with_config(registry: &ComparatorRegistry, config: &ComparisonConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            log_op_error!("build_strategy", err.clone());
            return Err(err);
        }
        Ok(Self::build(registry, config))
    }

    fn build(registry: &ComparatorRegistry, config: &ComparisonConfig) -> Self {
        Self {
            registry: Arc::new(registry.or_default_tolerances(config)),
            max_depth: config.max_depth,
        }
    }

    /// The registry snapshot this strategy compares with
    ///
    /// Includes the fallback tolerance comparators.
    pub fn registry(&self) -> &ComparatorRegistry {
        &self.registry
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Compare two already-introspected values
    pub fn values_equal(&self, left: &Value, right: &Value) -> bool {
        self.element_equal(left, right, 0)
    }

    /// Path of the first field or item where `left` and `right` differ
    ///
    /// Fields are joined with `.` and sequence items appear as `[i]`, as in
    /// `points[2].x`. `None` when the values are equal or only differ as a
    /// whole.
    pub fn difference_path(&self, left: &Value, right: &Value) -> Option<String> {
        if self.values_equal(left, right)
            || self.registry.resolve_type(&runtime_type(left, right)).is_some()
        {
            return None;
        }
        let mut path = String::new();
        self.locate(left, right, 0, &mut path);
        (!path.is_empty()).then_some(path)
    }

    fn element_equal(&self, left: &Value, right: &Value, depth: usize) -> bool {
        if depth > self.max_depth {
            return left == right;
        }
        match self.registry.resolve_type(&runtime_type(left, right)) {
            Some(comparator) => comparator.compare(left, right) == Ordering::Equal,
            None => self.structurally_equal(left, right, depth),
        }
    }

    fn field_equal(&self, name: &str, left: &Value, right: &Value, depth: usize) -> bool {
        if depth > self.max_depth {
            return left == right;
        }
        match self.registry.resolve(name, &runtime_type(left, right)) {
            Some(comparator) => comparator.compare(left, right) == Ordering::Equal,
            None => self.structurally_equal(left, right, depth),
        }
    }

    fn structurally_equal(&self, left: &Value, right: &Value, depth: usize) -> bool {
        match (left, right) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Record(a), Value::Record(b)) => self.records_equal(a, b, depth),
            (Value::Seq(a), Value::Seq(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(x, y)| self.element_equal(x, y, depth + 1))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter().any(|(other_key, other_value)| {
                            key == other_key && self.element_equal(value, other_value, depth + 1)
                        })
                    })
            }
            _ => left == right,
        }
    }

    fn records_equal(&self, left: &Record, right: &Record, depth: usize) -> bool {
        if left.is_empty() {
            return right.is_empty();
        }
        left.fields().iter().all(|(name, value)| {
            let equal = right
                .field(name)
                .is_some_and(|other| self.field_equal(name, value, other, depth + 1));
            if !equal {
                tracing::trace!(
                    record = left.type_name(),
                    field = name.as_str(),
                    depth,
                    "field mismatch"
                );
            }
            equal
        })
    }

    /// Append the path to the first difference below two unequal values
    ///
    /// Stops where a comparator decided, since it judged the value as a whole.
    fn locate(&self, left: &Value, right: &Value, depth: usize, path: &mut String) {
        if depth > self.max_depth {
            return;
        }
        match (left, right) {
            (Value::Record(a), Value::Record(b)) => {
                let differing = a.fields().iter().find_map(|(name, value)| match b.field(name) {
                    Some(other) if self.field_equal(name, value, other, depth + 1) => None,
                    other => Some((name, value, other)),
                });
                if let Some((name, value, other)) = differing {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(name);
                    if let Some(other) = other {
                        if self.registry.resolve(name, &runtime_type(value, other)).is_none() {
                            self.locate(value, other, depth + 1, path);
                        }
                    }
                }
            }
            (Value::Seq(a), Value::Seq(b)) if a.len() == b.len() => {
                let differing = a
                    .iter()
                    .zip(b)
                    .enumerate()
                    .find(|&(_, (x, y))| !self.element_equal(x, y, depth + 1));
                if let Some((index, (x, y))) = differing {
                    path.push_str(&format!("[{index}]"));
                    if self.registry.resolve_type(&runtime_type(x, y)).is_none() {
                        self.locate(x, y, depth + 1, path);
                    }
                }
            }
            _ => {}
        }
    }
}

fn runtime_type(left: &Value, right: &Value) -> FieldType {
    if left.is_null() {
        right.field_type()
    } else {
        left.field_type()
    }
}

impl StrategyDescription for FieldByFieldStrategy {
    fn describe(&self) -> String {
        describe_field_by_field(&self.registry)
    }
}

impl<T: Serialize + ?Sized> ComparisonStrategy<T> for FieldByFieldStrategy {
    type Prepared<'a> = Value
    where
        T: 'a;

    fn prepare<'a>(&self, item: &'a T) -> Self::Prepared<'a> {
        introspect(item)
    }

    fn prepared_equal<'a>(&self, actual: &Self::Prepared<'a>, other: &Self::Prepared<'a>) -> bool
    where
        T: 'a,
    {
        self.values_equal(actual, other)
    }

    fn first_difference<'a>(
        &self,
        actual: &Self::Prepared<'a>,
        other: &Self::Prepared<'a>,
    ) -> Option<String>
    where
        T: 'a,
    {
        self.difference_path(actual, other)
    }
}
