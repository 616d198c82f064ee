//! Comparison strategies.
//!
//! A [`ComparisonStrategy`] decides whether two values count as equal for
//! assertion purposes. Matching predicates are written purely against this
//! trait, so swapping the strategy swaps the notion of equality everywhere.
//!
//! - [`NaturalEquality`]: the value's own `PartialEq`
//! - [`FieldByFieldStrategy`]: introspected fields with comparator overrides

pub mod field_by_field;
pub mod natural;

pub use field_by_field::FieldByFieldStrategy;
pub use natural::NaturalEquality;

use std::sync::Arc;

/// Description of a strategy's configuration, for failure messages
///
/// Empty for strategies with nothing to report.
pub trait StrategyDescription {
    fn describe(&self) -> String;
}

/// Pluggable equality over `T`
///
/// Elements are first turned into a [`Prepared`](Self::Prepared) form and
/// compared in that form, so a predicate pays the preparation cost once per
/// element rather than once per comparison.
pub trait ComparisonStrategy<T: ?Sized>: StrategyDescription {
    /// Form an element is compared in
    type Prepared<'a>
    where
        T: 'a;

    fn prepare<'a>(&self, item: &'a T) -> Self::Prepared<'a>;

    /// True when two prepared elements count as equal
    fn prepared_equal<'a>(&self, actual: &Self::Prepared<'a>, other: &Self::Prepared<'a>) -> bool
    where
        T: 'a;

    /// Path of the first part that differs, for strategies that can tell
    fn first_difference<'a>(
        &self,
        _actual: &Self::Prepared<'a>,
        _other: &Self::Prepared<'a>,
    ) -> Option<String>
    where
        T: 'a,
    {
        None
    }

    /// True when `actual` and `other` count as equal under this strategy
    fn are_equal(&self, actual: &T, other: &T) -> bool {
        self.prepared_equal(&self.prepare(actual), &self.prepare(other))
    }
}

impl<S: StrategyDescription + ?Sized> StrategyDescription for &S {
    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ?Sized, S: ComparisonStrategy<T> + ?Sized> ComparisonStrategy<T> for &S {
    type Prepared<'a> = S::Prepared<'a>
    where
        T: 'a;

    fn prepare<'a>(&self, item: &'a T) -> Self::Prepared<'a> {
        (**self).prepare(item)
    }

    fn prepared_equal<'a>(&self, actual: &Self::Prepared<'a>, other: &Self::Prepared<'a>) -> bool
    where
        T: 'a,
    {
        (**self).prepared_equal(actual, other)
    }

    fn first_difference<'a>(
        &self,
        actual: &Self::Prepared<'a>,
        other: &Self::Prepared<'a>,
    ) -> Option<String>
    where
        T: 'a,
    {
        (**self).first_difference(actual, other)
    }
}

impl<S: StrategyDescription + ?Sized> StrategyDescription for Arc<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ?Sized, S: ComparisonStrategy<T> + ?Sized> ComparisonStrategy<T> for Arc<S> {
    type Prepared<'a> = S::Prepared<'a>
    where
        T: 'a;

    fn prepare<'a>(&self, item: &'a T) -> Self::Prepared<'a> {
        (**self).prepare(item)
    }

    fn prepared_equal<'a>(&self, actual: &Self::Prepared<'a>, other: &Self::Prepared<'a>) -> bool
    where
        T: 'a,
    {
        (**self).prepared_equal(actual, other)
    }

    fn first_difference<'a>(
        &self,
        actual: &Self::Prepared<'a>,
        other: &Self::Prepared<'a>,
    ) -> Option<String>
    where
        T: 'a,
    {
        (**self).first_difference(actual, other)
    }
}
