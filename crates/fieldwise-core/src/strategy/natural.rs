//! Natural equality strategy.

use super::{ComparisonStrategy, StrategyDescription};

/// Delegates to the value's own `PartialEq`
///
/// Absent values follow `Option<T>` equality: `None == None`, and `None` never
/// equals `Some(_)`.
///
/// # Example
///
/// ```
/// use fieldwise_core::strategy::{ComparisonStrategy, NaturalEquality};
///
/// assert!(NaturalEquality.are_equal(&None::<i32>, &None));
/// assert!(!NaturalEquality.are_equal(&None, &Some(1)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalEquality;

impl StrategyDescription for NaturalEquality {
    fn describe(&self) -> String {
        String::new()
    }
}

impl<T: PartialEq + ?Sized> ComparisonStrategy<T> for NaturalEquality {
    type Prepared<'a> = &'a T
    where
        T: 'a;

    fn prepare<'a>(&self, item: &'a T) -> Self::Prepared<'a> {
        item
    }

    fn prepared_equal<'a>(&self, actual: &Self::Prepared<'a>, other: &Self::Prepared<'a>) -> bool
    where
        T: 'a,
    {
        *actual == *other
    }
}
