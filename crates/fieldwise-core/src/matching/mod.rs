//! Collection matching predicates.
//!
//! Every predicate is written against a [`ComparisonStrategy`]: the engine
//! never compares elements itself. Element comparisons always pass the actual
//! element as the left argument and the expected element as the right.
//!
//! | Predicate | Passes when |
//! |---|---|
//! | `is_equal_to` | same length, pairwise equal in order |
//! | `is_in` | equal to at least one candidate sequence |
//! | `contains` | every expected element has a witness in actual |
//! | `contains_only` | every actual element is expected and every expected element is present |
//! | `contains_exactly` | same as `is_equal_to` |
//! | `contains_exactly_in_any_order` | a greedy one-to-one pairing consumes both sides |

pub mod model;

pub use model::{Mismatch, MismatchKind, Predicate, Verdict};

use crate::strategy::{ComparisonStrategy, StrategyDescription};
use crate::{log_op_end, log_op_start};

/// Evaluates matching predicates under a comparison strategy
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine<S> {
    strategy: S,
}

impl<S: StrategyDescription> MatchingEngine<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Description of the strategy, appended to failure messages
    pub fn describe(&self) -> String {
        self.strategy.describe()
    }

    /// `actual` and `expected` have the same length and are pairwise equal
    pub fn is_equal_to<T>(&self, actual: &[T], expected: &[T]) -> Verdict
    where
        S: ComparisonStrategy<T>,
    {
        observe(Predicate::EqualTo, actual.len(), expected.len(), || {
            let actual = self.prepare_all(actual);
            let expected = self.prepare_all(expected);
            match ordered_mismatch(
                &actual,
                &expected,
                |a, e| self.strategy.prepared_equal(a, e),
                |a, e| self.strategy.first_difference(a, e),
            ) {
                Some(kind) => Verdict::Fail(Mismatch::new(Predicate::EqualTo, kind)),
                None => Verdict::Pass,
            }
        })
    }

    /// `actual` equals at least one of `candidates` in the sense of [`is_equal_to`](Self::is_equal_to)
    ///
    /// Fails for an empty candidate list.
    pub fn is_in<T, C>(&self, actual: &[T], candidates: &[C]) -> Verdict
    where
        S: ComparisonStrategy<T>,
        C: AsRef<[T]>,
    {
        observe(Predicate::In, actual.len(), candidates.len(), || {
            let actual = self.prepare_all(actual);
            let found = candidates.iter().any(|candidate| {
                let candidate = self.prepare_all(candidate.as_ref());
                actual.len() == candidate.len()
                    && actual
                        .iter()
                        .zip(&candidate)
                        .all(|(a, c)| self.strategy.prepared_equal(a, c))
            });
            if found {
                Verdict::Pass
            } else {
                Verdict::Fail(Mismatch::new(
                    Predicate::In,
                    MismatchKind::NoCandidateMatched {
                        candidates: candidates.len(),
                    },
                ))
            }
        })
    }

    /// Every element of `required` has an equal element in `actual`
    ///
    /// Witnesses may repeat and order is ignored. An empty `required` passes.
    pub fn contains<T>(&self, actual: &[T], required: &[T]) -> Verdict
    where
        S: ComparisonStrategy<T>,
    {
        observe(Predicate::Contains, actual.len(), required.len(), || {
            let actual = self.prepare_all(actual);
            let required = self.prepare_all(required);
            let missing =
                without_witness(&required, &actual, |r, a| self.strategy.prepared_equal(a, r));
            if missing.is_empty() {
                Verdict::Pass
            } else {
                Verdict::Fail(Mismatch::new(
                    Predicate::Contains,
                    MismatchKind::ElementsNotFound { missing },
                ))
            }
        })
    }

    /// Every element of `actual` is in `expected` and every element of `expected` is in `actual`
    ///
    /// Duplicates and order are ignored.
    pub fn contains_only<T>(&self, actual: &[T], expected: &[T]) -> Verdict
    where
        S: ComparisonStrategy<T>,
    {
        observe(Predicate::ContainsOnly, actual.len(), expected.len(), || {
            let actual = self.prepare_all(actual);
            let expected = self.prepare_all(expected);
            let not_found =
                without_witness(&expected, &actual, |e, a| self.strategy.prepared_equal(a, e));
            let not_expected =
                without_witness(&actual, &expected, |a, e| self.strategy.prepared_equal(a, e));
            unmatched_verdict(Predicate::ContainsOnly, not_found, not_expected)
        })
    }

    /// Same verdict as [`is_equal_to`](Self::is_equal_to)
    ///
    /// On failure the descriptor lists unmatched elements when the two
    /// sequences differ as multisets, and the first out-of-order index
    /// otherwise.
    pub fn contains_exactly<T>(&self, actual: &[T], expected: &[T]) -> Verdict
    where
        S: ComparisonStrategy<T>,
    {
        observe(Predicate::ContainsExactly, actual.len(), expected.len(), || {
            let actual = self.prepare_all(actual);
            let expected = self.prepare_all(expected);
            let Some(ordered) = ordered_mismatch(
                &actual,
                &expected,
                |a, e| self.strategy.prepared_equal(a, e),
                |a, e| self.strategy.first_difference(a, e),
            ) else {
                return Verdict::Pass;
            };
            let (not_found, not_expected) =
                greedy_pairing(&actual, &expected, |a, e| self.strategy.prepared_equal(a, e));
            let kind = if not_found.is_empty() && not_expected.is_empty() {
                // same elements, different order
                ordered
            } else {
                MismatchKind::Unmatched {
                    not_found,
                    not_expected,
                }
            };
            Verdict::Fail(Mismatch::new(Predicate::ContainsExactly, kind))
        })
    }

    /// A one-to-one pairing of `actual` and `expected` exists, found greedily
    ///
    /// Each expected element consumes the first unconsumed equal actual
    /// element. Passes when nothing is left over on either side.
    pub fn contains_exactly_in_any_order<T>(&self, actual: &[T], expected: &[T]) -> Verdict
    where
        S: ComparisonStrategy<T>,
    {
        observe(
            Predicate::ContainsExactlyInAnyOrder,
            actual.len(),
            expected.len(),
            || {
                let actual = self.prepare_all(actual);
                let expected = self.prepare_all(expected);
                let (not_found, not_expected) =
                    greedy_pairing(&actual, &expected, |a, e| self.strategy.prepared_equal(a, e));
                unmatched_verdict(Predicate::ContainsExactlyInAnyOrder, not_found, not_expected)
            },
        )
    }

    fn prepare_all<'a, T>(&self, items: &'a [T]) -> Vec<S::Prepared<'a>>
    where
        S: ComparisonStrategy<T>,
    {
        items.iter().map(|item| self.strategy.prepare(item)).collect()
    }
}

/// First difference between two ordered sequences, if any
fn ordered_mismatch<P>(
    actual: &[P],
    expected: &[P],
    equal: impl Fn(&P, &P) -> bool,
    locate: impl Fn(&P, &P) -> Option<String>,
) -> Option<MismatchKind> {
    if actual.len() != expected.len() {
        return Some(MismatchKind::SizeDiffers {
            actual: actual.len(),
            expected: expected.len(),
        });
    }
    actual
        .iter()
        .zip(expected)
        .enumerate()
        .find(|&(_, (a, e))| !equal(a, e))
        .map(|(index, (a, e))| MismatchKind::ElementDiffers {
            index,
            field: locate(a, e),
        })
}

/// Indices of `items` with no element of `pool` that `equal(item, other)` accepts
fn without_witness<P>(items: &[P], pool: &[P], equal: impl Fn(&P, &P) -> bool) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|&(_, item)| !pool.iter().any(|other| equal(item, other)))
        .map(|(index, _)| index)
        .collect()
}

/// Greedy pairing: (unmatched expected indices, unconsumed actual indices)
fn greedy_pairing<P>(
    actual: &[P],
    expected: &[P],
    equal: impl Fn(&P, &P) -> bool,
) -> (Vec<usize>, Vec<usize>) {
    let mut consumed = vec![false; actual.len()];
    let mut not_found = Vec::new();
    for (e_index, e) in expected.iter().enumerate() {
        let pick = actual
            .iter()
            .enumerate()
            .position(|(a_index, a)| !consumed[a_index] && equal(a, e));
        match pick {
            Some(a_index) => consumed[a_index] = true,
            None => not_found.push(e_index),
        }
    }
    let not_expected = consumed
        .iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .map(|(index, _)| index)
        .collect();
    (not_found, not_expected)
}

fn unmatched_verdict(
    predicate: Predicate,
    not_found: Vec<usize>,
    not_expected: Vec<usize>,
) -> Verdict {
    if not_found.is_empty() && not_expected.is_empty() {
        Verdict::Pass
    } else {
        Verdict::Fail(Mismatch::new(
            predicate,
            MismatchKind::Unmatched {
                not_found,
                not_expected,
            },
        ))
    }
}

fn observe(
    predicate: Predicate,
    actual_len: usize,
    expected_len: usize,
    evaluate: impl FnOnce() -> Verdict,
) -> Verdict {
    log_op_start!(
        predicate.name(),
        predicate = predicate.name(),
        actual_len,
        expected_len
    );
    let verdict = evaluate();
    log_op_end!(
        predicate.name(),
        predicate = predicate.name(),
        matched = verdict.is_pass()
    );
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::NaturalEquality;

    fn engine() -> MatchingEngine<NaturalEquality> {
        MatchingEngine::new(NaturalEquality)
    }

    #[test]
    fn test_is_equal_to_reports_first_difference() {
        let verdict = engine().is_equal_to(&[1, 2, 3], &[1, 5, 6]);
        assert_eq!(
            verdict.mismatch().unwrap().kind,
            MismatchKind::ElementDiffers {
                index: 1,
                field: None,
            }
        );
        let verdict = engine().is_equal_to(&[1, 2], &[1, 2, 3]);
        assert_eq!(
            verdict.mismatch().unwrap().kind,
            MismatchKind::SizeDiffers {
                actual: 2,
                expected: 3
            }
        );
        assert!(engine().is_equal_to::<i32>(&[], &[]).is_pass());
    }

    #[test]
    fn test_is_in() {
        let candidates = vec![vec![1, 2], vec![3]];
        assert!(engine().is_in(&[3], &candidates).is_pass());
        assert!(!engine().is_in(&[2, 1], &candidates).is_pass());
        let none: Vec<Vec<i32>> = Vec::new();
        assert!(!engine().is_in(&[1], &none).is_pass());
    }

    #[test]
    fn test_contains_allows_repeated_witness() {
        assert!(engine().contains(&[1, 2], &[1, 1, 2]).is_pass());
        assert!(engine().contains(&[1, 2], &[]).is_pass());
        let verdict = engine().contains(&[1, 2], &[2, 3, 4]);
        assert_eq!(
            verdict.mismatch().unwrap().kind,
            MismatchKind::ElementsNotFound {
                missing: vec![1, 2]
            }
        );
    }

    #[test]
    fn test_contains_only_ignores_duplicates() {
        assert!(engine().contains_only(&[1, 1, 2], &[2, 1]).is_pass());
        assert!(engine().contains_only::<i32>(&[], &[]).is_pass());
        let verdict = engine().contains_only(&[1, 4], &[1, 2]);
        assert_eq!(
            verdict.mismatch().unwrap().kind,
            MismatchKind::Unmatched {
                not_found: vec![1],
                not_expected: vec![1]
            }
        );
    }

    #[test]
    fn test_contains_exactly_order_and_multiset() {
        assert!(engine().contains_exactly(&[1, 2], &[1, 2]).is_pass());
        let reordered = engine().contains_exactly(&[2, 1], &[1, 2]);
        assert_eq!(
            reordered.mismatch().unwrap().kind,
            MismatchKind::ElementDiffers {
                index: 0,
                field: None,
            }
        );
        let different = engine().contains_exactly(&[1, 3], &[1, 2]);
        assert_eq!(
            different.mismatch().unwrap().kind,
            MismatchKind::Unmatched {
                not_found: vec![1],
                not_expected: vec![1]
            }
        );
    }

    #[test]
    fn test_contains_exactly_in_any_order_counts_duplicates() {
        assert!(engine()
            .contains_exactly_in_any_order(&[1, 2, 1], &[1, 1, 2])
            .is_pass());
        let verdict = engine().contains_exactly_in_any_order(&[1, 2, 2], &[1, 1, 2]);
        assert_eq!(
            verdict.mismatch().unwrap().kind,
            MismatchKind::Unmatched {
                not_found: vec![1],
                not_expected: vec![2]
            }
        );
    }
}
