//! Failure message rendering.
//!
//! Turns a [`Mismatch`] plus the predicate's inputs into the text an
//! assertion layer shows. Elements are rendered with their `Debug` form.

use crate::matching::{Mismatch, MismatchKind, Predicate};
use std::fmt::Debug;

/// What the actual sequence was checked against
#[derive(Debug, Clone, Copy)]
pub enum Expected<'a, T> {
    Elements(&'a [T]),
    Candidates(&'a [Vec<T>]),
}

/// Inputs of a failed predicate, ready to render
#[derive(Debug, Clone, Copy)]
pub struct FailureReport<'a, T> {
    pub actual: &'a [T],
    pub expected: Expected<'a, T>,
    pub mismatch: &'a Mismatch,
    /// Strategy description; empty for natural equality
    pub description: &'a str,
}

impl<'a, T: Debug> FailureReport<'a, T> {
    pub fn new(
        actual: &'a [T],
        expected: Expected<'a, T>,
        mismatch: &'a Mismatch,
        description: &'a str,
    ) -> Self {
        Self {
            actual,
            expected,
            mismatch,
            description,
        }
    }

    pub fn render(&self) -> String {
        let mut out = match self.expected {
            Expected::Candidates(candidates) => format!(
                "\nExpecting actual:\n  {:?}\nto be in:\n  {:?}",
                self.actual, candidates
            ),
            Expected::Elements(expected) => self.render_against(expected),
        };
        if !self.description.is_empty() {
            out.push('\n');
            out.push_str(self.description);
        }
        out
    }

    fn render_against(&self, expected: &[T]) -> String {
        let actual = self.actual;
        match (&self.mismatch.predicate, &self.mismatch.kind) {
            (Predicate::ContainsExactly, MismatchKind::ElementDiffers { index, .. }) => format!(
                "\nActual and expected have the same elements but not in the same order, at index {index} actual element was:\n  {}\nwhereas expected element was:\n  {}",
                show(actual.get(*index)),
                show(expected.get(*index))
            ),
            (_, MismatchKind::SizeDiffers { .. } | MismatchKind::ElementDiffers { .. }) => {
                format!("\nexpected: {expected:?}\n but was: {actual:?}")
            }
            (_, MismatchKind::ElementsNotFound { missing }) => format!(
                "\nExpecting actual:\n  {actual:?}\nto contain:\n  {expected:?}\nbut could not find the following element(s):\n  {:?}",
                pick(expected, missing)
            ),
            (predicate, MismatchKind::Unmatched { not_found, not_expected }) => {
                let mut out = format!(
                    "\nExpecting actual:\n  {actual:?}\n{}:\n  {expected:?}\n",
                    unmatched_heading(*predicate)
                );
                if !not_found.is_empty() {
                    out.push_str(&format!(
                        "but some elements were not found:\n  {:?}\n",
                        pick(expected, not_found)
                    ));
                }
                if !not_expected.is_empty() {
                    let joiner = if not_found.is_empty() { "but" } else { "and" };
                    out.push_str(&format!(
                        "{joiner} the following elements were unexpected:\n  {:?}\n",
                        pick(actual, not_expected)
                    ));
                }
                out.pop();
                out
            }
            (_, MismatchKind::NoCandidateMatched { .. }) => {
                format!("\nExpecting actual:\n  {actual:?}\nto be in:\n  {expected:?}")
            }
        }
    }
}

fn unmatched_heading(predicate: Predicate) -> &'static str {
    match predicate {
        Predicate::ContainsOnly => "to contain only",
        Predicate::ContainsExactly => "to contain exactly (and in same order)",
        _ => "to contain exactly in any order",
    }
}

fn show<T: Debug>(item: Option<&T>) -> String {
    item.map_or_else(|| "<none>".to_string(), |item| format!("{item:?}"))
}

fn pick<'a, T>(items: &'a [T], indices: &[usize]) -> Vec<&'a T> {
    indices.iter().filter_map(|&i| items.get(i)).collect()
}

/// Render the failure message for `mismatch`
pub fn render_failure_message<T: Debug>(
    actual: &[T],
    expected: &[T],
    mismatch: &Mismatch,
    description: &str,
) -> String {
    FailureReport::new(actual, Expected::Elements(expected), mismatch, description).render()
}
