//! Matching outcome types.
//!
//! Mismatch descriptors reference elements by index into the inputs of the
//! predicate call, so they carry no element type and serialize uniformly.

use crate::errors::{FieldwiseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The predicate that produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    EqualTo,
    In,
    Contains,
    ContainsOnly,
    ContainsExactly,
    ContainsExactlyInAnyOrder,
}

impl Predicate {
    /// Stable name used in logs and serialized descriptors
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::EqualTo => "equalTo",
            Predicate::In => "in",
            Predicate::Contains => "contains",
            Predicate::ContainsOnly => "containsOnly",
            Predicate::ContainsExactly => "containsExactly",
            Predicate::ContainsExactlyInAnyOrder => "containsExactlyInAnyOrder",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What went wrong, with indices into the predicate's inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MismatchKind {
    /// Sequences differ in length
    SizeDiffers { actual: usize, expected: usize },
    /// First index at which the ordered sequences disagree
    ElementDiffers {
        index: usize,
        /// Path of the first differing field, when the strategy can name one
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },
    /// No candidate sequence matched
    NoCandidateMatched { candidates: usize },
    /// Expected elements with no witness in actual
    ElementsNotFound { missing: Vec<usize> },
    /// Expected elements left unmatched and actual elements left over
    Unmatched {
        /// Indices into the expected sequence
        not_found: Vec<usize>,
        /// Indices into the actual sequence
        not_expected: Vec<usize>,
    },
}

/// Structured descriptor of a failed predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub predicate: Predicate,
    #[serde(flatten)]
    pub kind: MismatchKind,
}

impl Mismatch {
    pub fn new(predicate: Predicate, kind: MismatchKind) -> Self {
        Self { predicate, kind }
    }

    /// JSON form of the descriptor, for tooling that consumes verdicts
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self).map_err(FieldwiseError::from)?)
    }
}

/// Outcome of a matching predicate
///
/// A failed predicate is a normal outcome, not an error; callers decide
/// whether to escalate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail(Mismatch),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(mismatch) => Some(mismatch),
        }
    }

    /// `Ok(())` on pass, the mismatch otherwise
    ///
    /// # Errors
    ///
    /// Returns the [`Mismatch`] when the predicate failed.
    pub fn into_result(self) -> std::result::Result<(), Mismatch> {
        match self {
            Verdict::Pass => Ok(()),
            Verdict::Fail(mismatch) => Err(mismatch),
        }
    }
}
