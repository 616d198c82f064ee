//! Human-readable reporting.
//!
//! - [`describe_field_by_field`]: comparator listing appended to failure messages
//! - [`render_failure_message`] / [`FailureReport`]: text for a failed predicate
//!
//! Both are informational only; verdicts never depend on them.

pub mod description;
pub mod message;

pub use description::describe_field_by_field;
pub use message::{render_failure_message, Expected, FailureReport};
