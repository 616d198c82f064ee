//! Canonical logging macros
//!
//! Start/end events are emitted at `debug`: a matching predicate may run
//! thousands of times inside one test, so they stay out of `info` output.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use fieldwise_core::log_op_start;
/// log_op_start!("contains");
/// log_op_start!("contains", actual_len = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the end of an operation
///
/// # Example
///
/// ```
/// # use fieldwise_core::log_op_end;
/// log_op_end!("contains", matched = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr) => {
        $crate::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use fieldwise_core::{log_op_error, errors::FieldwiseError};
/// log_op_error!("register_field_name_comparator", FieldwiseError::EmptyFieldName);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}
