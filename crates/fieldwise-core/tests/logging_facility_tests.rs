#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use fieldwise_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use fieldwise_core::errors::FieldwiseError;
use fieldwise_core::logging_facility::test_capture::init_test_capture;
use fieldwise_core::{
    log_op_end, log_op_error, log_op_start, ComparatorRegistry, ComparisonConfig,
    FieldByFieldStrategy,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro_records_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, matched = false);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("matched"), Some("false"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    log_op_error!(op_name, FieldwiseError::EmptyTypeName, field_type = "Named");

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err_code"), Some("ERR_INVALID_INPUT"));
    assert_eq!(error_events[0].field("err_kind"), Some("InvalidInput"));
    assert_eq!(error_events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_predicate_logs_start_and_end() {
    let capture = init_test_capture();
    let engine = field_by_field_engine();
    // unique lengths so concurrently running tests cannot match
    let actual: Vec<Foo> = (0..7).map(|i| foo("log", i)).collect();
    let expected: Vec<Foo> = (0..11).map(|i| foo("log", i)).collect();

    assert!(!engine.contains_only(&actual, &expected).is_pass());

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("containsOnly")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field("actual_len") == Some("7")
            && e.field("expected_len") == Some("11")
    });
    assert_eq!(starts, 1);

    let ends = capture.events_for("containsOnly", EVENT_END);
    assert!(ends
        .iter()
        .any(|e| e.field("predicate") == Some("containsOnly") && e.field("matched") == Some("false")));
}

#[test]
fn test_rejected_registration_logs_error() {
    let capture = init_test_capture();

    let result = ComparatorRegistry::default().with_field_name_comparator("", always_equal_string());
    assert!(result.is_err());

    capture.assert_event_exists("register_field_name_comparator", EVENT_END_ERROR);
}

#[test]
fn test_rejected_config_logs_error() {
    let capture = init_test_capture();

    let config = ComparisonConfig::default().with_max_depth(0);
    let result = FieldByFieldStrategy::with_config(&ComparatorRegistry::default(), &config);
    assert!(result.is_err());

    let errors = capture.events_for("build_strategy", EVENT_END_ERROR);
    assert!(errors
        .iter()
        .any(|e| e.field("err_code") == Some("ERR_INVALID_CONFIG")));
}
