#![allow(clippy::unwrap_used, clippy::expect_used)]

use fieldwise_core::comparator::{DoubleComparator, FieldComparator};
use fieldwise_core::config::{DEFAULT_DOUBLE_PRECISION, DEFAULT_MAX_DEPTH};
use fieldwise_core::{
    ComparatorRegistry, ComparisonConfig, ExErrorKind, FieldByFieldStrategy, FieldType,
};

#[test]
fn test_full_document_round_trips_into_registry() {
    let config = ComparisonConfig::from_toml_str(
        r#"
        double_precision = 1e-9
        float_precision = 1e-3
        max_depth = 8
        "#,
    )
    .unwrap();

    let registry = ComparatorRegistry::with_default_tolerances(&config).unwrap();
    let double = registry.resolve_type(&FieldType::F64).unwrap();
    assert_eq!(double.description(), "DoubleComparator[precision=1e-9]");
    let float = registry.resolve_type(&FieldType::F32).unwrap();
    assert_eq!(float.description(), "FloatComparator[precision=1e-3]");

    let strategy = FieldByFieldStrategy::with_config(&registry, &config).unwrap();
    assert_eq!(strategy.max_depth(), 8);
}

#[test]
fn test_invalid_config_rejected_by_constructors() {
    let negative = ComparisonConfig::default().with_double_precision(-1.0);
    let err = ComparatorRegistry::with_default_tolerances(&negative).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    assert_eq!(err.field(), Some("double_precision"));

    let err =
        FieldByFieldStrategy::with_config(&ComparatorRegistry::default(), &negative).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);

    let no_depth = ComparisonConfig::default().with_max_depth(0);
    let err =
        FieldByFieldStrategy::with_config(&ComparatorRegistry::default(), &no_depth).unwrap_err();
    assert_eq!(err.code(), "ERR_INVALID_CONFIG");
}

#[test]
fn test_config_tolerances_fill_open_float_types() {
    let config = ComparisonConfig::from_toml_str("float_precision = 0.5").unwrap();
    let strategy = FieldByFieldStrategy::with_config(&ComparatorRegistry::empty(), &config).unwrap();
    let float = strategy.registry().resolve_type(&FieldType::F32).unwrap();
    assert_eq!(float.description(), "FloatComparator[precision=5e-1]");
}

#[test]
fn test_empty_document_is_default() {
    let config = ComparisonConfig::from_toml_str("").unwrap();
    assert_eq!(config, ComparisonConfig::default());
    assert_eq!(config.double_precision, DEFAULT_DOUBLE_PRECISION);
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_malformed_document() {
    let err = ComparisonConfig::from_toml_str("double_precision = \"small\"").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Serialization);
    assert_eq!(err.op(), Some("parse_config"));
}

#[test]
fn test_infinite_tolerance_rejected() {
    let err = ComparisonConfig::from_toml_str("double_precision = inf").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    assert_eq!(err.field(), Some("double_precision"));
}

#[test]
fn test_zero_tolerance_is_exact() {
    let cmp = DoubleComparator::new(0.0);
    assert_ne!(
        cmp.compare(&(0.1f64 + 0.2).into(), &0.3f64.into()),
        std::cmp::Ordering::Equal
    );
    assert!(ComparisonConfig::default()
        .with_double_precision(0.0)
        .validate()
        .is_ok());
}
