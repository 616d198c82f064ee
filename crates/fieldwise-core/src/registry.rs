//! Comparator registry.
//!
//! Two mappings: field name → comparator and runtime field type → comparator.
//! Registration is copy-on-extend: every `with_*` call returns a new registry
//! and leaves the receiver untouched, so a registry captured by a strategy can
//! never change underneath it.
//!
//! ## Precedence
//!
//! [`ComparatorRegistry::resolve`] checks the name mapping first and the type
//! mapping second. Registration order between the two never matters.

use crate::comparator::{DoubleComparator, FloatComparator, SharedComparator};
use crate::config::ComparisonConfig;
use crate::errors::{FieldwiseError, Result};
use crate::log_op_error;
use fieldwise_core_types::FieldType;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name- and type-keyed comparator overrides
#[derive(Debug, Clone)]
pub struct ComparatorRegistry {
    by_name: BTreeMap<String, SharedComparator>,
    by_type: BTreeMap<FieldType, SharedComparator>,
}

impl Default for ComparatorRegistry {
    /// Registry holding only the default floating-point comparators
    fn default() -> Self {
        Self::empty().or_default_tolerances(&ComparisonConfig::default())
    }
}

impl ComparatorRegistry {
    /// Registry with no comparators at all
    ///
    /// A strategy built over it still compares `f32`/`f64` fields with the
    /// default tolerances; see [`FieldByFieldStrategy`](crate::FieldByFieldStrategy).
    pub fn empty() -> Self {
        Self {
            by_name: BTreeMap::new(),
            by_type: BTreeMap::new(),
        }
    }

    /// Registry pre-populated with the `f32`/`f64` tolerance comparators
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when `config` fails
    /// [`ComparisonConfig::validate`].
    pub fn with_default_tolerances(config: &ComparisonConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            log_op_error!("build_registry", err.clone());
            return Err(err);
        }
        Ok(Self::empty().or_default_tolerances(config))
    }

    /// Copy with tolerance comparators added for float types that have none
    ///
    /// `config` must already be validated.
    pub(crate) fn or_default_tolerances(&self, config: &ComparisonConfig) -> Self {
        let float: SharedComparator = Arc::new(FloatComparator::new(config.float_precision));
        let double: SharedComparator = Arc::new(DoubleComparator::new(config.double_precision));
        let mut next = self.clone();
        next.by_type.entry(FieldType::F32).or_insert(float);
        next.by_type.entry(FieldType::F64).or_insert(double);
        next
    }

    /// New registry with `comparator` applied to fields named `name`
    ///
    /// Overwrites an earlier comparator for the same name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `name` is blank.
    pub fn with_field_name_comparator(
        &self,
        name: impl Into<String>,
        comparator: SharedComparator,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            log_op_error!("register_field_name_comparator", FieldwiseError::EmptyFieldName);
            return Err(FieldwiseError::EmptyFieldName.into());
        }
        let mut next = self.clone();
        next.by_name.insert(name, comparator);
        Ok(next)
    }

    /// New registry with `comparator` applied to every name in `names`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when any name is blank; nothing is registered.
    pub fn with_field_names_comparator<I, S>(
        &self,
        names: I,
        comparator: SharedComparator,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().try_fold(self.clone(), |registry, name| {
            registry.with_field_name_comparator(name, comparator.clone())
        })
    }

    /// New registry with `comparator` applied to fields whose value has runtime type `field_type`
    ///
    /// Overwrites an earlier comparator for the same type, including the
    /// default tolerance comparators.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for `FieldType::Named` with a blank name.
    pub fn with_field_type_comparator(
        &self,
        field_type: FieldType,
        comparator: SharedComparator,
    ) -> Result<Self> {
        if field_type.type_name().is_some_and(|name| name.trim().is_empty()) {
            log_op_error!("register_field_type_comparator", FieldwiseError::EmptyTypeName);
            return Err(FieldwiseError::EmptyTypeName.into());
        }
        let mut next = self.clone();
        next.by_type.insert(field_type, comparator);
        Ok(next)
    }

    /// Comparator for a field: by name first, by runtime type second
    pub fn resolve(&self, field_name: &str, field_type: &FieldType) -> Option<&SharedComparator> {
        self.by_name
            .get(field_name)
            .or_else(|| self.by_type.get(field_type))
    }

    /// Comparator for an unnamed value (collection element, sequence item)
    pub fn resolve_type(&self, field_type: &FieldType) -> Option<&SharedComparator> {
        self.by_type.get(field_type)
    }

    /// Name-keyed entries in name order
    pub fn by_name(&self) -> impl Iterator<Item = (&str, &SharedComparator)> {
        self.by_name.iter().map(|(name, cmp)| (name.as_str(), cmp))
    }

    /// Type-keyed entries in type order
    pub fn by_type(&self) -> impl Iterator<Item = (&FieldType, &SharedComparator)> {
        self.by_type.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{FnComparator, NaturalOrderComparator};
    use crate::errors::ExErrorKind;
    use crate::value::Value;
    use std::cmp::Ordering;

    fn always_equal() -> SharedComparator {
        Arc::new(FnComparator::new("AlwaysEqual", |_: &Value, _: &Value| {
            Ordering::Equal
        }))
    }

    #[test]
    fn test_default_registry_has_float_comparators() {
        let registry = ComparatorRegistry::default();
        assert!(registry.resolve_type(&FieldType::F64).is_some());
        assert!(registry.resolve_type(&FieldType::F32).is_some());
        assert!(registry.resolve_type(&FieldType::Int).is_none());
        assert_eq!(registry.by_name().count(), 0);
    }

    #[test]
    fn test_invalid_tolerances_rejected() {
        let err = ComparatorRegistry::with_default_tolerances(
            &ComparisonConfig::default().with_double_precision(-1.0),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
        assert_eq!(err.field(), Some("double_precision"));
    }

    #[test]
    fn test_fallback_tolerances_keep_explicit_type_comparators() {
        let registry = ComparatorRegistry::empty()
            .with_field_type_comparator(FieldType::F64, Arc::new(NaturalOrderComparator))
            .unwrap()
            .or_default_tolerances(&ComparisonConfig::default());
        assert_eq!(
            registry.resolve_type(&FieldType::F64).unwrap().description(),
            "natural order"
        );
        assert_eq!(
            registry.resolve_type(&FieldType::F32).unwrap().description(),
            "FloatComparator[precision=1e-6]"
        );
    }

    #[test]
    fn test_name_wins_over_type_in_either_order() {
        let natural: SharedComparator = Arc::new(NaturalOrderComparator);

        let name_first = ComparatorRegistry::empty()
            .with_field_name_comparator("name", always_equal())
            .unwrap()
            .with_field_type_comparator(FieldType::String, natural.clone())
            .unwrap();
        let type_first = ComparatorRegistry::empty()
            .with_field_type_comparator(FieldType::String, natural)
            .unwrap()
            .with_field_name_comparator("name", always_equal())
            .unwrap();

        for registry in [name_first, type_first] {
            let resolved = registry.resolve("name", &FieldType::String).unwrap();
            assert_eq!(resolved.description(), "AlwaysEqual");
            let other = registry.resolve("color", &FieldType::String).unwrap();
            assert_eq!(other.description(), "natural order");
        }
    }

    #[test]
    fn test_registration_does_not_mutate_receiver() {
        let base = ComparatorRegistry::empty();
        let extended = base.with_field_name_comparator("name", always_equal()).unwrap();
        assert!(base.is_empty());
        assert!(extended.resolve("name", &FieldType::String).is_some());
    }

    #[test]
    fn test_same_name_overwrites() {
        let registry = ComparatorRegistry::empty()
            .with_field_name_comparator("name", always_equal())
            .unwrap()
            .with_field_name_comparator("name", Arc::new(NaturalOrderComparator))
            .unwrap();
        assert_eq!(registry.by_name().count(), 1);
        assert_eq!(
            registry
                .resolve("name", &FieldType::String)
                .unwrap()
                .description(),
            "natural order"
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = ComparatorRegistry::empty()
            .with_field_name_comparator("  ", always_equal())
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_multi_name_registration_is_all_or_nothing() {
        let registry = ComparatorRegistry::empty()
            .with_field_names_comparator(["first", "last"], always_equal())
            .unwrap();
        assert_eq!(registry.by_name().count(), 2);

        let err = ComparatorRegistry::empty()
            .with_field_names_comparator(["first", ""], always_equal())
            .unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_INPUT");
    }

    #[test]
    fn test_empty_named_type_rejected() {
        let err = ComparatorRegistry::empty()
            .with_field_type_comparator(FieldType::named(""), always_equal())
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }
}
