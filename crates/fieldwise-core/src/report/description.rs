//! Strategy description rendering.

use crate::registry::ComparatorRegistry;

const HEADER: &str =
    "when comparing elements using field/property by field/property comparator on all fields/properties";

/// Describe a field-by-field strategy over `registry`
///
/// The by-name line is omitted when no name comparators are registered. The
/// type mapping is listed twice, once as it applies to fields and once as it
/// applies to whole elements, since both consult it.
pub fn describe_field_by_field(registry: &ComparatorRegistry) -> String {
    let mut out = String::from(HEADER);
    out.push_str("\nComparators used:\n");

    let by_name: Vec<String> = registry
        .by_name()
        .map(|(name, cmp)| format!("{name} -> {}", cmp.description()))
        .collect();
    if !by_name.is_empty() {
        out.push_str(&format!(
            "- for elements fields (by name): {{{}}}\n",
            by_name.join(", ")
        ));
    }

    let by_type: Vec<String> = registry
        .by_type()
        .map(|(field_type, cmp)| format!("{field_type} -> {}", cmp.description()))
        .collect();
    let by_type = by_type.join(", ");
    out.push_str(&format!("- for elements fields (by type): {{{by_type}}}\n"));
    out.push_str(&format!("- for elements (by type): {{{by_type}}}"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::FnComparator;
    use crate::value::Value;
    use std::cmp::Ordering;
    use std::sync::Arc;

    #[test]
    fn test_default_description() {
        assert_eq!(
            describe_field_by_field(&ComparatorRegistry::default()),
            "when comparing elements using field/property by field/property comparator on all fields/properties\n\
             Comparators used:\n\
             - for elements fields (by type): {f32 -> FloatComparator[precision=1e-6], f64 -> DoubleComparator[precision=1e-15]}\n\
             - for elements (by type): {f32 -> FloatComparator[precision=1e-6], f64 -> DoubleComparator[precision=1e-15]}"
        );
    }

    #[test]
    fn test_by_name_line_lists_names_in_order() {
        let always = Arc::new(FnComparator::new("AlwaysEqual", |_: &Value, _: &Value| {
            Ordering::Equal
        }));
        let registry = ComparatorRegistry::empty()
            .with_field_names_comparator(["name", "lightSaberColor"], always)
            .unwrap();
        let text = describe_field_by_field(&registry);
        assert!(text.contains(
            "- for elements fields (by name): {lightSaberColor -> AlwaysEqual, name -> AlwaysEqual}\n"
        ));
        assert!(text.ends_with("- for elements fields (by type): {}\n- for elements (by type): {}"));
    }
}
