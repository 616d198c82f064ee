use fieldwise_core::{
    ComparatorRegistry, FieldByFieldStrategy, FnComparator, MatchingEngine, SharedComparator,
    Value,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// Two public fields, one string and one integer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Foo {
    pub id: String,
    pub bar: i32,
}

#[allow(dead_code)]
pub fn foo(id: &str, bar: i32) -> Foo {
    Foo {
        id: id.to_string(),
        bar,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Jedi {
    pub name: String,
    pub light_saber_color: String,
}

#[allow(dead_code)]
pub fn jedi(name: &str, light_saber_color: &str) -> Jedi {
    Jedi {
        name: name.to_string(),
        light_saber_color: light_saber_color.to_string(),
    }
}

/// Natural equality ignores `info`; field-by-field does not
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub first: String,
    pub last: String,
    pub info: String,
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first && self.last == other.last
    }
}

#[allow(dead_code)]
pub fn person(first: &str, last: &str, info: &str) -> Person {
    Person {
        first: first.to_string(),
        last: last.to_string(),
        info: info.to_string(),
    }
}

/// Heterogeneous elements: each variant has its own field set
#[derive(Debug, Clone, Serialize)]
pub enum Animal {
    Bird { name: String, color: String },
    Snake { name: String, length: i32 },
}

#[allow(dead_code)]
pub fn bird(color: &str) -> Animal {
    Animal::Bird {
        name: "Bird".to_string(),
        color: color.to_string(),
    }
}

#[allow(dead_code)]
pub fn snake(length: i32) -> Animal {
    Animal::Snake {
        name: "Snake".to_string(),
        length,
    }
}

/// String comparator that treats every pair as equal
#[allow(dead_code)]
pub fn always_equal_string() -> SharedComparator {
    Arc::new(FnComparator::new("AlwaysEqual", |_: &Value, _: &Value| {
        Ordering::Equal
    }))
}

/// Engine over a field-by-field strategy with the default registry
#[allow(dead_code)]
pub fn field_by_field_engine() -> MatchingEngine<FieldByFieldStrategy> {
    engine_with(&ComparatorRegistry::default())
}

#[allow(dead_code)]
pub fn engine_with(registry: &ComparatorRegistry) -> MatchingEngine<FieldByFieldStrategy> {
    MatchingEngine::new(FieldByFieldStrategy::new(registry))
}

/// Description of the default field-by-field strategy
#[allow(dead_code)]
pub const DEFAULT_DESCRIPTION: &str = "when comparing elements using field/property by field/property comparator on all fields/properties\n\
Comparators used:\n\
- for elements fields (by type): {f32 -> FloatComparator[precision=1e-6], f64 -> DoubleComparator[precision=1e-15]}\n\
- for elements (by type): {f32 -> FloatComparator[precision=1e-6], f64 -> DoubleComparator[precision=1e-15]}";
