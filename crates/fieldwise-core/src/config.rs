//! Comparison configuration.
//!
//! Holds the default floating-point tolerances and the recursion bound for
//! field-by-field comparison. Values can be built in code or read from a TOML
//! document; missing keys take their defaults.
//!
//! ```toml
//! double_precision = 1e-15
//! float_precision = 1e-6
//! max_depth = 64
//! ```

use crate::errors::{FieldwiseError, Result};
use serde::{Deserialize, Serialize};

/// Default tolerance of the implicit `f64` comparator
pub const DEFAULT_DOUBLE_PRECISION: f64 = 1e-15;

/// Default tolerance of the implicit `f32` comparator
pub const DEFAULT_FLOAT_PRECISION: f32 = 1e-6;

/// Default nesting bound before falling back to natural equality
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tolerances and limits for field-by-field comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Precision of the default `f64` comparator
    pub double_precision: f64,
    /// Precision of the default `f32` comparator
    pub float_precision: f32,
    /// Nesting levels compared field-by-field before natural equality takes over
    pub max_depth: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            double_precision: DEFAULT_DOUBLE_PRECISION,
            float_precision: DEFAULT_FLOAT_PRECISION,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ComparisonConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// - `Serialization`: the document is not valid TOML or has unknown keys
    /// - `InvalidConfig`: a value fails [`validate`](Self::validate)
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ComparisonConfig = toml::from_str(text).map_err(FieldwiseError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_double_precision(mut self, precision: f64) -> Self {
        self.double_precision = precision;
        self
    }

    pub fn with_float_precision(mut self, precision: f32) -> Self {
        self.float_precision = precision;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check tolerances are finite and non-negative and depth is at least 1
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        check_tolerance("double_precision", self.double_precision)?;
        check_tolerance("float_precision", f64::from(self.float_precision))?;
        if self.max_depth == 0 {
            return Err(FieldwiseError::InvalidDepth {
                max_depth: self.max_depth,
            }
            .into());
        }
        Ok(())
    }
}

fn check_tolerance(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FieldwiseError::InvalidTolerance {
            name: name.to_string(),
            value,
        }
        .into())
    }
}
