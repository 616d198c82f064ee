use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Comparisons and matching predicates never fail; only configuration does.
/// Each kind maps to a stable error code for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A registration argument was rejected (blank field name, empty type name)
    InvalidInput,
    /// A comparison configuration value is out of range
    InvalidConfig,
    /// A configuration document or mismatch descriptor could not be (de)serialized
    Serialization,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the operation and field the error is about.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the offending field name, type name or config key
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {:?}", self.code(), self.kind)?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Concrete configuration failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldwiseError {
    /// A field-name comparator was registered under a blank name
    #[error("Field name must not be blank")]
    EmptyFieldName,

    /// A field-type comparator was registered under `Named("")`
    #[error("Field type name must not be empty")]
    EmptyTypeName,

    /// A tolerance is negative, NaN or infinite
    #[error("Invalid tolerance for {name}: {value}")]
    InvalidTolerance { name: String, value: f64 },

    /// The recursion bound must allow at least one level
    #[error("Invalid max_depth {max_depth}: must be at least 1")]
    InvalidDepth { max_depth: usize },

    /// The configuration document is malformed
    #[error("Config parse error: {message}")]
    ConfigParse { message: String },

    /// A mismatch descriptor could not be encoded
    #[error("Encode error: {message}")]
    Encode { message: String },
}

impl From<FieldwiseError> for ExError {
    fn from(err: FieldwiseError) -> Self {
        let message = err.to_string();
        match err {
            FieldwiseError::EmptyFieldName => ExError::new(ExErrorKind::InvalidInput)
                .with_op("register_field_name_comparator")
                .with_message(message),

            FieldwiseError::EmptyTypeName => ExError::new(ExErrorKind::InvalidInput)
                .with_op("register_field_type_comparator")
                .with_message(message),

            FieldwiseError::InvalidTolerance { name, .. } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_op("validate_config")
                    .with_field(name)
                    .with_message(message)
            }

            FieldwiseError::InvalidDepth { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("validate_config")
                .with_field("max_depth")
                .with_message(message),

            FieldwiseError::ConfigParse { .. } => ExError::new(ExErrorKind::Serialization)
                .with_op("parse_config")
                .with_message(message),

            FieldwiseError::Encode { .. } => ExError::new(ExErrorKind::Serialization)
                .with_op("encode_mismatch")
                .with_message(message),
        }
    }
}

impl From<toml::de::Error> for FieldwiseError {
    fn from(err: toml::de::Error) -> Self {
        FieldwiseError::ConfigParse {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FieldwiseError {
    fn from(err: serde_json::Error) -> Self {
        FieldwiseError::Encode {
            message: err.to_string(),
        }
    }
}
