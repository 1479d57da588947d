//! Error types for tagcheck.
//!
//! Uses thiserror for structured errors with context. Errors are designed to:
//! - Keep record/field identity as structured fields, not pre-formatted text
//! - Separate configuration mistakes from value failures
//! - Be serializable where they end up in a report

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder replaced by the record's type name.
pub const STRUCT_PLACEHOLDER: &str = "{struct}";

/// Placeholder replaced by the field's dotted path.
pub const FIELD_PLACEHOLDER: &str = "{field}";

/// Top-level error type for tagcheck.
#[derive(Error, Debug)]
pub enum TagcheckError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Tag error: {0}")]
    TagParse(#[from] TagParseError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Broad classes of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Unknown validator, wrong arity, unparsable argument, bad tag.
    Configuration,
    /// Validator applied to a value kind it does not handle.
    UnsupportedType,
    /// The value failed the validator's rule.
    Value,
    /// Late-bound method dispatch failed.
    Dispatch,
}

/// Error returned by a single validator function.
///
/// Message templates may contain `{struct}` and `{field}`; the pipeline
/// resolves them with [`ValidatorError::render`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatorError {
    #[error("Validator '{validator}' does not support any arguments.")]
    UnexpectedArguments { validator: String },

    #[error("Validator '{validator}' requires a single argument.")]
    SingleArgument { validator: String },

    #[error("Unable to parse '{validator}' validator value.")]
    UnparsableArgument { validator: String, argument: String },

    #[error("Validator with name '{validator}' on struct '{{struct}}' and field '{{field}}' is not supported.")]
    UnsupportedType { validator: String, type_name: String },

    #[error("{message}")]
    Invalid { message: String },
}

impl ValidatorError {
    /// Value-validation failure with a message template.
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidatorError::Invalid {
            message: message.into(),
        }
    }

    /// Argument-free validator called with arguments.
    pub fn unexpected_arguments(validator: impl Into<String>) -> Self {
        ValidatorError::UnexpectedArguments {
            validator: validator.into(),
        }
    }

    /// Single-argument validator called with the wrong count.
    pub fn single_argument(validator: impl Into<String>) -> Self {
        ValidatorError::SingleArgument {
            validator: validator.into(),
        }
    }

    /// Validator argument that does not parse.
    pub fn unparsable(validator: impl Into<String>, argument: impl Into<String>) -> Self {
        ValidatorError::UnparsableArgument {
            validator: validator.into(),
            argument: argument.into(),
        }
    }

    /// Validator applied to a kind it does not implement.
    pub fn unsupported(validator: impl Into<String>, type_name: impl Into<String>) -> Self {
        ValidatorError::UnsupportedType {
            validator: validator.into(),
            type_name: type_name.into(),
        }
    }

    /// Which class of failure this is.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidatorError::UnexpectedArguments { .. }
            | ValidatorError::SingleArgument { .. }
            | ValidatorError::UnparsableArgument { .. } => ErrorCategory::Configuration,
            ValidatorError::UnsupportedType { .. } => ErrorCategory::UnsupportedType,
            ValidatorError::Invalid { .. } => ErrorCategory::Value,
        }
    }

    /// Check if this error should abort the validation pass.
    ///
    /// Only value failures are collected; everything else is surfaced.
    pub fn is_fatal(&self) -> bool {
        self.category() != ErrorCategory::Value
    }

    /// Render the message with record and field identity substituted.
    pub fn render(&self, record: &str, field: &str) -> String {
        substitute(&self.to_string(), record, field)
    }
}

/// Replace `{struct}` and `{field}` in a message template.
pub fn substitute(template: &str, record: &str, field: &str) -> String {
    template
        .replace(STRUCT_PLACEHOLDER, record)
        .replace(FIELD_PLACEHOLDER, field)
}

/// Errors from parsing directive tag text.
///
/// Positions are 1-based directive indexes.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagParseError {
    #[error("Empty directive at position {position}")]
    EmptyDirective { position: usize },

    #[error("Directive at position {position} has no validator name")]
    EmptyName { position: usize },

    #[error("Invalid validator name '{name}' at position {position}")]
    InvalidName { position: usize, name: String },

    #[error("Validator '{name}' at position {position} has ':' but no options")]
    MissingOptions { position: usize, name: String },
}

/// Errors from populating a validator registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Cannot register '{name}': registry is sealed")]
    Sealed { name: String },

    #[error("Validator '{name}' is already registered")]
    Duplicate { name: String },

    #[error("A process-wide registry is already installed")]
    AlreadyInstalled,
}

/// Errors from late-bound method dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Method '{method}' does not exist on '{type_name}'.")]
    MethodNotFound { type_name: String, method: String },

    #[error("Arguments do not match those of '{method}': {reason}")]
    ArgumentMismatch { method: String, reason: String },

    #[error("Unhandled call error in '{method}': {reason}")]
    Unhandled { method: String, reason: String },
}

impl DispatchError {
    /// Which class of failure this is. Always [`ErrorCategory::Dispatch`].
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Dispatch
    }
}

/// Errors loading pipeline options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Tag key must not be empty")]
    EmptyTagKey,
}

/// Errors that abort a validation pass.
///
/// Value failures never show up here; they are collected into a
/// [`ValidationReport`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid tag on struct '{record}' and field '{field}': {source}")]
    TagParse {
        record: String,
        field: String,
        #[source]
        source: TagParseError,
    },

    #[error("Validator '{validator}' used on struct '{record}' and field '{field}' does not exist.")]
    UnknownValidator {
        validator: String,
        record: String,
        field: String,
    },

    #[error("{message}")]
    Validator {
        record: String,
        field: String,
        validator: String,
        message: String,
        #[source]
        source: ValidatorError,
    },
}

impl ValidationError {
    /// Which class of failure this is.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidationError::TagParse { .. } | ValidationError::UnknownValidator { .. } => {
                ErrorCategory::Configuration
            }
            ValidationError::Validator { source, .. } => source.category(),
        }
    }

    /// Dotted path of the field that caused the failure.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::TagParse { field, .. }
            | ValidationError::UnknownValidator { field, .. }
            | ValidationError::Validator { field, .. } => field,
        }
    }
}

/// Result type alias for validator functions.
pub type ValidatorResult = Result<(), ValidatorError>;

/// Result type alias for tagcheck operations.
pub type TagcheckResult<T> = Result<T, TagcheckError>;

// ============================================================================
// Validation Report
// ============================================================================

/// A value failure recorded against one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the field.
    pub field: String,
    /// Validator that rejected the value.
    pub validator: String,
    /// Message with placeholders resolved.
    pub message: String,
}

/// Outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Type name of the validated record.
    pub record: String,
    /// Failures keyed by field path, in walk order.
    pub errors: IndexMap<String, FieldError>,
    /// Number of fields whose directive chains ran.
    pub fields_checked: usize,
}

impl ValidationReport {
    /// Create an empty (passing) report.
    pub fn new(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            errors: IndexMap::new(),
            fields_checked: 0,
        }
    }

    /// Record a field failure. The first failure for a path wins.
    pub fn add_error(&mut self, error: FieldError) {
        self.errors.entry(error.field.clone()).or_insert(error);
    }

    /// Check whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the failure for a field path.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Failure messages in walk order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.values().map(|e| e.message.as_str()).collect()
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            format!("✓ {} is valid ({} field(s) checked)", self.record, self.fields_checked)
        } else {
            format!(
                "✗ {} failed validation with {} error(s)",
                self.record,
                self.errors.len()
            )
        }
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> TagcheckResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get numbered error lines.
    pub fn detailed_errors(&self) -> Vec<String> {
        self.errors
            .values()
            .enumerate()
            .map(|(i, error)| format!("{}. {} [{}]", i + 1, error.message, error.validator))
            .collect()
    }
}
