//! Validator context.
//!
//! One context is built per field and threaded through that field's whole
//! directive chain, so a validator that rewrites the value (for example
//! `numeric` turning `"42"` into `42`) is observed by the validators after it.

use crate::core::types::Value;

/// A field's value after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedValue {
    /// Normalized value (typed zero when the field is a nil reference)
    pub value: Value,
    /// Whether the field held an absent reference
    pub is_nil: bool,
}

impl NormalizedValue {
    /// A present value.
    pub fn present(value: Value) -> Self {
        Self {
            value,
            is_nil: false,
        }
    }

    /// An absent value standing in as `value`.
    pub fn nil(value: Value) -> Self {
        Self { value, is_nil: true }
    }
}

/// State handed to every validator in a field's chain.
///
/// `value` is mutable within one chain. Once `stop_validate`
/// is set, the pipeline invokes no further directives for the field and
/// reports nothing for them.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorContext {
    /// Candidate value
    pub value: Value,
    /// Explicit nilness; a nil reference is not the same as a default value
    pub is_nil: bool,
    /// Set by a validator to skip the rest of the chain without error
    pub stop_validate: bool,
}

impl ValidatorContext {
    /// Create a context from a normalized field value.
    pub fn new(normalized: NormalizedValue) -> Self {
        Self {
            value: normalized.value,
            is_nil: normalized.is_nil,
            stop_validate: false,
        }
    }

    /// Create a context for a present value.
    pub fn with_value(value: Value) -> Self {
        Self::new(NormalizedValue::present(value))
    }

    /// Create a context for a nil value.
    pub fn nil(value: Value) -> Self {
        Self::new(NormalizedValue::nil(value))
    }

    /// Short-circuit the rest of the chain.
    pub fn stop(&mut self) {
        self.stop_validate = true;
    }

    /// Check whether the chain has been short-circuited.
    pub fn is_stopped(&self) -> bool {
        self.stop_validate
    }

    /// Replace the candidate value for later validators.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}
