//! Core types for the tagcheck validation engine.
//!
//! This module contains the foundational pieces every other module builds on:
//! - Value types (raw field values and normalized validator input)
//! - Record reflection (how a type describes its fields)
//! - Directives and the tag grammar
//! - The validator context
//! - Error types

pub mod types;
pub mod record;
pub mod directive;
pub mod context;
pub mod error;

// Re-export commonly used types
pub use types::{FieldValue, KindOf, Value, ValueKind};
pub use record::{FieldTags, Record, RecordBuilder, RecordField, Reflect, Visibility};
pub use directive::{parse_tag, Directive};
pub use context::{NormalizedValue, ValidatorContext};
pub use error::{
    ConfigError, DispatchError, ErrorCategory, FieldError, RegistryError, TagParseError, TagcheckError,
    ValidationError, ValidationReport, ValidatorError,
};
