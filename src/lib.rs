//! # Tagcheck - Tag-driven Field Validation
//!
//! Tagcheck validates records field by field. Each field carries a tag such
//! as `not_empty,min:2,max:16` naming an ordered chain of validators; the
//! engine walks the record, runs every chain and reports failures keyed by
//! dotted field path.
//!
//! ## Features
//!
//! - **Reflective Walking**: Nested records and lists of records are flattened into dotted paths
//! - **Ordered Chains**: Validators share one context per field, so `numeric` can feed `min`/`max`
//! - **Short-circuiting**: `empty` stops the chain for absent values
//! - **Extensible**: Register custom validators before the registry is sealed
//! - **Late-bound Dispatch**: Call methods by name through a typed dispatch table
//!
//! ## Quick Start
//!
//! ```rust
//! use tagcheck::prelude::*;
//!
//! let record = Record::builder("User")
//!     .tagged("Name", "validate", "not_empty,min:2,lowercase", "Ann")
//!     .tagged("Age", "validate", "empty,min:18", None::<i64>)
//!     .tagged("Zip", "validate", "numeric,max:99999", "123456")
//!     .build();
//!
//! let pipeline = ValidationPipeline::default();
//! let report = pipeline.validate(&record).unwrap();
//!
//! assert_eq!(
//!     report.messages(),
//!     vec!["Name must be in lower case.", "Zip cannot be greater than 99999."]
//! );
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`core`]: Values, records, directives, the validator context and errors
//! - [`walker`]: Record walking into a flat field arena
//! - [`validators`]: Validator registry and the built-in validators
//! - [`validation`]: Pipeline options and the validation pipeline
//! - [`dispatch`]: Method dispatch by name
//!
//! ## Custom Validators
//!
//! ```rust
//! use std::sync::Arc;
//! use tagcheck::prelude::*;
//!
//! let registry = RegistryBuilder::new()
//!     .register("even", |ctx: &mut ValidatorContext, _: &[String]| match ctx.value {
//!         Value::Integer(i) if i % 2 != 0 => Err(ValidatorError::invalid("{field} must be even.")),
//!         Value::Integer(_) => Ok(()),
//!         ref other => Err(ValidatorError::unsupported("even", other.type_name())),
//!     })
//!     .build()
//!     .unwrap();
//!
//! let pipeline = ValidationPipeline::new(Arc::new(registry), PipelineOptions::default());
//! let report = pipeline.check("Count", "even", 3i64).unwrap();
//! assert_eq!(report.messages(), vec!["Count must be even."]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod dispatch;
pub mod validation;
pub mod validators;
pub mod walker;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust
/// use tagcheck::prelude::*;
/// ```
pub mod prelude {
    // Values
    pub use crate::core::types::{FieldValue, Value, ValueKind};

    // Records
    pub use crate::core::record::{FieldTags, Record, RecordField, Reflect, Visibility};

    // Directives
    pub use crate::core::directive::{parse_tag, Directive};

    // Contexts
    pub use crate::core::context::{NormalizedValue, ValidatorContext};

    // Errors
    pub use crate::core::error::{
        ConfigError, DispatchError, ErrorCategory, FieldError, RegistryError, TagParseError,
        TagcheckError, TagcheckResult, ValidationError, ValidationReport, ValidatorError,
        ValidatorResult,
    };

    // Walking
    pub use crate::walker::{walk, Field, FieldArena, FieldId};

    // Validators
    pub use crate::validators::registry::{RegistryBuilder, ValidatorFn, ValidatorRegistry};

    // Validation
    pub use crate::validation::options::PipelineOptions;
    pub use crate::validation::pipeline::ValidationPipeline;

    // Dispatch
    pub use crate::dispatch::{Arg, DispatchTable, ParamType};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
