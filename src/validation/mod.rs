//! Validation of walked records.
//!
//! The pipeline walks a record, normalizes each field's value and runs the
//! field's directive chain against the validator registry.

pub mod normalize;
pub mod options;
pub mod pipeline;

pub use normalize::normalize;
pub use options::{PipelineOptions, DEFAULT_TAG_KEY};
pub use pipeline::{ValidationPipeline, ANONYMOUS_RECORD};
