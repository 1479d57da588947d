//! Validator module.
//!
//! Contains the validator registry and the built-in validator set.

pub mod registry;
pub mod builtin;

pub use registry::{global, install, RegistryBuilder, RegistryEntry, ValidatorFn, ValidatorRegistry};
