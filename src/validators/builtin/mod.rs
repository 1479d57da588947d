//! Built-in validator implementations.
//!
//! Every validator checks its arguments before looking at the value, then
//! matches the value exhaustively and reports kinds it does not handle as
//! unsupported.

mod bounds;
mod case;
mod numeric;
mod presence;

use crate::core::error::{RegistryError, ValidatorError, ValidatorResult};
use crate::validators::registry::{RegistryEntry, ValidatorRegistry};
use std::sync::Arc;

pub use bounds::{max, min};
pub use case::{lowercase, uppercase};
pub use numeric::numeric;
pub use presence::{empty, not_empty};

/// Built-in validators as registry entries, in registration order.
pub fn entries() -> Vec<RegistryEntry> {
    fn entry(
        name: &str,
        description: &str,
        validator: fn(&mut crate::core::context::ValidatorContext, &[String]) -> ValidatorResult,
    ) -> RegistryEntry {
        RegistryEntry {
            name: name.to_string(),
            validator: Arc::new(validator),
            description: description.to_string(),
        }
    }

    vec![
        entry("empty", "Skip remaining validators when the value is nil, zero or empty", empty),
        entry("not_empty", "Reject nil, zero or empty values", not_empty),
        entry("min", "Minimum string length or numeric value", min),
        entry("max", "Maximum string length or numeric value", max),
        entry("lowercase", "Every letter must be lower case", lowercase),
        entry("uppercase", "Every letter must be upper case", uppercase),
        entry("numeric", "String must parse as a 32-bit integer; the value becomes that integer", numeric),
    ]
}

/// Register all built-in validators into an open registry.
pub fn register_all(registry: &mut ValidatorRegistry) -> Result<(), RegistryError> {
    for entry in entries() {
        let validator = entry.validator;
        registry.register_with_description(entry.name, entry.description, move |ctx, options| {
            validator(ctx, options)
        })?;
    }
    Ok(())
}

/// Reject any options for an argument-free validator.
fn no_arguments(validator: &str, options: &[String]) -> ValidatorResult {
    if options.is_empty() {
        Ok(())
    } else {
        Err(ValidatorError::unexpected_arguments(validator))
    }
}

/// Read the single integer option of a bound validator.
///
/// Arity is checked first, then the option is parsed; both happen before
/// the value is inspected.
fn single_integer(validator: &str, options: &[String]) -> Result<i64, ValidatorError> {
    if options.len() != 1 {
        return Err(ValidatorError::single_argument(validator));
    }
    options[0]
        .parse::<i64>()
        .map_err(|_| ValidatorError::unparsable(validator, options[0].as_str()))
}
