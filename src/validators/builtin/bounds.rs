//! Bound validators: `min` and `max`.
//!
//! Strings are measured in UTF-8 bytes, so `"äöü"` has length 6. Integers
//! and floats are compared by value against the integer option.

use super::single_integer;
use crate::core::context::ValidatorContext;
use crate::core::error::{ValidatorError, ValidatorResult};
use crate::core::types::Value;

/// `min:N`: length or value must be at least `N`. Nil always fails.
pub fn min(ctx: &mut ValidatorContext, options: &[String]) -> ValidatorResult {
    let min = single_integer("min", options)?;

    let too_small = match &ctx.value {
        Value::String(s) => {
            if ctx.is_nil || (s.len() as i64) < min {
                return Err(ValidatorError::invalid(format!(
                    "{{field}} cannot be shorter than {} characters.",
                    min
                )));
            }
            false
        }
        Value::Integer(i) => ctx.is_nil || *i < min,
        Value::Float(f) => ctx.is_nil || *f < min as f64,
        other => return Err(ValidatorError::unsupported("min", other.type_name())),
    };

    if too_small {
        Err(ValidatorError::invalid(format!(
            "{{field}} cannot be less than {}.",
            min
        )))
    } else {
        Ok(())
    }
}

/// `max:N`: length or value must be at most `N`. Nil always passes.
pub fn max(ctx: &mut ValidatorContext, options: &[String]) -> ValidatorResult {
    let max = single_integer("max", options)?;

    let too_large = match &ctx.value {
        Value::String(s) => {
            if !ctx.is_nil && (s.len() as i64) > max {
                return Err(ValidatorError::invalid(format!(
                    "{{field}} is longer than {} characters.",
                    max
                )));
            }
            false
        }
        Value::Integer(i) => !ctx.is_nil && *i > max,
        Value::Float(f) => !ctx.is_nil && *f > max as f64,
        other => return Err(ValidatorError::unsupported("max", other.type_name())),
    };

    if too_large {
        Err(ValidatorError::invalid(format!(
            "{{field}} cannot be greater than {}.",
            max
        )))
    } else {
        Ok(())
    }
}
