//! `numeric`: string must hold a base-10 integer in 32-bit range.
//!
//! On success the context value becomes that integer, so a chain such as
//! `numeric,min:1,max:100` bounds the number rather than the string length.

use super::no_arguments;
use crate::core::context::ValidatorContext;
use crate::core::error::{ValidatorError, ValidatorResult};
use crate::core::types::Value;

/// `numeric`: parse the string and replace the value with the integer.
pub fn numeric(ctx: &mut ValidatorContext, options: &[String]) -> ValidatorResult {
    no_arguments("numeric", options)?;

    let parsed = match &ctx.value {
        Value::String(s) => {
            if ctx.is_nil || s.is_empty() {
                return Err(ValidatorError::invalid("{field} must be numeric."));
            }
            s.parse::<i32>()
                .map_err(|_| ValidatorError::invalid("{field} must contain numbers only."))?
        }
        other => return Err(ValidatorError::unsupported("numeric", other.type_name())),
    };

    ctx.set_value(Value::Integer(i64::from(parsed)));
    Ok(())
}
