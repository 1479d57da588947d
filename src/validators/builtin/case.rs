//! Letter-case validators: `lowercase` and `uppercase`.
//!
//! A letter is an alphabetic, non-numeric char, so letter numbers such as
//! `Ⅻ` are ignored. A letter counts as lower (upper) case only if it also
//! has a distinct upper (lower) case mapping: `ª` is a letter without case
//! and fails both validators, as do uncased scripts such as CJK.
//!
//! Combining marks with the `Alphabetic` property are treated as letters,
//! and lower-case letters with no upper-case mapping (`ĸ`) fail `lowercase`.

use super::no_arguments;
use crate::core::context::ValidatorContext;
use crate::core::error::{ValidatorError, ValidatorResult};
use crate::core::types::Value;

/// `lowercase`: every letter must be lower case. Non-letters are ignored.
pub fn lowercase(ctx: &mut ValidatorContext, options: &[String]) -> ValidatorResult {
    no_arguments("lowercase", options)?;
    check_letters(ctx, "lowercase", is_lower, "{field} must be in lower case.")
}

/// `uppercase`: every letter must be upper case. Non-letters are ignored.
pub fn uppercase(ctx: &mut ValidatorContext, options: &[String]) -> ValidatorResult {
    no_arguments("uppercase", options)?;
    check_letters(ctx, "uppercase", is_upper, "{field} must be in upper case.")
}

fn check_letters(
    ctx: &ValidatorContext,
    validator: &str,
    accept: fn(char) -> bool,
    message: &str,
) -> ValidatorResult {
    match &ctx.value {
        Value::String(s) => {
            if ctx.is_nil || s.is_empty() {
                return Ok(());
            }
            if s.chars().any(|c| is_letter(c) && !accept(c)) {
                Err(ValidatorError::invalid(message))
            } else {
                Ok(())
            }
        }
        other => Err(ValidatorError::unsupported(validator, other.type_name())),
    }
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

fn is_lower(c: char) -> bool {
    c.is_lowercase() && !c.to_uppercase().eq(std::iter::once(c))
}

fn is_upper(c: char) -> bool {
    c.is_uppercase() && !c.to_lowercase().eq(std::iter::once(c))
}
