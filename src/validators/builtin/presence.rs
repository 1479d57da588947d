//! Presence validators: `empty` and `not_empty`.

use super::no_arguments;
use crate::core::context::ValidatorContext;
use crate::core::error::{ValidatorError, ValidatorResult};
use crate::core::types::Value;

const CANNOT_BE_EMPTY: &str = "{field} cannot be empty.";

/// `empty`: an empty value is acceptable and ends the chain.
///
/// Nil, `""` and `0` set the stop flag. Anything else passes through to the
/// next validator. Floats are not handled here.
pub fn empty(ctx: &mut ValidatorContext, options: &[String]) -> ValidatorResult {
    no_arguments("empty", options)?;

    let is_empty = match &ctx.value {
        Value::String(s) => ctx.is_nil || s.is_empty(),
        Value::Integer(i) => ctx.is_nil || *i == 0,
        _ if ctx.is_nil => true,
        other => return Err(ValidatorError::unsupported("empty", other.type_name())),
    };

    if is_empty {
        ctx.stop();
    }
    Ok(())
}

/// `not_empty`: reject nil, `""`, `0` and `0.0`.
pub fn not_empty(ctx: &mut ValidatorContext, options: &[String]) -> ValidatorResult {
    no_arguments("not_empty", options)?;

    let is_empty = match &ctx.value {
        Value::String(s) => ctx.is_nil || s.is_empty(),
        Value::Integer(i) => ctx.is_nil || *i == 0,
        Value::Float(f) => ctx.is_nil || *f == 0.0,
        _ if ctx.is_nil => true,
        other => return Err(ValidatorError::unsupported("not_empty", other.type_name())),
    };

    if is_empty {
        Err(ValidatorError::invalid(CANNOT_BE_EMPTY))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ValueKind;

    fn string(s: &str) -> ValidatorContext {
        ValidatorContext::with_value(Value::String(s.to_string()))
    }

    #[test]
    fn test_empty_stops_on_empty_values() {
        let mut ctx = string("");
        assert!(empty(&mut ctx, &[]).is_ok());
        assert!(ctx.is_stopped());

        let mut ctx = ValidatorContext::nil(Value::Integer(0));
        assert!(empty(&mut ctx, &[]).is_ok());
        assert!(ctx.is_stopped());

        let mut ctx = ValidatorContext::with_value(Value::Integer(0));
        assert!(empty(&mut ctx, &[]).is_ok());
        assert!(ctx.is_stopped());

        let mut ctx = ValidatorContext::nil(Value::Nil);
        assert!(empty(&mut ctx, &[]).is_ok());
        assert!(ctx.is_stopped());
    }

    #[test]
    fn test_empty_passes_through_present_values() {
        let mut ctx = string("x");
        assert!(empty(&mut ctx, &[]).is_ok());
        assert!(!ctx.is_stopped());

        let mut ctx = ValidatorContext::with_value(Value::Integer(5));
        assert!(empty(&mut ctx, &[]).is_ok());
        assert!(!ctx.is_stopped());
    }

    #[test]
    fn test_empty_rejects_unsupported_kinds() {
        let mut ctx = ValidatorContext::with_value(Value::Unsupported(ValueKind::List));
        assert_eq!(
            empty(&mut ctx, &[]),
            Err(ValidatorError::unsupported("empty", "list"))
        );
        assert!(!ctx.is_stopped());

        let mut ctx = ValidatorContext::with_value(Value::Float(0.0));
        assert_eq!(
            empty(&mut ctx, &[]),
            Err(ValidatorError::unsupported("empty", "float64"))
        );
    }

    #[test]
    fn test_empty_checks_arity_before_value() {
        let mut ctx = ValidatorContext::with_value(Value::Unsupported(ValueKind::Record));
        assert_eq!(
            empty(&mut ctx, &["1".to_string()]),
            Err(ValidatorError::unexpected_arguments("empty"))
        );
    }

    #[test]
    fn test_not_empty_rejects_empty_values() {
        let cases = vec![
            string(""),
            ValidatorContext::nil(Value::String(String::new())),
            ValidatorContext::with_value(Value::Integer(0)),
            ValidatorContext::with_value(Value::Float(0.0)),
            ValidatorContext::nil(Value::Nil),
        ];

        for mut ctx in cases {
            assert_eq!(
                not_empty(&mut ctx, &[]),
                Err(ValidatorError::invalid("{field} cannot be empty."))
            );
        }
    }

    #[test]
    fn test_not_empty_accepts_present_values() {
        assert!(not_empty(&mut string("a"), &[]).is_ok());
        assert!(not_empty(&mut ValidatorContext::with_value(Value::Integer(1)), &[]).is_ok());
        assert!(not_empty(&mut ValidatorContext::with_value(Value::Float(0.1)), &[]).is_ok());
    }

    #[test]
    fn test_not_empty_unsupported_and_arity() {
        let mut ctx = ValidatorContext::with_value(Value::Unsupported(ValueKind::Boolean));
        assert_eq!(
            not_empty(&mut ctx, &[]),
            Err(ValidatorError::unsupported("not_empty", "bool"))
        );
        assert_eq!(
            not_empty(&mut ctx, &["x".to_string()]),
            Err(ValidatorError::unexpected_arguments("not_empty"))
        );
    }
}
