//! Raw field value → validator input.

use crate::core::context::NormalizedValue;
use crate::core::types::{FieldValue, Value, ValueKind};

/// Convert a raw field value into the form validators consume.
///
/// Nil references become the zero value of their kind with `is_nil` set,
/// so validators can tell "absent" from "present but zero".
pub fn normalize(value: &FieldValue) -> NormalizedValue {
    match value {
        FieldValue::String(s) => NormalizedValue::present(Value::String(s.clone())),
        FieldValue::Integer(i) => NormalizedValue::present(Value::Integer(*i)),
        FieldValue::Unsigned(u) => match i64::try_from(*u) {
            Ok(i) => NormalizedValue::present(Value::Integer(i)),
            Err(_) => NormalizedValue::present(Value::Unsupported(ValueKind::Unsigned)),
        },
        FieldValue::Float(f) => NormalizedValue::present(Value::Float(*f)),
        FieldValue::Boolean(_) | FieldValue::List(_) | FieldValue::Record(_) => {
            NormalizedValue::present(Value::Unsupported(value.kind()))
        }
        FieldValue::Nil(kind) => NormalizedValue::nil(zero_of(*kind)),
    }
}

fn zero_of(kind: ValueKind) -> Value {
    match kind {
        ValueKind::String => Value::String(String::new()),
        ValueKind::Integer | ValueKind::Unsigned => Value::Integer(0),
        ValueKind::Float => Value::Float(0.0),
        ValueKind::Boolean | ValueKind::List | ValueKind::Record | ValueKind::Any => Value::Nil,
    }
}
