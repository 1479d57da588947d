//! Value types seen by the walker and by validators.
//!
//! Two enums live here:
//! - [`FieldValue`] is the raw value a record reports for one of its fields.
//!   It mirrors what a struct field can hold (scalars, lists, nested records,
//!   absent references).
//! - [`Value`] is the normalized form handed to validators. It is a closed
//!   set (string, 64-bit integer, 64-bit float, opaque nil, unsupported), so
//!   every validator matches it exhaustively and falls back to an explicit
//!   "unsupported" arm.

use crate::core::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime kind of a field value.
///
/// Used for typed nil references and for naming the concrete type in
/// unsupported-type errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    Unsigned,
    Float,
    Boolean,
    List,
    Record,
    /// Interface-like slot with no concrete kind.
    Any,
}

impl ValueKind {
    /// Name of the kind as reported in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "int64",
            ValueKind::Unsigned => "uint64",
            ValueKind::Float => "float64",
            ValueKind::Boolean => "bool",
            ValueKind::List => "list",
            ValueKind::Record => "record",
            ValueKind::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Normalized validator input.
///
/// The value slot of a [`ValidatorContext`](crate::core::context::ValidatorContext)
/// holds exactly one of these. Validators may replace it (see the `numeric`
/// validator) so later validators in the same chain see the new form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// UTF-8 string
    String(String),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Absent value of no recognized kind
    Nil,
    /// A present value of a kind validators do not inspect
    Unsupported(ValueKind),
}

impl Value {
    /// Name of the concrete runtime type, for unsupported-type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "int64",
            Value::Float(_) => "float64",
            Value::Nil => "nil",
            Value::Unsupported(kind) => kind.type_name(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Nil => write!(f, "nil"),
            Value::Unsupported(kind) => write!(f, "<{}>", kind),
        }
    }
}

/// Raw value of a record field, as reported by [`Reflect`](crate::core::record::Reflect).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    List(Vec<FieldValue>),
    Record(Record),
    /// Absent reference to a value of the given kind.
    Nil(ValueKind),
}

impl FieldValue {
    /// Kind of this value. A nil reference reports the kind it points to.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::String(_) => ValueKind::String,
            FieldValue::Integer(_) => ValueKind::Integer,
            FieldValue::Unsigned(_) => ValueKind::Unsigned,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Boolean(_) => ValueKind::Boolean,
            FieldValue::List(_) => ValueKind::List,
            FieldValue::Record(_) => ValueKind::Record,
            FieldValue::Nil(kind) => *kind,
        }
    }

    /// Check if this is an absent reference.
    pub fn is_nil(&self) -> bool {
        matches!(self, FieldValue::Nil(_))
    }

    /// Try to get this value as a nested record.
    pub fn as_record(&self) -> Option<&Record> {
        if let FieldValue::Record(record) = self {
            Some(record)
        } else {
            None
        }
    }

    /// Try to get this value as a list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        if let FieldValue::List(items) = self {
            Some(items)
        } else {
            None
        }
    }
}

/// Types with a statically known [`ValueKind`].
///
/// Lets `Option<T>` convert into a typed nil when it is `None`.
pub trait KindOf {
    /// Kind reported for values of this type.
    const KIND: ValueKind;
}

macro_rules! impl_field_value {
    ($($ty:ty => $kind:ident, $conv:expr;)*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    $conv(value)
                }
            }

            impl KindOf for $ty {
                const KIND: ValueKind = ValueKind::$kind;
            }
        )*
    };
}

impl_field_value! {
    String => String, FieldValue::String;
    &str => String, |v: &str| FieldValue::String(v.to_string());
    i64 => Integer, FieldValue::Integer;
    i32 => Integer, |v: i32| FieldValue::Integer(i64::from(v));
    i16 => Integer, |v: i16| FieldValue::Integer(i64::from(v));
    i8 => Integer, |v: i8| FieldValue::Integer(i64::from(v));
    u64 => Unsigned, FieldValue::Unsigned;
    u32 => Unsigned, |v: u32| FieldValue::Unsigned(u64::from(v));
    u16 => Unsigned, |v: u16| FieldValue::Unsigned(u64::from(v));
    u8 => Unsigned, |v: u8| FieldValue::Unsigned(u64::from(v));
    f64 => Float, FieldValue::Float;
    f32 => Float, |v: f32| FieldValue::Float(f64::from(v));
    bool => Boolean, FieldValue::Boolean;
    Record => Record, FieldValue::Record;
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue> + KindOf> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => FieldValue::Nil(T::KIND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::String("a".into()).type_name(), "string");
        assert_eq!(Value::Integer(1).type_name(), "int64");
        assert_eq!(Value::Float(1.0).type_name(), "float64");
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::Unsupported(ValueKind::List).type_name(), "list");
    }

    #[test]
    fn test_option_conversion_keeps_kind() {
        let none: Option<String> = None;
        assert_eq!(FieldValue::from(none), FieldValue::Nil(ValueKind::String));

        let some: Option<i32> = Some(4);
        assert_eq!(FieldValue::from(some), FieldValue::Integer(4));
    }

    #[test]
    fn test_list_conversion() {
        let value = FieldValue::from(vec!["a", "b"]);
        assert_eq!(value.kind(), ValueKind::List);
        assert_eq!(value.as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::String("hi".into()).to_string(), "\"hi\"");
        assert_eq!(Value::Unsupported(ValueKind::Boolean).to_string(), "<bool>");
    }
}
