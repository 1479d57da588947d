//! Late-bound method dispatch.
//!
//! A [`DispatchTable`] maps a receiver type and a method name to a typed
//! closure. Callers hold only a `&mut dyn Any` and a list of boxed
//! arguments; the table checks argument count and types before calling.
//!
//! ```
//! use tagcheck::dispatch::{Arg, DispatchTable};
//!
//! struct Counter(i64);
//!
//! let mut table = DispatchTable::new();
//! table
//!     .shared0("get", |c: &Counter| (c.0,))
//!     .exclusive1("add", |c: &mut Counter, n: i64| c.0 += n);
//!
//! let mut counter = Counter(1);
//! table.invoke(&mut counter, "add", vec![Arg::new(41i64)]).unwrap();
//! let results = table.invoke(&mut counter, "get", Vec::new()).unwrap();
//! assert_eq!(results[0].downcast_ref::<i64>(), Some(&42));
//! ```

mod table;

pub use table::{DispatchTable, IntoResults, Receiver};

use std::any::{self, Any, TypeId};
use std::fmt;

// ============================================================================
// Arguments
// ============================================================================

/// A type-erased argument or result.
pub struct Arg {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Arg {
    /// Box a value.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: any::type_name::<T>(),
        }
    }

    /// Name of the boxed type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Id of the boxed type.
    pub fn type_id(&self) -> TypeId {
        (*self.value).type_id()
    }

    /// Whether the boxed value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the value out as a `T`, or get the argument back.
    pub fn downcast<T: Any>(self) -> Result<T, Arg> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|value| Arg { value, type_name })
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg").field("type", &self.type_name).finish()
    }
}

// ============================================================================
// Parameter Types
// ============================================================================

/// Declared type of a method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Accepts any argument.
    Any,
    /// Accepts only arguments of exactly this type.
    Exact {
        /// Type id
        id: TypeId,
        /// Type name, for error messages
        name: &'static str,
    },
}

impl ParamType {
    /// Parameter of exactly type `T`.
    pub fn of<T: Any>() -> Self {
        ParamType::Exact {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Check if an argument can be passed to this parameter.
    pub fn matches(&self, arg: &Arg) -> bool {
        match self {
            ParamType::Any => true,
            ParamType::Exact { id, .. } => *id == arg.type_id(),
        }
    }

    /// Name shown in mismatch errors.
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Any => "any",
            ParamType::Exact { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_downcast() {
        let arg = Arg::new(7i64);
        assert!(arg.is::<i64>());
        assert_eq!(arg.type_name(), "i64");
        assert_eq!(arg.type_id(), TypeId::of::<i64>());
        assert_eq!(arg.downcast_ref::<i64>(), Some(&7));

        let arg = arg.downcast::<String>().unwrap_err();
        assert_eq!(arg.downcast::<i64>().unwrap(), 7);
    }

    #[test]
    fn test_param_type_matches() {
        let arg = Arg::new(String::from("x"));
        assert!(ParamType::Any.matches(&arg));
        assert!(ParamType::of::<String>().matches(&arg));
        assert!(!ParamType::of::<&str>().matches(&arg));
        assert_eq!(ParamType::of::<i32>().name(), "i32");
        assert_eq!(ParamType::Any.name(), "any");
    }
}
