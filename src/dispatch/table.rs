//! Dispatch table: (receiver type, method name) → typed closure.

use super::{Arg, ParamType};
use crate::core::error::DispatchError;
use indexmap::IndexMap;
use log::{debug, trace, warn};
use std::any::{self, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

type SharedCall = Arc<dyn Fn(&dyn Any, Vec<Arg>) -> Result<Vec<Arg>, DispatchError> + Send + Sync>;
type ExclusiveCall =
    Arc<dyn Fn(&mut dyn Any, Vec<Arg>) -> Result<Vec<Arg>, DispatchError> + Send + Sync>;

/// How a method borrows its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// `&T`
    Shared,
    /// `&mut T`
    Exclusive,
}

struct Method<C> {
    params: Vec<ParamType>,
    call: C,
}

#[derive(Default)]
struct Slots {
    shared: Option<Method<SharedCall>>,
    exclusive: Option<Method<ExclusiveCall>>,
}

struct TypeMethods {
    type_name: &'static str,
    methods: IndexMap<String, Slots>,
}

/// Method results converted into type-erased values, in declared order.
pub trait IntoResults {
    /// Box every result.
    fn into_results(self) -> Vec<Arg>;
}

impl IntoResults for () {
    fn into_results(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl<A: Any + Send> IntoResults for (A,) {
    fn into_results(self) -> Vec<Arg> {
        vec![Arg::new(self.0)]
    }
}

impl<A: Any + Send, B: Any + Send> IntoResults for (A, B) {
    fn into_results(self) -> Vec<Arg> {
        vec![Arg::new(self.0), Arg::new(self.1)]
    }
}

impl<A: Any + Send, B: Any + Send, C: Any + Send> IntoResults for (A, B, C) {
    fn into_results(self) -> Vec<Arg> {
        vec![Arg::new(self.0), Arg::new(self.1), Arg::new(self.2)]
    }
}

/// Table of methods callable by name.
///
/// Each method name on a type has up to two forms: one taking `&T` and one
/// taking `&mut T`. [`invoke`](Self::invoke) prefers the `&mut T` form when
/// both are registered.
#[derive(Default)]
pub struct DispatchTable {
    types: HashMap<TypeId, TypeMethods>,
}

impl DispatchTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Raw registration
    // ========================================================================

    /// Register a `&T` method with explicit parameter types.
    ///
    /// `call` receives arguments already checked against `params`.
    pub fn register_shared<T, F>(&mut self, method: &str, params: Vec<ParamType>, call: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T, Vec<Arg>) -> Result<Vec<Arg>, DispatchError> + Send + Sync + 'static,
    {
        let name = method.to_string();
        let call: SharedCall = Arc::new(move |target: &dyn Any, args| {
            let target = target
                .downcast_ref::<T>()
                .ok_or_else(|| receiver_mismatch::<T>(&name))?;
            call(target, args)
        });
        let slots = self.slots_mut::<T>(method);
        if slots.shared.is_some() {
            warn!("Replacing shared method '{}' on '{}'", method, any::type_name::<T>());
        }
        slots.shared = Some(Method { params, call });
        debug!("Registered shared method '{}' on '{}'", method, any::type_name::<T>());
        self
    }

    /// Register a `&mut T` method with explicit parameter types.
    pub fn register_exclusive<T, F>(
        &mut self,
        method: &str,
        params: Vec<ParamType>,
        call: F,
    ) -> &mut Self
    where
        T: Any,
        F: Fn(&mut T, Vec<Arg>) -> Result<Vec<Arg>, DispatchError> + Send + Sync + 'static,
    {
        let name = method.to_string();
        let call: ExclusiveCall = Arc::new(move |target: &mut dyn Any, args| {
            let target = target
                .downcast_mut::<T>()
                .ok_or_else(|| receiver_mismatch::<T>(&name))?;
            call(target, args)
        });
        let slots = self.slots_mut::<T>(method);
        if slots.exclusive.is_some() {
            warn!("Replacing exclusive method '{}' on '{}'", method, any::type_name::<T>());
        }
        slots.exclusive = Some(Method { params, call });
        debug!("Registered exclusive method '{}' on '{}'", method, any::type_name::<T>());
        self
    }

    // ========================================================================
    // Typed registration
    // ========================================================================

    /// Register a `&T` method with no parameters.
    pub fn shared0<T, R, F>(&mut self, method: &str, f: F) -> &mut Self
    where
        T: Any,
        R: IntoResults,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        self.register_shared::<T, _>(method, Vec::new(), move |target, _| Ok(f(target).into_results()))
    }

    /// Register a `&T` method with one parameter.
    pub fn shared1<T, A, R, F>(&mut self, method: &str, f: F) -> &mut Self
    where
        T: Any,
        A: Any,
        R: IntoResults,
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        let name = method.to_string();
        self.register_shared::<T, _>(method, vec![ParamType::of::<A>()], move |target, args| {
            let mut args = args.into_iter();
            let a = take::<A>(&mut args, &name)?;
            Ok(f(target, a).into_results())
        })
    }

    /// Register a `&T` method with two parameters.
    pub fn shared2<T, A, B, R, F>(&mut self, method: &str, f: F) -> &mut Self
    where
        T: Any,
        A: Any,
        B: Any,
        R: IntoResults,
        F: Fn(&T, A, B) -> R + Send + Sync + 'static,
    {
        let name = method.to_string();
        let params = vec![ParamType::of::<A>(), ParamType::of::<B>()];
        self.register_shared::<T, _>(method, params, move |target, args| {
            let mut args = args.into_iter();
            let a = take::<A>(&mut args, &name)?;
            let b = take::<B>(&mut args, &name)?;
            Ok(f(target, a, b).into_results())
        })
    }

    /// Register a `&mut T` method with no parameters.
    pub fn exclusive0<T, R, F>(&mut self, method: &str, f: F) -> &mut Self
    where
        T: Any,
        R: IntoResults,
        F: Fn(&mut T) -> R + Send + Sync + 'static,
    {
        self.register_exclusive::<T, _>(method, Vec::new(), move |target, _| {
            Ok(f(target).into_results())
        })
    }

    /// Register a `&mut T` method with one parameter.
    pub fn exclusive1<T, A, R, F>(&mut self, method: &str, f: F) -> &mut Self
    where
        T: Any,
        A: Any,
        R: IntoResults,
        F: Fn(&mut T, A) -> R + Send + Sync + 'static,
    {
        let name = method.to_string();
        self.register_exclusive::<T, _>(method, vec![ParamType::of::<A>()], move |target, args| {
            let mut args = args.into_iter();
            let a = take::<A>(&mut args, &name)?;
            Ok(f(target, a).into_results())
        })
    }

    /// Register a `&mut T` method with two parameters.
    pub fn exclusive2<T, A, B, R, F>(&mut self, method: &str, f: F) -> &mut Self
    where
        T: Any,
        A: Any,
        B: Any,
        R: IntoResults,
        F: Fn(&mut T, A, B) -> R + Send + Sync + 'static,
    {
        let name = method.to_string();
        let params = vec![ParamType::of::<A>(), ParamType::of::<B>()];
        self.register_exclusive::<T, _>(method, params, move |target, args| {
            let mut args = args.into_iter();
            let a = take::<A>(&mut args, &name)?;
            let b = take::<B>(&mut args, &name)?;
            Ok(f(target, a, b).into_results())
        })
    }

    // ========================================================================
    // Lookup and invocation
    // ========================================================================

    /// Check if `T` has a method with this name in either form.
    pub fn contains<T: Any>(&self, method: &str) -> bool {
        self.receivers::<T>(method).next().is_some()
    }

    /// Forms registered for a method on `T`.
    pub fn receivers<T: Any>(&self, method: &str) -> impl Iterator<Item = Receiver> + '_ {
        let slots = self
            .types
            .get(&TypeId::of::<T>())
            .and_then(|methods| methods.methods.get(method));
        let shared = slots.and_then(|s| s.shared.as_ref()).map(|_| Receiver::Shared);
        let exclusive = slots
            .and_then(|s| s.exclusive.as_ref())
            .map(|_| Receiver::Exclusive);
        shared.into_iter().chain(exclusive)
    }

    /// Method names registered for `T`, in registration order.
    pub fn methods<T: Any>(&self) -> Vec<&str> {
        self.types
            .get(&TypeId::of::<T>())
            .map(|methods| methods.methods.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Call a method by name.
    ///
    /// The `&mut T` form is used when registered, otherwise the `&T` form.
    pub fn invoke(
        &self,
        target: &mut dyn Any,
        method: &str,
        args: Vec<Arg>,
    ) -> Result<Vec<Arg>, DispatchError> {
        let slots = self.resolve(Any::type_id(&*target), method)?;

        if let Some(entry) = &slots.exclusive {
            trace!("Invoking '{}' by exclusive reference", method);
            check_arguments(method, &entry.params, &args)?;
            return (entry.call)(target, args);
        }
        if let Some(entry) = &slots.shared {
            trace!("Invoking '{}' by shared reference", method);
            check_arguments(method, &entry.params, &args)?;
            return (entry.call)(&*target, args);
        }

        Err(self.not_found(Any::type_id(&*target), method))
    }

    /// Call a method by name through a shared reference.
    ///
    /// Only `&T` forms are considered.
    pub fn invoke_shared(
        &self,
        target: &dyn Any,
        method: &str,
        args: Vec<Arg>,
    ) -> Result<Vec<Arg>, DispatchError> {
        let type_id = Any::type_id(target);
        let entry = self
            .resolve(type_id, method)?
            .shared
            .as_ref()
            .ok_or_else(|| self.not_found(type_id, method))?;

        trace!("Invoking '{}' by shared reference", method);
        check_arguments(method, &entry.params, &args)?;
        (entry.call)(target, args)
    }

    fn resolve(&self, type_id: TypeId, method: &str) -> Result<&Slots, DispatchError> {
        self.types
            .get(&type_id)
            .and_then(|methods| methods.methods.get(method))
            .ok_or_else(|| self.not_found(type_id, method))
    }

    fn not_found(&self, type_id: TypeId, method: &str) -> DispatchError {
        let type_name = self
            .types
            .get(&type_id)
            .map(|methods| methods.type_name)
            .unwrap_or("unregistered type");
        DispatchError::MethodNotFound {
            type_name: type_name.to_string(),
            method: method.to_string(),
        }
    }

    fn slots_mut<T: Any>(&mut self, method: &str) -> &mut Slots {
        self.types
            .entry(TypeId::of::<T>())
            .or_insert_with(|| TypeMethods {
                type_name: any::type_name::<T>(),
                methods: IndexMap::new(),
            })
            .methods
            .entry(method.to_string())
            .or_default()
    }
}

fn check_arguments(method: &str, params: &[ParamType], args: &[Arg]) -> Result<(), DispatchError> {
    if params.len() != args.len() {
        return Err(DispatchError::ArgumentMismatch {
            method: method.to_string(),
            reason: format!("expected {} argument(s), got {}", params.len(), args.len()),
        });
    }

    for (index, (param, arg)) in params.iter().zip(args).enumerate() {
        if !param.matches(arg) {
            return Err(DispatchError::ArgumentMismatch {
                method: method.to_string(),
                reason: format!(
                    "argument {} expected '{}', got '{}'",
                    index,
                    param.name(),
                    arg.type_name()
                ),
            });
        }
    }

    Ok(())
}

fn take<A: Any>(args: &mut std::vec::IntoIter<Arg>, method: &str) -> Result<A, DispatchError> {
    let arg = args.next().ok_or_else(|| DispatchError::Unhandled {
        method: method.to_string(),
        reason: "missing argument".to_string(),
    })?;
    arg.downcast::<A>().map_err(|arg| DispatchError::Unhandled {
        method: method.to_string(),
        reason: format!("cannot take '{}' as '{}'", arg.type_name(), any::type_name::<A>()),
    })
}

fn receiver_mismatch<T>(method: &str) -> DispatchError {
    DispatchError::Unhandled {
        method: method.to_string(),
        reason: format!("receiver is not '{}'", any::type_name::<T>()),
    }
}
