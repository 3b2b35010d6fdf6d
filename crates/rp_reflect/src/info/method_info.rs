use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::info::{ClassInfo, Type, Typed};
use crate::ops::InvokeError;

// -----------------------------------------------------------------------------
// Receiver

/// How a method takes its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// No receiver, an associated function.
    Static,
    /// `&self`
    Ref,
    /// `&mut self`
    Mut,
}

impl Receiver {
    /// Returns `true` if the method is callable without an instance.
    #[inline]
    pub const fn is_static(self) -> bool {
        matches!(self, Receiver::Static)
    }
}

// -----------------------------------------------------------------------------
// ParamInfo

/// A declared parameter of a method.
#[derive(Clone, Debug)]
pub struct ParamInfo {
    ty: Type,
    class_info: fn() -> &'static ClassInfo,
}

impl ParamInfo {
    #[inline]
    pub const fn new<T: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            class_info: T::class_info,
        }
    }

    /// Returns the declared [`Type`] of the parameter.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the [`ClassInfo`] of the parameter type.
    #[inline]
    pub fn class_info(&self) -> &'static ClassInfo {
        (self.class_info)()
    }

    /// Returns `true` if an argument of type `ty` can be passed here.
    ///
    /// The types must be identical, except that a nullable parameter also
    /// accepts its inner type and [`Null`](crate::ops::Null).
    pub fn accepts(&self, ty: &Type) -> bool {
        if self.ty == *ty {
            return true;
        }
        match self.class_info().nullable_inner() {
            Some(inner) => ty.is::<crate::ops::Null>() || inner.ty() == ty,
            None => false,
        }
    }
}

// -----------------------------------------------------------------------------
// MethodInfo

/// Type-erased invoker of a reflected method.
///
/// The receiver is `None` for a static call. Arguments arrive in declaration
/// order; the invoker validates their count and types itself.
pub type MethodFn =
    fn(Option<&mut dyn Reflect>, Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, InvokeError>;

/// A declared method of a class.
///
/// Several methods may share a name; they are told apart by their parameter
/// types, see [`ClassInfo::method`].
#[derive(Clone)]
pub struct MethodInfo {
    name: &'static str,
    receiver: Receiver,
    params: Box<[ParamInfo]>,
    invoke: MethodFn,
}

impl MethodInfo {
    /// Creates a method.
    ///
    /// Usually generated by [`reflect_methods`](crate::derive::reflect_methods).
    pub fn new(
        name: &'static str,
        receiver: Receiver,
        params: Vec<ParamInfo>,
        invoke: MethodFn,
    ) -> Self {
        Self {
            name,
            receiver,
            params: params.into_boxed_slice(),
            invoke,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn receiver(&self) -> Receiver {
        self.receiver
    }

    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    #[inline]
    pub fn param_len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if arguments of the given types can be passed to this method.
    pub fn matches(&self, types: &[Type]) -> bool {
        self.params.len() == types.len()
            && self.params.iter().zip(types).all(|(param, ty)| param.accepts(ty))
    }

    /// Invokes the method.
    ///
    /// Static methods ignore `receiver`. Instance methods fail with
    /// [`InvokeError::MissingReceiver`] when it is `None`.
    #[inline]
    pub fn invoke(
        &self,
        receiver: Option<&mut dyn Reflect>,
        args: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, InvokeError> {
        if receiver.is_none() && !self.receiver.is_static() {
            return Err(InvokeError::MissingReceiver { member: self.name });
        }
        (self.invoke)(receiver, args)
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&'static str> = self.params.iter().map(|p| p.ty().path()).collect();
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("receiver", &self.receiver)
            .field("params", &params)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ReflectMethods

/// The methods declared by an inherent `impl` block.
///
/// Implemented by [`reflect_methods`](crate::derive::reflect_methods) and
/// consumed by `#[derive(Reflect)]` when the type is marked `#[reflect(methods)]`.
pub trait ReflectMethods {
    /// Returns the declared methods in declaration order.
    fn reflect_methods() -> Vec<MethodInfo>;
}
