use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::{MethodInfo, Receiver, TypePath};
use crate::ops::{Args, receiver_ref};

/// Implements [`Reflect`], [`TypePath`], [`Typed`](crate::info::Typed) and
/// [`FromReflect`](crate::FromReflect) for a `Clone + PartialEq + Debug`
/// type without reflected fields.
macro_rules! impl_reflect_opaque {
    ($ty:ty, $path:literal, $name:literal $(, $methods:expr)?) => {
        impl $crate::info::TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }
        }

        impl $crate::info::Typed for $ty {
            fn class_info() -> &'static $crate::info::ClassInfo {
                static CELL: $crate::impls::NonGenericClassInfoCell =
                    $crate::impls::NonGenericClassInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::ClassInfo::opaque::<Self>() $( .with_methods($methods) )?
                })
            }
        }

        impl $crate::Reflect for $ty {
            $crate::reflection::impl_reflect_cast_fn!(Opaque);

            #[inline]
            fn reflect_clone(
                &self,
            ) -> Result<::alloc::boxed::Box<dyn $crate::Reflect>, $crate::ops::ReflectCloneError> {
                Ok(::alloc::boxed::Box::new(Clone::clone(self)))
            }

            fn reflect_partial_eq(&self, value: &dyn $crate::Reflect) -> Option<bool> {
                match <dyn $crate::Reflect>::downcast_ref::<Self>(value) {
                    Some(value) => Some(PartialEq::eq(self, value)),
                    None => Some(false),
                }
            }

            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }

        impl $crate::FromReflect for $ty {
            #[inline]
            fn from_reflect(reflect: &dyn $crate::Reflect) -> Option<Self> {
                <dyn $crate::Reflect>::downcast_ref::<Self>(reflect).cloned()
            }
        }
    };
}

pub(crate) use impl_reflect_opaque;

/// The `to_string` method shared by every `ToString` built-in.
pub(crate) fn to_string_method<T: Reflect + TypePath + ToString>() -> MethodInfo {
    MethodInfo::new("to_string", Receiver::Ref, Vec::new(), |receiver, args| {
        let _ = Args::new("to_string", args, 0)?;
        let this = receiver_ref::<T>(receiver, "to_string")?;
        let value: Box<dyn Reflect> = Box::new(this.to_string());
        Ok(value)
    })
}
