use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The root trait of every value a script can reach.
///
/// It's strongly recommended to use [the derive macro for `Reflect`] rather than
/// implementing this trait by hand. The derive macro implements this trait along
/// with [`Struct`], [`Typed`] and [`FromReflect`].
///
/// # Type Information
///
/// `Reflect` extends [`DynamicTypePath`] and [`DynamicTyped`], so the class of any
/// type-erased value is available at runtime:
///
/// ```
/// # use rp_reflect::{Reflect, info::{DynamicTypePath, DynamicTyped}};
/// let value = 10i32.into_boxed_reflect();
/// assert_eq!(value.reflect_type_path(), "i32");
/// assert!(value.reflect_class_info().methods_named("to_string").next().is_some());
/// ```
///
/// # Type Identification
///
/// [`Any::type_id`] on `Box<dyn Reflect>` returns the id of the box itself.
/// Use [`Reflect::ty_id`] instead:
///
/// ```
/// # use rp_reflect::Reflect;
/// # use core::any::TypeId;
/// let x: Box<dyn Reflect> = Box::new(32_i32);
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// # Casting
///
/// [`reflect_ref`] and [`reflect_mut`] expose the kind-specific view, while
/// `is`, `downcast_ref`, `downcast_mut`, `downcast` and `take` recover the
/// concrete type:
///
/// ```
/// # use rp_reflect::Reflect;
/// let x: Box<dyn Reflect> = Box::new(String::from("hello"));
/// assert!(x.is::<String>());
/// assert_eq!(x.take::<String>().unwrap(), "hello");
/// ```
///
/// [the derive macro for `Reflect`]: crate::derive::Reflect
/// [`Struct`]: crate::ops::Struct
/// [`Typed`]: crate::info::Typed
/// [`FromReflect`]: crate::FromReflect
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Reflect` so cannot be reached by a script",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    /// Casts this type to a reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed reflected value.
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a reflected value.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Overwrites `self` with `value`.
    ///
    /// If the value cannot be converted to `Self`, it is handed back unchanged.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Overwrites `self` with `value` and returns the previous value.
    ///
    /// If the value cannot be converted to `Self`, it is handed back unchanged
    /// and `self` is left untouched.
    fn replace(&mut self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

    /// Returns the kind of this value.
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable kind-specific view of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable kind-specific view of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Clones this value into a new boxed value of the same concrete type.
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError>;

    /// Returns `Some(true)` if the values are equal, `Some(false)` if not,
    /// and `None` if the comparison is not supported.
    #[inline]
    fn reflect_partial_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    /// Debug formatter for the value.
    ///
    /// Any value that implements `Reflect` can be formatted with `{:?}`
    /// through `dyn Reflect`.
    fn reflect_debug(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use crate::impls;
        match self.reflect_ref() {
            ReflectRef::Struct(data) => impls::struct_debug(data, f),
            ReflectRef::Nullable(data) => impls::nullable_debug(data, f),
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the casting half of [`Reflect`] for a type that also
/// implements [`FromReflect`](crate::FromReflect).
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = <Self as $crate::FromReflect>::take_from_reflect(value)?;
            Ok(())
        }

        fn replace(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<::alloc::boxed::Box<dyn $crate::Reflect>, ::alloc::boxed::Box<dyn $crate::Reflect>>
        {
            let value = <Self as $crate::FromReflect>::take_from_reflect(value)?;
            Ok(::alloc::boxed::Box::new(::core::mem::replace(self, value)))
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;

    use crate::Reflect;

    #[test]
    fn downcast_round_trip() {
        let value: Box<dyn Reflect> = Box::new(7_u8);
        assert!(value.is::<u8>());
        assert!(!value.is::<i8>());
        assert_eq!(value.downcast_ref::<u8>(), Some(&7));

        let value = value.downcast::<i8>().unwrap_err();
        assert_eq!(value.take::<u8>().unwrap(), 7);
    }

    #[test]
    fn set_and_replace() {
        let mut text = String::from("old");
        let previous = Reflect::replace(&mut text, Box::new(String::from("new"))).unwrap();
        assert_eq!(previous.take::<String>().unwrap(), "old");
        assert_eq!(text, "new");

        let rejected = Reflect::set(&mut text, Box::new(1_i32)).unwrap_err();
        assert!(rejected.is::<i32>());
        assert_eq!(text, "new");
    }

    #[test]
    fn debug_through_dyn() {
        let value: Box<dyn Reflect> = Box::new(Some(3_i32));
        assert_eq!(format!("{value:?}"), "Some(3)");
    }
}
