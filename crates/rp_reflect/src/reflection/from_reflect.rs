use alloc::boxed::Box;

use crate::Reflect;

/// A trait that enables types to be constructed from reflected data.
///
/// It is used wherever a type-erased value has to become a concrete one:
/// method arguments, field assignment and [`Reflect::set`].
///
/// # Rules
///
/// 1. If the `TypeId` matches, the value is cloned (or moved by [`take_from_reflect`]).
/// 2. `Option<T>` also accepts a bare `T` and the [`Null`] value.
/// 3. Otherwise the conversion fails.
///
/// # Examples
///
/// ```
/// use rp_reflect::{FromReflect, ops::Null};
///
/// assert_eq!(i32::from_reflect(&5_i32), Some(5));
/// assert_eq!(i32::from_reflect(&5_i64), None);
///
/// assert_eq!(Option::<i32>::from_reflect(&5_i32), Some(Some(5)));
/// assert_eq!(Option::<i32>::from_reflect(&Null), Some(None));
/// ```
///
/// [`take_from_reflect`]: FromReflect::take_from_reflect
/// [`Null`]: crate::ops::Null
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `FromReflect` so cannot be created through reflection",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait FromReflect: Reflect + Sized {
    /// Constructs a concrete instance of `Self` from a reflected value.
    fn from_reflect(reflect: &dyn Reflect) -> Option<Self> {
        if !reflect.is::<Self>() {
            return None;
        }
        reflect.reflect_clone().ok()?.take::<Self>().ok()
    }

    /// Attempts to downcast the given value to `Self`; if that fails, try to construct
    /// the value using [`FromReflect::from_reflect`].
    fn take_from_reflect(reflect: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        match reflect.take::<Self>() {
            Ok(value) => Ok(value),
            Err(reflect) => match Self::from_reflect(&*reflect) {
                Some(value) => Ok(value),
                None => Err(reflect),
            },
        }
    }
}
