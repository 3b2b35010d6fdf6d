use crate::info::{ClassInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`ClassInfo`] of a type.
///
/// Implemented by `#[derive(Reflect)]` and by every built-in reflected type.
/// The returned reference lives in a lazily initialized static cell, see
/// [`NonGenericClassInfoCell`](crate::impls::NonGenericClassInfoCell).
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Typed`",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait Typed: TypePath {
    /// Returns the compile-time class information for the underlying type.
    fn class_info() -> &'static ClassInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`].
///
/// Automatically implemented for every type that implements [`Typed`].
pub trait DynamicTyped {
    /// See [`Typed::class_info`].
    fn reflect_class_info(&self) -> &'static ClassInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_class_info(&self) -> &'static ClassInfo {
        Self::class_info()
    }
}
