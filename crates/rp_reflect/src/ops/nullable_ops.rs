use crate::Reflect;
use crate::info::ClassInfo;

// -----------------------------------------------------------------------------
// Nullable

/// A value that may be null, e.g. `Option<T>`.
///
/// Scripts see straight through a nullable value: member lookups resolve on
/// the present value and fail with a null-target error when it is absent.
pub trait Nullable: Reflect {
    /// Returns the present value, or `None` if null.
    fn value(&self) -> Option<&dyn Reflect>;

    /// Returns the present value mutably, or `None` if null.
    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns the class of the present value.
    fn inner_class_info(&self) -> &'static ClassInfo;

    #[inline]
    fn is_null(&self) -> bool {
        self.value().is_none()
    }
}
