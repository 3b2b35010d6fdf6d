use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};

use crate::hash::HashMap;
use crate::info::ClassInfo;
use crate::sync::{OnceLock, PoisonError, RwLock};

// -----------------------------------------------------------------------------
// NonGenericClassInfoCell

/// Container for static storage of non-generic class information.
///
/// # Examples
///
/// ```
/// use rp_reflect::impls::NonGenericClassInfoCell;
/// use rp_reflect::info::{ClassInfo, TypePath, Typed};
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "demo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn type_ident() -> &'static str { "Foo" }
/// }
///
/// impl Typed for Foo {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: NonGenericClassInfoCell = NonGenericClassInfoCell::new();
///         CELL.get_or_init(|| ClassInfo::opaque::<Self>())
///     }
/// }
///
/// assert!(core::ptr::eq(Foo::class_info(), Foo::class_info()));
/// ```
pub struct NonGenericClassInfoCell(OnceLock<ClassInfo>);

impl NonGenericClassInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored class, initializing it with `f` on first access.
    ///
    /// `f` must not call back into the same cell.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &ClassInfo
    where
        F: FnOnce() -> ClassInfo,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericClassInfoCell

/// Container for static storage of class information of generic types.
///
/// A `static` inside a generic function is shared by every instantiation,
/// so the cell keys its entries by the [`TypeId`] of the instantiated type.
pub struct GenericClassInfoCell(OnceLock<RwLock<HashMap<TypeId, &'static ClassInfo>>>);

impl GenericClassInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the class stored for `G`, creating it with `f` on first access.
    ///
    /// `f` runs without holding the lock, so it may build other generic classes.
    pub fn get_or_insert<G, F>(&self, f: F) -> &'static ClassInfo
    where
        G: Any + ?Sized,
        F: FnOnce() -> ClassInfo,
    {
        let map = self.0.get_or_init(RwLock::default);
        let type_id = TypeId::of::<G>();

        let found = map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        if let Some(info) = found {
            return info;
        }

        let leaked: &'static ClassInfo = Box::leak(Box::new(f()));
        *map.write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert(leaked)
    }
}

// -----------------------------------------------------------------------------
// GenericTypePathCell

/// Container for static storage of type paths of generic types.
///
/// See [`GenericClassInfoCell`].
pub struct GenericTypePathCell(OnceLock<RwLock<HashMap<TypeId, &'static str>>>);

impl GenericTypePathCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the path stored for `G`, creating it with `f` on first access.
    pub fn get_or_insert<G, F>(&self, f: F) -> &'static str
    where
        G: Any + ?Sized,
        F: FnOnce() -> String,
    {
        let map = self.0.get_or_init(RwLock::default);
        let type_id = TypeId::of::<G>();

        let found = map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        if let Some(path) = found {
            return path;
        }

        let leaked: &'static str = f().leak();
        *map.write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert(leaked)
    }
}
