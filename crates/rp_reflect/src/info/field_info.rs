use core::any::{Any, TypeId};

use crate::info::{ClassInfo, Type, Typed};

// -----------------------------------------------------------------------------
// FieldInfo

/// A declared field of a struct class.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    ty: Type,
    // `ClassInfo` is created on first access; using a function pointer delays it.
    class_info: fn() -> &'static ClassInfo,
}

impl FieldInfo {
    /// Creates a field named `name` of type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            class_info: T::class_info,
        }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared [`Type`] of the field.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty.is::<T>()
    }

    /// Returns the [`ClassInfo`] of the field type.
    #[inline]
    pub fn class_info(&self) -> &'static ClassInfo {
        (self.class_info)()
    }
}

// -----------------------------------------------------------------------------
// SuperClass

/// The base class a struct extends.
///
/// The base is embedded as a field marked `#[reflect(extends)]`. That field is
/// not part of the declared field list; members of the base are reached by
/// ascending through it.
#[derive(Clone, Debug)]
pub struct SuperClass {
    field: &'static str,
    ty: Type,
    class_info: fn() -> &'static ClassInfo,
}

impl SuperClass {
    /// Creates a base class of type `T` embedded in the field named `field`.
    #[inline]
    pub const fn new<T: Typed>(field: &'static str) -> Self {
        Self {
            field,
            ty: Type::of::<T>(),
            class_info: T::class_info,
        }
    }

    /// Returns the name of the embedding field.
    #[inline]
    pub const fn field_name(&self) -> &'static str {
        self.field
    }

    /// Returns the [`Type`] of the base class.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the [`ClassInfo`] of the base class.
    #[inline]
    pub fn class_info(&self) -> &'static ClassInfo {
        (self.class_info)()
    }
}
