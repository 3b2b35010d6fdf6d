use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Nullable, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable kind-specific view of a reflected value.
///
/// Returned by [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Nullable(&'a dyn Nullable),
    Opaque(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    /// Returns the [`ReflectKind`] of this view.
    #[inline]
    pub fn kind(&self) -> ReflectKind {
        match self {
            ReflectRef::Struct(_) => ReflectKind::Struct,
            ReflectRef::Nullable(_) => ReflectKind::Nullable,
            ReflectRef::Opaque(_) => ReflectKind::Opaque,
        }
    }

    #[inline]
    pub fn as_struct(self) -> Option<&'a dyn Struct> {
        match self {
            ReflectRef::Struct(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_nullable(self) -> Option<&'a dyn Nullable> {
        match self {
            ReflectRef::Nullable(value) => Some(value),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable kind-specific view of a reflected value.
///
/// Returned by [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Nullable(&'a mut dyn Nullable),
    Opaque(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    /// Returns the [`ReflectKind`] of this view.
    #[inline]
    pub fn kind(&self) -> ReflectKind {
        match self {
            ReflectMut::Struct(_) => ReflectKind::Struct,
            ReflectMut::Nullable(_) => ReflectKind::Nullable,
            ReflectMut::Opaque(_) => ReflectKind::Opaque,
        }
    }

    #[inline]
    pub fn as_struct(self) -> Option<&'a mut dyn Struct> {
        match self {
            ReflectMut::Struct(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_nullable(self) -> Option<&'a mut dyn Nullable> {
        match self {
            ReflectMut::Nullable(value) => Some(value),
            _ => None,
        }
    }
}
