use core::fmt;

use crate::Reflect;
use crate::ops::{Nullable, ReflectCloneError, ReflectRef, Struct};

/// Clones a value through [`Reflect::reflect_clone`], keeping its concrete type.
///
/// Used by implementations whose contents are only known to be `Reflect`.
pub fn clone_value<T: Reflect>(value: &T) -> Result<T, ReflectCloneError> {
    value
        .reflect_clone()?
        .take::<T>()
        .map_err(|_| ReflectCloneError::Unsupported {
            class: value.reflect_type_path(),
        })
}

/// Clones one field of a struct for a derived [`Reflect::reflect_clone`].
pub fn clone_field<T: Reflect>(
    value: &T,
    type_path: &'static str,
    field: &'static str,
) -> Result<T, ReflectCloneError> {
    clone_value(value).map_err(|_| ReflectCloneError::Field {
        class: type_path,
        field,
    })
}

/// A function use for implementing [`Reflect::reflect_partial_eq`] on structs.
///
/// # Rules
///
/// 1. If `y` is not the same class as `x`, return `Some(false)`.
/// 2. Compare the base class values, then every declared field in order.
///    Return the first result that is not `Some(true)`.
/// 3. Return `Some(true)`.
#[inline(never)]
pub fn struct_partial_eq(x: &dyn Struct, y: &dyn Reflect) -> Option<bool> {
    if x.ty_id() != y.ty_id() {
        return Some(false);
    }
    let ReflectRef::Struct(y) = y.reflect_ref() else {
        return Some(false);
    };

    if let (Some(x_base), Some(y_base)) = (x.superclass(), y.superclass()) {
        let result = x_base.reflect_partial_eq(y_base);
        if result != Some(true) {
            return result;
        }
    }

    for (x_field, y_field) in x.iter_fields().zip(y.iter_fields()) {
        let result = x_field.reflect_partial_eq(y_field);
        if result != Some(true) {
            return result;
        }
    }
    Some(true)
}

/// A function use for implementing [`Reflect::reflect_debug`] on structs.
///
/// The base class value is listed first, under the name of its embedding field.
#[inline(never)]
pub fn struct_debug(dyn_struct: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(dyn_struct.reflect_type_name());

    let superclass = dyn_struct.reflect_class_info().superclass();
    if let (Some(info), Some(base)) = (superclass, dyn_struct.superclass()) {
        debug.field(info.field_name(), &base as &dyn fmt::Debug);
    }

    for (index, field) in dyn_struct.iter_fields().enumerate() {
        if let Some(name) = dyn_struct.name_at(index) {
            debug.field(name, &field as &dyn fmt::Debug);
        }
    }
    debug.finish()
}

/// A function use for implementing [`Reflect::reflect_debug`] on nullable values.
#[inline(never)]
pub fn nullable_debug(dyn_nullable: &dyn Nullable, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match dyn_nullable.value() {
        Some(value) => f.debug_tuple("Some").field(&value as &dyn fmt::Debug).finish(),
        None => f.write_str("None"),
    }
}
