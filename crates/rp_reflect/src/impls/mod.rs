//! Built-in implementations and utilities for implementing reflection traits.
//!
//! - [`concat`]: An efficient string concatenation function.
//! - [`NonGenericClassInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypePathCell`]: Used to implement [`TypePath`] for generic types.
//! - [`GenericClassInfoCell`]: Used to implement [`Typed`] for generic types.
//! - [`clone_value`], [`clone_field`]: Used to implement [`Reflect::reflect_clone`].
//! - `xxx_debug`: Used to implement [`Reflect::reflect_debug`] (e.g. [`struct_debug`]).
//! - `xxx_eq`: Used to implement [`Reflect::reflect_partial_eq`] (e.g. [`struct_partial_eq`]).
//!
//! ## Implemented Menu
//!
//! - `()`, `bool`, `char`, [`Null`](crate::ops::Null)
//! - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`: `to_string`
//! - `String`: `len`, `is_empty`, `to_string`, `to_uppercase`, `to_lowercase`,
//!   `trim`, `contains`, `starts_with`
//! - `Vec<T>`: `len`, `is_empty`, `get`, `push`
//! - `Option<T>`: nullable, no methods of its own
//!
//! [`Reflect::reflect_clone`]: crate::Reflect::reflect_clone
//! [`Reflect::reflect_debug`]: crate::Reflect::reflect_debug
//! [`Reflect::reflect_partial_eq`]: crate::Reflect::reflect_partial_eq
//! [`TypePath`]: crate::info::TypePath
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod opaque;
mod utils;

mod option;
mod primitives;
mod string;
mod vec;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use opaque::{impl_reflect_opaque, to_string_method};

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericClassInfoCell, GenericTypePathCell, NonGenericClassInfoCell};
pub use utils::{clone_field, clone_value, nullable_debug, struct_debug, struct_partial_eq};

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use rp_reflect::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T" , ">"]);
///
/// assert_eq!(s, "module::name<T>");
/// assert_eq!(s.capacity(), 15);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> ::alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = ::alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
