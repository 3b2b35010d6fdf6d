//! Dotted-path scripts over reflected object graphs.
//!
//! A script is a chain of field reads and method calls, e.g.
//! `owner.rename(%1).len()`. It is evaluated against a live value whose
//! classes are described by [`rp_reflect`]: each segment resolves on the
//! runtime class of the current value, walking up its base classes, and
//! the result becomes the current value of the next segment.
//!
//! - [`script`]: tokenizing, [`CompiledScript`](script::CompiledScript).
//! - [`bind`]: `%N` placeholders and their binding to [`Arguments`](args::Arguments).
//! - [`resolve`]: member lookup along the class hierarchy.
//! - [`eval`]: the chain [`Evaluator`](eval::Evaluator).
//! - [`access`]: field-only `get` and `set`.
//! - [`Reflector`]: the entry point, with [`ScriptOptions`](config::ScriptOptions).
//!
//! The free functions of this crate use a default [`Reflector`].
//!
//! # Example
//!
//! ```
//! use rp_reflect::{Reflect, derive::Reflect};
//!
//! #[derive(Reflect)]
//! struct Stock {
//!     count: i32,
//! }
//!
//! let mut stock = Stock { count: 5 };
//!
//! let old = rp_script::reflect_assign(&mut stock, "count", vec![], 9_i32.into_boxed_reflect()).unwrap();
//! assert_eq!(old.downcast_ref::<i32>(), Some(&5));
//! assert_eq!(stock.count, 9);
//! ```
//!
//! # Concurrency
//!
//! Evaluation is synchronous and keeps no state between calls. The object
//! graph is borrowed mutably for the whole evaluation, so concurrent
//! evaluations on one graph need external synchronization.

// -----------------------------------------------------------------------------
// Extern Self

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod reflector;

pub mod access;
pub mod args;
pub mod bind;
pub mod config;
pub mod eval;
pub mod resolve;
pub mod script;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{InvalidScriptReason, ScriptError};
pub use reflector::Reflector;

use alloc::boxed::Box;
use alloc::vec::Vec;

use rp_reflect::Reflect;
use rp_reflect::info::{Type, TypePath};

/// See [`Reflector::reflect`].
#[inline]
pub fn reflect(target: &mut dyn Reflect, script: &str) -> Result<Box<dyn Reflect>, ScriptError> {
    Reflector::new().reflect(target, script)
}

/// See [`Reflector::reflect_with_args`].
#[inline]
pub fn reflect_with_args(
    target: &mut dyn Reflect,
    script: &str,
    values: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, ScriptError> {
    Reflector::new().reflect_with_args(target, script, values)
}

/// See [`Reflector::reflect_assign`].
#[inline]
pub fn reflect_assign(
    target: &mut dyn Reflect,
    script: &str,
    values: Vec<Box<dyn Reflect>>,
    new_value: Box<dyn Reflect>,
) -> Result<Box<dyn Reflect>, ScriptError> {
    Reflector::new().reflect_assign(target, script, values, new_value)
}

/// See [`Reflector::reflect_typed`].
#[inline]
pub fn reflect_typed(
    target: &mut dyn Reflect,
    script: &str,
    values: Vec<Box<dyn Reflect>>,
    types: Vec<Type>,
) -> Result<Box<dyn Reflect>, ScriptError> {
    Reflector::new().reflect_typed(target, script, values, types)
}

/// See [`Reflector::reflect_typed_assign`].
#[inline]
pub fn reflect_typed_assign(
    target: &mut dyn Reflect,
    script: &str,
    values: Vec<Box<dyn Reflect>>,
    types: Vec<Type>,
    new_value: Box<dyn Reflect>,
) -> Result<Box<dyn Reflect>, ScriptError> {
    Reflector::new().reflect_typed_assign(target, script, values, types, new_value)
}

/// See [`Reflector::get`].
#[inline]
pub fn get<'a>(target: &'a dyn Reflect, path: &str) -> Result<&'a dyn Reflect, ScriptError> {
    Reflector::new().get(target, path)
}

/// See [`Reflector::get_as`].
#[inline]
pub fn get_as<'a, T: Reflect + TypePath>(target: &'a dyn Reflect, path: &str) -> Result<&'a T, ScriptError> {
    Reflector::new().get_as(target, path)
}

/// See [`Reflector::set`].
#[inline]
pub fn set(target: &mut dyn Reflect, path: &str, value: Box<dyn Reflect>) -> Result<(), ScriptError> {
    Reflector::new().set(target, path, value)
}
