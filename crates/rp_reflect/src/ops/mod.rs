//! Kind-specific views and invocation helpers.
//!
//! ## Menu
//!
//! The following are subtraits of [`Reflect`](crate::Reflect):
//!
//! - [`Struct`]: for structs with named fields (e.g. `A { .. }`).
//! - [`Nullable`]: for values that may be null (e.g. `Option<T>`).
//!
//! Everything else is opaque: reachable through its methods only.
//!
//! Method invokers generated by [`reflect_methods`](crate::derive::reflect_methods)
//! rely on [`Args`], [`receiver_ref`] and [`receiver_mut`], and report
//! failures through [`InvokeError`].

// -----------------------------------------------------------------------------
// Modules

mod clone_error;
mod invoke;
mod kind;
mod null;
mod nullable_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use clone_error::ReflectCloneError;
pub use invoke::{Args, InvokeError, receiver_mut, receiver_ref};
pub use kind::{ReflectMut, ReflectRef};
pub use null::Null;
pub use nullable_ops::Nullable;
pub use struct_ops::{Struct, StructFieldIter};
