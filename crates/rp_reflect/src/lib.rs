//! Runtime class model for dotted-path reflection.
//!
//! Rust has no runtime reflection, so every value a script can reach
//! describes itself through a registered schema:
//!
//! - [`Reflect`]: the object-safe root trait of every reachable value.
//! - [`info`]: class metadata, i.e. [`ClassInfo`](info::ClassInfo) with its
//!   declared fields, declared methods and optional base class.
//! - [`ops`]: kind-specific views ([`Struct`](ops::Struct), [`Nullable`](ops::Nullable))
//!   and the helpers used by type-erased method invokers.
//! - [`registry`]: the [`ClassRegistry`](registry::ClassRegistry), resolving class names
//!   to metadata.
//! - [`derive`]: `#[derive(Reflect)]` and `#[reflect_methods]`.
//!
//! # Example
//!
//! ```
//! use rp_reflect::{Reflect, derive::{Reflect, reflect_methods}, info::Typed};
//!
//! #[derive(Reflect)]
//! #[reflect(methods)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! #[reflect_methods]
//! impl Counter {
//!     fn bump(&mut self, by: i32) -> i32 {
//!         self.count += by;
//!         self.count
//!     }
//! }
//!
//! let info = Counter::class_info();
//! assert!(info.field("count").is_some());
//! assert_eq!(info.methods_named("bump").count(), 1);
//! ```

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `::rp_reflect`, which must also resolve inside
// this crate for its own tests and doc examples.
extern crate self as rp_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod hash;
mod sync;
mod reflection;

pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::{FromReflect, Reflect};
pub use rp_reflect_derive as derive;
