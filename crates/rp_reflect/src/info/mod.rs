//! Compile-time class information.
//!
//! ## Menu
//!
//! - [`TypePath`]: static type names, without prefix `::`.
//! - [`DynamicTypePath`]: dynamic dispatch for `TypePath`.
//! - [`TypePathTable`]: function pointers to one type's `TypePath` implementation.
//! - [`Type`]: a `TypeId` with its `TypePathTable`, used for parameter types.
//!
//! - [`ClassInfo`]: the class of a reflected type.
//!     - [`ReflectKind`]: `Struct`, `Nullable` or `Opaque`.
//!     - [`FieldInfo`]: a declared field, with its name and type.
//!     - [`SuperClass`]: the base class embedded through `#[reflect(extends)]`.
//!     - [`MethodInfo`]: a declared method, with its [`Receiver`], [`ParamInfo`]s and invoker.
//!
//! - [`Typed`]: static access to `ClassInfo`.
//! - [`DynamicTyped`]: dynamic dispatch for `Typed`.
//! - [`ReflectMethods`]: the method table of an inherent `impl` block.

// -----------------------------------------------------------------------------
// Modules

mod class_info;
mod field_info;
mod method_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use class_info::{Ancestors, ClassInfo, ReflectKind};
pub use field_info::{FieldInfo, SuperClass};
pub use method_info::{MethodFn, MethodInfo, ParamInfo, Receiver, ReflectMethods};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::{DynamicTyped, Typed};
