//! See following macros:
//!
//! - [`Reflect`]
//! - [`reflect_methods`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Class Derivation
///
/// `#[derive(Reflect)]` turns a struct with named fields into a reflected class.
/// It implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Struct`
/// - `Reflect`
/// - `FromReflect`
///
/// Generic types, tuple structs, unit structs and enums are rejected.
///
/// ## Type Attributes
///
/// ### Custom Type Path
///
/// The class is registered under `module_path!()::Name` by default.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "shop::Order")]
/// struct Order { /* ... */ }
/// ```
///
/// ### Methods
///
/// `methods` attaches the methods declared by a `#[reflect_methods]` impl block
/// to the class. Without it the class has no methods.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(methods)]
/// struct Order { /* ... */ }
///
/// #[reflect_methods]
/// impl Order { /* ... */ }
/// ```
///
/// ### Clone
///
/// `reflect_clone` clones field by field. If the type implements `Clone`,
/// the `clone` flag uses it instead.
///
/// ### Automatic Registration
///
/// With the `auto_register` feature, `auto_register` submits the class so that
/// `ClassRegistry::auto_register` can find it.
///
/// ### Crate Path
///
/// `crate_path = "..."` overrides the path of the reflection crate, `::rp_reflect` by default.
///
/// ## Field Attributes
///
/// - `#[reflect(extends)]`: the field holds the base class. Its members are
///   reached through the base class, never as a declared field. At most one.
/// - `#[reflect(ignore)]`: the field is invisible to reflection. Its type must
///   implement `Default`, which is used by `reflect_clone`.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Animal {
///     name: String,
/// }
///
/// #[derive(Reflect)]
/// struct Dog {
///     #[reflect(extends)]
///     base: Animal,
///     tricks: Vec<String>,
///     #[reflect(ignore)]
///     cache: Option<u64>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectStruct::from_ast(&ast) {
        Ok(info) => impls::impl_struct(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// # Method Table
///
/// Applied to an inherent impl block, `#[reflect_methods]` implements
/// `ReflectMethods` for the type, describing every method of the block.
/// Pair it with `#[reflect(methods)]` on the derive.
///
/// Methods may take `&self`, `&mut self` or no receiver at all (static methods).
/// Parameters and return values must be owned types implementing `FromReflect`
/// and `Reflect` respectively. A return type spelled `Result<T, E>` is treated as
/// fallible: `E` is reported as a raised error.
///
/// Overloads are written as separate Rust methods sharing a reflected name:
///
/// ```rust, ignore
/// #[reflect_methods]
/// impl Greeter {
///     fn greet(&self) -> String { /* ... */ }
///
///     #[reflect(name = "greet")]
///     fn greet_named(&self, name: String) -> String { /* ... */ }
///
///     #[reflect(skip)]
///     fn helper<T>(&self, value: &T) { /* ... */ }
/// }
/// ```
///
/// `crate_path = "..."` overrides the path of the reflection crate.
#[proc_macro_attribute]
pub fn reflect_methods(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut methods_args = impls::MethodsArgs::default();
    let parser = syn::meta::parser(|meta| methods_args.parse_meta(meta));
    parse_macro_input!(args with parser);

    let item = parse_macro_input!(input as ItemImpl);

    match impls::impl_reflect_methods(methods_args, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
