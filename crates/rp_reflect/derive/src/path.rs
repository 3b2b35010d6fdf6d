//! Paths into `rp_reflect` used by generated code.
//!
//! Kept in one place so generated code follows the module layout of
//! `rp_reflect` with a single edit.

use proc_macro2::TokenStream;
use quote::quote;

/// The default access path to the `rp_reflect` crate.
///
/// Crates that reach `rp_reflect` through a re-export (e.g. `::refpath::reflect`)
/// override it with `#[reflect(crate_path = "...")]`.
pub(crate) fn rp_reflect() -> syn::Path {
    syn::parse_quote!(::rp_reflect)
}

#[inline(always)]
pub(crate) fn reflect_(p: &syn::Path) -> TokenStream {
    quote! { #p::Reflect }
}

#[inline(always)]
pub(crate) fn from_reflect_(p: &syn::Path) -> TokenStream {
    quote! { #p::FromReflect }
}

#[inline(always)]
pub(crate) fn type_path_(p: &syn::Path) -> TokenStream {
    quote! { #p::info::TypePath }
}

#[inline(always)]
pub(crate) fn typed_(p: &syn::Path) -> TokenStream {
    quote! { #p::info::Typed }
}

#[inline(always)]
pub(crate) fn class_info_(p: &syn::Path) -> TokenStream {
    quote! { #p::info::ClassInfo }
}

#[inline(always)]
pub(crate) fn struct_(p: &syn::Path) -> TokenStream {
    quote! { #p::ops::Struct }
}

#[inline(always)]
pub(crate) fn macro_exports_(p: &syn::Path) -> TokenStream {
    quote! { #p::__macro_exports }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(p: &syn::Path) -> TokenStream {
    quote! { #p::__macro_exports::auto_register }
}
