use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(info: &ReflectStruct) -> TokenStream {
    let type_path_ = crate::path::type_path_(info.rp_reflect_path());
    let ident = info.ident();
    let (type_path, type_name, module_path) = info.type_path_exprs();

    quote! {
        impl #type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
