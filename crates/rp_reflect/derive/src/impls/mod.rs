//! Code generation.

mod auto_register;
mod reflect_methods;
mod struct_kind;
mod trait_type_path;
mod trait_typed;

pub(crate) use reflect_methods::{MethodsArgs, impl_reflect_methods};

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let type_path_tokens = trait_type_path::impl_trait_type_path(info);
    let typed_tokens = trait_typed::impl_trait_typed(info);
    let struct_tokens = struct_kind::impl_trait_struct(info);
    let reflect_tokens = struct_kind::impl_trait_reflect(info);
    let auto_register_tokens = auto_register::get_auto_register_impl(info);

    quote! {
        const _: () = {
            #type_path_tokens

            #typed_tokens

            #struct_tokens

            #reflect_tokens

            #auto_register_tokens
        };
    }
}
