use proc_macro2::TokenStream;

use crate::derive_data::ReflectStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(info: &ReflectStruct) -> TokenStream {
    let Some(span) = info.attrs().auto_register else {
        return crate::utils::empty();
    };

    let p = info.rp_reflect_path();
    let auto_register_ = crate::path::auto_register_(p);
    let typed_ = crate::path::typed_(p);
    let ident = info.ident();

    quote::quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::AutoRegisterClass(<#ident as #typed_>::class_info)
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectStruct) -> TokenStream {
    crate::utils::empty()
}
