use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation codes for `Typed`
///
/// ```ignore
/// impl Typed for Foo {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: NonGenericClassInfoCell = NonGenericClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::structure::<Self>(vec![FieldInfo::new::<T>("name"), ..])
///                 .with_superclass(SuperClass::new::<Base>("base"))
///                 .with_methods(<Self as ReflectMethods>::reflect_methods())
///         })
///     }
/// }
/// ```
pub(crate) fn impl_trait_typed(info: &ReflectStruct) -> TokenStream {
    let p = info.rp_reflect_path();
    let typed_ = crate::path::typed_(p);
    let class_info_ = crate::path::class_info_(p);
    let macro_exports_ = crate::path::macro_exports_(p);
    let ident = info.ident();

    let fields = info.declared_fields().map(|field| {
        let ty = field.ty;
        let name = field.name();
        quote! { #p::info::FieldInfo::new::<#ty>(#name) }
    });

    let superclass = match info.superclass_field() {
        Some(field) => {
            let ty = field.ty;
            let name = field.name();
            quote! { .with_superclass(#p::info::SuperClass::new::<#ty>(#name)) }
        }
        None => crate::utils::empty(),
    };

    let methods = match info.attrs().methods {
        Some(span) => quote::quote_spanned! { span =>
            .with_methods(<Self as #p::info::ReflectMethods>::reflect_methods())
        },
        None => crate::utils::empty(),
    };

    quote! {
        impl #typed_ for #ident {
            fn class_info() -> &'static #class_info_ {
                static CELL: #p::impls::NonGenericClassInfoCell =
                    #p::impls::NonGenericClassInfoCell::new();
                CELL.get_or_init(|| {
                    #class_info_::structure::<Self>(#macro_exports_::vec![#(#fields),*])
                        #superclass
                        #methods
                })
            }
        }
    }
}
