use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation codes for `Struct`
pub(crate) fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let p = info.rp_reflect_path();
    let struct_ = crate::path::struct_(p);
    let reflect_ = crate::path::reflect_(p);
    let ident = info.ident();

    let idents: Vec<_> = info.declared_fields().map(|field| field.ident).collect();
    let names: Vec<_> = info.declared_fields().map(|field| field.name()).collect();
    let indices: Vec<_> = (0..idents.len()).collect();
    let field_len = idents.len();

    let superclass = match info.superclass_field() {
        Some(field) => {
            let base = field.ident;
            quote! {
                #[inline]
                fn superclass(&self) -> ::core::option::Option<&dyn #reflect_> {
                    ::core::option::Option::Some(&self.#base)
                }

                #[inline]
                fn superclass_mut(&mut self) -> ::core::option::Option<&mut dyn #reflect_> {
                    ::core::option::Option::Some(&mut self.#base)
                }
            }
        }
        None => crate::utils::empty(),
    };

    quote! {
        impl #struct_ for #ident {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&str> {
                match index {
                    #(#indices => ::core::option::Option::Some(#names),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }

            #[inline]
            fn iter_fields(&self) -> #p::ops::StructFieldIter<'_> {
                #p::ops::StructFieldIter::new(self)
            }

            #superclass
        }
    }
}

/// Generate implementation codes for `Reflect`
pub(crate) fn impl_trait_reflect(info: &ReflectStruct) -> TokenStream {
    let p = info.rp_reflect_path();
    let reflect_ = crate::path::reflect_(p);
    let from_reflect_ = crate::path::from_reflect_(p);
    let type_path_ = crate::path::type_path_(p);
    let box_ = quote! { #p::__macro_exports::Box };
    let ident = info.ident();

    let reflect_clone = match info.attrs().clone {
        Some(span) => quote::quote_spanned! { span =>
            ::core::result::Result::Ok(#box_::new(::core::clone::Clone::clone(self)))
        },
        None => {
            let cloned = info
                .declared_fields()
                .chain(info.superclass_field())
                .map(|field| {
                    let member = field.ident;
                    let name = field.name();
                    quote! {
                        #member: #p::impls::clone_field(
                            &self.#member,
                            <Self as #type_path_>::type_path(),
                            #name,
                        )?
                    }
                });
            let ignored = info.ignored_fields().map(|field| {
                let member = field.ident;
                quote! { #member: ::core::default::Default::default() }
            });
            quote! {
                let value = Self {
                    #(#cloned,)*
                    #(#ignored,)*
                };
                ::core::result::Result::Ok(#box_::new(value))
            }
        }
    };

    quote! {
        impl #reflect_ for #ident {
            fn set(
                &mut self,
                value: #box_<dyn #reflect_>,
            ) -> ::core::result::Result<(), #box_<dyn #reflect_>> {
                *self = <Self as #from_reflect_>::take_from_reflect(value)?;
                ::core::result::Result::Ok(())
            }

            fn replace(
                &mut self,
                value: #box_<dyn #reflect_>,
            ) -> ::core::result::Result<#box_<dyn #reflect_>, #box_<dyn #reflect_>> {
                let value = <Self as #from_reflect_>::take_from_reflect(value)?;
                ::core::result::Result::Ok(#box_::new(::core::mem::replace(self, value)))
            }

            #[inline]
            fn reflect_kind(&self) -> #p::info::ReflectKind {
                #p::info::ReflectKind::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> #p::ops::ReflectRef<'_> {
                #p::ops::ReflectRef::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #p::ops::ReflectMut<'_> {
                #p::ops::ReflectMut::Struct(self)
            }

            fn reflect_clone(
                &self,
            ) -> ::core::result::Result<#box_<dyn #reflect_>, #p::ops::ReflectCloneError> {
                #reflect_clone
            }

            #[inline]
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> ::core::option::Option<bool> {
                #p::impls::struct_partial_eq(self, other)
            }

            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #p::impls::struct_debug(self, f)
            }
        }

        impl #from_reflect_ for #ident {}
    }
}
