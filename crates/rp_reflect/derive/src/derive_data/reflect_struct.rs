use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, Type};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// StructField

/// A named field of the derived struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    /// The reflected name, without a raw identifier prefix.
    pub fn name(&self) -> LitStr {
        LitStr::new(&self.ident.unraw().to_string(), self.ident.span())
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct

/// Everything `#[derive(Reflect)]` needs to know about a struct.
pub(crate) struct ReflectStruct<'a> {
    rp_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "#[derive(Reflect)] does not support generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &ast.ident,
                        "#[derive(Reflect)] only supports structs with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "#[derive(Reflect)] only supports structs with named fields",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        let mut has_superclass = false;
        for field in &named.named {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if let Some(span) = field_attrs.extends {
                if has_superclass {
                    return Err(syn::Error::new(span, "a class can extend only one base class"));
                }
                has_superclass = true;
            }
            let Some(ident) = field.ident.as_ref() else {
                return Err(syn::Error::new_spanned(field, "expected a named field"));
            };
            fields.push(StructField {
                ident,
                ty: &field.ty,
                attrs: field_attrs,
            });
        }

        let rp_reflect_path = attrs
            .crate_path
            .clone()
            .unwrap_or_else(crate::path::rp_reflect);

        Ok(Self {
            rp_reflect_path,
            attrs,
            ident: &ast.ident,
            fields,
        })
    }

    #[inline]
    pub fn rp_reflect_path(&self) -> &Path {
        &self.rp_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// Declared fields: neither ignored nor the base class.
    pub fn declared_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields
            .iter()
            .filter(|field| field.attrs.ignore.is_none() && field.attrs.extends.is_none())
    }

    /// The field embedding the base class.
    pub fn superclass_field(&self) -> Option<&StructField<'a>> {
        self.fields.iter().find(|field| field.attrs.extends.is_some())
    }

    pub fn ignored_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.ignore.is_some())
    }

    /// `(type_path, type_name, module_path)` expressions, all `&'static str`.
    pub fn type_path_exprs(&self) -> (TokenStream, TokenStream, TokenStream) {
        match &self.attrs.type_path {
            Some(custom) => {
                let value = custom.value();
                let (module, name) = match value.rsplit_once("::") {
                    Some((module, name)) => (Some(module), name),
                    None => (None, value.as_str()),
                };
                let name = LitStr::new(name, custom.span());
                let module = match module {
                    Some(module) => {
                        let module = LitStr::new(module, custom.span());
                        quote! { ::core::option::Option::Some(#module) }
                    }
                    None => quote! { ::core::option::Option::None },
                };
                (custom.to_token_stream(), name.to_token_stream(), module)
            }
            None => {
                let name = LitStr::new(&self.ident.unraw().to_string(), self.ident.span());
                (
                    quote! { ::core::concat!(::core::module_path!(), "::", #name) },
                    name.to_token_stream(),
                    quote! { ::core::option::Option::Some(::core::module_path!()) },
                )
            }
        }
    }
}
