use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, Path, ReturnType, Type};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Parsing

/// Arguments of `#[reflect_methods(...)]`.
#[derive(Default)]
pub(crate) struct MethodsArgs {
    pub crate_path: Option<Path>,
}

impl MethodsArgs {
    pub(crate) fn parse_meta(&mut self, meta: syn::meta::ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("crate_path") {
            let lit: LitStr = meta.value()?.parse()?;
            self.crate_path = Some(lit.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported argument, expected `crate_path`"))
        }
    }
}

#[derive(Clone, Copy)]
enum ReceiverKind {
    Static,
    Ref,
    Mut,
}

struct ReflectedMethod {
    name: LitStr,
    ident: syn::Ident,
    receiver: ReceiverKind,
    params: Vec<Type>,
    fallible: bool,
}

/// Reads and strips the `#[reflect(...)]` attributes of a method.
///
/// Returns `None` for `#[reflect(skip)]`.
fn take_method_attrs(method: &mut ImplItemFn) -> syn::Result<Option<LitStr>> {
    let mut name = LitStr::new(&method.sig.ident.to_string(), method.sig.ident.span());
    let mut skip = false;

    for attr in &method.attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = meta.value()?.parse()?;
                Ok(())
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported method attribute, expected `name` or `skip`"))
            }
        })?;
    }
    method
        .attrs
        .retain(|attr| !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME));

    if name.value().is_empty() || name.value().contains(['.', '(', ')', ',']) {
        return Err(syn::Error::new(
            name.span(),
            "a reflected method name cannot be empty or contain `.`, `(`, `)` or `,`",
        ));
    }
    Ok((!skip).then_some(name))
}

/// Returns `true` if the type is spelled `Result<..>`.
fn is_result(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Result"),
        _ => false,
    }
}

fn reject_borrowed(ty: &Type, what: &str) -> syn::Result<()> {
    match ty {
        Type::Reference(_) | Type::ImplTrait(_) | Type::TraitObject(_) | Type::Infer(_) => Err(
            syn::Error::new(ty.span(), format!("reflected {what} must be an owned, named type")),
        ),
        _ => Ok(()),
    }
}

fn parse_method(method: &ImplItemFn, name: LitStr) -> syn::Result<ReflectedMethod> {
    let sig = &method.sig;
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new(
            sig.generics.span(),
            "generic methods cannot be reflected, mark them `#[reflect(skip)]`",
        ));
    }
    if let Some(token) = &sig.asyncness {
        return Err(syn::Error::new(token.span(), "async methods cannot be reflected"));
    }
    if let Some(token) = &sig.unsafety {
        return Err(syn::Error::new(token.span(), "unsafe methods cannot be reflected"));
    }

    let mut receiver = ReceiverKind::Static;
    let mut params = Vec::new();
    for input in &sig.inputs {
        match input {
            FnArg::Receiver(recv) => {
                if recv.reference.is_none() || recv.colon_token.is_some() {
                    return Err(syn::Error::new(
                        recv.span(),
                        "reflected methods take `&self`, `&mut self` or no receiver",
                    ));
                }
                receiver = match recv.mutability {
                    Some(_) => ReceiverKind::Mut,
                    None => ReceiverKind::Ref,
                };
            }
            FnArg::Typed(pat_type) => {
                reject_borrowed(&pat_type.ty, "parameters")?;
                params.push((*pat_type.ty).clone());
            }
        }
    }

    let fallible = match &sig.output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => {
            reject_borrowed(ty, "return values")?;
            is_result(ty)
        }
    };

    Ok(ReflectedMethod {
        name,
        ident: sig.ident.clone(),
        receiver,
        params,
        fallible,
    })
}

// -----------------------------------------------------------------------------
// Code generation

fn method_info_tokens(p: &Path, method: &ReflectedMethod) -> TokenStream {
    let reflect_ = crate::path::reflect_(p);
    let macro_exports_ = crate::path::macro_exports_(p);
    let ReflectedMethod {
        name,
        ident,
        receiver,
        params,
        fallible,
    } = method;

    let param_len = params.len();
    let arg_idents: Vec<_> = (0..param_len).map(|i| format_ident!("__arg{}", i)).collect();

    let bind_args = if param_len == 0 {
        quote! { let _ = #p::ops::Args::new(#name, args, 0)?; }
    } else {
        quote! {
            let mut __args = #p::ops::Args::new(#name, args, #param_len)?;
            #(let #arg_idents = __args.take::<#params>()?;)*
        }
    };

    let (receiver_kind, bind_receiver, call) = match receiver {
        ReceiverKind::Static => (
            quote! { Static },
            quote! { let _ = receiver; },
            quote! { Self::#ident(#(#arg_idents),*) },
        ),
        ReceiverKind::Ref => (
            quote! { Ref },
            quote! { let this = #p::ops::receiver_ref::<Self>(receiver, #name)?; },
            quote! { Self::#ident(this, #(#arg_idents),*) },
        ),
        ReceiverKind::Mut => (
            quote! { Mut },
            quote! { let this = #p::ops::receiver_mut::<Self>(receiver, #name)?; },
            quote! { Self::#ident(this, #(#arg_idents),*) },
        ),
    };

    let finish = if *fallible {
        quote! {
            match #call {
                ::core::result::Result::Ok(value) => {
                    let value: #macro_exports_::Box<dyn #reflect_> = #macro_exports_::Box::new(value);
                    ::core::result::Result::Ok(value)
                }
                ::core::result::Result::Err(error) => {
                    ::core::result::Result::Err(#p::ops::InvokeError::raised(error))
                }
            }
        }
    } else {
        quote! {
            let value: #macro_exports_::Box<dyn #reflect_> = #macro_exports_::Box::new(#call);
            ::core::result::Result::Ok(value)
        }
    };

    quote! {
        #p::info::MethodInfo::new(
            #name,
            #p::info::Receiver::#receiver_kind,
            #macro_exports_::vec![#(#p::info::ParamInfo::new::<#params>()),*],
            |receiver, args| {
                #bind_args
                #bind_receiver
                #finish
            },
        )
    }
}

/// Expand `#[reflect_methods]` on an inherent impl block.
pub(crate) fn impl_reflect_methods(args: MethodsArgs, mut item: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new(
            path.span(),
            "#[reflect_methods] only applies to inherent impl blocks",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new(
            item.generics.span(),
            "#[reflect_methods] does not support generic impl blocks",
        ));
    }

    let p = args.crate_path.unwrap_or_else(crate::path::rp_reflect);

    let mut methods = Vec::new();
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        if let Some(name) = take_method_attrs(method)? {
            methods.push(parse_method(method, name)?);
        }
    }

    let self_ty = &item.self_ty;
    let macro_exports_ = crate::path::macro_exports_(&p);
    let infos = methods.iter().map(|method| method_info_tokens(&p, method));

    Ok(quote! {
        #item

        const _: () = {
            impl #p::info::ReflectMethods for #self_ty {
                fn reflect_methods() -> #macro_exports_::Vec<#p::info::MethodInfo> {
                    #macro_exports_::vec![#(#infos),*]
                }
            }
        };
    })
}
