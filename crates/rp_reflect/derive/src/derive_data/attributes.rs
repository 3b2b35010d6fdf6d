use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Container attributes of `#[derive(Reflect)]`.
///
/// ```ignore
/// #[reflect(type_path = "app::Foo", methods, auto_register, clone, crate_path = "::refpath::reflect")]
/// ```
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// Custom full path, replacing `module_path!()::Ident`.
    pub type_path: Option<LitStr>,
    /// Pull the method table from a `#[reflect_methods]` impl block.
    pub methods: Option<Span>,
    /// Submit the class to `ClassRegistry::auto_register`.
    pub auto_register: Option<Span>,
    /// Implement `reflect_clone` with `Clone::clone`.
    pub clone: Option<Span>,
    /// Path of the `rp_reflect` crate.
    pub crate_path: Option<Path>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| result.parse_meta(meta))?;
            }
        }
        Ok(result)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("type_path") {
            let lit: LitStr = meta.value()?.parse()?;
            let value = lit.value();
            if value.is_empty() || value.starts_with("::") || value.ends_with("::") {
                return Err(meta.error("`type_path` must be a path like \"module::Name\""));
            }
            self.type_path = Some(lit);
        } else if meta.path.is_ident("methods") {
            self.methods = Some(meta.path.span());
        } else if meta.path.is_ident("auto_register") {
            self.auto_register = Some(meta.path.span());
        } else if meta.path.is_ident("clone") {
            self.clone = Some(meta.path.span());
        } else if meta.path.is_ident("crate_path") {
            let lit: LitStr = meta.value()?.parse()?;
            self.crate_path = Some(lit.parse()?);
        } else {
            return Err(meta.error(
                "unsupported reflect attribute, expected one of \
                 `type_path`, `methods`, `auto_register`, `clone`, `crate_path`",
            ));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field attributes of `#[derive(Reflect)]`.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// The field embeds the base class.
    pub extends: Option<Span>,
    /// The field is invisible to reflection.
    pub ignore: Option<Span>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("extends") {
                    result.extends = Some(meta.path.span());
                    Ok(())
                } else if meta.path.is_ident("ignore") {
                    result.ignore = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("unsupported field attribute, expected `extends` or `ignore`"))
                }
            })?;
        }
        if let (Some(_), Some(span)) = (result.extends, result.ignore) {
            return Err(syn::Error::new(span, "a base class field cannot be ignored"));
        }
        Ok(result)
    }
}
