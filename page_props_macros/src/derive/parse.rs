//! Input parsing for the `DataProvider` derive.

use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields};

use crate::attrs::{flag, key, lit_path, lit_str, parse_data_provider, parse_member_attrs, unknown};

/// Struct-level `#[data_provider(...)]` settings.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Pull in members registered by `#[provider_methods]`.
    pub methods: bool,
    /// Method supplying the static data map.
    pub static_data: Option<syn::Ident>,
    /// Provider name used in logs and errors.
    pub name: Option<String>,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// How a field takes part in the member set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldRole {
    /// Exposed as a property.
    Property,
    /// Its provider's members are inlined.
    Inherit,
    /// Not exposed.
    Hidden,
}

/// A named field and its role.
pub(crate) struct ProviderField {
    pub ident: syn::Ident,
    pub role: FieldRole,
}

impl ProviderField {
    /// Member name as written, without any raw identifier prefix.
    pub(crate) fn member_name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

/// Everything the generator needs from the derive input.
pub(crate) struct ProviderInput {
    pub ident: syn::Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<ProviderField>,
}

pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_data_provider(attrs, |meta| match key(meta).as_deref() {
        Some("methods") => {
            out.methods = flag(meta)?;
            Ok(())
        }
        Some("static_data") => {
            let s = lit_str(meta, "static_data")?;
            out.static_data = Some(s.parse()?);
            Ok(())
        }
        Some("name") => {
            out.name = Some(lit_str(meta, "name")?.value());
            Ok(())
        }
        Some("crate") => {
            out.crate_path = Some(lit_path(meta, "crate")?);
            Ok(())
        }
        _ => Err(unknown(meta, "struct")),
    })?;
    Ok(out)
}

fn field_role(field: &syn::Field) -> syn::Result<FieldRole> {
    let (skip, inherit) = parse_member_attrs(&field.attrs, true)?;
    if skip && inherit {
        return Err(syn::Error::new_spanned(
            field,
            "a field cannot be both `skip` and `inherit`",
        ));
    }
    if inherit {
        return Ok(FieldRole::Inherit);
    }
    if skip || !matches!(field.vis, syn::Visibility::Public(_)) {
        return Ok(FieldRole::Hidden);
    }
    Ok(FieldRole::Property)
}

/// Gathers the struct identifier, attributes and field roles in one pass so
/// expansion can fail fast with useful errors.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ProviderInput> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "DataProvider cannot be derived for generic structs; implement it with `MemberSet::builder`",
        ));
    }
    let attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(|field| {
                    Ok(ProviderField {
                        ident: field
                            .ident
                            .clone()
                            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?,
                        role: field_role(field)?,
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "DataProvider requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "DataProvider can only be derived for structs",
            ));
        }
    };
    Ok(ProviderInput {
        ident: input.ident.clone(),
        attrs,
        fields,
    })
}
