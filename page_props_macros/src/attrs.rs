//! Shared handling of `#[data_provider(...)]` attributes.
//!
//! Struct, field and method attributes all use the same helper name, so the
//! iteration and literal parsing live here.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Lit, LitStr, Token};

/// Helper attribute recognised by both macros.
pub(crate) const ATTRIBUTE: &str = "data_provider";

/// Iterate all `#[data_provider(...)]` attributes once and apply a callback.
pub(crate) fn parse_data_provider<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Returns the key of `meta` as a string, if it is a bare identifier.
///
/// `crate` is a keyword, so it is matched on the path rather than through
/// `get_ident`.
pub(crate) fn key(meta: &ParseNestedMeta) -> Option<String> {
    if meta.path.is_ident("crate") {
        return Some(String::from("crate"));
    }
    meta.path.get_ident().map(ToString::to_string)
}

/// Parses a flag, accepting both `key` and `key = true`.
pub(crate) fn flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<syn::LitBool>()?.value)
    } else {
        Ok(true)
    }
}

/// Parses a string literal value for `key`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}

/// Parses a string literal holding a Rust path, such as a crate alias.
pub(crate) fn lit_path(meta: &ParseNestedMeta, key: &str) -> syn::Result<syn::Path> {
    let s = lit_str(meta, key)?;
    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))
}

/// Rejects a key the current position does not understand.
pub(crate) fn unknown(meta: &ParseNestedMeta, position: &str) -> syn::Error {
    let name = key(meta).unwrap_or_else(|| String::from("<path>"));
    meta.error(format!(
        "unknown {position} attribute `{name}` in #[{ATTRIBUTE}(...)]"
    ))
}

/// Parses `#[data_provider(skip)]` on a field or method.
///
/// `allow_inherit` enables the field-only `inherit` key; the returned tuple
/// is `(skip, inherit)`.
pub(crate) fn parse_member_attrs(
    attrs: &[Attribute],
    allow_inherit: bool,
) -> syn::Result<(bool, bool)> {
    let mut skip = false;
    let mut inherit = false;
    let position = if allow_inherit { "field" } else { "method" };
    parse_data_provider(attrs, |meta| match key(meta).as_deref() {
        Some("skip") => {
            skip = flag(meta)?;
            Ok(())
        }
        Some("inherit") if allow_inherit => {
            inherit = flag(meta)?;
            Ok(())
        }
        _ => Err(unknown(meta, position)),
    })?;
    Ok((skip, inherit))
}
