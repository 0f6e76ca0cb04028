//! The `DataProvider` derive.
//!
//! Public fields become properties in declaration order, fields marked
//! `inherit` splice their own provider's members in at their position, and
//! `methods` appends whatever `#[provider_methods]` registered. The member
//! set is built once per type and cached in a static.

mod generate;
mod parse;
#[cfg(test)]
mod tests;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Expand `#[derive(DataProvider)]` for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    Ok(generate::provider_impl(&parsed))
}
