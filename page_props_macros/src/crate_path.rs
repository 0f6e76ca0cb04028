//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `crate = "..."` attribute value into the tokens
//! that prefix every `page_props` path in generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed attribute.
///
/// Defaults to `::page_props` when no override is present. The leading `::`
/// keeps a local module named `page_props` at the call site from capturing
/// the generated paths.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::page_props }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default(None, ":: page_props")]
    #[case::custom(Some("my_alias"), "my_alias")]
    #[case::nested(Some("my_ns::page_props"), "my_ns :: page_props")]
    fn resolve_produces_expected_tokens(#[case] input: Option<&str>, #[case] expected: &str) {
        let parsed = input.map(|s| syn::parse_str::<syn::Path>(s).expect("valid path"));
        let tokens = resolve(parsed.as_ref());
        assert_eq!(tokens.to_string(), expected);
    }
}
