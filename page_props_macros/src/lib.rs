//! Procedural macros for `page_props`.
//!
//! `#[derive(DataProvider)]` registers a struct's public fields as provider
//! members, and `#[provider_methods]` does the same for the public `&self`
//! methods of an inherent impl block. Both emit a static member table so
//! nothing is introspected at runtime.

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

mod attrs;
mod crate_path;
mod derive;
mod methods;

/// Derive macro for `page_props::DataProvider`.
///
/// Struct attributes: `methods`, `static_data = "fn_name"`,
/// `name = "..."` and `crate = "path"`. Field attributes: `skip` and
/// `inherit`.
#[proc_macro_derive(DataProvider, attributes(data_provider))]
pub fn derive_data_provider(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Registers the public `&self` methods of an inherent impl block as
/// provider members.
///
/// Pair with `#[data_provider(methods)]` on the derived struct. Methods can
/// be hidden with `#[data_provider(skip)]`; `#[provider_methods(crate =
/// "path")]` overrides the crate path.
#[proc_macro_attribute]
pub fn provider_methods(args: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemImpl);
    methods::MethodsArgs::parse(args.into())
        .and_then(|args| methods::expand(&args, item))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
