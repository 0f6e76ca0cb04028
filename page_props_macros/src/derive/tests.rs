//! Unit tests for derive parsing and generation.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::expand;
use super::parse::{FieldRole, parse_input, parse_struct_attrs};

fn roles(input: &DeriveInput) -> Result<Vec<(String, FieldRole)>> {
    let parsed = parse_input(input).map_err(|e| anyhow!(e.to_string()))?;
    Ok(parsed
        .fields
        .iter()
        .map(|field| (field.member_name(), field.role))
        .collect())
}

#[rstest]
fn only_public_fields_are_properties() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Header {
            pub title: String,
            pub(crate) internal: u8,
            secret: String,
            #[data_provider(skip)]
            pub hidden: bool,
            #[data_provider(inherit)]
            base: Base,
        }
    };
    let roles = roles(&input)?;
    ensure!(
        roles
            == [
                (String::from("title"), FieldRole::Property),
                (String::from("internal"), FieldRole::Hidden),
                (String::from("secret"), FieldRole::Hidden),
                (String::from("hidden"), FieldRole::Hidden),
                (String::from("base"), FieldRole::Inherit),
            ],
        "unexpected roles: {roles:?}"
    );
    Ok(())
}

#[rstest]
fn raw_identifiers_lose_their_prefix() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Item {
            pub r#type: String,
        }
    };
    let roles = roles(&input)?;
    ensure!(roles == [(String::from("type"), FieldRole::Property)]);
    Ok(())
}

#[rstest]
fn struct_attributes_parse() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[data_provider(methods, static_data = "extra", name = "Header", crate = "alias")]
        struct Header;
    };
    let attrs = parse_struct_attrs(&input.attrs).map_err(|e| anyhow!(e.to_string()))?;
    ensure!(attrs.methods);
    ensure!(attrs.static_data.is_some_and(|ident| ident == "extra"));
    ensure!(attrs.name.as_deref() == Some("Header"));
    ensure!(attrs.crate_path.is_some_and(|path| path.is_ident("alias")));
    Ok(())
}

#[rstest]
#[case::tuple(parse_quote! { struct Pair(pub u8, pub u8); }, "requires named fields")]
#[case::enumeration(parse_quote! { enum Choice { A } }, "only be derived for structs")]
#[case::generic(parse_quote! { struct Wrapper<T> { pub inner: T } }, "generic structs")]
#[case::unknown_key(
    parse_quote! { #[data_provider(flatten)] struct Header; },
    "unknown struct attribute `flatten`"
)]
#[case::skip_and_inherit(
    parse_quote! { struct Header { #[data_provider(skip, inherit)] base: Base } },
    "both `skip` and `inherit`"
)]
fn invalid_input_is_rejected(#[case] input: DeriveInput, #[case] message: &str) {
    let err = expand(&input).expect_err("invalid derive input");
    assert!(
        err.to_string().contains(message),
        "unexpected error: {err}"
    );
}

#[rstest]
fn generated_impl_registers_members_in_order() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[data_provider(methods, static_data = "extra")]
        struct Header {
            pub title: String,
            #[data_provider(inherit)]
            base: Base,
        }
    };
    let tokens = expand(&input)
        .map_err(|e| anyhow!(e.to_string()))?
        .to_string();
    let property = tokens
        .find("builder . property (\"title\"")
        .ok_or_else(|| anyhow!("property registration missing"))?;
    let inherit = tokens
        .find("builder . inherit (__page_props_inherit_base)")
        .ok_or_else(|| anyhow!("inherit registration missing"))?;
    let methods = tokens
        .find("ProviderMethods > :: register_methods")
        .ok_or_else(|| anyhow!("method registration missing"))?;
    ensure!(property < inherit && inherit < methods);
    ensure!(tokens.contains("Self :: extra (self)"));
    ensure!(tokens.contains(":: page_props :: DataProvider :: static_data (& self . base)"));
    Ok(())
}

#[rstest]
fn providers_without_static_data_keep_the_default() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Plain {
            pub title: String,
        }
    };
    let tokens = expand(&input)
        .map_err(|e| anyhow!(e.to_string()))?
        .to_string();
    ensure!(!tokens.contains("fn static_data"));
    ensure!(tokens.contains("\"Plain\""));
    Ok(())
}
