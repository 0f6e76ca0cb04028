//! Token generation for the `DataProvider` derive.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{FieldRole, ProviderInput};
use crate::crate_path;

/// Emit the `DataProvider` implementation for `input`.
pub(crate) fn provider_impl(input: &ProviderInput) -> TokenStream {
    let ident = &input.ident;
    let krate = crate_path::resolve(input.attrs.crate_path.as_ref());
    let name = input
        .attrs
        .name
        .clone()
        .unwrap_or_else(|| ident.to_string());

    let mut accessors = Vec::new();
    let mut registrations = Vec::new();
    for field in &input.fields {
        let field_ident = &field.ident;
        match field.role {
            FieldRole::Property => {
                let accessor = format_ident!("__page_props_field_{}", field.member_name());
                let member = field.member_name();
                accessors.push(quote! {
                    fn #accessor(provider: &#ident) -> #krate::PropValue {
                        #krate::IntoPropValue::into_prop_value(
                            ::core::clone::Clone::clone(&provider.#field_ident),
                        )
                    }
                });
                registrations.push(quote! { builder.property(#member, #accessor); });
            }
            FieldRole::Inherit => {
                let accessor = format_ident!("__page_props_inherit_{}", field.member_name());
                accessors.push(quote! {
                    fn #accessor(provider: &#ident) -> &dyn #krate::DataProvider {
                        &provider.#field_ident
                    }
                });
                registrations.push(quote! { builder.inherit(#accessor); });
            }
            FieldRole::Hidden => {}
        }
    }
    if input.attrs.methods {
        registrations.push(quote! {
            <#ident as #krate::members::ProviderMethods>::register_methods(&mut builder);
        });
    }

    let static_data = static_data_fn(input, &krate);
    let builder = if registrations.is_empty() {
        quote! { let builder = #krate::members::MemberSet::<#ident>::builder(); }
    } else {
        quote! { let mut builder = #krate::members::MemberSet::<#ident>::builder(); }
    };

    quote! {
        #[automatically_derived]
        impl #krate::DataProvider for #ident {
            fn provider_name(&self) -> &str {
                #name
            }

            fn resolve_members(
                &self,
                container: &dyn #krate::container::Container,
            ) -> #krate::ComposeResult<::std::vec::Vec<#krate::members::ResolvedMember>> {
                #( #accessors )*
                static MEMBERS: ::std::sync::OnceLock<#krate::members::MemberSet<#ident>> =
                    ::std::sync::OnceLock::new();
                let members = MEMBERS.get_or_init(|| {
                    #builder
                    #( #registrations )*
                    builder.build()
                });
                #krate::members::MemberResolver::new(container).resolve(self, members)
            }

            #static_data
        }
    }
}

/// Static data: inherited providers' maps first, then the struct's own.
fn static_data_fn(input: &ProviderInput, krate: &TokenStream) -> TokenStream {
    let inherited: Vec<_> = input
        .fields
        .iter()
        .filter(|field| field.role == FieldRole::Inherit)
        .map(|field| &field.ident)
        .collect();
    let own = input.attrs.static_data.as_ref();
    if inherited.is_empty() && own.is_none() {
        return TokenStream::new();
    }
    let own_merge = own.map(|method| quote! { data.merge(Self::#method(self)); });
    quote! {
        fn static_data(&self) -> #krate::Props {
            let mut data = #krate::Props::new();
            #( data.merge(#krate::DataProvider::static_data(&self.#inherited)); )*
            #own_merge
            data
        }
    }
}
