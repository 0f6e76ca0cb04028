//! The `#[provider_methods]` attribute.
//!
//! Re-emits the annotated inherent impl unchanged apart from stripping
//! `#[data_provider(...)]` helpers, and adds a `ProviderMethods` impl that
//! registers every public `&self` method in declaration order.

mod params;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{ImplItem, ImplItemFn, ItemImpl, ReturnType, Type};

use crate::attrs::{ATTRIBUTE, key, lit_path, parse_member_attrs, unknown};
use crate::crate_path;
use params::{InjectedParam, parse_params};

/// Arguments accepted by `#[provider_methods(...)]`.
#[derive(Default)]
pub(crate) struct MethodsArgs {
    pub crate_path: Option<syn::Path>,
}

impl MethodsArgs {
    /// Parse the attribute arguments.
    pub(crate) fn parse(args: TokenStream) -> syn::Result<Self> {
        let mut out = Self::default();
        let parser = syn::meta::parser(|meta| match key(&meta).as_deref() {
            Some("crate") => {
                out.crate_path = Some(lit_path(&meta, "crate")?);
                Ok(())
            }
            _ => Err(unknown(&meta, "impl")),
        });
        syn::parse::Parser::parse2(parser, args)?;
        Ok(out)
    }
}

/// How an exposed method's return value becomes a prop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReturnShape {
    /// `()`: resolves to `null`.
    Unit,
    /// `Result<T, E>`: errors are propagated.
    Fallible,
    /// Anything else convertible into a prop value.
    Value,
}

/// A method selected for exposure.
pub(crate) struct ExposedMethod {
    pub ident: syn::Ident,
    pub params: Vec<InjectedParam>,
    pub returns: ReturnShape,
}

impl ExposedMethod {
    pub(crate) fn member_name(&self) -> String {
        self.ident.unraw().to_string()
    }
}

fn return_shape(output: &ReturnType) -> ReturnShape {
    let ty = match output {
        ReturnType::Default => return ReturnShape::Unit,
        ReturnType::Type(_, ty) => ty.as_ref(),
    };
    match ty {
        Type::Tuple(tuple) if tuple.elems.is_empty() => ReturnShape::Unit,
        Type::Path(path)
            if path.qself.is_none()
                && path
                    .path
                    .segments
                    .last()
                    .is_some_and(|segment| segment.ident == "Result" || segment.ident == "ComposeResult") =>
        {
            ReturnShape::Fallible
        }
        _ => ReturnShape::Value,
    }
}

/// Decide whether `method` is exposed, rejecting exposed methods the
/// resolver could not call.
fn select(method: &ImplItemFn) -> syn::Result<Option<ExposedMethod>> {
    let (skip, _) = parse_member_attrs(&method.attrs, false)?;
    if skip || !matches!(method.vis, syn::Visibility::Public(_)) {
        return Ok(None);
    }
    let sig = &method.sig;
    let Some(receiver) = sig.receiver() else {
        return Ok(None);
    };
    if receiver.reference.is_none() || receiver.mutability.is_some() {
        return Err(syn::Error::new_spanned(
            receiver,
            "exposed provider methods must take `&self`; add #[data_provider(skip)] to hide this method",
        ));
    }
    if let Some(asyncness) = sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "exposed provider methods cannot be async",
        ));
    }
    if sig
        .generics
        .params
        .iter()
        .any(|param| !matches!(param, syn::GenericParam::Lifetime(_)))
    {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "exposed provider methods cannot have type or const parameters",
        ));
    }
    Ok(Some(ExposedMethod {
        ident: sig.ident.clone(),
        params: parse_params(sig)?,
        returns: return_shape(&sig.output),
    }))
}

fn strip_helper_attrs(item: &mut ImplItem) {
    if let ImplItem::Fn(method) = item {
        method.attrs.retain(|attr| !attr.path().is_ident(ATTRIBUTE));
    }
}

/// Collect the exposed methods of `item` in declaration order.
pub(crate) fn exposed_methods(item: &ItemImpl) -> syn::Result<Vec<ExposedMethod>> {
    let mut exposed = Vec::new();
    for impl_item in &item.items {
        if let ImplItem::Fn(method) = impl_item
            && let Some(selected) = select(method)?
        {
            exposed.push(selected);
        }
    }
    Ok(exposed)
}

fn invoker(self_ty: &Type, method: &ExposedMethod, krate: &TokenStream) -> (syn::Ident, TokenStream) {
    let invoker = format_ident!("__page_props_method_{}", method.member_name());
    let ident = &method.ident;
    let member = method.member_name();
    let bindings = method
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| param.binding(index, krate));
    let arguments = method
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| param.argument(index));
    let container = if method.params.is_empty() {
        format_ident!("_container")
    } else {
        format_ident!("container")
    };
    let call = quote! { <#self_ty>::#ident(provider #(, #arguments)*) };
    let body = match method.returns {
        ReturnShape::Unit => quote! {
            #call;
            ::core::result::Result::Ok(#krate::PropValue::null())
        },
        ReturnShape::Fallible => quote! {
            match #call {
                ::core::result::Result::Ok(value) => {
                    ::core::result::Result::Ok(#krate::IntoPropValue::into_prop_value(value))
                }
                ::core::result::Result::Err(err) => ::core::result::Result::Err(
                    #krate::ComposeError::invocation(
                        #krate::DataProvider::provider_name(provider),
                        #member,
                        err,
                    ),
                ),
            }
        },
        ReturnShape::Value => quote! {
            ::core::result::Result::Ok(#krate::IntoPropValue::into_prop_value(#call))
        },
    };
    let tokens = quote! {
        fn #invoker(
            provider: &#self_ty,
            #container: &dyn #krate::container::Container,
        ) -> #krate::ComposeResult<#krate::PropValue> {
            #( #bindings )*
            #body
        }
    };
    (invoker, tokens)
}

/// Expand `#[provider_methods]` on `item`.
pub(crate) fn expand(args: &MethodsArgs, mut item: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[provider_methods] applies to inherent impl blocks only",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[provider_methods] cannot be used on generic impl blocks",
        ));
    }
    let exposed = exposed_methods(&item)?;
    item.items.iter_mut().for_each(strip_helper_attrs);

    let krate = crate_path::resolve(args.crate_path.as_ref());
    let self_ty = item.self_ty.as_ref();
    let (invokers, definitions): (Vec<_>, Vec<_>) = exposed
        .iter()
        .map(|method| invoker(self_ty, method, &krate))
        .unzip();
    let names = exposed.iter().map(ExposedMethod::member_name);
    let builder = if exposed.is_empty() {
        format_ident!("_builder")
    } else {
        format_ident!("builder")
    };

    Ok(quote! {
        #item

        #[automatically_derived]
        impl #krate::members::ProviderMethods for #self_ty {
            fn register_methods(#builder: &mut #krate::members::MemberSetBuilder<Self>) {
                #( #definitions )*
                #( #builder.method(#names, #invokers); )*
            }
        }
    })
}
