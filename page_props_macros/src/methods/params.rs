//! Container-injected method parameters.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, GenericArgument, PathArguments, Signature, Type};

/// How a resolved `Arc<T>` is passed to the method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PassAs {
    /// `&T`: borrowed from the resolved handle.
    Borrowed,
    /// `Arc<T>`: the handle itself.
    Shared,
    /// `T`: cloned out of the handle.
    Owned,
}

/// A parameter resolved from the container by type.
pub(crate) struct InjectedParam {
    pub ty: Type,
    pub pass: PassAs,
}

impl InjectedParam {
    fn arg_ident(index: usize) -> syn::Ident {
        format_ident!("__page_props_arg{}", index)
    }

    /// `let` statement resolving the parameter's service.
    pub(crate) fn binding(&self, index: usize, krate: &TokenStream) -> TokenStream {
        let arg = Self::arg_ident(index);
        let ty = &self.ty;
        quote! {
            let #arg = #krate::container::ContainerExt::resolve::<#ty>(container)?;
        }
    }

    /// Expression passed at the parameter's position.
    pub(crate) fn argument(&self, index: usize) -> TokenStream {
        let arg = Self::arg_ident(index);
        match self.pass {
            PassAs::Borrowed => quote! { &*#arg },
            PassAs::Shared => quote! { #arg },
            PassAs::Owned => quote! { ::core::clone::Clone::clone(&*#arg) },
        }
    }
}

fn arc_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn classify(ty: &Type) -> syn::Result<InjectedParam> {
    match ty {
        Type::Reference(reference) if reference.mutability.is_some() => Err(syn::Error::new_spanned(
            reference,
            "injected parameters cannot be mutable references",
        )),
        Type::Reference(reference) => Ok(InjectedParam {
            ty: (*reference.elem).clone(),
            pass: PassAs::Borrowed,
        }),
        Type::ImplTrait(_) => Err(syn::Error::new_spanned(
            ty,
            "injected parameters must name a concrete type",
        )),
        _ => Ok(arc_inner(ty).map_or_else(
            || InjectedParam {
                ty: ty.clone(),
                pass: PassAs::Owned,
            },
            |inner| InjectedParam {
                ty: inner.clone(),
                pass: PassAs::Shared,
            },
        )),
    }
}

/// Classify every non-receiver parameter of `sig`.
pub(crate) fn parse_params(sig: &Signature) -> syn::Result<Vec<InjectedParam>> {
    sig.inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(typed) => Some(classify(&typed.ty)),
            FnArg::Receiver(_) => None,
        })
        .collect()
}
