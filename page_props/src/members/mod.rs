//! Static member metadata for data providers.
//!
//! Provider types describe their exposed surface once, as an ordered
//! [`MemberSet`], instead of being introspected at runtime. The
//! `#[derive(DataProvider)]` and `#[provider_methods]` macros generate these
//! sets; hand-written providers use [`MemberSet::builder`] directly.
//!
//! ```rust
//! use page_props::container::Container;
//! use page_props::members::{MemberResolver, MemberSet};
//! use page_props::{ComposeResult, DataProvider, IntoPropValue, PropValue};
//! use std::sync::OnceLock;
//!
//! struct Greeting {
//!     name: String,
//! }
//!
//! impl DataProvider for Greeting {
//!     fn resolve_members(
//!         &self,
//!         container: &dyn Container,
//!     ) -> ComposeResult<Vec<page_props::members::ResolvedMember>> {
//!         static MEMBERS: OnceLock<MemberSet<Greeting>> = OnceLock::new();
//!         let members = MEMBERS.get_or_init(|| {
//!             let mut builder = MemberSet::builder();
//!             builder.property("name", |greeting: &Greeting| {
//!                 greeting.name.clone().into_prop_value()
//!             });
//!             builder.build()
//!         });
//!         MemberResolver::new(container).resolve(self, members)
//!     }
//! }
//! ```

mod resolver;

use std::borrow::Cow;
use std::fmt;

use crate::container::Container;
use crate::{ComposeResult, DataProvider, PropValue, Props};

pub use resolver::MemberResolver;

/// Reads a property from a provider.
pub type PropertyAccessor<T> = fn(&T) -> PropValue;

/// Invokes an exposed method, resolving its parameters from a container.
pub type MethodAccessor<T> = fn(&T, &dyn Container) -> ComposeResult<PropValue>;

/// Borrows an inherited provider whose members are inlined.
pub type InheritAccessor<T> = fn(&T) -> &dyn DataProvider;

/// How a member produces its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A public field, read directly.
    Property,
    /// A public `&self` method, invoked with injected parameters.
    Method,
    /// An author-supplied static data entry, keyed literally.
    StaticEntry,
}

/// A named, resolvable member of provider type `T`.
pub struct Member<T> {
    name: &'static str,
    access: Access<T>,
}

enum Access<T> {
    Property(PropertyAccessor<T>),
    Method(MethodAccessor<T>),
}

impl<T> Member<T> {
    /// Name as declared.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Member kind.
    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        match self.access {
            Access::Property(_) => MemberKind::Property,
            Access::Method(_) => MemberKind::Method,
        }
    }

    fn resolve(&self, provider: &T, container: &dyn Container) -> ComposeResult<PropValue> {
        match self.access {
            Access::Property(read) => Ok(read(provider)),
            Access::Method(invoke) => invoke(provider, container),
        }
    }
}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .finish()
    }
}

enum Descriptor<T> {
    Member(Member<T>),
    Inherit(InheritAccessor<T>),
}

/// Ordered descriptors for every member exposed by `T`.
///
/// Declaration order is preserved; it is the order keys appear in the
/// flattened payload.
pub struct MemberSet<T> {
    descriptors: Vec<Descriptor<T>>,
}

impl<T> MemberSet<T> {
    /// Start building a member set.
    #[must_use]
    pub const fn builder() -> MemberSetBuilder<T> {
        MemberSetBuilder {
            descriptors: Vec::new(),
        }
    }

    /// Directly declared members, excluding inherited ones.
    pub fn members(&self) -> impl Iterator<Item = &Member<T>> {
        self.descriptors.iter().filter_map(|descriptor| match descriptor {
            Descriptor::Member(member) => Some(member),
            Descriptor::Inherit(_) => None,
        })
    }

    /// Returns `true` when `name` is declared directly on `T`.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.members().any(|member| member.name == name)
    }

    /// Number of descriptors, counting each inherited provider once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` when `T` exposes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<T> fmt::Debug for MemberSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.members()).finish()
    }
}

/// Builder for [`MemberSet`].
pub struct MemberSetBuilder<T> {
    descriptors: Vec<Descriptor<T>>,
}

impl<T> MemberSetBuilder<T> {
    /// Register a property read directly from the provider.
    pub fn property(&mut self, name: &'static str, read: PropertyAccessor<T>) -> &mut Self {
        self.push(name, Access::Property(read))
    }

    /// Register a method invoked with container-resolved parameters.
    pub fn method(&mut self, name: &'static str, invoke: MethodAccessor<T>) -> &mut Self {
        self.push(name, Access::Method(invoke))
    }

    /// Inline the members of another provider at this position.
    pub fn inherit(&mut self, parent: InheritAccessor<T>) -> &mut Self {
        self.descriptors.push(Descriptor::Inherit(parent));
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> MemberSet<T> {
        MemberSet {
            descriptors: self.descriptors,
        }
    }

    fn push(&mut self, name: &'static str, access: Access<T>) -> &mut Self {
        self.descriptors
            .push(Descriptor::Member(Member { name, access }));
        self
    }
}

/// Implemented by `#[provider_methods]` for the methods of an impl block.
///
/// `#[derive(DataProvider)]` pulls these in when the struct carries
/// `#[data_provider(methods)]`.
pub trait ProviderMethods: Sized {
    /// Append the exposed methods to `builder` in declaration order.
    fn register_methods(builder: &mut MemberSetBuilder<Self>);
}

/// A member after resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMember {
    /// Raw member name, before formatting.
    pub name: Cow<'static, str>,
    /// How the value was produced.
    pub kind: MemberKind,
    /// The resolved value.
    pub value: PropValue,
}

impl ResolvedMember {
    /// Construct a resolved member.
    pub fn new(name: impl Into<Cow<'static, str>>, kind: MemberKind, value: PropValue) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
        }
    }

    /// Members for a provider's static data, in map order.
    pub fn static_entries(data: Props) -> impl Iterator<Item = Self> {
        data.into_iter()
            .map(|(key, value)| Self::new(key, MemberKind::StaticEntry, value))
    }
}

#[cfg(test)]
mod tests;
