//! Values produced by resolving provider members.
//!
//! A [`PropValue`] distinguishes the values the composer may recurse into
//! (nested providers, maps and lists) from the ones it must pass through
//! untouched (concrete JSON values and [`DeferredProp`] wrappers owned by the
//! rendering layer).

mod convert;
mod deferred;
mod props;

use std::fmt;
use std::sync::Arc;

use serde::ser::{Error as _, Serialize, Serializer};

use crate::DataProvider;

pub use convert::IntoPropValue;
pub use deferred::{DeferredKind, DeferredProp};
pub use props::Props;

/// Shared handle to a provider nested inside another provider's payload.
pub type SharedProvider = Arc<dyn DataProvider>;

/// A resolved member value.
#[derive(Clone)]
pub enum PropValue {
    /// A plain JSON value.
    Concrete(serde_json::Value),
    /// A value whose evaluation belongs to the rendering layer.
    Deferred(DeferredProp),
    /// A nested provider, expanded only by nested composition.
    Provider(SharedProvider),
    /// A literal key/value map whose keys are never reformatted.
    Map(Props),
    /// A list of values.
    List(Vec<PropValue>),
}

impl PropValue {
    /// JSON `null`.
    #[must_use]
    pub const fn null() -> Self {
        Self::Concrete(serde_json::Value::Null)
    }

    /// Returns the concrete JSON value, if any.
    #[must_use]
    pub const fn as_concrete(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Concrete(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the deferred wrapper, if any.
    #[must_use]
    pub const fn as_deferred(&self) -> Option<&DeferredProp> {
        match self {
            Self::Deferred(deferred) => Some(deferred),
            _ => None,
        }
    }

    /// Returns the nested provider, if any.
    #[must_use]
    pub const fn as_provider(&self) -> Option<&SharedProvider> {
        match self {
            Self::Provider(provider) => Some(provider),
            _ => None,
        }
    }

    /// Returns the nested map, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Props> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl Default for PropValue {
    fn default() -> Self {
        Self::null()
    }
}

impl PartialEq for PropValue {
    /// Concrete values, maps and lists compare structurally. Providers and
    /// deferred wrappers compare by identity: two handles are equal only if
    /// they point at the same object.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Concrete(a), Self::Concrete(b)) => a == b,
            (Self::Deferred(a), Self::Deferred(b)) => a.same_as(b),
            (Self::Provider(a), Self::Provider(b)) => Arc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq<serde_json::Value> for PropValue {
    fn eq(&self, other: &serde_json::Value) -> bool {
        self.as_concrete() == Some(other)
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(value) => fmt::Debug::fmt(value, f),
            Self::Deferred(deferred) => fmt::Debug::fmt(deferred, f),
            Self::Provider(provider) => f
                .debug_tuple("Provider")
                .field(&provider.provider_name())
                .finish(),
            Self::Map(map) => fmt::Debug::fmt(map, f),
            Self::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Concrete(value) => value.serialize(serializer),
            Self::Deferred(deferred) => deferred.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
            Self::Provider(provider) => Err(S::Error::custom(format!(
                "data provider '{}' must be expanded with nested composition before serialisation",
                provider.provider_name()
            ))),
        }
    }
}
