//! Opaque wrappers for values evaluated by the rendering layer.

use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

type Callback = Arc<dyn Fn() -> serde_json::Value + Send + Sync>;

/// Rendering-layer vocabulary for deferred evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredKind {
    /// Evaluated only when explicitly requested by a partial reload.
    Lazy,
    /// Alias of [`DeferredKind::Lazy`] used by newer rendering layers.
    Optional,
    /// Evaluated in a follow-up request after the initial render.
    Deferred,
    /// Evaluated on every render, including partial reloads.
    Always,
    /// Evaluated once and remembered by the client.
    Once,
}

impl DeferredKind {
    /// Lower-case tag used in the JSON stand-in.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lazy => "lazy",
            Self::Optional => "optional",
            Self::Deferred => "deferred",
            Self::Always => "always",
            Self::Once => "once",
        }
    }
}

impl fmt::Display for DeferredKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value whose evaluation is owned by the rendering layer.
///
/// The composer stores these untouched; nothing in this crate calls
/// [`DeferredProp::evaluate`].
#[derive(Clone)]
pub struct DeferredProp {
    kind: DeferredKind,
    group: Option<String>,
    callback: Callback,
}

impl DeferredProp {
    /// Wrap `callback` with the given evaluation `kind`.
    pub fn new<F>(kind: DeferredKind, callback: F) -> Self
    where
        F: Fn() -> serde_json::Value + Send + Sync + 'static,
    {
        Self {
            kind,
            group: None,
            callback: Arc::new(callback),
        }
    }

    /// Shorthand for [`DeferredKind::Lazy`].
    pub fn lazy<F>(callback: F) -> Self
    where
        F: Fn() -> serde_json::Value + Send + Sync + 'static,
    {
        Self::new(DeferredKind::Lazy, callback)
    }

    /// Shorthand for [`DeferredKind::Optional`].
    pub fn optional<F>(callback: F) -> Self
    where
        F: Fn() -> serde_json::Value + Send + Sync + 'static,
    {
        Self::new(DeferredKind::Optional, callback)
    }

    /// Shorthand for [`DeferredKind::Deferred`].
    pub fn deferred<F>(callback: F) -> Self
    where
        F: Fn() -> serde_json::Value + Send + Sync + 'static,
    {
        Self::new(DeferredKind::Deferred, callback)
    }

    /// Shorthand for [`DeferredKind::Always`].
    pub fn always<F>(callback: F) -> Self
    where
        F: Fn() -> serde_json::Value + Send + Sync + 'static,
    {
        Self::new(DeferredKind::Always, callback)
    }

    /// Shorthand for [`DeferredKind::Once`].
    pub fn once<F>(callback: F) -> Self
    where
        F: Fn() -> serde_json::Value + Send + Sync + 'static,
    {
        Self::new(DeferredKind::Once, callback)
    }

    /// Assign the fetch group used by deferred reloads.
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Evaluation kind.
    #[must_use]
    pub const fn kind(&self) -> DeferredKind {
        self.kind
    }

    /// Fetch group, if any.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Run the wrapped callback. Intended for rendering layers only.
    #[must_use]
    pub fn evaluate(&self) -> serde_json::Value {
        (self.callback)()
    }

    /// Returns `true` when both handles share the same callback.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.kind == other.kind && Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for DeferredProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredProp")
            .field("kind", &self.kind)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

impl Serialize for DeferredProp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.group.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("$deferred", self.kind.as_str())?;
        if let Some(group) = &self.group {
            map.serialize_entry("group", group)?;
        }
        map.end()
    }
}
