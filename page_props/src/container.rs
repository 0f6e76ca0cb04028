//! Dependency-injection boundary for exposed method parameters.
//!
//! The composer only ever asks a [`Container`] for an instance of a type;
//! how instances are built, scoped or shared is the container's business.
//! [`ServiceContainer`] is a small type-keyed implementation suitable for
//! applications without a container of their own.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{ComposeError, ComposeResult};

/// Type-erased instance handed out by a container.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Identifies a requested parameter type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Type identifier.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Resolves instances by type.
pub trait Container: Send + Sync {
    /// Return an instance for `key`, or `None` when the type is unbound.
    fn resolve_any(&self, key: TypeKey) -> Option<Instance>;
}

/// Typed helpers over any [`Container`].
pub trait ContainerExt {
    /// Resolve an instance of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Unresolvable`] when no binding exists or the
    /// bound instance has a different type. Resolution is never retried.
    fn resolve<T>(&self) -> ComposeResult<Arc<T>>
    where
        T: Any + Send + Sync;
}

impl<C: Container + ?Sized> ContainerExt for C {
    fn resolve<T>(&self) -> ComposeResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.resolve_any(TypeKey::of::<T>())
            .and_then(|instance| instance.downcast::<T>().ok())
            .ok_or_else(ComposeError::unresolvable::<T>)
    }
}

#[derive(Clone)]
enum Binding {
    Shared(Instance),
    Factory(Arc<dyn Fn() -> Instance + Send + Sync>),
}

/// Type-keyed container holding shared instances and factories.
///
/// ```rust
/// use page_props::container::{ContainerExt, ServiceContainer};
///
/// let mut container = ServiceContainer::new();
/// container.instance(String::from("tenant-a"));
/// let tenant = container.resolve::<String>()?;
/// assert_eq!(tenant.as_str(), "tenant-a");
/// # Ok::<_, page_props::ComposeError>(())
/// ```
#[derive(Clone, Default)]
pub struct ServiceContainer {
    bindings: HashMap<TypeId, (&'static str, Binding)>,
}

impl ServiceContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a shared instance of `T`.
    pub fn instance<T>(&mut self, value: T) -> &mut Self
    where
        T: Any + Send + Sync,
    {
        self.shared(Arc::new(value))
    }

    /// Bind an already shared instance of `T`.
    pub fn shared<T>(&mut self, value: Arc<T>) -> &mut Self
    where
        T: Any + Send + Sync,
    {
        self.bind(TypeKey::of::<T>(), Binding::Shared(value))
    }

    /// Bind a factory producing a fresh `T` on every resolution.
    pub fn factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory = Arc::new(move || Arc::new(factory()) as Instance);
        self.bind(TypeKey::of::<T>(), Binding::Factory(factory))
    }

    /// Returns `true` when `T` has a binding.
    #[must_use]
    pub fn contains<T: Any>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
    }

    fn bind(&mut self, key: TypeKey, binding: Binding) -> &mut Self {
        self.bindings.insert(key.id(), (key.name(), binding));
        self
    }
}

impl Container for ServiceContainer {
    fn resolve_any(&self, key: TypeKey) -> Option<Instance> {
        self.bindings
            .get(&key.id())
            .map(|(_, binding)| match binding {
                Binding::Shared(instance) => Arc::clone(instance),
                Binding::Factory(factory) => factory(),
            })
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.bindings.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("ServiceContainer")
            .field("bindings", &names)
            .finish()
    }
}
