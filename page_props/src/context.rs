//! Per-call composition context.

use std::fmt;
use std::sync::Arc;

use crate::ComposeResult;
use crate::config::{ComposeConfig, DEFAULT_MAX_NESTING_DEPTH};
use crate::container::{Container, ServiceContainer};
use crate::format::{FormatterRegistry, KeyCase, NameFormatter};

/// Everything a composition pass needs besides the providers themselves.
///
/// The formatter is resolved once when the context is built and applied to
/// every reflected key of the pass. Contexts are cheap to clone.
///
/// ```rust
/// use page_props::ComposeContext;
/// use page_props::format::{KeyCase, NameFormatter};
///
/// let context = ComposeContext::new().with_formatter(KeyCase::SnakeCase);
/// assert_eq!(context.format_key("fullName"), "full_name");
/// ```
#[derive(Clone)]
pub struct ComposeContext {
    formatter: Arc<dyn NameFormatter>,
    container: Arc<dyn Container>,
    max_depth: usize,
}

impl ComposeContext {
    /// Context using [`KeyCase::AsWritten`] and an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatter: Arc::new(KeyCase::AsWritten),
            container: Arc::new(ServiceContainer::new()),
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Build a context from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::UnknownFormatter`] when the configured
    /// formatter name is not known to `registry`.
    pub fn from_config(config: &ComposeConfig, registry: &FormatterRegistry) -> ComposeResult<Self> {
        let formatter = registry.resolve(&config.attribute_name_formatter)?;
        Ok(Self::new()
            .with_shared_formatter(formatter)
            .with_max_depth(config.max_nesting_depth))
    }

    /// Replace the name formatter.
    #[must_use]
    pub fn with_formatter<F>(self, formatter: F) -> Self
    where
        F: NameFormatter + 'static,
    {
        self.with_shared_formatter(Arc::new(formatter))
    }

    /// Replace the name formatter with a shared strategy.
    #[must_use]
    pub fn with_shared_formatter(mut self, formatter: Arc<dyn NameFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replace the container used for method parameter injection.
    #[must_use]
    pub fn with_container<C>(self, container: C) -> Self
    where
        C: Container + 'static,
    {
        self.with_shared_container(Arc::new(container))
    }

    /// Replace the container with a shared one.
    #[must_use]
    pub fn with_shared_container(mut self, container: Arc<dyn Container>) -> Self {
        self.container = container;
        self
    }

    /// Limit nested provider depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Active name formatter.
    #[must_use]
    pub fn formatter(&self) -> &dyn NameFormatter {
        self.formatter.as_ref()
    }

    /// Container used for method parameter injection.
    #[must_use]
    pub fn container(&self) -> &dyn Container {
        self.container.as_ref()
    }

    /// Maximum nested provider depth.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Format a reflected member name with the active formatter.
    #[must_use]
    pub fn format_key(&self, raw: &str) -> String {
        self.formatter.format(raw)
    }
}

impl Default for ComposeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComposeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeContext")
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
