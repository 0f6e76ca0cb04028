//! Constructors and conversions for `ComposeError`.

use std::error::Error as StdError;

use figment::Error as FigmentError;

use super::ComposeError;

impl ComposeError {
    /// Wrap an error returned by an exposed method.
    ///
    /// Errors that already are a [`ComposeError`] (for example a nested
    /// provider failing inside the method) are returned unchanged so callers
    /// observe the original failure.
    pub fn invocation<E>(provider: &str, member: &str, source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        match source.into().downcast::<Self>() {
            Ok(inner) => *inner,
            Err(source) => Self::Invocation {
                provider: provider.to_owned(),
                member: member.to_owned(),
                source,
            },
        }
    }

    /// Construct an [`ComposeError::Unresolvable`] for `T`.
    #[must_use]
    pub fn unresolvable<T: ?Sized>() -> Self {
        Self::Unresolvable {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Build a [`ComposeError::CyclicReference`] from the provider chain.
    pub fn cyclic<I, S>(chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cycle = chain
            .into_iter()
            .map(|name| name.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::CyclicReference { cycle }
    }

    /// Returns `true` when the error stems from a cyclic provider graph.
    #[must_use]
    pub const fn is_cyclic(&self) -> bool {
        matches!(self, Self::CyclicReference { .. })
    }
}

impl From<FigmentError> for ComposeError {
    fn from(e: FigmentError) -> Self {
        Self::Config(Box::new(e))
    }
}
