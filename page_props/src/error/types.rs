//! Primary error enum for composition flows.

use figment::Error as FigmentError;
use thiserror::Error;

/// Result alias used throughout the composition engine.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors that can occur while composing page props.
///
/// Key collisions are never reported here: static data silently overrides
/// reflected members and later collection entries silently override earlier
/// ones.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// An exposed method returned an error while being invoked.
    #[error("failed to resolve '{member}' on data provider '{provider}': {source}")]
    Invocation {
        /// Name of the provider that owns the member.
        provider: String,
        /// Raw (unformatted) member name.
        member: String,
        /// Error returned by the method.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A method parameter could not be satisfied by the container.
    #[error("no container binding for parameter type '{type_name}'")]
    Unresolvable {
        /// Fully qualified name of the requested type.
        type_name: &'static str,
    },

    /// A nested provider graph refers back to a provider that is still
    /// being expanded.
    #[error("cyclic data provider reference detected: {cycle}")]
    CyclicReference {
        /// Chain of providers participating in the cycle.
        cycle: String,
    },

    /// Nested providers exceeded the configured depth.
    #[error("data provider nesting exceeds {limit} levels at '{provider}'")]
    NestingTooDeep {
        /// Provider that would have opened the next level.
        provider: String,
        /// Configured maximum depth.
        limit: usize,
    },

    /// The configured attribute name formatter is not known.
    #[error("unknown attribute name formatter '{name}'")]
    UnknownFormatter {
        /// Name requested by configuration.
        name: String,
    },

    /// Failure loading composition settings.
    #[error("failed to load composition settings: {0}")]
    Config(#[from] Box<FigmentError>),

    /// Failure converting composed props into JSON.
    #[error("failed to serialise composed props: {0}")]
    Serialize(#[from] serde_json::Error),
}
