//! The data provider contract and its flattening operations.
//!
//! A provider's payload is built in two steps: its reflected members are
//! resolved and their names formatted, then its static data is laid over
//! the result verbatim. Static data therefore always wins a key collision.

mod compose;

use std::any::type_name;
use std::fmt;

use crate::container::Container;
use crate::members::ResolvedMember;
use crate::{ComposeContext, ComposeResult, Props};

pub use compose::{ComposeMode, flat_map, nested_map};
pub(crate) use compose::Expander;

/// A unit exposing data for one section of a page payload.
///
/// Usually implemented with `#[derive(DataProvider)]`. Implementations must
/// not mutate the provider while resolving: the same instance may be
/// composed more than once, and every composition re-reads the live object.
pub trait DataProvider: Send + Sync {
    /// Name used in logs and error messages.
    fn provider_name(&self) -> &str {
        type_name::<Self>()
    }

    /// Resolve the exposed members in declaration order.
    ///
    /// # Errors
    ///
    /// Propagates failures from exposed methods and parameter injection.
    fn resolve_members(&self, container: &dyn Container) -> ComposeResult<Vec<ResolvedMember>>;

    /// Author-supplied entries laid over the reflected members.
    ///
    /// Keys are used literally, without name formatting.
    fn static_data(&self) -> Props {
        Props::new()
    }
}

/// Anything that can be turned into a props map.
///
/// Implemented for every [`DataProvider`], for `dyn DataProvider`, for
/// [`crate::ProviderCollection`] and for [`Props`], so rendering layers can
/// accept any of them.
pub trait Flattenable {
    /// Single-level payload; nested providers are left as handles.
    ///
    /// # Errors
    ///
    /// Propagates member resolution failures.
    fn to_flat_map(&self, context: &ComposeContext) -> ComposeResult<Props>;

    /// Payload with every nested provider expanded into a map.
    ///
    /// # Errors
    ///
    /// Propagates member resolution failures and fails on cyclic or overly
    /// deep provider graphs.
    fn to_nested_map(&self, context: &ComposeContext) -> ComposeResult<Props>;

    /// Flatten in the given mode.
    ///
    /// # Errors
    ///
    /// See [`Flattenable::to_flat_map`] and [`Flattenable::to_nested_map`].
    fn compose(&self, context: &ComposeContext, mode: ComposeMode) -> ComposeResult<Props> {
        match mode {
            ComposeMode::Flat => self.to_flat_map(context),
            ComposeMode::Nested => self.to_nested_map(context),
        }
    }
}

impl<P: DataProvider> Flattenable for P {
    fn to_flat_map(&self, context: &ComposeContext) -> ComposeResult<Props> {
        flat_map(self, context)
    }

    fn to_nested_map(&self, context: &ComposeContext) -> ComposeResult<Props> {
        nested_map(self, context)
    }
}

impl Flattenable for dyn DataProvider {
    fn to_flat_map(&self, context: &ComposeContext) -> ComposeResult<Props> {
        flat_map(self, context)
    }

    fn to_nested_map(&self, context: &ComposeContext) -> ComposeResult<Props> {
        nested_map(self, context)
    }
}

impl fmt::Debug for dyn DataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DataProvider")
            .field(&self.provider_name())
            .finish()
    }
}

impl Flattenable for Props {
    fn to_flat_map(&self, _context: &ComposeContext) -> ComposeResult<Props> {
        Ok(self.clone())
    }

    fn to_nested_map(&self, context: &ComposeContext) -> ComposeResult<Props> {
        Expander::new(context).expand_props(self.clone())
    }
}
