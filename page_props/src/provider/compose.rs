//! Flat and nested composition of a single provider.

use tracing::debug;

use super::DataProvider;
use crate::members::{MemberKind, ResolvedMember};
use crate::{ComposeContext, ComposeError, ComposeResult, PropValue, Props};

/// Selects how providers are reduced to a payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ComposeMode {
    /// Nested providers are kept as handles.
    #[default]
    Flat,
    /// Nested providers are expanded recursively into maps.
    Nested,
}

/// Flatten `provider` into a single-level payload.
///
/// Reflected member names pass through the context's formatter; static data
/// keys are used literally and overwrite reflected keys they collide with.
///
/// # Errors
///
/// Propagates the first member resolution failure.
pub fn flat_map(provider: &dyn DataProvider, context: &ComposeContext) -> ComposeResult<Props> {
    let members = provider.resolve_members(context.container())?;
    let mut props = Props::with_capacity(members.len());
    let mut static_keys = 0_usize;
    let static_entries = ResolvedMember::static_entries(provider.static_data());
    for member in members.into_iter().chain(static_entries) {
        let key = if member.kind == MemberKind::StaticEntry {
            static_keys += 1;
            member.name.into_owned()
        } else {
            context.format_key(&member.name)
        };
        props.insert(key, member.value);
    }
    debug!(
        provider = provider.provider_name(),
        keys = props.len(),
        static_keys,
        "flattened data provider"
    );
    Ok(props)
}

/// Flatten `provider`, expanding nested providers into maps.
///
/// Providers reachable through maps and lists are expanded as well.
///
/// # Errors
///
/// Returns [`ComposeError::CyclicReference`] when a provider is reached
/// again while it is still being expanded, [`ComposeError::NestingTooDeep`]
/// when nesting exceeds the context's limit, and propagates member
/// resolution failures.
pub fn nested_map(provider: &dyn DataProvider, context: &ComposeContext) -> ComposeResult<Props> {
    Expander::new(context).expand_provider(provider)
}

/// Depth-first expansion state shared by nested provider and collection
/// composition.
pub(crate) struct Expander<'a> {
    context: &'a ComposeContext,
    path: Vec<(*const (), String)>,
}

impl<'a> Expander<'a> {
    pub(crate) const fn new(context: &'a ComposeContext) -> Self {
        Self {
            context,
            path: Vec::new(),
        }
    }

    pub(crate) fn expand_provider(&mut self, provider: &dyn DataProvider) -> ComposeResult<Props> {
        let identity = identity(provider);
        let name = provider.provider_name().to_owned();
        if let Some(start) = self.path.iter().position(|(seen, _)| *seen == identity) {
            let chain = self
                .path
                .iter()
                .skip(start)
                .map(|(_, seen)| seen.as_str())
                .chain(std::iter::once(name.as_str()));
            return Err(ComposeError::cyclic(chain));
        }
        if self.path.len() >= self.context.max_depth() {
            return Err(ComposeError::NestingTooDeep {
                provider: name,
                limit: self.context.max_depth(),
            });
        }

        self.path.push((identity, name));
        let expanded = flat_map(provider, self.context).and_then(|props| self.expand_props(props));
        self.path.pop();
        if expanded.is_ok() {
            debug!(
                provider = provider.provider_name(),
                depth = self.path.len(),
                "expanded nested data provider"
            );
        }
        expanded
    }

    pub(crate) fn expand_props(&mut self, props: Props) -> ComposeResult<Props> {
        let mut expanded = Props::with_capacity(props.len());
        for (key, value) in props {
            expanded.insert(key, self.expand_value(value)?);
        }
        Ok(expanded)
    }

    fn expand_value(&mut self, value: PropValue) -> ComposeResult<PropValue> {
        match value {
            PropValue::Provider(provider) => Ok(PropValue::Map(self.expand_provider(&*provider)?)),
            PropValue::Map(map) => Ok(PropValue::Map(self.expand_props(map)?)),
            PropValue::List(items) => items
                .into_iter()
                .map(|item| self.expand_value(item))
                .collect::<ComposeResult<Vec<_>>>()
                .map(PropValue::List),
            concrete @ (PropValue::Concrete(_) | PropValue::Deferred(_)) => Ok(concrete),
        }
    }
}

/// Address of the provider object, used to detect revisits.
fn identity(provider: &dyn DataProvider) -> *const () {
    std::ptr::from_ref(provider).cast::<()>()
}
