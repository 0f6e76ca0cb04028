//! Ordered, conditionally built sequences of providers and literal maps.
//!
//! A [`ProviderCollection`] merges its entries left to right: each entry's
//! keys overwrite identical keys from earlier entries, and keys present in a
//! single entry survive unchanged.
//!
//! ```rust
//! use page_props::{ComposeContext, Flattenable, ProviderCollection, props};
//!
//! let is_admin = false;
//! let mut collection = ProviderCollection::new();
//! collection
//!     .add(props! { "meta" => "a", "title" => "Home" })
//!     .add(props! { "meta" => "b" })
//!     .when(is_admin, |c| {
//!         c.add(props! { "audit" => true });
//!     });
//!
//! let props = collection.to_flat_map(&ComposeContext::new())?;
//! assert_eq!(props.keys().collect::<Vec<_>>(), ["meta", "title"]);
//! assert_eq!(props.to_json()?["meta"], "b");
//! # Ok::<_, page_props::ComposeError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::provider::{Expander, flat_map};
use crate::{ComposeContext, ComposeMode, ComposeResult, DataProvider, Flattenable, Props};

/// One entry of a [`ProviderCollection`].
#[derive(Clone)]
pub enum CollectionEntry {
    /// A provider, flattened before merging.
    Provider(Arc<dyn DataProvider>),
    /// A literal map merged key for key without formatting.
    Map(Props),
}

impl CollectionEntry {
    fn describe(&self) -> &str {
        match self {
            Self::Provider(provider) => provider.provider_name(),
            Self::Map(_) => "map",
        }
    }
}

impl fmt::Debug for CollectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(provider) => f
                .debug_tuple("Provider")
                .field(&provider.provider_name())
                .finish(),
            Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
        }
    }
}

impl From<Arc<dyn DataProvider>> for CollectionEntry {
    fn from(provider: Arc<dyn DataProvider>) -> Self {
        Self::Provider(provider)
    }
}

impl<P> From<Arc<P>> for CollectionEntry
where
    P: DataProvider + 'static,
{
    fn from(provider: Arc<P>) -> Self {
        Self::Provider(provider)
    }
}

impl From<Props> for CollectionEntry {
    fn from(map: Props) -> Self {
        Self::Map(map)
    }
}

/// Ordered sequence of providers and literal maps merged into one payload.
///
/// Entries are shared handles, so one provider may appear in several
/// collections. Conditions passed to [`ProviderCollection::when`] and
/// [`ProviderCollection::unless`] are evaluated immediately.
#[derive(Clone, Debug, Default)]
pub struct ProviderCollection {
    entries: Vec<CollectionEntry>,
}

impl ProviderCollection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a collection seeded with `entries`, in order.
    pub fn collection<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<CollectionEntry>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Append `entry` unconditionally.
    pub fn add(&mut self, entry: impl Into<CollectionEntry>) -> &mut Self {
        self.entries.push(entry.into());
        self
    }

    /// Append an owned provider.
    pub fn add_provider<P>(&mut self, provider: P) -> &mut Self
    where
        P: DataProvider + 'static,
    {
        self.add(Arc::new(provider))
    }

    /// Run `build` against the collection when `condition` holds.
    pub fn when<F>(&mut self, condition: bool, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        if condition {
            build(self);
        }
        self
    }

    /// Run `build` against the collection when `condition` does not hold.
    pub fn unless<F>(&mut self, condition: bool, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.when(!condition, build)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the collection has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge every entry into one payload.
    ///
    /// Provider entries are reduced with the requested `mode` before
    /// merging; literal maps keep their keys verbatim. In nested mode,
    /// providers held inside literal maps are expanded too.
    ///
    /// # Errors
    ///
    /// Fails as a whole on the first entry that fails; no partial payload
    /// is produced.
    pub fn resolve(&self, context: &ComposeContext, mode: ComposeMode) -> ComposeResult<Props> {
        let mut payload = Props::new();
        for entry in &self.entries {
            let props = match (entry, mode) {
                (CollectionEntry::Provider(provider), ComposeMode::Flat) => {
                    flat_map(provider.as_ref(), context)?
                }
                (CollectionEntry::Provider(provider), ComposeMode::Nested) => {
                    Expander::new(context).expand_provider(provider.as_ref())?
                }
                (CollectionEntry::Map(map), ComposeMode::Flat) => map.clone(),
                (CollectionEntry::Map(map), ComposeMode::Nested) => {
                    Expander::new(context).expand_props(map.clone())?
                }
            };
            debug!(entry = entry.describe(), keys = props.len(), "merging collection entry");
            payload.merge(props);
        }
        debug!(
            entries = self.entries.len(),
            keys = payload.len(),
            ?mode,
            "resolved provider collection"
        );
        Ok(payload)
    }
}

impl Flattenable for ProviderCollection {
    fn to_flat_map(&self, context: &ComposeContext) -> ComposeResult<Props> {
        self.resolve(context, ComposeMode::Flat)
    }

    fn to_nested_map(&self, context: &ComposeContext) -> ComposeResult<Props> {
        self.resolve(context, ComposeMode::Nested)
    }
}

impl<E: Into<CollectionEntry>> FromIterator<E> for ProviderCollection {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::collection(iter)
    }
}

impl<E: Into<CollectionEntry>> Extend<E> for ProviderCollection {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(Into::into));
    }
}

/// Build a [`ProviderCollection`] from entries in argument order.
///
/// Each argument may be an `Arc` of a provider, an `Arc<dyn DataProvider>`
/// or a [`Props`] map.
#[macro_export]
macro_rules! collection {
    () => {
        $crate::ProviderCollection::new()
    };
    ($($entry:expr),+ $(,)?) => {{
        let mut collection = $crate::ProviderCollection::new();
        $( collection.add($entry); )+
        collection
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::members::{MemberResolver, MemberSet, ResolvedMember};
    use crate::{IntoPropValue, props};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::OnceLock;

    struct Banner;

    impl DataProvider for Banner {
        fn provider_name(&self) -> &str {
            "Banner"
        }

        fn resolve_members(&self, container: &dyn Container) -> ComposeResult<Vec<ResolvedMember>> {
            static MEMBERS: OnceLock<MemberSet<Banner>> = OnceLock::new();
            let members = MEMBERS.get_or_init(|| {
                let mut builder = MemberSet::builder();
                builder.property("headline", |_: &Banner| "Welcome".into_prop_value());
                builder.build()
            });
            MemberResolver::new(container).resolve(self, members)
        }
    }

    fn keys(props: &Props) -> Vec<&str> {
        props.keys().collect()
    }

    #[rstest]
    fn later_entries_win_collisions() {
        let collection = collection![
            props! { "meta" => "a", "only_a" => 1 },
            props! { "meta" => "b", "only_b" => 2 },
        ];
        let props = collection
            .to_flat_map(&ComposeContext::new())
            .expect("resolve collection");
        assert_eq!(keys(&props), ["meta", "only_a", "only_b"]);
        assert_eq!(
            props.to_json().expect("json"),
            json!({"meta": "b", "only_a": 1, "only_b": 2})
        );
    }

    #[rstest]
    #[case::taken(true, 2)]
    #[case::skipped(false, 1)]
    fn when_evaluates_eagerly(#[case] condition: bool, #[case] expected: usize) {
        let mut collection = ProviderCollection::collection([props! { "a" => 1 }]);
        collection.when(condition, |c| {
            c.add(props! { "b" => 2 });
        });
        assert_eq!(collection.len(), expected);
    }

    #[rstest]
    #[case::taken(false, 2)]
    #[case::skipped(true, 1)]
    fn unless_is_the_complement(#[case] condition: bool, #[case] expected: usize) {
        let mut collection = ProviderCollection::collection([props! { "a" => 1 }]);
        collection.unless(condition, |c| {
            c.add(props! { "b" => 2 });
        });
        assert_eq!(collection.len(), expected);
    }

    #[rstest]
    fn map_keys_are_never_formatted() {
        let collection = collection![props! { "fullName" => "Ada" }];
        let context = ComposeContext::new().with_formatter(crate::format::KeyCase::SnakeCase);
        let props = collection.to_flat_map(&context).expect("resolve");
        assert_eq!(keys(&props), ["fullName"]);
    }

    #[rstest]
    fn empty_collections_resolve_to_empty_payloads() {
        let props = collection![]
            .to_nested_map(&ComposeContext::new())
            .expect("resolve");
        assert!(props.is_empty());
    }

    #[rstest]
    fn owned_providers_are_wrapped_and_merged_in_order() {
        let mut collection = ProviderCollection::new();
        collection
            .add(props! { "headline" => "Draft", "lead" => 0 })
            .add_provider(Banner);
        assert!(matches!(
            collection.entries().last(),
            Some(CollectionEntry::Provider(provider)) if provider.provider_name() == "Banner"
        ));
        let props = collection
            .to_flat_map(&ComposeContext::new())
            .expect("resolve");
        assert_eq!(keys(&props), ["headline", "lead"]);
        assert_eq!(props.to_json().expect("json")["headline"], "Welcome");
    }
}
