//! Provider fixtures shared by integration and behavioural tests.

use std::sync::{Arc, OnceLock};

use page_props::container::Container;
use page_props::members::{MemberResolver, MemberSet, ResolvedMember};
use page_props::{ComposeResult, DataProvider, IntoPropValue, Props, SharedProvider, props, provider_methods};

/// Page header: one public field, one private field, one exposed method and
/// a static `id` entry.
#[derive(Clone, Debug, DataProvider)]
#[data_provider(methods, static_data = "pinned")]
pub struct Header {
    /// Exposed.
    pub title: String,
    secret: String,
}

#[provider_methods]
impl Header {
    /// Header titled `title`.
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            secret: String::from("hunter2"),
        }
    }

    /// Always `5`.
    #[must_use]
    pub const fn count(&self) -> i64 {
        5
    }

    /// Not exposed: the field it reads is private.
    #[data_provider(skip)]
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    fn pinned(&self) -> Props {
        props! { "id" => 1 }
    }
}

/// Hand-written provider whose member names are camelCase and whose static
/// data uses a camelCase key, for formatter tests.
#[derive(Clone, Debug)]
pub struct Profile {
    /// Value of the `fullName` member.
    pub full_name: String,
}

impl DataProvider for Profile {
    fn provider_name(&self) -> &str {
        "Profile"
    }

    fn resolve_members(&self, container: &dyn Container) -> ComposeResult<Vec<ResolvedMember>> {
        static MEMBERS: OnceLock<MemberSet<Profile>> = OnceLock::new();
        let members = MEMBERS.get_or_init(|| {
            let mut builder = MemberSet::builder();
            builder.property("fullName", |profile: &Profile| {
                profile.full_name.clone().into_prop_value()
            });
            builder.build()
        });
        MemberResolver::new(container).resolve(self, members)
    }

    fn static_data(&self) -> Props {
        props! { "legacyId" => 7 }
    }
}

/// Salutation service resolved from the container.
#[derive(Clone, Debug)]
pub struct Salutation(pub String);

/// Provider with a method that takes an injected service.
#[derive(Clone, Debug, Default, DataProvider)]
#[data_provider(methods, name = "Greeter")]
pub struct Greeter {
    /// Addressee.
    pub name: String,
}

#[provider_methods]
impl Greeter {
    /// Greeting built from the injected salutation.
    #[must_use]
    pub fn greeting(&self, salutation: &Salutation) -> String {
        format!("{} {}", salutation.0, self.name)
    }
}

/// Failure raised by [`Flaky::status`].
#[derive(Debug, thiserror::Error)]
#[error("status backend offline")]
pub struct BackendOffline;

/// Provider whose exposed method fails.
#[derive(Clone, Debug, Default, DataProvider)]
#[data_provider(methods, name = "Flaky")]
pub struct Flaky;

#[provider_methods]
impl Flaky {
    /// Always fails.
    ///
    /// # Errors
    ///
    /// Always returns [`BackendOffline`].
    pub const fn status(&self) -> Result<u8, BackendOffline> {
        Err(BackendOffline)
    }
}

/// Post that inherits [`Header`]'s members and overrides its title.
#[derive(Clone, Debug, DataProvider)]
#[data_provider(name = "Post")]
pub struct Post {
    #[data_provider(inherit)]
    header: Header,
    /// Overrides the inherited `title`.
    pub title: String,
    /// Post slug.
    pub slug: String,
}

impl Post {
    /// Post titled `title` under a header titled `header_title`.
    #[must_use]
    pub fn new(header_title: &str, title: &str, slug: &str) -> Self {
        Self {
            header: Header::new(header_title),
            title: title.to_owned(),
            slug: slug.to_owned(),
        }
    }
}

/// Layout holding child providers, for nested composition.
#[derive(Clone, Debug, DataProvider)]
#[data_provider(name = "Layout")]
pub struct Layout {
    /// Child provider.
    pub header: Arc<Header>,
    /// Literal value next to the child.
    pub theme: String,
}

/// Node of a provider graph that may point back at itself.
///
/// The `next` link is set after construction so cycles can be built.
pub struct Node {
    name: String,
    next: OnceLock<SharedProvider>,
}

impl Node {
    /// Unlinked node called `name`.
    #[must_use]
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            next: OnceLock::new(),
        })
    }

    /// Point this node at `next`. Later calls are ignored.
    pub fn link(&self, next: SharedProvider) {
        let _ignored = self.next.set(next);
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").field("name", &self.name).finish_non_exhaustive()
    }
}

impl DataProvider for Node {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn resolve_members(&self, container: &dyn Container) -> ComposeResult<Vec<ResolvedMember>> {
        static MEMBERS: OnceLock<MemberSet<Node>> = OnceLock::new();
        let members = MEMBERS.get_or_init(|| {
            let mut builder = MemberSet::builder();
            builder
                .property("name", |node: &Node| node.name.clone().into_prop_value())
                .property("next", |node: &Node| node.next.get().cloned().into_prop_value());
            builder.build()
        });
        MemberResolver::new(container).resolve(self, members)
    }
}

/// Chain of `names.len()` nodes; when `close` holds, the last node links
/// back to the first.
#[must_use]
pub fn chain(names: &[&str], close: bool) -> Vec<Arc<Node>> {
    let nodes: Vec<_> = names.iter().map(|name| Node::new(name)).collect();
    for pair in nodes.windows(2) {
        if let [from, to] = pair {
            from.link(Arc::clone(to) as SharedProvider);
        }
    }
    if close && let (Some(first), Some(last)) = (nodes.first(), nodes.last()) {
        last.link(Arc::clone(first) as SharedProvider);
    }
    nodes
}
