//! Resolution of member sets into raw name/value pairs.

use tracing::{debug, trace};

use super::{Descriptor, MemberSet, ResolvedMember};
use crate::ComposeResult;
use crate::container::Container;

/// Evaluates a [`MemberSet`] against a provider instance.
///
/// Properties are read, methods are invoked with parameters resolved from
/// the container, and inherited providers are resolved in place. Values are
/// never unwrapped: deferred wrappers and nested providers are returned
/// exactly as the member produced them.
#[derive(Clone, Copy)]
pub struct MemberResolver<'c> {
    container: &'c dyn Container,
}

impl<'c> MemberResolver<'c> {
    /// Create a resolver backed by `container`.
    #[must_use]
    pub const fn new(container: &'c dyn Container) -> Self {
        Self { container }
    }

    /// Resolve every member of `provider` in declaration order.
    ///
    /// Inherited members shadowed by a member declared directly on `T` are
    /// dropped so the override wins.
    ///
    /// # Errors
    ///
    /// Propagates the first failure raised by a method or by parameter
    /// injection; nothing is returned for the members resolved before it.
    pub fn resolve<T>(
        &self,
        provider: &T,
        members: &MemberSet<T>,
    ) -> ComposeResult<Vec<ResolvedMember>> {
        let mut resolved = Vec::with_capacity(members.len());
        for descriptor in &members.descriptors {
            match descriptor {
                Descriptor::Member(member) => {
                    trace!(member = member.name(), kind = ?member.kind(), "resolving member");
                    let value = member.resolve(provider, self.container)?;
                    resolved.push(ResolvedMember::new(member.name(), member.kind(), value));
                }
                Descriptor::Inherit(parent) => {
                    let parent = parent(provider);
                    for inherited in parent.resolve_members(self.container)? {
                        if members.declares(&inherited.name) {
                            debug!(
                                member = %inherited.name,
                                parent = parent.provider_name(),
                                "inherited member shadowed by an override"
                            );
                            continue;
                        }
                        resolved.push(inherited);
                    }
                }
            }
        }
        Ok(resolved)
    }
}
