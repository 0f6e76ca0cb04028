//! Tests for member sets and their resolution.

use std::sync::{Arc, OnceLock};

use rstest::{fixture, rstest};

use super::*;
use crate::container::{ContainerExt, ServiceContainer};
use crate::{ComposeError, IntoPropValue};

struct Base {
    label: String,
}

impl DataProvider for Base {
    fn resolve_members(&self, container: &dyn Container) -> ComposeResult<Vec<ResolvedMember>> {
        static MEMBERS: OnceLock<MemberSet<Base>> = OnceLock::new();
        let members = MEMBERS.get_or_init(|| {
            let mut builder = MemberSet::builder();
            builder
                .property("label", |base: &Base| base.label.clone().into_prop_value())
                .property("origin", |_: &Base| "base".into_prop_value());
            builder.build()
        });
        MemberResolver::new(container).resolve(self, members)
    }
}

struct Derived {
    base: Base,
    count: u32,
}

fn derived_members() -> &'static MemberSet<Derived> {
    static MEMBERS: OnceLock<MemberSet<Derived>> = OnceLock::new();
    MEMBERS.get_or_init(|| {
        let mut builder = MemberSet::builder();
        builder
            .property("count", |derived: &Derived| derived.count.into_prop_value())
            .inherit(|derived: &Derived| &derived.base)
            .property("origin", |_: &Derived| "derived".into_prop_value());
        builder.build()
    })
}

#[fixture]
fn derived() -> Derived {
    Derived {
        base: Base {
            label: String::from("inbox"),
        },
        count: 3,
    }
}

fn names(resolved: &[ResolvedMember]) -> Vec<&str> {
    resolved.iter().map(|member| member.name.as_ref()).collect()
}

#[rstest]
fn builder_preserves_declaration_order(derived: Derived) {
    let container = ServiceContainer::new();
    let resolved = MemberResolver::new(&container)
        .resolve(&derived, derived_members())
        .expect("resolve members");
    assert_eq!(names(&resolved), ["count", "label", "origin"]);
}

#[rstest]
fn overrides_shadow_inherited_members(derived: Derived) {
    let container = ServiceContainer::new();
    let resolved = MemberResolver::new(&container)
        .resolve(&derived, derived_members())
        .expect("resolve members");
    let origin = resolved
        .iter()
        .find(|member| member.name == "origin")
        .expect("origin member");
    assert_eq!(origin.value, serde_json::json!("derived"));
    assert_eq!(origin.kind, MemberKind::Property);
}

#[rstest]
fn declares_ignores_inherited_members() {
    let members = derived_members();
    assert!(members.declares("count"));
    assert!(members.declares("origin"));
    assert!(!members.declares("label"));
    assert_eq!(members.len(), 3);
    assert_eq!(members.members().count(), 2);
}

struct Greeter;

#[derive(Debug)]
struct Salutation(&'static str);

fn greeter_members() -> &'static MemberSet<Greeter> {
    static MEMBERS: OnceLock<MemberSet<Greeter>> = OnceLock::new();
    MEMBERS.get_or_init(|| {
        let mut builder = MemberSet::builder();
        builder.method("greeting", |_: &Greeter, container: &dyn Container| {
            let salutation = container.resolve::<Salutation>()?;
            Ok(format!("{} there", salutation.0).into_prop_value())
        });
        builder.build()
    })
}

#[rstest]
fn methods_receive_injected_services() {
    let mut container = ServiceContainer::new();
    container.instance(Salutation("Hello"));
    let resolved = MemberResolver::new(&container)
        .resolve(&Greeter, greeter_members())
        .expect("resolve members");
    let greeting = resolved.first().expect("greeting member");
    assert_eq!(greeting.kind, MemberKind::Method);
    assert_eq!(greeting.value, serde_json::json!("Hello there"));
}

#[rstest]
fn missing_services_abort_resolution() {
    let container = ServiceContainer::new();
    let err = MemberResolver::new(&container)
        .resolve(&Greeter, greeter_members())
        .expect_err("unresolvable parameter");
    assert!(matches!(err, ComposeError::Unresolvable { .. }));
}

struct Faulty;

#[rstest]
fn method_failures_stop_at_the_first_error() {
    let mut builder = MemberSet::<Faulty>::builder();
    builder
        .method("broken", |_: &Faulty, _: &dyn Container| {
            Err(ComposeError::invocation("Faulty", "broken", "backend offline"))
        })
        .method("unreached", |_: &Faulty, _: &dyn Container| Ok(PropValue::null()));
    let members = builder.build();
    let err = MemberResolver::new(&ServiceContainer::new())
        .resolve(&Faulty, &members)
        .expect_err("method failure");
    assert_eq!(
        err.to_string(),
        "failed to resolve 'broken' on data provider 'Faulty': backend offline"
    );
}

#[rstest]
fn shared_values_are_not_unwrapped() {
    let mut builder = MemberSet::<Faulty>::builder();
    builder.property("child", |_: &Faulty| {
        let child: Arc<dyn DataProvider> = Arc::new(Base {
            label: String::from("nested"),
        });
        child.into_prop_value()
    });
    let members = builder.build();
    let resolved = MemberResolver::new(&ServiceContainer::new())
        .resolve(&Faulty, &members)
        .expect("resolve members");
    let child = resolved.first().expect("child member");
    assert!(child.value.as_provider().is_some());
}

#[rstest]
fn static_entries_keep_map_order_and_literal_names() {
    let data = crate::props! { "legacyId" => 7, "id" => 1 };
    let entries: Vec<_> = ResolvedMember::static_entries(data).collect();
    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_ref()).collect();
    assert_eq!(names, ["legacyId", "id"]);
    assert!(
        entries
            .iter()
            .all(|entry| entry.kind == MemberKind::StaticEntry)
    );
}
