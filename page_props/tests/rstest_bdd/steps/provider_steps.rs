//! Steps that build single providers and compose them.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use page_props::format::KeyCase;
use page_props::{ComposeContext, ComposeResult, Flattenable, Props, SharedProvider};
use rstest_bdd_macros::{given, when};
use test_helpers::providers::{Flaky, Header, Profile, chain};

use crate::fixtures::ComposeWorld;

/// Context honouring the formatter chosen by the scenario.
pub(crate) fn context(world: &ComposeWorld) -> ComposeContext {
    world.formatter.get().map_or_else(ComposeContext::new, |formatter| {
        ComposeContext::new().with_formatter(formatter)
    })
}

/// Store a composition outcome for the `Then` steps.
pub(crate) fn record(world: &ComposeWorld, outcome: ComposeResult<Props>) -> Result<()> {
    match outcome {
        Ok(props) => {
            world.keys.set(props.keys().map(str::to_owned).collect());
            world.payload.set(props.to_json()?);
        }
        Err(err) => world.error.set(err.to_string()),
    }
    Ok(())
}

pub(crate) fn provider(world: &ComposeWorld) -> Result<SharedProvider> {
    world
        .provider
        .get()
        .ok_or_else(|| anyhow!("no provider configured for this scenario"))
}

#[given("a header titled \"{title}\"")]
fn header(world: &ComposeWorld, title: String) {
    world.provider.set(Arc::new(Header::new(&title)));
}

#[given("a profile named \"{name}\"")]
fn profile(world: &ComposeWorld, name: String) {
    world.provider.set(Arc::new(Profile { full_name: name }));
}

#[given("a provider whose method fails")]
fn flaky(world: &ComposeWorld) {
    world.provider.set(Arc::new(Flaky));
}

#[given("the key formatter \"{name}\"")]
fn formatter(world: &ComposeWorld, name: String) -> Result<()> {
    let formatter =
        KeyCase::from_name(&name).ok_or_else(|| anyhow!("unknown key formatter '{name}'"))?;
    world.formatter.set(formatter);
    Ok(())
}

fn provider_chain(world: &ComposeWorld, names: &str, close: bool) -> Result<()> {
    let names: Vec<&str> = names.split(',').map(str::trim).collect();
    let first = chain(&names, close)
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("a chain needs at least one node"))?;
    world.provider.set(first);
    Ok(())
}

#[given("an open provider chain \"{names}\"")]
fn open_chain(world: &ComposeWorld, names: String) -> Result<()> {
    provider_chain(world, &names, false)
}

#[given("a closed provider chain \"{names}\"")]
fn closed_chain(world: &ComposeWorld, names: String) -> Result<()> {
    provider_chain(world, &names, true)
}

#[when("the provider is flattened")]
fn flatten(world: &ComposeWorld) -> Result<()> {
    let provider = provider(world)?;
    record(world, provider.to_flat_map(&context(world)))
}

#[when("the provider is composed in nested mode")]
fn nest(world: &ComposeWorld) -> Result<()> {
    let provider = provider(world)?;
    record(world, provider.to_nested_map(&context(world)))
}
