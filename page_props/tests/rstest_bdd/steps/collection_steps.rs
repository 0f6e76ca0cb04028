//! Steps that assemble and resolve provider collections.

use anyhow::{Result, anyhow};
use page_props::{Flattenable, Props, ProviderCollection};
use rstest_bdd_macros::{given, when};
use serde_json::Value;
use test_helpers::text::parse_json;

use super::provider_steps::{context, provider, record};
use crate::fixtures::ComposeWorld;

fn map_entry(entry: &str) -> Result<Props> {
    match parse_json(entry)? {
        Value::Object(object) => Ok(object.into_iter().collect()),
        other => Err(anyhow!("collection entries must be JSON objects, got {other}")),
    }
}

fn update<F>(world: &ComposeWorld, build: F)
where
    F: FnOnce(&mut ProviderCollection),
{
    let mut collection = world.collection.take().unwrap_or_default();
    build(&mut collection);
    world.collection.set(collection);
}

#[given("a collection entry {entry}")]
fn entry(world: &ComposeWorld, entry: String) -> Result<()> {
    let map = map_entry(&entry)?;
    update(world, |collection| {
        collection.add(map);
    });
    Ok(())
}

#[given("a conditional entry {entry} when {condition}")]
fn entry_when(world: &ComposeWorld, entry: String, condition: String) -> Result<()> {
    let map = map_entry(&entry)?;
    let condition: bool = condition.trim().parse()?;
    update(world, |collection| {
        collection.when(condition, |c| {
            c.add(map);
        });
    });
    Ok(())
}

#[given("a conditional entry {entry} unless {condition}")]
fn entry_unless(world: &ComposeWorld, entry: String, condition: String) -> Result<()> {
    let map = map_entry(&entry)?;
    let condition: bool = condition.trim().parse()?;
    update(world, |collection| {
        collection.unless(condition, |c| {
            c.add(map);
        });
    });
    Ok(())
}

#[given("the provider is added to the collection")]
fn add_provider(world: &ComposeWorld) -> Result<()> {
    let provider = provider(world)?;
    update(world, |collection| {
        collection.add(provider);
    });
    Ok(())
}

#[when("the collection is resolved")]
fn resolve(world: &ComposeWorld) -> Result<()> {
    let collection = world.collection.take().unwrap_or_default();
    record(world, collection.to_flat_map(&context(world)))
}
