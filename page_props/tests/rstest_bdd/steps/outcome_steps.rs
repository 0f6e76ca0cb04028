//! Assertions over composed payloads and failures.

use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::then;
use test_helpers::text::parse_json;

use crate::fixtures::ComposeWorld;

#[then("the payload is {expected}")]
fn payload_is(world: &ComposeWorld, expected: String) -> Result<()> {
    let expected = parse_json(&expected)?;
    let payload = world.payload.get().ok_or_else(|| {
        anyhow!(
            "no payload was composed; error: {:?}",
            world.error.get()
        )
    })?;
    ensure!(payload == expected, "payload {payload} != {expected}");
    Ok(())
}

#[then("the payload keys are \"{keys}\"")]
fn payload_keys(world: &ComposeWorld, keys: String) -> Result<()> {
    let expected: Vec<&str> = keys.split(',').map(str::trim).collect();
    let actual = world
        .keys
        .get()
        .ok_or_else(|| anyhow!("no payload was composed"))?;
    ensure!(actual == expected, "keys {actual:?} != {expected:?}");
    Ok(())
}

#[then("composition fails mentioning \"{fragment}\"")]
fn fails_with(world: &ComposeWorld, fragment: String) -> Result<()> {
    let error = world
        .error
        .get()
        .ok_or_else(|| anyhow!("composition unexpectedly succeeded"))?;
    ensure!(
        error.contains(&fragment),
        "error '{error}' does not mention '{fragment}'"
    );
    Ok(())
}
