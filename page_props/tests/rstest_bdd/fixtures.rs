//! Shared scenario state for the behavioural suite.

use page_props::format::KeyCase;
use page_props::{ProviderCollection, SharedProvider};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;

/// State shared between the steps of one scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct ComposeWorld {
    /// Provider under test.
    pub provider: Slot<SharedProvider>,
    /// Formatter selected by the scenario.
    pub formatter: Slot<KeyCase>,
    /// Collection assembled by the scenario.
    pub collection: Slot<ProviderCollection>,
    /// Composed payload as JSON.
    pub payload: Slot<Value>,
    /// Keys of the composed payload, in order.
    pub keys: Slot<Vec<String>>,
    /// Rendered composition error.
    pub error: Slot<String>,
}

/// Fresh state for each scenario.
#[fixture]
pub fn world() -> ComposeWorld {
    ComposeWorld::default()
}
