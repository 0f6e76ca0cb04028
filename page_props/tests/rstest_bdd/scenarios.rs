//! Binds the behavioural feature files to the shared state.

use crate::fixtures::{ComposeWorld, world};
use rstest_bdd_macros::scenarios;

scenarios!("tests/features/flatten.feature", fixtures = [world: ComposeWorld]);
scenarios!("tests/features/collections.feature", fixtures = [world: ComposeWorld]);
scenarios!("tests/features/nesting.feature", fixtures = [world: ComposeWorld]);
