//! Step implementations grouped by concern.

mod collection_steps;
mod outcome_steps;
mod provider_steps;
