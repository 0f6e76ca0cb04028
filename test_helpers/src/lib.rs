//! Test helpers shared across the `page_props` workspace.
//!
//! Provides environment variable guards, jailed settings loading, provider
//! fixtures and step-argument parsing for the behavioural suites.

pub mod env;
pub mod figment;
pub mod providers;
pub mod text;
