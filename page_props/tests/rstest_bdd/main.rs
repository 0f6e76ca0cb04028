//! `rstest-bdd` behavioural suite for `page_props`.
//!
//! [`fixtures`] holds the shared scenario state, [`steps`] the step
//! implementations and [`scenarios`] binds the `.feature` files to them.

mod fixtures;
mod scenarios;
mod steps;
