//! Error types produced while composing page props.

mod constructors;
mod types;

pub use types::{ComposeError, ComposeResult};
