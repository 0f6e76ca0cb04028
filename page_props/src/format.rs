//! Attribute name formatting strategies.
//!
//! Reflected member names pass through exactly one [`NameFormatter`] when a
//! provider is flattened. Static data keys and raw map entries are author
//! literal and never reformatted.
//!
//! ```rust
//! use page_props::format::{KeyCase, NameFormatter};
//!
//! assert_eq!(KeyCase::SnakeCase.format("fullName"), "full_name");
//! assert_eq!(KeyCase::CamelCase.format("full_name"), "fullName");
//! assert_eq!(KeyCase::AsWritten.format("full_name"), "full_name");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};

use crate::{ComposeError, ComposeResult};

/// Strategy mapping a raw member name to an output key.
///
/// Implementations must be pure: the same input always yields the same key.
/// Closures of the shape `Fn(&str) -> String` implement this trait so
/// callers can supply ad hoc strategies.
pub trait NameFormatter: Send + Sync {
    /// Format `raw` into the key emitted in the payload.
    fn format(&self, raw: &str) -> String;
}

impl<F> NameFormatter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn format(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Built-in naming strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCase {
    /// Keys are emitted exactly as declared.
    #[default]
    AsWritten,
    /// `fullName` becomes `full_name`.
    SnakeCase,
    /// `full_name` becomes `fullName`.
    ///
    /// Only `_`, `-` and spaces separate words. Existing capitals are kept,
    /// so `HTTPServer` becomes `hTTPServer` and `a_b_c` becomes `aBC`.
    CamelCase,
}

impl KeyCase {
    /// Every built-in variant, in declaration order.
    pub const ALL: [Self; 3] = [Self::AsWritten, Self::SnakeCase, Self::CamelCase];

    /// Canonical configuration name of the variant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AsWritten => "AsWritten",
            Self::SnakeCase => "SnakeCase",
            Self::CamelCase => "CamelCase",
        }
    }

    /// Look up a built-in variant, accepting `PascalCase`, `snake_case` and
    /// `kebab-case` spellings of its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalised = name.trim().to_snake_case();
        Self::ALL
            .into_iter()
            .find(|case| case.name().to_snake_case() == normalised)
    }
}

impl NameFormatter for KeyCase {
    fn format(&self, raw: &str) -> String {
        match self {
            Self::AsWritten => raw.to_owned(),
            Self::SnakeCase => raw.to_snake_case(),
            Self::CamelCase => lower_camel(raw),
        }
    }
}

/// Join separated words with their first letters raised, then lower the
/// first letter of the result.
///
/// Word boundaries come from separators alone, so the output has none left
/// and formatting it again changes nothing.
fn lower_camel(raw: &str) -> String {
    let joined: String = raw
        .split(['_', '-', ' '])
        .map(|word| map_first(word, char::to_uppercase))
        .collect();
    map_first(&joined, char::to_lowercase)
}

fn map_first<I>(word: &str, change: fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = word.chars();
    chars
        .next()
        .map_or_else(String::new, |first| change(first).chain(chars).collect())
}

impl fmt::Display for KeyCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCase {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ComposeError::UnknownFormatter { name: s.to_owned() })
    }
}

/// Named lookup of formatter strategies.
///
/// Built-in [`KeyCase`] names always resolve; custom strategies are
/// registered under their own names and win over nothing else, so a custom
/// strategy cannot shadow a built-in one.
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    custom: BTreeMap<String, Arc<dyn NameFormatter>>,
}

impl FormatterRegistry {
    /// Create a registry holding only the built-in strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom strategy under `name`, replacing any previous
    /// registration with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, formatter: F) -> &mut Self
    where
        F: NameFormatter + 'static,
    {
        self.custom.insert(name.into(), Arc::new(formatter));
        self
    }

    /// Resolve `name` to a formatter.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::UnknownFormatter`] when `name` is neither a
    /// built-in variant nor a registered custom strategy.
    pub fn resolve(&self, name: &str) -> ComposeResult<Arc<dyn NameFormatter>> {
        if let Some(case) = KeyCase::from_name(name) {
            return Ok(Arc::new(case));
        }
        self.custom
            .get(name)
            .cloned()
            .ok_or_else(|| ComposeError::UnknownFormatter {
                name: name.to_owned(),
            })
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}
