//! Process-wide composition settings.
//!
//! Settings are layered with Figment: built-in defaults, then an optional
//! TOML file, then `PAGE_PROPS_*` environment variables. The loaded
//! [`ComposeConfig`] is turned into a [`crate::ComposeContext`] once and
//! threaded into every composition call.
//!
//! ```toml
//! # page_props.toml
//! attribute_name_formatter = "SnakeCase"
//! max_nesting_depth = 16
//! ```

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ComposeResult;
use crate::format::KeyCase;

/// Default limit on nested provider depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Composition settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Name of the active attribute name formatter: a built-in
    /// [`KeyCase`] name or a strategy registered with
    /// [`crate::format::FormatterRegistry`].
    pub attribute_name_formatter: String,
    /// Maximum depth of nested provider expansion.
    pub max_nesting_depth: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            attribute_name_formatter: KeyCase::AsWritten.name().to_owned(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ComposeConfig {
    /// Prefix recognised on environment variables.
    pub const ENV_PREFIX: &'static str = "PAGE_PROPS_";

    /// Conventional configuration file name.
    pub const FILE_NAME: &'static str = "page_props.toml";

    /// Build the layered Figment used by [`ComposeConfig::load`].
    ///
    /// A missing `file` contributes nothing.
    #[must_use]
    pub fn figment(file: Option<&Utf8Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Load settings from defaults, `file` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Config`] when a layer cannot be parsed
    /// or holds a value of the wrong type.
    pub fn load(file: Option<&Utf8Path>) -> ComposeResult<Self> {
        Self::from_figment(&Self::figment(file))
    }

    /// Extract settings from an existing Figment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComposeError::Config`] when extraction fails.
    pub fn from_figment(figment: &Figment) -> ComposeResult<Self> {
        let config: Self = figment.extract()?;
        debug!(
            formatter = %config.attribute_name_formatter,
            max_nesting_depth = config.max_nesting_depth,
            "loaded composition settings"
        );
        Ok(config)
    }
}
