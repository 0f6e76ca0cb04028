//! Shared helpers for loading composition settings inside `figment::Jail`.
//!
//! The jail gives each test a scratch working directory and an isolated
//! environment, so settings files and `PAGE_PROPS_*` variables written by
//! one test never leak into another.

use anyhow::{Result, anyhow};
use camino::Utf8Path;
use page_props::ComposeConfig;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers own the error and hand it over from `map_err`"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}

/// Load [`ComposeConfig`] in a jail holding an optional settings file and
/// the given environment variables.
///
/// # Errors
///
/// Returns an error when the jail cannot be prepared or the settings fail
/// to load.
pub fn load_settings(file: Option<&str>, env: &[(&str, &str)]) -> Result<ComposeConfig> {
    with_jail(|j| {
        if let Some(contents) = file {
            j.create_file(ComposeConfig::FILE_NAME, contents)?;
        }
        for (key, value) in env {
            j.set_env(key, value);
        }
        let path = file.map(|_| Utf8Path::new(ComposeConfig::FILE_NAME));
        ComposeConfig::load(path).map_err(figment_error)
    })
}
