//! Text helpers for behavioural test step arguments.

use anyhow::{Context, Result};
use serde_json::Value;

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Parses a step argument holding a JSON document.
///
/// Feature files quote JSON with single quotes, which are stripped first.
///
/// # Errors
///
/// Returns an error when the argument is not valid JSON.
pub fn parse_json(value: &str) -> Result<Value> {
    let raw = unquote(value);
    serde_json::from_str(raw).with_context(|| format!("invalid JSON step argument: {raw}"))
}
