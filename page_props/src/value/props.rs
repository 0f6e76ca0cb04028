//! Ordered key/value payloads.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter};
use serde::{Serialize, Serializer};

use super::{IntoPropValue, PropValue};

/// Insertion-ordered map from payload key to [`PropValue`].
///
/// Re-inserting an existing key replaces its value but keeps its original
/// position, so a merged payload lists keys in first-seen order.
#[derive(Clone, Default, PartialEq)]
pub struct Props {
    entries: IndexMap<String, PropValue>,
}

impl Props {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl IntoPropValue) -> Option<PropValue> {
        self.entries.insert(key.into(), value.into_prop_value())
    }

    /// Overlay `other` onto `self`; keys in `other` win.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Look up `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.entries.shift_remove(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the map holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in payload order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Values in payload order.
    pub fn values(&self) -> impl Iterator<Item = &PropValue> {
        self.entries.values()
    }

    /// Iterate over entries in payload order.
    pub fn iter(&self) -> Iter<'_, String, PropValue> {
        self.entries.iter()
    }

    /// Convert the map into JSON.
    ///
    /// # Errors
    ///
    /// Fails when a nested provider has not been expanded.
    pub fn to_json(&self) -> crate::ComposeResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl Serialize for Props {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<String>,
    V: IntoPropValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        props.extend(iter);
        props
    }
}

impl<K, V> Extend<(K, V)> for Props
where
    K: Into<String>,
    V: IntoPropValue,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build a [`Props`] map from literal entries.
///
/// ```rust
/// use page_props::props;
///
/// let props = props! { "id" => 1, "title" => "Hi" };
/// assert_eq!(props.keys().collect::<Vec<_>>(), ["id", "title"]);
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $( props.insert($key, $value); )+
        props
    }};
}
