//! Case-insensitive flavor keys and the map that stores values under them

use std::collections::btree_map::{self, BTreeMap, Entry};
use std::fmt;

/// Either the flavor-less default slot or a named (lowercased) flavor
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FlavorKey {
    #[default]
    Default,
    Named(String),
}

impl FlavorKey {
    /// Named flavor, normalized to lowercase
    pub fn named(flavor: impl AsRef<str>) -> Self {
        FlavorKey::Named(flavor.as_ref().trim().to_lowercase())
    }

    pub fn is_default(&self) -> bool {
        matches!(self, FlavorKey::Default)
    }

    /// The flavor name, `None` for the default slot
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlavorKey::Default => None,
            FlavorKey::Named(name) => Some(name),
        }
    }
}

/// `""` and `"~"` select the default slot, anything else a named flavor
impl From<&str> for FlavorKey {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "~" => FlavorKey::Default,
            name => FlavorKey::named(name),
        }
    }
}

impl From<Option<&str>> for FlavorKey {
    fn from(value: Option<&str>) -> Self {
        value.map(FlavorKey::from).unwrap_or_default()
    }
}

impl From<&FlavorKey> for FlavorKey {
    fn from(value: &FlavorKey) -> Self {
        value.clone()
    }
}

impl fmt::Display for FlavorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlavorKey::Default => f.write_str("~"),
            FlavorKey::Named(name) => f.write_str(name),
        }
    }
}

/// Values keyed by [`FlavorKey`], with fallback to the default slot
///
/// Iteration visits the default slot first, then named flavors in
/// lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorMap<V> {
    entries: BTreeMap<FlavorKey, V>,
}

impl<V> Default for FlavorMap<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> FlavorMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: impl Into<FlavorKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Exact match only, no fallback
    pub fn get_exact(&self, key: impl Into<FlavorKey>) -> Option<&V> {
        self.entries.get(&key.into())
    }

    pub fn default_value(&self) -> Option<&V> {
        self.entries.get(&FlavorKey::Default)
    }

    /// Exact match, else the default slot
    pub fn find(&self, key: impl Into<FlavorKey>) -> Option<&V> {
        let key = key.into();
        self.entries
            .get(&key)
            .or_else(|| self.entries.get(&FlavorKey::Default))
    }

    /// Stores `value` under `key`, returning whatever was there before
    pub fn insert(&mut self, key: impl Into<FlavorKey>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    /// Stores `value` only if the slot is free; otherwise hands back the occupant
    pub fn try_insert(&mut self, key: impl Into<FlavorKey>, value: V) -> Result<&mut V, &V> {
        match self.entries.entry(key.into()) {
            Entry::Vacant(entry) => Ok(entry.insert(value)),
            Entry::Occupied(entry) => Err(entry.into_mut()),
        }
    }

    pub fn remove(&mut self, key: impl Into<FlavorKey>) -> Option<V> {
        self.entries.remove(&key.into())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FlavorKey, V> {
        self.entries.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, FlavorKey, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, FlavorKey, V> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, FlavorKey, V> {
        self.entries.values_mut()
    }
}

impl<'a, V> IntoIterator for &'a FlavorMap<V> {
    type Item = (&'a FlavorKey, &'a V);
    type IntoIter = btree_map::Iter<'a, FlavorKey, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for FlavorMap<V> {
    type Item = (FlavorKey, V);
    type IntoIter = btree_map::IntoIter<FlavorKey, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<FlavorKey>, V> FromIterator<(K, V)> for FlavorMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FlavorMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<FlavorKey>, V> Extend<(K, V)> for FlavorMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalization() {
        assert_eq!(FlavorKey::from("ZH_CN"), FlavorKey::Named("zh_cn".into()));
        assert_eq!(FlavorKey::from(""), FlavorKey::Default);
        assert_eq!(FlavorKey::from("~"), FlavorKey::Default);
        assert_eq!(FlavorKey::from(None), FlavorKey::Default);
        assert_eq!(FlavorKey::named(" Ja "), FlavorKey::Named("ja".into()));
        assert_eq!(FlavorKey::Default.to_string(), "~");
    }

    #[test]
    fn test_default_sorts_first() {
        let map: FlavorMap<u8> = [("b", 2), ("", 0), ("A", 1)].into_iter().collect();
        let keys: Vec<String> = map.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["~", "a", "b"]);
    }

    #[test]
    fn test_find_falls_back_to_default() {
        let mut map = FlavorMap::new();
        assert_eq!(map.find("a"), None);
        map.insert("A", 1);
        assert_eq!(map.find("a"), Some(&1));
        assert_eq!(map.find("b"), None);
        map.insert(FlavorKey::Default, 0);
        assert_eq!(map.find("b"), Some(&0));
        assert_eq!(map.get_exact("b"), None);
    }

    #[test]
    fn test_try_insert_keeps_occupant() {
        let mut map = FlavorMap::new();
        assert!(map.try_insert("a", 1).is_ok());
        assert_eq!(map.try_insert("A", 2), Err(&1));
        assert_eq!(map.insert("a", 3), Some(1));
        assert_eq!(map.len(), 1);
    }
}
