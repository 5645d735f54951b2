//! An insertion-ordered, string keyed table.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Song metadata, settings, and the chord information are all keyed by
/// strings and rendered in the order they were first encountered in the
/// source, so rather than a HashMap we keep the entries in a Vec. These
/// tables are small (dozens of entries at most), making the linear search
/// entirely adequate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Table {
            entries: Vec::new(),
        }
    }
}

impl<V> Table<V> {
    pub fn new() -> Table<V> {
        Table::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key)
            .is_some()
    }

    /// Set the value for a key. An existing entry keeps its original
    /// position; a new one goes on the end.
    pub fn insert(&mut self, key: &str, value: V) {
        match self.get_mut(key) {
            Some(existing) => *existing = value,
            None => self
                .entries
                .push((key.to_string(), value)),
        }
    }

    /// Add the value only if the key hasn't been seen before. Returns true
    /// if the value was inserted.
    pub fn insert_new(&mut self, key: &str, value: V) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.entries
            .push((key.to_string(), value));
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let i = self
            .entries
            .iter()
            .position(|(k, _)| k == key)?;
        Some(
            self.entries
                .remove(i)
                .1,
        )
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }
}

impl<V: Default> Table<V> {
    /// Get the value for key, creating a default entry at the end if absent.
    pub fn entry(&mut self, key: &str) -> &mut V {
        let i = match self
            .entries
            .iter()
            .position(|(k, _)| k == key)
        {
            Some(i) => i,
            None => {
                self.entries
                    .push((key.to_string(), V::default()));
                self.entries
                    .len()
                    - 1
            }
        };
        &mut self.entries[i].1
    }
}

impl<V: Serialize> Serialize for Table<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut table = Table::new();
        table.insert("zebra", 1);
        table.insert("apple", 2);
        table.insert("mango", 3);

        let keys: Vec<&str> = table
            .keys()
            .collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);

        // replacing keeps position
        table.insert("zebra", 10);
        assert_eq!(table.get("zebra"), Some(&10));
        assert_eq!(
            table
                .keys()
                .next(),
            Some("zebra")
        );
    }

    #[test]
    fn first_seen_wins() {
        let mut table = Table::new();
        assert!(table.insert_new("C", "first"));
        assert!(!table.insert_new("C", "second"));
        assert_eq!(table.get("C"), Some(&"first"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn entries_and_removal() {
        let mut table: Table<Vec<String>> = Table::new();
        table
            .entry("subtitle")
            .push("one".to_string());
        table
            .entry("subtitle")
            .push("two".to_string());
        assert_eq!(
            table.get("subtitle"),
            Some(&vec!["one".to_string(), "two".to_string()])
        );

        assert!(table
            .remove("subtitle")
            .is_some());
        assert!(table.is_empty());
        assert_eq!(table.remove("subtitle"), None);
    }
}
