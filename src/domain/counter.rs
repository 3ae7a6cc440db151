use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Frequency map that remembers the order in which keys were first counted.
///
/// Iteration, serialization and ranking all follow first-insertion order, so
/// ties in [`OrderedCounter::top`] resolve to the key that was seen first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCounter {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl OrderedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
    }

    /// Highest counts first, at most `limit` entries.
    pub fn into_top(self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries;
        // sort_by is stable: equal counts keep insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

impl Serialize for OrderedCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
