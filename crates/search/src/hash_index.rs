//! Hash-grouped name index.
//!
//! Groups record ids by case-folded name for O(1) exact lookup. Prefix and
//! substring queries have no hash-friendly shape and fall back to a linear
//! scan over every key; that cost is part of the structure-comparison story,
//! not something to hide.

use std::collections::HashMap;

/// Maps a case-folded name to record ids sharing that exact name.
///
/// Insertion order is preserved within a group; duplicates are allowed since
/// distinct catalog rows may share a name.
#[derive(Debug, Default)]
pub struct HashIndex {
    groups: HashMap<String, Vec<usize>>,
}

impl HashIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record id under its folded name key.
    pub fn insert(&mut self, key: String, id: usize) {
        self.groups.entry(key).or_default().push(id);
    }

    /// Exact lookup of a folded key. Empty if absent.
    pub fn exact(&self, key: &str) -> Vec<usize> {
        self.groups.get(key).cloned().unwrap_or_default()
    }

    /// All record ids whose key starts with the query.
    ///
    /// Linear scan over every key. `HashMap` iteration order is unspecified,
    /// so keys are visited in sorted order to keep results stable across
    /// runs.
    pub fn prefix(&self, query: &str) -> Vec<usize> {
        self.scan(|key| key.starts_with(query))
    }

    /// All record ids whose key contains the query anywhere.
    pub fn contains(&self, query: &str) -> Vec<usize> {
        self.scan(|key| key.contains(query))
    }

    fn scan(&self, keep: impl Fn(&str) -> bool) -> Vec<usize> {
        let mut keys: Vec<&String> = self.groups.keys().collect();
        keys.sort();

        let mut ids = Vec::new();
        for key in keys {
            if keep(key) {
                ids.extend_from_slice(&self.groups[key]);
            }
        }
        ids
    }

    /// Number of distinct folded names.
    pub fn distinct_keys(&self) -> usize {
        self.groups.len()
    }

    /// Size of the largest same-name group.
    pub fn max_group_len(&self) -> usize {
        self.groups.values().map(Vec::len).max().unwrap_or(0)
    }
}
