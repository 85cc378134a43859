//! Arena-backed character trie over case-folded names.
//!
//! Each node maps single characters to child node ids; record ids attach at
//! the node where their full name terminates. Children live in a `BTreeMap`
//! so descendant collection visits characters in a fixed sorted order,
//! making prefix results deterministic regardless of insertion order.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, usize>,
    records: Vec<usize>,
    is_terminal: bool,
}

/// Prefix tree keyed on case-folded names.
#[derive(Debug)]
pub struct TrieIndex {
    nodes: Vec<TrieNode>,
}

impl Default for TrieIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieIndex {
    /// Create an empty trie with just the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Insert a record id along the character path of its folded name.
    pub fn insert(&mut self, key: &str, id: usize) {
        let mut node = 0usize;
        for c in key.chars() {
            node = match self.nodes[node].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(c, child);
                    child
                }
            };
        }
        self.nodes[node].is_terminal = true;
        self.nodes[node].records.push(id);
    }

    /// Walk the child links for a folded key; `None` if the path breaks.
    fn descend(&self, key: &str) -> Option<usize> {
        let mut node = 0usize;
        for c in key.chars() {
            node = *self.nodes[node].children.get(&c)?;
        }
        Some(node)
    }

    /// Exact lookup: the record list at the terminal node, empty otherwise.
    pub fn exact(&self, key: &str) -> Vec<usize> {
        match self.descend(key) {
            Some(node) if self.nodes[node].is_terminal => self.nodes[node].records.clone(),
            _ => Vec::new(),
        }
    }

    /// All record ids attached at or below the node the query path reaches.
    ///
    /// Pre-order traversal with an explicit stack; depth is bounded by name
    /// length. Children are pushed in reverse so sorted order pops first.
    pub fn prefix(&self, query: &str) -> Vec<usize> {
        let Some(start) = self.descend(query) else {
            return Vec::new();
        };

        let mut ids = Vec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            ids.extend_from_slice(&self.nodes[node].records);
            for &child in self.nodes[node].children.values().rev() {
                stack.push(child);
            }
        }
        ids
    }

    /// Total node count, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrieIndex {
        let mut trie = TrieIndex::new();
        trie.insert("apple", 0);
        trie.insert("apple pie", 1);
        trie.insert("apricot", 2);
        trie.insert("apple", 3);
        trie
    }

    #[test]
    fn test_exact_returns_terminal_records() {
        assert_eq!(sample().exact("apple"), vec![0, 3]);
        assert_eq!(sample().exact("apricot"), vec![2]);
    }

    #[test]
    fn test_exact_interior_node_is_not_a_hit() {
        // "app" is a path prefix, not a terminal
        assert!(sample().exact("app").is_empty());
    }

    #[test]
    fn test_exact_broken_path() {
        assert!(sample().exact("banana").is_empty());
    }

    #[test]
    fn test_prefix_collects_descendants_preorder() {
        // "apple" terminal comes before the deeper "apple pie"
        assert_eq!(sample().prefix("app"), vec![0, 3, 1]);
        assert_eq!(sample().prefix("ap"), vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_prefix_order_independent_of_insertion() {
        let mut reversed = TrieIndex::new();
        reversed.insert("apricot", 2);
        reversed.insert("apple pie", 1);
        reversed.insert("apple", 3);
        reversed.insert("apple", 0);
        // Same traversal order within the tree shape; only same-name
        // attachment order follows insertion.
        assert_eq!(reversed.prefix("ap"), vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_prefix_empty_query_collects_everything() {
        assert_eq!(sample().prefix("").len(), 4);
    }

    #[test]
    fn test_node_count() {
        let mut trie = TrieIndex::new();
        assert_eq!(trie.node_count(), 1);
        trie.insert("ab", 0);
        assert_eq!(trie.node_count(), 3);
        trie.insert("ac", 1);
        assert_eq!(trie.node_count(), 4);
    }
}
