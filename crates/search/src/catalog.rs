//! The unified catalog index and query dispatch.
//!
//! Owns the full record collection plus one hash grouping and one trie built
//! from it in a single pass. Built once after ingestion; every method after
//! `build` takes `&self`, so a built index is safe to share across threads
//! for concurrent read-only queries.

use crate::error::{Result, SearchError};
use crate::hash_index::HashIndex;
use crate::trie::TrieIndex;
use mealscore_core::{fold, Record};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default cap on results returned per structure.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// How a query string matches a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Whole-name equality
    Exact,
    /// Name starts with the query
    Prefix,
    /// Name contains the query anywhere
    Contains,
}

/// Which index structure answers the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStructure {
    /// Hash grouping only
    Hash,
    /// Character trie only
    Trie,
    /// Both, independently, with per-structure timing
    Both,
}

/// One structure's answer to a query.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Matching records, capped at the index's result limit
    pub hits: Vec<Record>,
    /// Match count before the cap was applied
    pub total_hits: usize,
    /// Wall-clock cost of the lookup
    pub elapsed: Duration,
}

/// Result of a dispatch: one outcome, or two for comparative display.
#[derive(Debug, Clone)]
pub enum SearchResults {
    /// Single-structure query
    Single(SearchOutcome),
    /// Both structures ran independently; order and membership may
    /// legitimately differ between the two lists
    Both {
        /// Hash grouping outcome
        hash: SearchOutcome,
        /// Trie outcome
        trie: SearchOutcome,
    },
}

/// Size and build-cost statistics for both structures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total records indexed
    pub records: usize,
    /// Distinct case-folded names in the hash grouping
    pub distinct_names: usize,
    /// Largest same-name group
    pub max_group_len: usize,
    /// Trie node count, root included
    pub trie_nodes: usize,
    /// Time spent building the hash grouping
    pub hash_build: Duration,
    /// Time spent building the trie
    pub trie_build: Duration,
}

/// Process-lifetime index over the ingested catalog.
#[derive(Debug)]
pub struct CatalogIndex {
    records: Vec<Record>,
    hash: HashIndex,
    trie: TrieIndex,
    max_results: usize,
    hash_build: Duration,
    trie_build: Duration,
}

impl CatalogIndex {
    /// Build both structures from the full record sequence.
    ///
    /// Consumes the sequence once; grouping and trie insertion both key on
    /// the case-folded name. Fails with `EmptyCatalog` on an empty input so
    /// callers can never query an unbuilt index.
    pub fn build(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            return Err(SearchError::EmptyCatalog);
        }

        let mut hash = HashIndex::new();
        let start = Instant::now();
        for (id, record) in records.iter().enumerate() {
            hash.insert(record.key(), id);
        }
        let hash_build = start.elapsed();

        let mut trie = TrieIndex::new();
        let start = Instant::now();
        for (id, record) in records.iter().enumerate() {
            trie.insert(&record.key(), id);
        }
        let trie_build = start.elapsed();

        info!(
            records = records.len(),
            hash_ms = hash_build.as_millis() as u64,
            trie_ms = trie_build.as_millis() as u64,
            "catalog index built"
        );

        Ok(Self {
            records,
            hash,
            trie,
            max_results: DEFAULT_MAX_RESULTS,
            hash_build,
            trie_build,
        })
    }

    /// Override the per-structure result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Dispatch a query to the requested structure(s).
    ///
    /// The query is trimmed and case-folded first; a blank query fails with
    /// `EmptyQuery`. An error never carries partial results.
    pub fn search(
        &self,
        query: &str,
        mode: SearchMode,
        structure: IndexStructure,
    ) -> Result<SearchResults> {
        let folded = fold(query);
        if folded.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        debug!(query = %folded, ?mode, ?structure, "dispatching search");

        match structure {
            IndexStructure::Hash => Ok(SearchResults::Single(self.run_hash(&folded, mode))),
            IndexStructure::Trie => Ok(SearchResults::Single(self.run_trie(&folded, mode))),
            IndexStructure::Both => Ok(SearchResults::Both {
                hash: self.run_hash(&folded, mode),
                trie: self.run_trie(&folded, mode),
            }),
        }
    }

    fn run_hash(&self, folded: &str, mode: SearchMode) -> SearchOutcome {
        let start = Instant::now();
        let ids = match mode {
            SearchMode::Exact => self.hash.exact(folded),
            SearchMode::Prefix => self.hash.prefix(folded),
            SearchMode::Contains => self.hash.contains(folded),
        };
        self.outcome(ids, start.elapsed())
    }

    fn run_trie(&self, folded: &str, mode: SearchMode) -> SearchOutcome {
        let start = Instant::now();
        let ids = match mode {
            SearchMode::Exact => self.trie.exact(folded),
            SearchMode::Prefix => self.trie.prefix(folded),
            // A prefix tree cannot answer interior-substring queries; this
            // degrades to a linear scan of the whole collection, same cost
            // as the hash path. That asymmetry is part of the comparison
            // narrative and stays visible.
            SearchMode::Contains => self
                .records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.key().contains(folded))
                .map(|(id, _)| id)
                .collect(),
        };
        self.outcome(ids, start.elapsed())
    }

    fn outcome(&self, ids: Vec<usize>, elapsed: Duration) -> SearchOutcome {
        let total_hits = ids.len();
        let hits = ids
            .into_iter()
            .take(self.max_results)
            .map(|id| self.records[id].clone())
            .collect();
        SearchOutcome {
            hits,
            total_hits,
            elapsed,
        }
    }

    /// The full indexed record collection, in ingestion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Size and build-cost statistics for display.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            records: self.records.len(),
            distinct_names: self.hash.distinct_keys(),
            max_group_len: self.hash.max_group_len(),
            trie_nodes: self.trie.node_count(),
            hash_build: self.hash_build,
            trie_build: self.trie_build,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str) -> Record {
        Record::zeroed(name)
    }

    fn catalog() -> CatalogIndex {
        CatalogIndex::build(vec![
            rec("Apple"),
            rec("Apple Pie"),
            rec("Grape"),
            rec("Pineapple"),
            rec("apple"),
        ])
        .unwrap()
    }

    fn single(results: SearchResults) -> SearchOutcome {
        match results {
            SearchResults::Single(outcome) => outcome,
            SearchResults::Both { .. } => panic!("expected single outcome"),
        }
    }

    #[test]
    fn test_build_empty_catalog_fails() {
        assert_eq!(
            CatalogIndex::build(Vec::new()).unwrap_err(),
            SearchError::EmptyCatalog
        );
    }

    #[test]
    fn test_blank_query_fails() {
        let index = catalog();
        assert_eq!(
            index
                .search("   ", SearchMode::Exact, IndexStructure::Hash)
                .unwrap_err(),
            SearchError::EmptyQuery
        );
    }

    #[test]
    fn test_exact_case_folded_both_structures() {
        let index = catalog();
        for structure in [IndexStructure::Hash, IndexStructure::Trie] {
            let outcome = single(index.search("APPLE", SearchMode::Exact, structure).unwrap());
            let names: Vec<&str> = outcome.hits.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["Apple", "apple"]);
        }
    }

    #[test]
    fn test_exact_finds_whitespace_padded_names() {
        // Index keys and queries trim the same way, so a padded catalog
        // name stays reachable by its own (or a padded) query.
        let index = CatalogIndex::build(vec![rec(" a"), rec("Raw Almonds  ")]).unwrap();
        for structure in [IndexStructure::Hash, IndexStructure::Trie] {
            let outcome = single(index.search(" a", SearchMode::Exact, structure).unwrap());
            assert_eq!(outcome.total_hits, 1);
            assert_eq!(outcome.hits[0].name, " a");

            let outcome = single(
                index
                    .search("raw almonds", SearchMode::Exact, structure)
                    .unwrap(),
            );
            assert_eq!(outcome.total_hits, 1);
        }
    }

    #[test]
    fn test_prefix_trie_excludes_interior_matches() {
        let index = catalog();
        let outcome = single(index.search("app", SearchMode::Prefix, IndexStructure::Trie).unwrap());
        let names: Vec<&str> = outcome.hits.iter().map(|r| r.name.as_str()).collect();
        // "Pineapple" contains but does not start with "app"
        assert_eq!(names, vec!["Apple", "apple", "Apple Pie"]);
    }

    #[test]
    fn test_contains_hash_finds_interior_substring() {
        let index = catalog();
        let outcome = single(
            index
                .search("pp", SearchMode::Contains, IndexStructure::Hash)
                .unwrap(),
        );
        assert_eq!(outcome.total_hits, 4);
    }

    #[test]
    fn test_contains_trie_fallback_matches_hash_membership() {
        let index = catalog();
        let SearchResults::Both { hash, trie } = index
            .search("apple", SearchMode::Contains, IndexStructure::Both)
            .unwrap()
        else {
            panic!("expected both outcomes");
        };
        let mut hash_names: Vec<String> = hash.hits.iter().map(|r| r.key()).collect();
        let mut trie_names: Vec<String> = trie.hits.iter().map(|r| r.key()).collect();
        hash_names.sort();
        trie_names.sort();
        assert_eq!(hash_names, trie_names);
    }

    #[test]
    fn test_prefix_no_match_returns_empty_not_error() {
        let index = catalog();
        let outcome = single(index.search("pp", SearchMode::Prefix, IndexStructure::Trie).unwrap());
        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.total_hits, 0);
    }

    #[test]
    fn test_result_cap_preserves_traversal_order() {
        let records: Vec<Record> = (0..30).map(|i| rec(&format!("food {i:02}"))).collect();
        let index = CatalogIndex::build(records).unwrap().with_max_results(5);
        let outcome = single(index.search("food", SearchMode::Prefix, IndexStructure::Trie).unwrap());
        assert_eq!(outcome.hits.len(), 5);
        assert_eq!(outcome.total_hits, 30);
        assert_eq!(outcome.hits[0].name, "food 00");
        assert_eq!(outcome.hits[4].name, "food 04");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn catalog_strategy() -> impl Strategy<Value = Vec<Record>> {
            proptest::collection::vec("[a-zA-Z ]{1,10}", 1..25).prop_map(|names| {
                names
                    .into_iter()
                    .filter(|n| !n.trim().is_empty())
                    .map(Record::zeroed)
                    .collect::<Vec<_>>()
            })
        }

        proptest! {
            #[test]
            fn prop_exact_finds_every_record_in_both_structures(records in catalog_strategy()) {
                prop_assume!(!records.is_empty());
                let index = CatalogIndex::build(records.clone()).unwrap().with_max_results(1000);
                for record in &records {
                    for structure in [IndexStructure::Hash, IndexStructure::Trie] {
                        let outcome = single(
                            index.search(&record.name, SearchMode::Exact, structure).unwrap(),
                        );
                        prop_assert!(outcome.hits.iter().any(|h| h.key() == record.key()));
                    }
                }
            }

            #[test]
            fn prop_trie_prefix_is_exactly_the_prefix_subset(
                records in catalog_strategy(),
                query in "[a-z]{1,3}",
            ) {
                prop_assume!(!records.is_empty());
                let index = CatalogIndex::build(records.clone()).unwrap().with_max_results(1000);
                let expected = records
                    .iter()
                    .filter(|r| r.key().starts_with(&query))
                    .count();

                let outcome = single(
                    index.search(&query, SearchMode::Prefix, IndexStructure::Trie).unwrap(),
                );
                prop_assert_eq!(outcome.total_hits, expected);
                for hit in &outcome.hits {
                    prop_assert!(hit.key().starts_with(&query));
                }
            }

            #[test]
            fn prop_hash_contains_is_exactly_the_substring_subset(
                records in catalog_strategy(),
                query in "[a-z]{1,3}",
            ) {
                prop_assume!(!records.is_empty());
                let index = CatalogIndex::build(records.clone()).unwrap().with_max_results(1000);
                let expected = records
                    .iter()
                    .filter(|r| r.key().contains(&query))
                    .count();

                let outcome = single(
                    index.search(&query, SearchMode::Contains, IndexStructure::Hash).unwrap(),
                );
                prop_assert_eq!(outcome.total_hits, expected);
                for hit in &outcome.hits {
                    prop_assert!(hit.key().contains(&query));
                }
            }
        }
    }

    #[test]
    fn test_stats() {
        let stats = catalog().stats();
        assert_eq!(stats.records, 5);
        assert_eq!(stats.distinct_names, 4);
        assert_eq!(stats.max_group_len, 2);
        assert!(stats.trie_nodes > 1);
    }
}
