//! Dual-structure food name indexing for mealscore.
//!
//! This crate provides:
//! - Hash grouping by case-folded name (exact lookup, linear prefix/substring scans)
//! - Character trie (native exact and prefix, documented contains fallback)
//! - Unified query dispatch with per-structure timing for comparative display
//! - Background build with not-ready signaling

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod catalog;
mod error;
mod handle;
mod hash_index;
mod trie;

pub use catalog::{
    CatalogIndex, CatalogStats, IndexStructure, SearchMode, SearchOutcome, SearchResults,
    DEFAULT_MAX_RESULTS,
};
pub use error::{Result, SearchError};
pub use handle::IndexHandle;
pub use hash_index::HashIndex;
pub use trie::TrieIndex;
