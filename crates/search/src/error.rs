//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while building or querying the catalog index.
///
/// All of these are recoverable conditions for the immediate caller; none
/// is ever accompanied by a partial result list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Attempted to build an index over zero records
    #[error("Cannot build an index over an empty catalog")]
    EmptyCatalog,

    /// Query text was blank or whitespace-only
    #[error("Search query is empty")]
    EmptyQuery,

    /// Query arrived before a background build completed
    #[error("Catalog index is still being built")]
    IndexNotReady,
}
