//! Error types for meal aggregation and snapshot storage.

use thiserror::Error;

/// Result type alias for meal operations.
pub type Result<T> = std::result::Result<T, MealError>;

/// Errors that can occur while scaling, aggregating or persisting meals.
#[derive(Debug, Error)]
pub enum MealError {
    /// Scoring or totaling requested on a meal with no items
    #[error("Meal is empty; add foods first")]
    EmptyMeal,

    /// Serving size was zero or negative
    #[error("Invalid serving size: {0} g (must be positive)")]
    InvalidServing(f64),

    /// No snapshot stored under the given identifier
    #[error("No meal snapshot with id '{0}'")]
    SnapshotNotFound(String),

    /// Snapshot identifier contains characters unsafe for a store key
    #[error("Invalid snapshot id '{0}': use letters, digits, '.', '_' or '-'")]
    InvalidSnapshotId(String),

    /// Filesystem error from the file-backed store
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failure
    #[error("Snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
