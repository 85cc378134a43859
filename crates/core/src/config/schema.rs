//! Configuration schema definitions
//!
//! Shared configuration types for the catalog, search and meal layers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub meal: MealConfig,
}

/// Catalog data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the nutrition CSV file
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("nutrition.csv")
}

/// Search behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results returned per structure
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    20
}

/// Meal session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealConfig {
    /// Serving size in grams assumed when none is given
    #[serde(default = "default_serving_grams")]
    pub default_serving_grams: f64,

    /// Directory where meal snapshots are stored
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
}

impl Default for MealConfig {
    fn default() -> Self {
        Self {
            default_serving_grams: default_serving_grams(),
            store_dir: None,
        }
    }
}

fn default_serving_grams() -> f64 {
    100.0
}
