//! Core types for the mealscore tools
//!
//! This crate provides the pieces every other layer builds on:
//!
//! - **Record**: the immutable nutrient-vector value type
//! - **Ingestion**: CSV catalog loading tolerant of malformed rows
//! - **Configuration**: TOML-based configuration with defaults
//! - **Error handling**: structured errors for the above
//!
//! # Example
//!
//! ```rust,no_run
//! use mealscore_core::{config::Config, ingest::load_catalog};
//!
//! let config = Config::load(None).expect("config");
//! let records = load_catalog(&config.schema.catalog.path).expect("catalog");
//! println!("loaded {} records", records.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod ingest;
pub mod record;

pub use error::{Error, Result};
pub use record::{fold, Record, KCAL_TO_KJ};
