//! Meal aggregation for mealscore.
//!
//! This crate provides:
//! - Serving-size scaling of catalog records
//! - The session meal aggregate with cached totals and scores
//! - Named snapshot persistence through a key-ordered store

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod meal;
mod scale;
mod store;

pub use error::{MealError, Result};
pub use meal::{total, Meal, MealScore, TOTAL_NAME};
pub use scale::{scale, ScaledRecord};
pub use store::{JsonFileStore, MealSnapshot, MealStore, MemoryStore};
