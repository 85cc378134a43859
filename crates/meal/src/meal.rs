//! The session meal aggregate.
//!
//! A meal is an ordered sequence of scaled records owned by one session.
//! Totals and the score are computed lazily and cached; any mutation
//! invalidates the cache. The total record carries no serving size since an
//! aggregate has no single serving.

use crate::error::{MealError, Result};
use crate::scale::ScaledRecord;
use mealscore_core::Record;
use serde::{Deserialize, Serialize};

/// Name stamped on the aggregate total record.
pub const TOTAL_NAME: &str = "Your Complete Meal";

/// Computed total and score of a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealScore {
    /// Field-wise sum of every item's nutrients
    pub total: Record,
    /// Bounded 1..=10 score of the total
    pub score: u8,
    /// Display feedback for the score
    pub feedback: String,
}

/// Field-wise sum of a sequence of scaled records.
///
/// Fails with `EmptyMeal` on an empty sequence, matching the "add foods
/// first" precondition the presentation layer shows the user.
pub fn total(items: &[ScaledRecord]) -> Result<Record> {
    if items.is_empty() {
        return Err(MealError::EmptyMeal);
    }

    let mut sum = Record::zeroed(TOTAL_NAME);
    for item in items {
        sum.accumulate(&item.record);
    }
    Ok(sum)
}

/// Ordered meal owned by a single session.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Meal {
    items: Vec<ScaledRecord>,
    #[serde(skip)]
    cached: Option<MealScore>,
}

impl Meal {
    /// Create an empty meal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a meal from previously saved items.
    pub fn from_items(items: Vec<ScaledRecord>) -> Self {
        Self {
            items,
            cached: None,
        }
    }

    /// Append a scaled record.
    pub fn add(&mut self, item: ScaledRecord) {
        self.items.push(item);
        self.cached = None;
    }

    /// Remove the item at a position, returning it, or `None` if the
    /// position is out of range.
    pub fn remove(&mut self, index: usize) -> Option<ScaledRecord> {
        if index >= self.items.len() {
            return None;
        }
        self.cached = None;
        Some(self.items.remove(index))
    }

    /// Discard every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.cached = None;
    }

    /// Items in append order.
    pub fn items(&self) -> &[ScaledRecord] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no items have been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total and score, cached until the next mutation.
    pub fn score(&mut self) -> Result<MealScore> {
        if let Some(cached) = &self.cached {
            return Ok(cached.clone());
        }

        let total = total(&self.items)?;
        let score = mealscore_score::score(&total);
        let result = MealScore {
            total,
            score,
            feedback: mealscore_score::feedback(score).to_string(),
        };
        self.cached = Some(result.clone());
        Ok(result)
    }
}
