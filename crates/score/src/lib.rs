//! Nutrient scoring for mealscore.
//!
//! Reduces a record's nutrient vector to a bounded integer score in 1..=10:
//! four negative classifications (energy, saturated fat, sugar, sodium) minus
//! two positive classifications (protein, fiber), subtracted from 10 and
//! clamped. The function is pure and total over the record invariant domain,
//! so any record the catalog can produce scores without error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod ladder;

use mealscore_core::Record;
use serde::{Deserialize, Serialize};

/// Highest possible score.
pub const MAX_SCORE: u8 = 10;
/// Lowest possible score.
pub const MIN_SCORE: u8 = 1;

/// Per-component point breakdown of a score.
///
/// Negative components each fall in 0..=10, positive in 0..=5. Kept around
/// for display; the numeric contract is `score()` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Energy points from the kJ ladder
    pub energy: u32,
    /// Saturated fat points
    pub satfat: u32,
    /// Sugar points
    pub sugar: u32,
    /// Sodium points
    pub sodium: u32,
    /// Protein points
    pub protein: u32,
    /// Fiber points
    pub fiber: u32,
}

impl ScoreBreakdown {
    /// Sum of the four negative classifications.
    pub fn negative(&self) -> u32 {
        self.energy + self.satfat + self.sugar + self.sodium
    }

    /// Sum of the two positive classifications.
    pub fn positive(&self) -> u32 {
        self.protein + self.fiber
    }

    /// Final score: 10 - (negative - positive), clamped to 1..=10.
    pub fn score(&self) -> u8 {
        let raw = 10 - (self.negative() as i32 - self.positive() as i32);
        raw.clamp(MIN_SCORE as i32, MAX_SCORE as i32) as u8
    }
}

/// Classify every component of a record against its ladder.
pub fn breakdown(record: &Record) -> ScoreBreakdown {
    ScoreBreakdown {
        energy: ladder::classify(record.energy_kj(), &ladder::ENERGY_KJ),
        satfat: ladder::classify(record.satfat, &ladder::SATFAT_G),
        sugar: ladder::classify(record.sugar, &ladder::SUGAR_G),
        sodium: ladder::classify(record.sodium, &ladder::SODIUM_MG),
        protein: ladder::classify(record.protein, &ladder::PROTEIN_G),
        fiber: ladder::classify(record.fiber, &ladder::FIBER_G),
    }
}

/// Score a record on the 1..=10 scale.
pub fn score(record: &Record) -> u8 {
    breakdown(record).score()
}

/// Display feedback for a score.
///
/// Five fixed buckets; the sentences are part of the behavioral contract
/// with the presentation layer and must not be reworded.
pub fn feedback(score: u8) -> &'static str {
    if score >= 9 {
        "Excellent! Very nutritious choice."
    } else if score >= 7 {
        "Good! This is a healthy option."
    } else if score >= 5 {
        "Moderate. Could be balanced with healthier foods."
    } else if score >= 3 {
        "Below average. Consider healthier alternatives."
    } else {
        "Poor nutritional value. Try to limit consumption."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn apple() -> Record {
        Record::new("Apple", 52.0, 0.3, 0.2, 14.0, 10.0, 2.4, 0.0, 1.0)
    }

    #[test]
    fn test_apple_worked_example() {
        // 52 kcal = 217.6 kJ -> 0, satfat 0 -> 0, sugar 10 -> 2, sodium 1 -> 0;
        // protein 0.3 -> 0, fiber 2.4 <= 2.8 -> 2; 10 - (2 - 2) = 10.
        let b = breakdown(&apple());
        assert_eq!(b.energy, 0);
        assert_eq!(b.satfat, 0);
        assert_eq!(b.sugar, 2);
        assert_eq!(b.sodium, 0);
        assert_eq!(b.protein, 0);
        assert_eq!(b.fiber, 2);
        assert_eq!(b.negative(), 2);
        assert_eq!(b.positive(), 2);
        assert_eq!(score(&apple()), 10);
    }

    #[test]
    fn test_zero_record_scores_without_error() {
        let r = Record::zeroed("Nothing");
        assert_eq!(score(&r), 10);
    }

    #[test]
    fn test_worst_case_clamps_to_one() {
        let r = Record::new("Junk", 900.0, 0.0, 50.0, 80.0, 60.0, 0.0, 30.0, 2000.0);
        assert_eq!(score(&r), 1);
    }

    #[test]
    fn test_feedback_buckets() {
        assert_eq!(feedback(10), "Excellent! Very nutritious choice.");
        assert_eq!(feedback(9), "Excellent! Very nutritious choice.");
        assert_eq!(feedback(8), "Good! This is a healthy option.");
        assert_eq!(feedback(7), "Good! This is a healthy option.");
        assert_eq!(feedback(6), "Moderate. Could be balanced with healthier foods.");
        assert_eq!(feedback(5), "Moderate. Could be balanced with healthier foods.");
        assert_eq!(feedback(4), "Below average. Consider healthier alternatives.");
        assert_eq!(feedback(3), "Below average. Consider healthier alternatives.");
        assert_eq!(feedback(2), "Poor nutritional value. Try to limit consumption.");
        assert_eq!(feedback(1), "Poor nutritional value. Try to limit consumption.");
    }

    proptest! {
        #[test]
        fn prop_score_always_in_bounds(
            kcal in 0.0f64..5000.0,
            protein in 0.0f64..200.0,
            fat in 0.0f64..200.0,
            carbs in 0.0f64..200.0,
            sugar in 0.0f64..200.0,
            fiber in 0.0f64..100.0,
            satfat in 0.0f64..100.0,
            sodium in 0.0f64..10_000.0,
        ) {
            let r = Record::new("any", kcal, protein, fat, carbs, sugar, fiber, satfat, sodium);
            let s = score(&r);
            prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&s));
        }

        #[test]
        fn prop_negative_components_bounded(kcal in 0.0f64..10_000.0, sodium in 0.0f64..50_000.0) {
            let r = Record::new("any", kcal, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, sodium);
            let b = breakdown(&r);
            prop_assert!(b.energy <= 10);
            prop_assert!(b.sodium <= 10);
        }
    }
}
