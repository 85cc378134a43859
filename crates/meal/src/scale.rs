//! Serving-size scaling.
//!
//! Nutrient values are stored per 100 g; a scaled record carries the same
//! fields multiplied by `serving_grams / 100` plus the serving size itself.
//! Scaling always produces a new value; the catalog record is never touched.

use crate::error::{MealError, Result};
use mealscore_core::Record;
use serde::{Deserialize, Serialize};

/// A record adjusted to a concrete serving size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledRecord {
    /// Nutrient values for this serving
    pub record: Record,
    /// Serving size in grams
    pub serving_grams: f64,
}

/// Scale a record to a serving size in grams.
///
/// Fails with `InvalidServing` for zero or negative sizes. `scale(r, 100)`
/// reproduces the record unchanged apart from the serving tag.
pub fn scale(record: &Record, serving_grams: f64) -> Result<ScaledRecord> {
    if !serving_grams.is_finite() || serving_grams <= 0.0 {
        return Err(MealError::InvalidServing(serving_grams));
    }

    let factor = serving_grams / 100.0;
    let record = Record::new(
        record.name.clone(),
        record.kcal * factor,
        record.protein * factor,
        record.fat * factor,
        record.carbs * factor,
        record.sugar * factor,
        record.fiber * factor,
        record.satfat * factor,
        record.sodium * factor,
    );

    Ok(ScaledRecord {
        record,
        serving_grams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn apple() -> Record {
        Record::new("Apple", 52.0, 0.3, 0.2, 14.0, 10.0, 2.4, 0.0, 1.0)
    }

    #[test]
    fn test_scale_identity_at_100g() {
        let scaled = scale(&apple(), 100.0).unwrap();
        assert_eq!(scaled.record, apple());
        assert_eq!(scaled.serving_grams, 100.0);
    }

    #[test]
    fn test_scale_halves_at_50g() {
        let scaled = scale(&apple(), 50.0).unwrap();
        assert_eq!(scaled.record.kcal, 26.0);
        assert_eq!(scaled.record.fiber, 1.2);
    }

    #[test]
    fn test_scale_rejects_non_positive() {
        assert!(matches!(
            scale(&apple(), 0.0),
            Err(MealError::InvalidServing(_))
        ));
        assert!(matches!(
            scale(&apple(), -20.0),
            Err(MealError::InvalidServing(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_scaling_is_linear(grams in 0.1f64..2000.0) {
            let scaled = scale(&apple(), grams).unwrap();
            let expected = apple().kcal * grams / 100.0;
            prop_assert!((scaled.record.kcal - expected).abs() < 1e-9);
        }
    }
}
