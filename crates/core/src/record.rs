//! The food record value type.
//!
//! One `Record` describes a single catalog row: a display name plus eight
//! nutrient values per 100 g. Records are created at ingestion time and never
//! mutated afterwards; scaling produces a new value (see `mealscore-meal`).

use serde::{Deserialize, Serialize};

/// Conversion factor from kilocalories to kilojoules.
pub const KCAL_TO_KJ: f64 = 4.184;

/// A single food item with nutrient values per 100 g.
///
/// All numeric fields are finite and non-negative; ingestion normalizes
/// anything else to zero so the scoring tables never see a NaN or a
/// negative value. Deserialization goes through the same normalization,
/// so a hand-edited snapshot file cannot smuggle invalid values back in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Display name, original casing preserved
    pub name: String,
    /// Energy in kcal
    pub kcal: f64,
    /// Protein in g
    pub protein: f64,
    /// Total fat in g
    pub fat: f64,
    /// Carbohydrates in g
    pub carbs: f64,
    /// Sugars in g
    pub sugar: f64,
    /// Dietary fiber in g
    pub fiber: f64,
    /// Saturated fat in g
    pub satfat: f64,
    /// Sodium in mg
    pub sodium: f64,
}

impl Record {
    /// Create a record, normalizing every nutrient field to the invariant
    /// domain (finite, >= 0).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        kcal: f64,
        protein: f64,
        fat: f64,
        carbs: f64,
        sugar: f64,
        fiber: f64,
        satfat: f64,
        sodium: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kcal: sanitize(kcal),
            protein: sanitize(protein),
            fat: sanitize(fat),
            carbs: sanitize(carbs),
            sugar: sanitize(sugar),
            fiber: sanitize(fiber),
            satfat: sanitize(satfat),
            sodium: sanitize(sodium),
        }
    }

    /// An all-zero record with the given name. Used as the seed for
    /// meal aggregation.
    pub fn zeroed(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Case-folded name used for all index and comparison operations.
    ///
    /// Display keeps the original casing; everything that matches or
    /// groups by name goes through this.
    pub fn key(&self) -> String {
        fold(&self.name)
    }

    /// Energy in kilojoules (1 kcal = 4.184 kJ).
    pub fn energy_kj(&self) -> f64 {
        self.kcal * KCAL_TO_KJ
    }

    /// Field-wise accumulation of another record's nutrients.
    ///
    /// The name is left untouched; aggregation names its result explicitly.
    pub fn accumulate(&mut self, other: &Record) {
        self.kcal += other.kcal;
        self.protein += other.protein;
        self.fat += other.fat;
        self.carbs += other.carbs;
        self.sugar += other.sugar;
        self.fiber += other.fiber;
        self.satfat += other.satfat;
        self.sodium += other.sodium;
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawRecord {
            name: String,
            kcal: f64,
            protein: f64,
            fat: f64,
            carbs: f64,
            sugar: f64,
            fiber: f64,
            satfat: f64,
            sodium: f64,
        }

        let raw = RawRecord::deserialize(deserializer)?;
        Ok(Record::new(
            raw.name, raw.kcal, raw.protein, raw.fat, raw.carbs, raw.sugar, raw.fiber, raw.satfat,
            raw.sodium,
        ))
    }
}

/// Case-fold a name for indexing and comparison.
///
/// Trims surrounding whitespace as well, so a padded catalog name and a
/// padded query normalize to the same key.
pub fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}
