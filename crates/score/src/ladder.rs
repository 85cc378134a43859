//! Breakpoint ladders for nutrient classification.
//!
//! Each ladder is an ascending list of thresholds mapping a raw value to a
//! discrete bucket via "value <= threshold" rules; a value above the last
//! threshold falls into the open-ended top bucket. These are fixed lookup
//! tables from the published scoring scheme, not derived formulas, so they
//! are written out verbatim.

/// Energy thresholds in kJ; buckets 0..=10.
pub const ENERGY_KJ: [f64; 10] = [
    335.0, 670.0, 1005.0, 1340.0, 1675.0, 2010.0, 2345.0, 2680.0, 3015.0, 3350.0,
];

/// Saturated fat thresholds in g; buckets 0..=10.
pub const SATFAT_G: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];

/// Sugar thresholds in g; buckets 0..=10. The 27/31/36/40 steps are the
/// published table values, not an even 4.5 spacing.
pub const SUGAR_G: [f64; 10] = [4.5, 9.0, 13.5, 18.0, 22.5, 27.0, 31.0, 36.0, 40.0, 45.0];

/// Sodium thresholds in mg; buckets 0..=10.
pub const SODIUM_MG: [f64; 10] = [
    90.0, 180.0, 270.0, 360.0, 450.0, 540.0, 630.0, 720.0, 810.0, 900.0,
];

/// Protein thresholds in g; buckets 0..=5.
pub const PROTEIN_G: [f64; 5] = [1.6, 3.2, 4.8, 6.4, 8.0];

/// Fiber thresholds in g; buckets 0..=5.
pub const FIBER_G: [f64; 5] = [0.9, 1.9, 2.8, 3.7, 4.7];

/// Classify a value against an ascending threshold ladder.
///
/// Returns the index of the first threshold the value does not exceed
/// (ties resolve to the lower bucket), or `thresholds.len()` for values
/// beyond the last threshold.
pub fn classify(value: f64, thresholds: &[f64]) -> u32 {
    for (bucket, threshold) in thresholds.iter().enumerate() {
        if value <= *threshold {
            return bucket as u32;
        }
    }
    thresholds.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_below_first() {
        assert_eq!(classify(0.0, &ENERGY_KJ), 0);
        assert_eq!(classify(335.0, &ENERGY_KJ), 0);
    }

    #[test]
    fn test_classify_tie_goes_low() {
        assert_eq!(classify(670.0, &ENERGY_KJ), 1);
        assert_eq!(classify(670.001, &ENERGY_KJ), 2);
    }

    #[test]
    fn test_classify_open_top_bucket() {
        assert_eq!(classify(10_000.0, &ENERGY_KJ), 10);
        assert_eq!(classify(100.0, &PROTEIN_G), 5);
    }

    #[test]
    fn test_sugar_irregular_steps() {
        assert_eq!(classify(27.0, &SUGAR_G), 5);
        assert_eq!(classify(30.0, &SUGAR_G), 6);
        assert_eq!(classify(31.0, &SUGAR_G), 6);
        assert_eq!(classify(33.0, &SUGAR_G), 7);
    }
}
