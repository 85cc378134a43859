//! Catalog ingestion from delimited text.
//!
//! The catalog source is a CSV with at least nine positional fields per row:
//! name, then kcal, protein, fat, carbs, sugar, fiber, saturated fat, sodium.
//! Rows with fewer than nine fields are discarded; numeric fields that fail
//! to parse become 0. The core never sees a malformed record.

use crate::error::Result;
use crate::record::Record;
use std::path::Path;
use tracing::{debug, info};

/// Number of positional fields a usable row must carry.
const MIN_FIELDS: usize = 9;

/// Load all records from a CSV file.
///
/// A leading header row (one whose numeric columns all fail to parse) is
/// detected and skipped. The returned sequence preserves file order, which
/// the indexes rely on for insertion-order grouping.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut first_row = true;

    for row in reader.records() {
        let row = row?;

        if row.len() < MIN_FIELDS {
            skipped += 1;
            first_row = false;
            continue;
        }

        if first_row && looks_like_header(&row) {
            debug!("skipping header row");
            first_row = false;
            continue;
        }
        first_row = false;

        let name = row.get(0).unwrap_or("").trim();
        if name.is_empty() {
            skipped += 1;
            continue;
        }

        records.push(Record::new(
            name,
            numeric_field(&row, 1),
            numeric_field(&row, 2),
            numeric_field(&row, 3),
            numeric_field(&row, 4),
            numeric_field(&row, 5),
            numeric_field(&row, 6),
            numeric_field(&row, 7),
            numeric_field(&row, 8),
        ));
    }

    info!(
        path = %path.display(),
        loaded = records.len(),
        skipped,
        "catalog ingested"
    );

    Ok(records)
}

/// Parse a numeric column, defaulting empty or unparsable values to 0.
fn numeric_field(row: &csv::StringRecord, index: usize) -> f64 {
    row.get(index)
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// A header row is one where none of the eight numeric columns parses.
fn looks_like_header(row: &csv::StringRecord) -> bool {
    (1..MIN_FIELDS).all(|i| {
        row.get(i)
            .map(str::trim)
            .and_then(|s| s.parse::<f64>().ok())
            .is_none()
    })
}
