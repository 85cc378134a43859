//! Named meal snapshot persistence.
//!
//! A snapshot freezes a meal at save time: the scaled items, the computed
//! total, score and feedback. Snapshots live in a key-ordered store; the
//! core defines only the value shape, so the store is a trait with an
//! in-memory implementation for tests and a one-file-per-snapshot JSON
//! implementation for real sessions.

use crate::error::{MealError, Result};
use crate::meal::Meal;
use crate::scale::ScaledRecord;
use chrono::{DateTime, Utc};
use mealscore_core::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// A saved meal keyed by identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSnapshot {
    /// Store key
    pub id: String,
    /// Display name chosen at save time
    pub name: String,
    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,
    /// Scaled items in append order
    pub items: Vec<ScaledRecord>,
    /// Field-wise total at save time
    pub total: Record,
    /// Score of the total
    pub score: u8,
    /// Feedback text for the score
    pub feedback: String,
}

impl MealSnapshot {
    /// Freeze a meal under the given display name.
    ///
    /// A missing id gets a generated UUID. Fails with `EmptyMeal` if there
    /// is nothing to save.
    pub fn capture(meal: &mut Meal, id: Option<String>, name: impl Into<String>) -> Result<Self> {
        let scored = meal.score()?;
        let id = match id {
            Some(id) => validate_id(id)?,
            None => uuid::Uuid::new_v4().to_string(),
        };

        Ok(Self {
            id,
            name: name.into(),
            saved_at: Utc::now(),
            items: meal.items().to_vec(),
            total: scored.total,
            score: scored.score,
            feedback: scored.feedback,
        })
    }

    /// Rebuild a live meal from this snapshot's items.
    pub fn restore(&self) -> Meal {
        Meal::from_items(self.items.clone())
    }
}

fn validate_id(id: String) -> Result<String> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if ok {
        Ok(id)
    } else {
        Err(MealError::InvalidSnapshotId(id))
    }
}

/// Key-ordered snapshot storage.
pub trait MealStore {
    /// Insert or replace a snapshot under its id.
    fn put(&mut self, snapshot: &MealSnapshot) -> Result<()>;
    /// Fetch a snapshot by id.
    fn get(&self, id: &str) -> Result<MealSnapshot>;
    /// All snapshots in ascending id order.
    fn list(&self) -> Result<Vec<MealSnapshot>>;
    /// Delete a snapshot by id.
    fn remove(&mut self, id: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: BTreeMap<String, MealSnapshot>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MealStore for MemoryStore {
    fn put(&mut self, snapshot: &MealSnapshot) -> Result<()> {
        self.snapshots.insert(snapshot.id.clone(), snapshot.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<MealSnapshot> {
        self.snapshots
            .get(id)
            .cloned()
            .ok_or_else(|| MealError::SnapshotNotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<MealSnapshot>> {
        Ok(self.snapshots.values().cloned().collect())
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        self.snapshots
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MealError::SnapshotNotFound(id.to_string()))
    }
}

/// One JSON file per snapshot under a store directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open the default per-user store location.
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".mealscore"))
            .join("mealscore")
            .join("meals");
        Self::open(dir)
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl MealStore for JsonFileStore {
    fn put(&mut self, snapshot: &MealSnapshot) -> Result<()> {
        let path = self.path_for(&snapshot.id);
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json)?;
        debug!(id = %snapshot.id, path = %path.display(), "snapshot saved");
        Ok(())
    }

    fn get(&self, id: &str) -> Result<MealSnapshot> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(MealError::SnapshotNotFound(id.to_string()));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn list(&self) -> Result<Vec<MealSnapshot>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();

        ids.iter().map(|id| self.get(id)).collect()
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(MealError::SnapshotNotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}
