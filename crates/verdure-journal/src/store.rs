//! Injectable journal store: one persisted document, full read-modify-write
//! per mutation.
//!
//! The trait carries the document-update logic as provided methods over
//! `load`/`persist`/`wipe`, so the durable and in-memory implementations
//! only differ in where the document lives. The single-document discipline
//! is valid only under the orchestrator's single-writer usage; there is no
//! locking across processes.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::JournalError;
use crate::model::{DayRecord, Plant, PlantIdentity};
use crate::patch::{DayPatch, JournalPatch};

/// Days pre-populated when a journal is bootstrapped, so forward writes
/// into adjacent days land on existing keys.
pub const DEFAULT_PREPOPULATE_DAYS: u32 = 45;

pub trait JournalStore: Send + Sync {
    /// Read the whole document. `None` until the first save.
    fn load(&self) -> Result<Option<Plant>, JournalError>;

    /// Rewrite the whole document.
    fn persist(&self, plant: &Plant) -> Result<(), JournalError>;

    /// Discard the document entirely.
    fn wipe(&self) -> Result<(), JournalError>;

    fn prepopulate_days(&self) -> u32 {
        DEFAULT_PREPOPULATE_DAYS
    }

    /// Current document, no side effects.
    fn plant(&self) -> Result<Option<Plant>, JournalError> {
        self.load()
    }

    /// Merge `patch` into `days[day]`, creating the record if absent.
    fn upsert_day(&self, day: u32, patch: &DayPatch) -> Result<(), JournalError> {
        self.apply(&JournalPatch::new(day, patch.clone()))
    }

    /// Apply a primary-day patch and its propagation edges in one
    /// read-modify-write. A no-op when no document exists yet.
    fn apply(&self, patch: &JournalPatch) -> Result<(), JournalError> {
        let Some(mut plant) = self.load()? else {
            return Ok(());
        };
        merge_day(&mut plant, patch.day, &patch.patch);
        for edge in &patch.propagations {
            debug!(
                kind = ?edge.kind,
                from = patch.day,
                to = edge.target_day,
                "applying propagation edge"
            );
            merge_day(&mut plant, edge.target_day, &edge.patch);
        }
        self.persist(&plant)
    }

    /// Move the pointer to `day`, creating the journal (with a pre-populated
    /// day range) if it does not exist, and ensuring `days[day]` exists.
    fn set_current_day(&self, day: u32, identity: &PlantIdentity) -> Result<(), JournalError> {
        let mut plant = match self.load()? {
            Some(mut plant) => {
                plant.name = identity.name.clone();
                plant.city = identity.city.clone();
                plant.indoor_location = identity.indoor_location.clone();
                plant.current_day = day;
                plant
            }
            None => Plant::bootstrap(identity, day, self.prepopulate_days()),
        };
        plant.days.entry(day).or_insert_with(DayRecord::default);
        self.persist(&plant)
    }

    /// Write the plant-level description. A no-op when no document exists.
    fn set_about(&self, about: &str) -> Result<(), JournalError> {
        let Some(mut plant) = self.load()? else {
            return Ok(());
        };
        plant.about = Some(about.to_string());
        self.persist(&plant)
    }

    /// Discard everything.
    fn reset(&self) -> Result<(), JournalError> {
        self.wipe()
    }
}

fn merge_day(plant: &mut Plant, day: u32, patch: &DayPatch) {
    patch.merge_into(plant.days.entry(day).or_insert_with(DayRecord::default));
}

// ─────────────────────────────────────────────
// FileJournalStore
// ─────────────────────────────────────────────

/// Durable store: one pretty-printed JSON document on disk, rewritten in
/// full on every mutation via a temp-file rename.
pub struct FileJournalStore {
    path: PathBuf,
    prepopulate: u32,
}

impl FileJournalStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_prepopulate(path, DEFAULT_PREPOPULATE_DAYS)
    }

    pub fn with_prepopulate(path: impl AsRef<Path>, prepopulate: u32) -> Self {
        FileJournalStore { path: path.as_ref().to_path_buf(), prepopulate }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JournalStore for FileJournalStore {
    fn load(&self) -> Result<Option<Plant>, JournalError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read(&self.path)?;
        Ok(Some(serde_json::from_slice(&data)?))
    }

    fn persist(&self, plant: &Plant) -> Result<(), JournalError> {
        let json = serde_json::to_vec_pretty(plant)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), bytes = json.len(), "journal persisted");
        Ok(())
    }

    fn wipe(&self) -> Result<(), JournalError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn prepopulate_days(&self) -> u32 {
        self.prepopulate
    }
}

// ─────────────────────────────────────────────
// MemoryJournalStore
// ─────────────────────────────────────────────

/// In-memory store for tests and ephemeral runs.
pub struct MemoryJournalStore {
    doc: Mutex<Option<Plant>>,
    prepopulate: u32,
}

impl MemoryJournalStore {
    pub fn new() -> Self {
        MemoryJournalStore { doc: Mutex::new(None), prepopulate: DEFAULT_PREPOPULATE_DAYS }
    }

    pub fn with_prepopulate(prepopulate: u32) -> Self {
        MemoryJournalStore { doc: Mutex::new(None), prepopulate }
    }
}

impl JournalStore for MemoryJournalStore {
    fn load(&self) -> Result<Option<Plant>, JournalError> {
        Ok(self.doc.lock().expect("journal lock poisoned").clone())
    }

    fn persist(&self, plant: &Plant) -> Result<(), JournalError> {
        *self.doc.lock().expect("journal lock poisoned") = Some(plant.clone());
        Ok(())
    }

    fn wipe(&self) -> Result<(), JournalError> {
        *self.doc.lock().expect("journal lock poisoned") = None;
        Ok(())
    }

    fn prepopulate_days(&self) -> u32 {
        self.prepopulate
    }
}
