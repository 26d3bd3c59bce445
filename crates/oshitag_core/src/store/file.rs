//! JSON file-backed collection store.
//!
//! # Responsibility
//! - Load the persisted document, running schema validation and repair.
//! - Save atomically so a crash mid-write never corrupts the document.
//!
//! # Invariants
//! - A missing file loads as the default empty document.
//! - Saves are write-temp-then-rename within the target directory.

use crate::store::schema::{validate_and_repair, RawStoreData, StoreData};
use crate::store::{CollectionStore, StoreError, StoreResult};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Collection store persisting one pretty-printed JSON document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given document path.
    ///
    /// The file does not need to exist yet; the parent directory is created
    /// on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, falling back to the empty default when the file
    /// is unreadable or corrupt.
    ///
    /// This mirrors the shell's startup behavior: a broken store should
    /// never block the user, only cost them the broken data.
    pub fn load_or_default(&self) -> StoreData {
        match self.load() {
            Ok(data) => data,
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback path={} error={}",
                    self.path.display(),
                    err
                );
                StoreData::default()
            }
        }
    }
}

impl CollectionStore for JsonFileStore {
    fn load(&self) -> StoreResult<StoreData> {
        if !self.path.exists() {
            info!(
                "event=store_load module=store status=ok path={} mode=fresh",
                self.path.display()
            );
            return Ok(StoreData::default());
        }

        let text = fs::read_to_string(&self.path)?;
        let raw: RawStoreData =
            serde_json::from_str(&text).map_err(|err| StoreError::Corrupt(err.to_string()))?;
        let data = validate_and_repair(raw)?;
        info!(
            "event=store_load module=store status=ok path={} groups={} favorites={}",
            self.path.display(),
            data.collection.groups.len(),
            data.collection.favorites.len()
        );
        Ok(data)
    }

    fn save(&mut self, data: &StoreData) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(data)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes())?;
        fs::rename(&tmp_path, &self.path)?;

        info!(
            "event=store_save module=store status=ok path={} groups={} favorites={}",
            self.path.display(),
            data.collection.groups.len(),
            data.collection.favorites.len()
        );
        Ok(())
    }
}
