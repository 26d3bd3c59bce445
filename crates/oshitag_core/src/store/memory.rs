//! In-memory collection store for tests and embedding shells.

use crate::store::schema::StoreData;
use crate::store::{CollectionStore, StoreResult};

/// Store keeping the document in process memory only.
///
/// The in-memory analog of [`crate::store::JsonFileStore`]; used by tests
/// and by shells that manage durability themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    /// Creates a store seeded with the given document.
    pub fn with_data(data: StoreData) -> Self {
        Self { data }
    }

    /// Returns the last saved document.
    pub fn data(&self) -> &StoreData {
        &self.data
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self) -> StoreResult<StoreData> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &StoreData) -> StoreResult<()> {
        self.data = data.clone();
        Ok(())
    }
}
