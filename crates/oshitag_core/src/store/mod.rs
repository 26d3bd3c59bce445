//! Versioned persistence for the collection document.
//!
//! # Responsibility
//! - Define the persisted schema and its deterministic repair/migration.
//! - Provide file-backed and in-memory store implementations.
//!
//! # Invariants
//! - Schema version is tracked explicitly in the persisted document.
//! - Core code never sees un-repaired persisted state: every load path
//!   runs `validate_and_repair` before handing data out.
//! - Documents newer than `SCHEMA_VERSION` are rejected, not guessed at.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;
pub mod schema;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use schema::{validate_and_repair, RawStoreData, StoreData, SCHEMA_VERSION};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer error for the collection store.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    /// The persisted document is not syntactically valid JSON, or its
    /// top-level shape cannot be decoded at all.
    Corrupt(String),
    UnsupportedSchemaVersion {
        found: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Corrupt(message) => write!(f, "corrupt store document: {message}"),
            Self::UnsupportedSchemaVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "store schema version {found} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Corrupt(_) => None,
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Storage interface for the whole collection document.
///
/// Loads always return fully repaired, invariant-satisfying data. Saves
/// replace the whole document; there is no partial write surface.
pub trait CollectionStore {
    fn load(&self) -> StoreResult<StoreData>;
    fn save(&mut self, data: &StoreData) -> StoreResult<()>;
}
