//! Core domain logic for oshiTag.
//! This crate is the single source of truth for tag-collection invariants.

pub mod logging;
pub mod markdown;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use markdown::{export_markdown, export_markdown_now, import_markdown, FAVORITES_HEADING};
pub use model::collection::{
    default_cheer_color, normalize_cheer_color, Collection, FavoriteFolder, FolderId, Group,
    GroupId, Idol, IdolId, Selection, PRESET_COLORS,
};
pub use model::tag::{
    clipboard_text, normalize_tag_text, parse_tags_input, uniq_keep_order, Tag, TagId,
};
pub use service::collection_service::{CollectionService, ServiceError};
pub use store::{
    CollectionStore, JsonFileStore, MemoryStore, StoreData, StoreError, StoreResult,
    SCHEMA_VERSION,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
