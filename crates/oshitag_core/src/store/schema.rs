//! Persisted schema, validation, and legacy migration.
//!
//! # Responsibility
//! - Pin the on-disk document shape to an explicit schema version.
//! - Repair partially-filled or hand-edited documents deterministically.
//! - Migrate the legacy v1 shape (`combos`) into favorite folders.
//!
//! # Invariants
//! - `validate_and_repair` output always satisfies model invariants:
//!   fresh ids where missing, canonical tag texts, unique tags per owner,
//!   valid lowercase cheer colors, non-blank names.
//! - Repair is pure and deterministic apart from id generation for
//!   entries that never had one.

use crate::model::collection::{
    default_cheer_color, normalize_cheer_color, Collection, FavoriteFolder, FolderId, Group,
    GroupId, Idol, Selection,
};
use crate::model::tag::{normalize_tag_text, Tag};
use crate::store::{StoreError, StoreResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Current persisted document version.
pub const SCHEMA_VERSION: u32 = 2;

const FALLBACK_GROUP_NAME: &str = "Untitled group";
const FALLBACK_IDOL_NAME: &str = "Untitled idol";
const FALLBACK_FOLDER_NAME: &str = "Untitled folder";

/// Fully validated persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    pub version: u32,
    pub ui: Selection,
    #[serde(flatten)]
    pub collection: Collection,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            ui: Selection::default(),
            collection: Collection::default(),
        }
    }
}

impl StoreData {
    /// Repoints dangling or missing active selections at the first group
    /// and first favorite folder.
    pub fn ensure_selection(&mut self) {
        let group_valid = self
            .ui
            .active_group
            .is_some_and(|id| self.collection.group(id).is_some());
        if !group_valid {
            self.ui.active_group = self.collection.groups.first().map(|group| group.id);
        }

        let fav_valid = self
            .ui
            .active_fav
            .is_some_and(|id| self.collection.folder(id).is_some());
        if !fav_valid {
            self.ui.active_fav = self.collection.favorites.first().map(|folder| folder.id);
        }
    }
}

/// Permissive decode mirror of the persisted document.
///
/// Every field is optional so partially written or hand-edited files still
/// decode; `validate_and_repair` turns this into a [`StoreData`]. The
/// legacy v1 `combos` field is accepted and migrated.
#[derive(Debug, Default, Deserialize)]
pub struct RawStoreData {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub ui: RawSelection,
    #[serde(default)]
    pub groups: Vec<RawGroup>,
    #[serde(default)]
    pub favorites: Vec<RawFolder>,
    /// Legacy v1 name for favorite folders.
    #[serde(default)]
    pub combos: Vec<RawFolder>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSelection {
    #[serde(default, rename = "activeGroupId")]
    pub active_group: Option<String>,
    #[serde(default, rename = "activeFavId")]
    pub active_fav: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub idols: Vec<RawIdol>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawIdol {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "cheerColor")]
    pub cheer_color: Option<String>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFolder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTag {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Validates a decoded document and repairs it into canonical form.
///
/// Deterministic repair rules:
/// - missing/unparseable ids get fresh uuids;
/// - blank names fall back to `Untitled ...` placeholders;
/// - cheer colors are canonicalized, invalid values reset to the default;
/// - tag texts are re-normalized, empties dropped, duplicates removed
///   case-insensitively keeping the first occurrence;
/// - legacy v1 `combos` are appended to favorites;
/// - active selections are repointed at the first entries when dangling.
///
/// # Errors
/// Returns `StoreError::UnsupportedSchemaVersion` when the document claims
/// a version newer than [`SCHEMA_VERSION`].
pub fn validate_and_repair(raw: RawStoreData) -> StoreResult<StoreData> {
    let version = raw.version.unwrap_or(SCHEMA_VERSION);
    if version > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            found: version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    let mut repaired = 0usize;
    let mut collection = Collection::default();

    for raw_group in raw.groups {
        let mut group = Group {
            id: parse_or_new_id(raw_group.id.as_deref(), &mut repaired),
            name: repair_name(raw_group.name.as_deref(), FALLBACK_GROUP_NAME, &mut repaired),
            idols: Vec::new(),
        };
        for raw_idol in raw_group.idols {
            group.idols.push(repair_idol(raw_idol, &mut repaired));
        }
        collection.groups.push(group);
    }

    for raw_folder in raw.favorites.into_iter().chain(raw.combos) {
        collection.favorites.push(repair_folder(raw_folder, &mut repaired));
    }

    let ui = Selection {
        active_group: resolve_group_selection(raw.ui.active_group.as_deref(), &collection),
        active_fav: resolve_fav_selection(raw.ui.active_fav.as_deref(), &collection),
    };

    let mut data = StoreData {
        version: SCHEMA_VERSION,
        ui,
        collection,
    };
    data.ensure_selection();

    if repaired > 0 || version < SCHEMA_VERSION {
        warn!(
            "event=store_repair module=store status=ok from_version={} repaired_fields={}",
            version, repaired
        );
    }

    Ok(data)
}

fn repair_idol(raw: RawIdol, repaired: &mut usize) -> Idol {
    let cheer_color = match raw.cheer_color.as_deref().and_then(normalize_cheer_color) {
        Some(color) => color,
        None => {
            if raw.cheer_color.is_some() {
                *repaired += 1;
            }
            default_cheer_color()
        }
    };
    Idol {
        id: parse_or_new_id(raw.id.as_deref(), repaired),
        name: repair_name(raw.name.as_deref(), FALLBACK_IDOL_NAME, repaired),
        cheer_color,
        tags: repair_tags(raw.tags, repaired),
    }
}

fn repair_folder(raw: RawFolder, repaired: &mut usize) -> FavoriteFolder {
    FavoriteFolder {
        id: parse_or_new_id(raw.id.as_deref(), repaired),
        name: repair_name(raw.name.as_deref(), FALLBACK_FOLDER_NAME, repaired),
        tags: repair_tags(raw.tags, repaired),
    }
}

fn repair_tags(raw_tags: Vec<RawTag>, repaired: &mut usize) -> Vec<Tag> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for raw in raw_tags {
        let Some(text) = raw.text.as_deref().and_then(normalize_tag_text) else {
            *repaired += 1;
            continue;
        };
        if !seen.insert(text.to_lowercase()) {
            *repaired += 1;
            continue;
        }
        tags.push(Tag {
            id: parse_or_new_id(raw.id.as_deref(), repaired),
            text,
        });
    }
    tags
}

fn repair_name(value: Option<&str>, fallback: &str, repaired: &mut usize) -> String {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => {
            *repaired += 1;
            fallback.to_string()
        }
    }
}

fn parse_or_new_id(value: Option<&str>, repaired: &mut usize) -> Uuid {
    match value.and_then(|text| Uuid::parse_str(text.trim()).ok()) {
        Some(id) => id,
        None => {
            *repaired += 1;
            Uuid::new_v4()
        }
    }
}

fn resolve_group_selection(value: Option<&str>, collection: &Collection) -> Option<GroupId> {
    let id = value.and_then(|text| Uuid::parse_str(text.trim()).ok())?;
    collection.group(id).map(|group| group.id)
}

fn resolve_fav_selection(value: Option<&str>, collection: &Collection) -> Option<FolderId> {
    let id = value.and_then(|text| Uuid::parse_str(text.trim()).ok())?;
    collection.folder(id).map(|folder| folder.id)
}
