//! Collection domain model: groups, idols, and favorite folders.
//!
//! # Responsibility
//! - Define the canonical in-memory hierarchy owned by the app shell.
//! - Keep tag-list uniqueness helpers next to the types that need them.
//!
//! # Invariants
//! - Every entity carries a stable uuid identity.
//! - Tag lists of one idol or one folder never contain two entries whose
//!   canonical text matches case-insensitively.
//! - Sequence order is user-controlled and significant everywhere.

use crate::model::tag::{normalize_tag_text, Tag};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable identifier for one group.
pub type GroupId = Uuid;
/// Stable identifier for one idol.
pub type IdolId = Uuid;
/// Stable identifier for one favorite folder.
pub type FolderId = Uuid;

/// Common penlight cheer colors offered by the shell.
///
/// Not an official standard; meant to cover the usual set. The first entry
/// doubles as the default color for new and imported idols.
pub const PRESET_COLORS: &[&str] = &[
    "#ff1744", "#ff3b30", "#ff5252", "#ff6d00", "#ff8f00", "#ffab00", "#ffd600", "#ffea00",
    "#00c853", "#00e676", "#64dd17", "#00b8d4", "#00e5ff", "#18ffff", "#2979ff", "#2962ff",
    "#304ffe", "#651fff", "#7c4dff", "#b388ff", "#f50057", "#ff4081", "#ff80ab", "#ffffff",
    "#fff4d6",
];

static CHEER_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid cheer color regex"));

/// Returns the default cheer color for new idols.
pub fn default_cheer_color() -> String {
    PRESET_COLORS[0].to_string()
}

/// Validates and canonicalizes one cheer color value.
///
/// Accepts `#rrggbb` in any case and returns the lowercase form. Anything
/// else (wrong length, missing `#`, shorthand hex) is rejected.
pub fn normalize_cheer_color(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if CHEER_COLOR_RE.is_match(trimmed) {
        Some(trimmed.to_lowercase())
    } else {
        None
    }
}

/// A named entity carrying a cheer color and an ordered unique tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idol {
    pub id: IdolId,
    pub name: String,
    /// Lowercase `#rrggbb` display color. Serialized as `cheerColor` to
    /// match the persisted v2 schema naming.
    #[serde(rename = "cheerColor")]
    pub cheer_color: String,
    pub tags: Vec<Tag>,
}

impl Idol {
    /// Creates an idol with the default cheer color and no tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            cheer_color: default_cheer_color(),
            tags: Vec::new(),
        }
    }

    /// Appends canonical tags that are not already present.
    ///
    /// Dedup is case-insensitive against both existing entries and earlier
    /// entries of the same batch. Returns how many tags were added.
    pub fn add_tags<I>(&mut self, canonical: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        append_unique_tags(&mut self.tags, canonical)
    }
}

/// A named, ordered collection of idols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub idols: Vec<Idol>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            idols: Vec::new(),
        }
    }

    /// All tags of all idols in this group, in display order.
    pub fn all_tags(&self) -> Vec<Tag> {
        self.idols
            .iter()
            .flat_map(|idol| idol.tags.iter().cloned())
            .collect()
    }
}

/// A named tag list independent of the group hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteFolder {
    pub id: FolderId,
    pub name: String,
    pub tags: Vec<Tag>,
}

impl FavoriteFolder {
    /// Creates an empty favorite folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tags: Vec::new(),
        }
    }

    /// Appends canonical tags that are not already present.
    ///
    /// Same dedup contract as [`Idol::add_tags`].
    pub fn add_tags<I>(&mut self, canonical: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        append_unique_tags(&mut self.tags, canonical)
    }
}

/// Root hierarchy: ordered groups plus ordered favorite folders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub groups: Vec<Group>,
    pub favorites: Vec<FavoriteFolder>,
}

impl Collection {
    /// Finds one group by id.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Finds one group by id, mutably.
    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    /// Finds one favorite folder by id.
    pub fn folder(&self, id: FolderId) -> Option<&FavoriteFolder> {
        self.favorites.iter().find(|folder| folder.id == id)
    }

    /// Finds one favorite folder by id, mutably.
    pub fn folder_mut(&mut self, id: FolderId) -> Option<&mut FavoriteFolder> {
        self.favorites.iter_mut().find(|folder| folder.id == id)
    }

    /// Recent-first tag suggestions drawn from the group hierarchy.
    ///
    /// Scans idols and their tags in reverse insertion order so the most
    /// recently added tags surface first; the preferred group (usually the
    /// active one) is scanned before the rest. Case-insensitive dedup,
    /// capped at `limit`.
    pub fn suggested_tags(&self, prefer_group: Option<GroupId>, limit: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        let mut scan = |group: &Group, out: &mut Vec<String>, seen: &mut HashSet<String>| {
            for idol in group.idols.iter().rev() {
                for tag in idol.tags.iter().rev() {
                    if let Some(normalized) = normalize_tag_text(&tag.text) {
                        if seen.insert(normalized.to_lowercase()) {
                            out.push(normalized);
                        }
                    }
                }
            }
        };

        let preferred = prefer_group.and_then(|id| self.group(id));
        if let Some(group) = preferred {
            scan(group, &mut out, &mut seen);
        }
        for group in self.groups.iter().rev() {
            if preferred.is_some_and(|preferred| preferred.id == group.id) {
                continue;
            }
            scan(group, &mut out, &mut seen);
        }

        out.truncate(limit);
        out
    }
}

/// Persisted UI selection: which group tab and favorites tab are active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "activeGroupId")]
    pub active_group: Option<GroupId>,
    #[serde(rename = "activeFavId")]
    pub active_fav: Option<FolderId>,
}

fn append_unique_tags<I>(tags: &mut Vec<Tag>, canonical: I) -> usize
where
    I: IntoIterator<Item = String>,
{
    let mut existing: HashSet<String> = tags
        .iter()
        .filter_map(|tag| normalize_tag_text(&tag.text))
        .map(|text| text.to_lowercase())
        .collect();

    let mut added = 0;
    for text in canonical {
        let Some(normalized) = normalize_tag_text(&text) else {
            continue;
        };
        if existing.insert(normalized.to_lowercase()) {
            tags.push(Tag::new(normalized));
            added += 1;
        }
    }
    added
}
