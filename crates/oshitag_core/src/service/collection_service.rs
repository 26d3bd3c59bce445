//! Collection use-case service.
//!
//! # Responsibility
//! - Provide the add/rename/delete/reorder operations behind shell actions.
//! - Keep active-selection state consistent across mutations.
//! - Persist the whole document after every successful mutation.
//!
//! # Invariants
//! - Names are trimmed; blank names are rejected before any mutation.
//! - Tag additions never introduce case-insensitive duplicates within one
//!   idol or folder.
//! - Markdown import replaces the whole document, never merges.

use crate::markdown::{export_markdown, export_markdown_now, import_markdown};
use crate::model::collection::{
    normalize_cheer_color, Collection, FavoriteFolder, FolderId, Group, GroupId, Idol, IdolId,
    Selection,
};
use crate::model::tag::{clipboard_text, parse_tags_input, TagId};
use crate::store::{CollectionStore, StoreData, StoreError};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from collection service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Name is blank after trimming.
    InvalidName,
    /// Color value is not a `#rrggbb` hex code.
    InvalidColor(String),
    GroupNotFound(GroupId),
    IdolNotFound(IdolId),
    FolderNotFound(FolderId),
    TagNotFound(TagId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::InvalidColor(value) => {
                write!(f, "invalid cheer color `{value}` (expected #rrggbb)")
            }
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::IdolNotFound(id) => write!(f, "idol not found: {id}"),
            Self::FolderNotFound(id) => write!(f, "favorite folder not found: {id}"),
            Self::TagNotFound(id) => write!(f, "tag not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Service facade owning the in-memory document and its store.
pub struct CollectionService<S: CollectionStore> {
    store: S,
    data: StoreData,
}

impl<S: CollectionStore> CollectionService<S> {
    /// Loads the document from the store and builds the service.
    pub fn new(store: S) -> Result<Self, ServiceError> {
        let data = store.load()?;
        Ok(Self { store, data })
    }

    /// Read access to the whole document.
    pub fn data(&self) -> &StoreData {
        &self.data
    }

    /// Read access to the collection hierarchy.
    pub fn collection(&self) -> &Collection {
        &self.data.collection
    }

    /// Current UI selection.
    pub fn selection(&self) -> Selection {
        self.data.ui
    }

    /// The active group, falling back to the first one.
    pub fn active_group(&self) -> Option<&Group> {
        self.data
            .ui
            .active_group
            .and_then(|id| self.data.collection.group(id))
            .or_else(|| self.data.collection.groups.first())
    }

    /// The active favorite folder, falling back to the first one.
    pub fn active_folder(&self) -> Option<&FavoriteFolder> {
        self.data
            .ui
            .active_fav
            .and_then(|id| self.data.collection.folder(id))
            .or_else(|| self.data.collection.favorites.first())
    }

    // ----- groups -----

    /// Adds a group and makes it the active one.
    pub fn add_group(&mut self, name: &str) -> Result<GroupId, ServiceError> {
        let name = normalize_name(name)?;
        let group = Group::new(name);
        let id = group.id;
        self.data.collection.groups.push(group);
        self.data.ui.active_group = Some(id);
        self.persist()?;
        Ok(id)
    }

    /// Renames one group.
    pub fn rename_group(&mut self, id: GroupId, name: &str) -> Result<(), ServiceError> {
        let name = normalize_name(name)?;
        self.group_mut(id)?.name = name;
        self.persist()
    }

    /// Deletes one group; selection falls back to the first remaining one.
    pub fn delete_group(&mut self, id: GroupId) -> Result<(), ServiceError> {
        let groups = &mut self.data.collection.groups;
        let index = groups
            .iter()
            .position(|group| group.id == id)
            .ok_or(ServiceError::GroupNotFound(id))?;
        groups.remove(index);
        if self.data.ui.active_group == Some(id) {
            self.data.ui.active_group = groups.first().map(|group| group.id);
        }
        self.persist()
    }

    /// Moves one group to the given position (clamped).
    pub fn move_group(&mut self, id: GroupId, index: usize) -> Result<(), ServiceError> {
        let groups = &mut self.data.collection.groups;
        let from = groups
            .iter()
            .position(|group| group.id == id)
            .ok_or(ServiceError::GroupNotFound(id))?;
        let group = groups.remove(from);
        let to = index.min(groups.len());
        groups.insert(to, group);
        self.persist()
    }

    /// Switches the active group tab.
    pub fn set_active_group(&mut self, id: GroupId) -> Result<(), ServiceError> {
        self.group_mut(id)?;
        self.data.ui.active_group = Some(id);
        self.persist()
    }

    // ----- idols -----

    /// Adds an idol with the default cheer color to one group.
    pub fn add_idol(&mut self, group_id: GroupId, name: &str) -> Result<IdolId, ServiceError> {
        let name = normalize_name(name)?;
        let idol = Idol::new(name);
        let id = idol.id;
        self.group_mut(group_id)?.idols.push(idol);
        self.persist()?;
        Ok(id)
    }

    /// Renames one idol.
    pub fn rename_idol(
        &mut self,
        group_id: GroupId,
        idol_id: IdolId,
        name: &str,
    ) -> Result<(), ServiceError> {
        let name = normalize_name(name)?;
        self.idol_mut(group_id, idol_id)?.name = name;
        self.persist()
    }

    /// Deletes one idol from its group.
    pub fn delete_idol(&mut self, group_id: GroupId, idol_id: IdolId) -> Result<(), ServiceError> {
        let group = self.group_mut(group_id)?;
        let index = group
            .idols
            .iter()
            .position(|idol| idol.id == idol_id)
            .ok_or(ServiceError::IdolNotFound(idol_id))?;
        group.idols.remove(index);
        self.persist()
    }

    /// Moves one idol to the given position within its group (clamped).
    pub fn move_idol(
        &mut self,
        group_id: GroupId,
        idol_id: IdolId,
        index: usize,
    ) -> Result<(), ServiceError> {
        let group = self.group_mut(group_id)?;
        let from = group
            .idols
            .iter()
            .position(|idol| idol.id == idol_id)
            .ok_or(ServiceError::IdolNotFound(idol_id))?;
        let idol = group.idols.remove(from);
        let to = index.min(group.idols.len());
        group.idols.insert(to, idol);
        self.persist()
    }

    /// Sets one idol's cheer color, canonicalized to lowercase `#rrggbb`.
    pub fn set_cheer_color(
        &mut self,
        group_id: GroupId,
        idol_id: IdolId,
        color: &str,
    ) -> Result<(), ServiceError> {
        let normalized = normalize_cheer_color(color)
            .ok_or_else(|| ServiceError::InvalidColor(color.to_string()))?;
        self.idol_mut(group_id, idol_id)?.cheer_color = normalized;
        self.persist()
    }

    // ----- idol tags -----

    /// Batch-parses raw input and appends the tags one idol is missing.
    ///
    /// Returns how many tags were actually added; tags already present
    /// (case-insensitively) are skipped.
    pub fn add_idol_tags(
        &mut self,
        group_id: GroupId,
        idol_id: IdolId,
        raw_input: &str,
    ) -> Result<usize, ServiceError> {
        let parts = parse_tags_input(raw_input);
        if parts.is_empty() {
            return Ok(0);
        }
        let added = self.idol_mut(group_id, idol_id)?.add_tags(parts);
        self.persist()?;
        Ok(added)
    }

    /// Deletes one tag from one idol.
    pub fn delete_idol_tag(
        &mut self,
        group_id: GroupId,
        idol_id: IdolId,
        tag_id: TagId,
    ) -> Result<(), ServiceError> {
        let idol = self.idol_mut(group_id, idol_id)?;
        let index = idol
            .tags
            .iter()
            .position(|tag| tag.id == tag_id)
            .ok_or(ServiceError::TagNotFound(tag_id))?;
        idol.tags.remove(index);
        self.persist()
    }

    /// Moves one tag within one idol's list (clamped).
    pub fn move_idol_tag(
        &mut self,
        group_id: GroupId,
        idol_id: IdolId,
        tag_id: TagId,
        index: usize,
    ) -> Result<(), ServiceError> {
        let idol = self.idol_mut(group_id, idol_id)?;
        let from = idol
            .tags
            .iter()
            .position(|tag| tag.id == tag_id)
            .ok_or(ServiceError::TagNotFound(tag_id))?;
        let tag = idol.tags.remove(from);
        let to = index.min(idol.tags.len());
        idol.tags.insert(to, tag);
        self.persist()
    }

    // ----- favorites -----

    /// Adds a favorite folder and makes it the active one.
    pub fn add_folder(&mut self, name: &str) -> Result<FolderId, ServiceError> {
        let name = normalize_name(name)?;
        let folder = FavoriteFolder::new(name);
        let id = folder.id;
        self.data.collection.favorites.push(folder);
        self.data.ui.active_fav = Some(id);
        self.persist()?;
        Ok(id)
    }

    /// Renames one favorite folder.
    pub fn rename_folder(&mut self, id: FolderId, name: &str) -> Result<(), ServiceError> {
        let name = normalize_name(name)?;
        self.folder_mut(id)?.name = name;
        self.persist()
    }

    /// Deletes one folder; selection falls back to the first remaining one.
    pub fn delete_folder(&mut self, id: FolderId) -> Result<(), ServiceError> {
        let favorites = &mut self.data.collection.favorites;
        let index = favorites
            .iter()
            .position(|folder| folder.id == id)
            .ok_or(ServiceError::FolderNotFound(id))?;
        favorites.remove(index);
        if self.data.ui.active_fav == Some(id) {
            self.data.ui.active_fav = favorites.first().map(|folder| folder.id);
        }
        self.persist()
    }

    /// Moves one folder to the given position (clamped).
    pub fn move_folder(&mut self, id: FolderId, index: usize) -> Result<(), ServiceError> {
        let favorites = &mut self.data.collection.favorites;
        let from = favorites
            .iter()
            .position(|folder| folder.id == id)
            .ok_or(ServiceError::FolderNotFound(id))?;
        let folder = favorites.remove(from);
        let to = index.min(favorites.len());
        favorites.insert(to, folder);
        self.persist()
    }

    /// Switches the active favorites tab.
    pub fn set_active_fav(&mut self, id: FolderId) -> Result<(), ServiceError> {
        self.folder_mut(id)?;
        self.data.ui.active_fav = Some(id);
        self.persist()
    }

    /// Batch-parses raw input and appends the tags one folder is missing.
    pub fn add_folder_tags(
        &mut self,
        folder_id: FolderId,
        raw_input: &str,
    ) -> Result<usize, ServiceError> {
        let parts = parse_tags_input(raw_input);
        if parts.is_empty() {
            return Ok(0);
        }
        let added = self.folder_mut(folder_id)?.add_tags(parts);
        self.persist()?;
        Ok(added)
    }

    /// Deletes one tag from one folder.
    pub fn delete_folder_tag(
        &mut self,
        folder_id: FolderId,
        tag_id: TagId,
    ) -> Result<(), ServiceError> {
        let folder = self.folder_mut(folder_id)?;
        let index = folder
            .tags
            .iter()
            .position(|tag| tag.id == tag_id)
            .ok_or(ServiceError::TagNotFound(tag_id))?;
        folder.tags.remove(index);
        self.persist()
    }

    /// Moves one tag within one folder's list (clamped).
    pub fn move_folder_tag(
        &mut self,
        folder_id: FolderId,
        tag_id: TagId,
        index: usize,
    ) -> Result<(), ServiceError> {
        let folder = self.folder_mut(folder_id)?;
        let from = folder
            .tags
            .iter()
            .position(|tag| tag.id == tag_id)
            .ok_or(ServiceError::TagNotFound(tag_id))?;
        let tag = folder.tags.remove(from);
        let to = index.min(folder.tags.len());
        folder.tags.insert(to, tag);
        self.persist()
    }

    // ----- copy payloads and suggestions -----

    /// Click-to-copy payload for every tag in one group.
    pub fn group_copy_text(&self, id: GroupId) -> Result<String, ServiceError> {
        let group = self
            .data
            .collection
            .group(id)
            .ok_or(ServiceError::GroupNotFound(id))?;
        Ok(clipboard_text(&group.all_tags()))
    }

    /// Click-to-copy payload for one idol's tags.
    pub fn idol_copy_text(&self, group_id: GroupId, idol_id: IdolId) -> Result<String, ServiceError> {
        let group = self
            .data
            .collection
            .group(group_id)
            .ok_or(ServiceError::GroupNotFound(group_id))?;
        let idol = group
            .idols
            .iter()
            .find(|idol| idol.id == idol_id)
            .ok_or(ServiceError::IdolNotFound(idol_id))?;
        Ok(clipboard_text(&idol.tags))
    }

    /// Click-to-copy payload for one folder's tags.
    pub fn folder_copy_text(&self, id: FolderId) -> Result<String, ServiceError> {
        let folder = self
            .data
            .collection
            .folder(id)
            .ok_or(ServiceError::FolderNotFound(id))?;
        Ok(clipboard_text(&folder.tags))
    }

    /// Recent-first tag suggestions, preferring the active group.
    pub fn suggested_tags(&self, limit: usize) -> Vec<String> {
        let prefer = self.active_group().map(|group| group.id);
        self.data.collection.suggested_tags(prefer, limit)
    }

    // ----- markdown interchange -----

    /// Exports the collection with today's date stamp.
    pub fn export_markdown(&self) -> String {
        export_markdown_now(&self.data.collection)
    }

    /// Exports the collection with an explicit date stamp.
    pub fn export_markdown_on(&self, date: NaiveDate) -> String {
        export_markdown(&self.data.collection, date)
    }

    /// Replaces the whole document from markdown interchange text.
    ///
    /// Import is destructive and total: previous groups, favorites and
    /// selection are dropped; selection lands on the first parsed group and
    /// folder. "Nothing parsed" is a valid outcome, not an error.
    pub fn import_markdown(&mut self, text: &str) -> Result<(), ServiceError> {
        self.data.collection = import_markdown(text);
        self.data.ui = Selection::default();
        self.data.ensure_selection();
        info!(
            "event=collection_import module=service status=ok groups={} favorites={}",
            self.data.collection.groups.len(),
            self.data.collection.favorites.len()
        );
        self.persist()
    }

    // ----- internals -----

    fn persist(&mut self) -> Result<(), ServiceError> {
        self.store.save(&self.data)?;
        Ok(())
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut Group, ServiceError> {
        self.data
            .collection
            .group_mut(id)
            .ok_or(ServiceError::GroupNotFound(id))
    }

    fn idol_mut(&mut self, group_id: GroupId, idol_id: IdolId) -> Result<&mut Idol, ServiceError> {
        self.group_mut(group_id)?
            .idols
            .iter_mut()
            .find(|idol| idol.id == idol_id)
            .ok_or(ServiceError::IdolNotFound(idol_id))
    }

    fn folder_mut(&mut self, id: FolderId) -> Result<&mut FavoriteFolder, ServiceError> {
        self.data
            .collection
            .folder_mut(id)
            .ok_or(ServiceError::FolderNotFound(id))
    }
}

fn normalize_name(value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidName);
    }
    Ok(trimmed.to_string())
}
