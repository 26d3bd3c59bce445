//! Tag normalization and batch input parsing.
//!
//! # Responsibility
//! - Convert free-form user text into canonical `#`-prefixed tag labels.
//! - Split one input blob into an ordered, deduplicated token sequence.
//!
//! # Invariants
//! - A canonical tag is trimmed, non-empty, and never the bare string `#`.
//! - Dedup identity is case-insensitive comparison of canonical text.
//! - These functions are pure and never fail; bad input degrades to
//!   `None` or an empty list.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable identifier for one tag entry.
pub type TagId = Uuid;

/// One tag label owned by an idol or a favorite folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable id used by the UI shell for delete/reorder targeting.
    pub id: TagId,
    /// Canonical text: single leading `#`, trimmed, non-empty.
    pub text: String,
}

impl Tag {
    /// Wraps already-canonical text with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }

    /// Normalizes arbitrary text and builds a tag from it.
    ///
    /// Returns `None` when normalization yields no tag.
    pub fn from_input(text: &str) -> Option<Self> {
        normalize_tag_text(text).map(Self::new)
    }

    /// Case-insensitive identity used for dedup checks.
    pub fn dedup_key(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Normalizes one piece of user text into canonical tag form.
///
/// Rules:
/// - Leading/trailing whitespace is trimmed.
/// - Empty text and the bare `#` produce `None`.
/// - Text not starting with `#` gets the prefix prepended.
pub fn normalize_tag_text(text: &str) -> Option<String> {
    let raw = text.trim();
    if raw.is_empty() || raw == "#" {
        return None;
    }
    if raw.starts_with('#') {
        Some(raw.to_string())
    } else {
        Some(format!("#{raw}"))
    }
}

/// Parses one input blob into an ordered list of unique canonical tags.
///
/// Separators are `,`, any whitespace (including the full-width space
/// U+3000), and `#` itself: a `#` mid-scan always starts a new token, even
/// without a preceding separator. Tokens that normalize to nothing are
/// dropped. Duplicates are removed case-insensitively, keeping the first
/// occurrence unchanged.
pub fn parse_tags_input(input: &str) -> Vec<String> {
    let source = input.trim();
    if source.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut current = String::new();

    let mut flush = |buffer: &mut String| {
        if let Some(normalized) = normalize_tag_text(buffer) {
            tokens.push(normalized);
        }
        buffer.clear();
    };

    for ch in source.chars() {
        if ch == '#' {
            flush(&mut current);
            current.push('#');
            continue;
        }
        if ch == ',' || ch.is_whitespace() || ch == '\u{3000}' {
            flush(&mut current);
            continue;
        }
        current.push(ch);
    }
    flush(&mut current);

    uniq_keep_order(tokens)
}

/// Removes case-insensitive duplicates while preserving first-seen order.
pub fn uniq_keep_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.to_lowercase()) {
            out.push(item);
        }
    }
    out
}

/// Builds the click-to-copy payload for a list of tags.
///
/// Tags are re-normalized, deduplicated, and joined by single spaces.
/// An empty result means there is nothing worth copying.
pub fn clipboard_text(tags: &[Tag]) -> String {
    let normalized = tags
        .iter()
        .filter_map(|tag| normalize_tag_text(&tag.text))
        .collect();
    uniq_keep_order(normalized).join(" ")
}
