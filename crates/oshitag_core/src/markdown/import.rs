//! Markdown import for restore/upload flows.

use super::FAVORITES_HEADING;
use crate::model::collection::{Collection, FavoriteFolder, Group, Idol};
use crate::model::tag::{normalize_tag_text, Tag};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

static CHEER_COLOR_COMMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<!--\s*cheerColor\s*:\s*(#[0-9a-fA-F]{6})\s*-->$")
        .expect("valid cheerColor comment regex")
});

/// Parses markdown interchange text into a collection.
///
/// The parse is total and lenient: blank lines carry no structure, heading
/// lines are interpreted positionally (`# ` group or favorites marker,
/// `## ` idol or folder, `### ` tag), and every other line is skipped. Tag
/// lines appearing before any idol or folder are dropped without creating
/// phantom entities. Garbage input yields an empty collection rather than
/// an error.
///
/// Tags are appended exactly as written, with no dedup: the exporter never
/// emits duplicates, and hand-edited duplicates are intentionally kept as-is.
pub fn import_markdown(text: &str) -> Collection {
    let lines: Vec<&str> = text.split('\n').map(|line| line.trim_end_matches('\r')).collect();

    let mut collection = Collection::default();
    let mut in_favorites = false;
    // Index of the group currently receiving idols, and the idol currently
    // receiving tags. Indices instead of references keep the borrow local.
    let mut current_group: Option<usize> = None;
    let mut current_idol: Option<usize> = None;

    for (index, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("# ") {
            let name = rest.trim();
            current_group = None;
            current_idol = None;
            in_favorites = name == FAVORITES_HEADING;
            if !in_favorites {
                collection.groups.push(Group::new(name));
                current_group = Some(collection.groups.len() - 1);
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("## ") {
            let name = rest.trim();
            current_idol = None;
            if in_favorites {
                collection.favorites.push(FavoriteFolder::new(name));
            } else if let Some(group_index) = current_group {
                let mut idol = Idol::new(name);
                if let Some(color) = cheer_color_on_line(&lines, index + 1) {
                    idol.cheer_color = color;
                }
                let group = &mut collection.groups[group_index];
                group.idols.push(idol);
                current_idol = Some(group.idols.len() - 1);
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("### ") {
            let Some(text) = normalize_tag_text(rest) else {
                continue;
            };
            if in_favorites {
                if let Some(folder) = collection.favorites.last_mut() {
                    folder.tags.push(Tag::new(text));
                }
            } else if let (Some(group_index), Some(idol_index)) = (current_group, current_idol) {
                collection.groups[group_index].idols[idol_index]
                    .tags
                    .push(Tag::new(text));
            }
            continue;
        }
    }

    info!(
        "event=md_import module=markdown status=ok groups={} favorites={}",
        collection.groups.len(),
        collection.favorites.len()
    );
    collection
}

/// Reads a cheerColor comment from the given line, when present and valid.
fn cheer_color_on_line(lines: &[&str], index: usize) -> Option<String> {
    let line = lines.get(index)?.trim();
    CHEER_COLOR_COMMENT_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().to_lowercase())
}
