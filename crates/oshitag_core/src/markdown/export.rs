//! Markdown export for backup/download flows.

use super::{heading_text, FAVORITES_HEADING};
use crate::model::collection::Collection;
use crate::model::tag::normalize_tag_text;
use chrono::NaiveDate;
use log::info;

/// Serializes the collection with today's date in the header stamp.
pub fn export_markdown_now(collection: &Collection) -> String {
    export_markdown(collection, chrono::Local::now().date_naive())
}

/// Serializes the collection into the markdown interchange format.
///
/// Layout, line by line:
/// - one header comment `<!-- oshiTag v<version> export <YYYY-MM-DD> -->`
///   followed by a blank line;
/// - per group: a `# ` heading, then per idol a `## ` heading, a
///   `<!-- cheerColor: #rrggbb -->` comment, one `### ` line per canonical
///   tag, and a blank separator line; a second blank line closes the group;
/// - a literal `# [FAVORITES]` heading, then per folder a `## ` heading,
///   `### ` tag lines and a blank separator line.
///
/// The output ends with exactly one trailing newline and no trailing blank
/// lines beyond it.
pub fn export_markdown(collection: &Collection, date: NaiveDate) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "<!-- oshiTag v{} export {} -->",
        env!("CARGO_PKG_VERSION"),
        date.format("%Y-%m-%d")
    ));
    lines.push(String::new());

    for group in &collection.groups {
        lines.push(format!("# {}", heading_text(&group.name)));
        for idol in &group.idols {
            lines.push(format!("## {}", heading_text(&idol.name)));
            if !idol.cheer_color.is_empty() {
                lines.push(format!("<!-- cheerColor: {} -->", idol.cheer_color));
            }
            for tag in &idol.tags {
                if let Some(text) = normalize_tag_text(&tag.text) {
                    lines.push(format!("### {}", heading_text(&text)));
                }
            }
            lines.push(String::new());
        }
        lines.push(String::new());
    }

    lines.push(format!("# {FAVORITES_HEADING}"));
    for folder in &collection.favorites {
        lines.push(format!("## {}", heading_text(&folder.name)));
        for tag in &folder.tags {
            if let Some(text) = normalize_tag_text(&tag.text) {
                lines.push(format!("### {}", heading_text(&text)));
            }
        }
        lines.push(String::new());
    }

    info!(
        "event=md_export module=markdown status=ok groups={} favorites={}",
        collection.groups.len(),
        collection.favorites.len()
    );

    let mut output = lines.join("\n");
    output.truncate(output.trim_end().len());
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::export_markdown;
    use crate::model::collection::Collection;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date")
    }

    #[test]
    fn empty_collection_exports_header_and_favorites_marker() {
        let output = export_markdown(&Collection::default(), day());
        let expected = format!(
            "<!-- oshiTag v{} export 2026-01-02 -->\n\n# [FAVORITES]\n",
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn output_ends_with_single_newline() {
        let output = export_markdown(&Collection::default(), day());
        assert!(output.ends_with('\n'));
        assert!(!output.ends_with("\n\n"));
    }
}
