//! Markdown interchange codec for the collection hierarchy.
//!
//! # Responsibility
//! - Serialize the collection into the line-oriented export format.
//! - Parse that format back into an equivalent collection.
//!
//! # Invariants
//! - `import(export(c))` preserves names, colors, canonical tag texts and
//!   relative ordering for any collection satisfying model invariants.
//! - Import never fails: unrecognized or out-of-context lines are skipped.

mod export;
mod import;

pub use export::{export_markdown, export_markdown_now};
pub use import::import_markdown;

/// Level-1 heading marking the start of the favorites section.
///
/// Literal sentinel, never a user-visible group name.
pub const FAVORITES_HEADING: &str = "[FAVORITES]";

/// Flattens one entity name onto a single markdown heading line.
///
/// Embedded newlines collapse to spaces and surrounding whitespace is
/// trimmed. No further escaping: names colliding with heading syntax are an
/// accepted format limitation.
pub(crate) fn heading_text(name: &str) -> String {
    name.replace("\r\n", " ").replace('\n', " ").trim().to_string()
}
