use serde::Serialize;

use crate::ops::tree_ops::TodoEntry;

pub const LIST_HEADER: &str = "\u{2705}  YOUR TO DO LIST";
const PENDING_MARK: &str = "\u{2610} ";
const DONE_MARK: &str = "\u{2713} ";
const MEMO_MARK: &str = " \u{270F}";

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson {
    pub path: String,
    pub depth: usize,
    pub title: String,
    pub done: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

#[derive(Serialize)]
pub struct TagsJson {
    pub tags: Vec<String>,
}

pub fn entry_to_json(entry: &TodoEntry<'_>) -> TodoJson {
    TodoJson {
        path: entry.path.to_string(),
        depth: entry.depth,
        title: entry.node.title.clone(),
        done: entry.node.done,
        tag: entry.node.tag.clone(),
        date: entry.node.date.to_string(),
        memo: entry.node.memo_ref.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn state_mark(done: bool) -> &'static str {
    if done { DONE_MARK } else { PENDING_MARK }
}

fn memo_suffix(entry: &TodoEntry<'_>) -> &'static str {
    if entry.node.has_memo() { MEMO_MARK } else { "" }
}

/// One listing line: indent, state mark, path, title, tag and memo marker
pub fn format_todo_line(entry: &TodoEntry<'_>) -> String {
    let node = entry.node;
    let tag_str = if node.has_tag() {
        format!(" ({})", node.tag)
    } else {
        String::new()
    };
    format!(
        "{}{}{}: {}{}{}",
        " ".repeat(entry.depth),
        state_mark(node.done),
        entry.path,
        node.title,
        tag_str,
        memo_suffix(entry)
    )
}

/// Tag search hit: `path: title: date (tag)`
pub fn format_tag_hit(entry: &TodoEntry<'_>) -> String {
    let node = entry.node;
    format!(
        "{}: {}: {} ({}){}",
        entry.path,
        node.title,
        node.date,
        node.tag,
        memo_suffix(entry)
    )
}

/// Listing with header
pub fn format_listing<'a>(entries: impl IntoIterator<Item = TodoEntry<'a>>) -> Vec<String> {
    let mut lines = vec![LIST_HEADER.to_string()];
    lines.extend(entries.into_iter().map(|e| format_todo_line(&e)));
    lines
}
