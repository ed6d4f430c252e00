//! Compact output rendering helpers for CLI surfaces.
//!
//! Keeps itemized report output bounded while preserving signal.

/// Render up to `max_items` occurrence references with a count tail.
pub fn preview_refs(refs: &[String], max_items: usize) -> Vec<String> {
    let mut out: Vec<String> = refs
        .iter()
        .take(max_items)
        .map(|r| format!("    - {}", r))
        .collect();
    if refs.len() > max_items {
        out.push(format!("    ... and {} more", refs.len() - max_items));
    }
    out
}

/// Collapse whitespace and bound a free-text field for one-line summaries.
pub fn compact_field(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}
