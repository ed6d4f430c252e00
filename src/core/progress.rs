//! Best-effort extraction of the current work state from `progress.md`.
//!
//! The progress document is a living file with no contractual structure.
//! Everything here degrades to an empty field instead of failing. The
//! heading markers (including the `⚠️` / `✅` emoji) are exactly what the
//! existing documents use; altering them silently breaks extraction.

use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Blockers and completions are capped at the top entries.
pub const MAX_ITEMS: usize = 5;

/// Derived snapshot of the progress document. Recomputed on every read,
/// never persisted on its own.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProgressState {
    pub current_phase: String,
    pub active_blockers: Vec<String>,
    pub recent_completions: Vec<String>,
}

impl Default for ProgressState {
    fn default() -> Self {
        ProgressState {
            current_phase: "Unknown".to_string(),
            active_blockers: Vec::new(),
            recent_completions: Vec::new(),
        }
    }
}

/// Read and summarize `progress.md` under the directives directory.
pub fn read_progress(directives_dir: &Path) -> ProgressState {
    match fs::read_to_string(directives_dir.join("progress.md")) {
        Ok(content) => summarize(&content),
        Err(_) => ProgressState::default(),
    }
}

/// Summarize raw progress text.
pub fn summarize(content: &str) -> ProgressState {
    let mut state = ProgressState::default();

    let phase_re = Regex::new(r"(?m)^### Phase \d+:.*⚠️ IN PROGRESS \(\d+%\)")
        .expect("phase pattern is fixed and valid");
    if let Some(m) = phase_re.find(content) {
        state.current_phase = m.as_str().to_string();
    }

    if let Some(section) = section_body(content, "## Dependencies & Blockers") {
        let item_re =
            Regex::new(r"(?m)^\d+\.\s+\*\*(.+?)\*\*").expect("blocker pattern is fixed and valid");
        state.active_blockers = item_re
            .captures_iter(&section)
            .take(MAX_ITEMS)
            .map(|cap| cap[1].to_string())
            .collect();
    }

    if let Some(section) = section_body(content, "## Recent Completions") {
        let item_re =
            Regex::new(r"(?m)^- ✅ (.+)$").expect("completion pattern is fixed and valid");
        state.recent_completions = item_re
            .captures_iter(&section)
            .take(MAX_ITEMS)
            .map(|cap| cap[1].trim().to_string())
            .collect();
    }

    state
}

/// Slice a `##` section: lines after the heading, up to the next `##`
/// heading or end of document.
fn section_body(content: &str, heading: &str) -> Option<String> {
    let mut body = Vec::new();
    let mut in_section = false;
    for line in content.lines() {
        if in_section {
            if line.starts_with("## ") {
                break;
            }
            body.push(line);
        } else if line.trim_end() == heading {
            in_section = true;
        }
    }
    if in_section { Some(body.join("\n")) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRESS: &str = "\
# SpookyID Progress

### Phase 1: Backend Core ✅ DONE (100%)

### Phase 2: Client Integration ⚠️ IN PROGRESS (45%)

- work notes

## Dependencies & Blockers

1. **BBS+ proof verification unstable**
2. **Leasing API undecided** extra prose
3. plain item without bold

## Recent Completions

- ✅ OIDC token endpoint
- ✅ Anchor registration flow
- pending item

## Next Section
";

    #[test]
    fn test_full_extraction() {
        let state = summarize(PROGRESS);
        assert_eq!(
            state.current_phase,
            "### Phase 2: Client Integration ⚠️ IN PROGRESS (45%)"
        );
        assert_eq!(
            state.active_blockers,
            vec!["BBS+ proof verification unstable", "Leasing API undecided"]
        );
        assert_eq!(
            state.recent_completions,
            vec!["OIDC token endpoint", "Anchor registration flow"]
        );
    }

    #[test]
    fn test_items_capped_at_five() {
        let mut doc = String::from("## Recent Completions\n\n");
        for i in 1..=8 {
            doc.push_str(&format!("- ✅ item {}\n", i));
        }
        let state = summarize(&doc);
        assert_eq!(state.recent_completions.len(), MAX_ITEMS);
        assert_eq!(state.recent_completions[0], "item 1");
    }

    #[test]
    fn test_section_at_end_of_document_still_parses() {
        let doc = "## Dependencies & Blockers\n\n1. **only blocker**\n";
        let state = summarize(doc);
        assert_eq!(state.active_blockers, vec!["only blocker"]);
    }

    #[test]
    fn test_missing_structure_yields_defaults() {
        let state = summarize("nothing recognizable here\n");
        assert_eq!(state.current_phase, "Unknown");
        assert!(state.active_blockers.is_empty());
        assert!(state.recent_completions.is_empty());
    }

    #[test]
    fn test_completed_phase_marker_does_not_match() {
        let doc = "### Phase 1: Backend Core ✅ DONE (100%)\n";
        assert_eq!(summarize(doc).current_phase, "Unknown");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let state = read_progress(Path::new("/nonexistent"));
        assert_eq!(state, ProgressState::default());
    }
}
