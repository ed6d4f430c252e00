//! Durable session checkpoints.
//!
//! A checkpoint is an immutable, timestamp-named markdown document under
//! `<directives>/checkpoints/`. Creation snapshots the progress state and
//! a digest of the progress document; nothing in this tool ever rewrites
//! or deletes a checkpoint after it is written.

use crate::core::error::SpookyError;
use crate::core::progress::{self, ProgressState};
use crate::core::time;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const CHECKPOINT_PREFIX: &str = "checkpoint_";

/// Handle to a written checkpoint document.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub name: String,
    pub path: PathBuf,
}

/// Header fields extracted for the list view.
#[derive(Debug, Clone)]
pub struct CheckpointSummary {
    pub generated: String,
    pub user_message: String,
    pub current_phase: String,
}

/// Ordered keyword table driving the `Next Actions` block: first keyword
/// contained in `current_phase` wins, the empty keyword is the fallback.
const NEXT_ACTIONS: &[(&str, &[&str])] = &[
    (
        "Phase 2",
        &[
            "Complete Multipass OIDC client implementation",
            "Implement Chain 9 (Leasing) client-side integration",
            "Build account creation wizard UI",
        ],
    ),
    (
        "Phase 3",
        &[
            "Start SpookySocial demo site development",
            "Implement OIDC relying party integration",
            "Create QR code login flow",
        ],
    ),
    (
        "",
        &[
            "Check progress.md for current priorities",
            "Run `spookyctl bootstrap check` to verify system state",
            "Continue with active phase tasks",
        ],
    ),
];

fn next_actions(current_phase: &str) -> &'static [&'static str] {
    for (keyword, actions) in NEXT_ACTIONS {
        if keyword.is_empty() || current_phase.contains(keyword) {
            return actions;
        }
    }
    NEXT_ACTIONS[NEXT_ACTIONS.len() - 1].1
}

fn digest_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Snapshot the current session state into a new checkpoint document.
///
/// Two creations within the same second collide on the filename; creation
/// is a manual, infrequent action and the window is accepted.
pub fn create(directives_dir: &Path, message: Option<&str>) -> Result<Checkpoint, SpookyError> {
    let checkpoints_dir = directives_dir.join("checkpoints");
    // create_dir_all treats a concurrently-created directory as success.
    fs::create_dir_all(&checkpoints_dir)?;

    let now = time::now_local();
    let stamp = time::checkpoint_stamp(&now);
    let name = format!("{}{}.md", CHECKPOINT_PREFIX, stamp);
    let path = checkpoints_dir.join(&name);

    let state = progress::read_progress(directives_dir);
    let digest = fs::read_to_string(directives_dir.join("progress.md"))
        .ok()
        .map(|text| digest_hex(&text));

    let content = render(&stamp, &time::human_stamp(&now), message, &state, digest);
    fs::write(&path, content)?;

    Ok(Checkpoint { name, path })
}

fn render(
    stamp: &str,
    generated: &str,
    message: Option<&str>,
    state: &ProgressState,
    digest: Option<String>,
) -> String {
    let mut doc = String::new();

    doc.push_str("# SpookyID Session Checkpoint\n\n");
    doc.push_str(&format!("**Generated**: {}\n", generated));
    doc.push_str(&format!("**Checkpoint ID**: {}\n", stamp));
    doc.push_str(&format!(
        "**Progress Digest**: {}\n",
        digest.as_deref().unwrap_or("n/a")
    ));
    doc.push_str("\n---\n\n## Session Context\n\n");
    match message {
        Some(message) => doc.push_str(&format!("**User Message**: {}\n", message)),
        None => doc.push_str("**User Message**: (none provided)\n"),
    }

    doc.push_str("\n---\n\n## Current Work State\n\n### Active Phase\n\n");
    doc.push_str(&state.current_phase);
    doc.push_str("\n\n### Recent Completions\n\n");
    if state.recent_completions.is_empty() {
        doc.push_str("- (none found in progress.md)\n");
    } else {
        for completion in &state.recent_completions {
            doc.push_str(&format!("- ✅ {}\n", completion));
        }
    }
    doc.push_str("\n### Active Blockers\n\n");
    if state.active_blockers.is_empty() {
        doc.push_str("- (none found in progress.md)\n");
    } else {
        for (i, blocker) in state.active_blockers.iter().enumerate() {
            doc.push_str(&format!("{}. {}\n", i + 1, blocker));
        }
    }

    doc.push_str(
        "\n---\n\n## Restoration Protocol\n\n\
         When resuming from this checkpoint:\n\n\
         1. **Read BOOTSTRAP.md** for 5-minute context restore\n\
         2. **Read progress.md** for current phase status\n\
         3. **Read CHAINS.md** for trust architecture\n\
         4. **Read this checkpoint** for session-specific context\n\n\
         ### Quick Restore Commands\n\n\
         ```bash\n\
         cat directives/BOOTSTRAP.md\n\
         cat directives/progress.md\n",
    );
    doc.push_str(&format!(
        "cat directives/checkpoints/{}{}.md\n",
        CHECKPOINT_PREFIX, stamp
    ));
    doc.push_str(
        "\n# Verify system state\n\
         spookyctl bootstrap check\n\
         ```\n",
    );

    doc.push_str(
        "\n---\n\n## Files Modified in This Session\n\n\
         (To be filled manually if needed - track with git status)\n\n\
         ```bash\n\
         git status\n\
         git diff\n\
         ```\n",
    );

    doc.push_str("\n---\n\n## Next Actions\n\nBased on current state:\n\n");
    for (i, action) in next_actions(&state.current_phase).iter().enumerate() {
        doc.push_str(&format!("{}. {}\n", i + 1, action));
    }

    doc.push_str(
        "\n---\n\n## Critical Reminders\n\n\
         - **User Sovereignty**: Never design features that give SpookyID custody\n\
         - **Privacy by Default**: Never log plaintext PII, never correlate across sites\n\
         - **Fail-Closed Security**: Reject on error, don't accept by default\n\
         - **BBS+ Library**: NON-NEGOTIABLE - located at Resources/bbs-signatures-master\n\n\
         ---\n\n\
         **Checkpoint saved**. Use `spookyctl checkpoint restore` to load this state.\n",
    );

    doc
}

/// Checkpoint documents sorted by modification time, newest first.
pub fn list(directives_dir: &Path) -> Vec<PathBuf> {
    let checkpoints_dir = directives_dir.join("checkpoints");
    let mut entries: Vec<(PathBuf, SystemTime)> = Vec::new();
    if let Ok(dir) = fs::read_dir(&checkpoints_dir) {
        for entry in dir.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if !name.starts_with(CHECKPOINT_PREFIX) || !name.ends_with(".md") {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            entries.push((path, modified));
        }
    }
    // Equal mtimes fall back to the filename stamp, which is chronological.
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    entries.into_iter().map(|(path, _)| path).collect()
}

/// Load a checkpoint by exact name, or the most recent one.
pub fn load(
    directives_dir: &Path,
    name: Option<&str>,
) -> Result<(PathBuf, String), SpookyError> {
    let checkpoints_dir = directives_dir.join("checkpoints");

    if let Some(name) = name {
        let path = checkpoints_dir.join(name);
        if !path.is_file() {
            return Err(SpookyError::NotFound(format!(
                "checkpoint not found: {}",
                name
            )));
        }
        let content = fs::read_to_string(&path)?;
        return Ok((path, content));
    }

    let all = list(directives_dir);
    let head = all.first().ok_or_else(|| {
        SpookyError::NotFound(format!(
            "no checkpoints found under {}",
            checkpoints_dir.display()
        ))
    })?;
    let content = fs::read_to_string(head)?;
    Ok((head.clone(), content))
}

/// Extract the header fields used by the list view.
pub fn summarize(content: &str) -> CheckpointSummary {
    let field = |pattern: &str, fallback: &str| -> String {
        Regex::new(pattern)
            .expect("summary patterns are fixed and valid")
            .captures(content)
            .map(|cap| cap[1].trim().to_string())
            .unwrap_or_else(|| fallback.to_string())
    };
    CheckpointSummary {
        generated: field(r"\*\*Generated\*\*:\s*(.+)", "Unknown"),
        user_message: field(r"\*\*User Message\*\*:\s*(.+)", "None"),
        current_phase: field(r"### Active Phase\s*\n\n(.+)", "Unknown"),
    }
}
