//! Create / list / restore round-trips for the checkpoint store, driven
//! through the binary so the exit-code contract is exercised too.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const PROGRESS: &str = "\
### Phase 2: Client Integration ⚠️ IN PROGRESS (45%)

## Dependencies & Blockers

1. **Leasing API undecided**

## Recent Completions

- ✅ OIDC token endpoint
";

fn run_in(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_spookyctl"))
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .args(args)
        .output()
        .expect("failed to execute spookyctl")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture(root: &Path) {
    write(
        root,
        "backend/Cargo.toml",
        "[package]\nname = \"backend\"\nversion = \"0.1.0\"\n",
    );
    write(root, "directives/BOOTSTRAP.md", "# Bootstrap\n");
    write(root, "directives/progress.md", PROGRESS);
}

#[test]
fn create_then_restore_round_trips_message_and_phase() {
    let tmp = tempdir().unwrap();
    fixture(tmp.path());

    let output = run_in(
        tmp.path(),
        &["checkpoint", "create", "--message", "resume leasing work"],
    );
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Checkpoint saved:"));

    let checkpoints_dir = tmp.path().join("directives/checkpoints");
    let entries: Vec<_> = fs::read_dir(&checkpoints_dir).unwrap().flatten().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().to_string_lossy().to_string();
    assert!(name.starts_with("checkpoint_"));
    assert!(name.ends_with(".md"));

    let output = run_in(tmp.path(), &["checkpoint", "restore"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loading most recent checkpoint:"));
    assert!(stdout.contains("**User Message**: resume leasing work"));
    assert!(stdout.contains("### Phase 2: Client Integration ⚠️ IN PROGRESS (45%)"));
    assert!(stdout.contains("- ✅ OIDC token endpoint"));
    assert!(stdout.contains("Checkpoint restored"));

    let output = run_in(
        tmp.path(),
        &["checkpoint", "restore", "--checkpoint", &name],
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn list_shows_summaries_newest_first() {
    let tmp = tempdir().unwrap();
    fixture(tmp.path());

    // Two fabricated checkpoints with controlled mtimes; list order must
    // follow modification time, newest first.
    let dir = tmp.path().join("directives/checkpoints");
    fs::create_dir_all(&dir).unwrap();
    for (name, message, secs) in [
        ("checkpoint_20260101_000000.md", "older session", 1_000u64),
        ("checkpoint_20260105_000000.md", "newer session", 2_000),
    ] {
        let body = format!(
            "# SpookyID Session Checkpoint\n\n**Generated**: stub\n\n## Session Context\n\n**User Message**: {}\n",
            message
        );
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        let file = fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(std::time::UNIX_EPOCH + std::time::Duration::from_secs(secs))
            .unwrap();
    }

    let output = run_in(tmp.path(), &["checkpoint", "list"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let newer = stdout.find("checkpoint_20260105_000000.md").unwrap();
    let older = stdout.find("checkpoint_20260101_000000.md").unwrap();
    assert!(newer < older, "newest checkpoint must be listed first");
    assert!(stdout.contains("Message: newer session"));
}

#[test]
fn restore_unknown_name_fails() {
    let tmp = tempdir().unwrap();
    fixture(tmp.path());
    fs::create_dir_all(tmp.path().join("directives/checkpoints")).unwrap();

    let output = run_in(
        tmp.path(),
        &[
            "checkpoint",
            "restore",
            "--checkpoint",
            "checkpoint_19990101_000000.md",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("checkpoint not found"));
}

#[test]
fn restore_with_no_checkpoints_fails_cleanly() {
    let tmp = tempdir().unwrap();
    fixture(tmp.path());

    let output = run_in(tmp.path(), &["checkpoint", "restore"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no checkpoints found"));
    // Nothing may be written by a failed restore.
    assert!(!tmp.path().join("directives/checkpoints").exists());
}

#[test]
fn list_with_no_checkpoints_fails_with_hint() {
    let tmp = tempdir().unwrap();
    fixture(tmp.path());

    let output = run_in(tmp.path(), &["checkpoint", "list"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No checkpoints found"));
    assert!(stdout.contains("spookyctl checkpoint create"));
}
