//! Session checkpoint CLI: create, list, and restore point-in-time
//! snapshots of in-progress work state.

use crate::core::checkpoint;
use crate::core::error::SpookyError;
use crate::core::output;
use crate::core::tui::{self, Status};
use crate::core::workspace::Workspace;
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "checkpoint", about = "Session checkpoints: create, list, restore")]
pub struct CheckpointCli {
    #[clap(subcommand)]
    pub command: CheckpointCommand,
}

#[derive(Subcommand, Debug)]
pub enum CheckpointCommand {
    /// Snapshot the current session state into a new checkpoint document
    Create {
        /// Free-text note recorded in the checkpoint header.
        #[clap(long)]
        message: Option<String>,
    },
    /// List checkpoints, newest first
    List,
    /// Display a checkpoint (most recent when none is named)
    Restore {
        /// Exact checkpoint filename, e.g. checkpoint_20260807_101500.md.
        #[clap(long)]
        checkpoint: Option<String>,
    },
}

pub fn run_checkpoint_cli(workspace: &Workspace, cli: CheckpointCli) -> Result<(), SpookyError> {
    let directives_dir = resolve_directives_dir(workspace)?;
    match cli.command {
        CheckpointCommand::Create { message } => create(&directives_dir, message.as_deref()),
        CheckpointCommand::List => list(&directives_dir),
        CheckpointCommand::Restore { checkpoint } => {
            restore(&directives_dir, checkpoint.as_deref())
        }
    }
}

fn resolve_directives_dir(workspace: &Workspace) -> Result<PathBuf, SpookyError> {
    match &workspace.directives_dir {
        Some(dir) => Ok(dir.clone()),
        None => {
            tui::status_line(
                Status::Warn,
                "Could not find directives folder, using current directory",
            );
            Ok(env::current_dir()?)
        }
    }
}

fn create(directives_dir: &PathBuf, message: Option<&str>) -> Result<(), SpookyError> {
    tui::banner("SpookyID Session Checkpoint Generator");
    println!("Directives location: {}\n", directives_dir.display());

    let checkpoint = checkpoint::create(directives_dir, message)?;

    tui::status_line(
        Status::Ok,
        &format!("Checkpoint saved: {}", checkpoint.path.display()),
    );
    println!("\nTo restore this checkpoint:");
    println!(
        "  spookyctl checkpoint restore --checkpoint {}",
        checkpoint.name
    );
    println!("  spookyctl checkpoint restore  # (loads most recent)");
    Ok(())
}

fn list(directives_dir: &PathBuf) -> Result<(), SpookyError> {
    tui::banner("Available Checkpoints");

    let checkpoints = checkpoint::list(directives_dir);
    if checkpoints.is_empty() {
        tui::status_line(Status::Warn, "No checkpoints found");
        println!("\nCreate a checkpoint with: spookyctl checkpoint create");
        return Err(SpookyError::NotFound(format!(
            "no checkpoints found under {}",
            directives_dir.join("checkpoints").display()
        )));
    }

    use colored::Colorize;
    for (i, path) in checkpoints.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let summary = std::fs::read_to_string(path)
            .map(|content| checkpoint::summarize(&content))
            .unwrap_or_else(|_| checkpoint::summarize(""));
        println!("{}. {}", i + 1, name.green());
        println!("   Generated: {}", summary.generated);
        println!("   Message: {}", summary.user_message);
        println!(
            "   Phase: {}",
            output::compact_field(&summary.current_phase, 60)
        );
        println!();
    }

    println!("To restore a checkpoint:");
    println!(
        "  spookyctl checkpoint restore --checkpoint {}",
        checkpoints[0]
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    );
    Ok(())
}

fn restore(directives_dir: &PathBuf, name: Option<&str>) -> Result<(), SpookyError> {
    use colored::Colorize;

    let (path, content) = checkpoint::load(directives_dir, name)?;
    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if name.is_none() {
        println!(
            "{}\n",
            format!("Loading most recent checkpoint: {}", display_name).green()
        );
    }

    tui::banner(&format!("Checkpoint: {}", display_name));
    for line in content.lines() {
        println!("{}", tui::doc_line(line));
    }
    println!();

    tui::status_line(Status::Ok, "Checkpoint restored");
    println!("\nNext steps:");
    println!("  1. Read the 'Next Actions' section above");
    println!("  2. Run: spookyctl bootstrap check");
    println!("  3. Check progress.md for current priorities");
    Ok(())
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "checkpoint",
        "version": "0.1.0",
        "description": "Durable session snapshots for cross-session continuity",
        "commands": [
            { "name": "create", "parameters": ["message"] },
            { "name": "list", "parameters": [] },
            { "name": "restore", "parameters": ["checkpoint"] }
        ],
        "storage": ["directives/checkpoints/"]
    })
}
