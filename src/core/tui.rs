//! Stateless console rendering helpers.
//!
//! Every CLI surface routes its color handling through these functions so
//! the ANSI details live in one place instead of as process-wide constants.

use colored::Colorize;

const RULE_WIDTH: usize = 60;

/// Status tag for a single finding or check line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    Fail,
    Warn,
}

impl Status {
    pub fn tag(&self) -> String {
        match self {
            Status::Ok => "[OK]".green().bold().to_string(),
            Status::Fail => "[FAIL]".red().bold().to_string(),
            Status::Warn => "[WARN]".yellow().bold().to_string(),
        }
    }
}

pub fn rule_line() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Banner every surface opens with, and the summary divider reuses.
pub fn banner(title: &str) {
    println!("{}", rule_line().blue());
    println!("{}", format!("  {}", title).blue().bold());
    println!("{}\n", rule_line().blue());
}

pub fn divider() {
    println!("{}", rule_line().blue());
}

/// Numbered stage marker, e.g. `[2/5] Checking environment variables...`.
pub fn step(current: usize, total: usize, label: &str) {
    println!(
        "{} {}",
        format!("[{}/{}]", current, total).blue().bold(),
        label
    );
}

pub fn status_line(status: Status, message: &str) {
    println!("{} {}", status.tag(), message);
}

/// Colorize one line of a checkpoint document for terminal display.
pub fn doc_line(line: &str) -> String {
    if line.starts_with("# ") || line.starts_with("```") {
        line.blue().to_string()
    } else if line.starts_with("## ") || line.starts_with("### ") {
        line.yellow().to_string()
    } else if line.starts_with("**") || line.contains('✅') {
        line.green().to_string()
    } else {
        line.to_string()
    }
}
