//! Rule enforcement checking: every `R-*` identifier referenced in the
//! backend must carry a definition header in RULES.md.

use crate::core::consistency;
use crate::core::error::SpookyError;
use crate::core::output;
use crate::core::scan::{self, Category};
use crate::core::spec_index;
use crate::core::tui::{self, Status};
use crate::core::workspace::Workspace;
use clap::{Parser, Subcommand};
use rustc_hash::FxHashSet;

#[derive(Parser, Debug)]
#[clap(name = "rules", about = "Rule reference enforcement against RULES.md")]
pub struct RulesCli {
    #[clap(subcommand)]
    pub command: RulesCommand,
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// Verify every rule referenced in code is defined in RULES.md
    Check {
        /// Show occurrence locations and per-file skip warnings.
        #[clap(long, short = 'v')]
        verbose: bool,
    },
}

pub fn run_rules_cli(workspace: &Workspace, cli: RulesCli) -> Result<(), SpookyError> {
    match cli.command {
        RulesCommand::Check { verbose } => check(workspace, verbose),
    }
}

fn check(workspace: &Workspace, verbose: bool) -> Result<(), SpookyError> {
    use colored::Colorize;

    tui::banner("SpookyID Rule Enforcement Checker");

    let backend_dir = workspace.backend_dir();

    tui::step(1, 3, "Extracting rules from code...");
    let outcome = scan::scan_tree(&backend_dir, Category::Rule);
    if let Some(missing) = &outcome.missing_root {
        tui::status_line(
            Status::Warn,
            &format!("{} not found", missing.display()),
        );
    }
    if verbose {
        for (file, reason) in &outcome.skipped {
            tui::status_line(
                Status::Warn,
                &format!("Could not read {}: {}", file.display(), reason),
            );
        }
    }
    println!(
        "Found {} unique rule references in code\n",
        outcome.occurrences.len()
    );

    tui::step(2, 3, "Loading defined rules from RULES.md...");
    let rules_file = workspace.rules_file();
    let index = spec_index::load_rule_definitions(&rules_file);
    if let Some(missing) = &index.missing {
        tui::status_line(Status::Warn, missing);
    }
    println!("Found {} defined rules in RULES.md\n", index.definitions.len());

    tui::step(3, 3, "Verifying rule references...\n");

    let defined: FxHashSet<String> = index.definitions.keys().cloned().collect();
    let report = consistency::reconcile(outcome.occurrences.keys(), &defined);

    for rule_id in &report.valid {
        let description = index
            .definitions
            .get(rule_id)
            .map(String::as_str)
            .unwrap_or("");
        tui::status_line(Status::Ok, &format!("{}: {}", rule_id, description));
        if verbose {
            print_locations(&outcome, rule_id, 3);
        }
    }
    for rule_id in &report.undefined {
        tui::status_line(
            Status::Fail,
            &format!("{}: NOT DEFINED IN RULES.md", rule_id),
        );
        if verbose {
            print_locations(&outcome, rule_id, usize::MAX);
        }
    }

    println!();
    tui::divider();
    println!("Rule References: {}", outcome.occurrences.len());
    println!("{} {}", "Valid:".green(), report.valid.len());
    println!("{} {}", "Missing:".red(), report.undefined.len());

    if report.is_clean() {
        println!();
        tui::status_line(Status::Ok, "All rule references are properly defined");
        return Ok(());
    }

    println!();
    tui::status_line(
        Status::Warn,
        "The following rules are referenced in code but not defined:",
    );
    for rule_id in &report.undefined {
        println!("  - {}", rule_id);
    }
    println!(
        "\n{} Add these rules to RULES.md or remove references from code",
        "Action required:".yellow()
    );

    Err(SpookyError::ValidationError(format!(
        "{} undefined rule reference(s)",
        report.issue_count()
    )))
}

fn print_locations(outcome: &scan::ScanOutcome, rule_id: &str, max_items: usize) {
    let Some(locations) = outcome.occurrences.get(rule_id) else {
        return;
    };
    println!("  Referenced in {} location(s):", locations.len());
    let refs: Vec<String> = locations.iter().map(|o| o.render()).collect();
    for line in output::preview_refs(&refs, max_items) {
        println!("{}", line);
    }
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "rules",
        "version": "0.1.0",
        "description": "Rule reference enforcement against RULES.md",
        "commands": [
            { "name": "check", "parameters": ["verbose"] }
        ],
        "storage": []
    })
}
