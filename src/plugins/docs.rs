//! Documentation accuracy verification: endpoints against SPEC.md, rule
//! references against RULES.md, chain references against CHAINS.md.
//!
//! Code is ground truth for every category; the documents must cover what
//! the code references. The aggregate exit code is the external contract
//! consumed by automation and by `bootstrap check`.

use crate::core::consistency;
use crate::core::error::SpookyError;
use crate::core::scan::{self, Category};
use crate::core::spec_index;
use crate::core::tui::{self, Status};
use crate::core::workspace::Workspace;
use clap::{Parser, Subcommand};
use rustc_hash::FxHashSet;

#[derive(Parser, Debug)]
#[clap(name = "docs", about = "Documentation accuracy verification")]
pub struct DocsCli {
    #[clap(subcommand)]
    pub command: DocsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DocsCommand {
    /// Check SPEC.md, RULES.md, and CHAINS.md against the code
    Verify,
}

pub fn run_docs_cli(workspace: &Workspace, cli: DocsCli) -> Result<(), SpookyError> {
    match cli.command {
        DocsCommand::Verify => verify(workspace),
    }
}

fn verify(workspace: &Workspace) -> Result<(), SpookyError> {
    tui::banner("SpookyID Documentation Verification");

    let backend_dir = workspace.backend_dir();
    let mut issues_found = 0usize;

    tui::step(1, 3, "Checking SPEC.md endpoint accuracy...");
    issues_found += check_endpoints(workspace, &backend_dir);
    println!();

    tui::step(2, 3, "Checking RULES.md rule references...");
    issues_found += check_rules(workspace, &backend_dir);
    println!();

    tui::step(3, 3, "Checking CHAINS.md chain references...");
    issues_found += check_chains(workspace, &backend_dir);
    println!();

    tui::divider();
    if issues_found == 0 {
        tui::status_line(Status::Ok, "Documentation is accurate (no issues found)");
        return Ok(());
    }

    tui::status_line(
        Status::Warn,
        &format!("Found {} documentation accuracy issue(s)", issues_found),
    );
    println!("Please update relevant documentation files.");
    Err(SpookyError::ValidationError(format!(
        "{} documentation issue(s)",
        issues_found
    )))
}

fn check_endpoints(workspace: &Workspace, backend_dir: &std::path::Path) -> usize {
    let outcome = scan::scan_tree(backend_dir, Category::Route);
    if let Some(missing) = &outcome.missing_root {
        tui::status_line(Status::Warn, &format!("{} not found", missing.display()));
    }

    let index = spec_index::load_spec_endpoints(&workspace.spec_file());
    if let Some(missing) = &index.missing {
        tui::status_line(Status::Warn, missing);
    }

    let report = consistency::reconcile(outcome.occurrences.keys(), &index.endpoints);
    if report.is_clean() {
        tui::status_line(
            Status::Ok,
            &format!(
                "All {} endpoints documented in SPEC.md",
                outcome.occurrences.len()
            ),
        );
        return 0;
    }

    tui::status_line(Status::Warn, "Endpoints in code but not in SPEC.md:");
    for endpoint in &report.undefined {
        println!("  - {}", endpoint);
    }
    report.issue_count()
}

fn check_rules(workspace: &Workspace, backend_dir: &std::path::Path) -> usize {
    let outcome = scan::scan_tree(backend_dir, Category::Rule);

    if outcome.occurrences.is_empty() {
        tui::status_line(Status::Ok, "No rule references found in code");
        return 0;
    }
    println!("Found {} rule references in code", outcome.occurrences.len());

    let index = spec_index::load_rule_definitions(&workspace.rules_file());
    if let Some(missing) = &index.missing {
        tui::status_line(Status::Warn, missing);
    }

    let defined: FxHashSet<String> = index.definitions.keys().cloned().collect();
    let report = consistency::reconcile(outcome.occurrences.keys(), &defined);

    if report.is_clean() {
        tui::status_line(
            Status::Ok,
            &format!("All {} referenced rules are defined", report.valid.len()),
        );
        return 0;
    }

    tui::status_line(
        Status::Warn,
        "Rules referenced in code but not defined in RULES.md:",
    );
    for rule_id in &report.undefined {
        println!("  - {}", rule_id);
    }
    report.issue_count()
}

fn check_chains(workspace: &Workspace, backend_dir: &std::path::Path) -> usize {
    let outcome = scan::scan_tree(backend_dir, Category::Chain);
    let referenced = outcome.chain_numbers();

    if referenced.is_empty() {
        tui::status_line(Status::Ok, "No chain references found in code");
        return 0;
    }
    println!("Found references to chains: {:?}", referenced);

    let chains_file = workspace.chains_file();
    let report = consistency::reconcile_chains(&referenced, |n| {
        spec_index::is_chain_documented(&chains_file, n)
    });

    for chain in &report.valid {
        tui::status_line(Status::Ok, &format!("Chain {} documented", chain));
    }
    for chain in &report.undocumented {
        tui::status_line(
            Status::Warn,
            &format!("Chain {} referenced but not documented", chain),
        );
    }
    report.issue_count()
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "docs",
        "version": "0.1.0",
        "description": "Documentation accuracy verification across endpoints, rules, and chains",
        "commands": [
            { "name": "verify", "parameters": [] }
        ],
        "storage": []
    })
}
