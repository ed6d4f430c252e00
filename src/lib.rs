//! spookyctl: session continuity and documentation consistency tooling
//! for the SpookyID stack.
//!
//! SpookyID development runs across disconnected, multi-agent working
//! sessions. This crate keeps those sessions honest in two ways:
//!
//! - **Consistency verification**: identifiers the backend code references
//!   (security rules `R-*`, trust-chain numbers, HTTP routes) must be
//!   documented in the specification documents (RULES.md, CHAINS.md,
//!   SPEC.md). Code is ground truth; the documents must cover it.
//! - **Session checkpoints**: immutable, timestamp-named snapshots of the
//!   current work state, created before a session ends and restored when
//!   the next one begins.
//!
//! Every surface is independently runnable and communicates through its
//! exit code: `0` means fully consistent / ready, `1` means one or more
//! enumerated issues. That contract is what automation (and the bootstrap
//! verifier's delegated documentation stage) consumes.
//!
//! # Surfaces
//!
//! ```bash
//! spookyctl bootstrap check       # preflight: tools, files, env, docs
//! spookyctl rules check           # R-* references vs RULES.md
//! spookyctl docs verify           # endpoints/rules/chains vs documents
//! spookyctl checkpoint create --message "..."
//! spookyctl checkpoint restore    # most recent, or --checkpoint <name>
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: workspace discovery, identifier scanning, specification
//!   indexes, reconciliation, progress summarization, checkpoint store
//! - [`plugins`]: the CLI surfaces (`bootstrap`, `rules`, `docs`,
//!   `checkpoint`)

pub mod core;
pub mod plugins;

use crate::core::error::SpookyError;
use crate::core::workspace::Workspace;
use crate::plugins::{bootstrap, checkpoint, docs, rules};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "spookyctl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Session continuity and documentation consistency tooling for the SpookyID stack"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preflight verification of tools, files, environment, and docs
    Bootstrap(bootstrap::BootstrapCli),
    /// Rule reference enforcement against RULES.md
    Rules(rules::RulesCli),
    /// Documentation accuracy verification
    Docs(docs::DocsCli),
    /// Session checkpoint management
    Checkpoint(checkpoint::CheckpointCli),
    /// Print version
    Version,
}

pub fn run() -> Result<(), SpookyError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Bootstrap(cmd) => {
            // Preflight must be able to report on a broken layout, so root
            // discovery degrades to the current directory here.
            let workspace = Workspace::discover_or_cwd()?;
            bootstrap::run_bootstrap_cli(&workspace, cmd)
        }
        Command::Rules(cmd) => {
            let workspace = Workspace::discover()?;
            rules::run_rules_cli(&workspace, cmd)
        }
        Command::Docs(cmd) => {
            let workspace = Workspace::discover()?;
            docs::run_docs_cli(&workspace, cmd)
        }
        Command::Checkpoint(cmd) => {
            let workspace = Workspace::discover_or_cwd()?;
            checkpoint::run_checkpoint_cli(&workspace, cmd)
        }
    }
}
