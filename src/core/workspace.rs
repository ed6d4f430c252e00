//! Workspace discovery for the SpookyID stack.
//!
//! The tooling can be launched from the stack root, from the multipass
//! tree, or from anywhere inside either; discovery walks upward looking
//! for the layout markers (`backend/Cargo.toml`, `directives/BOOTSTRAP.md`).

use crate::core::error::SpookyError;
use std::env;
use std::path::{Path, PathBuf};

/// Resolved workspace layout.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Stack root, the directory containing `backend/`.
    pub root: PathBuf,
    /// Directives directory (BOOTSTRAP.md, RULES.md, progress.md, ...),
    /// when one could be located.
    pub directives_dir: Option<PathBuf>,
}

impl Workspace {
    /// Locate the workspace from the current directory. Fails when no
    /// stack root exists anywhere above.
    pub fn discover() -> Result<Self, SpookyError> {
        let cwd = env::current_dir()?;
        Self::discover_from(&cwd)
    }

    pub fn discover_from(start: &Path) -> Result<Self, SpookyError> {
        let root = find_project_root(start)?;
        let directives_dir = find_directives_dir(start).or_else(|| find_directives_dir(&root));
        Ok(Workspace {
            root,
            directives_dir,
        })
    }

    /// Like [`Workspace::discover`], but degrades to the current directory
    /// as root so preflight checks can still enumerate what is missing.
    pub fn discover_or_cwd() -> Result<Self, SpookyError> {
        let cwd = env::current_dir()?;
        match Self::discover_from(&cwd) {
            Ok(ws) => Ok(ws),
            Err(SpookyError::PathError(_)) => Ok(Workspace {
                directives_dir: find_directives_dir(&cwd),
                root: cwd,
            }),
            Err(e) => Err(e),
        }
    }

    pub fn backend_dir(&self) -> PathBuf {
        self.root.join("backend")
    }

    pub fn spec_file(&self) -> PathBuf {
        self.root.join("SPEC.md")
    }

    /// First existing RULES.md candidate; the first candidate path is
    /// returned (for error reporting) when none exists.
    pub fn rules_file(&self) -> PathBuf {
        let mut candidates = Vec::new();
        if let Some(dir) = &self.directives_dir {
            candidates.push(dir.join("RULES.md"));
        }
        candidates.push(self.root.join("directives").join("RULES.md"));
        candidates.push(self.root.join("RULES.md"));
        for candidate in &candidates {
            if candidate.is_file() {
                return candidate.clone();
            }
        }
        candidates.swap_remove(0)
    }

    pub fn chains_file(&self) -> PathBuf {
        match &self.directives_dir {
            Some(dir) => dir.join("CHAINS.md"),
            None => self.root.join("directives").join("CHAINS.md"),
        }
    }
}

/// Walk upward from `start` until a directory carrying `backend/Cargo.toml`
/// (directly or under `SpookyID_stack/`) is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, SpookyError> {
    for dir in start.ancestors() {
        if dir.join("backend").join("Cargo.toml").is_file() {
            return Ok(dir.to_path_buf());
        }
        let stacked = dir.join("SpookyID_stack");
        if stacked.join("backend").join("Cargo.toml").is_file() {
            return Ok(stacked);
        }
    }
    Err(SpookyError::PathError(format!(
        "could not find SpookyID project root above {} (expected backend/Cargo.toml)",
        start.display()
    )))
}

/// Walk upward from `start` looking for a directives directory, preferring
/// the `multipass/directives` layout at each level.
pub fn find_directives_dir(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let multipass = dir.join("multipass").join("directives");
        if multipass.join("BOOTSTRAP.md").is_file() {
            return Some(multipass);
        }
        let plain = dir.join("directives");
        if plain.join("BOOTSTRAP.md").is_file() {
            return Some(plain);
        }
    }
    None
}
