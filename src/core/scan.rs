//! Lexical identifier extraction over the backend source tree.
//!
//! Extraction is pattern-based by design: the checker reconciles what the
//! text of the code claims against what the documents define, and must not
//! depend on the backend's own toolchain. Each identifier category is one
//! entry in a fixed scan-rule table.

use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Identifier categories recognized by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// `R-<CATEGORY>-<digits>` security/business rule references.
    Rule,
    /// `Chain <1-9>` trust-chain references.
    Chain,
    /// First quoted argument of `.route("...")` registration calls.
    Route,
}

/// One scan rule: a category, its pattern, and the subtree it applies to.
pub struct ScanRule {
    pub category: Category,
    /// Regex with the identifier value in capture group 1. These literals
    /// are the interop contract with the existing specification documents.
    pub pattern: &'static str,
    /// Subtree below the backend directory, empty for the whole tree.
    pub subtree: &'static str,
}

const SCAN_RULES: &[ScanRule] = &[
    ScanRule {
        category: Category::Rule,
        pattern: r"\b(R-[A-Z]+-\d+)\b",
        subtree: "",
    },
    ScanRule {
        category: Category::Chain,
        pattern: r"\bChain\s+([1-9])\b",
        subtree: "",
    },
    ScanRule {
        category: Category::Route,
        pattern: r#"\.route\(\s*"([^"]+)""#,
        subtree: "src/bin",
    },
];

pub fn scan_rule(category: Category) -> &'static ScanRule {
    SCAN_RULES
        .iter()
        .find(|r| r.category == category)
        .expect("every category has a scan rule")
}

/// One occurrence of an identifier, relative to the backend directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
}

impl Occurrence {
    pub fn render(&self) -> String {
        format!("{}:{}", self.file.display(), self.line)
    }
}

/// Result of scanning one category across a tree.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Identifier value -> occurrences in visit order. Occurrences of the
    /// same value across files collapse onto one key.
    pub occurrences: BTreeMap<String, Vec<Occurrence>>,
    /// Files skipped because they could not be read; never aborts a scan.
    pub skipped: Vec<(PathBuf, String)>,
    /// Set when the category's subtree does not exist at all.
    pub missing_root: Option<PathBuf>,
}

impl ScanOutcome {
    /// Chain-number view of the occurrence keys.
    pub fn chain_numbers(&self) -> Vec<u8> {
        self.occurrences
            .keys()
            .filter_map(|k| k.parse::<u8>().ok())
            .collect()
    }
}

/// Walk the category's subtree and collect every identifier occurrence.
///
/// Directory entries are visited in sorted order so repeated scans of an
/// unchanged tree produce identical outcomes.
pub fn scan_tree(backend_dir: &Path, category: Category) -> ScanOutcome {
    let rule = scan_rule(category);
    let scan_root = if rule.subtree.is_empty() {
        backend_dir.to_path_buf()
    } else {
        backend_dir.join(rule.subtree)
    };

    let mut outcome = ScanOutcome::default();
    if !scan_root.is_dir() {
        outcome.missing_root = Some(scan_root);
        return outcome;
    }

    let re = Regex::new(rule.pattern).expect("scan patterns are fixed and valid");

    let mut files = Vec::new();
    collect_rs_files(&scan_root, &mut files);

    for file in files {
        let text = match fs::read_to_string(&file) {
            Ok(text) => text,
            Err(err) => {
                outcome.skipped.push((file, err.to_string()));
                continue;
            }
        };
        let rel = file
            .strip_prefix(backend_dir)
            .unwrap_or(&file)
            .to_path_buf();
        for (idx, line) in text.lines().enumerate() {
            for cap in re.captures_iter(line) {
                outcome
                    .occurrences
                    .entry(cap[1].to_string())
                    .or_default()
                    .push(Occurrence {
                        file: rel.clone(),
                        line: idx + 1,
                    });
            }
        }
    }

    outcome
}

fn collect_rs_files(dir: &Path, out: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        let mut entries: Vec<_> = entries.flatten().collect();
        entries.sort_by_key(|e| e.file_name());
        for entry in entries {
            let path = entry.path();
            if path.is_dir() {
                let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
                if name == ".git" || name == "target" {
                    continue;
                }
                collect_rs_files(&path, out);
            } else if path.is_file() && path.extension().is_some_and(|e| e == "rs") {
                out.push(path);
            }
        }
    }
}
