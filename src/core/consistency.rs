//! Set reconciliation between code-referenced identifiers and documented
//! definitions.
//!
//! Every referenced identifier lands in exactly one of `valid` or
//! `undefined`; the undefined side is what drives the nonzero exit code.

use rustc_hash::FxHashSet;
use serde::Serialize;

/// Outcome of reconciling one identifier category.
#[derive(Debug, Serialize)]
pub struct CategoryReport {
    /// Referenced in code and defined in the documents, sorted.
    pub valid: Vec<String>,
    /// Referenced in code but absent from the documents, sorted.
    pub undefined: Vec<String>,
}

impl CategoryReport {
    pub fn issue_count(&self) -> usize {
        self.undefined.len()
    }

    pub fn is_clean(&self) -> bool {
        self.undefined.is_empty()
    }
}

/// Partition referenced identifiers against the defined set.
pub fn reconcile<'a, I>(referenced: I, defined: &FxHashSet<String>) -> CategoryReport
where
    I: IntoIterator<Item = &'a String>,
{
    let mut valid = Vec::new();
    let mut undefined = Vec::new();
    for ident in referenced {
        if defined.contains(ident) {
            valid.push(ident.clone());
        } else {
            undefined.push(ident.clone());
        }
    }
    valid.sort();
    undefined.sort();
    CategoryReport { valid, undefined }
}

/// Chain variant: containment is a predicate over the chains document, not
/// a full definition index.
#[derive(Debug, Serialize)]
pub struct ChainReport {
    pub valid: Vec<u8>,
    pub undocumented: Vec<u8>,
}

impl ChainReport {
    pub fn issue_count(&self) -> usize {
        self.undocumented.len()
    }
}

pub fn reconcile_chains<F>(referenced: &[u8], documented: F) -> ChainReport
where
    F: Fn(u8) -> bool,
{
    let mut valid = Vec::new();
    let mut undocumented = Vec::new();
    for &chain in referenced {
        if documented(chain) {
            valid.push(chain);
        } else {
            undocumented.push(chain);
        }
    }
    valid.sort_unstable();
    undocumented.sort_unstable();
    ChainReport {
        valid,
        undocumented,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> FxHashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partition_is_exact_and_disjoint() {
        let referenced = vec![
            "R-AUTH-002".to_string(),
            "R-AUTH-001".to_string(),
            "R-TOKEN-003".to_string(),
        ];
        let defined = set(&["R-AUTH-001"]);

        let report = reconcile(&referenced, &defined);
        assert_eq!(report.valid, vec!["R-AUTH-001"]);
        assert_eq!(report.undefined, vec!["R-AUTH-002", "R-TOKEN-003"]);
        assert_eq!(report.valid.len() + report.undefined.len(), referenced.len());
        assert!(report.valid.iter().all(|v| !report.undefined.contains(v)));
        assert_eq!(report.issue_count(), 2);
    }

    #[test]
    fn test_empty_referenced_is_clean() {
        let report = reconcile(&[], &set(&["R-AUTH-001"]));
        assert!(report.is_clean());
        assert!(report.valid.is_empty());
    }

    #[test]
    fn test_chain_predicate_partition() {
        let report = reconcile_chains(&[9, 1, 4], |n| n == 1 || n == 9);
        assert_eq!(report.valid, vec![1, 9]);
        assert_eq!(report.undocumented, vec![4]);
        assert_eq!(report.issue_count(), 1);
    }
}
