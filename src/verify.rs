//! Verifier and manifest differ.
//!
//! Verification re-scans a live directory with the same ignore semantics and
//! compares root hashes; exact equality of the 256-bit value is the sole
//! pass/fail criterion. On mismatch the per-file maps are diffed so callers
//! can report exactly what changed without recomputing anything. Each call is
//! a stateless pure function of its two inputs.

use crate::error::ScanError;
use crate::ignore::IgnoreRules;
use crate::manifest::{FileEntry, Manifest};
use crate::tree::scanner::{ScanConfig, Scanner};
use crate::types::to_hex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Set-based difference between two snapshots' file maps.
///
/// Only the content digest participates in the modified test; two files with
/// identical bytes but different size/mtime metadata are not modified.
/// All three sets are sorted for stable output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diff {
    /// Paths present only in the new snapshot.
    pub added: Vec<String>,
    /// Paths present only in the old snapshot.
    pub removed: Vec<String>,
    /// Paths present in both with differing content digests.
    pub modified: Vec<String>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Total number of changed paths.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

/// Outcome of verifying a directory against a stored manifest.
#[derive(Debug, Clone)]
pub struct Verification {
    pub success: bool,
    pub expected_root: String,
    pub actual_root: String,
    /// Empty when the roots match.
    pub diff: Diff,
    /// File map from the stored manifest.
    pub old_files: BTreeMap<String, FileEntry>,
    /// File map from the fresh scan.
    pub new_files: BTreeMap<String, FileEntry>,
}

/// Compute added/removed/modified sets between two path-to-entry maps.
pub fn compare(
    old_files: &BTreeMap<String, FileEntry>,
    new_files: &BTreeMap<String, FileEntry>,
) -> Diff {
    let mut diff = Diff::default();

    // BTreeMap iteration is already sorted, so the sets come out sorted.
    for path in new_files.keys() {
        if !old_files.contains_key(path) {
            diff.added.push(path.clone());
        }
    }
    for (path, old_entry) in old_files {
        match new_files.get(path) {
            None => diff.removed.push(path.clone()),
            Some(new_entry) if new_entry.content_hash != old_entry.content_hash => {
                diff.modified.push(path.clone());
            }
            Some(_) => {}
        }
    }
    diff
}

/// Re-scan `directory` and compare against `manifest`.
pub fn verify(
    manifest: &Manifest,
    directory: &Path,
    ignore: &IgnoreRules,
    config: ScanConfig,
) -> Result<Verification, ScanError> {
    let outcome = Scanner::new(directory, ignore).with_config(config).scan()?;
    let actual_root = to_hex(&outcome.root_hash);
    let success = manifest.root_hash == actual_root;

    let diff = if success {
        debug!(root_hash = %actual_root, "Verification passed");
        Diff::default()
    } else {
        info!(
            expected = %manifest.root_hash,
            actual = %actual_root,
            "Root hash mismatch, computing diff"
        );
        compare(&manifest.files, &outcome.files)
    };

    Ok(Verification {
        success,
        expected_root: manifest.root_hash.clone(),
        actual_root,
        diff,
        old_files: manifest.files.clone(),
        new_files: outcome.files,
    })
}
