//! Integration tests for verification and manifest diffing

use merklewatch::ignore::IgnoreRules;
use merklewatch::manifest::Manifest;
use merklewatch::tree::scanner::{ScanConfig, Scanner};
use merklewatch::verify::{compare, verify};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn snapshot(root: &Path) -> Manifest {
    let rules = IgnoreRules::default();
    let outcome = Scanner::new(root, &rules).scan().unwrap();
    Manifest::from_scan(outcome)
}

#[test]
fn test_verify_unchanged_tree_passes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("b.txt"), "beta").unwrap();

    let manifest = snapshot(root);
    let rules = IgnoreRules::default();
    let result = verify(&manifest, root, &rules, ScanConfig::default()).unwrap();

    assert!(result.success);
    assert_eq!(result.expected_root, result.actual_root);
    assert!(result.diff.is_empty());
}

#[test]
fn test_verify_detects_modification() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::write(root.join("b.txt"), "beta").unwrap();

    let manifest = snapshot(root);
    fs::write(root.join("b.txt"), "BETA").unwrap();

    let rules = IgnoreRules::default();
    let result = verify(&manifest, root, &rules, ScanConfig::default()).unwrap();

    assert!(!result.success);
    assert_ne!(result.expected_root, result.actual_root);
    assert_eq!(result.diff.modified, vec!["b.txt"]);
    assert!(result.diff.added.is_empty());
    assert!(result.diff.removed.is_empty());

    // Per-file detail is available without recomputing
    assert_ne!(
        result.old_files["b.txt"].content_hash,
        result.new_files["b.txt"].content_hash
    );
}

#[test]
fn test_verify_detects_added_and_removed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::write(root.join("b.txt"), "beta").unwrap();

    let manifest = snapshot(root);
    fs::remove_file(root.join("a.txt")).unwrap();
    fs::write(root.join("c.txt"), "gamma").unwrap();

    let rules = IgnoreRules::default();
    let result = verify(&manifest, root, &rules, ScanConfig::default()).unwrap();

    assert!(!result.success);
    assert_eq!(result.diff.added, vec!["c.txt"]);
    assert_eq!(result.diff.removed, vec!["a.txt"]);
    assert!(result.diff.modified.is_empty());
}

/// Rewriting a file with identical bytes bumps its mtime but not its content
/// digest: verification still passes.
#[test]
fn test_metadata_only_change_still_verifies() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "alpha").unwrap();

    let manifest = snapshot(root);

    std::thread::sleep(std::time::Duration::from_millis(20));
    fs::write(root.join("a.txt"), "alpha").unwrap();

    let rules = IgnoreRules::default();
    let result = verify(&manifest, root, &rules, ScanConfig::default()).unwrap();

    assert!(result.success);
    assert!(result.diff.is_empty());
}

#[test]
fn test_diff_between_two_manifests() {
    let old_dir = TempDir::new().unwrap();
    fs::write(old_dir.path().join("a.txt"), "one").unwrap();
    fs::write(old_dir.path().join("b.txt"), "two").unwrap();

    let new_dir = TempDir::new().unwrap();
    fs::write(new_dir.path().join("b.txt"), "two").unwrap();
    fs::write(new_dir.path().join("c.txt"), "three").unwrap();

    let old = snapshot(old_dir.path());
    let new = snapshot(new_dir.path());

    let diff = compare(&old.files, &new.files);
    assert_eq!(diff.added, vec!["c.txt"]);
    assert_eq!(diff.removed, vec!["a.txt"]);
    assert!(diff.modified.is_empty());
}

/// Verification applies the same ignore semantics as the snapshot: noise
/// that is ignored on both sides does not break the root.
#[test]
fn test_verify_with_matching_ignore_rules() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("src.rs"), "fn main() {}").unwrap();

    let rules = IgnoreRules::from_patterns(vec!["*.log".to_string()]);
    let outcome = Scanner::new(root, &rules).scan().unwrap();
    let manifest = Manifest::from_scan(outcome);

    // New noise appears, but the rules filter it out on re-scan
    fs::write(root.join("later.log"), "noise").unwrap();
    let result = verify(&manifest, root, &rules, ScanConfig::default()).unwrap();
    assert!(result.success);
}
