//! Integration tests for scan determinism and sensitivity

use merklewatch::ignore::IgnoreRules;
use merklewatch::tree::scanner::{ScanOutcome, Scanner};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scan(root: &Path) -> ScanOutcome {
    let rules = IgnoreRules::default();
    Scanner::new(root, &rules).scan().unwrap()
}

fn build_fixture(root: &Path) {
    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("b.txt"), "beta").unwrap();
    fs::write(root.join("sub").join("c.txt"), "gamma").unwrap();
    fs::create_dir(root.join("sibling")).unwrap();
    fs::write(root.join("sibling").join("d.txt"), "delta").unwrap();
}

/// Two independent scans of an unchanged tree produce identical root hashes
/// and identical file/directory hash maps.
#[test]
fn test_two_scans_identical() {
    let temp_dir = TempDir::new().unwrap();
    build_fixture(temp_dir.path());

    let first = scan(temp_dir.path());
    let second = scan(temp_dir.path());

    assert_eq!(first.root_hash, second.root_hash);
    assert_eq!(first.files, second.files);
    assert_eq!(first.directories, second.directories);
}

/// The root hash is a function of content, not of file creation order.
#[test]
fn test_creation_order_does_not_matter() {
    let forward = TempDir::new().unwrap();
    fs::write(forward.path().join("a.txt"), "one").unwrap();
    fs::write(forward.path().join("b.txt"), "two").unwrap();
    fs::write(forward.path().join("c.txt"), "three").unwrap();

    let reverse = TempDir::new().unwrap();
    fs::write(reverse.path().join("c.txt"), "three").unwrap();
    fs::write(reverse.path().join("b.txt"), "two").unwrap();
    fs::write(reverse.path().join("a.txt"), "one").unwrap();

    assert_eq!(scan(forward.path()).root_hash, scan(reverse.path()).root_hash);
}

/// Changing a single byte in one file changes that file's hashes and every
/// ancestor's root, but no sibling's recorded hash.
#[test]
fn test_single_byte_sensitivity() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    build_fixture(root);

    let before = scan(root);
    fs::write(root.join("sub").join("b.txt"), "Beta").unwrap();
    let after = scan(root);

    // The changed file and every ancestor up to the snapshot root
    assert_ne!(
        before.files["sub/b.txt"].content_hash,
        after.files["sub/b.txt"].content_hash
    );
    assert_ne!(
        before.files["sub/b.txt"].leaf_hash,
        after.files["sub/b.txt"].leaf_hash
    );
    assert_ne!(
        before.directories["sub"].root_hash,
        after.directories["sub"].root_hash
    );
    assert_ne!(before.root_hash, after.root_hash);

    // No other file or sibling directory moves
    assert_eq!(before.files["a.txt"], after.files["a.txt"]);
    assert_eq!(before.files["sub/c.txt"], after.files["sub/c.txt"]);
    assert_eq!(before.files["sibling/d.txt"], after.files["sibling/d.txt"]);
    assert_eq!(before.directories["sibling"], after.directories["sibling"]);
}

/// Same tree, same ignore rules: same root. Different ignore rules: the
/// filtered entry no longer contributes.
#[test]
fn test_ignore_rules_participate_in_determinism() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("keep.txt"), "keep").unwrap();
    fs::write(root.join("noise.log"), "noise").unwrap();

    let rules = IgnoreRules::from_patterns(vec!["*.log".to_string()]);
    let filtered1 = Scanner::new(root, &rules).scan().unwrap();
    let filtered2 = Scanner::new(root, &rules).scan().unwrap();
    assert_eq!(filtered1.root_hash, filtered2.root_hash);

    let unfiltered = scan(root);
    assert_ne!(filtered1.root_hash, unfiltered.root_hash);
    assert!(!filtered1.files.contains_key("noise.log"));
}

/// An ignored-empty directory compares equal to a truly empty one.
#[test]
fn test_fully_ignored_root_equals_empty_root() {
    let empty = TempDir::new().unwrap();

    let populated = TempDir::new().unwrap();
    fs::write(populated.path().join("junk.tmp"), "junk").unwrap();

    let rules = IgnoreRules::from_patterns(vec!["*.tmp".to_string()]);
    let ignored = Scanner::new(populated.path(), &rules).scan().unwrap();

    assert_eq!(scan(empty.path()).root_hash, ignored.root_hash);
}
