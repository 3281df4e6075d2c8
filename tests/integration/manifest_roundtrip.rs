//! Integration tests for manifest persistence

use merklewatch::ignore::IgnoreRules;
use merklewatch::manifest::{Manifest, ALGORITHM_SHA256};
use merklewatch::tree::scanner::Scanner;
use std::fs;
use tempfile::TempDir;

fn snapshot_of(files: &[(&str, &str)]) -> (TempDir, Manifest) {
    let temp_dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).unwrap();
    }
    let rules = IgnoreRules::default();
    let outcome = Scanner::new(temp_dir.path(), &rules).scan().unwrap();
    let manifest = Manifest::from_scan(outcome);
    (temp_dir, manifest)
}

#[test]
fn test_round_trip_preserves_all_fields() {
    let (_tree, manifest) = snapshot_of(&[("a.txt", "alpha"), ("b.txt", "beta")]);

    let out_dir = TempDir::new().unwrap();
    let path = out_dir.path().join("manifest.json");
    manifest.save(&path).unwrap();
    let loaded = Manifest::load(&path).unwrap();

    assert_eq!(loaded, manifest);
}

#[test]
fn test_manifest_metadata_stamped() {
    let (_tree, manifest) = snapshot_of(&[("a.txt", "alpha")]);

    assert_eq!(manifest.algorithm, ALGORITHM_SHA256);
    assert_eq!(manifest.merklewatch_version, env!("CARGO_PKG_VERSION"));
    assert_eq!(manifest.root_hash.len(), 64);
    assert!(manifest.timestamp > 0.0);
    // ISO form ends in Z and parses back to a date
    assert!(manifest.timestamp_iso.ends_with('Z'));
}

#[test]
fn test_persisted_layout_sorted_two_space_indent() {
    let (_tree, manifest) = snapshot_of(&[("a.txt", "alpha")]);

    let out_dir = TempDir::new().unwrap();
    let path = out_dir.path().join("manifest.json");
    manifest.save(&path).unwrap();

    let json = fs::read_to_string(&path).unwrap();
    assert!(json.starts_with("{\n  \""));
    // Top-level keys appear in sorted order
    let order = [
        "\"algorithm\"",
        "\"directories\"",
        "\"files\"",
        "\"merklewatch_version\"",
        "\"root_hash\"",
        "\"timestamp\"",
        "\"timestamp_iso\"",
    ];
    let positions: Vec<usize> = order.iter().map(|k| json.find(k).unwrap()).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn test_two_snapshots_differ_only_in_timestamps() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "alpha").unwrap();

    let rules = IgnoreRules::default();
    let first = Manifest::from_scan(Scanner::new(temp_dir.path(), &rules).scan().unwrap());
    let second = Manifest::from_scan(Scanner::new(temp_dir.path(), &rules).scan().unwrap());

    assert_eq!(first.root_hash, second.root_hash);
    assert_eq!(first.files, second.files);
    assert_eq!(first.directories, second.directories);
    assert_eq!(first.algorithm, second.algorithm);
}

#[test]
fn test_tampered_manifest_is_fatal() {
    let (_tree, manifest) = snapshot_of(&[("a.txt", "alpha")]);

    let out_dir = TempDir::new().unwrap();
    let path = out_dir.path().join("manifest.json");
    manifest.save(&path).unwrap();

    // Truncate the root hash
    let json = fs::read_to_string(&path).unwrap();
    let broken = json.replace(&manifest.root_hash, "abc123");
    fs::write(&path, broken).unwrap();

    assert!(Manifest::load(&path).is_err());
}
