//! Persisted snapshot manifest.
//!
//! A manifest wraps a computed root hash and the per-entry metadata maps with
//! format metadata and a creation timestamp. It is immutable after creation
//! and persisted verbatim as JSON with sorted keys and 2-space indentation,
//! so the same inputs and timestamp reproduce the same bytes.

use crate::error::ManifestError;
use crate::tree::scanner::ScanOutcome;
use crate::types::{parse_hex, to_hex};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// The only hash algorithm the current format supports.
pub const ALGORITHM_SHA256: &str = "sha256";

/// Per-file snapshot metadata, keyed by POSIX relative path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub size: u64,
    pub mtime: f64,
    /// SHA-256 of the file's raw bytes, lowercase hex.
    pub content_hash: String,
    /// Domain-tagged leaf hash, lowercase hex.
    pub leaf_hash: String,
}

/// Per-directory snapshot metadata, keyed by POSIX relative path.
/// Recorded only for non-empty, non-ignored, accessible subdirectories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Merkle root of the subtree, lowercase hex.
    pub root_hash: String,
    /// Domain-tagged directory node hash, lowercase hex.
    pub node_hash: String,
}

/// A complete directory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub merklewatch_version: String,
    pub algorithm: String,
    /// Creation time, float seconds since the Unix epoch.
    pub timestamp: f64,
    /// Creation time, UTC ISO-8601.
    pub timestamp_iso: String,
    /// Merkle root of the whole tree, lowercase hex.
    pub root_hash: String,
    pub files: BTreeMap<String, FileEntry>,
    pub directories: BTreeMap<String, DirectoryEntry>,
}

impl Manifest {
    /// Assemble a manifest from a scan outcome, stamping the crate version
    /// and the current UTC time.
    pub fn from_scan(outcome: ScanOutcome) -> Self {
        let now = Utc::now();
        Self {
            merklewatch_version: env!("CARGO_PKG_VERSION").to_string(),
            algorithm: ALGORITHM_SHA256.to_string(),
            timestamp: now.timestamp_micros() as f64 / 1_000_000.0,
            timestamp_iso: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            root_hash: to_hex(&outcome.root_hash),
            files: outcome.files,
            directories: outcome.directories,
        }
    }

    /// Write the manifest as JSON: keys sorted, 2-space indent.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        // Routing through Value sorts object keys (serde_json's map is
        // ordered); struct field order would not be.
        let value = serde_json::to_value(self)?;
        let json = serde_json::to_string_pretty(&value)?;
        fs::write(path, json)?;
        info!(path = %path.display(), root_hash = %self.root_hash, "Manifest saved");
        Ok(())
    }

    /// Load and validate a manifest.
    ///
    /// Missing fields, non-JSON input, an unknown algorithm, or any hash
    /// field that is not 64 lowercase hex characters is fatal; no partial
    /// manifest is returned.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path)?;
        let manifest: Manifest = serde_json::from_str(&contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        if self.algorithm != ALGORITHM_SHA256 {
            return Err(ManifestError::UnsupportedAlgorithm(self.algorithm.clone()));
        }
        parse_hex(&self.root_hash)?;
        for entry in self.files.values() {
            parse_hex(&entry.content_hash)?;
            parse_hex(&entry.leaf_hash)?;
        }
        for entry in self.directories.values() {
            parse_hex(&entry.root_hash)?;
            parse_hex(&entry.node_hash)?;
        }
        Ok(())
    }
}
