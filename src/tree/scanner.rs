//! Recursive directory scanner
//!
//! Walks a directory tree depth-first, post-order: each child is resolved to
//! a node hash (leaf for files, directory node for subtrees) in byte-wise
//! lexicographic name order, then the child hashes reduce to the directory's
//! own root. Per-entry failures never abort the parent scan; an unreadable
//! file or inaccessible subdirectory is skipped with a warning and simply
//! contributes nothing to its parent's hash list.

use crate::error::ScanError;
use crate::ignore::IgnoreRules;
use crate::manifest::{DirectoryEntry, FileEntry};
use crate::tree::{hasher, merkle, path};
use crate::types::{to_hex, Hash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::{debug, info, instrument, warn};

/// What to do when a file cannot be opened or read during a scan.
///
/// `Skip` (the default) omits the file from the hash list, which silently
/// changes the parent's root hash; `Fail` aborts the scan instead, for
/// callers that cannot tolerate an attacker hiding a tampered file behind
/// denied read permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    #[default]
    Skip,
    Fail,
}

/// Scan behavior knobs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Policy for unreadable files (default: skip with a warning).
    #[serde(default)]
    pub unreadable: UnreadablePolicy,
}

/// Result of scanning a directory tree: the Merkle root plus per-entry
/// metadata keyed by POSIX relative path.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub root_hash: Hash,
    pub files: BTreeMap<String, FileEntry>,
    pub directories: BTreeMap<String, DirectoryEntry>,
}

/// Recursive post-order directory scanner.
pub struct Scanner<'a> {
    root: PathBuf,
    ignore: &'a IgnoreRules,
    config: ScanConfig,
}

impl<'a> Scanner<'a> {
    /// Create a scanner for `root` with the given ignore rules.
    pub fn new(root: impl Into<PathBuf>, ignore: &'a IgnoreRules) -> Self {
        Self {
            root: root.into(),
            ignore,
            config: ScanConfig::default(),
        }
    }

    /// Set the scan configuration (unreadable-file policy).
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Scan the tree and compute its Merkle root.
    ///
    /// The root directory itself must be listable; below the root, failures
    /// are recovered per entry. An empty (or fully ignored) root yields the
    /// canonical empty root hash.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn scan(&self) -> Result<ScanOutcome, ScanError> {
        // The root has no parent to absorb an access failure, so surface it.
        fs::read_dir(&self.root).map_err(|e| ScanError::Inaccessible {
            path: self.root.clone(),
            source: e,
        })?;

        let mut files = BTreeMap::new();
        let mut directories = BTreeMap::new();
        let root_hash = self
            .scan_dir(&self.root, &mut files, &mut directories)?
            .unwrap_or_else(merkle::empty_root);

        info!(
            root_hash = %to_hex(&root_hash),
            file_count = files.len(),
            directory_count = directories.len(),
            "Scan completed"
        );
        Ok(ScanOutcome {
            root_hash,
            files,
            directories,
        })
    }

    /// Scan one directory, returning its subtree root.
    ///
    /// Returns `Ok(None)` when the directory contributes nothing to its
    /// parent: it cannot be listed, or every child was ignored or skipped.
    fn scan_dir(
        &self,
        dir: &Path,
        files: &mut BTreeMap<String, FileEntry>,
        directories: &mut BTreeMap<String, DirectoryEntry>,
    ) -> Result<Option<Hash>, ScanError> {
        let read_dir = match fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Cannot list directory, treating as absent");
                return Ok(None);
            }
        };

        let mut children: Vec<(OsString, PathBuf)> = Vec::new();
        for entry in read_dir {
            match entry {
                Ok(entry) => children.push((entry.file_name(), entry.path())),
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "Skipping unreadable directory entry");
                }
            }
        }
        // Byte-wise lexicographic order fixes which hashes pair with which,
        // independent of filesystem iteration order.
        children.sort_by(|a, b| a.0.cmp(&b.0));

        let mut child_hashes: Vec<Hash> = Vec::new();

        for (_, child_path) in children {
            let rel = path::relative_posix(&self.root, &child_path)?;

            let metadata = match fs::symlink_metadata(&child_path) {
                Ok(m) => m,
                Err(e) => {
                    warn!(path = %rel, error = %e, "Skipping entry with unreadable metadata");
                    continue;
                }
            };
            let file_type = metadata.file_type();

            if file_type.is_symlink() {
                // Symlink resolution is unsupported: cycles and ambiguous
                // semantics, not an oversight.
                warn!(path = %rel, "Skipping symbolic link");
                continue;
            }

            if self.ignore.should_ignore(&rel, file_type.is_dir()) {
                debug!(path = %rel, "Ignored");
                continue;
            }

            if file_type.is_file() {
                let content_digest = match hasher::hash_file(&child_path) {
                    Ok(digest) => digest,
                    Err(e) => match self.config.unreadable {
                        UnreadablePolicy::Skip => {
                            warn!(path = %rel, error = %e, "Skipping unreadable file");
                            continue;
                        }
                        UnreadablePolicy::Fail => return Err(e),
                    },
                };
                let leaf = hasher::leaf_hash(&content_digest);
                child_hashes.push(leaf);

                let mtime = metadata
                    .modified()
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_secs_f64())
                    .unwrap_or(0.0);
                files.insert(
                    rel,
                    FileEntry {
                        size: metadata.len(),
                        mtime,
                        content_hash: to_hex(&content_digest),
                        leaf_hash: to_hex(&leaf),
                    },
                );
            } else if file_type.is_dir() {
                match self.scan_dir(&child_path, files, directories)? {
                    Some(subtree_root) => {
                        let node_hash = hasher::dir_node_hash(&subtree_root);
                        child_hashes.push(node_hash);
                        directories.insert(
                            rel,
                            DirectoryEntry {
                                root_hash: to_hex(&subtree_root),
                                node_hash: to_hex(&node_hash),
                            },
                        );
                    }
                    None => {
                        // Empty or inaccessible: indistinguishable from "not
                        // present" to the parent.
                        debug!(path = %rel, "Subdirectory contributes nothing");
                    }
                }
            }
            // Other file types (sockets, fifos, devices) are not snapshot
            // content and are skipped.
        }

        if child_hashes.is_empty() {
            return Ok(None);
        }
        Ok(Some(merkle::merkle_root(&child_hashes)))
    }
}
