//! Error types for the MerkleWatch integrity engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning a directory tree.
///
/// `Unreadable` and `Inaccessible` are recovered at per-entry granularity
/// during a scan (the entry is skipped with a warning); they only surface to
/// the caller when the scan root itself cannot be listed, or when the
/// unreadable-file policy is set to fail.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot read file {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot access directory {path:?}: {source}")]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path {path:?} is not inside the snapshot root {root:?}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Configuration and logging-setup errors.
#[derive(Debug, Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(pub String);

/// Errors raised while loading or saving a manifest.
///
/// All of these are fatal to the operation that needed the manifest; a
/// malformed manifest never yields a partial result.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid hash value in manifest: {0}")]
    InvalidHash(String),
}
