//! Relative POSIX path derivation
//!
//! Manifest keys are slash-separated paths relative to the snapshot root,
//! regardless of platform, so manifests written on one OS verify on another.

use crate::error::ScanError;
use std::path::Path;

/// Derive the POSIX-style relative path of `path` under `root`.
///
/// Components are joined with `/` on every platform.
pub fn relative_posix(root: &Path, path: &Path) -> Result<String, ScanError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ScanError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
