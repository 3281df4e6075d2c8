//! CLI presentation: colored diff and verification formatting.

use crate::manifest::FileEntry;
use crate::verify::{Diff, Verification};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// One-line change summary, e.g. `3 changes: 1 added, 1 removed, 1 modified`.
pub fn format_diff_summary(diff: &Diff) -> String {
    let mut parts = Vec::new();
    if !diff.added.is_empty() {
        parts.push(format!("{} added", diff.added.len()));
    }
    if !diff.removed.is_empty() {
        parts.push(format!("{} removed", diff.removed.len()));
    }
    if !diff.modified.is_empty() {
        parts.push(format!("{} modified", diff.modified.len()));
    }
    format!("{} changes: {}", diff.len(), parts.join(", "))
}

/// Full diff listing: added in green, removed in red, modified in yellow,
/// with old/new content hashes per modified file when `detailed` is set.
pub fn format_full_diff(
    diff: &Diff,
    old_files: &BTreeMap<String, FileEntry>,
    new_files: &BTreeMap<String, FileEntry>,
    detailed: bool,
) -> String {
    if diff.is_empty() {
        return format!("{}", "No differences found.".green());
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Summary:".bold(), format_diff_summary(diff));

    if !diff.added.is_empty() {
        let _ = writeln!(out, "\n{}", "✓ Added files:".green().bold());
        for path in &diff.added {
            let _ = writeln!(out, "{}", format!("  + {}", path).green());
        }
    }
    if !diff.removed.is_empty() {
        let _ = writeln!(out, "\n{}", "✗ Removed files:".red().bold());
        for path in &diff.removed {
            let _ = writeln!(out, "{}", format!("  - {}", path).red());
        }
    }
    if !diff.modified.is_empty() {
        let _ = writeln!(out, "\n{}", "⚠ Modified files:".yellow().bold());
        for path in &diff.modified {
            let _ = writeln!(out, "{}", format!("  M {}", path).yellow());
        }
        if detailed {
            let _ = writeln!(out);
            for path in &diff.modified {
                let old_hash = old_files
                    .get(path)
                    .map(|e| e.content_hash.as_str())
                    .unwrap_or("N/A");
                let new_hash = new_files
                    .get(path)
                    .map(|e| e.content_hash.as_str())
                    .unwrap_or("N/A");
                let _ = writeln!(out, "  {}", path.yellow());
                let _ = writeln!(out, "      Old: {}", old_hash.red());
                let _ = writeln!(out, "      New: {}", new_hash.green());
            }
        }
    }

    out.trim_end().to_string()
}

/// Verification report: pass/fail banner, root hashes, and the diff on
/// failure.
pub fn format_verification(verification: &Verification, detailed: bool) -> String {
    if verification.success {
        return format!(
            "{}\nRoot Hash: {}",
            "✓ Verification PASSED".green().bold(),
            verification.actual_root
        );
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", "✗ Verification FAILED!".red().bold());
    let _ = writeln!(out, "\nRoot Hash Mismatch:");
    let _ = writeln!(out, "  Expected: {}", verification.expected_root.red());
    let _ = writeln!(out, "  Actual:   {}", verification.actual_root.green());
    let _ = writeln!(out);
    let _ = write!(
        out,
        "{}",
        format_full_diff(
            &verification.diff,
            &verification.old_files,
            &verification.new_files,
            detailed,
        )
    );
    out
}

/// Snapshot confirmation with root hash and manifest location.
pub fn format_snapshot_summary(root_hash: &str, manifest_path: &str, file_count: usize) -> String {
    format!(
        "{}\nRoot Hash: {}\nFiles: {}\nManifest saved to: {}",
        "Snapshot created successfully!".green(),
        root_hash,
        file_count,
        manifest_path
    )
}
