//! CLI parse: clap types for MerkleWatch. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MerkleWatch CLI - Tamper-evident directory fingerprinting
#[derive(Parser)]
#[command(name = "merklewatch")]
#[command(version)]
#[command(about = "Tamper-evident directory fingerprinting and verification using Merkle trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides merklewatch.toml discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (info level instead of warnings only)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a Merkle snapshot manifest of a directory
    Snapshot {
        /// The directory to snapshot
        directory: PathBuf,

        /// Output path for the manifest JSON file
        #[arg(long, short)]
        out: PathBuf,

        /// Also apply the curated common ignore patterns
        #[arg(long)]
        common_ignores: bool,
    },
    /// Verify a directory against a stored manifest
    Verify {
        /// Path to the manifest file
        manifest: PathBuf,

        /// The directory to verify
        directory: PathBuf,

        /// Show old/new content hashes for modified files
        #[arg(long)]
        detailed: bool,

        /// Also apply the curated common ignore patterns
        #[arg(long)]
        common_ignores: bool,
    },
    /// Diff two stored manifests
    Diff {
        /// Manifest taken as the old snapshot
        old_manifest: PathBuf,

        /// Manifest taken as the new snapshot
        new_manifest: PathBuf,
    },
}
