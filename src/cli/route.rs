//! CLI route: single route table dispatching to the engine and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_full_diff, format_snapshot_summary, format_verification};
use crate::config::{ConfigLoader, WatchConfig};
use crate::ignore::{all_common_patterns, IgnoreRules};
use crate::manifest::Manifest;
use crate::tree::scanner::Scanner;
use crate::verify;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Output of a routed command plus whether it counts as a success for the
/// process exit code (verification failure is a well-formed result that
/// still exits non-zero).
pub struct CommandResult {
    pub output: String,
    pub success: bool,
}

/// Runtime context for CLI execution: the optional explicit config path.
/// Per-command configuration is loaded from it, or discovered at the target
/// directory.
pub struct RunContext {
    config_path: Option<PathBuf>,
}

impl RunContext {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Execute a parsed command.
    pub fn execute(&self, command: &Commands) -> Result<CommandResult> {
        match command {
            Commands::Snapshot {
                directory,
                out,
                common_ignores,
            } => self.snapshot(directory, out, *common_ignores),
            Commands::Verify {
                manifest,
                directory,
                detailed,
                common_ignores,
            } => self.verify(manifest, directory, *detailed, *common_ignores),
            Commands::Diff {
                old_manifest,
                new_manifest,
            } => self.diff(old_manifest, new_manifest),
        }
    }

    fn load_config(&self, root: &Path) -> Result<WatchConfig> {
        let config = match &self.config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(root)?,
        };
        Ok(config)
    }

    fn ignore_rules(&self, root: &Path, config: &WatchConfig, common: bool) -> IgnoreRules {
        let mut rules = IgnoreRules::load_named(root, &config.ignore.file_name);
        if common {
            rules.extend(all_common_patterns());
        }
        rules
    }

    fn snapshot(&self, directory: &Path, out: &Path, common: bool) -> Result<CommandResult> {
        let config = self.load_config(directory)?;
        let rules = self.ignore_rules(directory, &config, common);

        let outcome = Scanner::new(directory, &rules)
            .with_config(config.scan)
            .scan()
            .with_context(|| format!("Failed to snapshot {}", directory.display()))?;

        let manifest = Manifest::from_scan(outcome);
        manifest
            .save(out)
            .with_context(|| format!("Failed to save manifest to {}", out.display()))?;

        Ok(CommandResult {
            output: format_snapshot_summary(
                &manifest.root_hash,
                &out.display().to_string(),
                manifest.files.len(),
            ),
            success: true,
        })
    }

    fn verify(
        &self,
        manifest_path: &Path,
        directory: &Path,
        detailed: bool,
        common: bool,
    ) -> Result<CommandResult> {
        let manifest = Manifest::load(manifest_path)
            .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;
        let config = self.load_config(directory)?;
        let rules = self.ignore_rules(directory, &config, common);

        let verification = verify::verify(&manifest, directory, &rules, config.scan)
            .with_context(|| format!("Failed to verify {}", directory.display()))?;

        Ok(CommandResult {
            output: format_verification(&verification, detailed),
            success: verification.success,
        })
    }

    fn diff(&self, old_path: &Path, new_path: &Path) -> Result<CommandResult> {
        let old = Manifest::load(old_path)
            .with_context(|| format!("Failed to load manifest {}", old_path.display()))?;
        let new = Manifest::load(new_path)
            .with_context(|| format!("Failed to load manifest {}", new_path.display()))?;

        let diff = verify::compare(&old.files, &new.files);
        Ok(CommandResult {
            output: format_full_diff(&diff, &old.files, &new.files, true),
            success: true,
        })
    }
}
