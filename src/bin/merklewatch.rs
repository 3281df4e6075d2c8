//! MerkleWatch CLI Binary
//!
//! Command-line interface for directory snapshotting and verification.

use clap::Parser;
use merklewatch::cli::{map_error, Cli, RunContext};
use merklewatch::config::ConfigLoader;
use merklewatch::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("MerkleWatch CLI starting");

    let context = RunContext::new(cli.config.clone());
    match context.execute(&cli.command) {
        Ok(result) => {
            println!("{}", result.output);
            if !result.success {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// CLI flags take the highest priority.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        LoggingConfig::default()
    };

    if cli.verbose {
        config.level = "info".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
        config.output = "file".to_string();
    }

    config
}
