//! CLI domain: parse, route, and presentation only.
//! No hashing logic; a single route table dispatches to the engine.

mod parse;
mod presentation;
mod route;

pub use parse::{Cli, Commands};
pub use presentation::{
    format_diff_summary, format_full_diff, format_snapshot_summary, format_verification,
};
pub use route::{CommandResult, RunContext};

/// Map an error chain to a string for CLI output.
pub fn map_error(e: &anyhow::Error) -> String {
    format!("{:#}", e)
}
