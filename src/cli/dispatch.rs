// src/cli/dispatch.rs
//! Command dispatch, extracted from the binary to keep `main` thin.

use anyhow::Result;

use super::args::Commands;
use super::handlers;
use crate::exit::ExitStatus;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<ExitStatus> {
    match command {
        Commands::Count { file } => handlers::handle_count(&file),
        Commands::Dbcalls { file, dir, json } => {
            handlers::handle_dbcalls(file.as_deref(), dir.as_deref(), json)
        }
        Commands::Cve { file, dir, json } => {
            handlers::handle_cve(file.as_deref(), dir.as_deref(), json)
        }
        Commands::Cfg { file, dead } => handlers::handle_cfg(&file, dead),
        Commands::Fmt { file } => handlers::handle_fmt(&file),
    }
}
