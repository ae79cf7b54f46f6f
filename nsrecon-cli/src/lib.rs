//! nsrecon CLI library.
//!
//! This crate provides the command handlers, configuration, and CSV
//! data model that power the `nsrecon` binary. The binary parses args
//! and initializes tracing, then hands the parsed [`cli::Cli`] to
//! [`run`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod record;

use cli::{Cli, Commands};
use config::Config;
use error::{CliError, CliResult};
use std::path::Path;

/// Dispatch a parsed [`Cli`] to the appropriate command handler.
pub async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Resolve {
            input,
            solr_url,
            wait,
        } => {
            require_input_file(&input)?;
            let config = Config::resolve(solr_url, None, wait, false)?;
            commands::resolve::run(&input, &config).await
        }

        Commands::Patch {
            input,
            fcrepo_url,
            dry_run,
            wait,
            skip_until,
        } => {
            require_input_file(&input)?;
            let config = Config::resolve(None, fcrepo_url, wait, dry_run)?;
            commands::patch::run(&input, skip_until.as_deref(), &config).await
        }
    }
}

/// Fatal precondition shared by both stages: the input CSV must exist.
fn require_input_file(path: &Path) -> CliResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::Usage(format!(
            "input CSV file '{}' not found",
            path.display()
        )))
    }
}
