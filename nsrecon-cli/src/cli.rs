use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nsrecon", about = "Namespace reconciliation for Fedora repositories", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve namespace records to repository resources via the search index
    Resolve {
        /// Input CSV (must declare columns: namespace, namespaceUri, resource)
        input: PathBuf,

        /// Solr core URL (overrides SOLR_URL)
        #[arg(long)]
        solr_url: Option<String>,

        /// Seconds to pause after each row (overrides WAIT_SECONDS)
        #[arg(long)]
        wait: Option<u64>,
    },

    /// Retract namespace type assertions from resolved resources
    Patch {
        /// Input CSV (must declare columns: namespace, namespaceUri, resource)
        input: PathBuf,

        /// Fedora REST base endpoint (overrides FCREPO_REST_ENDPOINT)
        #[arg(long)]
        fcrepo_url: Option<String>,

        /// Synthesize and log updates without submitting them
        #[arg(long)]
        dry_run: bool,

        /// Seconds to pause after each row (overrides WAIT_SECONDS)
        #[arg(long)]
        wait: Option<u64>,

        /// Skip rows until the first one whose namespace equals this prefix
        #[arg(long)]
        skip_until: Option<String>,
    },
}
