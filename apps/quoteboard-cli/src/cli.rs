//! Command line definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "quoteboard")]
#[command(about = "Quoteboard - keep a quote collection in sync with a remote source")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(short = 'C', long, global = true, env = "QUOTEBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file (overrides config and QUOTEBOARD_DB_PATH)
    #[arg(long, global = true, conflicts_with = "ephemeral")]
    pub db: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a random quote
    Show {
        /// Category to pick from ("all" for no filter). Saved as the new
        /// default; when omitted the last selected category is used
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List categories in order of first appearance
    Categories,

    /// Add a quote and submit it to the remote
    Add {
        /// Quote text
        text: String,

        /// Category label
        category: String,
    },

    /// Append quotes from a JSON file (no de-duplication)
    Import {
        /// JSON array of {"text", "category"} objects
        file: PathBuf,
    },

    /// Write the collection as pretty-printed JSON
    Export {
        /// Output file or directory
        #[arg(short, long, default_value = "quotes.json")]
        output: PathBuf,
    },

    /// Run one reconciliation cycle against the remote
    Sync,

    /// Reconcile periodically until Ctrl-C
    Watch {
        /// Seconds between cycles (overrides config)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}
