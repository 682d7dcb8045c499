use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "flatcache")]
#[command(version, about = "Inspect and sweep a flatcache directory")]
pub struct Cli {
    /// Cache directory (overrides configuration and DOCUMENT_ROOT)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log output (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Remove every entry
    Clear,
    /// Remove entries older than a maximum age
    ClearOld {
        /// Maximum age in seconds (default from configuration, one day)
        #[arg(short, long)]
        max_age: Option<u64>,
    },
    /// Print an entry as JSON; exits with 1 when absent or expired
    Get {
        name: String,
        /// Time-to-live in seconds (default from configuration)
        #[arg(short, long)]
        ttl: Option<u64>,
    },
    /// Store a JSON value
    Put {
        name: String,
        /// Value as JSON text
        value: String,
    },
    /// Delete an entry
    Delete { name: String },
    /// List entries with size and age
    List,
    /// Show the effective configuration
    Config,
}
