//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Front API export client
#[derive(Parser, Debug)]
#[command(name = "front-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API token (overrides the config file)
    #[arg(long, env = "API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL
    #[arg(long, env = "FRONT_API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Give up after this many consecutive 429 responses
    #[arg(long, global = true)]
    pub max_rate_limit_retries: Option<u32>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect every page of one or more collections and print items as JSON lines
    Fetch {
        /// Collection URLs or paths relative to the base URL
        #[arg(required = true)]
        urls: Vec<String>,

        /// Read error responses as pages instead of aborting
        #[arg(long)]
        lenient: bool,

        /// Print item counts instead of items
        #[arg(long)]
        count: bool,
    },

    /// Fetch a single resource and write its raw body to stdout
    Get {
        /// Resource URL or path relative to the base URL
        url: String,
    },

    /// List inboxes visible to the API token
    Inboxes,
}
