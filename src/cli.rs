//! CLI definitions for OrbitLens.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// OrbitLens CLI.
#[derive(Parser)]
#[command(name = "orbitlens")]
#[command(about = "Contact enrichment widgets for GitHub, Gmail, Twitter/X and LinkedIn pages")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to the user config dir)
    #[arg(short, long, global = true, env = "ORBITLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the site integrations and the hosts they run on
    Sites {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print which page adapter claims a page snapshot
    Detect {
        /// Page snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Run one orchestration pass over a page snapshot
    Inject {
        /// Page snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Write the mutated snapshot here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Load one widget against a fixture of member-data responses
    Preview {
        /// Member-data responses (JSON object keyed by `platform:username` or `username`)
        #[arg(long)]
        responses: PathBuf,

        /// Handle to look up
        #[arg(long)]
        username: String,

        /// Platform the widget is for (github, gmail, twitter, linkedin)
        #[arg(long)]
        platform: String,

        /// Show every tag and identity instead of the truncated lists
        #[arg(long)]
        expand: bool,

        /// Output format; `json` prints the rendered widget subtree
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
