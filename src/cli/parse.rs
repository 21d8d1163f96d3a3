//! CLI parse: clap types for aider-launch. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aider-launch - pick vendor, model and edit format, then launch aider
#[derive(Parser, Debug)]
#[command(name = "aider-launch")]
#[command(about = "Interactive launcher for the aider coding assistant")]
pub struct Cli {
    /// Run without a subcommand for the interactive session
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (replaces the default config locations)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API keys file (takes precedence over $PRIMARY_KEYS_FILE)
    #[arg(long)]
    pub keys_file: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show configured vendors and where their API keys come from
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}
