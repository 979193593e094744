//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Legalytics - Extract dates, amounts, citations and key terms from Indonesian legal text.
#[derive(Debug, Parser)]
#[command(name = "legalytics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ~/.legalytics/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Chat-completions endpoint, overriding the config file
    #[arg(long, env = "GROQ_API_URL", global = true)]
    pub endpoint: Option<String>,

    /// Model name, overriding the config file
    #[arg(long, env = "GROQ_MODEL", global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract insights from every .txt file in a directory
    Extract(ExtractArgs),

    /// Parse a saved model reply without calling the backend
    Parse(ParseArgs),

    /// Print the extraction prompt for a text file
    Prompt(PromptArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Directory holding pre-extracted document text (*.txt)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the JSON result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the per-item description calls
    #[arg(long)]
    pub no_enrich: bool,

    /// Documents processed at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-document deadline in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// File holding a raw model reply
    #[arg(short, long)]
    pub reply: PathBuf,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Document text file
    #[arg(short, long)]
    pub input: PathBuf,
}
