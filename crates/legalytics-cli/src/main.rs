//! Legalytics CLI - Extract insights from Indonesian legal and financial documents.

use clap::Parser;
use legalytics_cli::commands;
use legalytics_cli::{Cli, Command, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing (log to stderr, stdout carries results)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> legalytics_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.endpoint, cli.model);
    config.extractor.validate()?;

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config).await,
        Command::Parse(args) => commands::execute_parse(args, &config.extractor.grammar).await,
        Command::Prompt(args) => commands::execute_prompt(args, &config.extractor.grammar).await,
    }
}
