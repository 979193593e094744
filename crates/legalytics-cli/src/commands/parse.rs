//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::error::Result;
use legalytics_domain::DocumentInsights;
use legalytics_extractor::{parse_reply, ProtocolGrammar};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Execute the parse command.
pub async fn execute_parse(args: ParseArgs, grammar: &ProtocolGrammar) -> Result<()> {
    let insights = parse_reply_file(&args.reply, grammar)?;
    println!("{}", serde_json::to_string_pretty(&insights)?);
    Ok(())
}

/// Run the section parser and decomposers over a saved reply.
pub fn parse_reply_file(path: &Path, grammar: &ProtocolGrammar) -> Result<DocumentInsights> {
    let reply = fs::read_to_string(path)?;
    let parsed = parse_reply(&reply, grammar);
    debug!(
        "Parsed {} items, dropped {} orphan bullets",
        parsed.items.len(),
        parsed.orphan_bullets
    );
    Ok(parsed.into_insights(grammar.categories()))
}
