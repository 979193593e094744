//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::error::Result;
use legalytics_extractor::{PromptBuilder, ProtocolGrammar};
use std::fs;

/// Execute the prompt command.
pub async fn execute_prompt(args: PromptArgs, grammar: &ProtocolGrammar) -> Result<()> {
    let text = fs::read_to_string(&args.input)?;
    println!("{}", PromptBuilder::new(grammar).build(&text));
    Ok(())
}
