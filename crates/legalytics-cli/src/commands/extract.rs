//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::write_output;
use crate::config::Config;
use crate::error::Result;
use crate::input::read_text_dir;
use legalytics_extractor::{Extractor, ExtractorConfig};
use legalytics_llm::GroqProvider;
use tracing::warn;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config) -> Result<()> {
    let extractor_config = effective_config(&args, &config.extractor);

    // Backend and extractor settings are checked before any file is read
    let provider = GroqProvider::from_config(&config.backend)?;
    let model = provider.model().to_string();
    let extractor = Extractor::new(provider, extractor_config)?.with_model_name(model);

    let documents = read_text_dir(&args.input)?;
    if documents.is_empty() {
        warn!("No .txt files found in {}", args.input.display());
    }

    let report = extractor.run_with_report(&documents).await;
    if !report.failed.is_empty() {
        let failed: Vec<_> = report.failed.iter().map(String::as_str).collect();
        warn!("Failed documents: {}", failed.join(", "));
    }

    let json = serde_json::to_string_pretty(&report.insights)?;
    write_output(args.output.as_deref(), &json)
}

/// Extractor settings with command-line flags applied over the file.
fn effective_config(args: &ExtractArgs, base: &ExtractorConfig) -> ExtractorConfig {
    let mut config = base.clone();
    if args.no_enrich {
        config.enrich = false;
    }
    if let Some(workers) = args.concurrency {
        config.max_concurrent_documents = workers;
    }
    if let Some(secs) = args.timeout {
        config.document_timeout_secs = Some(secs);
    }
    config
}
