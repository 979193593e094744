//! Legalytics Extractor
//!
//! Pulls dates, monetary values, legal citations and key terms out of
//! Indonesian legal and financial text.
//!
//! # Overview
//!
//! A generative backend does the reading; everything around it is
//! deterministic. The extractor asks for a reply in a fixed line-oriented
//! grammar, parses that reply with a small state machine, splits each line
//! into typed fields, and optionally asks the backend once more per item for
//! a short description.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → CompletionBackend → SectionParser → decompose
//!      → Enricher → DocumentInsights → InsightBatch
//! ```
//!
//! # Key Features
//!
//! - **Tolerant parsing**: a malformed reply degrades to empty categories, never an error
//! - **Configurable grammar**: headings, bullets, separators and sentinels are data
//! - **Per-document isolation**: one failing document never aborts a batch
//! - **Bounded concurrency**: documents may run in parallel; items within a document never do
//!
//! # Example Usage
//!
//! ```
//! use legalytics_extractor::{Extractor, ExtractorConfig};
//! use legalytics_llm::MockProvider;
//! use std::collections::BTreeMap;
//!
//! # tokio_test::block_on(async {
//! let llm = MockProvider::new("Dates:\n- 17 Agustus 1945 - Proclamation date");
//! let config = ExtractorConfig { enrich: false, ..ExtractorConfig::default() };
//! let extractor = Extractor::new(llm, config).unwrap();
//!
//! let mut documents = BTreeMap::new();
//! documents.insert("proklamasi.txt".to_string(), "...".to_string());
//!
//! let batch = extractor.run(&documents).await;
//! let dates: Vec<_> = batch["proklamasi.txt"].dates().collect();
//! assert_eq!(dates[0].date, "17 Agustus 1945");
//! # });
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod store;
mod extractor;
pub mod prompt;
pub mod parser;
pub mod decompose;
pub mod enrich;


pub use error::ExtractorError;
pub use config::{CitationShape, ExtractorConfig, ProtocolGrammar, SectionSpec};
pub use types::{BatchReport, BatchSummary};
pub use store::MemoryDocumentStore;
pub use prompt::PromptBuilder;
pub use parser::{parse_reply, ParsedReply, SectionParser};
pub use enrich::{Enricher, EnrichmentStats};
pub use extractor::Extractor;
