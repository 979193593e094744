//! Configuration for the Extractor
//!
//! The reply grammar lives here as data so the section parser never holds
//! literal heading, bullet, or separator strings of its own.

use crate::error::ExtractorError;
use legalytics_domain::Category;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;

/// Free-form "nothing found" replies in English or Indonesian
static NOTHING_FOUND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:no\b.*\b(?:found|extracted|identified|mentioned)\b",
        r"|not\s+(?:found|mentioned|available)\b",
        r"|none\b",
        r"|tidak\s+(?:ada|ditemukan|terdapat)\b)",
    ))
    .unwrap()
});

/// How citation lines are decomposed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationShape {
    /// `<title>: Nomor <digits> ...`, with the law number split into its own field
    #[default]
    TitleAndNumber,
    /// A title ending in a 4-digit year, taken by greedy prefix match
    TitleWithYear,
}


/// One category the model is asked for, and its heading marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Category collected under this heading
    pub category: Category,
    /// Heading marker as it appears in the reply, e.g. "Dates:"
    pub heading: String,
}

impl SectionSpec {
    /// Create a section spec
    pub fn new(category: Category, heading: impl Into<String>) -> Self {
        Self {
            category,
            heading: heading.into(),
        }
    }
}

/// Output grammar shared by the prompt builder and the section parser
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolGrammar {
    /// Markers accepted at the start of a content line
    pub bullet_markers: Vec<String>,

    /// Marker the prompt asks the model to use
    pub prompt_bullet: String,

    /// Separates an item from its context explanation
    pub separator: String,

    /// Joins key terms on their single line
    pub keyterm_delimiter: String,

    /// "Nothing found" phrases that never become items
    pub sentinels: Vec<String>,

    /// Sentinel the prompt asks the model to emit
    pub prompt_sentinel: String,

    /// Citation decomposition shape
    pub citation_shape: CitationShape,

    /// Configured categories, in prompt order
    pub sections: Vec<SectionSpec>,
}

impl Default for ProtocolGrammar {
    fn default() -> Self {
        Self {
            bullet_markers: vec!["-".to_string(), "*".to_string()],
            prompt_bullet: "-".to_string(),
            separator: " - ".to_string(),
            keyterm_delimiter: ", ".to_string(),
            sentinels: vec![
                "No information found".to_string(),
                "No monetary values extracted".to_string(),
                "Not found".to_string(),
            ],
            prompt_sentinel: "No information found".to_string(),
            citation_shape: CitationShape::TitleAndNumber,
            sections: vec![
                SectionSpec::new(Category::Dates, "Dates:"),
                SectionSpec::new(Category::MonetaryValues, "Monetary values:"),
                SectionSpec::new(Category::Citations, "Citations:"),
                SectionSpec::new(Category::Keyterms, "Key terms:"),
            ],
        }
    }
}

impl ProtocolGrammar {
    /// Configured categories, in prompt order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections.iter().map(|s| s.category)
    }

    /// Heading marker of a configured category
    pub fn heading(&self, category: Category) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.heading.as_str())
    }

    /// Whether `text` is a "nothing found" phrase
    ///
    /// Comparison ignores case, surrounding quotes or brackets, and a
    /// trailing full stop. A configured sentinel matches as a prefix, so
    /// "No information found in the text" counts; common free-form
    /// variants ("No monetary values found", "Tidak ditemukan") count too.
    pub fn is_sentinel(&self, text: &str) -> bool {
        let normalized = text
            .trim()
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '[' | ']' | '(' | ')' | '.'))
            .trim()
            .to_lowercase();
        if normalized.is_empty() {
            return false;
        }
        self.sentinels
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .any(|s| {
                normalized
                    .strip_prefix(s.as_str())
                    .is_some_and(|rest| !rest.starts_with(char::is_alphanumeric))
            })
            || NOTHING_FOUND_PATTERN.is_match(&normalized)
    }

    /// Validate the grammar
    pub fn validate(&self) -> Result<(), String> {
        if self.sections.is_empty() {
            return Err("at least one section must be configured".to_string());
        }
        for (idx, section) in self.sections.iter().enumerate() {
            if section.heading.trim().is_empty() {
                return Err(format!("heading for {} is empty", section.category));
            }
            if self.sections[..idx].iter().any(|s| s.category == section.category) {
                return Err(format!("category {} is configured twice", section.category));
            }
        }
        if self.bullet_markers.iter().all(|m| m.trim().is_empty()) {
            return Err("at least one non-empty bullet marker is required".to_string());
        }
        if self.prompt_bullet.trim().is_empty() {
            return Err("prompt_bullet must not be empty".to_string());
        }
        if self.separator.trim().is_empty() {
            return Err("separator must contain a visible character".to_string());
        }
        if self.keyterm_delimiter.is_empty() {
            return Err("keyterm_delimiter must not be empty".to_string());
        }
        if self.prompt_sentinel.trim().is_empty() {
            return Err("prompt_sentinel must not be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Issue one description call per eligible item
    #[serde(default = "default_enrich")]
    pub enrich: bool,

    /// Documents processed at once within a batch
    #[serde(default = "default_concurrency")]
    pub max_concurrent_documents: usize,

    /// Optional deadline for one document's whole pipeline (seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_timeout_secs: Option<u64>,

    /// Reply grammar and category set
    #[serde(default)]
    pub grammar: ProtocolGrammar,
}

fn default_enrich() -> bool {
    true
}

fn default_concurrency() -> usize {
    1
}

impl ExtractorConfig {
    /// Get the per-document deadline as a Duration
    pub fn document_timeout(&self) -> Option<Duration> {
        self.document_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        self.grammar.validate().map_err(ExtractorError::Config)?;
        if self.max_concurrent_documents == 0 {
            return Err(ExtractorError::Config(
                "max_concurrent_documents must be greater than 0".to_string(),
            ));
        }
        if self.document_timeout_secs == Some(0) {
            return Err(ExtractorError::Config(
                "document_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Sequential processing with enrichment, no deadline
    fn default() -> Self {
        Self::sequential()
    }
}

impl ExtractorConfig {
    /// One document at a time
    pub fn sequential() -> Self {
        Self {
            grammar: ProtocolGrammar::default(),
            enrich: true,
            max_concurrent_documents: 1,
            document_timeout_secs: None,
        }
    }

    /// Up to `workers` documents at a time
    pub fn parallel(workers: usize) -> Self {
        Self {
            max_concurrent_documents: workers,
            ..Self::sequential()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
