//! Extracted item records, one shape per category
//!
//! An item is always built from exactly one content line of a model reply.
//! Items are never merged or deduplicated across lines.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// A `day month year` date found in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateItem {
    /// The matched date token, e.g. "17 Agustus 1945"
    pub date: String,

    /// Context description (inline explanation or enrichment output)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A monetary amount, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryItem {
    /// Amount as written, including amounts spelled out in words
    pub amount: String,

    /// Context description (inline explanation or enrichment output)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A reference to a law, regulation, or decree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationItem {
    /// Cleaned title of the law
    pub law_title: String,

    /// Digits of the `Nomor` clause, when one was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub law_number: Option<String>,

    /// Context description (inline explanation or enrichment output)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The citation exactly as the reply wrote it, minus any context
    #[serde(skip)]
    pub source_text: Option<String>,
}

/// One typed record belonging to a category
///
/// Serialized untagged, so each variant appears in its category's own shape
/// and key terms appear as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedItem {
    /// Item of [`Category::Dates`]
    Date(DateItem),
    /// Item of [`Category::MonetaryValues`]
    Monetary(MonetaryItem),
    /// Item of [`Category::Citations`]
    Citation(CitationItem),
    /// Item of [`Category::Keyterms`]
    KeyTerm(String),
}

impl ExtractedItem {
    /// The category this item belongs to
    pub fn category(&self) -> Category {
        match self {
            ExtractedItem::Date(_) => Category::Dates,
            ExtractedItem::Monetary(_) => Category::MonetaryValues,
            ExtractedItem::Citation(_) => Category::Citations,
            ExtractedItem::KeyTerm(_) => Category::Keyterms,
        }
    }

    /// The extracted fragment, rendered back into a single string
    ///
    /// Citations use their source text when it is known, otherwise
    /// `<title> Nomor <number>`.
    pub fn fragment(&self) -> String {
        match self {
            ExtractedItem::Date(item) => item.date.clone(),
            ExtractedItem::Monetary(item) => item.amount.clone(),
            ExtractedItem::Citation(item) => match (&item.source_text, &item.law_number) {
                (Some(source), _) => source.clone(),
                (None, Some(number)) => format!("{} Nomor {}", item.law_title, number),
                (None, None) => item.law_title.clone(),
            },
            ExtractedItem::KeyTerm(term) => term.clone(),
        }
    }

    /// Current description, if any. Key terms never carry one.
    pub fn description(&self) -> Option<&str> {
        match self {
            ExtractedItem::Date(item) => item.description.as_deref(),
            ExtractedItem::Monetary(item) => item.description.as_deref(),
            ExtractedItem::Citation(item) => item.description.as_deref(),
            ExtractedItem::KeyTerm(_) => None,
        }
    }

    /// Replace the description. No-op for key terms.
    pub fn set_description(&mut self, description: Option<String>) {
        match self {
            ExtractedItem::Date(item) => item.description = description,
            ExtractedItem::Monetary(item) => item.description = description,
            ExtractedItem::Citation(item) => item.description = description,
            ExtractedItem::KeyTerm(_) => {}
        }
    }
}
