//! Per-document and per-batch insight containers

use crate::category::Category;
use crate::item::{CitationItem, DateItem, ExtractedItem, MonetaryItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document identifier mapped to that document's insights
///
/// A document whose extraction failed still has an entry, with every
/// category empty.
pub type InsightBatch = BTreeMap<String, DocumentInsights>;

/// Every configured category mapped to its ordered items for one document
///
/// Items within a category keep the order their source lines appeared in
/// the model reply.
///
/// # Examples
///
/// ```
/// use legalytics_domain::{Category, DocumentInsights};
///
/// let insights = DocumentInsights::empty(Category::ALL);
/// assert!(insights.is_empty());
/// assert_eq!(insights.items(Category::Dates).len(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentInsights {
    categories: BTreeMap<Category, Vec<ExtractedItem>>,
}

impl DocumentInsights {
    /// Insights with each given category present and empty
    pub fn empty(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    /// Append an item to the end of its category
    pub fn push(&mut self, item: ExtractedItem) {
        self.categories.entry(item.category()).or_default().push(item);
    }

    /// Items of a category; empty when the category is absent
    pub fn items(&self, category: Category) -> &[ExtractedItem] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the category is present (possibly empty)
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains_key(&category)
    }

    /// Present categories
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    /// Extracted dates
    pub fn dates(&self) -> impl Iterator<Item = &DateItem> {
        self.items(Category::Dates).iter().filter_map(|item| match item {
            ExtractedItem::Date(date) => Some(date),
            _ => None,
        })
    }

    /// Extracted monetary values
    pub fn monetary_values(&self) -> impl Iterator<Item = &MonetaryItem> {
        self.items(Category::MonetaryValues)
            .iter()
            .filter_map(|item| match item {
                ExtractedItem::Monetary(value) => Some(value),
                _ => None,
            })
    }

    /// Extracted citations
    pub fn citations(&self) -> impl Iterator<Item = &CitationItem> {
        self.items(Category::Citations)
            .iter()
            .filter_map(|item| match item {
                ExtractedItem::Citation(citation) => Some(citation),
                _ => None,
            })
    }

    /// Extracted key terms
    pub fn keyterms(&self) -> impl Iterator<Item = &str> {
        self.items(Category::Keyterms)
            .iter()
            .filter_map(|item| match item {
                ExtractedItem::KeyTerm(term) => Some(term.as_str()),
                _ => None,
            })
    }

    /// Total number of items across all categories
    pub fn total_items(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// True when no category holds any item
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}
