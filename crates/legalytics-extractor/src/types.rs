//! Batch result types

use legalytics_domain::{Category, InsightBatch};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A batch result plus which documents failed
///
/// Failed documents still appear in `insights` with every category empty;
/// `failed` is how a caller tells them apart from "nothing found".
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One entry per input document
    pub insights: InsightBatch,

    /// Identifiers whose pipeline raised an error
    pub failed: BTreeSet<String>,
}

impl BatchReport {
    /// Counts for logging
    pub fn summary(&self) -> BatchSummary {
        let mut items = BTreeMap::new();
        for insights in self.insights.values() {
            for category in insights.categories() {
                *items.entry(category).or_insert(0) += insights.items(category).len();
            }
        }
        BatchSummary {
            documents: self.insights.len(),
            failed: self.failed.len(),
            items,
        }
    }
}

/// Counts over one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Documents in the batch
    pub documents: usize,
    /// Documents whose pipeline failed
    pub failed: usize,
    /// Items per category across all documents
    pub items: BTreeMap<Category, usize>,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} documents ({} failed)", self.documents, self.failed)?;
        for (category, count) in &self.items {
            write!(f, ", {} {}", count, category)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legalytics_domain::{DocumentInsights, ExtractedItem};

    #[test]
    fn test_summary_counts() {
        let mut ok = DocumentInsights::empty([Category::Dates, Category::Keyterms]);
        ok.push(ExtractedItem::KeyTerm("pajak".to_string()));
        ok.push(ExtractedItem::KeyTerm("hibah".to_string()));

        let mut report = BatchReport::default();
        report.insights.insert("a.txt".to_string(), ok);
        report.insights.insert(
            "b.txt".to_string(),
            DocumentInsights::empty([Category::Dates, Category::Keyterms]),
        );
        report.failed.insert("b.txt".to_string());

        let summary = report.summary();
        assert_eq!(summary.documents, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.items[&Category::Keyterms], 2);
        assert_eq!(summary.items[&Category::Dates], 0);
        assert_eq!(summary.to_string(), "2 documents (1 failed), 0 dates, 2 keyterms");
    }
}
