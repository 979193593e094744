//! Stored source documents

use serde::{Deserialize, Serialize};

/// A document as held by the document store: text split into pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Store identifier
    pub id: String,

    /// Original filename
    pub filename: String,

    /// Per-page text, in page order
    #[serde(default)]
    pub pages: Vec<String>,
}

impl SourceDocument {
    /// Create a document from its pages
    pub fn new(id: impl Into<String>, filename: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            pages,
        }
    }

    /// Page texts joined by a single space
    ///
    /// # Examples
    ///
    /// ```
    /// use legalytics_domain::SourceDocument;
    ///
    /// let doc = SourceDocument::new("1", "a.pdf", vec!["Menimbang".into(), "Mengingat".into()]);
    /// assert_eq!(doc.full_text(), "Menimbang Mengingat");
    /// ```
    pub fn full_text(&self) -> String {
        self.pages.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_of_empty_document() {
        let doc = SourceDocument::new("1", "empty.pdf", Vec::new());
        assert_eq!(doc.full_text(), "");
    }
}
