//! In-memory document store

use async_trait::async_trait;
use legalytics_domain::traits::DocumentStore;
use legalytics_domain::{DocumentInsights, SourceDocument};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};

/// Document store held in memory, for tests and dry runs
///
/// Clones share the same underlying documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    documents: Vec<SourceDocument>,
    insights: BTreeMap<String, DocumentInsights>,
}

impl MemoryDocumentStore {
    /// Create a store holding `documents`
    pub fn new(documents: Vec<SourceDocument>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                documents,
                insights: BTreeMap::new(),
            })),
        }
    }

    /// Add a document
    pub fn insert(&self, document: SourceDocument) {
        self.lock().documents.push(document);
    }

    /// Insights saved for a document id, if any
    pub fn insights(&self, id: &str) -> Option<DocumentInsights> {
        self.lock().insights.get(id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    type Error = Infallible;

    async fn find_by_filename(
        &self,
        filename: &str,
    ) -> Result<Option<SourceDocument>, Self::Error> {
        Ok(self
            .lock()
            .documents
            .iter()
            .find(|d| d.filename == filename)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<SourceDocument>, Self::Error> {
        Ok(self.lock().documents.clone())
    }

    async fn save_insights(
        &self,
        id: &str,
        insights: &DocumentInsights,
    ) -> Result<(), Self::Error> {
        self.lock().insights.insert(id.to_string(), insights.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legalytics_domain::Category;

    #[tokio::test]
    async fn test_find_and_save() {
        let store = MemoryDocumentStore::new(vec![SourceDocument::new(
            "1",
            "perda.pdf",
            vec!["halaman satu".to_string()],
        )]);

        let found = store.find_by_filename("perda.pdf").await.unwrap();
        assert_eq!(found.map(|d| d.id), Some("1".to_string()));
        assert!(store.find_by_filename("missing.pdf").await.unwrap().is_none());

        store
            .save_insights("1", &DocumentInsights::empty(Category::ALL))
            .await
            .unwrap();
        assert!(store.insights("1").is_some());
        assert!(store.insights("2").is_none());
    }
}
