//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction core and its
//! collaborators. Implementations live in other crates or in callers.

use crate::{DocumentInsights, SourceDocument};
use async_trait::async_trait;

/// Single-shot text completion against a generative backend
///
/// Implemented by the infrastructure layer (legalytics-llm). One call is one
/// network round trip; implementations do not retry. Implementations must
/// be safe for concurrent use because documents may be processed in parallel.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Error type for completion calls
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a prompt and return the raw textual reply
    ///
    /// An empty reply is a valid `Ok` value.
    async fn complete(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Document storage consumed and updated by the extractor
///
/// Handles are constructed explicitly by the caller and passed in; the core
/// keeps no connection of its own.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up one document by its original filename
    async fn find_by_filename(&self, filename: &str) -> Result<Option<SourceDocument>, Self::Error>;

    /// All stored documents
    async fn list(&self) -> Result<Vec<SourceDocument>, Self::Error>;

    /// Attach extracted insights to the document with the given id
    async fn save_insights(&self, id: &str, insights: &DocumentInsights) -> Result<(), Self::Error>;
}
