//! Legalytics Domain Layer
//!
//! Core data model for insight extraction from Indonesian legal and
//! financial documents, plus the trait interfaces for the collaborators
//! the extraction core talks to.
//!
//! ## Key Concepts
//!
//! - **Category**: a bucket of extracted fact type (dates, monetary values,
//!   citations, key terms)
//! - **ExtractedItem**: one typed record decomposed from a single content line
//! - **DocumentInsights**: every configured category mapped to its items, in parse order
//! - **InsightBatch**: document identifier mapped to that document's insights
//!
//! ## Architecture
//!
//! This crate holds no infrastructure. The completion backend and the
//! document store are traits implemented elsewhere (`legalytics-llm`,
//! callers' persistence layers).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod document;
pub mod insights;
pub mod item;
pub mod traits;

// Re-exports for convenience
pub use category::Category;
pub use document::SourceDocument;
pub use insights::{DocumentInsights, InsightBatch};
pub use item::{CitationItem, DateItem, ExtractedItem, MonetaryItem};
