//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// A malformed model reply is not an error: it degrades to empty results.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Completion backend unreachable or returned an error status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The per-document deadline elapsed
    #[error("Extraction timeout")]
    Timeout,

    /// Missing or invalid settings; fatal before any document is processed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store error
    #[error("Store error: {0}")]
    Store(String),
}
