//! Legalytics Completion Client Layer
//!
//! Implementations of the `CompletionBackend` trait from `legalytics-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic, scriptable mock for testing
//! - `GroqProvider`: OpenAI-compatible chat-completions API (Groq by default)
//!
//! Providers make exactly one round trip per call. Retries and deadlines
//! belong to the caller.
//!
//! # Examples
//!
//! ```
//! use legalytics_llm::MockProvider;
//! use legalytics_domain::traits::CompletionBackend;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Dates:\n- No information found");
//! let reply = provider.complete("any prompt").await.unwrap();
//! assert!(reply.starts_with("Dates:"));
//! # });
//! ```

#![warn(missing_docs)]

pub mod groq;

use async_trait::async_trait;
use legalytics_domain::traits::CompletionBackend;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use groq::{GroqConfig, GroqProvider};

/// Errors that can occur during completion calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Backend unreachable or returned an error status
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a body that is not a completion envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing credentials or unusable settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[derive(Debug, Clone)]
enum ScriptedReply {
    Text(String),
    Error,
}

/// Mock completion backend for deterministic testing
///
/// Replies are scripted by prompt substring: the first scripted needle
/// contained in the prompt decides the reply, otherwise the default reply
/// is returned. Every prompt is recorded so tests can assert call order.
///
/// # Examples
///
/// ```
/// use legalytics_llm::MockProvider;
/// use legalytics_domain::traits::CompletionBackend;
///
/// # tokio_test::block_on(async {
/// let mut provider = MockProvider::default();
/// provider.add_response("kontrak", "Dates:\n- 1 Mei 2024");
/// provider.add_error("rusak");
///
/// assert_eq!(provider.complete("teks kontrak ini").await.unwrap(), "Dates:\n- 1 Mei 2024");
/// assert!(provider.complete("dokumen rusak").await.is_err());
/// assert_eq!(provider.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, ScriptedReply)>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with `response` to any prompt containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).push((needle.into(), ScriptedReply::Text(response.into())));
    }

    /// Fail with a transport error for any prompt containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        lock(&self.responses).push((needle.into(), ScriptedReply::Error));
    }

    /// Number of completion calls made so far
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Prompts received so far, in call order
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Forget recorded calls
    pub fn reset_call_count(&self) {
        lock(&self.calls).clear();
    }

    fn reply_for(&self, prompt: &str) -> ScriptedReply {
        lock(&self.responses)
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| ScriptedReply::Text(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("")
    }
}

#[async_trait]
impl CompletionBackend for MockProvider {
    type Error = LlmError;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        lock(&self.calls).push(prompt.to_string());

        match self.reply_for(prompt) {
            ScriptedReply::Text(text) => Ok(text),
            ScriptedReply::Error => Err(LlmError::Transport("Mock error".to_string())),
        }
    }
}

// A poisoned mock only means another test thread panicked mid-call.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
