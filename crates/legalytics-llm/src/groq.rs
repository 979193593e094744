//! Groq Provider Implementation
//!
//! Talks to any OpenAI-compatible chat-completions endpoint; Groq is the
//! default. The whole extraction prompt is sent as a single system message
//! and the first choice's content is returned verbatim.
//!
//! # Examples
//!
//! ```no_run
//! use legalytics_llm::{GroqConfig, GroqProvider};
//!
//! // Reads the API key from $GROQ_API_KEY
//! let provider = GroqProvider::from_config(&GroqConfig::default()).unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use legalytics_domain::traits::CompletionBackend;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Backend settings, loadable from a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroqConfig {
    /// Chat-completions URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable that holds the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

/// OpenAI-compatible chat-completions provider
#[derive(Debug, Clone)]
pub struct GroqProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl GroqProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Configuration` if the API key is empty or the
    /// HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Configuration("API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            client,
        })
    }

    /// Create a provider from settings, reading the key from the environment
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Configuration` when the variable named by
    /// `api_key_env` is unset or empty.
    pub fn from_config(config: &GroqConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            LlmError::Configuration(format!(
                "{} must be set to call the completion backend",
                config.api_key_env
            ))
        })?;
        Self::new(&config.endpoint, api_key, &config.model)
    }

    /// Model name sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat-completion request and return the first choice's text
    ///
    /// A response with no choices or no content yields an empty string.
    ///
    /// # Errors
    ///
    /// - `LlmError::Transport` if the request fails or the status is not 2xx
    /// - `LlmError::InvalidResponse` if the body is not a completion envelope
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "system",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Transport(format!("HTTP {}: {}", status, error_text)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!(model = %self.model, reply_len = content.len(), "Completion received");
        Ok(content)
    }
}

#[async_trait]
impl CompletionBackend for GroqProvider {
    type Error = LlmError;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        self.generate(prompt).await
    }
}
