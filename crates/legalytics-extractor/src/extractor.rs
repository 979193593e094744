//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::enrich::Enricher;
use crate::error::ExtractorError;
use crate::parser::parse_reply;
use crate::prompt::PromptBuilder;
use crate::types::BatchReport;
use futures::stream::{self, StreamExt};
use legalytics_domain::traits::{CompletionBackend, DocumentStore};
use legalytics_domain::{DocumentInsights, InsightBatch, SourceDocument};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Extractor turns document text into categorised insights
pub struct Extractor<B>
where
    B: CompletionBackend,
{
    backend: Arc<B>,
    config: ExtractorConfig,
    model_name: String,
}

impl<B> Extractor<B>
where
    B: CompletionBackend,
{
    /// Create a new Extractor
    ///
    /// Fails with [`ExtractorError::Config`] before any document is touched
    /// when the configuration is unusable.
    pub fn new(backend: B, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::with_shared_backend(Arc::new(backend), config)
    }

    /// Create an Extractor over a backend that is shared with other callers
    pub fn with_shared_backend(
        backend: Arc<B>,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self {
            backend,
            config,
            model_name: "llm".to_string(),
        })
    }

    /// Record the model name used in log lines
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract insights from one document's text
    ///
    /// Honors the configured per-document deadline. Every configured
    /// category is present in the result, possibly empty.
    pub async fn extract(&self, text: &str) -> Result<DocumentInsights, ExtractorError> {
        match self.config.document_timeout() {
            Some(deadline) => timeout(deadline, self.extract_untimed(text))
                .await
                .map_err(|_| ExtractorError::Timeout)?,
            None => self.extract_untimed(text).await,
        }
    }

    async fn extract_untimed(&self, text: &str) -> Result<DocumentInsights, ExtractorError> {
        let grammar = &self.config.grammar;

        let prompt = PromptBuilder::new(grammar).build(text);
        debug!("Prompt length: {} chars", prompt.len());

        let reply = self
            .backend
            .complete(&prompt)
            .await
            .map_err(|e| ExtractorError::Transport(e.to_string()))?;
        debug!("Reply length: {} chars", reply.len());

        let mut parsed = parse_reply(&reply, grammar);

        if self.config.enrich {
            Enricher::new(self.backend.as_ref(), grammar)
                .enrich(&mut parsed)
                .await;
        }

        Ok(parsed.into_insights(grammar.categories()))
    }

    /// Run the pipeline over every document in `documents`
    ///
    /// The result has exactly the input's keys. A document whose pipeline
    /// fails gets every category empty.
    pub async fn run(&self, documents: &BTreeMap<String, String>) -> InsightBatch {
        self.run_with_report(documents).await.insights
    }

    /// Like [`Extractor::run`], also reporting which documents failed
    pub async fn run_with_report(&self, documents: &BTreeMap<String, String>) -> BatchReport {
        info!(
            "Starting batch of {} documents with model '{}'",
            documents.len(),
            self.model_name
        );

        let outcomes: Vec<_> = stream::iter(documents.iter())
            .map(|(id, text)| async move { (id.clone(), self.extract_logged(id, text).await) })
            .buffer_unordered(self.config.max_concurrent_documents)
            .collect()
            .await;

        self.assemble(outcomes)
    }

    /// Extract one stored document and persist the result
    pub async fn process_document<S>(
        &self,
        store: &S,
        document: &SourceDocument,
    ) -> Result<DocumentInsights, ExtractorError>
    where
        S: DocumentStore,
    {
        let insights = self.extract_logged(&document.id, &document.full_text()).await?;
        store
            .save_insights(&document.id, &insights)
            .await
            .map_err(|e| ExtractorError::Store(e.to_string()))?;
        Ok(insights)
    }

    /// Process one stored document by filename, or every stored document
    ///
    /// A named document that is missing is an error. When processing the
    /// whole store, failures are contained per document as in
    /// [`Extractor::run_with_report`] and failed documents are not saved.
    /// The report is keyed by document id.
    pub async fn process_store<S>(
        &self,
        store: &S,
        filename: Option<&str>,
    ) -> Result<BatchReport, ExtractorError>
    where
        S: DocumentStore,
    {
        if let Some(filename) = filename {
            let document = store
                .find_by_filename(filename)
                .await
                .map_err(|e| ExtractorError::Store(e.to_string()))?
                .ok_or_else(|| ExtractorError::Store(format!("document not found: {}", filename)))?;

            let insights = self.process_document(store, &document).await?;
            let mut report = BatchReport::default();
            report.insights.insert(document.id, insights);
            return Ok(report);
        }

        let documents = store
            .list()
            .await
            .map_err(|e| ExtractorError::Store(e.to_string()))?;
        info!("Processing {} stored documents", documents.len());

        let outcomes: Vec<_> = stream::iter(documents.iter())
            .map(|document| async move {
                (document.id.clone(), self.process_document(store, document).await)
            })
            .buffer_unordered(self.config.max_concurrent_documents)
            .collect()
            .await;

        Ok(self.assemble(outcomes))
    }

    async fn extract_logged(
        &self,
        id: &str,
        text: &str,
    ) -> Result<DocumentInsights, ExtractorError> {
        info!("Extracting '{}' ({} chars)", id, text.len());
        let insights = self.extract(text).await?;
        info!(
            "Extracted '{}': {} dates, {} monetary values, {} citations, {} key terms",
            id,
            insights.dates().count(),
            insights.monetary_values().count(),
            insights.citations().count(),
            insights.keyterms().count()
        );
        Ok(insights)
    }

    fn assemble(
        &self,
        outcomes: Vec<(String, Result<DocumentInsights, ExtractorError>)>,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for (id, outcome) in outcomes {
            let insights = match outcome {
                Ok(insights) => insights,
                Err(e) => {
                    warn!("Document '{}' failed: {}", id, e);
                    report.failed.insert(id.clone());
                    DocumentInsights::empty(self.config.grammar.categories())
                }
            };
            report.insights.insert(id, insights);
        }

        info!("Batch complete: {}", report.summary());
        report
    }
}
