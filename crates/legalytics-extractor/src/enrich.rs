//! Enrichment: one description call per eligible extracted item

use crate::config::ProtocolGrammar;
use crate::error::ExtractorError;
use crate::parser::ParsedReply;
use crate::prompt::{build_enrichment_prompt, NOT_FOUND_REPLY};
use legalytics_domain::traits::CompletionBackend;
use legalytics_domain::ExtractedItem;
use tracing::{debug, warn};

/// Attaches model-written descriptions to decomposed items
pub struct Enricher<'a, B: ?Sized> {
    backend: &'a B,
    grammar: &'a ProtocolGrammar,
}

/// Outcome counts of one enrichment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    /// Calls that produced a description
    pub described: usize,
    /// Calls answered with "not found" or an empty reply
    pub not_found: usize,
    /// Calls that failed; those items keep their previous description
    pub failed: usize,
}

impl<'a, B> Enricher<'a, B>
where
    B: CompletionBackend + ?Sized,
{
    /// Create an enricher over a backend
    pub fn new(backend: &'a B, grammar: &'a ProtocolGrammar) -> Self {
        Self { backend, grammar }
    }

    /// Ask for a description of one fragment
    ///
    /// Returns `Ok(None)` when the model answers "not found" or nothing.
    pub async fn describe(
        &self,
        fragment: &str,
        context: Option<&str>,
        category_label: &str,
    ) -> Result<Option<String>, ExtractorError> {
        let prompt = build_enrichment_prompt(fragment, context, category_label, self.grammar);
        let reply = self
            .backend
            .complete(&prompt)
            .await
            .map_err(|e| ExtractorError::Transport(e.to_string()))?;

        let description = reply.trim();
        let is_not_found = description
            .trim_matches(|c: char| matches!(c, '"' | '.'))
            .eq_ignore_ascii_case(NOT_FOUND_REPLY);
        if description.is_empty() || is_not_found {
            return Ok(None);
        }
        Ok(Some(description.to_string()))
    }

    /// Enrich every eligible item, one call at a time, in parse order
    ///
    /// A failed call never removes the item; it keeps whatever description
    /// it had before.
    pub async fn enrich(&self, parsed: &mut ParsedReply) -> EnrichmentStats {
        let mut stats = EnrichmentStats::default();

        for item in parsed.items.iter_mut() {
            if !item.category().is_enrichable() {
                continue;
            }
            self.enrich_item(item, &mut stats).await;
        }

        debug!(
            described = stats.described,
            not_found = stats.not_found,
            failed = stats.failed,
            "Enrichment finished"
        );
        stats
    }

    async fn enrich_item(&self, item: &mut ExtractedItem, stats: &mut EnrichmentStats) {
        let fragment = item.fragment();
        let label = item.category().label();

        let outcome = self.describe(&fragment, item.description(), label).await;
        match outcome {
            Ok(Some(description)) => {
                item.set_description(Some(description));
                stats.described += 1;
            }
            Ok(None) => {
                item.set_description(None);
                stats.not_found += 1;
            }
            Err(e) => {
                warn!("Enrichment failed for {} '{}': {}", label, fragment, e);
                stats.failed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_reply;
    use legalytics_llm::MockProvider;

    fn parsed(reply: &str) -> ParsedReply {
        parse_reply(reply, &ProtocolGrammar::default())
    }

    #[tokio::test]
    async fn test_description_replaces_inline_context() {
        let grammar = ProtocolGrammar::default();
        let llm = MockProvider::new("Tanggal proklamasi kemerdekaan Indonesia.");
        let mut reply = parsed("Dates:\n- 17 Agustus 1945 - Proclamation date");

        let stats = Enricher::new(&llm, &grammar).enrich(&mut reply).await;

        assert_eq!(stats.described, 1);
        assert_eq!(
            reply.items[0].description(),
            Some("Tanggal proklamasi kemerdekaan Indonesia.")
        );
        assert!(llm.calls()[0].contains("Context from the document: Proclamation date"));
    }

    #[tokio::test]
    async fn test_keyterms_are_not_enriched() {
        let grammar = ProtocolGrammar::default();
        let llm = MockProvider::new("desc");
        let mut reply = parsed("Key terms:\n- pajak, hibah");

        Enricher::new(&llm, &grammar).enrich(&mut reply).await;

        assert_eq!(llm.call_count(), 0);
        assert_eq!(reply.items.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_call_keeps_item_and_previous_description() {
        let grammar = ProtocolGrammar::default();
        let mut llm = MockProvider::new("desc");
        llm.add_error("Rp 5.000");
        let mut reply = parsed(
            "Monetary values:\n- Rp 5.000 - biaya\n- Rp 7.000\nDates:\n- 1 Mei 2024",
        );

        let stats = Enricher::new(&llm, &grammar).enrich(&mut reply).await;

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.described, 2);
        assert_eq!(reply.items.len(), 3);
        assert_eq!(reply.items[0].fragment(), "Rp 5.000");
        assert_eq!(reply.items[0].description(), Some("biaya"));
        assert_eq!(reply.items[1].description(), Some("desc"));
    }

    #[tokio::test]
    async fn test_failed_call_without_context_leaves_description_absent() {
        let grammar = ProtocolGrammar::default();
        let mut llm = MockProvider::default();
        llm.add_error("Rp 9");
        let mut reply = parsed("Monetary values:\n- Rp 9");

        Enricher::new(&llm, &grammar).enrich(&mut reply).await;

        assert_eq!(reply.items.len(), 1);
        assert_eq!(reply.items[0].description(), None);
    }

    #[tokio::test]
    async fn test_not_found_reply_clears_description() {
        let grammar = ProtocolGrammar::default();
        let llm = MockProvider::new("Not found.");
        let mut reply = parsed("Citations:\n- KUHPerdata - kitab");

        let stats = Enricher::new(&llm, &grammar).enrich(&mut reply).await;

        assert_eq!(stats.not_found, 1);
        assert_eq!(reply.items[0].description(), None);
    }

    #[tokio::test]
    async fn test_calls_follow_parse_order() {
        let grammar = ProtocolGrammar::default();
        let llm = MockProvider::new("desc");
        let mut reply = parsed(
            "Monetary values:\n- Rp 1\nDates:\n- 2 Mei 2024\n\
             Citations:\n- Undang-Undang Nomor 4 Tahun 2004",
        );

        Enricher::new(&llm, &grammar).enrich(&mut reply).await;

        let calls = llm.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].contains("monetary value: Rp 1"));
        assert!(calls[1].contains("date: 2 Mei 2024"));
        assert!(calls[2].contains("legal citation: Undang-Undang Nomor 4 Tahun 2004"));
    }

    #[tokio::test]
    async fn test_describe_sentinel_fragment() {
        let grammar = ProtocolGrammar::default();
        let llm = MockProvider::new("not found");
        let enricher = Enricher::new(&llm, &grammar);

        let description = enricher
            .describe("No information found", None, "date")
            .await
            .unwrap();

        assert_eq!(description, None);
        assert!(llm.calls()[0].starts_with("No date was found"));
    }
}
