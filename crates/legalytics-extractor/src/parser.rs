//! Section parser: a line-by-line state machine over the model reply
//!
//! Per line, in precedence order:
//! 1. a line containing a configured heading marker (case-insensitive)
//!    switches the current category and yields nothing itself;
//! 2. inside a category, a bulleted line is stripped and handed to that
//!    category's decomposer;
//! 3. anything else is ignored.
//!
//! A category stays open until the next heading or end of input. Unknown
//! headings do not change state.

use crate::config::ProtocolGrammar;
use crate::decompose::decompose;
use legalytics_domain::{Category, DocumentInsights, ExtractedItem};
use tracing::{debug, warn};

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// No heading seen yet
    NoSection,
    /// Collecting bullets for a category
    InSection(Category),
}

/// Classification of one reply line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Heading for a configured category
    Heading(Category),
    /// Bullet content for the current category
    Content(Category, &'a str),
    /// Blank, narrative, or out-of-section line
    Ignored,
}

/// Items in the order their lines appeared in the reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReply {
    /// Decomposed items, parse order across all categories
    pub items: Vec<ExtractedItem>,

    /// Bulleted lines that arrived before any recognised heading
    pub orphan_bullets: usize,
}

impl ParsedReply {
    /// Assemble per-category insights with every configured category present
    pub fn into_insights(self, categories: impl IntoIterator<Item = Category>) -> DocumentInsights {
        let mut insights = DocumentInsights::empty(categories);
        for item in self.items {
            insights.push(item);
        }
        insights
    }
}

/// Line-by-line parser over one reply
pub struct SectionParser<'g> {
    grammar: &'g ProtocolGrammar,
    headings: Vec<(String, Category)>,
    state: ParserState,
}

impl<'g> SectionParser<'g> {
    /// Create a parser in the `NoSection` state
    pub fn new(grammar: &'g ProtocolGrammar) -> Self {
        let headings = grammar
            .sections
            .iter()
            .map(|s| (s.heading.trim().to_lowercase(), s.category))
            .collect();
        Self {
            grammar,
            headings,
            state: ParserState::NoSection,
        }
    }

    /// Current state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Advance the state machine by one line
    pub fn step<'l>(&mut self, line: &'l str) -> LineKind<'l> {
        if let Some(category) = self.match_heading(line) {
            self.state = ParserState::InSection(category);
            return LineKind::Heading(category);
        }

        let trimmed = line.trim();
        let Some(content) = self.strip_bullet(trimmed) else {
            return LineKind::Ignored;
        };

        match self.state {
            ParserState::InSection(category) => LineKind::Content(category, content),
            ParserState::NoSection => LineKind::Ignored,
        }
    }

    /// Parse a whole reply
    pub fn parse(mut self, reply: &str) -> ParsedReply {
        let mut parsed = ParsedReply::default();

        for line in reply.lines() {
            match self.step(line) {
                LineKind::Heading(category) => debug!(%category, "Section started"),
                LineKind::Content(category, content) => {
                    parsed.items.extend(decompose(category, content, self.grammar));
                }
                LineKind::Ignored => {
                    let orphan = self.state == ParserState::NoSection
                        && self.strip_bullet(line.trim()).is_some();
                    if orphan {
                        parsed.orphan_bullets += 1;
                    }
                }
            }
        }

        if parsed.orphan_bullets > 0 {
            warn!(
                "Dropped {} bulleted lines outside any known section",
                parsed.orphan_bullets
            );
        }
        parsed
    }

    /// Heading whose marker appears earliest in the line, if any
    fn match_heading(&self, line: &str) -> Option<Category> {
        let normalized = line.trim().to_lowercase();
        self.headings
            .iter()
            .filter_map(|(marker, category)| {
                normalized.find(marker.as_str()).map(|pos| (pos, *category))
            })
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, category)| category)
    }

    /// Bullet content, or `None` for a non-bullet or a rule such as `---`
    fn strip_bullet<'l>(&self, trimmed: &'l str) -> Option<&'l str> {
        self.grammar
            .bullet_markers
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .find_map(|m| trimmed.strip_prefix(m))
            .map(str::trim)
            .filter(|content| content.chars().any(char::is_alphanumeric))
    }
}

/// Parse a reply into items, in parse order
pub fn parse_reply(reply: &str, grammar: &ProtocolGrammar) -> ParsedReply {
    SectionParser::new(grammar).parse(reply)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a reply with no recognised heading yields no items
        #[test]
        fn test_no_heading_no_items(
            lines in prop::collection::vec("[a-zA-Z0-9 .,*-]{0,40}", 0..20)
        ) {
            let grammar = ProtocolGrammar::default();
            let reply = lines.join("\n");
            let lowered = reply.to_lowercase();
            prop_assume!(!grammar
                .sections
                .iter()
                .any(|s| lowered.contains(&s.heading.to_lowercase())));

            let result = parse_reply(&reply, &grammar).into_insights(grammar.categories());
            prop_assert!(result.is_empty());
            prop_assert_eq!(result.categories().count(), grammar.sections.len());
        }

        /// Property: monetary bullets come out in source order
        #[test]
        fn test_monetary_order_preserved(
            amounts in prop::collection::vec("Rp [0-9]{1,9}", 1..10)
        ) {
            let grammar = ProtocolGrammar::default();
            let mut reply = String::from("Monetary values:\n");
            for amount in &amounts {
                reply.push_str(&format!("- {}\n", amount));
            }

            let result = parse_reply(&reply, &grammar).into_insights(grammar.categories());
            let parsed: Vec<_> = result.monetary_values().map(|m| m.amount.clone()).collect();
            prop_assert_eq!(parsed, amounts);
        }
    }
}
