//! Prompt construction for extraction and enrichment calls

use crate::config::{CitationShape, ProtocolGrammar};
use legalytics_domain::Category;

/// Builds the single extraction prompt for one document
///
/// Pure and deterministic: the same grammar and text always produce the
/// same prompt. No size limit is enforced here.
pub struct PromptBuilder<'a> {
    grammar: &'a ProtocolGrammar,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for a grammar
    pub fn new(grammar: &'a ProtocolGrammar) -> Self {
        Self { grammar }
    }

    /// Build the complete extraction prompt
    pub fn build(&self, text: &str) -> String {
        let mut prompt = String::new();

        // 1. Role
        prompt.push_str(ROLE_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Per-category rules
        for (idx, section) in self.grammar.sections.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. {} {}\n",
                idx + 1,
                section.heading,
                self.category_rule(section.category)
            ));
        }
        prompt.push('\n');
        prompt.push_str(THOROUGHNESS_REMINDER);
        prompt.push_str("\n\n");

        // 3. The text to analyze
        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(text);
        prompt.push_str("\n---\n\n");

        // 4. Output grammar
        prompt.push_str("Format your response as follows:\n");
        for section in &self.grammar.sections {
            prompt.push_str(&section.heading);
            prompt.push('\n');
            prompt.push_str(&self.format_line(section.category));
            prompt.push('\n');
        }
        prompt.push('\n');
        prompt.push_str(&format!(
            "Start every item line with \"{bullet} \". Keep every heading, even when \
             nothing is found. If no information is found for a category, write a single \
             line \"{bullet} {sentinel}\" under its heading.",
            bullet = self.grammar.prompt_bullet,
            sentinel = self.grammar.prompt_sentinel,
        ));

        prompt
    }

    fn category_rule(&self, category: Category) -> &'static str {
        match category {
            Category::Dates => {
                "Look for full dates written as day, month and year (for example \
                 \"17 Agustus 1945\") ONLY."
            }
            Category::MonetaryValues => {
                "Find monetary amounts, especially in Indonesian Rupiah (IDR/Rp). \
                 Include amounts written in words."
            }
            Category::Citations => match self.grammar.citation_shape {
                CitationShape::TitleAndNumber => {
                    "Identify any references to laws, regulations, or decrees. Include \
                     the title and the number (\"Nomor\"). You can find these references \
                     in the \"Mengingat\" sections."
                }
                CitationShape::TitleWithYear => {
                    "Identify any references to laws, regulations, or decrees. Write the \
                     full title ending with its year. You can find these references in \
                     the \"Mengingat\" sections."
                }
            },
            Category::Keyterms => {
                "List the key legal and financial terms that summarise the document."
            }
        }
    }

    fn format_line(&self, category: Category) -> String {
        let bullet = &self.grammar.prompt_bullet;
        let sep = &self.grammar.separator;
        match category {
            Category::Dates => format!("{bullet} [extracted date]{sep}[context explanation]"),
            Category::MonetaryValues => {
                format!("{bullet} [extracted amount]{sep}[context explanation]")
            }
            Category::Citations => match self.grammar.citation_shape {
                CitationShape::TitleAndNumber => {
                    format!("{bullet} [law title]: Nomor [number]{sep}[context explanation]")
                }
                CitationShape::TitleWithYear => {
                    format!("{bullet} [law title ending with its year]{sep}[context explanation]")
                }
            },
            Category::Keyterms => {
                let delim = &self.grammar.keyterm_delimiter;
                format!("{bullet} [term]{delim}[term]{delim}[term] (all terms on this one line)")
            }
        }
    }
}

/// Build the description prompt for one extracted fragment
///
/// `context` is the inline explanation the model gave next to the item, if
/// any. A fragment that is itself a "nothing found" phrase gets a prompt
/// that only asks for "not found" back.
pub fn build_enrichment_prompt(
    fragment: &str,
    context: Option<&str>,
    category_label: &str,
    grammar: &ProtocolGrammar,
) -> String {
    if grammar.is_sentinel(fragment) {
        return format!(
            "No {} was found in the document. Reply with exactly \"{}\" and nothing else.",
            category_label, NOT_FOUND_REPLY
        );
    }

    let mut prompt = format!(
        "You are analysing an Indonesian legal or financial document. Write a brief \
         description of the following {label}, without any prefixes or unnecessary text \
         but still informative and important.\n\n{label}: {fragment}\n",
        label = category_label,
        fragment = fragment,
    );
    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("Context from the document: {}\n", context.trim()));
    }
    prompt.push_str(&format!(
        "\nBase the description only on the information above. If the {} indicates \
         that nothing was found, reply with exactly \"{}\".",
        category_label, NOT_FOUND_REPLY
    ));
    prompt
}

/// What the enrichment prompt asks the model to echo when there is nothing to describe
pub const NOT_FOUND_REPLY: &str = "not found";

const ROLE_INSTRUCTIONS: &str = "You are an AI assistant specialized in extracting specific \
information from Indonesian legal and financial documents. Analyze the following text and extract:";

const THOROUGHNESS_REMINDER: &str = "Be thorough and extract all instances you can find.
Provide the information directly without any prefixes or unnecessary text.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionSpec;

    #[test]
    fn test_prompt_includes_text() {
        let grammar = ProtocolGrammar::default();
        let prompt = PromptBuilder::new(&grammar).build("Pasal 1 ayat 2 berlaku sejak 1 Mei 2024");
        assert!(prompt.contains("Pasal 1 ayat 2 berlaku sejak 1 Mei 2024"));
        assert!(prompt.contains("Text to analyze:"));
    }

    #[test]
    fn test_prompt_lists_every_heading_and_sentinel() {
        let grammar = ProtocolGrammar::default();
        let prompt = PromptBuilder::new(&grammar).build("x");
        for section in &grammar.sections {
            assert!(prompt.contains(&format!("{}\n- ", section.heading)));
        }
        assert!(prompt.contains("\"- No information found\""));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let grammar = ProtocolGrammar::default();
        let builder = PromptBuilder::new(&grammar);
        assert_eq!(builder.build("sama"), builder.build("sama"));
    }

    #[test]
    fn test_prompt_follows_configured_sections() {
        let mut grammar = ProtocolGrammar::default();
        grammar.sections = vec![SectionSpec::new(Category::Citations, "Rujukan:")];
        grammar.prompt_bullet = "*".to_string();

        let prompt = PromptBuilder::new(&grammar).build("x");
        assert!(prompt.contains("1. Rujukan:"));
        assert!(prompt.contains("Rujukan:\n* [law title]: Nomor [number] - [context explanation]"));
        assert!(!prompt.contains("Dates:"));
    }

    #[test]
    fn test_citation_format_follows_shape() {
        let mut grammar = ProtocolGrammar::default();
        grammar.citation_shape = CitationShape::TitleWithYear;
        let prompt = PromptBuilder::new(&grammar).build("x");
        assert!(prompt.contains("[law title ending with its year]"));
    }

    #[test]
    fn test_keyterms_requested_on_one_line() {
        let grammar = ProtocolGrammar::default();
        let prompt = PromptBuilder::new(&grammar).build("x");
        assert!(prompt.contains("- [term], [term], [term]"));
    }

    #[test]
    fn test_enrichment_prompt_grounds_on_fragment_and_context() {
        let grammar = ProtocolGrammar::default();
        let prompt = build_enrichment_prompt(
            "17 Agustus 1945",
            Some("Proclamation date"),
            "date",
            &grammar,
        );
        assert!(prompt.contains("date: 17 Agustus 1945"));
        assert!(prompt.contains("Context from the document: Proclamation date"));
        assert!(prompt.contains("\"not found\""));
    }

    #[test]
    fn test_enrichment_prompt_without_context() {
        let grammar = ProtocolGrammar::default();
        let prompt = build_enrichment_prompt("Rp 5.000.000", None, "monetary value", &grammar);
        assert!(!prompt.contains("Context from the document"));
    }

    #[test]
    fn test_enrichment_prompt_for_sentinel_asks_for_echo() {
        let grammar = ProtocolGrammar::default();
        let prompt = build_enrichment_prompt("No information found", None, "date", &grammar);
        assert!(prompt.starts_with("No date was found"));
        assert!(prompt.contains("exactly \"not found\""));
    }
}
