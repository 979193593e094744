//! Field decomposers: one content line in, zero or one typed record out
//!
//! Every function here is total over strings. Malformed input yields no
//! item (or a partially filled one), never an error.

use crate::config::{CitationShape, ProtocolGrammar};
use legalytics_domain::{Category, CitationItem, DateItem, ExtractedItem, MonetaryItem};
use regex::Regex;
use std::sync::LazyLock;

/// `day month year`: 1-2 digit day, a word month, 4-digit year
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}\s+\p{L}+\s+\d{4}\b").unwrap());

/// `Nomor <digits>` plus whatever is glued to the digits (`46/PMK.01/2024`)
static LAW_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnomor\s*:?\s*(\d+)\S*").unwrap());

/// Greedy prefix ending in a 4-digit year
static TITLE_WITH_YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\b\d{4})\b").unwrap());

/// Decompose one content line of `category` into items
///
/// Key terms may yield several items from one line; every other category
/// yields at most one.
pub fn decompose(
    category: Category,
    content: &str,
    grammar: &ProtocolGrammar,
) -> Vec<ExtractedItem> {
    match category {
        Category::Dates => decompose_date(content, grammar)
            .map(ExtractedItem::Date)
            .into_iter()
            .collect(),
        Category::MonetaryValues => decompose_monetary(content, grammar)
            .map(ExtractedItem::Monetary)
            .into_iter()
            .collect(),
        Category::Citations => decompose_citation(content, grammar)
            .map(ExtractedItem::Citation)
            .into_iter()
            .collect(),
        Category::Keyterms => decompose_keyterms(content, grammar)
            .into_iter()
            .map(ExtractedItem::KeyTerm)
            .collect(),
    }
}

/// Split `content` at the first separator into the item and its context
pub fn split_context<'a>(
    content: &'a str,
    grammar: &ProtocolGrammar,
) -> (&'a str, Option<&'a str>) {
    match content.split_once(grammar.separator.as_str()) {
        Some((item, context)) => {
            let context = context.trim();
            (item.trim(), (!context.is_empty()).then_some(context))
        }
        None => (content.trim(), None),
    }
}

/// Keep the context unless the model echoed the sentinel there too
fn context_description(context: Option<&str>, grammar: &ProtocolGrammar) -> Option<String> {
    context
        .filter(|c| !grammar.is_sentinel(c))
        .map(str::to_string)
}

/// Locate a `day month year` token; drop the line when there is none
pub fn decompose_date(content: &str, grammar: &ProtocolGrammar) -> Option<DateItem> {
    let (item, context) = split_context(content, grammar);
    if grammar.is_sentinel(item) {
        return None;
    }

    let date = DATE_PATTERN.find(item)?;
    Some(DateItem {
        date: date.as_str().to_string(),
        description: context_description(context, grammar),
    })
}

/// Keep the amount verbatim, minus any context suffix
pub fn decompose_monetary(content: &str, grammar: &ProtocolGrammar) -> Option<MonetaryItem> {
    let (amount, context) = split_context(content, grammar);
    if amount.is_empty() || grammar.is_sentinel(amount) {
        return None;
    }

    Some(MonetaryItem {
        amount: amount.to_string(),
        description: context_description(context, grammar),
    })
}

/// Decompose a citation in the configured shape
pub fn decompose_citation(content: &str, grammar: &ProtocolGrammar) -> Option<CitationItem> {
    let (citation, context) = split_context(content, grammar);
    if citation.is_empty() || grammar.is_sentinel(citation) {
        return None;
    }

    let (law_title, law_number) = match grammar.citation_shape {
        CitationShape::TitleAndNumber => split_title_and_number(citation)?,
        CitationShape::TitleWithYear => {
            let title = TITLE_WITH_YEAR_PATTERN.captures(citation)?.get(1)?;
            (title.as_str().trim().to_string(), None)
        }
    };

    Some(CitationItem {
        law_title,
        law_number,
        description: context_description(context, grammar),
        source_text: Some(citation.to_string()),
    })
}

/// Split the `Nomor` clause out of a citation, wherever it sits
///
/// Without a `Nomor` clause, a `title: number` line takes the leading
/// digits after the colon as the number. Words after the number stay in
/// the title.
fn split_title_and_number(citation: &str) -> Option<(String, Option<String>)> {
    let (title, number) = match LAW_NUMBER_PATTERN.captures(citation) {
        Some(caps) => {
            let whole = caps.get(0)?;
            let digits = caps.get(1)?.as_str().to_string();
            let before = citation[..whole.start()].trim_end().trim_end_matches(':');
            (format!("{} {}", before, &citation[whole.end()..]), Some(digits))
        }
        None => match citation.split_once(':') {
            Some((title, rest)) => {
                let rest = rest.trim();
                let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    (format!("{} {}", title, rest), None)
                } else {
                    let after = &rest[digits.len()..];
                    let tail = after.find(char::is_whitespace).map_or("", |i| &after[i..]);
                    (format!("{} {}", title, tail), Some(digits))
                }
            }
            None => (citation.to_string(), None),
        },
    };

    let title = clean_title(&title);
    if title.is_empty() {
        return None;
    }
    Some((title, number))
}

fn clean_title(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '-'))
        .trim()
        .to_string()
}

/// Split the single delimiter-joined key-term line into terms
pub fn decompose_keyterms(content: &str, grammar: &ProtocolGrammar) -> Vec<String> {
    if grammar.is_sentinel(content) {
        return Vec::new();
    }

    content
        .split(grammar.keyterm_delimiter.as_str())
        .map(str::trim)
        .filter(|term| !term.is_empty() && !grammar.is_sentinel(term))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> ProtocolGrammar {
        ProtocolGrammar::default()
    }

    #[test]
    fn test_date_with_context() {
        let item = decompose_date("17 Agustus 1945 - Proclamation date", &grammar()).unwrap();
        assert_eq!(item.date, "17 Agustus 1945");
        assert_eq!(item.description.as_deref(), Some("Proclamation date"));
    }

    #[test]
    fn test_date_embedded_in_words() {
        let item = decompose_date("Ditetapkan di Jakarta pada tanggal 3 Januari 2024", &grammar())
            .unwrap();
        assert_eq!(item.date, "3 Januari 2024");
        assert_eq!(item.description, None);
    }

    #[test]
    fn test_date_without_day_month_year_is_dropped() {
        assert!(decompose_date("Tahun 2024", &grammar()).is_none());
        assert!(decompose_date("2024-01-03", &grammar()).is_none());
        assert!(decompose_date("117 Agustus 1945", &grammar()).is_none());
    }

    #[test]
    fn test_date_sentinel_is_dropped() {
        assert!(decompose_date("No information found", &grammar()).is_none());
    }

    #[test]
    fn test_sentinel_context_is_not_a_description() {
        let item = decompose_date("1 Mei 2024 - No information found", &grammar()).unwrap();
        assert_eq!(item.description, None);
    }

    #[test]
    fn test_monetary_kept_verbatim() {
        let item = decompose_monetary(
            "Rp 5.000.000,00 (lima juta rupiah) - denda administratif",
            &grammar(),
        )
        .unwrap();
        assert_eq!(item.amount, "Rp 5.000.000,00 (lima juta rupiah)");
        assert_eq!(item.description.as_deref(), Some("denda administratif"));
    }

    #[test]
    fn test_monetary_in_words() {
        let item = decompose_monetary("seratus juta rupiah", &grammar()).unwrap();
        assert_eq!(item.amount, "seratus juta rupiah");
    }

    #[test]
    fn test_monetary_sentinels_filtered() {
        assert!(decompose_monetary("No monetary values extracted", &grammar()).is_none());
        assert!(
            decompose_monetary("No information found - No information found", &grammar()).is_none()
        );
        assert!(decompose_monetary("", &grammar()).is_none());
    }

    #[test]
    fn test_monetary_free_form_nothing_found_filtered() {
        for reply in [
            "No monetary values found",
            "No information found in the text.",
            "Tidak ditemukan",
            "None.",
        ] {
            assert!(decompose_monetary(reply, &grammar()).is_none(), "{reply}");
        }
    }

    #[test]
    fn test_citation_number_split_from_title() {
        let item =
            decompose_citation("Peraturan Menteri Keuangan Nomor 46/PMK.01/2024", &grammar())
                .unwrap();
        assert_eq!(item.law_title, "Peraturan Menteri Keuangan");
        assert_eq!(item.law_number.as_deref(), Some("46"));
    }

    #[test]
    fn test_citation_title_keeps_text_after_number() {
        let item = decompose_citation(
            "Undang-Undang Nomor 11 Tahun 2020 tentang Cipta Kerja - dasar hukum",
            &grammar(),
        )
        .unwrap();
        assert_eq!(item.law_title, "Undang-Undang Tahun 2020 tentang Cipta Kerja");
        assert_eq!(item.law_number.as_deref(), Some("11"));
        assert_eq!(item.description.as_deref(), Some("dasar hukum"));
    }

    #[test]
    fn test_citation_number_after_colon() {
        let item = decompose_citation(
            "Undang-Undang tentang Perpajakan: Nomor 7 Tahun 2021",
            &grammar(),
        )
        .unwrap();
        assert_eq!(item.law_title, "Undang-Undang tentang Perpajakan Tahun 2021");
        assert_eq!(item.law_number.as_deref(), Some("7"));
    }

    #[test]
    fn test_citation_colon_after_nomor() {
        let item =
            decompose_citation("Peraturan Menteri Keuangan Nomor: 46/PMK.01/2024", &grammar())
                .unwrap();
        assert_eq!(item.law_title, "Peraturan Menteri Keuangan");
        assert_eq!(item.law_number.as_deref(), Some("46"));

        let item = decompose_citation(
            "Undang-Undang Nomor : 13 Tahun 2003 tentang Ketenagakerjaan",
            &grammar(),
        )
        .unwrap();
        assert_eq!(item.law_title, "Undang-Undang Tahun 2003 tentang Ketenagakerjaan");
        assert_eq!(item.law_number.as_deref(), Some("13"));
    }

    #[test]
    fn test_citation_colon_then_digits() {
        let item = decompose_citation("Keputusan Presiden: 12 Tahun 1999", &grammar()).unwrap();
        assert_eq!(item.law_title, "Keputusan Presiden Tahun 1999");
        assert_eq!(item.law_number.as_deref(), Some("12"));
    }

    #[test]
    fn test_citation_colon_without_digits_keeps_rest() {
        let item = decompose_citation("Undang-Undang: tentang Cipta Kerja", &grammar()).unwrap();
        assert_eq!(item.law_title, "Undang-Undang tentang Cipta Kerja");
        assert_eq!(item.law_number, None);
    }

    #[test]
    fn test_citation_keeps_source_for_enrichment() {
        let item = decompose_citation(
            "Undang-Undang Nomor 4 Tahun 2004 - dasar hukum",
            &grammar(),
        )
        .unwrap();
        assert_eq!(item.source_text.as_deref(), Some("Undang-Undang Nomor 4 Tahun 2004"));
    }

    #[test]
    fn test_citation_without_number_keeps_title() {
        let item = decompose_citation("Kitab Undang-Undang Hukum Perdata", &grammar()).unwrap();
        assert_eq!(item.law_title, "Kitab Undang-Undang Hukum Perdata");
        assert_eq!(item.law_number, None);
    }

    #[test]
    fn test_citation_number_case_insensitive() {
        let item =
            decompose_citation("Peraturan Pemerintah NOMOR 35 Tahun 2021", &grammar()).unwrap();
        assert_eq!(item.law_number.as_deref(), Some("35"));
    }

    #[test]
    fn test_citation_with_year_shape() {
        let mut grammar = grammar();
        grammar.citation_shape = CitationShape::TitleWithYear;

        let item = decompose_citation(
            "Undang-Undang Nomor 13 Tahun 2003 tentang Ketenagakerjaan",
            &grammar,
        )
        .unwrap();
        assert_eq!(item.law_title, "Undang-Undang Nomor 13 Tahun 2003");
        assert_eq!(item.law_number, None);

        assert!(decompose_citation("Kitab Undang-Undang Hukum Perdata", &grammar).is_none());
    }

    #[test]
    fn test_keyterms_split_on_delimiter() {
        let terms = decompose_keyterms("pajak, bea meterai,  hibah, ", &grammar());
        assert_eq!(terms, vec!["pajak", "bea meterai", "hibah"]);
    }

    #[test]
    fn test_keyterms_sentinel_yields_nothing() {
        assert!(decompose_keyterms("No information found", &grammar()).is_empty());
    }

    #[test]
    fn test_dispatch_produces_matching_category() {
        let items = decompose(Category::MonetaryValues, "Rp 10.000", &grammar());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category(), Category::MonetaryValues);

        let items = decompose(Category::Keyterms, "a, b", &grammar());
        assert_eq!(items.len(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every non-keyterm decomposer yields at most one item for any input
        #[test]
        fn test_decomposers_are_total(content in "\\PC{0,80}") {
            let grammar = ProtocolGrammar::default();
            for category in [Category::Dates, Category::MonetaryValues, Category::Citations] {
                prop_assert!(decompose(category, &content, &grammar).len() <= 1);
            }
            let _ = decompose(Category::Keyterms, &content, &grammar);
        }

        /// Property: the sentinel never produces an item, whatever the case
        #[test]
        fn test_sentinel_never_produces_item(upper in any::<bool>()) {
            let grammar = ProtocolGrammar::default();
            let sentinel = if upper { "NO INFORMATION FOUND" } else { "no information found" };
            for category in Category::ALL {
                prop_assert!(decompose(category, sentinel, &grammar).is_empty());
            }
        }
    }
}
