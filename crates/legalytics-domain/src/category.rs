//! Category module - the fact types the extractor knows how to bucket

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named bucket of extracted fact type
///
/// The set of categories a given extraction run supports is a configuration
/// decision; this enum only names the categories that have a decomposer.
///
/// # Examples
///
/// ```
/// use legalytics_domain::Category;
///
/// assert_eq!(Category::MonetaryValues.as_str(), "monetary_values");
/// assert_eq!("citations".parse::<Category>().unwrap(), Category::Citations);
/// assert!(!Category::Keyterms.is_enrichable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Full `day month year` dates
    Dates,
    /// Monetary amounts, numeric or spelled out
    MonetaryValues,
    /// References to laws, regulations, or decrees
    Citations,
    /// Key terms summarising the document
    Keyterms,
}

impl Category {
    /// Every category with a decomposer, in the default prompt order
    pub const ALL: [Category; 4] = [
        Category::Dates,
        Category::MonetaryValues,
        Category::Citations,
        Category::Keyterms,
    ];

    /// Get the serialized name of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dates => "dates",
            Category::MonetaryValues => "monetary_values",
            Category::Citations => "citations",
            Category::Keyterms => "keyterms",
        }
    }

    /// Human-readable singular label, used when asking for a description
    pub fn label(&self) -> &'static str {
        match self {
            Category::Dates => "date",
            Category::MonetaryValues => "monetary value",
            Category::Citations => "legal citation",
            Category::Keyterms => "key term",
        }
    }

    /// Whether items of this category receive an enrichment call
    pub fn is_enrichable(&self) -> bool {
        !matches!(self, Category::Keyterms)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dates" => Ok(Category::Dates),
            "monetary_values" => Ok(Category::MonetaryValues),
            "citations" => Ok(Category::Citations),
            "keyterms" => Ok(Category::Keyterms),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}
