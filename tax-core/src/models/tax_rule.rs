use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRuleQuery {
    pub query: String,
}

/// A static reference entry answering a "what is the current rule" question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    pub title: String,
    pub content: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRuleSearchResult {
    pub query: String,
    pub results: Vec<TaxRule>,
    pub tax_year: i32,
}

/// Compiled-in reference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEntry {
    pub title: &'static str,
    pub content: &'static str,
    pub source: &'static str,
}

impl From<&RuleEntry> for TaxRule {
    fn from(entry: &RuleEntry) -> Self {
        Self {
            title: entry.title.to_string(),
            content: entry.content.to_string(),
            source: entry.source.to_string(),
        }
    }
}

/// A topic, the keywords that select it, and its reference entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub entries: &'static [RuleEntry],
}
