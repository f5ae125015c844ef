//! Keyword lookup over the compiled-in tax-rule reference.

use tracing::debug;

use crate::models::{RuleCategory, TaxRule, TaxRuleQuery, TaxRuleSearchResult};
use crate::tables::TaxTables;

#[derive(Debug, Clone, Copy)]
pub struct TaxRuleIndex<'a> {
    tables: &'a TaxTables,
}

impl<'a> TaxRuleIndex<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Categories with at least one keyword contained in the lower-cased
    /// query, in table order.
    pub fn matching_categories(
        &self,
        query: &str,
    ) -> Vec<&'static RuleCategory> {
        let query = query.to_lowercase();
        self.tables
            .rule_categories()
            .iter()
            .filter(|category| category.keywords.iter().any(|keyword| query.contains(keyword)))
            .collect()
    }

    /// Returns every entry of every matching category. A query matching
    /// nothing gets the brackets, standard deduction and FICA entries.
    pub fn search(
        &self,
        query: &TaxRuleQuery,
    ) -> TaxRuleSearchResult {
        let mut categories = self.matching_categories(&query.query);
        let fallback = categories.is_empty();
        if fallback {
            categories = self.tables.fallback_rule_categories().collect();
        }

        let results: Vec<TaxRule> = categories
            .iter()
            .flat_map(|category| category.entries.iter().map(TaxRule::from))
            .collect();

        debug!(
            query = %query.query,
            categories = ?categories.iter().map(|c| c.name).collect::<Vec<_>>(),
            fallback,
            results = results.len(),
            "tax rule search"
        );

        TaxRuleSearchResult {
            query: query.query.clone(),
            results,
            tax_year: self.tables.tax_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn index() -> TaxRuleIndex<'static> {
        TaxRuleIndex::new(TaxTables::current())
    }

    fn category_names(query: &str) -> Vec<&'static str> {
        index()
            .matching_categories(query)
            .into_iter()
            .map(|category| category.name)
            .collect()
    }

    fn search(query: &str) -> TaxRuleSearchResult {
        index().search(&TaxRuleQuery {
            query: query.to_string(),
        })
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(category_names("HSA limits"), vec!["hsa"]);
    }

    #[test]
    fn multiple_categories_are_unioned_in_table_order() {
        assert_eq!(
            category_names("Roth IRA vs HSA"),
            vec!["retirement", "hsa"]
        );
    }

    #[test]
    fn keyword_matches_inside_words() {
        assert_eq!(category_names("charitable donations"), vec!["charitable"]);
    }

    #[test]
    fn category_matched_by_several_keywords_appears_once() {
        assert_eq!(category_names("social security and medicare"), vec!["fica"]);
    }

    #[test]
    fn search_returns_entries_of_matching_category() {
        let result = search("capital gains on stock");

        assert!(!result.results.is_empty());
        assert!(result.results.iter().all(|rule| !rule.source.is_empty()));
        assert_eq!(result.query, "capital gains on stock");
        assert_eq!(result.tax_year, 2024);
    }

    #[test]
    fn unmatched_query_falls_back_to_defaults() {
        let result = search("xyzzy");
        let tables = TaxTables::current();
        let expected: Vec<TaxRule> = tables
            .fallback_rule_categories()
            .flat_map(|category| category.entries.iter().map(TaxRule::from))
            .collect();

        assert_eq!(result.results, expected);
        assert!(result.results.iter().any(|rule| rule.title.contains("Standard Deduction")));
    }

    #[test]
    fn empty_query_falls_back_to_defaults() {
        assert_eq!(search("").results, search("xyzzy").results);
    }

    #[test]
    fn fallback_is_not_used_when_anything_matches() {
        let result = search("student loan interest");

        assert!(result.results.iter().all(|rule| !rule.title.contains("Tax Brackets")));
    }
}
