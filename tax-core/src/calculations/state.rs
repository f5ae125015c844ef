//! State income tax for the three regimes in the state table.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{non_negative, rate_of, round_whole};
use crate::calculations::federal::walk_brackets;
use crate::models::{
    BracketBreakdown, BracketTax, StateTaxInput, StateTaxRegime, StateTaxResult,
};
use crate::tables::TaxTables;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateTaxError {
    /// The abbreviation is not in the state table.
    #[error("unknown state abbreviation '{0}'; expected a two-letter USPS code such as CA or NY")]
    UnknownState(String),

    /// A flat-rate state entry has no rate.
    #[error("state table entry for {0} is flat-rate but has no rate")]
    MissingFlatRate(String),
}

#[derive(Debug, Clone, Copy)]
pub struct StateTaxEngine<'a> {
    tables: &'a TaxTables,
}

impl<'a> StateTaxEngine<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Calculates state income tax on wages.
    ///
    /// State tables are filing-status independent; the status is carried
    /// through to the result unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StateTaxError::UnknownState`] when the abbreviation does not
    /// match any entry.
    pub fn calculate(
        &self,
        input: &StateTaxInput,
    ) -> Result<StateTaxResult, StateTaxError> {
        let state = self
            .tables
            .state(&input.state_abbreviation)
            .ok_or_else(|| StateTaxError::UnknownState(input.state_abbreviation.clone()))?;

        let gross_income = non_negative(input.gross_income);
        let standard_deduction = match state.regime {
            StateTaxRegime::None => Decimal::ZERO,
            _ => state.standard_deduction.unwrap_or(Decimal::ZERO),
        };
        let taxable_income = match state.regime {
            StateTaxRegime::None => Decimal::ZERO,
            _ => non_negative(gross_income - standard_deduction),
        };

        let bracket_tax = match state.regime {
            StateTaxRegime::None => BracketTax::zero(),
            StateTaxRegime::Flat => {
                let rate = state
                    .flat_rate
                    .ok_or_else(|| StateTaxError::MissingFlatRate(state.abbreviation.to_string()))?;
                flat_tax(rate, taxable_income)
            }
            StateTaxRegime::Progressive => walk_brackets(state.brackets, taxable_income),
        };
        let state_tax = round_whole(bracket_tax.tax);

        debug!(
            state = state.abbreviation,
            regime = ?state.regime,
            %state_tax,
            top_rate = %bracket_tax.marginal_rate,
            "state tax calculated"
        );

        Ok(StateTaxResult {
            state_name: state.name.to_string(),
            state_abbreviation: state.abbreviation.to_string(),
            tax_type: state.regime,
            filing_status: input.filing_status,
            gross_income,
            standard_deduction,
            taxable_income,
            state_tax,
            state_effective_rate: rate_of(state_tax, gross_income),
            top_rate: bracket_tax.marginal_rate,
            brackets: bracket_tax.breakdown,
            notable_credits: state.notable_credits.iter().map(|c| c.to_string()).collect(),
        })
    }
}

/// One synthetic bracket covering the whole taxable range.
fn flat_tax(
    rate: Decimal,
    taxable_income: Decimal,
) -> BracketTax {
    let tax = round_whole(taxable_income * rate);

    BracketTax {
        tax,
        marginal_rate: rate,
        breakdown: vec![BracketBreakdown {
            rate,
            min: Decimal::ZERO,
            max: taxable_income,
            taxable_amount: taxable_income,
            tax,
        }],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::FilingStatus;

    use super::*;

    fn calculate(
        state: &str,
        gross_income: Decimal,
    ) -> Result<StateTaxResult, StateTaxError> {
        StateTaxEngine::new(TaxTables::current()).calculate(&StateTaxInput {
            state_abbreviation: state.to_string(),
            gross_income,
            filing_status: FilingStatus::Single,
        })
    }

    #[test]
    fn no_tax_state_passes_through_notes() {
        let result = calculate("TX", dec!(100000)).unwrap();

        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.state_effective_rate, dec!(0));
        assert_eq!(result.tax_type, StateTaxRegime::None);
        assert!(result.brackets.is_empty());
        assert_eq!(result.notable_credits, vec!["No state income tax".to_string()]);
    }

    #[test]
    fn flat_state_subtracts_standard_deduction() {
        let result = calculate("IL", dec!(50000)).unwrap();

        // (50000 - 2775) * 0.0495 = 2337.6375
        assert_eq!(result.taxable_income, dec!(47225));
        assert_eq!(result.state_tax, dec!(2338));
        assert_eq!(result.state_effective_rate, dec!(0.0468));
        assert_eq!(result.top_rate, dec!(0.0495));
    }

    #[test]
    fn flat_state_reports_single_synthetic_bracket() {
        let result = calculate("il", dec!(50000)).unwrap();

        assert_eq!(result.brackets.len(), 1);
        assert_eq!(result.brackets[0].min, dec!(0));
        assert_eq!(result.brackets[0].max, dec!(47225));
        assert_eq!(result.brackets[0].tax, dec!(2338));
    }

    #[test]
    fn flat_state_without_standard_deduction_taxes_gross() {
        let result = calculate("PA", dec!(40000)).unwrap();

        // 40000 * 0.0307 = 1228
        assert_eq!(result.standard_deduction, dec!(0));
        assert_eq!(result.state_tax, dec!(1228));
    }

    #[test]
    fn progressive_state_walks_brackets() {
        let result = calculate("CA", dec!(100000)).unwrap();

        assert_eq!(result.taxable_income, dec!(94460));
        assert_eq!(result.state_tax, dec!(5327));
        assert_eq!(result.state_effective_rate, dec!(0.0533));
        assert_eq!(result.top_rate, dec!(0.093));
        assert_eq!(result.brackets.len(), 6);
    }

    #[test]
    fn progressive_state_zero_rate_band_reports_zero_top_rate() {
        // Income ends inside Mississippi's 0% band: the reported top rate is
        // that band's 0%, not the 4.7% the next dollar above $10,000 would pay.
        let result = calculate("MS", dec!(10000)).unwrap();

        assert_eq!(result.taxable_income, dec!(7700));
        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.top_rate, dec!(0));
    }

    #[test]
    fn progressive_state_above_zero_rate_band() {
        let result = calculate("MS", dec!(50000)).unwrap();

        // (47700 - 10000) * 0.047 = 1771.90
        assert_eq!(result.state_tax, dec!(1772));
        assert_eq!(result.top_rate, dec!(0.047));
    }

    #[test]
    fn income_below_state_deduction_owes_nothing() {
        let result = calculate("CA", dec!(3000)).unwrap();

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.top_rate, dec!(0));
    }

    #[test]
    fn zero_income_has_zero_effective_rate() {
        let result = calculate("NY", dec!(0)).unwrap();

        assert_eq!(result.state_effective_rate, dec!(0));
    }

    #[test]
    fn unknown_state_is_an_error_naming_the_code() {
        let err = calculate("ZZ", dec!(50000)).unwrap_err();

        assert_eq!(err, StateTaxError::UnknownState("ZZ".to_string()));
        assert!(err.to_string().contains("ZZ"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let result = calculate(" ny", dec!(50000)).unwrap();

        assert_eq!(result.state_abbreviation, "NY");
        assert_eq!(result.state_name, "New York");
    }
}
