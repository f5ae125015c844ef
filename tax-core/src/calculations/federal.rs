//! Federal income tax and FICA.
//!
//! Income tax is accumulated bracket by bracket: each bracket taxes the
//! slice of income that falls inside it, lowest bracket first, and the walk
//! stops as soon as the income is used up.
//!
//! | Output           | Rounding            |
//! |------------------|---------------------|
//! | per-bracket tax  | cents               |
//! | monetary totals  | whole dollars       |
//! | rates            | four decimal places |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::FederalTaxEngine;
//! use tax_core::{FederalTaxInput, FilingStatus, TaxTables};
//!
//! let engine = FederalTaxEngine::new(TaxTables::current());
//! let result = engine.calculate(&FederalTaxInput {
//!     gross_income: dec!(60000),
//!     filing_status: FilingStatus::Single,
//!     deductions: vec![],
//! });
//!
//! assert_eq!(result.federal_tax, dec!(8253));
//! assert_eq!(result.fica_tax, dec!(4590));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{
    non_negative, rate_of, round_cents, round_whole, saturating_sum,
};
use crate::models::{
    Bracket, BracketBreakdown, BracketTax, Deduction, FederalTaxInput, FicaBreakdown,
    FilingStatus, TaxResult,
};
use crate::tables::TaxTables;

/// Walks `brackets` from the lowest band upward, taxing the slice of
/// `taxable_income` that falls in each.
///
/// The breakdown lists only the brackets the walk traversed. The reported
/// marginal rate is the rate of the last traversed bracket, even when that
/// bracket is a 0% band that the income did not leave.
pub fn walk_brackets(
    brackets: &[Bracket],
    taxable_income: Decimal,
) -> BracketTax {
    let mut remaining = non_negative(taxable_income);
    let mut result = BracketTax::zero();

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxable_amount = match bracket.width() {
            Some(width) => remaining.min(non_negative(width)),
            None => remaining,
        };
        let tax = round_cents(taxable_amount * bracket.rate);

        result.breakdown.push(BracketBreakdown {
            rate: bracket.rate,
            min: bracket.min,
            max: bracket.max.unwrap_or(bracket.min + taxable_amount),
            taxable_amount,
            tax,
        });
        result.tax += tax;
        result.marginal_rate = bracket.rate;
        remaining -= taxable_amount;
    }

    result
}

/// Sum of the amounts withheld before pay reaches the taxpayer.
pub fn pre_tax_total(deductions: &[Deduction]) -> Decimal {
    saturating_sum(
        deductions
            .iter()
            .filter(|d| d.kind.is_pre_tax())
            .map(|d| non_negative(d.amount)),
    )
}

/// Calculator for federal income tax and payroll tax.
#[derive(Debug, Clone, Copy)]
pub struct FederalTaxEngine<'a> {
    tables: &'a TaxTables,
}

impl<'a> FederalTaxEngine<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Income tax on `taxable_income` using the schedule for `filing_status`.
    pub fn compute_federal_tax(
        &self,
        taxable_income: Decimal,
        filing_status: FilingStatus,
    ) -> BracketTax {
        walk_brackets(self.tables.federal_brackets(filing_status), taxable_income)
    }

    /// Employee FICA on `gross_income`, rounded to cents.
    pub fn compute_fica(
        &self,
        gross_income: Decimal,
        filing_status: FilingStatus,
    ) -> Decimal {
        self.compute_fica_breakdown(gross_income, filing_status).total
    }

    /// Social Security, Medicare and Additional Medicare components.
    ///
    /// Social Security stops at the wage base; Medicare applies to every
    /// dollar; the Additional Medicare surtax applies above the filing
    /// status's threshold.
    pub fn compute_fica_breakdown(
        &self,
        gross_income: Decimal,
        filing_status: FilingStatus,
    ) -> FicaBreakdown {
        let payroll = &self.tables.payroll;
        let wages = non_negative(gross_income);
        let threshold = self.tables.schedule(filing_status).additional_medicare_threshold;

        let social_security =
            round_cents(wages.min(payroll.social_security_wage_base) * payroll.social_security_rate);
        let medicare = round_cents(wages * payroll.medicare_rate);
        let additional_medicare =
            round_cents(non_negative(wages - threshold) * payroll.additional_medicare_rate);

        FicaBreakdown {
            social_security,
            medicare,
            additional_medicare,
            total: round_cents(social_security + medicare + additional_medicare),
        }
    }

    /// Full federal picture for one taxpayer.
    ///
    /// Every supplied deduction is subtracted from gross income; the
    /// standard deduction is only applied if the caller includes it.
    /// Negative income or deduction amounts are clamped to zero.
    pub fn calculate(
        &self,
        input: &FederalTaxInput,
    ) -> TaxResult {
        let gross_income = self.normalize_income(input.gross_income);
        let total_deductions = self.total_deductions(&input.deductions);
        let pre_tax = pre_tax_total(&input.deductions);

        self.summarize(
            gross_income,
            input.filing_status,
            total_deductions,
            pre_tax,
            Decimal::ZERO,
        )
    }

    /// Builds a [`TaxResult`] and reduces the income tax by `credits`
    /// (never below zero).
    pub(crate) fn summarize(
        &self,
        gross_income: Decimal,
        filing_status: FilingStatus,
        total_deductions: Decimal,
        pre_tax: Decimal,
        credits: Decimal,
    ) -> TaxResult {
        let taxable_income = non_negative(gross_income - total_deductions);
        let bracket_tax = self.compute_federal_tax(taxable_income, filing_status);

        let federal_tax = non_negative(round_whole(bracket_tax.tax) - credits);
        let fica_tax = round_whole(self.compute_fica(gross_income, filing_status));
        let effective_rate = rate_of(federal_tax + fica_tax, gross_income);
        let take_home_pay = round_whole(gross_income - federal_tax - fica_tax - pre_tax);

        debug!(
            %gross_income,
            %taxable_income,
            %federal_tax,
            %fica_tax,
            %effective_rate,
            filing_status = %filing_status,
            "federal tax calculated"
        );

        TaxResult {
            gross_income,
            total_deductions,
            taxable_income,
            federal_tax,
            fica_tax,
            effective_rate,
            marginal_rate: bracket_tax.marginal_rate,
            take_home_pay,
            bracket_breakdown: bracket_tax.breakdown,
        }
    }

    pub(crate) fn normalize_income(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        if gross_income < Decimal::ZERO {
            warn!(%gross_income, "Gross income is negative; treating it as zero");
        }
        non_negative(gross_income)
    }

    fn total_deductions(
        &self,
        deductions: &[Deduction],
    ) -> Decimal {
        saturating_sum(deductions.iter().map(|deduction| {
            if deduction.amount < Decimal::ZERO {
                warn!(
                    label = deduction.label(),
                    amount = %deduction.amount,
                    "Deduction amount is negative; treating it as zero"
                );
            }
            non_negative(deduction.amount)
        }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::DeductionKind;

    use super::*;

    fn engine() -> FederalTaxEngine<'static> {
        FederalTaxEngine::new(TaxTables::current())
    }

    fn input(
        gross_income: Decimal,
        deductions: Vec<Deduction>,
    ) -> FederalTaxInput {
        FederalTaxInput {
            gross_income,
            filing_status: FilingStatus::Single,
            deductions,
        }
    }

    // =========================================================================
    // walk_brackets tests
    // =========================================================================

    #[test]
    fn walk_brackets_zero_income_is_empty() {
        let result = walk_brackets(TaxTables::current().federal_brackets(FilingStatus::Single), dec!(0));

        assert_eq!(result, BracketTax::zero());
    }

    #[test]
    fn walk_brackets_negative_income_is_empty() {
        let result =
            walk_brackets(TaxTables::current().federal_brackets(FilingStatus::Single), dec!(-500));

        assert_eq!(result, BracketTax::zero());
    }

    #[test]
    fn walk_brackets_first_bracket_only() {
        let result =
            walk_brackets(TaxTables::current().federal_brackets(FilingStatus::Single), dec!(10000));

        assert_eq!(result.tax, dec!(1000.00));
        assert_eq!(result.marginal_rate, dec!(0.10));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].max, dec!(11600));
    }

    #[test]
    fn walk_brackets_stops_at_exact_boundary() {
        let result =
            walk_brackets(TaxTables::current().federal_brackets(FilingStatus::Single), dec!(11600));

        assert_eq!(result.tax, dec!(1160.00));
        assert_eq!(result.breakdown.len(), 1);
    }

    #[test]
    fn walk_brackets_top_bracket_resolves_max() {
        let result =
            walk_brackets(TaxTables::current().federal_brackets(FilingStatus::Single), dec!(700000));
        let last = result.breakdown.last().unwrap();

        assert_eq!(result.marginal_rate, dec!(0.37));
        assert_eq!(last.min, dec!(609350));
        assert_eq!(last.max, dec!(700000));
        assert_eq!(last.taxable_amount, dec!(90650));
    }

    #[test]
    fn walk_brackets_rounds_each_bracket_to_cents() {
        let brackets = [Bracket::new(dec!(0.093), dec!(0), None)];

        let result = walk_brackets(&brackets, dec!(23854));

        assert_eq!(result.tax, dec!(2218.42));
    }

    #[test]
    fn walk_brackets_zero_rate_band_sets_marginal_rate() {
        let brackets = [
            Bracket::new(dec!(0), dec!(0), Some(dec!(10000))),
            Bracket::new(dec!(0.047), dec!(10000), None),
        ];

        let result = walk_brackets(&brackets, dec!(7700));

        assert_eq!(result.tax, dec!(0));
        assert_eq!(result.marginal_rate, dec!(0));
    }

    #[test]
    fn walk_brackets_traverses_zero_width_band() {
        let brackets = [
            Bracket::new(dec!(0), dec!(0), Some(dec!(0))),
            Bracket::new(dec!(0.05), dec!(0), None),
        ];

        let result = walk_brackets(&brackets, dec!(1000));

        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].taxable_amount, dec!(0));
        assert_eq!(result.tax, dec!(50.00));
        assert_eq!(result.marginal_rate, dec!(0.05));
    }

    // =========================================================================
    // compute_fica tests
    // =========================================================================

    #[test]
    fn fica_below_wage_base() {
        assert_eq!(
            engine().compute_fica(dec!(60000), FilingStatus::Single),
            dec!(4590.00)
        );
    }

    #[test]
    fn fica_caps_social_security_at_wage_base() {
        let fica = engine().compute_fica_breakdown(dec!(180000), FilingStatus::Single);

        assert_eq!(fica.social_security, dec!(10453.20));
        assert_eq!(fica.medicare, dec!(2610.00));
        assert_eq!(fica.additional_medicare, dec!(0));
    }

    #[test]
    fn fica_adds_additional_medicare_above_threshold() {
        let fica = engine().compute_fica_breakdown(dec!(250000), FilingStatus::Single);

        assert_eq!(fica.additional_medicare, dec!(450.00));
        assert_eq!(fica.total, dec!(14528.20));
    }

    #[test]
    fn fica_threshold_depends_on_filing_status() {
        let joint = engine().compute_fica_breakdown(dec!(250000), FilingStatus::MarriedJoint);
        let separate = engine().compute_fica_breakdown(dec!(250000), FilingStatus::MarriedSeparate);

        assert_eq!(joint.additional_medicare, dec!(0));
        assert_eq!(separate.additional_medicare, dec!(1125.00));
    }

    #[test]
    fn fica_negative_income_is_zero() {
        assert_eq!(
            engine().compute_fica(dec!(-100), FilingStatus::Single),
            dec!(0)
        );
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_single_60000_without_deductions() {
        let result = engine().calculate(&input(dec!(60000), vec![]));

        assert_eq!(result.taxable_income, dec!(60000));
        assert_eq!(result.federal_tax, dec!(8253));
        assert_eq!(result.fica_tax, dec!(4590));
        assert_eq!(result.effective_rate, dec!(0.2141));
        assert_eq!(result.marginal_rate, dec!(0.22));
        assert_eq!(result.take_home_pay, dec!(47157));
    }

    #[test]
    fn calculate_applies_supplied_standard_deduction() {
        let deductions = vec![Deduction::new(DeductionKind::StandardDeduction, dec!(14600))];

        let result = engine().calculate(&input(dec!(75000), deductions));

        assert_eq!(result.total_deductions, dec!(14600));
        assert_eq!(result.taxable_income, dec!(60400));
        assert_eq!(result.federal_tax, dec!(8341));
    }

    #[test]
    fn calculate_subtracts_pre_tax_contributions_from_take_home() {
        let deductions = vec![
            Deduction::new(DeductionKind::StandardDeduction, dec!(14600)),
            Deduction::new(DeductionKind::PreTax401k, dec!(5000)),
            Deduction::new(DeductionKind::PreTaxHsa, dec!(1000)),
            Deduction::new(DeductionKind::Itemized("Mortgage Interest".into()), dec!(2000)),
        ];

        let result = engine().calculate(&input(dec!(80000), deductions));

        // taxable = 80000 - 22600 = 57400
        // tax = 1160 + 4266 + (57400 - 47150) * 0.22 = 7681
        assert_eq!(result.federal_tax, dec!(7681));
        assert_eq!(result.fica_tax, dec!(6120));
        assert_eq!(result.take_home_pay, dec!(60199));
    }

    #[test]
    fn calculate_zero_income_is_all_zero() {
        let result = engine().calculate(&input(dec!(0), vec![]));

        assert_eq!(result.federal_tax, dec!(0));
        assert_eq!(result.fica_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.marginal_rate, dec!(0));
        assert_eq!(result.take_home_pay, dec!(0));
        assert!(result.bracket_breakdown.is_empty());
    }

    #[test]
    fn calculate_negative_income_is_clamped() {
        let result = engine().calculate(&input(dec!(-25000), vec![]));

        assert_eq!(result.gross_income, dec!(0));
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.federal_tax, dec!(0));
    }

    #[test]
    fn calculate_deductions_exceeding_income_clamp_taxable_to_zero() {
        let deductions = vec![Deduction::new(DeductionKind::StandardDeduction, dec!(14600))];

        let result = engine().calculate(&input(dec!(10000), deductions));

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.federal_tax, dec!(0));
        assert_eq!(result.fica_tax, dec!(765));
    }

    #[test]
    fn calculate_ignores_negative_deductions() {
        let deductions = vec![Deduction::new(
            DeductionKind::Itemized("Bad data".into()),
            dec!(-5000),
        )];

        let result = engine().calculate(&input(dec!(60000), deductions));

        assert_eq!(result.total_deductions, dec!(0));
        assert_eq!(result.federal_tax, dec!(8253));
    }

    #[test]
    fn calculate_huge_deductions_saturate_instead_of_overflowing() {
        let deductions = vec![
            Deduction::new(DeductionKind::Itemized("Casualty Loss".into()), Decimal::MAX),
            Deduction::new(DeductionKind::PreTax401k, Decimal::MAX),
        ];

        let result = engine().calculate(&input(dec!(60000), deductions));

        assert_eq!(result.total_deductions, Decimal::MAX);
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.federal_tax, dec!(0));
        assert_eq!(result.fica_tax, dec!(4590));
    }

    #[test]
    fn calculate_married_joint_uses_joint_schedule() {
        let result = engine().calculate(&FederalTaxInput {
            gross_income: dec!(100000),
            filing_status: FilingStatus::MarriedJoint,
            deductions: vec![],
        });

        // 2320 + (94300 - 23200) * 0.12 + (100000 - 94300) * 0.22 = 2320 + 8532 + 1254
        assert_eq!(result.federal_tax, dec!(12106));
        assert_eq!(result.marginal_rate, dec!(0.22));
    }
}
