use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Deduction, FilingStatus};

/// Taxpayer profile plus the yes/no questions the deduction finder asks.
///
/// Every toggle defaults to `false` and every amount to zero, so a caller
/// only has to send the questions it actually asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionFinderInput {
    pub gross_income: Decimal,
    pub filing_status: FilingStatus,
    pub current_federal_tax: Decimal,
    #[serde(default)]
    pub current_deductions: Vec<Deduction>,

    #[serde(default)]
    pub has_student_loans: bool,
    #[serde(default)]
    pub student_loan_balance: Decimal,

    #[serde(default)]
    pub has_hsa: bool,
    #[serde(default)]
    pub hsa_contribution: Decimal,
    /// Selects the family HSA limit instead of the self-only one.
    #[serde(default)]
    pub hsa_family_coverage: bool,

    #[serde(default)]
    pub has_ira: bool,
    #[serde(default)]
    pub ira_contribution: Decimal,

    #[serde(default)]
    pub has_charitable: bool,
    #[serde(default)]
    pub charitable_amount: Decimal,

    #[serde(default)]
    pub has_dependents: bool,
    #[serde(default)]
    pub dependent_count: u32,
}

/// Whether an entry lowers taxable income or the tax bill itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Treatment {
    Deduction,
    Credit,
}

/// One opportunity reported by the deduction finder.
///
/// `reason` is present exactly when `applicable` is false; build entries
/// through [`FoundDeduction::eligible`], [`FoundDeduction::ineligible`] or
/// [`FoundDeduction::credit`] to keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundDeduction {
    pub name: String,
    pub amount: Decimal,
    pub annual_savings: Decimal,
    pub applicable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub treatment: Treatment,
}

impl FoundDeduction {
    pub fn eligible(
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            annual_savings: Decimal::ZERO,
            applicable: true,
            reason: None,
            note: None,
            treatment: Treatment::Deduction,
        }
    }

    pub fn ineligible(
        name: impl Into<String>,
        amount: Decimal,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            annual_savings: Decimal::ZERO,
            applicable: false,
            reason: Some(reason.into()),
            note: None,
            treatment: Treatment::Deduction,
        }
    }

    /// A credit is applied to the tax bill directly; its savings equal its amount.
    pub fn credit(
        name: impl Into<String>,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            annual_savings: amount,
            applicable: true,
            reason: None,
            note: Some(note.into()),
            treatment: Treatment::Credit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    pub found_deductions: Vec<FoundDeduction>,
    /// Savings coming from credits rather than deductions.
    pub credit_savings: Decimal,
    pub total_annual_savings: Decimal,
    pub total_monthly_savings: Decimal,
    pub new_federal_tax: Decimal,
    pub new_effective_rate: Decimal,
    pub new_take_home: Decimal,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn reason_only_on_ineligible_entries() {
        let eligible = FoundDeduction::eligible("HSA", dec!(100));
        let ineligible = FoundDeduction::ineligible("IRA", dec!(0), "over the limit");
        let credit = FoundDeduction::credit("Child Tax Credit", dec!(2000), "credit");

        assert!(eligible.applicable && eligible.reason.is_none());
        assert!(!ineligible.applicable && ineligible.reason.is_some());
        assert!(credit.applicable && credit.reason.is_none());
    }

    #[test]
    fn finder_input_defaults_every_toggle_off() {
        let json = r#"{"gross_income":50000,"filing_status":"single","current_federal_tax":4000}"#;

        let input: DeductionFinderInput = serde_json::from_str(json).unwrap();

        assert!(!input.has_student_loans);
        assert!(!input.has_hsa);
        assert!(!input.has_ira);
        assert!(!input.has_charitable);
        assert!(!input.has_dependents);
        assert!(input.current_deductions.is_empty());
    }
}
