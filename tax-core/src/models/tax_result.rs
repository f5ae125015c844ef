use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketBreakdown, Deduction, FilingStatus};

/// Input for a full federal calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalTaxInput {
    pub gross_income: Decimal,
    pub filing_status: FilingStatus,
    #[serde(default)]
    pub deductions: Vec<Deduction>,
}

/// Output of the progressive bracket walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    /// Sum of per-bracket taxes, each rounded to cents.
    pub tax: Decimal,
    /// Rate of the last bracket the walk traversed.
    pub marginal_rate: Decimal,
    pub breakdown: Vec<BracketBreakdown>,
}

impl BracketTax {
    pub fn zero() -> Self {
        Self {
            tax: Decimal::ZERO,
            marginal_rate: Decimal::ZERO,
            breakdown: Vec::new(),
        }
    }
}

/// Payroll tax components, each rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaBreakdown {
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub additional_medicare: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub fica_tax: Decimal,
    /// `(federal_tax + fica_tax) / gross_income`, four decimal places.
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub take_home_pay: Decimal,
    pub bracket_breakdown: Vec<BracketBreakdown>,
}
