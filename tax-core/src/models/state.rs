use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Bracket, BracketBreakdown, FilingStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTaxRegime {
    None,
    Flat,
    Progressive,
}

/// Compiled-in description of one state's wage income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTaxInfo {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub regime: StateTaxRegime,
    pub flat_rate: Option<Decimal>,
    pub brackets: &'static [Bracket],
    pub standard_deduction: Option<Decimal>,
    pub notable_credits: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxInput {
    /// Two-letter USPS code, case-insensitive.
    pub state_abbreviation: String,
    pub gross_income: Decimal,
    pub filing_status: FilingStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResult {
    pub state_name: String,
    pub state_abbreviation: String,
    pub tax_type: StateTaxRegime,
    pub filing_status: FilingStatus,
    pub gross_income: Decimal,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    pub state_tax: Decimal,
    pub state_effective_rate: Decimal,
    /// Rate of the last bracket traversed (the flat rate for flat states).
    pub top_rate: Decimal,
    pub brackets: Vec<BracketBreakdown>,
    pub notable_credits: Vec<String>,
}
