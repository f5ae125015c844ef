//! US individual income-tax estimation.
//!
//! The engines are plain synchronous functions over the read-only
//! [`TaxTables`]. The free functions here run them against
//! [`TaxTables::current`]; construct an engine directly to use other tables.

pub mod calculations;
pub mod geolocation;
pub mod models;
pub mod rules;
pub mod tables;

use rust_decimal::Decimal;

pub use calculations::{DeductionFinder, FederalTaxEngine, StateTaxEngine, StateTaxError};
pub use geolocation::{GeolocationError, Geolocator, Location, resolve_location};
pub use models::*;
pub use rules::TaxRuleIndex;
pub use tables::{TableError, TaxTables, validate_brackets};

/// Federal income tax, FICA and take-home pay for one taxpayer.
pub fn calculate_federal_tax(input: &FederalTaxInput) -> TaxResult {
    FederalTaxEngine::new(TaxTables::current()).calculate(input)
}

/// Bracket walk over `taxable_income` for `filing_status`.
pub fn compute_federal_tax(
    taxable_income: Decimal,
    filing_status: FilingStatus,
) -> BracketTax {
    FederalTaxEngine::new(TaxTables::current()).compute_federal_tax(taxable_income, filing_status)
}

/// Employee-side FICA on `gross_income`, rounded to cents.
pub fn compute_fica(
    gross_income: Decimal,
    filing_status: FilingStatus,
) -> Decimal {
    FederalTaxEngine::new(TaxTables::current()).compute_fica(gross_income, filing_status)
}

/// State income tax on wages.
///
/// # Errors
///
/// Returns [`StateTaxError::UnknownState`] for an abbreviation not in the
/// state table.
pub fn calculate_state_tax(input: &StateTaxInput) -> Result<StateTaxResult, StateTaxError> {
    StateTaxEngine::new(TaxTables::current()).calculate(input)
}

pub fn find_deductions(input: &DeductionFinderInput) -> DeductionResult {
    DeductionFinder::new(TaxTables::current()).find(input)
}

pub fn search_tax_rules(query: &TaxRuleQuery) -> TaxRuleSearchResult {
    TaxRuleIndex::new(TaxTables::current()).search(query)
}
