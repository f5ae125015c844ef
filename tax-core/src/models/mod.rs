mod deduction;
mod deduction_result;
mod filing_status;
mod state;
mod tax_bracket;
mod tax_result;
mod tax_rule;

pub use deduction::{Deduction, DeductionKind, STUDENT_LOAN_INTEREST, TRADITIONAL_IRA};
pub use deduction_result::{DeductionFinderInput, DeductionResult, FoundDeduction, Treatment};
pub use filing_status::FilingStatus;
pub use state::{StateTaxInfo, StateTaxInput, StateTaxRegime, StateTaxResult};
pub use tax_bracket::{Bracket, BracketBreakdown};
pub use tax_result::{BracketTax, FederalTaxInput, FicaBreakdown, TaxResult};
pub use tax_rule::{RuleCategory, RuleEntry, TaxRule, TaxRuleQuery, TaxRuleSearchResult};
