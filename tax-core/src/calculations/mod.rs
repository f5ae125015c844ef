//! Tax calculations: federal income tax and FICA, state income tax, and
//! the deduction finder that re-runs the federal calculation.

pub mod common;
pub mod deductions;
pub mod federal;
pub mod state;

pub use deductions::{DeductionFinder, merge_deductions};
pub use federal::{FederalTaxEngine, pre_tax_total, walk_brackets};
pub use state::{StateTaxEngine, StateTaxError};
