//! Tax-year data: bracket schedules, payroll constants, contribution
//! limits, state tables and the rule reference.
//!
//! Everything year-specific lives behind [`TaxTables`]. Rolling forward to
//! a new tax year means building a new `TaxTables` value; none of the
//! calculation code changes.

mod federal_2024;
mod rules_2024;
mod states_2024;

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Bracket, FilingStatus, RuleCategory, StateTaxInfo};

/// Errors raised when a bracket schedule is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    DoesNotStartAtZero(Decimal),

    #[error("bracket starting at {found} should start at {expected}")]
    Gap { expected: Decimal, found: Decimal },

    #[error("bracket starting at {0} has max below min")]
    Inverted(Decimal),

    #[error("only the last bracket may be unbounded (bracket starting at {0})")]
    UnboundedBeforeEnd(Decimal),

    #[error("last bracket must be unbounded")]
    MissingTopBracket,

    #[error("rate {0} is outside 0..=1")]
    InvalidRate(Decimal),
}

/// Payroll (FICA) constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxConfig {
    pub social_security_wage_base: Decimal,
    pub social_security_rate: Decimal,
    pub medicare_rate: Decimal,
    pub additional_medicare_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLimits {
    pub max_401k: Decimal,
    pub max_ira: Decimal,
    pub max_hsa_self: Decimal,
    pub max_hsa_family: Decimal,
    pub student_loan_interest_cap: Decimal,
    /// Fraction of the outstanding balance assumed paid as interest in a year.
    pub student_loan_interest_rate: Decimal,
    /// Credit per qualifying dependent.
    pub child_tax_credit: Decimal,
}

/// Income range over which a benefit is reduced. Above `end` it is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOut {
    pub start: Decimal,
    pub end: Decimal,
}

impl PhaseOut {
    pub const fn new(
        start: Decimal,
        end: Decimal,
    ) -> Self {
        Self { start, end }
    }

    /// Eligibility ceiling: income at or below `end` still qualifies.
    pub fn allows(
        &self,
        income: Decimal,
    ) -> bool {
        income <= self.end
    }
}

/// Everything that varies by filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalSchedule {
    pub brackets: Vec<Bracket>,
    pub standard_deduction: Decimal,
    pub additional_medicare_threshold: Decimal,
    pub student_loan_phase_out: PhaseOut,
    pub ira_phase_out: PhaseOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTables {
    pub tax_year: i32,
    pub payroll: PayrollTaxConfig,
    pub limits: ContributionLimits,
    federal: [FederalSchedule; 4],
    states: &'static [StateTaxInfo],
    rules: &'static [RuleCategory],
    fallback_rules: &'static [&'static str],
}

static CURRENT: LazyLock<TaxTables> = LazyLock::new(TaxTables::tax_year_2024);

impl TaxTables {
    /// The compiled-in tables for the current tax year.
    pub fn current() -> &'static TaxTables {
        &CURRENT
    }

    pub fn tax_year_2024() -> Self {
        Self {
            tax_year: federal_2024::TAX_YEAR,
            payroll: federal_2024::PAYROLL,
            limits: federal_2024::LIMITS,
            federal: FilingStatus::ALL.map(federal_2024::schedule),
            states: states_2024::STATES,
            rules: rules_2024::CATEGORIES,
            fallback_rules: rules_2024::FALLBACK,
        }
    }

    /// Returns a copy with one filing status's brackets replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if `brackets` do not form a valid schedule.
    pub fn with_federal_brackets(
        &self,
        status: FilingStatus,
        brackets: Vec<Bracket>,
    ) -> Result<Self, TableError> {
        validate_brackets(&brackets)?;

        let mut tables = self.clone();
        tables.federal[status.index()].brackets = brackets;
        Ok(tables)
    }

    pub fn schedule(
        &self,
        status: FilingStatus,
    ) -> &FederalSchedule {
        &self.federal[status.index()]
    }

    pub fn federal_brackets(
        &self,
        status: FilingStatus,
    ) -> &[Bracket] {
        &self.schedule(status).brackets
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        self.schedule(status).standard_deduction
    }

    /// Looks up a state by USPS code, ignoring case and surrounding whitespace.
    pub fn state(
        &self,
        abbreviation: &str,
    ) -> Option<&'static StateTaxInfo> {
        let code = abbreviation.trim();
        self.states
            .iter()
            .find(|state| state.abbreviation.eq_ignore_ascii_case(code))
    }

    /// Looks up a state by its full name, ignoring case.
    pub fn state_by_name(
        &self,
        name: &str,
    ) -> Option<&'static StateTaxInfo> {
        let name = name.trim();
        self.states
            .iter()
            .find(|state| state.name.eq_ignore_ascii_case(name))
    }

    pub fn states(&self) -> &'static [StateTaxInfo] {
        self.states
    }

    pub fn rule_categories(&self) -> &'static [RuleCategory] {
        self.rules
    }

    /// Categories returned when a query matches no keyword.
    pub fn fallback_rule_categories(&self) -> impl Iterator<Item = &'static RuleCategory> {
        let rules = self.rules;
        let fallback = self.fallback_rules;
        fallback
            .iter()
            .filter_map(move |name| rules.iter().find(|category| category.name == *name))
    }
}

/// Checks that a schedule starts at zero, is contiguous, ends unbounded
/// and only uses rates between 0 and 1.
///
/// # Errors
///
/// Returns the first [`TableError`] found, walking from the lowest bracket.
pub fn validate_brackets(brackets: &[Bracket]) -> Result<(), TableError> {
    let first = brackets.first().ok_or(TableError::Empty)?;
    if first.min != Decimal::ZERO {
        return Err(TableError::DoesNotStartAtZero(first.min));
    }

    let mut expected_min = Decimal::ZERO;
    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(TableError::InvalidRate(bracket.rate));
        }
        if bracket.min != expected_min {
            return Err(TableError::Gap {
                expected: expected_min,
                found: bracket.min,
            });
        }
        match bracket.max {
            Some(max) if max < bracket.min => return Err(TableError::Inverted(bracket.min)),
            Some(max) => expected_min = max,
            None if i + 1 < brackets.len() => {
                return Err(TableError::UnboundedBeforeEnd(bracket.min));
            }
            None => return Ok(()),
        }
    }

    Err(TableError::MissingTopBracket)
}
