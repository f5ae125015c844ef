//! Deduction finder.
//!
//! Evaluates a fixed set of eligibility rules against a taxpayer profile,
//! re-runs the federal calculation with every applicable deduction added
//! to the taxpayer's current list, and attributes the resulting savings.
//!
//! | Rule                | Eligible when                                   | Amount                          |
//! |---------------------|-------------------------------------------------|---------------------------------|
//! | Student loans       | income within the phase-out ceiling             | 5% of balance, capped at $2,500 |
//! | HSA                 | contribution below the annual limit             | limit − contribution            |
//! | Traditional IRA     | income within the ceiling and below the limit   | limit − contribution            |
//! | Charitable          | itemized total exceeds the standard deduction   | donation                        |
//! | 401(k) (always run) | contribution below the annual limit             | limit − contribution            |
//! | Dependents (credit) | at least one dependent                          | $2,000 per dependent            |
//!
//! Every amount is what the rule would add on top of the matching entries
//! already in the current list, and the recalculation adds exactly that
//! much. A contribution reported both as a profile figure and as a list
//! entry counts once, at the larger of the two.
//!
//! Savings flow through two channels. Deduction savings are the drop in
//! tax minus the credit, split across applicable deductions in proportion
//! to their amounts. Credit savings equal the credit itself.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{
    format_dollars, non_negative, rate_of, round_whole, saturating_sum,
};
use crate::calculations::federal::{FederalTaxEngine, pre_tax_total};
use crate::models::{
    Deduction, DeductionFinderInput, DeductionKind, DeductionResult, FilingStatus,
    FoundDeduction, STUDENT_LOAN_INTEREST, TRADITIONAL_IRA, Treatment,
};
use crate::tables::{FederalSchedule, TaxTables};

const HSA_CONTRIBUTIONS: &str = "HSA Contributions";
const CHARITABLE_DONATIONS: &str = "Charitable Donations";
const RETIREMENT_401K: &str = "401k Contributions";
const CHILD_TAX_CREDIT: &str = "Child Tax Credit";

/// Outcome of one deduction rule: the reported entry and, when the rule
/// applies, the kind its amount is added to in the recalculation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Finding {
    entry: FoundDeduction,
    merge: Option<DeductionKind>,
}

impl Finding {
    fn applies(
        entry: FoundDeduction,
        kind: DeductionKind,
    ) -> Self {
        Self {
            entry,
            merge: Some(kind),
        }
    }

    fn rejected(entry: FoundDeduction) -> Self {
        Self { entry, merge: None }
    }

    /// The merged deduction for this finding: whatever `current` already
    /// holds of the kind plus the amount the finding reports.
    fn merged_into(
        &self,
        current: &[Deduction],
    ) -> Option<Deduction> {
        let kind = self.merge.as_ref()?;
        let existing = sum_of_kind(current, |k| k == kind);
        Some(Deduction::new(
            kind.clone(),
            existing.saturating_add(self.entry.amount),
        ))
    }
}

/// Outcome of the dependents rule.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CreditFinding {
    entry: FoundDeduction,
    amount: Decimal,
}

/// Merges `overrides` into `current`, keyed by deduction kind.
///
/// Entries of the same kind in `current` are summed; an override replaces
/// whatever `current` held for its kind.
pub fn merge_deductions(
    current: &[Deduction],
    overrides: &[Deduction],
) -> Vec<Deduction> {
    let mut merged: BTreeMap<DeductionKind, Decimal> = BTreeMap::new();

    for deduction in current {
        let total = merged.entry(deduction.kind.clone()).or_default();
        *total = total.saturating_add(non_negative(deduction.amount));
    }
    for deduction in overrides {
        merged.insert(deduction.kind.clone(), non_negative(deduction.amount));
    }

    merged
        .into_iter()
        .map(|(kind, amount)| Deduction::new(kind, amount))
        .collect()
}

fn sum_of_kind(
    deductions: &[Deduction],
    matches: impl Fn(&DeductionKind) -> bool,
) -> Decimal {
    saturating_sum(
        deductions
            .iter()
            .filter(|d| matches(&d.kind))
            .map(|d| non_negative(d.amount)),
    )
}

#[derive(Debug, Clone, Copy)]
pub struct DeductionFinder<'a> {
    tables: &'a TaxTables,
}

impl<'a> DeductionFinder<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Runs every enabled rule plus the 401(k) rule and reports the savings.
    ///
    /// When no rule applies the caller's current federal tax is returned
    /// unchanged and every savings figure is zero.
    pub fn find(
        &self,
        input: &DeductionFinderInput,
    ) -> DeductionResult {
        let engine = FederalTaxEngine::new(self.tables);
        let gross_income = engine.normalize_income(input.gross_income);
        let status = input.filing_status;
        let schedule = self.tables.schedule(status);
        let current = input.current_deductions.as_slice();

        let mut findings = Vec::new();
        if input.has_student_loans {
            findings.push(self.student_loans(
                current,
                gross_income,
                status,
                schedule,
                input.student_loan_balance,
            ));
        }
        if input.has_hsa {
            findings.push(self.hsa(current, input.hsa_contribution, input.hsa_family_coverage));
        }
        if input.has_ira {
            findings.push(self.ira(current, gross_income, status, schedule, input.ira_contribution));
        }
        if input.has_charitable {
            findings.push(self.charitable(current, schedule.standard_deduction, input.charitable_amount));
        }
        findings.push(self.retirement_401k(current));

        let credit = input
            .has_dependents
            .then(|| self.dependents(input.dependent_count));
        let credit_amount = credit.as_ref().map_or(Decimal::ZERO, |c| c.amount);

        let overrides: Vec<Deduction> = findings
            .iter()
            .filter_map(|finding| finding.merged_into(current))
            .collect();
        let current_federal_tax = round_whole(non_negative(input.current_federal_tax));

        let (new_federal_tax, new_effective_rate, new_take_home) =
            if overrides.is_empty() && credit_amount == Decimal::ZERO {
                let fica = round_whole(engine.compute_fica(gross_income, status));
                let pre_tax = pre_tax_total(current);
                (
                    current_federal_tax,
                    rate_of(current_federal_tax + fica, gross_income),
                    round_whole(gross_income - current_federal_tax - fica - pre_tax),
                )
            } else {
                let merged = merge_deductions(current, &overrides);
                let total = sum_of_kind(&merged, |_| true);
                let result = engine.summarize(
                    gross_income,
                    status,
                    total,
                    pre_tax_total(&merged),
                    credit_amount,
                );
                (result.federal_tax, result.effective_rate, result.take_home_pay)
            };

        let total_annual_savings = non_negative(current_federal_tax - new_federal_tax);
        let deduction_savings = non_negative(total_annual_savings - credit_amount);

        let mut found_deductions: Vec<FoundDeduction> =
            findings.into_iter().map(|finding| finding.entry).collect();
        attribute_savings(&mut found_deductions, deduction_savings);
        if let Some(credit) = credit {
            found_deductions.push(credit.entry);
        }

        debug!(
            %current_federal_tax,
            %new_federal_tax,
            %total_annual_savings,
            credit_savings = %credit_amount,
            applicable = found_deductions.iter().filter(|d| d.applicable).count(),
            "deduction search complete"
        );

        DeductionResult {
            found_deductions,
            credit_savings: credit_amount,
            total_annual_savings,
            total_monthly_savings: round_whole(total_annual_savings / Decimal::from(12)),
            new_federal_tax,
            new_effective_rate,
            new_take_home,
        }
    }

    fn student_loans(
        &self,
        current: &[Deduction],
        gross_income: Decimal,
        status: FilingStatus,
        schedule: &FederalSchedule,
        balance: Decimal,
    ) -> Finding {
        let limits = &self.tables.limits;
        let interest = round_whole(
            (non_negative(balance) * limits.student_loan_interest_rate)
                .min(limits.student_loan_interest_cap),
        );
        let phase_out = schedule.student_loan_phase_out;

        if !phase_out.allows(gross_income) {
            let reason = if phase_out.end == Decimal::ZERO {
                format!("Not available to {}", status.display_name())
            } else {
                format!(
                    "Income of {} exceeds the {} phase-out limit for {}",
                    format_dollars(gross_income),
                    format_dollars(phase_out.end),
                    status.display_name()
                )
            };
            return Finding::rejected(FoundDeduction::ineligible(STUDENT_LOAN_INTEREST, interest, reason));
        }

        let kind = DeductionKind::student_loan_interest();
        let claimed = sum_of_kind(current, |k| *k == kind);
        if claimed > Decimal::ZERO && claimed >= interest {
            return Finding::rejected(FoundDeduction::ineligible(
                STUDENT_LOAN_INTEREST,
                Decimal::ZERO,
                format!("Already deducting {} of student loan interest", format_dollars(claimed)),
            ));
        }

        Finding::applies(
            FoundDeduction::eligible(STUDENT_LOAN_INTEREST, interest - claimed),
            kind,
        )
    }

    fn hsa(
        &self,
        current: &[Deduction],
        contribution: Decimal,
        family_coverage: bool,
    ) -> Finding {
        let limits = &self.tables.limits;
        let cap = if family_coverage {
            limits.max_hsa_family
        } else {
            limits.max_hsa_self
        };
        let contributed = contribution.max(sum_of_kind(current, |k| *k == DeductionKind::PreTaxHsa));

        match self.room_under_cap(contributed, cap) {
            Some(additional) => Finding::applies(
                FoundDeduction::eligible(HSA_CONTRIBUTIONS, additional),
                DeductionKind::PreTaxHsa,
            ),
            None => Finding::rejected(FoundDeduction::ineligible(
                HSA_CONTRIBUTIONS,
                Decimal::ZERO,
                at_cap_reason(cap),
            )),
        }
    }

    fn ira(
        &self,
        current: &[Deduction],
        gross_income: Decimal,
        status: FilingStatus,
        schedule: &FederalSchedule,
        contribution: Decimal,
    ) -> Finding {
        let cap = self.tables.limits.max_ira;
        let phase_out = schedule.ira_phase_out;
        let kind = DeductionKind::traditional_ira();
        let contributed = contribution.max(sum_of_kind(current, |k| *k == kind));

        if !phase_out.allows(gross_income) {
            return Finding::rejected(FoundDeduction::ineligible(
                TRADITIONAL_IRA,
                non_negative(cap - non_negative(contributed)),
                format!(
                    "Income of {} exceeds the {} deductibility limit for {} covered by a workplace plan",
                    format_dollars(gross_income),
                    format_dollars(phase_out.end),
                    status.display_name()
                ),
            ));
        }

        match self.room_under_cap(contributed, cap) {
            Some(additional) => Finding::applies(
                FoundDeduction::eligible(TRADITIONAL_IRA, additional),
                kind,
            ),
            None => Finding::rejected(FoundDeduction::ineligible(
                TRADITIONAL_IRA,
                Decimal::ZERO,
                at_cap_reason(cap),
            )),
        }
    }

    fn charitable(
        &self,
        current: &[Deduction],
        standard_deduction: Decimal,
        donation: Decimal,
    ) -> Finding {
        let donation = round_whole(non_negative(donation));
        let charity_kind = DeductionKind::Itemized(CHARITABLE_DONATIONS.into());
        let existing_itemized =
            sum_of_kind(current, |kind| kind.is_itemized() && *kind != charity_kind);
        let itemized_total = existing_itemized.saturating_add(donation);

        if itemized_total <= standard_deduction {
            return Finding::rejected(FoundDeduction::ineligible(
                CHARITABLE_DONATIONS,
                donation,
                format!(
                    "Itemized total of {} does not exceed the {} standard deduction",
                    format_dollars(itemized_total),
                    format_dollars(standard_deduction)
                ),
            ));
        }

        let claimed = sum_of_kind(current, |kind| *kind == charity_kind);
        if claimed > Decimal::ZERO && claimed >= donation {
            return Finding::rejected(FoundDeduction::ineligible(
                CHARITABLE_DONATIONS,
                Decimal::ZERO,
                format!("Already deducting {} in donations", format_dollars(claimed)),
            ));
        }

        Finding::applies(
            FoundDeduction::eligible(CHARITABLE_DONATIONS, donation - claimed),
            charity_kind,
        )
    }

    fn retirement_401k(
        &self,
        current: &[Deduction],
    ) -> Finding {
        let cap = self.tables.limits.max_401k;
        let contributed = sum_of_kind(current, |kind| *kind == DeductionKind::PreTax401k);

        match self.room_under_cap(contributed, cap) {
            Some(additional) => Finding::applies(
                FoundDeduction::eligible(RETIREMENT_401K, additional),
                DeductionKind::PreTax401k,
            ),
            None => Finding::rejected(FoundDeduction::ineligible(
                RETIREMENT_401K,
                Decimal::ZERO,
                at_cap_reason(cap),
            )),
        }
    }

    fn dependents(
        &self,
        count: u32,
    ) -> CreditFinding {
        if count == 0 {
            let mut entry =
                FoundDeduction::ineligible(CHILD_TAX_CREDIT, Decimal::ZERO, "No qualifying dependents reported");
            entry.treatment = Treatment::Credit;
            return CreditFinding {
                entry,
                amount: Decimal::ZERO,
            };
        }

        let amount = Decimal::from(count) * self.tables.limits.child_tax_credit;
        CreditFinding {
            entry: FoundDeduction::credit(
                CHILD_TAX_CREDIT,
                amount,
                "Tax credit: reduces your tax bill directly rather than your taxable income",
            ),
            amount,
        }
    }

    /// Remaining room under `cap`, or `None` when the contribution already
    /// reaches it.
    fn room_under_cap(
        &self,
        contribution: Decimal,
        cap: Decimal,
    ) -> Option<Decimal> {
        let contribution = non_negative(contribution);
        (contribution < cap).then(|| round_whole(cap - contribution))
    }
}

fn at_cap_reason(cap: Decimal) -> String {
    format!("Already contributing the {} annual maximum", format_dollars(cap))
}

/// Splits `savings` across applicable deductions by their share of the
/// applicable total. Credits and ineligible entries are left untouched.
fn attribute_savings(
    entries: &mut [FoundDeduction],
    savings: Decimal,
) {
    if savings <= Decimal::ZERO {
        return;
    }

    let is_share_holder =
        |entry: &FoundDeduction| entry.applicable && entry.treatment == Treatment::Deduction;
    let total = saturating_sum(
        entries
            .iter()
            .filter(|entry| is_share_holder(entry))
            .map(|entry| entry.amount),
    );
    if total <= Decimal::ZERO {
        return;
    }

    for entry in entries.iter_mut().filter(|entry| is_share_holder(entry)) {
        entry.annual_savings = round_whole(savings * (entry.amount / total));
    }
}
