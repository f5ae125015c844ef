//! 2024 federal figures (IRS Rev. Proc. 2023-34, SSA wage base, IRS Notice 2023-75).

use rust_decimal_macros::dec;

use crate::models::{Bracket, FilingStatus};

use super::{ContributionLimits, FederalSchedule, PayrollTaxConfig, PhaseOut};

pub(super) const TAX_YEAR: i32 = 2024;

const SINGLE: &[Bracket] = &[
    Bracket::new(dec!(0.10), dec!(0), Some(dec!(11600))),
    Bracket::new(dec!(0.12), dec!(11600), Some(dec!(47150))),
    Bracket::new(dec!(0.22), dec!(47150), Some(dec!(100525))),
    Bracket::new(dec!(0.24), dec!(100525), Some(dec!(191950))),
    Bracket::new(dec!(0.32), dec!(191950), Some(dec!(243725))),
    Bracket::new(dec!(0.35), dec!(243725), Some(dec!(609350))),
    Bracket::new(dec!(0.37), dec!(609350), None),
];

const MARRIED_JOINT: &[Bracket] = &[
    Bracket::new(dec!(0.10), dec!(0), Some(dec!(23200))),
    Bracket::new(dec!(0.12), dec!(23200), Some(dec!(94300))),
    Bracket::new(dec!(0.22), dec!(94300), Some(dec!(201050))),
    Bracket::new(dec!(0.24), dec!(201050), Some(dec!(383900))),
    Bracket::new(dec!(0.32), dec!(383900), Some(dec!(487450))),
    Bracket::new(dec!(0.35), dec!(487450), Some(dec!(731200))),
    Bracket::new(dec!(0.37), dec!(731200), None),
];

const MARRIED_SEPARATE: &[Bracket] = &[
    Bracket::new(dec!(0.10), dec!(0), Some(dec!(11600))),
    Bracket::new(dec!(0.12), dec!(11600), Some(dec!(47150))),
    Bracket::new(dec!(0.22), dec!(47150), Some(dec!(100525))),
    Bracket::new(dec!(0.24), dec!(100525), Some(dec!(191950))),
    Bracket::new(dec!(0.32), dec!(191950), Some(dec!(243725))),
    Bracket::new(dec!(0.35), dec!(243725), Some(dec!(365600))),
    Bracket::new(dec!(0.37), dec!(365600), None),
];

const HEAD_OF_HOUSEHOLD: &[Bracket] = &[
    Bracket::new(dec!(0.10), dec!(0), Some(dec!(16550))),
    Bracket::new(dec!(0.12), dec!(16550), Some(dec!(63100))),
    Bracket::new(dec!(0.22), dec!(63100), Some(dec!(100500))),
    Bracket::new(dec!(0.24), dec!(100500), Some(dec!(191950))),
    Bracket::new(dec!(0.32), dec!(191950), Some(dec!(243700))),
    Bracket::new(dec!(0.35), dec!(243700), Some(dec!(609350))),
    Bracket::new(dec!(0.37), dec!(609350), None),
];

pub(super) const PAYROLL: PayrollTaxConfig = PayrollTaxConfig {
    social_security_wage_base: dec!(168600),
    social_security_rate: dec!(0.062),
    medicare_rate: dec!(0.0145),
    additional_medicare_rate: dec!(0.009),
};

pub(super) const LIMITS: ContributionLimits = ContributionLimits {
    max_401k: dec!(23000),
    max_ira: dec!(7000),
    max_hsa_self: dec!(4150),
    max_hsa_family: dec!(8300),
    student_loan_interest_cap: dec!(2500),
    student_loan_interest_rate: dec!(0.05),
    child_tax_credit: dec!(2000),
};

pub(super) fn schedule(status: FilingStatus) -> FederalSchedule {
    match status {
        FilingStatus::Single => FederalSchedule {
            brackets: SINGLE.to_vec(),
            standard_deduction: dec!(14600),
            additional_medicare_threshold: dec!(200000),
            student_loan_phase_out: PhaseOut::new(dec!(80000), dec!(95000)),
            ira_phase_out: PhaseOut::new(dec!(77000), dec!(87000)),
        },
        FilingStatus::MarriedJoint => FederalSchedule {
            brackets: MARRIED_JOINT.to_vec(),
            standard_deduction: dec!(29200),
            additional_medicare_threshold: dec!(250000),
            student_loan_phase_out: PhaseOut::new(dec!(165000), dec!(195000)),
            ira_phase_out: PhaseOut::new(dec!(123000), dec!(143000)),
        },
        // Student-loan interest is not deductible when filing separately.
        FilingStatus::MarriedSeparate => FederalSchedule {
            brackets: MARRIED_SEPARATE.to_vec(),
            standard_deduction: dec!(14600),
            additional_medicare_threshold: dec!(125000),
            student_loan_phase_out: PhaseOut::new(dec!(0), dec!(0)),
            ira_phase_out: PhaseOut::new(dec!(0), dec!(10000)),
        },
        FilingStatus::HeadOfHousehold => FederalSchedule {
            brackets: HEAD_OF_HOUSEHOLD.to_vec(),
            standard_deduction: dec!(21900),
            additional_medicare_threshold: dec!(200000),
            student_loan_phase_out: PhaseOut::new(dec!(80000), dec!(95000)),
            ira_phase_out: PhaseOut::new(dec!(77000), dec!(87000)),
        },
    }
}
