use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const TRADITIONAL_IRA: &str = "Traditional IRA";
pub const STUDENT_LOAN_INTEREST: &str = "Student Loan Interest";

/// How a deduction is treated by the engines.
///
/// Pre-tax payroll contributions (`PreTax401k`, `PreTaxHsa`) reduce taxable
/// income and are also withheld from take-home pay. `Adjustment` covers
/// above-the-line items such as student-loan interest; `Itemized` entries
/// count toward the itemized total compared against the standard deduction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    #[serde(rename = "pre_tax_401k")]
    PreTax401k,
    PreTaxHsa,
    StandardDeduction,
    Adjustment(String),
    Itemized(String),
}

impl DeductionKind {
    /// Maps a free-form label onto a kind.
    ///
    /// Matching is on whole alphanumeric tokens, case-insensitive: a label
    /// carrying the token `401k` or `hsa` is a pre-tax contribution and one
    /// carrying `standard` is the standard deduction. A non-Roth `ira`
    /// label and a `student` + `loan` label map onto the canonical
    /// [`DeductionKind::traditional_ira`] and
    /// [`DeductionKind::student_loan_interest`] adjustments. Labels such as
    /// "HSAccount Fees" stay itemized.
    pub fn classify(label: &str) -> Self {
        let lowered = label.to_lowercase();
        let has_token = |needle: &str| {
            lowered
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == needle)
        };

        if has_token("401k") {
            Self::PreTax401k
        } else if has_token("hsa") {
            Self::PreTaxHsa
        } else if has_token("standard") {
            Self::StandardDeduction
        } else if has_token("ira") && !has_token("roth") {
            Self::traditional_ira()
        } else if has_token("student") && (has_token("loan") || has_token("loans")) {
            Self::student_loan_interest()
        } else {
            Self::Itemized(label.trim().to_string())
        }
    }

    pub fn traditional_ira() -> Self {
        Self::Adjustment(TRADITIONAL_IRA.to_string())
    }

    pub fn student_loan_interest() -> Self {
        Self::Adjustment(STUDENT_LOAN_INTEREST.to_string())
    }

    pub fn label(&self) -> &str {
        match self {
            Self::PreTax401k => "401k Contributions",
            Self::PreTaxHsa => "HSA Contributions",
            Self::StandardDeduction => "Standard Deduction",
            Self::Adjustment(label) | Self::Itemized(label) => label,
        }
    }

    /// Whether the amount is withheld from pay before it reaches the taxpayer.
    pub fn is_pre_tax(&self) -> bool {
        matches!(self, Self::PreTax401k | Self::PreTaxHsa)
    }

    pub fn is_itemized(&self) -> bool {
        matches!(self, Self::Itemized(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub kind: DeductionKind,
    pub amount: Decimal,
}

impl Deduction {
    pub fn new(
        kind: DeductionKind,
        amount: Decimal,
    ) -> Self {
        Self { kind, amount }
    }

    /// Builds a deduction from a label, classifying it with
    /// [`DeductionKind::classify`].
    pub fn from_label(
        label: &str,
        amount: Decimal,
    ) -> Self {
        Self::new(DeductionKind::classify(label), amount)
    }

    pub fn label(&self) -> &str {
        self.kind.label()
    }
}
