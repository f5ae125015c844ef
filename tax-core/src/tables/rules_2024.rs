use crate::models::{RuleCategory, RuleEntry};

const IRS_BRACKETS: &str = "IRS Revenue Procedure 2023-34";
const IRS_PUB_17: &str = "IRS Publication 17";

pub(super) const BRACKETS: &str = "brackets";
pub(super) const STANDARD_DEDUCTION: &str = "standard_deduction";
pub(super) const FICA: &str = "fica";

/// Categories searched when no keyword matches.
pub(super) const FALLBACK: &[&str] = &[BRACKETS, STANDARD_DEDUCTION, FICA];

pub(super) const CATEGORIES: &[RuleCategory] = &[
    RuleCategory {
        name: BRACKETS,
        keywords: &["bracket", "rate", "marginal", "income tax"],
        entries: &[
            RuleEntry {
                title: "2024 Federal Tax Brackets (Single)",
                content: "10% up to $11,600; 12% to $47,150; 22% to $100,525; 24% to $191,950; \
                          32% to $243,725; 35% to $609,350; 37% above.",
                source: IRS_BRACKETS,
            },
            RuleEntry {
                title: "2024 Federal Tax Brackets (Married Filing Jointly)",
                content: "10% up to $23,200; 12% to $94,300; 22% to $201,050; 24% to $383,900; \
                          32% to $487,450; 35% to $731,200; 37% above.",
                source: IRS_BRACKETS,
            },
        ],
    },
    RuleCategory {
        name: STANDARD_DEDUCTION,
        keywords: &["standard deduction", "standard", "itemize"],
        entries: &[RuleEntry {
            title: "2024 Standard Deduction",
            content: "$14,600 single or married filing separately; $29,200 married filing jointly; \
                      $21,900 head of household. Itemize only when itemized deductions exceed this amount.",
            source: IRS_BRACKETS,
        }],
    },
    RuleCategory {
        name: FICA,
        keywords: &["fica", "social security", "medicare", "payroll"],
        entries: &[
            RuleEntry {
                title: "Social Security Tax",
                content: "6.2% employee share on wages up to the $168,600 wage base for 2024.",
                source: "Social Security Administration",
            },
            RuleEntry {
                title: "Medicare Tax",
                content: "1.45% on all wages, plus a 0.9% Additional Medicare Tax on wages above \
                          $200,000 (single), $250,000 (married filing jointly) or $125,000 \
                          (married filing separately).",
                source: "IRS Topic No. 560",
            },
        ],
    },
    RuleCategory {
        name: "retirement",
        keywords: &["401k", "401(k)", "ira", "retirement", "roth"],
        entries: &[
            RuleEntry {
                title: "2024 401(k) Contribution Limit",
                content: "$23,000 employee deferral limit, plus a $7,500 catch-up contribution at age 50 or older.",
                source: "IRS Notice 2023-75",
            },
            RuleEntry {
                title: "2024 IRA Contribution Limit",
                content: "$7,000, plus a $1,000 catch-up at age 50 or older. Traditional IRA deductions \
                          phase out between $77,000 and $87,000 MAGI for single filers covered by a \
                          workplace plan ($123,000–$143,000 married filing jointly).",
                source: "IRS Notice 2023-75",
            },
        ],
    },
    RuleCategory {
        name: "hsa",
        keywords: &["hsa", "health savings"],
        entries: &[RuleEntry {
            title: "2024 HSA Contribution Limit",
            content: "$4,150 self-only coverage, $8,300 family coverage, plus a $1,000 catch-up at age 55 or older.",
            source: "IRS Revenue Procedure 2023-23",
        }],
    },
    RuleCategory {
        name: "child_tax_credit",
        keywords: &["child", "dependent", "credit", "kids"],
        entries: &[RuleEntry {
            title: "Child Tax Credit",
            content: "Up to $2,000 per qualifying child under 17; up to $1,700 is refundable for 2024. \
                      Phases out above $200,000 MAGI ($400,000 married filing jointly).",
            source: "IRS Schedule 8812 instructions",
        }],
    },
    RuleCategory {
        name: "student_loans",
        keywords: &["student", "loan", "education"],
        entries: &[RuleEntry {
            title: "Student Loan Interest Deduction",
            content: "Deduct up to $2,500 of interest paid. Phases out between $80,000 and $95,000 MAGI \
                      ($165,000–$195,000 married filing jointly); not available when married filing separately.",
            source: "IRS Publication 970",
        }],
    },
    RuleCategory {
        name: "charitable",
        keywords: &["charit", "donat", "gift"],
        entries: &[RuleEntry {
            title: "Charitable Contributions",
            content: "Cash gifts to qualified charities are deductible up to 60% of AGI, but only when \
                      itemizing deductions.",
            source: "IRS Publication 526",
        }],
    },
    RuleCategory {
        name: "capital_gains",
        keywords: &["capital gain", "capital gains", "investment", "stock", "dividend"],
        entries: &[RuleEntry {
            title: "2024 Long-Term Capital Gains Rates",
            content: "0% up to $47,025 taxable income (single), 15% up to $518,900, 20% above. \
                      A 3.8% Net Investment Income Tax applies above $200,000 MAGI (single).",
            source: IRS_BRACKETS,
        }],
    },
    RuleCategory {
        name: "deadlines",
        keywords: &["deadline", "due", "april", "extension", "file by", "when"],
        entries: &[
            RuleEntry {
                title: "Filing Deadline",
                content: "2024 returns are due April 15, 2025. Form 4868 extends the filing deadline \
                          to October 15, 2025 but not the deadline to pay.",
                source: IRS_PUB_17,
            },
            RuleEntry {
                title: "Estimated Tax Payments",
                content: "Quarterly estimated payments for 2024 are due April 15, June 17 and \
                          September 16, 2024, and January 15, 2025.",
                source: "IRS Form 1040-ES",
            },
        ],
    },
];
