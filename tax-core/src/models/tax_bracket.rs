use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive-rate band. `max` is `None` for the top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub rate: Decimal,
    pub min: Decimal,
    pub max: Option<Decimal>,
}

impl Bracket {
    pub const fn new(
        rate: Decimal,
        min: Decimal,
        max: Option<Decimal>,
    ) -> Self {
        Self { rate, min, max }
    }

    /// Width of the band, or `None` when it is unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.max.map(|max| max - self.min)
    }
}

/// How a single bracket contributed to a calculation.
///
/// `max` is always resolved: for the unbounded top bracket it is the point
/// where the taxed income ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    pub rate: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}
