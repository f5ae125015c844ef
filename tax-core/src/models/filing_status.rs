use std::fmt;

use serde::{Deserialize, Serialize};

/// Federal filing status. Selects the bracket schedule, the standard
/// deduction and every status-specific threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Single,
    MarriedJoint,
    MarriedSeparate,
    HeadOfHousehold,
}

impl FilingStatus {
    /// Every status, in table order.
    pub const ALL: [FilingStatus; 4] = [
        Self::Single,
        Self::MarriedJoint,
        Self::MarriedSeparate,
        Self::HeadOfHousehold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedJoint => "married_joint",
            Self::MarriedSeparate => "married_separate",
            Self::HeadOfHousehold => "head_of_household",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "married_joint" => Some(Self::MarriedJoint),
            "married_separate" => Some(Self::MarriedSeparate),
            "head_of_household" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }

    /// Position of this status in [`FilingStatus::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Single => 0,
            Self::MarriedJoint => 1,
            Self::MarriedSeparate => 2,
            Self::HeadOfHousehold => 3,
        }
    }

    /// Human-readable name used in explanations.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Single => "single filers",
            Self::MarriedJoint => "married couples filing jointly",
            Self::MarriedSeparate => "married individuals filing separately",
            Self::HeadOfHousehold => "heads of household",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_status() {
        for status in FilingStatus::ALL {
            assert_eq!(FilingStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            FilingStatus::parse(" Married_Joint "),
            Some(FilingStatus::MarriedJoint)
        );
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert_eq!(FilingStatus::parse("MFJ"), None);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, status) in FilingStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&FilingStatus::HeadOfHousehold).unwrap();

        assert_eq!(json, "\"head_of_household\"");
    }
}
