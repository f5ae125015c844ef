use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{Bracket, FilingStatus, TableError, TaxTables};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading bracket data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown filing status '{0}'")]
    UnknownFilingStatus(String),

    #[error("Invalid {status} schedule: {source}")]
    InvalidSchedule {
        status: FilingStatus,
        #[source]
        source: TableError,
    },

    #[error("Bracket file has no rows")]
    Empty,
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// Maps a `filing_status` column value to a [`FilingStatus`].
///
/// Accepts the snake_case status names and the IRS schedule codes:
/// - Schedule X → Single
/// - Schedule Y-1 → Married Filing Jointly
/// - Schedule Y-2 → Married Filing Separately
/// - Schedule Z → Head of Household
fn filing_status_for(code: &str) -> Result<FilingStatus, BracketLoaderError> {
    if let Some(status) = FilingStatus::parse(code) {
        return Ok(status);
    }
    match code.trim().to_ascii_uppercase().as_str() {
        "X" => Ok(FilingStatus::Single),
        "Y-1" => Ok(FilingStatus::MarriedJoint),
        "Y-2" => Ok(FilingStatus::MarriedSeparate),
        "Z" => Ok(FilingStatus::HeadOfHousehold),
        _ => Err(BracketLoaderError::UnknownFilingStatus(code.to_string())),
    }
}

/// A single record from the brackets CSV file.
///
/// - `filing_status`: status name (`single`, `married_joint`, ...) or IRS
///   schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: the lower edge of this bracket
/// - `max_income`: the upper edge (empty for unlimited)
/// - `rate`: the marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub filing_status: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for federal bracket schedules from CSV files.
///
/// Parsed records replace the compiled-in schedules of the filing statuses
/// they mention; statuses absent from the file keep their current brackets.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file
    /// or a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Returns a copy of `tables` with each mentioned status's schedule
    /// replaced by the records for that status, sorted by `min_income`.
    ///
    /// Every replacement schedule is validated before anything is applied.
    pub fn apply(
        tables: &TaxTables,
        records: &[BracketRecord],
    ) -> Result<TaxTables, BracketLoaderError> {
        if records.is_empty() {
            return Err(BracketLoaderError::Empty);
        }

        let mut schedules: BTreeMap<FilingStatus, Vec<Bracket>> = BTreeMap::new();
        for record in records {
            let status = filing_status_for(&record.filing_status)?;
            schedules.entry(status).or_default().push(Bracket::new(
                record.rate,
                record.min_income,
                record.max_income,
            ));
        }

        let mut updated = tables.clone();
        for (status, mut brackets) in schedules {
            brackets.sort_by(|a, b| a.min.cmp(&b.min));
            debug!(%status, brackets = brackets.len(), "replacing federal schedule");
            updated = updated
                .with_federal_brackets(status, brackets)
                .map_err(|source| BracketLoaderError::InvalidSchedule { status, source })?;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const SINGLE_CSV: &str = r#"filing_status,min_income,max_income,rate
single,0,12000,0.10
single,12000,50000,0.12
single,50000,,0.22
"#;

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "filing_status,min_income,max_income,rate\nsingle,0,11600,0.10";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                filing_status: "single".to_string(),
                min_income: dec!(0),
                max_income: Some(dec!(11600)),
                rate: dec!(0.10),
            }]
        );
    }

    #[test]
    fn test_parse_csv_unlimited_max_income() {
        let csv = "filing_status,min_income,max_income,rate\nsingle,609350,,0.37";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].min_income, dec!(609350));
        assert_eq!(records[0].rate, dec!(0.37));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "filing_status,min_income\nsingle,0";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail for missing column");

        let BracketLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {msg}");
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "filing_status,min_income,max_income,rate\nsingle,abc,11600,0.10";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail for invalid decimal");

        assert!(matches!(err, BracketLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "filing_status,min_income,max_income,rate\n";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn test_filing_status_for_names_and_schedules() {
        assert_eq!(filing_status_for("single"), Ok(FilingStatus::Single));
        assert_eq!(filing_status_for("X"), Ok(FilingStatus::Single));
        assert_eq!(filing_status_for("y-1"), Ok(FilingStatus::MarriedJoint));
        assert_eq!(filing_status_for("Y-2"), Ok(FilingStatus::MarriedSeparate));
        assert_eq!(filing_status_for("Z"), Ok(FilingStatus::HeadOfHousehold));
    }

    #[test]
    fn test_filing_status_for_invalid() {
        assert_eq!(
            filing_status_for("QSS"),
            Err(BracketLoaderError::UnknownFilingStatus("QSS".to_string()))
        );
    }

    #[test]
    fn test_apply_replaces_only_mentioned_status() {
        let tables = TaxTables::tax_year_2024();
        let records = BracketTableLoader::parse(SINGLE_CSV.as_bytes()).unwrap();

        let updated = BracketTableLoader::apply(&tables, &records).unwrap();

        assert_eq!(
            updated.federal_brackets(FilingStatus::Single),
            &[
                Bracket::new(dec!(0.10), dec!(0), Some(dec!(12000))),
                Bracket::new(dec!(0.12), dec!(12000), Some(dec!(50000))),
                Bracket::new(dec!(0.22), dec!(50000), None),
            ]
        );
        assert_eq!(
            updated.federal_brackets(FilingStatus::HeadOfHousehold),
            tables.federal_brackets(FilingStatus::HeadOfHousehold)
        );
    }

    #[test]
    fn test_apply_sorts_rows_by_min_income() {
        let csv = "filing_status,min_income,max_income,rate\n\
                   single,50000,,0.22\n\
                   single,0,50000,0.10\n";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let updated = BracketTableLoader::apply(&TaxTables::tax_year_2024(), &records).unwrap();

        assert_eq!(updated.federal_brackets(FilingStatus::Single)[0].min, dec!(0));
    }

    #[test]
    fn test_apply_rejects_gap() {
        let csv = "filing_status,min_income,max_income,rate\n\
                   single,0,10000,0.10\n\
                   single,12000,,0.22\n";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketTableLoader::apply(&TaxTables::tax_year_2024(), &records).unwrap_err();

        assert_eq!(
            err,
            BracketLoaderError::InvalidSchedule {
                status: FilingStatus::Single,
                source: TableError::Gap {
                    expected: dec!(10000),
                    found: dec!(12000),
                },
            }
        );
    }

    #[test]
    fn test_apply_rejects_unknown_status() {
        let csv = "filing_status,min_income,max_income,rate\nwidowed,0,,0.10\n";
        let records = BracketTableLoader::parse(csv.as_bytes()).unwrap();

        let err = BracketTableLoader::apply(&TaxTables::tax_year_2024(), &records).unwrap_err();

        assert_eq!(err, BracketLoaderError::UnknownFilingStatus("widowed".to_string()));
    }

    #[test]
    fn test_apply_rejects_empty_file() {
        let err = BracketTableLoader::apply(&TaxTables::tax_year_2024(), &[]).unwrap_err();

        assert_eq!(err, BracketLoaderError::Empty);
    }
}
