mod config;
mod geolocation;
mod logging;

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use tax_core::{
    Deduction, DeductionFinder, DeductionFinderInput, DeductionKind, FederalTaxEngine,
    FederalTaxInput, FilingStatus, Geolocator, StateTaxEngine, StateTaxInput, TaxRuleIndex,
    TaxRuleQuery, TaxTables,
};
use tax_data::BracketTableLoader;

use crate::config::Settings;
use crate::geolocation::IpApiGeolocator;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// US income-tax estimator.
///
/// Every command prints its result as JSON on stdout. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or EnvFilter directive. Overrides the settings file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// CSV file replacing the compiled-in federal brackets.
    #[arg(long, global = true)]
    brackets: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Federal income tax, FICA and take-home pay.
    Federal {
        /// Annual gross income.
        #[arg(long)]
        income: Decimal,

        /// single, married_joint, married_separate or head_of_household.
        #[arg(long, value_parser = parse_filing_status)]
        filing_status: Option<FilingStatus>,

        /// A deduction as LABEL=AMOUNT, e.g. "401k=5000". Repeatable.
        #[arg(long = "deduction", value_parser = parse_deduction)]
        deductions: Vec<Deduction>,

        /// Add the standard deduction for the filing status.
        #[arg(long)]
        standard: bool,
    },

    /// State income tax on wages.
    State {
        #[arg(long)]
        income: Decimal,

        /// Two-letter USPS code. Falls back to the settings file.
        #[arg(long)]
        state: Option<String>,

        #[arg(long, value_parser = parse_filing_status)]
        filing_status: Option<FilingStatus>,
    },

    /// Search for missed deductions and credits.
    Deductions {
        /// JSON taxpayer profile; `-` reads stdin.
        #[arg(long)]
        input: PathBuf,
    },

    /// Look up current tax rules by keyword.
    Rules {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Detect the state from the machine's public IP address.
    Locate {
        /// ipapi-compatible endpoint. Overrides the settings file.
        #[arg(long)]
        url: Option<String>,
    },
}

fn parse_filing_status(value: &str) -> Result<FilingStatus, String> {
    FilingStatus::parse(value).ok_or_else(|| {
        format!(
            "unknown filing status '{value}'; expected one of {}",
            FilingStatus::ALL.map(|s| s.as_str()).join(", ")
        )
    })
}

fn parse_deduction(value: &str) -> Result<Deduction, String> {
    let (label, amount) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LABEL=AMOUNT, got '{value}'"))?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("invalid amount in '{value}': {e}"))?;

    Ok(Deduction::from_label(label, amount))
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize result")?;
    println!("{json}");
    Ok(())
}

/// The compiled-in tables, with federal brackets replaced from `csv` if given.
fn load_tables(csv: Option<&Path>) -> Result<Cow<'static, TaxTables>> {
    let Some(path) = csv else {
        return Ok(Cow::Borrowed(TaxTables::current()));
    };

    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let records = BracketTableLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
    let tables = BracketTableLoader::apply(TaxTables::current(), &records)
        .with_context(|| format!("Failed to apply brackets from: {}", path.display()))?;

    info!(path = %path.display(), rows = records.len(), "loaded federal brackets");
    Ok(Cow::Owned(tables))
}

fn read_input(path: &Path) -> Result<String> {
    let mut content = String::new();
    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
    } else {
        content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;
    }
    Ok(content)
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    logging::init_logging(level, settings.log_file.as_deref())?;
    debug!(?settings, "settings loaded");

    let brackets = cli.brackets.as_deref().or(settings.brackets_csv.as_deref());
    let tables = load_tables(brackets)?;

    match cli.command {
        Command::Federal {
            income,
            filing_status,
            mut deductions,
            standard,
        } => {
            let filing_status = filing_status.unwrap_or(settings.filing_status);
            if standard {
                deductions.push(Deduction::new(
                    DeductionKind::StandardDeduction,
                    tables.standard_deduction(filing_status),
                ));
            }

            let result = FederalTaxEngine::new(&tables).calculate(&FederalTaxInput {
                gross_income: income,
                filing_status,
                deductions,
            });
            print_json(&result)
        }

        Command::State {
            income,
            state,
            filing_status,
        } => {
            let Some(state_abbreviation) = state.or(settings.state) else {
                bail!("no state given; pass --state, set `state` in the settings file, or run `tax-cli locate`");
            };

            let result = StateTaxEngine::new(&tables).calculate(&StateTaxInput {
                state_abbreviation,
                gross_income: income,
                filing_status: filing_status.unwrap_or(settings.filing_status),
            })?;
            print_json(&result)
        }

        Command::Deductions { input } => {
            let content = read_input(&input)?;
            let profile: DeductionFinderInput = serde_json::from_str(&content)
                .with_context(|| format!("invalid taxpayer profile in {}", input.display()))?;

            let result = DeductionFinder::new(&tables).find(&profile);
            print_json(&result)
        }

        Command::Rules { query } => {
            let result = TaxRuleIndex::new(&tables).search(&TaxRuleQuery {
                query: query.join(" "),
            });
            print_json(&result)
        }

        Command::Locate { url } => {
            let url = url.unwrap_or(settings.geolocation_url);
            let geolocator = IpApiGeolocator::new(&url)?;

            let location = geolocator.locate().await?;
            print_json(&location)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_deduction_classifies_label() {
        assert_eq!(
            parse_deduction("401k=5000"),
            Ok(Deduction::new(DeductionKind::PreTax401k, dec!(5000)))
        );
        assert_eq!(
            parse_deduction("Mortgage Interest=9000.50"),
            Ok(Deduction::new(
                DeductionKind::Itemized("Mortgage Interest".to_string()),
                dec!(9000.50)
            ))
        );
    }

    #[test]
    fn parse_deduction_rejects_missing_amount() {
        assert!(parse_deduction("401k").is_err());
        assert!(parse_deduction("401k=lots").is_err());
    }

    #[test]
    fn parse_filing_status_lists_choices_on_error() {
        let err = parse_filing_status("widowed").unwrap_err();

        assert!(err.contains("head_of_household"));
        assert_eq!(parse_filing_status("Married_Joint"), Ok(FilingStatus::MarriedJoint));
    }

    #[test]
    fn federal_command_parses_repeated_deductions() {
        let cli = Cli::try_parse_from([
            "tax-cli",
            "federal",
            "--income",
            "80000",
            "--deduction",
            "401k=5000",
            "--deduction",
            "hsa=1000",
            "--standard",
        ])
        .unwrap();

        let Command::Federal {
            income,
            deductions,
            standard,
            filing_status,
        } = cli.command
        else {
            panic!("expected federal command");
        };
        assert_eq!(income, dec!(80000));
        assert_eq!(deductions.len(), 2);
        assert!(standard);
        assert_eq!(filing_status, None);
    }

    #[test]
    fn rules_command_requires_a_query() {
        assert!(Cli::try_parse_from(["tax-cli", "rules"]).is_err());
    }

    #[test]
    fn load_tables_without_csv_borrows_current() {
        let tables = load_tables(None).unwrap();

        assert!(matches!(tables, Cow::Borrowed(_)));
    }
}
