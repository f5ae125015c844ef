//! Settings file.
//!
//! Every key is optional; a missing file section falls back to
//! [`Settings::default`]. Command-line flags override what is read here.
//!
//! ```toml
//! filing_status = "married_joint"
//! state = "CA"
//! log_level = "debug"
//! log_file = "tax-cli.log"
//! brackets_csv = "brackets/2024.csv"
//! geolocation_url = "https://ipapi.co/json/"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tax_core::FilingStatus;
use thiserror::Error;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Filing status used when a command does not pass one.
    pub filing_status: FilingStatus,
    /// USPS code used by `state` when no `--state` is given.
    pub state: Option<String>,
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins over it.
    pub log_level: String,
    /// Log records are appended here as well as to stderr.
    pub log_file: Option<PathBuf>,
    /// Replaces the compiled-in federal brackets.
    pub brackets_csv: Option<PathBuf>,
    pub geolocation_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filing_status: FilingStatus::Single,
            state: None,
            log_level: "info".to_string(),
            log_file: None,
            brackets_csv: None,
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
        }
    }
}

impl Settings {
    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
