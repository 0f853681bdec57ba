//! Run configuration: where to read, where to write, and how to test.
use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_LAG: usize = 3;
pub const DEFAULT_PRECISION: u32 = 4;
/// Leading identifier columns (e.g. YEAR, DOY) that are not analysis variables.
pub const DEFAULT_ID_COLUMNS: usize = 2;

/// Which sub-statistic of the Granger test supplies the reported p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Statistic {
    /// Chi-squared form of the SSR comparison (`ssr_chi2test`).
    #[default]
    SsrChi2,
    /// F form of the SSR comparison (`ssr_ftest`).
    SsrF,
    /// Likelihood-ratio test (`lrtest`).
    Lr,
}

impl Statistic {
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::SsrChi2 => "ssr_chi2test",
            Statistic::SsrF => "ssr_ftest",
            Statistic::Lr => "lrtest",
        }
    }

    /// Inverse of [`Statistic::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        [Statistic::SsrChi2, Statistic::SsrF, Statistic::Lr]
            .into_iter()
            .find(|s| s.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub max_lag: usize,
    pub statistic: Statistic,
    /// Decimal digits kept in every reported p-value.
    pub precision: u32,
    pub id_columns: usize,
    pub delimiter: char,
    /// Worker threads for the pair scan. `None` uses rayon's global pool.
    pub workers: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data.csv"),
            output: PathBuf::from("granger.json"),
            max_lag: DEFAULT_MAX_LAG,
            statistic: Statistic::default(),
            precision: DEFAULT_PRECISION,
            id_columns: DEFAULT_ID_COLUMNS,
            delimiter: ',',
            workers: None,
        }
    }
}

impl ScanConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), output: output.into(), ..Default::default() }
    }

    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// Loads a (possibly partial) configuration from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ScanError> {
        let text = fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.max_lag == 0 {
            return Err(ScanError::InvalidConfig("max_lag must be at least 1".into()));
        }
        if self.workers == Some(0) {
            return Err(ScanError::InvalidConfig("workers must be at least 1".into()));
        }
        if self.precision > 15 {
            return Err(ScanError::InvalidConfig(format!(
                "precision {} exceeds the 15 significant digits of an f64",
                self.precision
            )));
        }
        if !self.delimiter.is_ascii() {
            return Err(ScanError::InvalidConfig(format!(
                "delimiter '{}' is not a single-byte character",
                self.delimiter
            )));
        }
        Ok(())
    }
}
