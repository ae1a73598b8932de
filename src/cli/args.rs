//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{AnalysisConfig, LoadOptions, DEFAULT_BASELINE, DEFAULT_POSITIVE};

/// eegdiff - Compare feature means and dispersion between label groups
#[derive(Parser, Debug)]
#[command(name = "eegdiff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = "EEG_data_set.csv")]
    pub input: PathBuf,

    /// Label column whose values define the groups being compared
    #[arg(short, long, default_value = "status")]
    pub label: String,

    /// Label value of the reference group
    #[arg(long, default_value = DEFAULT_BASELINE)]
    pub baseline: String,

    /// Label value compared against the baseline (difference = positive - baseline)
    #[arg(long, default_value = DEFAULT_POSITIVE)]
    pub positive: String,

    /// Fail when a feature column is not numeric instead of excluding it
    #[arg(long, default_value = "false")]
    pub strict_numeric: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Show only the first N features of the difference ranking
    #[arg(long, value_parser = validate_top)]
    pub top: Option<usize>,

    /// Write the full report as JSON to this path
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Skip the interpretation hints at the end of the report
    #[arg(long, default_value = "false")]
    pub no_hints: bool,
}

impl Cli {
    /// Build the library configuration from the parsed arguments
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            input: self.input.clone(),
            label_column: self.label.clone(),
            baseline: self.baseline.clone(),
            positive: self.positive.clone(),
            load: LoadOptions {
                infer_schema_length: self.infer_schema_length,
                strict_numeric: self.strict_numeric,
            },
        }
    }
}

/// Validator for the --top parameter
fn validate_top(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        Err("top must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
