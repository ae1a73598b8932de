//! End-to-end group comparison: load, audit, aggregate, rank

use std::path::PathBuf;

use serde::Serialize;

use super::aggregate::{aggregate_groups, GroupStats};
use super::error::AnalysisResult;
use super::label::{class_distribution, ClassDistribution};
use super::loader::{load_dataset, Dataset, LoadOptions};
use super::missing::{audit_missing_values, MissingValueReport};
use super::ranking::{rank_differences, DifferenceRanking, DEFAULT_BASELINE, DEFAULT_POSITIVE};

/// Everything needed for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub label_column: String,
    /// Label value of the reference group
    pub baseline: String,
    /// Label value compared against the baseline
    pub positive: String,
    pub load: LoadOptions,
}

impl AnalysisConfig {
    pub fn new(input: impl Into<PathBuf>, label_column: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            label_column: label_column.into(),
            baseline: DEFAULT_BASELINE.to_string(),
            positive: DEFAULT_POSITIVE.to_string(),
            load: LoadOptions::default(),
        }
    }
}

/// The derived entities of one run, in report order
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub rows: usize,
    pub columns: usize,
    pub label_column: String,
    pub excluded_columns: Vec<String>,
    pub missing: MissingValueReport,
    pub class_distribution: ClassDistribution,
    pub group_stats: GroupStats,
    pub ranking: DifferenceRanking,
}

/// Load the configured source and run every stage on it
pub fn run_analysis(config: &AnalysisConfig) -> AnalysisResult<AnalysisReport> {
    let dataset = load_dataset(&config.input, &config.label_column, &config.load)?;
    analyze_dataset(&dataset, &config.baseline, &config.positive)
}

/// Run audit, aggregation and ranking on an already validated dataset.
///
/// The class distribution check runs before aggregation, so a dataset with
/// a single label value fails with `InsufficientGroups`.
pub fn analyze_dataset(dataset: &Dataset, baseline: &str, positive: &str) -> AnalysisResult<AnalysisReport> {
    let (rows, columns) = dataset.shape();
    let missing = audit_missing_values(dataset);
    let class_distribution = class_distribution(dataset)?;
    let group_stats = aggregate_groups(dataset)?;
    let ranking = rank_differences(&group_stats, baseline, positive)?;

    Ok(AnalysisReport {
        rows,
        columns,
        label_column: dataset.label_column().to_string(),
        excluded_columns: dataset.excluded_columns().to_vec(),
        missing,
        class_distribution,
        group_stats,
        ranking,
    })
}
