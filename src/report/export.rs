//! JSON export of an analysis run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{AnalysisReport, Measure};
use crate::report::summary::DEFAULT_LARGEST_ABSOLUTE;

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// eegdiff version
    pub eegdiff_version: String,
    pub input_file: String,
    pub label_column: String,
    /// Label of the reference group
    pub baseline: String,
    /// Label compared against the baseline
    pub positive: String,
}

/// Headline numbers of the run
#[derive(Serialize)]
pub struct ExportSummary {
    pub rows: usize,
    pub columns: usize,
    pub features_compared: usize,
    pub groups: usize,
    pub total_missing: usize,
    /// Feature with the largest positive difference, if any is defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_feature: Option<String>,
    /// Features with the largest absolute difference, largest first
    pub largest_absolute: Vec<String>,
}

/// Complete export: metadata, summary and the report entities
#[derive(Serialize)]
pub struct AnalysisExport<'a> {
    pub metadata: ExportMetadata,
    pub summary: ExportSummary,
    pub report: &'a AnalysisReport,
}

/// Parameters for export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
}

/// Build the export structure for a report
pub fn build_export<'a>(report: &'a AnalysisReport, params: &ExportParams) -> AnalysisExport<'a> {
    let top_feature = report
        .ranking
        .entries
        .first()
        .filter(|e| matches!(e.difference, Measure::Value(_)))
        .map(|e| e.feature.clone());

    let largest_absolute = report
        .ranking
        .largest_absolute(DEFAULT_LARGEST_ABSOLUTE)
        .into_iter()
        .map(|e| e.feature.clone())
        .collect();

    AnalysisExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            eegdiff_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            label_column: report.label_column.clone(),
            baseline: report.ranking.baseline.to_string(),
            positive: report.ranking.positive.to_string(),
        },
        summary: ExportSummary {
            rows: report.rows,
            columns: report.columns,
            features_compared: report.group_stats.feature_order.len(),
            groups: report.group_stats.group_count(),
            total_missing: report.missing.total(),
            top_feature,
            largest_absolute,
        },
        report,
    }
}

/// Export the analysis report to a pretty-printed JSON file
pub fn export_report(report: &AnalysisReport, output_path: &Path, params: &ExportParams) -> Result<()> {
    let export = build_export(report, params);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize analysis report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis report to {}", output_path.display()))?;

    Ok(())
}
