//! Integration tests for the full comparison pipeline

use eegdiff::pipeline::*;
use eegdiff::report::{build_export, ExportParams};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_full_pipeline_from_csv() {
    let mut df = create_eeg_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let report = run_analysis(&AnalysisConfig::new(&csv_path, "status")).unwrap();

    assert_eq!((report.rows, report.columns), (6, 5));
    assert_eq!(report.missing.total(), 3);
    assert_eq!(report.missing.get("O2"), Some(3));
    assert_eq!(report.class_distribution.classes.len(), 2);
    assert_eq!(report.group_stats.group_count(), 2);
    assert_eq!(report.ranking.len(), 4);
    assert_eq!(report.ranking.entries[0].feature, "T3");
    assert_eq!(report.ranking.entries[0].difference, Measure::Value(10.0));
}

#[test]
fn test_four_row_scenario_end_to_end() {
    let (_temp_dir, csv_path) = write_temp_csv("status,x\n0,1\n0,2\n1,10\n1,12\n");

    let report = run_analysis(&AnalysisConfig::new(&csv_path, "status")).unwrap();

    assert_eq!(report.group_stats.get("0", "x").unwrap().mean, Measure::Value(1.5));
    assert_eq!(report.group_stats.get("1", "x").unwrap().mean, Measure::Value(11.0));
    assert_eq!(report.ranking.len(), 1);
    assert_eq!(report.ranking.entries[0].feature, "x");
    assert_eq!(report.ranking.entries[0].difference, Measure::Value(9.5));
    assert!(!report.missing.has_missing());
}

#[test]
fn test_pipeline_from_parquet() {
    let mut df = create_eeg_dataframe();
    let (_temp_dir, parquet_path) = create_temp_parquet(&mut df);

    let report = run_analysis(&AnalysisConfig::new(&parquet_path, "status")).unwrap();

    assert_eq!(report.ranking.entries[0].feature, "T3");
}

#[test]
fn test_nonexistent_source_produces_no_report() {
    let result = run_analysis(&AnalysisConfig::new("/nonexistent/EEG_data_set.csv", "status"));

    assert!(matches!(result, Err(AnalysisError::SourceNotFound { .. })));
}

#[test]
fn test_single_label_dataset_is_rejected() {
    let (_temp_dir, csv_path) = write_temp_csv("status,x\n1,1\n1,2\n1,3\n");

    let result = run_analysis(&AnalysisConfig::new(&csv_path, "status"));

    assert!(matches!(result, Err(AnalysisError::InsufficientGroups { found: 1 })));
}

#[test]
fn test_custom_group_selection() {
    let (_temp_dir, csv_path) = write_temp_csv("status,x\n0,1\n2,5\n2,7\n0,3\n");
    let mut config = AnalysisConfig::new(&csv_path, "status");

    let err = run_analysis(&config).unwrap_err();
    assert!(matches!(err, AnalysisError::GroupNotFound { .. }));

    config.positive = "2".to_string();
    let report = run_analysis(&config).unwrap();
    assert_eq!(report.ranking.entries[0].difference, Measure::Value(4.0));
}

#[test]
fn test_row_order_independence() {
    let df = create_large_eeg_dataframe(300, 6);
    let shuffled = df.reverse();

    let a = analyze_dataset(
        &Dataset::from_frame(df, "status", &LoadOptions::default()).unwrap(),
        "0",
        "1",
    )
    .unwrap();
    let b = analyze_dataset(
        &Dataset::from_frame(shuffled, "status", &LoadOptions::default()).unwrap(),
        "0",
        "1",
    )
    .unwrap();

    assert_eq!(a.ranking.entries, b.ranking.entries);
}

#[test]
fn test_report_export_matches_entities() {
    let ds = Dataset::from_frame(create_eeg_dataframe(), "status", &LoadOptions::default()).unwrap();
    let report = analyze_dataset(&ds, "0", "1").unwrap();

    let export = build_export(&report, &ExportParams { input_file: "EEG_data_set.csv" });
    let value = serde_json::to_value(&export).unwrap();

    assert_eq!(value["summary"]["features_compared"], 4);
    assert_eq!(value["summary"]["groups"], 2);
    assert_eq!(value["report"]["missing"]["columns"][4]["nulls"], 3);
    assert!(value["report"]["ranking"]["entries"][3]["difference"].is_null());
}
