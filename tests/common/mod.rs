//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small EEG-like DataFrame with known group statistics
///
/// This DataFrame includes:
/// - `status`: Binary label column (0/1), three rows each
/// - `T3`: Clearly higher for status 1 (difference = 10.0)
/// - `P4`: Lower for status 1 (difference = -2.0)
/// - `Fp1`: Same mean in both groups (difference = 0.0)
/// - `O2`: Entirely missing for status 0 rows
pub fn create_eeg_dataframe() -> DataFrame {
    df! {
        "status" => [0i32, 0, 0, 1, 1, 1],
        "T3" => [1.0f64, 2.0, 3.0, 11.0, 12.0, 13.0],
        "P4" => [5.0f64, 6.0, 7.0, 3.0, 4.0, 5.0],
        "Fp1" => [1.0f64, 1.0, 1.0, 1.0, 1.0, 1.0],
        "O2" => [None, None, None, Some(2.0f64), Some(4.0), Some(6.0)],
    }
    .unwrap()
}

/// Create a larger random DataFrame for stress tests
pub fn create_large_eeg_dataframe(rows: usize, channels: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut columns: Vec<Column> = Vec::with_capacity(channels + 1);

    let status: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    columns.push(Column::new("status".into(), status));

    for i in 0..channels {
        let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 100.0).collect();
        columns.push(Column::new(format!("ch_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("EEG_data_set.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("EEG_data_set.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Write raw CSV text into a temporary file
pub fn write_temp_csv(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("data.csv");
    std::fs::write(&csv_path, content).unwrap();
    (temp_dir, csv_path)
}

/// Assert two floats are equal within a tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected {}, got {}",
        expected,
        actual
    );
}
