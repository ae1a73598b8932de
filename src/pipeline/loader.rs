//! Dataset loader and validator for CSV and Parquet files

use std::path::Path;

use polars::prelude::*;

use super::error::{AnalysisError, AnalysisResult};
use super::label::{column_to_labels, GroupLabel};

/// Default number of rows used for CSV schema inference
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10_000;

/// Options controlling how a source is read and validated
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Number of rows to use for CSV schema inference (0 = full scan)
    pub infer_schema_length: usize,
    /// Fail on non-numeric feature columns instead of excluding them
    pub strict_numeric: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            strict_numeric: false,
        }
    }
}

/// A validated, read-only table with a known label column.
///
/// Feature columns are every non-label column that is numeric (or holds
/// nothing but nulls). Other columns are either listed in
/// `excluded_columns` or rejected, depending on [`LoadOptions::strict_numeric`].
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    label_column: String,
    feature_columns: Vec<String>,
    excluded_columns: Vec<String>,
}

impl Dataset {
    /// Validate an in-memory frame against the label column.
    pub fn from_frame(frame: DataFrame, label_column: &str, options: &LoadOptions) -> AnalysisResult<Self> {
        let column_names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        if !column_names.iter().any(|c| c == label_column) {
            return Err(AnalysisError::SchemaError(format!(
                "Label column '{}' not found in dataset. Available columns: {:?}",
                label_column, column_names
            )));
        }

        let mut feature_columns = Vec::new();
        let mut excluded_columns = Vec::new();

        for col in frame.get_columns() {
            let name = col.name().as_str();
            if name == label_column {
                continue;
            }

            if is_numeric_feature(col) {
                feature_columns.push(name.to_string());
            } else if options.strict_numeric {
                return Err(AnalysisError::SchemaError(format!(
                    "Feature column '{}' is not numeric (dtype: {})",
                    name,
                    col.dtype()
                )));
            } else {
                excluded_columns.push(name.to_string());
            }
        }

        Ok(Self {
            frame,
            label_column: label_column.to_string(),
            feature_columns,
            excluded_columns,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Numeric columns used for aggregation, in dataset order
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Non-numeric columns left out of aggregation
    pub fn excluded_columns(&self) -> &[String] {
        &self.excluded_columns
    }

    /// (rows, columns) of the underlying table, excluded columns included
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Label of every row; `None` for rows whose label is null.
    pub fn labels(&self) -> AnalysisResult<Vec<Option<GroupLabel>>> {
        let col = self.frame.column(&self.label_column)?;
        column_to_labels(col)
    }

    /// Values of a feature column cast to Float64. NaN is reported as missing.
    pub fn feature_values(&self, name: &str) -> AnalysisResult<Vec<Option<f64>>> {
        let col = self.frame.column(name)?.cast(&DataType::Float64)?;
        let values = col
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }
}

/// A column counts as numeric if its dtype is numeric or it carries no values
/// at all (CSV readers infer all-empty columns as strings).
fn is_numeric_feature(col: &Column) -> bool {
    col.dtype().is_primitive_numeric()
        || matches!(col.dtype(), DataType::Null)
        || (col.len() > 0 && col.null_count() == col.len())
}

/// Load a dataset from a file (CSV or Parquet based on extension) and
/// validate it against the label column.
pub fn load_dataset(path: &Path, label_column: &str, options: &LoadOptions) -> AnalysisResult<Dataset> {
    let frame = scan_source(path, options.infer_schema_length)?.collect()?;
    Dataset::from_frame(frame, label_column, options)
}

/// Read only the column names of a source (cheap schema scan)
pub fn get_column_names(path: &Path) -> AnalysisResult<Vec<String>> {
    let schema = scan_source(path, DEFAULT_INFER_SCHEMA_LENGTH)?.collect_schema()?;
    Ok(schema.iter_names().map(|s| s.to_string()).collect())
}

fn scan_source(path: &Path, infer_schema_length: usize) -> AnalysisResult<LazyFrame> {
    if !path.is_file() {
        return Err(AnalysisError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
        _ => return Err(AnalysisError::UnsupportedFormat { extension }),
    };

    Ok(lf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_label_column_is_schema_error() {
        let df = df! {
            "Fp1" => [1.0f64, 2.0],
            "Fp2" => [3.0f64, 4.0],
        }
        .unwrap();

        let result = Dataset::from_frame(df, "status", &LoadOptions::default());
        match result {
            Err(AnalysisError::SchemaError(msg)) => {
                assert!(msg.contains("status"));
                assert!(msg.contains("Fp1"));
            }
            other => panic!("Expected SchemaError, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_columns_excluded_by_default() {
        let df = df! {
            "status" => [0i32, 1],
            "subject" => ["a", "b"],
            "T3" => [1.5f64, 2.5],
        }
        .unwrap();

        let ds = Dataset::from_frame(df, "status", &LoadOptions::default()).unwrap();
        assert_eq!(ds.feature_columns(), &["T3".to_string()]);
        assert_eq!(ds.excluded_columns(), &["subject".to_string()]);
        assert_eq!(ds.shape(), (2, 3));
    }

    #[test]
    fn test_non_numeric_columns_rejected_in_strict_mode() {
        let df = df! {
            "status" => [0i32, 1],
            "subject" => ["a", "b"],
        }
        .unwrap();

        let options = LoadOptions {
            strict_numeric: true,
            ..Default::default()
        };
        let result = Dataset::from_frame(df, "status", &options);
        assert!(matches!(result, Err(AnalysisError::SchemaError(msg)) if msg.contains("subject")));
    }

    #[test]
    fn test_all_null_column_counts_as_feature() {
        let df = df! {
            "status" => [0i32, 1],
            "empty" => [None::<String>, None],
        }
        .unwrap();

        let ds = Dataset::from_frame(df, "status", &LoadOptions::default()).unwrap();
        assert_eq!(ds.feature_columns(), &["empty".to_string()]);
        assert_eq!(ds.feature_values("empty").unwrap(), vec![None, None]);
    }

    #[test]
    fn test_feature_values_treat_nan_as_missing() {
        let df = df! {
            "status" => [0i32, 1, 1],
            "O1" => [1.0f64, f64::NAN, 3.0],
        }
        .unwrap();

        let ds = Dataset::from_frame(df, "status", &LoadOptions::default()).unwrap();
        assert_eq!(ds.feature_values("O1").unwrap(), vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_nonexistent_path_is_source_not_found() {
        let path = Path::new("/nonexistent/EEG_data_set.csv");
        let result = load_dataset(path, "status", &LoadOptions::default());
        assert!(matches!(result, Err(AnalysisError::SourceNotFound { .. })));
    }
}
