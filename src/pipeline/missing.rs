//! Missing value audit

use polars::prelude::*;
use serde::Serialize;

use super::loader::Dataset;

/// Null count for a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnNulls {
    pub column: String,
    pub nulls: usize,
}

/// Per-column null counts for a dataset
#[derive(Debug, Clone, Serialize)]
pub struct MissingValueReport {
    /// Number of rows in the audited dataset
    pub rows: usize,
    /// One entry per column, in dataset order
    pub columns: Vec<ColumnNulls>,
}

impl MissingValueReport {
    /// Total number of missing cells across all columns
    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.nulls).sum()
    }

    pub fn has_missing(&self) -> bool {
        self.total() > 0
    }

    pub fn get(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.nulls)
    }

    /// Share of rows missing in a column
    pub fn ratio(&self, column: &str) -> Option<f64> {
        if self.rows == 0 {
            return self.get(column).map(|_| 0.0);
        }
        self.get(column).map(|n| n as f64 / self.rows as f64)
    }

    /// Columns with at least one missing value, most missing first
    pub fn columns_with_missing(&self) -> Vec<&ColumnNulls> {
        let mut cols: Vec<&ColumnNulls> = self.columns.iter().filter(|c| c.nulls > 0).collect();
        cols.sort_by(|a, b| b.nulls.cmp(&a.nulls).then_with(|| a.column.cmp(&b.column)));
        cols
    }
}

/// Count missing values per column, label column included.
///
/// A cell is missing when it is null, or NaN in a floating point column.
pub fn audit_missing_values(dataset: &Dataset) -> MissingValueReport {
    let df = dataset.frame();

    let columns = df
        .get_columns()
        .iter()
        .map(|col| ColumnNulls {
            column: col.name().to_string(),
            nulls: count_missing(col),
        })
        .collect();

    MissingValueReport {
        rows: df.height(),
        columns,
    }
}

fn count_missing(col: &Column) -> usize {
    let nan_count = match col.dtype() {
        DataType::Float32 | DataType::Float64 => col
            .cast(&DataType::Float64)
            .ok()
            .and_then(|c| {
                c.f64()
                    .ok()
                    .map(|ca| ca.into_iter().flatten().filter(|v| v.is_nan()).count())
            })
            .unwrap_or(0),
        _ => 0,
    };
    col.null_count() + nan_count
}
