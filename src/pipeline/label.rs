//! Label column handling and class distribution
//!
//! Label values are normalised to text so that integer, float and string
//! label columns can be grouped the same way: `1` and `1.0` both become `"1"`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::*;
use serde::Serialize;

use super::error::{AnalysisError, AnalysisResult};
use super::loader::Dataset;

/// Normalised value of the label column identifying one group.
///
/// Ordering is numeric when both labels parse as numbers, lexicographic
/// otherwise, with numeric labels first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupLabel(String);

impl GroupLabel {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
    }

    /// Whether a user-supplied value refers to this label, either verbatim
    /// or as the same number (`"1.0"` matches `"1"`).
    pub fn matches(&self, requested: &str) -> bool {
        if self.0 == requested {
            return true;
        }
        match (self.numeric(), GroupLabel::new(requested).numeric()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Ord for GroupLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for GroupLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a label column to normalised labels, keeping nulls as `None`
pub fn column_to_labels(col: &Column) -> AnalysisResult<Vec<Option<GroupLabel>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            // `+ 0.0` folds -0.0 into 0.0 so both land in the same group
            cast.f64()?
                .into_iter()
                .map(|v| v.filter(|n| !n.is_nan()).map(|n| format!("{}", n + 0.0)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values.into_iter().map(|v| v.map(GroupLabel)).collect())
}

/// Share of one label value among labelled rows
#[derive(Debug, Clone, Serialize)]
pub struct ClassShare {
    pub label: GroupLabel,
    pub count: usize,
    /// `count` divided by the number of rows with a non-null label
    pub frequency: f64,
}

/// Normalised frequency of every label value
#[derive(Debug, Clone, Serialize)]
pub struct ClassDistribution {
    /// One entry per label value, ascending by label
    pub classes: Vec<ClassShare>,
    /// Rows whose label is null (not part of any group)
    pub unlabeled: usize,
}

impl ClassDistribution {
    pub fn labeled_rows(&self) -> usize {
        self.classes.iter().map(|c| c.count).sum()
    }

    pub fn get(&self, requested: &str) -> Option<&ClassShare> {
        self.classes.iter().find(|c| c.label.matches(requested))
    }
}

/// Count label values and check that at least two groups exist.
///
/// Must pass before differences are ranked: a dataset with a single label
/// value yields `InsufficientGroups`.
pub fn class_distribution(dataset: &Dataset) -> AnalysisResult<ClassDistribution> {
    let labels = dataset.labels()?;

    let mut counts: BTreeMap<GroupLabel, usize> = BTreeMap::new();
    let mut unlabeled = 0usize;
    for label in labels {
        match label {
            Some(l) => *counts.entry(l).or_insert(0) += 1,
            None => unlabeled += 1,
        }
    }

    if counts.len() < 2 {
        return Err(AnalysisError::InsufficientGroups {
            found: counts.len(),
        });
    }

    let labeled: usize = counts.values().sum();
    let classes = counts
        .into_iter()
        .map(|(label, count)| ClassShare {
            label,
            count,
            frequency: count as f64 / labeled as f64,
        })
        .collect();

    Ok(ClassDistribution { classes, unlabeled })
}
