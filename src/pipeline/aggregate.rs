//! Grouped mean and standard deviation per feature
//!
//! Rows are partitioned by label value and every feature column is
//! summarised per group. Features are processed in parallel with Rayon and
//! collected back in dataset order.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use serde::{Serialize, Serializer};

use super::error::AnalysisResult;
use super::label::GroupLabel;
use super::loader::Dataset;

/// A computed statistic, or a marker that the group had too few values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Measure {
    Value(f64),
    /// Serialised as `null`
    InsufficientData,
}

impl Measure {
    pub fn value(&self) -> Option<f64> {
        match self {
            Measure::Value(v) => Some(*v),
            Measure::InsufficientData => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Measure::InsufficientData)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Value(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Measure::InsufficientData => f.write_str("n/a"),
        }
    }
}

/// Summary of one feature within one group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureStats {
    /// Non-missing values the statistics were computed from
    pub count: usize,
    /// `InsufficientData` when `count == 0`
    pub mean: Measure,
    /// Sample standard deviation; `InsufficientData` when `count < 2`
    pub std_dev: Measure,
}

impl FeatureStats {
    /// Summarise a set of values.
    ///
    /// Values are sorted before summing so the result does not depend on
    /// row order.
    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.total_cmp(b));
        let count = values.len();

        if count == 0 {
            return Self {
                count,
                mean: Measure::InsufficientData,
                std_dev: Measure::InsufficientData,
            };
        }

        let mean = values.iter().sum::<f64>() / count as f64;

        let std_dev = if count < 2 {
            Measure::InsufficientData
        } else {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            Measure::Value((sum_sq / (count - 1) as f64).sqrt())
        };

        Self {
            count,
            mean: Measure::Value(mean),
            std_dev,
        }
    }
}

/// Statistics of every feature within one label group
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    /// Rows carrying this label
    pub size: usize,
    /// Feature statistics in dataset column order
    #[serde(serialize_with = "serialize_ordered_map")]
    pub features: Vec<(String, FeatureStats)>,
}

impl GroupSummary {
    pub fn feature(&self, name: &str) -> Option<&FeatureStats> {
        self.features
            .iter()
            .find(|(feature, _)| feature == name)
            .map(|(_, stats)| stats)
    }
}

/// Write `(name, stats)` pairs as a JSON object, keeping their order
fn serialize_ordered_map<S: Serializer>(
    entries: &[(String, FeatureStats)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(entries.iter().map(|(name, stats)| (name, stats)))
}

/// Per-group, per-feature mean and standard deviation
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    /// Feature columns in dataset order
    pub feature_order: Vec<String>,
    /// Groups in ascending label order
    pub groups: BTreeMap<GroupLabel, GroupSummary>,
}

impl GroupStats {
    pub fn labels(&self) -> impl Iterator<Item = &GroupLabel> {
        self.groups.keys()
    }

    /// Look up a group by a user-supplied label value
    pub fn find_group(&self, requested: &str) -> Option<(&GroupLabel, &GroupSummary)> {
        self.groups
            .iter()
            .find(|(label, _)| label.as_str() == requested)
            .or_else(|| self.groups.iter().find(|(label, _)| label.matches(requested)))
    }

    pub fn get(&self, label: &str, feature: &str) -> Option<&FeatureStats> {
        self.find_group(label)
            .and_then(|(_, summary)| summary.feature(feature))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Partition rows by label and compute mean and sample standard deviation
/// of every feature in every group. Missing values are skipped.
pub fn aggregate_groups(dataset: &Dataset) -> AnalysisResult<GroupStats> {
    let labels = dataset.labels()?;

    // Row indices per group
    let mut partitions: BTreeMap<GroupLabel, Vec<usize>> = BTreeMap::new();
    for (row, label) in labels.into_iter().enumerate() {
        if let Some(label) = label {
            partitions.entry(label).or_default().push(row);
        }
    }

    let features = dataset.feature_columns();

    // One Vec<FeatureStats> per feature, aligned with the partition order
    let per_feature: Vec<Vec<FeatureStats>> = features
        .par_iter()
        .map(|name| {
            let values = dataset.feature_values(name)?;
            let stats: Vec<FeatureStats> = partitions
                .values()
                .map(|rows| {
                    let group_values: Vec<f64> = rows.iter().filter_map(|&r| values[r]).collect();
                    FeatureStats::from_values(group_values)
                })
                .collect();
            Ok(stats)
        })
        .collect::<AnalysisResult<_>>()?;

    let groups = partitions
        .into_iter()
        .enumerate()
        .map(|(group_idx, (label, rows))| {
            let feature_stats = features
                .iter()
                .zip(per_feature.iter())
                .map(|(name, stats)| (name.clone(), stats[group_idx]))
                .collect();
            (
                label,
                GroupSummary {
                    size: rows.len(),
                    features: feature_stats,
                },
            )
        })
        .collect();

    Ok(GroupStats {
        feature_order: features.to_vec(),
        groups,
    })
}
