//! Ranking of per-feature mean differences between two label groups

use std::cmp::Ordering;

use serde::Serialize;

use super::aggregate::{GroupStats, GroupSummary, Measure};
use super::error::{AnalysisError, AnalysisResult};
use super::label::GroupLabel;

/// Default label of the reference group
pub const DEFAULT_BASELINE: &str = "0";

/// Default label of the group compared against the baseline
pub const DEFAULT_POSITIVE: &str = "1";

/// Difference in means for a single feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFeature {
    pub feature: String,
    /// `mean(positive) - mean(baseline)`, in the feature's own units
    pub difference: Measure,
    pub baseline_mean: Measure,
    pub positive_mean: Measure,
}

/// Features ordered by mean difference, largest first
#[derive(Debug, Clone, Serialize)]
pub struct DifferenceRanking {
    pub baseline: GroupLabel,
    pub positive: GroupLabel,
    pub entries: Vec<RankedFeature>,
}

impl DifferenceRanking {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First `n` entries of the ranking
    pub fn top(&self, n: usize) -> &[RankedFeature] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// The `n` entries with the largest absolute difference, ties by name.
    /// Entries without a defined difference are never included.
    pub fn largest_absolute(&self, n: usize) -> Vec<&RankedFeature> {
        let mut defined: Vec<&RankedFeature> = self
            .entries
            .iter()
            .filter(|e| !e.difference.is_insufficient())
            .collect();
        defined.sort_by(|a, b| {
            let a_abs = a.difference.value().unwrap_or(0.0).abs();
            let b_abs = b.difference.value().unwrap_or(0.0).abs();
            b_abs
                .total_cmp(&a_abs)
                .then_with(|| a.feature.cmp(&b.feature))
        });
        defined.truncate(n);
        defined
    }
}

/// Rank every feature by `mean(positive) - mean(baseline)`.
///
/// Sorted descending with ties broken by feature name. Features whose mean
/// is undefined in either group sort last, by name.
pub fn rank_differences(stats: &GroupStats, baseline: &str, positive: &str) -> AnalysisResult<DifferenceRanking> {
    if stats.group_count() < 2 {
        return Err(AnalysisError::InsufficientGroups {
            found: stats.group_count(),
        });
    }

    let (baseline_label, baseline_group) = lookup_group(stats, baseline)?;
    let (positive_label, positive_group) = lookup_group(stats, positive)?;

    let mut entries: Vec<RankedFeature> = stats
        .feature_order
        .iter()
        .map(|feature| {
            let baseline_mean = baseline_group
                .feature(feature)
                .map_or(Measure::InsufficientData, |s| s.mean);
            let positive_mean = positive_group
                .feature(feature)
                .map_or(Measure::InsufficientData, |s| s.mean);

            let difference = match (baseline_mean, positive_mean) {
                // `+ 0.0` turns -0.0 into 0.0 so equal differences tie on name
                (Measure::Value(a), Measure::Value(b)) => Measure::Value(b - a + 0.0),
                _ => Measure::InsufficientData,
            };

            RankedFeature {
                feature: feature.clone(),
                difference,
                baseline_mean,
                positive_mean,
            }
        })
        .collect();

    entries.sort_by(compare_entries);

    Ok(DifferenceRanking {
        baseline: baseline_label.clone(),
        positive: positive_label.clone(),
        entries,
    })
}

fn lookup_group<'a>(
    stats: &'a GroupStats,
    requested: &str,
) -> AnalysisResult<(&'a GroupLabel, &'a GroupSummary)> {
    stats
        .find_group(requested)
        .ok_or_else(|| AnalysisError::GroupNotFound {
            label: requested.to_string(),
            available: stats.labels().map(|l| l.to_string()).collect(),
        })
}

fn compare_entries(a: &RankedFeature, b: &RankedFeature) -> Ordering {
    match (a.difference, b.difference) {
        (Measure::Value(x), Measure::Value(y)) => y.total_cmp(&x),
        (Measure::Value(_), Measure::InsufficientData) => Ordering::Less,
        (Measure::InsufficientData, Measure::Value(_)) => Ordering::Greater,
        (Measure::InsufficientData, Measure::InsufficientData) => Ordering::Equal,
    }
    .then_with(|| a.feature.cmp(&b.feature))
}
