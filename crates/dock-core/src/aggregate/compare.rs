use crate::aggregate::AggregateResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Increase,
    Decrease,
    Unchanged,
}

/// One group's share in a baseline and a current dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub group: String,
    pub percent_a: f64,
    pub percent_b: f64,
    /// `percent_b - percent_a`, in percentage points.
    pub diff: f64,
    pub change: Change,
}

/// Compare the percent-of-total of every group across two aggregates.
///
/// Groups present in either side appear once, alphabetically. A difference of
/// at most `noise_floor` points is reported as unchanged.
pub fn compare(
    baseline: &AggregateResult,
    current: &AggregateResult,
    noise_floor: f64,
) -> Vec<ComparisonRow> {
    let groups: BTreeSet<&str> = baseline
        .groups
        .iter()
        .chain(current.groups.iter())
        .map(|g| g.group.as_str())
        .collect();

    groups
        .into_iter()
        .map(|group| {
            let percent_a = baseline.percent_of_total(group);
            let percent_b = current.percent_of_total(group);
            let diff = percent_b - percent_a;
            let change = if diff.abs() <= noise_floor {
                Change::Unchanged
            } else if diff > 0.0 {
                Change::Increase
            } else {
                Change::Decrease
            };
            ComparisonRow {
                group: group.to_string(),
                percent_a,
                percent_b,
                diff,
                change,
            }
        })
        .collect()
}
