pub mod compare;
pub mod ppa;

use crate::model::RawRecord;
use crate::tables::ClassificationTable;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Accumulated total of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub group: String,
    pub total: f64,
}

/// A group total with its share of the grand total, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupShare {
    pub group: String,
    pub total: f64,
    pub percent: f64,
}

/// Group totals in table order, with zero-total groups removed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    pub groups: Vec<GroupTotal>,
    pub grand_total: f64,
}

impl AggregateResult {
    /// Build from per-group totals given in table order. Groups whose total is
    /// exactly zero are dropped; the grand total sums what remains.
    pub fn from_ordered_totals<I>(totals: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let groups: Vec<GroupTotal> = totals
            .into_iter()
            .filter(|(_, total)| *total != 0.0)
            .map(|(group, total)| GroupTotal { group, total })
            .collect();
        let grand_total = groups.iter().fold(0.0, |acc, g| acc + g.total);
        AggregateResult {
            groups,
            grand_total,
        }
    }

    /// True when nothing matched ("no matching data found").
    pub fn is_empty(&self) -> bool {
        self.grand_total == 0.0
    }

    pub fn get(&self, group: &str) -> Option<f64> {
        self.groups
            .iter()
            .find(|g| g.group == group)
            .map(|g| g.total)
    }

    /// Share of the grand total in percent; 0 when the grand total is 0.
    pub fn percent_of_total(&self, group: &str) -> f64 {
        match self.get(group) {
            Some(total) => percent(total, self.grand_total),
            None => 0.0,
        }
    }

    /// Groups sorted by total, largest first. Ties keep table order.
    pub fn sorted_desc(&self) -> Vec<GroupShare> {
        let mut shares: Vec<GroupShare> = self
            .groups
            .iter()
            .map(|g| GroupShare {
                group: g.group.clone(),
                total: g.total,
                percent: percent(g.total, self.grand_total),
            })
            .collect();
        shares.sort_by(|a, b| b.total.total_cmp(&a.total));
        shares
    }

    /// Flat group -> total mapping.
    pub fn totals_map(&self) -> BTreeMap<String, f64> {
        self.groups
            .iter()
            .map(|g| (g.group.clone(), g.total))
            .collect()
    }
}

/// `100 * part / whole`, or 0 when `whole` is 0.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        100.0 * part / whole
    }
}

/// Fold records into group totals using a classification table.
///
/// Records whose label the table does not know are skipped; there is no
/// catch-all bucket.
pub fn aggregate<I, R>(records: I, table: &ClassificationTable) -> AggregateResult
where
    I: IntoIterator<Item = R>,
    R: Borrow<RawRecord>,
{
    let mut totals: Vec<(String, f64)> = table.group_names().map(|g| (g.to_string(), 0.0)).collect();
    let mut matched = 0usize;
    let mut unmatched = 0usize;

    for record in records {
        let record = record.borrow();
        let position = table
            .lookup(&record.label)
            .and_then(|group| table.group_position(group));
        match position {
            Some(idx) => {
                totals[idx].1 += record.value;
                matched += 1;
            }
            None => unmatched += 1,
        }
    }

    let result = AggregateResult::from_ordered_totals(totals);
    tracing::debug!(
        table = table.name(),
        matched,
        unmatched,
        groups = result.groups.len(),
        grand_total = result.grand_total,
        "aggregated records"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_records;
    use crate::tables::builtin;

    fn rec(label: &str, value: f64) -> RawRecord {
        RawRecord {
            label: label.into(),
            value,
        }
    }

    #[test]
    fn test_unknown_labels_skipped() {
        let table = builtin::hours().unwrap();
        let result = aggregate(
            vec![rec("Reach-Truck Putaway", 10.5), rec("VAS", 5.0), rec("Unknown Category", 3.0)],
            &table,
        );
        assert_eq!(result.get("Putaway"), Some(10.5));
        assert_eq!(result.get("VAS"), Some(5.0));
        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.grand_total, 15.5);
    }

    #[test]
    fn test_labels_of_one_group_are_summed() {
        let table = builtin::hours().unwrap();
        let result = aggregate(
            vec![rec("Reach-Truck Putaway", 2.0), rec("Non-PIT Manual Putaway", 3.0)],
            &table,
        );
        assert_eq!(result.get("Putaway"), Some(5.0));
    }

    #[test]
    fn test_zero_groups_removed() {
        let table = builtin::hours().unwrap();
        let result = aggregate(
            vec![rec("VAS", 4.0), rec("VAS Execute", -4.0), rec("Unloader", 0.0), rec("Receiving", 1.0)],
            &table,
        );
        assert_eq!(result.get("VAS"), None);
        assert_eq!(result.get("Unloader"), None);
        assert_eq!(result.groups.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let table = builtin::hours().unwrap();
        let result = aggregate(parse_records(""), &table);
        assert!(result.is_empty());
        assert!(result.groups.is_empty());
        assert_eq!(result.grand_total, 0.0);
        assert!(result.grand_total.is_sign_positive());
        assert_eq!(result.percent_of_total("VAS"), 0.0);
    }

    #[test]
    fn test_sorted_desc_ties_keep_table_order() {
        let table = builtin::hours().unwrap();
        let result = aggregate(
            vec![rec("On-Clock Unallocated", 2.0), rec("Receiving", 2.0), rec("Heat Shrink", 6.0)],
            &table,
        );
        let order: Vec<String> = result.sorted_desc().into_iter().map(|s| s.group).collect();
        // Receiving precedes Unallocated in the table
        assert_eq!(order, vec!["Heat Shrink", "Receiving", "Unallocated"]);
    }

    #[test]
    fn test_percentages() {
        let table = builtin::hours().unwrap();
        let result = aggregate(vec![rec("VAS", 1.0), rec("Receiving", 3.0)], &table);
        assert_eq!(result.percent_of_total("Receiving"), 75.0);
        let shares = result.sorted_desc();
        assert_eq!(shares[0].percent, 75.0);
        assert_eq!(shares[1].percent, 25.0);
    }

    #[test]
    fn test_percent_helper_guards_zero() {
        assert_eq!(percent(5.0, 0.0), 0.0);
        assert_eq!(percent(1.0, 4.0), 25.0);
    }
}
