use crate::error::DockError;
use crate::model::{CellValue, PickRecord};
use crate::parsing::values::cell_item_key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Item number -> cubic volume per unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemMaster {
    volumes: HashMap<i64, f64>,
}

#[derive(Deserialize)]
struct ItemMasterDoc {
    #[serde(rename = "Sheet1")]
    sheet1: Vec<ItemMasterRow>,
}

#[derive(Deserialize)]
struct ItemMasterRow {
    #[serde(rename = "ITEM_NUMBER", default)]
    item_number: CellValue,
    #[serde(rename = "CUBIC_VOL", default)]
    cubic_vol: CellValue,
}

impl ItemMaster {
    /// Parse an item-master export: `{ "Sheet1": [ { "ITEM_NUMBER", "CUBIC_VOL", .. } ] }`.
    ///
    /// Rows whose item number is not numeric are ignored. A later row for the
    /// same item replaces an earlier one.
    pub fn from_json_str(json: &str) -> Result<Self, DockError> {
        let doc: ItemMasterDoc = serde_json::from_str(json)
            .map_err(|e| DockError::ParseError(format!("item master: {e}")))?;

        let mut ignored = 0usize;
        let mut volumes = HashMap::new();
        for row in doc.sheet1 {
            match cell_item_key(&row.item_number) {
                Some(key) => {
                    volumes.insert(key, row.cubic_vol.as_number().unwrap_or(0.0));
                }
                None => ignored += 1,
            }
        }
        tracing::debug!(items = volumes.len(), ignored, "loaded item master");
        Ok(ItemMaster { volumes })
    }

    pub fn load(path: &Path) -> Result<Self, DockError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Cubic volume of an item, if the master lists it.
    pub fn cubic_volume(&self, item_number: i64) -> Option<f64> {
        self.volumes.get(&item_number).copied()
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

impl FromIterator<(i64, f64)> for ItemMaster {
    fn from_iter<T: IntoIterator<Item = (i64, f64)>>(iter: T) -> Self {
        ItemMaster {
            volumes: iter.into_iter().collect(),
        }
    }
}

/// Small-volume share of the reach-truck picks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeAnalysis {
    /// All eligible reach-truck picks.
    pub total_picks: usize,
    /// Picks whose item has a non-zero cubic volume in the master.
    pub matched: usize,
    /// Matched picks whose total volume is under the threshold.
    pub small_count: usize,
    /// `small_count` as a percent of `total_picks`.
    pub small_percent: f64,
}

/// Join reach-truck picks with the item master by truncated item number.
pub fn volume_join(picks: &[PickRecord], master: &ItemMaster, small_threshold: f64) -> VolumeAnalysis {
    let mut matched = 0usize;
    let mut small_count = 0usize;

    for pick in picks {
        let Some(cubic) = master.cubic_volume(pick.item_number) else {
            continue;
        };
        if cubic == 0.0 || cubic.is_nan() {
            continue;
        }
        matched += 1;
        if cubic * pick.quantity < small_threshold {
            small_count += 1;
        }
    }

    let analysis = VolumeAnalysis {
        total_picks: picks.len(),
        matched,
        small_count,
        small_percent: crate::aggregate::percent(small_count as f64, picks.len() as f64),
    };
    tracing::info!(
        picks = analysis.total_picks,
        matched,
        small = small_count,
        "volume analysis complete"
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(item: i64, qty: f64) -> PickRecord {
        PickRecord {
            lp: format!("LP{item}"),
            item_number: item,
            quantity: qty,
            location: "REC6701".into(),
        }
    }

    #[test]
    fn test_parse_item_master() {
        let json = r#"{"Sheet1": [
            {"ITEM_NUMBER": 1001, "CUBIC_VOL": 400, "DESC": "box"},
            {"ITEM_NUMBER": "1002.9", "CUBIC_VOL": 12.5},
            {"ITEM_NUMBER": "n/a", "CUBIC_VOL": 1},
            {"CUBIC_VOL": 3}
        ]}"#;
        let master = ItemMaster::from_json_str(json).unwrap();
        assert_eq!(master.len(), 2);
        assert_eq!(master.cubic_volume(1001), Some(400.0));
        assert_eq!(master.cubic_volume(1002), Some(12.5));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let json = r#"{"Sheet1": [
            {"ITEM_NUMBER": 7, "CUBIC_VOL": 1},
            {"ITEM_NUMBER": 7.4, "CUBIC_VOL": 2}
        ]}"#;
        let master = ItemMaster::from_json_str(json).unwrap();
        assert_eq!(master.cubic_volume(7), Some(2.0));
    }

    #[test]
    fn test_missing_sheet_is_error() {
        let result = ItemMaster::from_json_str(r#"{"Items": []}"#);
        assert!(matches!(result, Err(DockError::ParseError(_))));
    }

    #[test]
    fn test_small_volume_pick() {
        let master: ItemMaster = [(1001, 400.0)].into_iter().collect();
        let analysis = volume_join(&[pick(1001, 10.0)], &master, 5000.0);
        assert_eq!(analysis.matched, 1);
        assert_eq!(analysis.small_count, 1);
        assert_eq!(analysis.small_percent, 100.0);
    }

    #[test]
    fn test_percent_uses_all_picks() {
        let master: ItemMaster = [(1, 100.0), (2, 1000.0), (3, 0.0)].into_iter().collect();
        let picks = vec![pick(1, 1.0), pick(2, 10.0), pick(3, 1.0), pick(4, 1.0)];
        let analysis = volume_join(&picks, &master, 5000.0);
        assert_eq!(analysis.total_picks, 4);
        // zero cubic volume does not match
        assert_eq!(analysis.matched, 2);
        assert_eq!(analysis.small_count, 1);
        assert_eq!(analysis.small_percent, 25.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let master: ItemMaster = [(1, 500.0)].into_iter().collect();
        let analysis = volume_join(&[pick(1, 10.0)], &master, 5000.0);
        assert_eq!(analysis.small_count, 0);
    }

    #[test]
    fn test_no_picks() {
        let master: ItemMaster = [(1, 500.0)].into_iter().collect();
        let analysis = volume_join(&[], &master, 5000.0);
        assert_eq!(analysis.total_picks, 0);
        assert_eq!(analysis.small_percent, 0.0);
    }
}
