use crate::aggregate::AggregateResult;
use crate::model::{PalletRow, PickRecord, SheetRow};
use crate::parsing::aliases::pallet_row;
use crate::tables::builtin::REACH_TRUCK_GROUP;
use crate::tables::ClassificationTable;
use std::collections::HashSet;

/// Resolve raw export rows into pallet rows, dropping rows without a location or LP.
pub fn pallet_rows(rows: &[SheetRow]) -> Vec<PalletRow> {
    let mut skipped = 0usize;
    let pallets: Vec<PalletRow> = rows
        .iter()
        .map(pallet_row)
        .filter(|p| {
            let keep = !p.location.is_empty() && !p.lp.is_empty();
            if !keep {
                skipped += 1;
            }
            keep
        })
        .collect();
    tracing::debug!(rows = rows.len(), skipped, "resolved pallet rows");
    pallets
}

/// Count distinct LPs per location group.
///
/// An LP seen several times in one group counts once; the same LP in two
/// groups counts in both.
pub fn count_unique_pallets(rows: &[PalletRow], table: &ClassificationTable) -> AggregateResult {
    let mut seen: Vec<HashSet<&str>> = table.group_names().map(|_| HashSet::new()).collect();

    for row in rows {
        let position = table
            .lookup(&row.location)
            .and_then(|group| table.group_position(group));
        if let Some(idx) = position {
            seen[idx].insert(row.lp.as_str());
        }
    }

    AggregateResult::from_ordered_totals(
        table
            .group_names()
            .zip(seen)
            .map(|(group, lps)| (group.to_string(), lps.len() as f64)),
    )
}

/// Reach-truck rows eligible for the item-volume join: a location in the
/// reach-truck group, a non-zero item number and a positive quantity.
pub fn reach_picks(rows: &[PalletRow], table: &ClassificationTable) -> Vec<PickRecord> {
    rows.iter()
        .filter(|row| table.lookup(&row.location) == Some(REACH_TRUCK_GROUP))
        .filter(|row| row.quantity > 0.0)
        .filter_map(|row| {
            let item_number = row.item_number?;
            Some(PickRecord {
                lp: row.lp.clone(),
                item_number,
                quantity: row.quantity,
                location: row.location.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use crate::tables::builtin;

    fn export_row(loc: &str, lp: &str, item: CellValue, qty: f64) -> SheetRow {
        SheetRow::from_pairs(vec![
            ("Location ID", CellValue::Text(loc.into())),
            ("LP", CellValue::Text(lp.into())),
            ("Item Number", item),
            ("Quantity", CellValue::Number(qty)),
        ])
    }

    fn sample() -> Vec<PalletRow> {
        pallet_rows(&[
            export_row("REC6701", "LP1", CellValue::Number(1001.0), 10.0),
            export_row("rec6701", "LP1", CellValue::Number(1002.0), 5.0),
            export_row("IBPS1", "LP2", CellValue::Number(1003.0), 0.0),
            export_row("IBINSPECT", "LP3", CellValue::Empty, 1.0),
            export_row("IBCARTNORTH01", "LP4", CellValue::Empty, 1.0),
            export_row("IBCARTNORTH01", "LP5", CellValue::Empty, 1.0),
            export_row("UNKNOWN", "LP6", CellValue::Number(1.0), 1.0),
            export_row("REC7401", "", CellValue::Number(1004.0), 2.0),
        ])
    }

    #[test]
    fn test_rows_without_lp_dropped() {
        let rows = sample();
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| !r.lp.is_empty()));
    }

    #[test]
    fn test_unique_lp_counts() {
        let table = builtin::ppa().unwrap();
        let result = count_unique_pallets(&sample(), &table);
        assert_eq!(result.get("VAS"), Some(1.0));
        assert_eq!(result.get(REACH_TRUCK_GROUP), Some(2.0));
        assert_eq!(result.get("Cart"), Some(2.0));
        assert_eq!(result.grand_total, 5.0);
    }

    #[test]
    fn test_empty_groups_pruned() {
        let table = builtin::ppa().unwrap();
        let rows = pallet_rows(&[export_row("IBPS2", "LP9", CellValue::Empty, 1.0)]);
        let result = count_unique_pallets(&rows, &table);
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.get("VAS"), None);
    }

    #[test]
    fn test_reach_picks_need_item_and_quantity() {
        let table = builtin::ppa().unwrap();
        let picks = reach_picks(&sample(), &table);
        // IBPS1 has zero quantity, the VAS and cart rows are not reach truck
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].item_number, 1001);
        assert_eq!(picks[1].location, "REC6701");
    }

    #[test]
    fn test_zero_item_number_is_not_a_pick() {
        let table = builtin::ppa().unwrap();
        let rows = pallet_rows(&[export_row("REC6701", "LP1", CellValue::Number(0.0), 3.0)]);
        assert!(reach_picks(&rows, &table).is_empty());
    }
}
