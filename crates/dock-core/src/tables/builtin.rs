use crate::error::DockError;
use crate::tables::schema::TableDef;
use crate::tables::ClassificationTable;

const HOURS_JSON: &str = include_str!("../../../../presets/hours.json");
const PPA_JSON: &str = include_str!("../../../../presets/ppa.json");
const TRANSACTIONS_JSON: &str = include_str!("../../../../presets/transactions.json");

/// Available predefined tables.
pub const PRESETS: &[&str] = &["hours", "ppa", "transactions"];

/// Group of the `ppa` table whose pallets feed the item-volume join.
pub const REACH_TRUCK_GROUP: &str = "Reach Truck";

/// Group of the `transactions` table holding receipts (type 151).
pub const RECEIPT_GROUP: &str = "Receipt";

/// Group of the `transactions` table holding put-aways (type 152).
pub const PUT_GROUP: &str = "Put";

/// Group of the `transactions` table holding damaged receipts (type 183).
pub const DAMAGED_GROUP: &str = "Damaged";

/// Load a predefined table by name.
pub fn load_preset(name: &str) -> Result<ClassificationTable, DockError> {
    let json = match name {
        "hours" => HOURS_JSON,
        "ppa" => PPA_JSON,
        "transactions" => TRANSACTIONS_JSON,
        _ => {
            return Err(DockError::UnknownPreset {
                name: name.to_string(),
                available: PRESETS.join(", "),
            })
        }
    };
    let def: TableDef = serde_json::from_str(json)?;
    Ok(ClassificationTable::new(def))
}

pub fn hours() -> Result<ClassificationTable, DockError> {
    load_preset("hours")
}

pub fn ppa() -> Result<ClassificationTable, DockError> {
    load_preset("ppa")
}

pub fn transactions() -> Result<ClassificationTable, DockError> {
    load_preset("transactions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::validate_table;

    #[test]
    fn test_presets_are_valid() {
        for name in PRESETS {
            let table = load_preset(name).unwrap();
            validate_table(table.def()).unwrap();
        }
    }

    #[test]
    fn test_hours_groups() {
        let table = hours().unwrap();
        assert_eq!(table.lookup("Reach-Truck Putaway"), Some("Putaway"));
        assert_eq!(table.lookup("Non- PIT Manual Putaway"), Some("Putaway"));
        assert_eq!(table.lookup("VAS Execute"), Some("VAS"));
        assert_eq!(table.lookup("On-Clock Unallocated"), Some("Unallocated"));
        assert_eq!(table.group_names().count(), 11);
    }

    #[test]
    fn test_ppa_groups() {
        let table = ppa().unwrap();
        assert_eq!(table.lookup("REC6701"), Some(REACH_TRUCK_GROUP));
        assert_eq!(table.lookup("IB-QA-INSPECT"), Some("VAS"));
        assert_eq!(table.lookup("IBCARTNORTH09"), Some("Cart"));
    }

    #[test]
    fn test_transaction_groups() {
        let table = transactions().unwrap();
        assert_eq!(table.lookup("151"), Some(RECEIPT_GROUP));
        assert_eq!(table.lookup("152"), Some(PUT_GROUP));
        assert_eq!(table.lookup("183"), Some(DAMAGED_GROUP));
        assert_eq!(table.lookup("999"), None);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            load_preset("xyz"),
            Err(DockError::UnknownPreset { .. })
        ));
    }
}
