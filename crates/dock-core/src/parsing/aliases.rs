use crate::model::{CellValue, PalletRow, SheetRow};
use crate::parsing::values::cell_item_key;

/// Ordered header aliases for one logical spreadsheet field.
///
/// The first alias whose cell holds a non-blank value wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases(pub &'static [&'static str]);

impl FieldAliases {
    pub fn resolve<'a>(&self, row: &'a SheetRow) -> Option<&'a CellValue> {
        self.0
            .iter()
            .filter_map(|alias| row.get(alias))
            .find(|cell| !cell.is_blank())
    }

    /// Resolved cell as trimmed text, or "" when no alias matches.
    pub fn text(&self, row: &SheetRow) -> String {
        self.resolve(row)
            .map(|cell| cell.as_text().trim().to_string())
            .unwrap_or_default()
    }

    /// Resolved cell as a number, or 0 when no alias matches or the cell is not numeric.
    pub fn number(&self, row: &SheetRow) -> f64 {
        self.resolve(row)
            .and_then(CellValue::as_number)
            .unwrap_or(0.0)
    }
}

pub const LOCATION: FieldAliases = FieldAliases(&["Location ID", "A"]);
pub const LICENSE_PLATE: FieldAliases = FieldAliases(&["LP"]);
pub const ITEM_NUMBER: FieldAliases = FieldAliases(&["Item Number", "C"]);
pub const QUANTITY: FieldAliases = FieldAliases(&["Quantity", "D"]);

pub const TRANSACTION_TYPE: FieldAliases = FieldAliases(&["Transaction Type"]);
pub const DESCRIPTION: FieldAliases = FieldAliases(&["Description"]);
pub const TRANSACTION_QUANTITY: FieldAliases = FieldAliases(&["Quantity"]);

/// Resolve a PPA export row into its location, LP, item and quantity fields.
pub fn pallet_row(row: &SheetRow) -> PalletRow {
    PalletRow {
        location: LOCATION.text(row).to_uppercase(),
        lp: LICENSE_PLATE.text(row),
        item_number: ITEM_NUMBER.resolve(row).and_then(cell_item_key),
        quantity: QUANTITY.number(row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_alias_wins() {
        let row = SheetRow::from_pairs(vec![
            ("Location ID", CellValue::Text(" rec6701 ".into())),
            ("LP", CellValue::Text("LP-1".into())),
            ("Item Number", CellValue::Number(1001.7)),
            ("Quantity", CellValue::Number(10.0)),
        ]);
        let pallet = pallet_row(&row);
        assert_eq!(pallet.location, "REC6701");
        assert_eq!(pallet.lp, "LP-1");
        assert_eq!(pallet.item_number, Some(1001));
        assert_eq!(pallet.quantity, 10.0);
    }

    #[test]
    fn test_blank_header_falls_back_to_letter() {
        // Column C holds the item when the named header is empty
        let row = SheetRow::from_pairs(vec![
            ("Location ID", CellValue::Text("IBPS1".into())),
            ("LP", CellValue::Text("LP-2".into())),
            ("Item", CellValue::Text("2002".into())),
            ("Qty", CellValue::Text("3".into())),
            ("Item Number", CellValue::Empty),
        ]);
        let pallet = pallet_row(&row);
        assert_eq!(pallet.item_number, Some(2002));
        assert_eq!(pallet.quantity, 3.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let row = SheetRow::default();
        let pallet = pallet_row(&row);
        assert_eq!(pallet.location, "");
        assert_eq!(pallet.lp, "");
        assert_eq!(pallet.item_number, None);
        assert_eq!(pallet.quantity, 0.0);
    }
}
