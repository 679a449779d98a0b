use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One parsed input line: a category label and its numeric measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub label: String,
    pub value: f64,
}

/// A single spreadsheet cell as the parsers see it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// True for cells that carry no usable value: empty cells, empty strings,
    /// zero and NaN. Alias resolution skips these.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }

    /// Text form of the cell. Integral numbers render without a fractional part,
    /// so a numeric `152` cell reads as `"152"`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format!("{n}"),
        }
    }

    /// Numeric form of the cell. Text must parse in full (after trimming).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// A spreadsheet data row, addressable by header text or by column letter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    /// Cells keyed by the header text of their column.
    pub cells: BTreeMap<String, CellValue>,
    /// Cells by absolute column position (column A first).
    #[serde(default)]
    pub columns: Vec<CellValue>,
}

impl SheetRow {
    /// Build a row from header/value pairs. Columns are laid out in pair order.
    pub fn from_pairs<K: Into<String>>(pairs: Vec<(K, CellValue)>) -> Self {
        let mut row = SheetRow::default();
        for (key, value) in pairs {
            row.columns.push(value.clone());
            row.cells.insert(key.into(), value);
        }
        row
    }

    /// Look up a cell by header name, falling back to a column letter ("A", "C", "AB").
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        if let Some(cell) = self.cells.get(key) {
            return Some(cell);
        }
        column_index(key).and_then(|idx| self.columns.get(idx))
    }

    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(CellValue::is_blank) && self.cells.values().all(CellValue::is_blank)
    }
}

/// Convert a spreadsheet column letter to a zero-based index.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || letters.len() > 3 || !letters.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let mut idx = 0usize;
    for c in letters.chars() {
        idx = idx * 26 + (c as usize - 'A' as usize + 1);
    }
    Some(idx - 1)
}

/// A row of a PPA location export after field resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletRow {
    /// Location id, trimmed and upper-cased.
    pub location: String,
    /// Logical pallet / license plate id, trimmed.
    pub lp: String,
    /// Item number truncated to an integer key.
    pub item_number: Option<i64>,
    pub quantity: f64,
}

/// A reach-truck pick eligible for the item-volume join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickRecord {
    pub lp: String,
    pub item_number: i64,
    pub quantity: f64,
    pub location: String,
}

/// One row of a labor-management department or area table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborEntry {
    pub name: String,
    pub total_hours: f64,
    pub total_units: i64,
    pub uph: f64,
    pub total_transactions: i64,
    pub tph: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fc: Option<String>,
}

/// Parsed labor-management paste.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaborReport {
    pub departments: Vec<LaborEntry>,
    pub areas: Vec<LaborEntry>,
    #[serde(default)]
    pub metadata: LaborMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("D"), Some(3));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("Quantity"), None);
    }

    #[test]
    fn test_sheet_row_header_then_letter() {
        let row = SheetRow::from_pairs(vec![
            ("Location ID", CellValue::Text("REC6701".into())),
            ("LP", CellValue::Text("LP1".into())),
            ("Item", CellValue::Number(1001.0)),
        ]);
        assert_eq!(row.get("LP"), Some(&CellValue::Text("LP1".into())));
        assert_eq!(row.get("C"), Some(&CellValue::Number(1001.0)));
        assert_eq!(row.get("D"), None);
    }

    #[test]
    fn test_cell_blankness() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text(String::new()).is_blank());
        assert!(CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Text(" ".into()).is_blank());
        assert!(!CellValue::Number(3.0).is_blank());
    }

    #[test]
    fn test_numeric_cell_text() {
        assert_eq!(CellValue::Number(152.0).as_text(), "152");
        assert_eq!(CellValue::Number(1001.7).as_text(), "1001.7");
    }

    #[test]
    fn test_cell_value_json_shape() {
        let json = serde_json::to_string(&vec![
            CellValue::Number(4.0),
            CellValue::Text("x".into()),
            CellValue::Empty,
        ])
        .unwrap();
        assert_eq!(json, r#"[4.0,"x",null]"#);
        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[2], CellValue::Empty);
    }
}
