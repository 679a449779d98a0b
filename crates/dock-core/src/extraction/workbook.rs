use std::collections::BTreeMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::DockError;
use crate::extraction::{Sheet, SheetReader};
use crate::model::{CellValue, SheetRow};

/// Spreadsheet backend built on calamine (xlsx, xls, xlsb, ods).
pub struct CalamineReader {
    /// Number of rows above the header row. PPA exports carry one title row.
    header_row: usize,
}

impl CalamineReader {
    pub fn new() -> Self {
        CalamineReader { header_row: 0 }
    }

    pub fn with_header_row(header_row: usize) -> Self {
        CalamineReader { header_row }
    }
}

impl Default for CalamineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetReader for CalamineReader {
    fn read_sheets(&self, bytes: &[u8]) -> Result<Vec<Sheet>, DockError> {
        let cursor = Cursor::new(bytes.to_vec());
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| DockError::Workbook(format!("failed to open workbook: {e}")))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| DockError::Workbook(format!("sheet '{name}' unreadable: {e}")))?;
            let rows = rows_from_range(&range, self.header_row);
            tracing::debug!(sheet = %name, rows = rows.len(), "read worksheet");
            sheets.push(Sheet { name, rows });
        }

        if sheets.is_empty() {
            return Err(DockError::Workbook("workbook has no worksheets".into()));
        }
        Ok(sheets)
    }

    fn backend_name(&self) -> &str {
        "calamine"
    }
}

/// Turn a worksheet range into keyed data rows.
///
/// The row at `header_row` (relative to the range start) supplies the column
/// names; rows above it are ignored. Fully blank data rows are dropped.
pub fn rows_from_range(range: &Range<Data>, header_row: usize) -> Vec<SheetRow> {
    let start_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let mut rows = range.rows().skip(header_row);

    let headers = match rows.next() {
        Some(header_cells) => header_names(header_cells),
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for data_row in rows {
        let mut row = SheetRow {
            cells: BTreeMap::new(),
            columns: vec![CellValue::Empty; start_col],
        };

        for (col_idx, cell) in data_row.iter().enumerate() {
            let value = cell_value(cell);
            if let Some(Some(header)) = headers.get(col_idx) {
                row.cells.insert(header.clone(), value.clone());
            }
            row.columns.push(value);
        }

        if row.is_blank() {
            continue;
        }
        records.push(row);
    }

    records
}

/// Header names per column; blank headers are unnamed, repeated names get a suffix.
fn header_names(cells: &[Data]) -> Vec<Option<String>> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    cells
        .iter()
        .map(|cell| {
            let name = cell_value(cell).as_text().trim().to_string();
            if name.is_empty() {
                return None;
            }
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}_{count}")
            };
            *count += 1;
            Some(unique)
        })
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Empty | Data::Error(_) => CellValue::Empty,
        other => CellValue::Text(format!("{other}")),
    }
}
