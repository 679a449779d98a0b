pub mod aggregate;
pub mod config;
pub mod error;
pub mod extraction;
pub mod join;
pub mod kpi;
pub mod model;
pub mod parsing;
pub mod slots;
pub mod tables;

use aggregate::ppa::{count_unique_pallets, pallet_rows, reach_picks};
use aggregate::{aggregate, AggregateResult};
use error::DockError;
use extraction::SheetReader;
use kpi::excel::{transaction_kpis, ExcelKpis};
use model::{PickRecord, SheetRow};
use serde::{Deserialize, Serialize};
use tables::ClassificationTable;

/// Classify pasted hours text and total it per group.
pub fn analyze_hours(text: &str, table: &ClassificationTable) -> AggregateResult {
    aggregate(parsing::parse_records(text), table)
}

/// PPA location breakdown plus the reach-truck picks for the volume join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpaReport {
    /// Unique LPs per location group.
    pub locations: AggregateResult,
    pub picks: Vec<PickRecord>,
}

/// Analyse PPA export rows (already read from the first sheet).
pub fn analyze_ppa_rows(rows: &[SheetRow], table: &ClassificationTable) -> PpaReport {
    let pallets = pallet_rows(rows);
    PpaReport {
        locations: count_unique_pallets(&pallets, table),
        picks: reach_picks(&pallets, table),
    }
}

/// Read a PPA export workbook and analyse its first sheet.
///
/// Returns the raw rows too so they can be persisted and re-analysed later.
pub fn analyze_ppa(
    bytes: &[u8],
    reader: &dyn SheetReader,
    table: &ClassificationTable,
) -> Result<(PpaReport, Vec<SheetRow>), DockError> {
    let sheet = reader.read_first_sheet(bytes)?;
    tracing::debug!(
        backend = reader.backend_name(),
        sheet = %sheet.name,
        rows = sheet.rows.len(),
        "read PPA export"
    );
    let report = analyze_ppa_rows(&sheet.rows, table);
    Ok((report, sheet.rows))
}

/// Read a transaction export workbook and compute its KPIs.
pub fn analyze_transactions(
    bytes: &[u8],
    reader: &dyn SheetReader,
    table: &ClassificationTable,
) -> Result<ExcelKpis, DockError> {
    let sheets = reader.read_sheets(bytes)?;
    tracing::debug!(
        backend = reader.backend_name(),
        sheets = sheets.len(),
        "read transaction export"
    );
    Ok(transaction_kpis(&sheets, table))
}
