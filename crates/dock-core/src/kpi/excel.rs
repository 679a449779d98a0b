use crate::aggregate::{aggregate, percent, AggregateResult};
use crate::extraction::Sheet;
use crate::model::{CellValue, RawRecord, SheetRow};
use crate::parsing::aliases::{DESCRIPTION, TRANSACTION_QUANTITY, TRANSACTION_TYPE};
use crate::parsing::values::parse_float_prefix;
use crate::tables::ClassificationTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const RECEIPT_TYPE: &str = "151";
pub const PUT_TYPE: &str = "152";
pub const DAMAGED_TYPE: &str = "183";

/// Row count of one transaction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTypeCount {
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Description of the last row seen with this type.
    pub description: String,
    pub count: usize,
    /// Share of all rows on the sheet.
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundTransactionSummary {
    pub type151_count: usize,
    pub type152_count: usize,
    pub type152_units: f64,
    pub damaged_count: usize,
}

/// Transaction-export metrics. Totals count type-152 (put) rows only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelKpis {
    pub total_records: usize,
    pub sheets_count: usize,
    pub transaction_breakdown: Vec<TransactionTypeCount>,
    pub type152_units: f64,
    pub type152_count: usize,
    pub total_units: f64,
    pub inbound_transaction_summary: InboundTransactionSummary,
    /// Rows per inbound transaction group.
    #[serde(default)]
    pub inbound_types: AggregateResult,
}

/// Compute transaction KPIs from the first sheet of a workbook.
pub fn transaction_kpis(sheets: &[Sheet], table: &ClassificationTable) -> ExcelKpis {
    let Some(first) = sheets.first() else {
        return ExcelKpis::default();
    };
    let rows = &first.rows;

    let mut type151_count = 0usize;
    let mut type152_count = 0usize;
    let mut type152_units = 0.0;
    let mut damaged_count = 0usize;
    let mut breakdown: Vec<TransactionTypeCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let kind = TRANSACTION_TYPE.text(row);
        match kind.as_str() {
            RECEIPT_TYPE => type151_count += 1,
            PUT_TYPE => {
                type152_count += 1;
                type152_units += quantity(row);
            }
            DAMAGED_TYPE => damaged_count += 1,
            _ => {}
        }

        let description = DESCRIPTION.text(row);
        if kind.is_empty() || description.is_empty() {
            continue;
        }
        match positions.get(&kind) {
            Some(&idx) => {
                breakdown[idx].count += 1;
                breakdown[idx].description = description;
            }
            None => {
                positions.insert(kind.clone(), breakdown.len());
                breakdown.push(TransactionTypeCount {
                    transaction_type: kind,
                    description,
                    count: 1,
                    percentage: 0.0,
                });
            }
        }
    }

    for entry in &mut breakdown {
        entry.percentage = percent(entry.count as f64, rows.len() as f64);
    }
    breakdown.sort_by(|a, b| b.count.cmp(&a.count));

    let inbound_types = aggregate(
        rows.iter().map(|row| RawRecord {
            label: TRANSACTION_TYPE.text(row),
            value: 1.0,
        }),
        table,
    );

    tracing::debug!(
        sheet = %first.name,
        rows = rows.len(),
        type151_count,
        type152_count,
        "computed transaction KPIs"
    );

    ExcelKpis {
        total_records: type152_count,
        // Only the first sheet is analysed
        sheets_count: 1,
        transaction_breakdown: breakdown,
        type152_units,
        type152_count,
        total_units: type152_units,
        inbound_transaction_summary: InboundTransactionSummary {
            type151_count,
            type152_count,
            type152_units,
            damaged_count,
        },
        inbound_types,
    }
}

// Leading-number parse of the quantity cell; 0 when absent or not numeric.
fn quantity(row: &SheetRow) -> f64 {
    match TRANSACTION_QUANTITY.resolve(row) {
        Some(CellValue::Number(n)) if !n.is_nan() => *n,
        Some(CellValue::Text(s)) => parse_float_prefix(s).unwrap_or(0.0),
        _ => 0.0,
    }
}
