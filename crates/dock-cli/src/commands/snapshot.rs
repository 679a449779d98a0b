use dock_core::error::DockError;
use dock_core::extraction::workbook::CalamineReader;
use dock_core::join::session::SnapshotSession;
use dock_core::kpi::SnapshotExport;
use dock_core::model::LaborReport;
use dock_core::parsing::labor::parse_labor_report;
use dock_core::slots::{self, ExcelPackage};
use dock_core::tables::builtin;
use std::path::Path;

use super::{read_text, Context};
use crate::output;

pub fn run(
    ctx: &Context,
    transactions: Option<&Path>,
    labor: Option<&str>,
    export: Option<&Path>,
    output_format: &str,
) -> Result<(), DockError> {
    let mut store = ctx.store()?;
    let mut session = SnapshotSession::new(ctx.thresholds.clone());

    let excel = match transactions {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            let table = builtin::transactions()?;
            let kpis = dock_core::analyze_transactions(&bytes, &CalamineReader::new(), &table)?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            store.save(slots::SNAPSHOT_EXCEL, &ExcelPackage::new(kpis.clone(), &file_name))?;
            Some(kpis)
        }
        None => store.load_excel()?,
    };

    let labor = match labor {
        Some(input) => {
            let report = parse_labor_report(&read_text(input)?);
            store.save(slots::SNAPSHOT_LABOR, &report)?;
            Some(report)
        }
        None => store.load::<LaborReport>(slots::SNAPSHOT_LABOR)?,
    };

    if let Some(excel) = excel {
        session.on_excel_available(excel);
    }
    if let Some(labor) = labor {
        session.on_labor_available(labor);
    }

    let Some(results) = session.results() else {
        println!("No snapshot data loaded. Pass --transactions and/or --labor.");
        return Ok(());
    };
    store.save(slots::SNAPSHOT_KPIS, results)?;

    if let Some(path) = export {
        let export = SnapshotExport::new(results);
        let target = if path.is_dir() {
            path.join(export.file_name())
        } else {
            path.to_path_buf()
        };
        std::fs::write(&target, serde_json::to_string_pretty(&export)?)?;
        eprintln!("Snapshot exported to {}", target.display());
    }

    match output_format {
        "json" => output::json::print(results),
        _ => {
            output::table::print_snapshot(results);
            Ok(())
        }
    }
}
