use dock_core::error::DockError;
use dock_core::extraction::workbook::CalamineReader;
use dock_core::join::session::VolumeSession;
use dock_core::join::volume::ItemMaster;
use dock_core::model::SheetRow;
use dock_core::slots;
use std::path::Path;

use super::{resolve_table, Context};
use crate::output;

/// PPA exports carry one title row above the header row.
const PPA_HEADER_ROW: usize = 1;

pub fn run(
    ctx: &Context,
    input_file: Option<&Path>,
    item_master: Option<&Path>,
    table: Option<&str>,
    output_format: &str,
) -> Result<(), DockError> {
    let table = resolve_table(table, "ppa")?;
    let mut store = ctx.store()?;

    let report = match input_file {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            let reader = CalamineReader::with_header_row(PPA_HEADER_ROW);
            let (report, rows) = dock_core::analyze_ppa(&bytes, &reader, &table)?;
            store.save(slots::PPA_FILE, &rows)?;
            report
        }
        None => {
            let rows: Vec<SheetRow> = store.load(slots::PPA_FILE)?.ok_or_else(|| {
                DockError::ParseError("no saved PPA data; pass an export file".into())
            })?;
            dock_core::analyze_ppa_rows(&rows, &table)
        }
    };

    let mut session = VolumeSession::new(&ctx.thresholds);
    let has_picks = !report.picks.is_empty();
    session.on_picks_available(report.picks.clone());
    if let Some(path) = item_master {
        session.on_item_master_available(ItemMaster::load(path)?);
    }

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "locations": report.locations,
            "reachPicks": report.picks.len(),
            "volume": session.result(),
        })),
        _ => {
            output::table::print_ppa(&report.locations);
            match session.result() {
                Some(analysis) if has_picks => output::table::print_volume(analysis),
                Some(_) => {}
                None if has_picks => {
                    println!("Volume analysis unavailable: item master not loaded.");
                }
                None => {}
            }
            Ok(())
        }
    }
}
