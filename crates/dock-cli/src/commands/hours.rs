use dock_core::aggregate::AggregateResult;
use dock_core::error::DockError;
use dock_core::join::session::ComparisonSession;
use dock_core::slots::{self, DatasetSlot, HoursMode, SlotStore};
use dock_core::tables::ClassificationTable;

use super::{read_text, resolve_table, Context};
use crate::output;

pub fn run(
    ctx: &Context,
    input: Option<&str>,
    compare: Option<&str>,
    table: Option<&str>,
    reparse: bool,
    output_format: &str,
) -> Result<(), DockError> {
    let table = resolve_table(table, "hours")?;
    let mut store = ctx.store()?;

    if input == Some("-") && compare == Some("-") {
        return Err(DockError::ParseError(
            "only one of the datasets can be read from stdin".into(),
        ));
    }

    let (current, baseline) = match input {
        Some(input) => {
            let text = read_text(input)?;
            let current = DatasetSlot::new(&dock_core::analyze_hours(&text, &table), &text);
            let baseline = match compare {
                Some(path) => {
                    let text = read_text(path)?;
                    Some(DatasetSlot::new(&dock_core::analyze_hours(&text, &table), &text))
                }
                None => None,
            };
            store.save_hours(&current, baseline.as_ref())?;
            (current, baseline)
        }
        None => restore(&mut store)?,
    };

    let to_result = |slot: &DatasetSlot| -> AggregateResult {
        if reparse {
            slot.reparse(&table)
        } else {
            slot.to_aggregate(&table)
        }
    };

    match baseline {
        Some(baseline) => {
            let mut session = ComparisonSession::new(&ctx.thresholds);
            session.on_baseline_available(to_result(&baseline));
            session.on_current_available(to_result(&current));
            print_comparison(&session, &table, output_format)
        }
        None => {
            let result = to_result(&current);
            match output_format {
                "json" => output::json::print(&result),
                _ => {
                    output::table::print_hours(&result, &table);
                    Ok(())
                }
            }
        }
    }
}

fn restore(store: &mut SlotStore) -> Result<(DatasetSlot, Option<DatasetSlot>), DockError> {
    let mode: HoursMode = store.load(slots::HOURS_MODE)?.unwrap_or(HoursMode::Single);
    let not_saved = || DockError::ParseError("no saved hours data; pass an input file".into());

    match mode {
        HoursMode::Single => {
            let current = store.load(slots::HOURS_SINGLE)?.ok_or_else(not_saved)?;
            Ok((current, None))
        }
        HoursMode::Comparison => {
            let baseline: Option<DatasetSlot> = store.load(slots::HOURS_DATASET_A)?;
            let current = store.load(slots::HOURS_DATASET_B)?.ok_or_else(not_saved)?;
            Ok((current, baseline))
        }
    }
}

fn print_comparison(
    session: &ComparisonSession,
    table: &ClassificationTable,
    output_format: &str,
) -> Result<(), DockError> {
    let (Some(baseline), Some(current), Some(rows)) =
        (session.baseline(), session.current(), session.rows())
    else {
        return Ok(());
    };

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "baseline": baseline,
            "current": current,
            "comparison": rows,
        })),
        _ => {
            println!("=== Current ===\n");
            output::table::print_hours(current, table);
            println!("=== Comparison vs baseline ===\n");
            output::table::print_comparison(rows);
            Ok(())
        }
    }
}
