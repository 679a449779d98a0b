use dock_core::aggregate::compare::{Change, ComparisonRow};
use dock_core::aggregate::AggregateResult;
use dock_core::join::volume::VolumeAnalysis;
use dock_core::kpi::combined::{CombinedKpis, Insight};
use dock_core::kpi::excel::ExcelKpis;
use dock_core::kpi::labor::LaborOutcome;
use dock_core::kpi::{CombinedOutcome, KpiResults};
use dock_core::tables::ClassificationTable;

const BAR_WIDTH: usize = 30;

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled)
}

pub fn print_hours(result: &AggregateResult, table: &ClassificationTable) {
    if result.is_empty() {
        println!("No matching data found.\n");
        return;
    }

    let shares = result.sorted_desc();
    let max_name = shares.iter().map(|s| s.group.len()).max().unwrap_or(10);

    for share in &shares {
        let color = table
            .color_of(&share.group)
            .map(|c| format!("  {c}"))
            .unwrap_or_default();
        println!(
            "  {:<width$}  {:>9.2} h  {:>5.1}%  {}{}",
            share.group,
            share.total,
            share.percent,
            bar(share.percent),
            color,
            width = max_name
        );
    }
    println!(
        "  {}\n  {:<width$}  {:>9.2} h\n",
        "-".repeat(max_name + 21),
        "Total",
        result.grand_total,
        width = max_name
    );
}

pub fn print_comparison(rows: &[ComparisonRow]) {
    let max_name = rows.iter().map(|r| r.group.len()).max().unwrap_or(10);

    println!(
        "  {:<width$}  {:>8}  {:>8}  {:>7}",
        "Group",
        "Baseline",
        "Current",
        "Diff",
        width = max_name
    );
    for row in rows {
        let marker = match row.change {
            Change::Increase => "overspend",
            Change::Decrease => "underspend",
            Change::Unchanged => "",
        };
        println!(
            "  {:<width$}  {:>7.1}%  {:>7.1}%  {:>+6.1}%  {}",
            row.group,
            row.percent_a,
            row.percent_b,
            row.diff,
            marker,
            width = max_name
        );
    }
    println!();
}

pub fn print_ppa(locations: &AggregateResult) {
    if locations.is_empty() {
        println!("No matching data found.\n");
        return;
    }

    println!("  {:<12}  {:>8}  {:>6}", "Group", "Pallets", "Share");
    for share in locations.sorted_desc() {
        println!(
            "  {:<12}  {:>8}  {:>5.1}%  {}",
            share.group,
            share.total,
            share.percent,
            bar(share.percent)
        );
    }
    println!("  {:<12}  {:>8}\n", "Total", locations.grand_total);
}

pub fn print_volume(analysis: &VolumeAnalysis) {
    println!("Small-volume reach truck picks:");
    println!(
        "  {} of {} ({:.1}% of RT items), {} matched in item master\n",
        analysis.small_count, analysis.total_picks, analysis.small_percent, analysis.matched
    );
}

pub fn print_snapshot(results: &KpiResults) {
    if let Some(ref excel) = results.excel {
        print_excel(excel);
    }

    match results.labor {
        Some(LaborOutcome::Inbound(ref labor)) => {
            println!("=== Inbound labor ===\n");
            println!(
                "  {}: {:.1} h, {} units, UPH {:.1}, {} transactions, TPH {:.1}",
                labor.inbound_department.name,
                labor.total_hours,
                labor.total_units,
                labor.overall_uph,
                labor.total_transactions,
                labor.overall_tph
            );
            for area in &labor.inbound_areas {
                println!(
                    "    {:<24} {:>8.1} h  {:>5.1}%",
                    area.area.name, area.area.total_hours, area.hours_percent
                );
            }
            println!();
        }
        Some(LaborOutcome::Unavailable { ref error }) => {
            println!("=== Inbound labor ===\n\n  {error}\n");
        }
        None => {}
    }

    match results.combined {
        Some(CombinedOutcome::Joined(ref combined)) => print_combined(combined),
        Some(CombinedOutcome::Unavailable { ref error }) => {
            println!("=== Combined ===\n\n  {error}\n");
        }
        None => {}
    }
}

fn print_excel(excel: &ExcelKpis) {
    println!("=== Transactions ===\n");
    println!(
        "  Type 152 records: {}   units: {:.0}   sheets: {}",
        excel.total_records, excel.total_units, excel.sheets_count
    );
    let summary = &excel.inbound_transaction_summary;
    println!(
        "  Receipts (151): {}   Puts (152): {}   Damaged (183): {}\n",
        summary.type151_count, summary.type152_count, summary.damaged_count
    );

    if !excel.transaction_breakdown.is_empty() {
        println!("  {:<6}  {:>7}  {:>6}  Description", "Type", "Count", "Share");
        for entry in &excel.transaction_breakdown {
            println!(
                "  {:<6}  {:>7}  {:>5.1}%  {}",
                entry.transaction_type, entry.count, entry.percentage, entry.description
            );
        }
        println!();
    }
}

fn print_combined(combined: &CombinedKpis) {
    println!("=== Combined ===\n");
    println!(
        "  Inbound labor hours: {:.1}   Type 152 records: {}",
        combined.dataset_comparison.inbound_labor_hours,
        combined.dataset_comparison.type152_records
    );
    println!("  TPLH: {:.2}   TPH: {:.2}", combined.tplh, combined.tph);
    if let Some(ref ratings) = combined.ratings {
        print!("  Rating: TPLH {}, TPH {}", ratings.tplh, ratings.tph);
        if let Some(variance) = ratings.variance {
            print!(", variance {}", variance);
        }
        println!();
    }
    println!();

    for insight in &combined.insights {
        match insight {
            Insight::ReceivingPut {
                metric,
                labor_hours,
                transactions,
                actual_tplh,
                labor_tph,
                variance,
            } => {
                let variance = variance
                    .map(|v| format!("{v:.1}%"))
                    .unwrap_or_else(|| "N/A".into());
                println!("  {metric}");
                println!(
                    "    {transactions} transactions over {labor_hours:.1} h: {actual_tplh:.2}/h \
                     vs labor TPH {labor_tph:.1} (variance {variance})"
                );
            }
            Insight::TransactionRatio {
                metric,
                type151_count,
                type152_count,
                ratio,
                status,
            } => {
                println!("  {metric}");
                println!(
                    "    {type152_count} puts / {type151_count} receipts = {ratio:.2} ({status})"
                );
            }
        }
    }
    println!();
}
