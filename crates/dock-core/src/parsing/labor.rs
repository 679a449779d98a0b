use crate::model::{LaborEntry, LaborReport};
use crate::parsing::split_fields;
use crate::parsing::values::{parse_float_prefix, parse_int_prefix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Departments,
    Areas,
}

/// Parse a labor-management report pasted as text.
///
/// The paste carries page chrome (navigation, greeting), metadata lines, and two
/// tables: department totals and area totals. Rows need at least five fields:
/// name, hours, units, UPH, transactions and (optionally) TPH.
pub fn parse_labor_report(text: &str) -> LaborReport {
    let mut report = LaborReport::default();
    let mut section: Option<Section> = None;
    let mut in_table = false;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_page_chrome(line) {
            continue;
        }

        if let Some(idx) = line.find("Last Updated:") {
            report.metadata.last_updated = Some(line[idx + "Last Updated:".len()..].trim().to_string());
            continue;
        }
        if let Some(idx) = line.find("FC:") {
            report.metadata.fc = Some(line[idx + "FC:".len()..].trim().to_string());
            continue;
        }

        if line == "Labor Department Totals" {
            section = Some(Section::Departments);
            in_table = true;
            continue;
        }
        if line == "Labor Area Totals" {
            section = Some(Section::Areas);
            in_table = true;
            continue;
        }
        if line.contains("Labor Function") || line.contains("Total Hours") {
            in_table = true;
            continue;
        }

        if in_table {
            if let Some(current) = section {
                if !line.contains("Totals") && !line.contains("Labor") {
                    if let Some(entry) = try_parse_entry(line) {
                        match current {
                            Section::Departments => report.departments.push(entry),
                            Section::Areas => report.areas.push(entry),
                        }
                    }
                }
            }
        }

        // Any other totals line closes the table
        if line.contains("Totals") {
            in_table = false;
        }
    }

    tracing::debug!(
        departments = report.departments.len(),
        areas = report.areas.len(),
        "parsed labor report"
    );

    report
}

fn is_page_chrome(line: &str) -> bool {
    ["Labor Management", "Welcome,", "Reports", "Actions"]
        .iter()
        .any(|marker| line.contains(marker))
}

fn try_parse_entry(line: &str) -> Option<LaborEntry> {
    let fields = split_fields(line);
    if fields.len() < 5 {
        return None;
    }

    let float_at = |i: usize| fields.get(i).and_then(|f| parse_float_prefix(f)).unwrap_or(0.0);
    let int_at = |i: usize| fields.get(i).and_then(|f| parse_int_prefix(f)).unwrap_or(0);

    Some(LaborEntry {
        name: fields[0].to_string(),
        total_hours: float_at(1),
        total_units: int_at(2),
        uph: float_at(3),
        total_transactions: int_at(4),
        tph: float_at(5),
    })
}
