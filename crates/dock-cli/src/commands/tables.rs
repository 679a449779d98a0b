use dock_core::error::DockError;
use dock_core::tables::{builtin, load_table};
use std::path::Path;

pub fn list() -> Result<(), DockError> {
    println!("Available predefined tables:\n");
    for name in builtin::PRESETS {
        let table = builtin::load_preset(name)?;
        let def = table.def();
        println!(
            "  {:<14} {} (v{}, {} groups)",
            name,
            def.name,
            def.version,
            def.groups.len()
        );
        if let Some(ref desc) = def.description {
            println!("                 {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), DockError> {
    let table = builtin::load_preset(preset)?;
    let def = table.def();

    println!("{} (version {})\n", def.name, def.version);
    if let Some(ref desc) = def.description {
        println!("{}\n", desc);
    }

    println!(
        "Labels are matched exactly. Labels not listed below are ignored.\n\
         Ties in the totals are shown in this group order:\n"
    );

    let max_name_len = def.groups.iter().map(|g| g.name.len()).max().unwrap_or(10);

    for group in &def.groups {
        let color = group
            .color
            .as_deref()
            .map(|c| format!("  [{c}]"))
            .unwrap_or_default();
        println!("  {:<width$}{}", group.name, color, width = max_name_len);
        for label in &group.labels {
            println!("      {}", label);
        }
        println!();
    }

    Ok(())
}

const SCHEMA_HELP: &str = r##"JSON Table Schema
=================

A table file maps raw labels (labor functions, location ids, transaction
codes) to the groups they are totalled under. Pass it to a command with
`--table <file>`.

Top-level fields:
  name          (string, required)  Human-readable name of the table
  description   (string, optional)  What this table is for
  version       (string, required)  Version identifier (e.g., "2024.1")
  groups        (array, required)   Groups in display order. When two
                                    groups have the same total, the one
                                    listed first is shown first.

Each group in the "groups" array:
  name          (string, required)  Group name, unique within the table
  labels        (array, required)   Raw labels belonging to the group.
                                    Matching is exact: hours labels are
                                    trimmed, PPA locations are upper-cased
                                    before lookup. A label may belong to
                                    one group only.
  color         (string, optional)  Display colour for charts

Example:
{
  "name": "Site hours",
  "version": "1.0",
  "groups": [
    { "name": "Putaway", "labels": ["Reach-Truck Putaway"], "color": "#1e88e5" },
    { "name": "VAS", "labels": ["VAS", "VAS Execute"] }
  ]
}
"##;

pub fn schema() -> Result<(), DockError> {
    print!("{SCHEMA_HELP}");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), DockError> {
    let table = load_table(file)?;
    let def = table.def();

    println!("Table '{}' (v{}) is valid.", def.name, def.version);
    println!("  Groups: {}", table.group_names().collect::<Vec<_>>().join(", "));
    println!(
        "  Labels: {}",
        def.groups.iter().map(|g| g.labels.len()).sum::<usize>()
    );

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    for group in &def.groups {
        for label in &group.labels {
            if label.trim() != label {
                warnings.push(format!(
                    "label '{}' in group '{}' has surrounding whitespace and will never match",
                    label, group.name
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_core::tables::parse_table_str;

    #[test]
    fn test_schema_example_is_a_valid_table() {
        let example = SCHEMA_HELP.split("Example:\n").nth(1).unwrap();
        let table = parse_table_str(example).unwrap();
        assert_eq!(table.lookup("VAS Execute"), Some("VAS"));
        assert_eq!(table.color_of("Putaway"), Some("#1e88e5"));
    }
}
