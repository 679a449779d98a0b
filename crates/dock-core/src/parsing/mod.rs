pub mod aliases;
pub mod labor;
pub mod values;

use crate::model::RawRecord;
use values::parse_float_prefix;

/// Parse pasted tabular text into label/value records.
///
/// Blank lines are dropped. Each remaining line is split into fields on tab runs
/// or gaps of 2+ whitespace characters; the first field is the label and the
/// second the value. Lines without a label, without a value, or whose value does
/// not start with a number are skipped.
pub fn parse_records(text: &str) -> impl Iterator<Item = RawRecord> + '_ {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(try_parse_record)
}

/// Try to parse a single line as a label/value record.
fn try_parse_record(line: &str) -> Option<RawRecord> {
    let fields = split_fields(line);

    let label = fields.first()?.trim();
    let value_str = fields.get(1)?.trim();
    if label.is_empty() || value_str.is_empty() {
        return None;
    }

    let value = parse_float_prefix(value_str)?;
    Some(RawRecord {
        label: label.to_string(),
        value,
    })
}

/// Split a line into fields.
///
/// A separator is a run of whitespace that contains a tab or is at least two
/// characters long; single spaces stay inside fields ("Heat Shrink").
/// A line starting with a separator yields an empty first field.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut field_start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !c.is_whitespace() {
            continue;
        }

        let run_start = i;
        let mut run_end = i + c.len_utf8();
        let mut run_len = 1;
        let mut has_tab = c == '\t';
        while let Some(&(j, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            has_tab |= next == '\t';
            run_len += 1;
            run_end = j + next.len_utf8();
            chars.next();
        }

        if has_tab || run_len >= 2 {
            fields.push(&line[field_start..run_start]);
            field_start = run_end;
        }
    }

    fields.push(&line[field_start..]);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_tabs() {
        assert_eq!(split_fields("Reach-Truck Putaway\t10.5"), vec!["Reach-Truck Putaway", "10.5"]);
        assert_eq!(split_fields("VAS\t\t5.0\t2"), vec!["VAS", "5.0", "2"]);
    }

    #[test]
    fn test_split_on_space_gaps() {
        let fields = split_fields("Heat Shrink     4.25    mixed");
        assert_eq!(fields, vec!["Heat Shrink", "4.25", "mixed"]);
    }

    #[test]
    fn test_single_space_kept() {
        assert_eq!(split_fields("Container Unload 3"), vec!["Container Unload 3"]);
    }

    #[test]
    fn test_leading_separator_gives_empty_label() {
        assert_eq!(split_fields("\tVAS\t5"), vec!["", "VAS", "5"]);
    }

    #[test]
    fn test_parse_records_skips_malformed() {
        let text = "Reach-Truck Putaway\t10.5\n\nVAS\tn/a\nNo value here\n\t7\nUnloader\t2.5 hrs\r\n";
        let records: Vec<RawRecord> = parse_records(text).collect();
        assert_eq!(
            records,
            vec![
                RawRecord {
                    label: "Reach-Truck Putaway".into(),
                    value: 10.5
                },
                RawRecord {
                    label: "Unloader".into(),
                    value: 2.5
                },
            ]
        );
    }

    #[test]
    fn test_parse_records_empty_input() {
        assert_eq!(parse_records("").count(), 0);
        assert_eq!(parse_records("\n  \n").count(), 0);
    }
}
