pub mod builtin;
pub mod schema;

use crate::error::DockError;
use schema::TableDef;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A lookup-ready classification table.
///
/// Lookup is exact membership. If a label appears in more than one group the
/// first group in table order owns it.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    def: TableDef,
    index: HashMap<String, usize>,
}

impl ClassificationTable {
    pub fn new(def: TableDef) -> Self {
        let mut index = HashMap::new();
        for (group_idx, group) in def.groups.iter().enumerate() {
            for label in &group.labels {
                index.entry(label.clone()).or_insert(group_idx);
            }
        }
        ClassificationTable { def, index }
    }

    /// Group owning `label`, or None when the label is not tracked.
    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.index
            .get(label)
            .map(|&idx| self.def.groups[idx].name.as_str())
    }

    /// Position of a group in table order.
    pub fn group_position(&self, group: &str) -> Option<usize> {
        self.def.groups.iter().position(|g| g.name == group)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.def.groups.iter().map(|g| g.name.as_str())
    }

    /// All labels of a group.
    pub fn labels_of(&self, group: &str) -> Option<&[String]> {
        self.def
            .groups
            .iter()
            .find(|g| g.name == group)
            .map(|g| g.labels.as_slice())
    }

    pub fn color_of(&self, group: &str) -> Option<&str> {
        self.def
            .groups
            .iter()
            .find(|g| g.name == group)
            .and_then(|g| g.color.as_deref())
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn def(&self) -> &TableDef {
        &self.def
    }
}

/// Load a classification table from a JSON file.
pub fn load_table(path: &Path) -> Result<ClassificationTable, DockError> {
    let content = std::fs::read_to_string(path).map_err(|e| DockError::TableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_table(&content, path)
}

/// Parse a classification table from a JSON string.
pub fn parse_table(json: &str, source: &Path) -> Result<ClassificationTable, DockError> {
    let def: TableDef = serde_json::from_str(json).map_err(|e| DockError::TableLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_table(&def)?;
    Ok(ClassificationTable::new(def))
}

/// Parse a classification table from a JSON string (no file path context).
pub fn parse_table_str(json: &str) -> Result<ClassificationTable, DockError> {
    let def: TableDef = serde_json::from_str(json).map_err(DockError::Json)?;
    validate_table(&def)?;
    Ok(ClassificationTable::new(def))
}

/// Validate that a table is well-formed.
pub fn validate_table(def: &TableDef) -> Result<(), DockError> {
    if def.name.trim().is_empty() {
        return Err(DockError::TableInvalid("name must not be empty".into()));
    }

    if def.groups.is_empty() {
        return Err(DockError::TableInvalid("groups must not be empty".into()));
    }

    let mut group_names = HashSet::new();
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for group in &def.groups {
        if group.name.trim().is_empty() {
            return Err(DockError::TableInvalid("group name must not be empty".into()));
        }

        if !group_names.insert(group.name.as_str()) {
            return Err(DockError::TableInvalid(format!(
                "group '{}' is defined more than once",
                group.name
            )));
        }

        if group.labels.is_empty() {
            return Err(DockError::TableInvalid(format!(
                "group '{}' has no labels",
                group.name
            )));
        }

        for label in &group.labels {
            if label.trim().is_empty() {
                return Err(DockError::TableInvalid(format!(
                    "group '{}' contains an empty label",
                    group.name
                )));
            }
            if let Some(owner) = owners.insert(label.as_str(), group.name.as_str()) {
                if owner != group.name {
                    return Err(DockError::TableInvalid(format!(
                        "label '{}' belongs to both '{}' and '{}'",
                        label, owner, group.name
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_table() {
        let json = r##"{
            "name": "Test",
            "version": "1.0",
            "groups": [
                { "name": "A", "labels": ["a1", "a2"] },
                { "name": "B", "labels": ["b1"], "color": "#fff" }
            ]
        }"##;
        let table = parse_table_str(json).unwrap();
        assert_eq!(table.name(), "Test");
        assert_eq!(table.lookup("a2"), Some("A"));
        assert_eq!(table.lookup("b1"), Some("B"));
        assert_eq!(table.lookup("c"), None);
        assert_eq!(table.color_of("B"), Some("#fff"));
        assert_eq!(table.group_position("B"), Some(1));
    }

    #[test]
    fn test_lookup_is_exact() {
        let json = r#"{"name": "T", "version": "1", "groups": [{ "name": "VAS", "labels": ["VAS"] }]}"#;
        let table = parse_table_str(json).unwrap();
        assert_eq!(table.lookup("vas"), None);
        assert_eq!(table.lookup(" VAS"), None);
    }

    #[test]
    fn test_shared_label_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "groups": [
                { "name": "A", "labels": ["x"] },
                { "name": "B", "labels": ["x"] }
            ]
        }"#;
        assert!(matches!(parse_table_str(json), Err(DockError::TableInvalid(_))));
    }

    #[test]
    fn test_first_group_wins_when_unvalidated() {
        let def: TableDef = serde_json::from_str(
            r#"{"name": "T", "version": "1", "groups": [
                { "name": "First", "labels": ["x"] },
                { "name": "Second", "labels": ["x"] }
            ]}"#,
        )
        .unwrap();
        let table = ClassificationTable::new(def);
        assert_eq!(table.lookup("x"), Some("First"));
    }

    #[test]
    fn test_empty_groups_rejected() {
        let json = r#"{"name": "Bad", "version": "1.0", "groups": []}"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let json = r#"{"name": "Bad", "version": "1.0", "groups": [
            { "name": "A", "labels": ["x"] },
            { "name": "A", "labels": ["y"] }
        ]}"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_empty_label_rejected() {
        let json = r#"{"name": "Bad", "version": "1.0", "groups": [
            { "name": "A", "labels": [" "] }
        ]}"#;
        assert!(parse_table_str(json).is_err());
    }
}
