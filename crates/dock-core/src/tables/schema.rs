use serde::{Deserialize, Serialize};

/// A classification table as stored on disk: named groups of raw labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Groups in display and tie-break order.
    pub groups: Vec<GroupDef>,
}

/// A single group within a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDef {
    pub name: String,
    /// Exact raw labels (already trimmed / case-normalized by the caller).
    pub labels: Vec<String>,
    /// Display colour for charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
