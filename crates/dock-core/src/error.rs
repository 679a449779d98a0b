use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DockError {
    #[error("failed to parse input: {0}")]
    ParseError(String),

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("failed to load classification table from {path}: {reason}")]
    TableLoad { path: PathBuf, reason: String },

    #[error("invalid classification table: {0}")]
    TableInvalid(String),

    #[error("unknown preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("failed to load configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
