pub mod hours;
pub mod ppa;
pub mod snapshot;
pub mod state;
pub mod tables;

use dock_core::config::{builtin_thresholds, load_thresholds, Thresholds};
use dock_core::error::DockError;
use dock_core::slots::SlotStore;
use dock_core::tables::{builtin, load_table, ClassificationTable};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Settings shared by every command.
pub struct Context {
    pub thresholds: Thresholds,
    pub state_dir: Option<PathBuf>,
}

impl Context {
    pub fn load(config: Option<&Path>, state_dir: Option<PathBuf>) -> Result<Self, DockError> {
        let thresholds = match config {
            Some(path) => load_thresholds(path)?,
            None => builtin_thresholds()?,
        };
        tracing::debug!(?config, ?state_dir, "loaded settings");
        Ok(Context {
            thresholds,
            state_dir,
        })
    }

    /// Slot store in the state directory, or a throwaway in-memory one.
    pub fn store(&self) -> Result<SlotStore, DockError> {
        match &self.state_dir {
            Some(dir) => SlotStore::in_dir(dir),
            None => Ok(SlotStore::in_memory()),
        }
    }
}

/// Read text from a file, or from stdin when the path is "-".
pub fn read_text(input: &str) -> Result<String, DockError> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

/// A preset name, or a path to a JSON table file.
pub fn resolve_table(
    name: Option<&str>,
    default_preset: &str,
) -> Result<ClassificationTable, DockError> {
    let name = name.unwrap_or(default_preset);
    if name.ends_with(".json") || Path::new(name).is_file() {
        load_table(Path::new(name))
    } else {
        builtin::load_preset(name)
    }
}
