//! Named persistence slots for dashboard state.
//!
//! Each slot holds one JSON document. A slot that no longer deserializes is
//! dropped and reported as absent.

use crate::aggregate::{aggregate, AggregateResult};
use crate::error::DockError;
use crate::kpi::excel::ExcelKpis;
use crate::parsing::parse_records;
use crate::tables::ClassificationTable;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const HOURS_SINGLE: &str = "hoursBreakdown_singleData";
pub const HOURS_DATASET_A: &str = "hoursBreakdown_datasetA";
pub const HOURS_DATASET_B: &str = "hoursBreakdown_datasetB";
pub const HOURS_MODE: &str = "hoursBreakdown_mode";
pub const PPA_FILE: &str = "ppa_fileData";
pub const SNAPSHOT_EXCEL: &str = "snapshot_excelData";
pub const SNAPSHOT_LABOR: &str = "snapshot_laborData";
pub const SNAPSHOT_KPIS: &str = "snapshot_kpiResults";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    Hours,
    Ppa,
    Snapshot,
}

impl Dashboard {
    pub const ALL: [Dashboard; 3] = [Dashboard::Hours, Dashboard::Ppa, Dashboard::Snapshot];

    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Dashboard::Hours => &[HOURS_SINGLE, HOURS_DATASET_A, HOURS_DATASET_B, HOURS_MODE],
            Dashboard::Ppa => &[PPA_FILE],
            Dashboard::Snapshot => &[SNAPSHOT_EXCEL, SNAPSHOT_LABOR, SNAPSHOT_KPIS],
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dashboard::Hours => write!(f, "hours"),
            Dashboard::Ppa => write!(f, "ppa"),
            Dashboard::Snapshot => write!(f, "snapshot"),
        }
    }
}

impl FromStr for Dashboard {
    type Err = DockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hours" => Ok(Dashboard::Hours),
            "ppa" => Ok(Dashboard::Ppa),
            "snapshot" => Ok(Dashboard::Snapshot),
            other => Err(DockError::ParseError(format!(
                "unknown dashboard '{other}' (expected hours, ppa or snapshot)"
            ))),
        }
    }
}

/// Raw storage for slot documents.
pub trait SlotBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, DockError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), DockError>;
    fn remove(&mut self, key: &str) -> Result<(), DockError>;
    /// Keys currently holding a document, sorted.
    fn keys(&self) -> Result<Vec<String>, DockError>;
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: BTreeMap<String, String>,
}

impl SlotBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, DockError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), DockError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DockError> {
        self.slots.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, DockError> {
        Ok(self.slots.keys().cloned().collect())
    }
}

/// One `<key>.json` file per slot inside a directory.
#[derive(Debug)]
pub struct DirBackend {
    dir: PathBuf,
}

impl DirBackend {
    pub fn new(dir: &Path) -> Result<Self, DockError> {
        std::fs::create_dir_all(dir)?;
        Ok(DirBackend {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DockError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DockError::ParseError(format!("invalid slot key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotBackend for DirBackend {
    fn read(&self, key: &str) -> Result<Option<String>, DockError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), DockError> {
        std::fs::write(self.path_for(key)?, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DockError> {
        match std::fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, DockError> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Typed access to slots over any backend.
pub struct SlotStore {
    backend: Box<dyn SlotBackend>,
}

impl SlotStore {
    pub fn new(backend: impl SlotBackend + 'static) -> Self {
        SlotStore {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    pub fn in_dir(dir: &Path) -> Result<Self, DockError> {
        Ok(Self::new(DirBackend::new(dir)?))
    }

    /// Overwrite a slot.
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), DockError> {
        let json = serde_json::to_string(value)?;
        self.backend.write(key, &json)?;
        tracing::debug!(key, bytes = json.len(), "saved slot");
        Ok(())
    }

    /// Read a slot. A document that does not deserialize is removed and
    /// reported as absent.
    pub fn load<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, DockError> {
        let Some(json) = self.backend.read(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable slot");
                self.backend.remove(key)?;
                Ok(None)
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Result<(), DockError> {
        self.backend.remove(key)
    }

    /// Remove every slot of a dashboard.
    pub fn clear(&mut self, dashboard: Dashboard) -> Result<(), DockError> {
        for key in dashboard.keys() {
            self.backend.remove(key)?;
        }
        tracing::debug!(%dashboard, "cleared slots");
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), DockError> {
        for dashboard in Dashboard::ALL {
            self.clear(dashboard)?;
        }
        Ok(())
    }

    pub fn keys(&self) -> Result<Vec<String>, DockError> {
        self.backend.keys()
    }

    /// Raw document of a slot, unparsed.
    pub fn raw(&self, key: &str) -> Result<Option<String>, DockError> {
        self.backend.read(key)
    }

    /// Persist the hours datasets of one run.
    ///
    /// A dataset that matched nothing is not saved and leaves the previous
    /// slot in place. The mode only changes when something was saved.
    pub fn save_hours(
        &mut self,
        current: &DatasetSlot,
        baseline: Option<&DatasetSlot>,
    ) -> Result<bool, DockError> {
        let saved = match baseline {
            Some(baseline) => {
                let mut saved = false;
                if !baseline.is_empty() {
                    self.save(HOURS_DATASET_A, baseline)?;
                    saved = true;
                }
                if !current.is_empty() {
                    self.save(HOURS_DATASET_B, current)?;
                    saved = true;
                }
                if saved {
                    self.save(HOURS_MODE, &HoursMode::Comparison)?;
                }
                saved
            }
            None if current.is_empty() => false,
            None => {
                self.save(HOURS_SINGLE, current)?;
                self.save(HOURS_MODE, &HoursMode::Single)?;
                true
            }
        };
        if !saved {
            tracing::debug!("no matching hours data; keeping saved slots");
        }
        Ok(saved)
    }

    /// Excel KPIs from the snapshot slot, stored either wrapped in a package or bare.
    pub fn load_excel(&mut self) -> Result<Option<ExcelKpis>, DockError> {
        Ok(self
            .load::<StoredExcel>(SNAPSHOT_EXCEL)?
            .map(StoredExcel::into_kpis))
    }
}

/// Persisted hours dataset: totals plus the pasted text they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSlot {
    pub totals: BTreeMap<String, f64>,
    pub total: f64,
    #[serde(rename = "rawText")]
    pub raw_text: String,
}

impl DatasetSlot {
    pub fn new(result: &AggregateResult, raw_text: &str) -> Self {
        DatasetSlot {
            totals: result.totals_map(),
            total: result.grand_total,
            raw_text: raw_text.to_string(),
        }
    }

    /// True when the parse this slot came from matched nothing.
    pub fn is_empty(&self) -> bool {
        self.total == 0.0
    }

    /// Rebuild the aggregate without re-parsing. Groups are put back in table
    /// order; groups the table does not know follow alphabetically.
    pub fn to_aggregate(&self, table: &ClassificationTable) -> AggregateResult {
        let mut totals: Vec<(&String, f64)> = self.totals.iter().map(|(g, t)| (g, *t)).collect();
        totals.sort_by_key(|(group, _)| table.group_position(group).unwrap_or(usize::MAX));
        AggregateResult::from_ordered_totals(totals.into_iter().map(|(g, t)| (g.clone(), t)))
    }

    /// Parse the stored text again, e.g. after a table change.
    pub fn reparse(&self, table: &ClassificationTable) -> AggregateResult {
        aggregate(parse_records(&self.raw_text), table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursMode {
    Single,
    Comparison,
}

/// Transaction KPIs as persisted by the snapshot dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelPackage {
    pub excel: ExcelKpis,
    pub timestamp: DateTime<Utc>,
    pub file_name: String,
}

impl ExcelPackage {
    pub fn new(excel: ExcelKpis, file_name: &str) -> Self {
        ExcelPackage {
            excel,
            timestamp: Utc::now(),
            file_name: file_name.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredExcel {
    Package(Box<ExcelPackage>),
    Bare(Box<ExcelKpis>),
}

impl StoredExcel {
    fn into_kpis(self) -> ExcelKpis {
        match self {
            StoredExcel::Package(p) => p.excel,
            StoredExcel::Bare(kpis) => *kpis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::builtin;

    fn sample_result() -> AggregateResult {
        let table = builtin::hours().unwrap();
        aggregate(parse_records("Unloader\t3\nVAS\t5\nReceiving\t2\n"), &table)
    }

    #[test]
    fn test_save_and_load() {
        let mut store = SlotStore::in_memory();
        let slot = DatasetSlot::new(&sample_result(), "raw");
        store.save(HOURS_SINGLE, &slot).unwrap();
        let loaded: DatasetSlot = store.load(HOURS_SINGLE).unwrap().unwrap();
        assert_eq!(loaded, slot);
    }

    #[test]
    fn test_dataset_slot_layout() {
        let slot = DatasetSlot::new(&sample_result(), "VAS\t5");
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["total"], 10.0);
        assert_eq!(json["totals"]["VAS"], 5.0);
        assert_eq!(json["rawText"], "VAS\t5");
    }

    #[test]
    fn test_restore_keeps_table_order() {
        let table = builtin::hours().unwrap();
        let original = sample_result();
        let restored = DatasetSlot::new(&original, "").to_aggregate(&table);
        assert_eq!(restored, original);
    }

    #[test]
    fn test_reparse_from_raw_text() {
        let table = builtin::hours().unwrap();
        let slot = DatasetSlot {
            totals: BTreeMap::new(),
            total: 0.0,
            raw_text: "VAS\t5".into(),
        };
        assert_eq!(slot.reparse(&table).get("VAS"), Some(5.0));
    }

    #[test]
    fn test_empty_parse_keeps_previous_slot() {
        let table = builtin::hours().unwrap();
        let mut store = SlotStore::in_memory();
        let good = DatasetSlot::new(&sample_result(), "Unloader\t3\nVAS\t5\nReceiving\t2\n");
        assert!(store.save_hours(&good, None).unwrap());

        let text = "nothing here\n";
        let empty = DatasetSlot::new(&aggregate(parse_records(text), &table), text);
        assert!(empty.is_empty());
        assert!(!store.save_hours(&empty, None).unwrap());

        let kept: DatasetSlot = store.load(HOURS_SINGLE).unwrap().unwrap();
        assert_eq!(kept, good);
    }

    #[test]
    fn test_comparison_saves_only_matching_sides() {
        let mut store = SlotStore::in_memory();
        store.save(HOURS_MODE, &HoursMode::Single).unwrap();
        let empty = DatasetSlot::new(&AggregateResult::default(), "");
        let good = DatasetSlot::new(&sample_result(), "raw");

        assert!(!store.save_hours(&empty, Some(&empty)).unwrap());
        let mode: Option<HoursMode> = store.load(HOURS_MODE).unwrap();
        assert_eq!(mode, Some(HoursMode::Single));

        assert!(store.save_hours(&good, Some(&empty)).unwrap());
        let mode: Option<HoursMode> = store.load(HOURS_MODE).unwrap();
        assert_eq!(mode, Some(HoursMode::Comparison));
        assert!(store.raw(HOURS_DATASET_A).unwrap().is_none());
        assert!(store.raw(HOURS_DATASET_B).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_slot_discarded() {
        let mut backend = MemoryBackend::default();
        backend.write(HOURS_SINGLE, "{ not json").unwrap();
        let mut store = SlotStore::new(backend);
        let loaded: Option<DatasetSlot> = store.load(HOURS_SINGLE).unwrap();
        assert!(loaded.is_none());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_discarded() {
        let mut store = SlotStore::in_memory();
        store.save(HOURS_SINGLE, &vec![1, 2, 3]).unwrap();
        let loaded: Option<DatasetSlot> = store.load(HOURS_SINGLE).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_clear_dashboard() {
        let mut store = SlotStore::in_memory();
        store.save(HOURS_MODE, &HoursMode::Comparison).unwrap();
        store.save(PPA_FILE, &Vec::<u8>::new()).unwrap();
        store.clear(Dashboard::Hours).unwrap();
        assert_eq!(store.keys().unwrap(), vec![PPA_FILE.to_string()]);
    }

    #[test]
    fn test_excel_package_and_bare() {
        let mut store = SlotStore::in_memory();
        let kpis = ExcelKpis {
            type152_count: 7,
            ..Default::default()
        };
        store
            .save(SNAPSHOT_EXCEL, &ExcelPackage::new(kpis.clone(), "tx.xlsx"))
            .unwrap();
        assert_eq!(store.load_excel().unwrap(), Some(kpis.clone()));

        store.save(SNAPSHOT_EXCEL, &kpis).unwrap();
        assert_eq!(store.load_excel().unwrap(), Some(kpis));
    }

    #[test]
    fn test_excel_package_timestamp_format() {
        let json = serde_json::json!({
            "excel": ExcelKpis::default(),
            "timestamp": "2024-03-01T08:30:00.000Z",
            "fileName": "tx.xlsx"
        });
        let package: ExcelPackage = serde_json::from_value(json).unwrap();
        assert_eq!(package.file_name, "tx.xlsx");
        assert_eq!(package.timestamp.to_rfc3339(), "2024-03-01T08:30:00+00:00");
    }

    #[test]
    fn test_dir_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SlotStore::in_dir(dir.path()).unwrap();
        store.save(HOURS_MODE, &HoursMode::Single).unwrap();
        assert!(dir.path().join("hoursBreakdown_mode.json").exists());
        let mode: Option<HoursMode> = store.load(HOURS_MODE).unwrap();
        assert_eq!(mode, Some(HoursMode::Single));
        store.remove(HOURS_MODE).unwrap();
        store.remove(HOURS_MODE).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_dir_backend_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = DirBackend::new(dir.path()).unwrap();
        assert!(backend.read("../etc").is_err());
    }

    #[test]
    fn test_dashboard_from_str() {
        assert_eq!("Snapshot".parse::<Dashboard>().unwrap(), Dashboard::Snapshot);
        assert!("other".parse::<Dashboard>().is_err());
    }
}
