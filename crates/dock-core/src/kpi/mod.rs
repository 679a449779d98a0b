pub mod combined;
pub mod excel;
pub mod labor;

use crate::config::Thresholds;
use crate::model::LaborReport;
use chrono::{DateTime, Utc};
use combined::{combined_kpis, CombinedKpis};
use excel::ExcelKpis;
use labor::{labor_kpis, LaborOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CombinedOutcome {
    Joined(Box<CombinedKpis>),
    Unavailable { error: String },
}

impl CombinedOutcome {
    pub fn kpis(&self) -> Option<&CombinedKpis> {
        match self {
            CombinedOutcome::Joined(kpis) => Some(kpis),
            CombinedOutcome::Unavailable { .. } => None,
        }
    }
}

/// Everything the snapshot dashboard shows. Each part is present only when
/// its inputs are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResults {
    pub labor: Option<LaborOutcome>,
    pub excel: Option<ExcelKpis>,
    pub combined: Option<CombinedOutcome>,
}

/// Compute snapshot KPIs from whichever sides are available.
///
/// Returns None when neither side is.
pub fn calculate_kpis(
    excel: Option<&ExcelKpis>,
    labor: Option<&LaborReport>,
    thresholds: &Thresholds,
) -> Option<KpiResults> {
    if excel.is_none() && labor.is_none() {
        return None;
    }

    let labor = labor.map(labor_kpis);
    let combined = match (labor.as_ref(), excel) {
        (Some(LaborOutcome::Inbound(l)), Some(e)) => Some(CombinedOutcome::Joined(Box::new(
            combined_kpis(l, e, thresholds),
        ))),
        (Some(LaborOutcome::Unavailable { .. }), Some(_)) => Some(CombinedOutcome::Unavailable {
            error: "No Inbound department found in labor data".into(),
        }),
        _ => None,
    };

    Some(KpiResults {
        labor,
        excel: excel.cloned(),
        combined,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub labor_loaded: bool,
    pub excel_loaded: bool,
    pub combined_analysis: bool,
}

/// Downloadable snapshot report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotExport {
    pub timestamp: DateTime<Utc>,
    pub kpi_results: KpiResults,
    pub summary: ExportSummary,
}

impl SnapshotExport {
    pub fn new(results: &KpiResults) -> Self {
        SnapshotExport {
            timestamp: Utc::now(),
            kpi_results: results.clone(),
            summary: ExportSummary {
                labor_loaded: results.labor.is_some(),
                excel_loaded: results.excel.is_some(),
                combined_analysis: results.combined.is_some(),
            },
        }
    }

    /// `inbound_snapshot_analysis_<date>.json`
    pub fn file_name(&self) -> String {
        format!(
            "inbound_snapshot_analysis_{}.json",
            self.timestamp.format("%Y-%m-%d")
        )
    }
}
