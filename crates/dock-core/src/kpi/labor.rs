use crate::aggregate::percent;
use crate::model::{LaborEntry, LaborReport};
use serde::{Deserialize, Serialize};

/// Area names containing one of these (case-insensitive) belong to inbound.
pub const INBOUND_AREA_KEYWORDS: &[&str] = &["inbound", "receiving", "putaway", "vas"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundArea {
    #[serde(flatten)]
    pub area: LaborEntry,
    /// Share of the inbound department's hours.
    pub hours_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborKpis {
    pub inbound_department: LaborEntry,
    pub total_hours: f64,
    pub total_units: i64,
    pub total_transactions: i64,
    #[serde(rename = "overallUPH")]
    pub overall_uph: f64,
    #[serde(rename = "overallTPH")]
    pub overall_tph: f64,
    #[serde(default)]
    pub inbound_areas: Vec<InboundArea>,
}

/// Labor-side result: inbound metrics, or the reason they are unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LaborOutcome {
    Inbound(LaborKpis),
    Unavailable { error: String },
}

impl LaborOutcome {
    pub fn kpis(&self) -> Option<&LaborKpis> {
        match self {
            LaborOutcome::Inbound(kpis) => Some(kpis),
            LaborOutcome::Unavailable { .. } => None,
        }
    }
}

/// First department whose name mentions "inbound".
pub fn find_inbound_department(report: &LaborReport) -> Option<&LaborEntry> {
    report
        .departments
        .iter()
        .find(|d| d.name.to_lowercase().contains("inbound"))
}

pub fn labor_kpis(report: &LaborReport) -> LaborOutcome {
    if report.departments.is_empty() {
        tracing::warn!("labor report has no departments");
        return LaborOutcome::Unavailable {
            error: "No labor departments found".into(),
        };
    }

    let Some(dept) = find_inbound_department(report) else {
        tracing::warn!(
            departments = report.departments.len(),
            "no inbound department in labor report"
        );
        return LaborOutcome::Unavailable {
            error: "No Inbound department found".into(),
        };
    };

    let inbound_areas = report
        .areas
        .iter()
        .filter(|area| {
            let name = area.name.to_lowercase();
            INBOUND_AREA_KEYWORDS.iter().any(|k| name.contains(k))
        })
        .map(|area| InboundArea {
            area: area.clone(),
            hours_percent: percent(area.total_hours, dept.total_hours),
        })
        .collect();

    LaborOutcome::Inbound(LaborKpis {
        inbound_department: dept.clone(),
        total_hours: dept.total_hours,
        total_units: dept.total_units,
        total_transactions: dept.total_transactions,
        overall_uph: dept.uph,
        overall_tph: dept.tph,
        inbound_areas,
    })
}
