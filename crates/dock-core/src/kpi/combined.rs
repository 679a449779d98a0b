use crate::config::Thresholds;
use crate::join::ratio::{
    balance_status, per_hour, rate_tph, rate_tplh, rate_variance, variance, BalanceStatus,
    TphRating, TplhRating, VarianceRating,
};
use crate::kpi::excel::ExcelKpis;
use crate::kpi::labor::LaborKpis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetComparison {
    pub inbound_labor_hours: f64,
    pub type152_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundDepartmentSummary {
    pub name: String,
    pub total_hours: f64,
    #[serde(rename = "laborUPH")]
    pub labor_uph: f64,
    #[serde(rename = "laborTPH")]
    pub labor_tph: f64,
    pub type152_transactions: usize,
    pub type152_units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Insight {
    /// Put transactions per labor hour against the labor system's own TPH.
    #[serde(rename_all = "camelCase")]
    ReceivingPut {
        metric: String,
        labor_hours: f64,
        transactions: usize,
        #[serde(rename = "actualTPLH")]
        actual_tplh: f64,
        #[serde(rename = "laborTPH")]
        labor_tph: f64,
        /// Percent; None when the labor TPH is 0.
        variance: Option<f64>,
    },
    /// Receipts against put-aways.
    #[serde(rename_all = "camelCase")]
    TransactionRatio {
        metric: String,
        type151_count: usize,
        type152_count: usize,
        ratio: f64,
        status: BalanceStatus,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRatings {
    pub tplh: TplhRating,
    pub tph: TphRating,
    #[serde(default)]
    pub variance: Option<VarianceRating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedKpis {
    pub dataset_comparison: DatasetComparison,
    #[serde(rename = "TPLH")]
    pub tplh: f64,
    #[serde(rename = "TPH")]
    pub tph: f64,
    pub inbound_department: InboundDepartmentSummary,
    #[serde(rename = "inboundEfficiencyInsights")]
    pub insights: Vec<Insight>,
    /// Present only when both TPLH and TPH are non-zero.
    #[serde(default)]
    pub ratings: Option<PerformanceRatings>,
}

/// Join inbound labor hours with type-152 transaction counts.
pub fn combined_kpis(labor: &LaborKpis, excel: &ExcelKpis, thresholds: &Thresholds) -> CombinedKpis {
    let dept = &labor.inbound_department;
    let hours = dept.total_hours;
    let count = excel.type152_count;
    let units = excel.type152_units;

    let tplh = per_hour(count as f64, hours);
    let tph = per_hour(units, hours);

    let insights = insights(labor, excel, thresholds);

    let ratings = if tplh != 0.0 && tph != 0.0 {
        let receiving_variance = insights.iter().find_map(|i| match i {
            Insight::ReceivingPut { variance, .. } => *variance,
            _ => None,
        });
        Some(PerformanceRatings {
            tplh: rate_tplh(tplh, &thresholds.tplh),
            tph: rate_tph(tph, &thresholds.tph),
            variance: rate_variance(receiving_variance, &thresholds.variance),
        })
    } else {
        None
    };

    tracing::info!(hours, count, tplh, tph, "joined labor and transaction data");

    CombinedKpis {
        dataset_comparison: DatasetComparison {
            inbound_labor_hours: hours,
            type152_records: excel.total_records,
        },
        tplh,
        tph,
        inbound_department: InboundDepartmentSummary {
            name: dept.name.clone(),
            total_hours: hours,
            labor_uph: dept.uph,
            labor_tph: dept.tph,
            type152_transactions: count,
            type152_units: units,
        },
        insights,
        ratings,
    }
}

fn insights(labor: &LaborKpis, excel: &ExcelKpis, thresholds: &Thresholds) -> Vec<Insight> {
    let dept = &labor.inbound_department;
    let mut insights = Vec::new();

    if excel.type152_count > 0 {
        let actual_tplh = per_hour(excel.type152_count as f64, dept.total_hours);
        insights.push(Insight::ReceivingPut {
            metric: "Type 152 TPLH (Inbound Put)".into(),
            labor_hours: dept.total_hours,
            transactions: excel.type152_count,
            actual_tplh,
            labor_tph: dept.tph,
            variance: variance(actual_tplh, dept.tph),
        });
    }

    let summary = &excel.inbound_transaction_summary;
    if summary.type151_count > 0 && summary.type152_count > 0 {
        let receipts = summary.type151_count as f64;
        let puts = summary.type152_count as f64;
        insights.push(Insight::TransactionRatio {
            metric: "Receipt vs Put Ratio".into(),
            type151_count: summary.type151_count,
            type152_count: summary.type152_count,
            ratio: puts / receipts,
            status: balance_status(receipts, puts, thresholds.balance_tolerance),
        });
    }

    insights
}
