use crate::aggregate::compare::{compare, ComparisonRow};
use crate::aggregate::AggregateResult;
use crate::config::Thresholds;
use crate::join::volume::{volume_join, ItemMaster, VolumeAnalysis};
use crate::join::JoinSlots;
use crate::kpi::excel::ExcelKpis;
use crate::kpi::{calculate_kpis, KpiResults};
use crate::model::{LaborReport, PickRecord};

/// Reach-truck picks waiting for, or joined with, the item master.
///
/// Whichever side arrives second triggers the join; a replaced side re-runs it.
#[derive(Debug, Clone)]
pub struct VolumeSession {
    sides: JoinSlots<Vec<PickRecord>, ItemMaster>,
    small_threshold: f64,
    result: Option<VolumeAnalysis>,
}

impl VolumeSession {
    pub fn new(thresholds: &Thresholds) -> Self {
        VolumeSession {
            sides: JoinSlots::new(),
            small_threshold: thresholds.small_volume_cubic,
            result: None,
        }
    }

    pub fn on_picks_available(&mut self, picks: Vec<PickRecord>) -> Option<&VolumeAnalysis> {
        self.sides.set_left(picks);
        self.rerun()
    }

    /// An empty item master counts as not loaded.
    pub fn on_item_master_available(&mut self, master: ItemMaster) -> Option<&VolumeAnalysis> {
        if master.is_empty() {
            tracing::warn!("item master is empty; volume analysis stays deferred");
            return self.result.as_ref();
        }
        self.sides.set_right(master);
        self.rerun()
    }

    pub fn result(&self) -> Option<&VolumeAnalysis> {
        self.result.as_ref()
    }

    pub fn is_deferred(&self) -> bool {
        self.sides.left().is_some() && self.sides.right().is_none()
    }

    fn rerun(&mut self) -> Option<&VolumeAnalysis> {
        self.result = match self.sides.pair() {
            Some((picks, master)) => Some(volume_join(picks, master, self.small_threshold)),
            None => {
                if self.is_deferred() {
                    tracing::warn!("volume analysis deferred until the item master loads");
                }
                None
            }
        };
        self.result.as_ref()
    }
}

/// Baseline and current hours aggregates for side-by-side comparison.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    sides: JoinSlots<AggregateResult, AggregateResult>,
    noise_floor: f64,
    rows: Option<Vec<ComparisonRow>>,
}

impl ComparisonSession {
    pub fn new(thresholds: &Thresholds) -> Self {
        ComparisonSession {
            sides: JoinSlots::new(),
            noise_floor: thresholds.comparison_noise_floor,
            rows: None,
        }
    }

    pub fn on_baseline_available(&mut self, baseline: AggregateResult) -> Option<&[ComparisonRow]> {
        self.sides.set_left(baseline);
        self.rerun()
    }

    pub fn on_current_available(&mut self, current: AggregateResult) -> Option<&[ComparisonRow]> {
        self.sides.set_right(current);
        self.rerun()
    }

    pub fn rows(&self) -> Option<&[ComparisonRow]> {
        self.rows.as_deref()
    }

    pub fn baseline(&self) -> Option<&AggregateResult> {
        self.sides.left()
    }

    pub fn current(&self) -> Option<&AggregateResult> {
        self.sides.right()
    }

    fn rerun(&mut self) -> Option<&[ComparisonRow]> {
        self.rows = self
            .sides
            .pair()
            .map(|(baseline, current)| compare(baseline, current, self.noise_floor));
        self.rows.as_deref()
    }
}

/// Transaction export and labor report of the snapshot dashboard.
///
/// Results are recomputed whenever either side arrives; the combined part
/// needs both.
#[derive(Debug, Clone)]
pub struct SnapshotSession {
    sides: JoinSlots<ExcelKpis, LaborReport>,
    thresholds: Thresholds,
    results: Option<KpiResults>,
}

impl SnapshotSession {
    pub fn new(thresholds: Thresholds) -> Self {
        SnapshotSession {
            sides: JoinSlots::new(),
            thresholds,
            results: None,
        }
    }

    pub fn on_excel_available(&mut self, excel: ExcelKpis) -> Option<&KpiResults> {
        self.sides.set_left(excel);
        self.rerun()
    }

    pub fn on_labor_available(&mut self, labor: LaborReport) -> Option<&KpiResults> {
        self.sides.set_right(labor);
        self.rerun()
    }

    pub fn excel(&self) -> Option<&ExcelKpis> {
        self.sides.left()
    }

    pub fn labor(&self) -> Option<&LaborReport> {
        self.sides.right()
    }

    pub fn results(&self) -> Option<&KpiResults> {
        self.results.as_ref()
    }

    pub fn clear(&mut self) {
        self.sides.clear();
        self.results = None;
    }

    fn rerun(&mut self) -> Option<&KpiResults> {
        self.results = calculate_kpis(self.sides.left(), self.sides.right(), &self.thresholds);
        self.results.as_ref()
    }
}
