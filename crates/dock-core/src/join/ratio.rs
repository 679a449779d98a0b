use crate::config::{TphBands, TplhBands, VarianceBands};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `amount / hours`, or 0 when no hours were worked.
pub fn per_hour(amount: f64, hours: f64) -> f64 {
    if hours == 0.0 {
        0.0
    } else {
        amount / hours
    }
}

/// Relative deviation of `actual` from `reported`, in percent.
///
/// None when `reported` is 0 (shown as "N/A").
pub fn variance(actual: f64, reported: f64) -> Option<f64> {
    if reported == 0.0 {
        None
    } else {
        Some((actual - reported) / reported * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Balanced,
    Imbalanced,
}

/// Two counts are balanced when their gap is under `tolerance` of the larger one.
pub fn balance_status(a: f64, b: f64, tolerance: f64) -> BalanceStatus {
    let max = a.max(b);
    if a == b || (max != 0.0 && (a - b).abs() / max < tolerance) {
        BalanceStatus::Balanced
    } else {
        BalanceStatus::Imbalanced
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TplhRating {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

pub fn rate_tplh(tplh: f64, bands: &TplhBands) -> TplhRating {
    if tplh >= bands.excellent {
        TplhRating::Excellent
    } else if tplh >= bands.good {
        TplhRating::Good
    } else if tplh >= bands.fair {
        TplhRating::Fair
    } else if tplh >= bands.poor {
        TplhRating::Poor
    } else {
        TplhRating::Critical
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TphRating {
    AboveTarget,
    OnTarget,
    BelowTarget,
    WellBelowTarget,
}

pub fn rate_tph(tph: f64, bands: &TphBands) -> TphRating {
    if tph >= bands.above_target {
        TphRating::AboveTarget
    } else if tph >= bands.on_target {
        TphRating::OnTarget
    } else if tph >= bands.below_target {
        TphRating::BelowTarget
    } else {
        TphRating::WellBelowTarget
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceRating {
    Excellent,
    Acceptable,
    Poor,
    Critical,
}

/// Rate the magnitude of a variance; None stays None.
pub fn rate_variance(variance: Option<f64>, bands: &VarianceBands) -> Option<VarianceRating> {
    let v = variance?.abs();
    let rating = if v <= bands.excellent {
        VarianceRating::Excellent
    } else if v <= bands.acceptable {
        VarianceRating::Acceptable
    } else if v <= bands.poor {
        VarianceRating::Poor
    } else {
        VarianceRating::Critical
    };
    Some(rating)
}

impl fmt::Display for TplhRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TplhRating::Excellent => "Excellent",
            TplhRating::Good => "Good",
            TplhRating::Fair => "Fair",
            TplhRating::Poor => "Poor",
            TplhRating::Critical => "Critical",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for TphRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TphRating::AboveTarget => "Above target",
            TphRating::OnTarget => "On target",
            TphRating::BelowTarget => "Below target",
            TphRating::WellBelowTarget => "Well below target",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for VarianceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VarianceRating::Excellent => "Excellent",
            VarianceRating::Acceptable => "Acceptable",
            VarianceRating::Poor => "Poor",
            VarianceRating::Critical => "Critical",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStatus::Balanced => write!(f, "balanced"),
            BalanceStatus::Imbalanced => write!(f, "imbalanced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;

    #[test]
    fn test_per_hour_zero_hours() {
        assert_eq!(per_hour(50.0, 0.0), 0.0);
        assert_eq!(per_hour(50.0, 10.0), 5.0);
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(110.0, 100.0), Some(10.0));
        assert_eq!(variance(90.0, 100.0), Some(-10.0));
        assert_eq!(variance(5.0, 0.0), None);
    }

    #[test]
    fn test_balance() {
        assert_eq!(balance_status(1000.0, 1050.0, 0.05), BalanceStatus::Balanced);
        assert_eq!(balance_status(1000.0, 1100.0, 0.05), BalanceStatus::Imbalanced);
        assert_eq!(balance_status(0.0, 0.0, 0.05), BalanceStatus::Balanced);
        assert_eq!(balance_status(0.0, 3.0, 0.05), BalanceStatus::Imbalanced);
    }

    #[test]
    fn test_balance_is_symmetric() {
        for (a, b) in [(1.0, 2.0), (100.0, 104.0), (7.0, 0.0)] {
            assert_eq!(balance_status(a, b, 0.05), balance_status(b, a, 0.05));
        }
    }

    #[test]
    fn test_tplh_bands() {
        let bands = Thresholds::default().tplh;
        assert_eq!(rate_tplh(25.0, &bands), TplhRating::Excellent);
        assert_eq!(rate_tplh(20.0, &bands), TplhRating::Excellent);
        assert_eq!(rate_tplh(16.5, &bands), TplhRating::Good);
        assert_eq!(rate_tplh(12.0, &bands), TplhRating::Fair);
        assert_eq!(rate_tplh(9.0, &bands), TplhRating::Poor);
        assert_eq!(rate_tplh(3.0, &bands), TplhRating::Critical);
    }

    #[test]
    fn test_tph_bands() {
        let bands = Thresholds::default().tph;
        assert_eq!(rate_tph(160.0, &bands), TphRating::AboveTarget);
        assert_eq!(rate_tph(120.0, &bands), TphRating::OnTarget);
        assert_eq!(rate_tph(90.0, &bands), TphRating::BelowTarget);
        assert_eq!(rate_tph(10.0, &bands), TphRating::WellBelowTarget);
    }

    #[test]
    fn test_variance_bands() {
        let bands = Thresholds::default().variance;
        assert_eq!(rate_variance(Some(-4.0), &bands), Some(VarianceRating::Excellent));
        assert_eq!(rate_variance(Some(12.0), &bands), Some(VarianceRating::Acceptable));
        assert_eq!(rate_variance(Some(-18.0), &bands), Some(VarianceRating::Poor));
        assert_eq!(rate_variance(Some(40.0), &bands), Some(VarianceRating::Critical));
        assert_eq!(rate_variance(None, &bands), None);
    }
}
