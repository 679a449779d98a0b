use crate::error::DockError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const THRESHOLDS_JSON: &str = include_str!("../../../presets/thresholds.json");

/// Business thresholds used by the joins and ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Total cubic volume below which a reach-truck pick counts as small.
    pub small_volume_cubic: f64,
    /// Relative gap under which two counts are considered balanced.
    pub balance_tolerance: f64,
    /// Percent-point change under which a comparison is reported as unchanged.
    pub comparison_noise_floor: f64,
    pub tplh: TplhBands,
    pub tph: TphBands,
    pub variance: VarianceBands,
}

/// Transactions-per-labor-hour rating bands (lower bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TplhBands {
    pub poor: f64,
    pub fair: f64,
    pub good: f64,
    pub excellent: f64,
}

/// Units-per-labor-hour rating bands (lower bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TphBands {
    pub below_target: f64,
    pub on_target: f64,
    pub above_target: f64,
}

/// Absolute variance bands in percent (upper bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarianceBands {
    pub excellent: f64,
    pub acceptable: f64,
    pub poor: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            small_volume_cubic: 5000.0,
            balance_tolerance: 0.05,
            comparison_noise_floor: 0.1,
            tplh: TplhBands::default(),
            tph: TphBands::default(),
            variance: VarianceBands::default(),
        }
    }
}

impl Default for TplhBands {
    fn default() -> Self {
        TplhBands {
            poor: 8.0,
            fair: 12.0,
            good: 16.0,
            excellent: 20.0,
        }
    }
}

impl Default for TphBands {
    fn default() -> Self {
        TphBands {
            below_target: 80.0,
            on_target: 120.0,
            above_target: 150.0,
        }
    }
}

impl Default for VarianceBands {
    fn default() -> Self {
        VarianceBands {
            excellent: 5.0,
            acceptable: 15.0,
            poor: 20.0,
        }
    }
}

/// The thresholds shipped with the binary.
pub fn builtin_thresholds() -> Result<Thresholds, DockError> {
    parse_thresholds_str(THRESHOLDS_JSON)
}

/// Load thresholds from a JSON file. Omitted fields keep their defaults.
pub fn load_thresholds(path: &Path) -> Result<Thresholds, DockError> {
    let content = std::fs::read_to_string(path).map_err(|e| DockError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let thresholds: Thresholds =
        serde_json::from_str(&content).map_err(|e| DockError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_thresholds(&thresholds)?;
    Ok(thresholds)
}

pub fn parse_thresholds_str(json: &str) -> Result<Thresholds, DockError> {
    let thresholds: Thresholds = serde_json::from_str(json)?;
    validate_thresholds(&thresholds)?;
    Ok(thresholds)
}

pub fn validate_thresholds(t: &Thresholds) -> Result<(), DockError> {
    if !(t.small_volume_cubic > 0.0) {
        return Err(DockError::ConfigInvalid(
            "small_volume_cubic must be positive".into(),
        ));
    }
    if !(t.balance_tolerance > 0.0 && t.balance_tolerance < 1.0) {
        return Err(DockError::ConfigInvalid(
            "balance_tolerance must be between 0 and 1".into(),
        ));
    }
    if !(t.comparison_noise_floor >= 0.0) {
        return Err(DockError::ConfigInvalid(
            "comparison_noise_floor must not be negative".into(),
        ));
    }

    ascending("tplh", &[t.tplh.poor, t.tplh.fair, t.tplh.good, t.tplh.excellent])?;
    ascending(
        "tph",
        &[t.tph.below_target, t.tph.on_target, t.tph.above_target],
    )?;
    ascending(
        "variance",
        &[t.variance.excellent, t.variance.acceptable, t.variance.poor],
    )?;

    Ok(())
}

fn ascending(name: &str, bands: &[f64]) -> Result<(), DockError> {
    if bands.iter().any(|b| !(*b > 0.0)) {
        return Err(DockError::ConfigInvalid(format!(
            "{name} bands must be positive"
        )));
    }
    if bands.windows(2).any(|w| w[0] >= w[1]) {
        return Err(DockError::ConfigInvalid(format!(
            "{name} bands must be strictly ascending"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_matches_defaults() {
        assert_eq!(builtin_thresholds().unwrap(), Thresholds::default());
    }

    #[test]
    fn test_partial_override() {
        let t = parse_thresholds_str(r#"{ "small_volume_cubic": 2500 }"#).unwrap();
        assert_eq!(t.small_volume_cubic, 2500.0);
        assert_eq!(t.balance_tolerance, 0.05);
        assert_eq!(t.tplh.excellent, 20.0);
    }

    #[test]
    fn test_partial_band_override() {
        let t = parse_thresholds_str(r#"{ "tph": { "on_target": 110 } }"#).unwrap();
        assert_eq!(t.tph.on_target, 110.0);
        assert_eq!(t.tph.below_target, 80.0);
    }

    #[test]
    fn test_non_ascending_bands_rejected() {
        let result = parse_thresholds_str(r#"{ "tplh": { "poor": 12, "fair": 8 } }"#);
        assert!(matches!(result, Err(DockError::ConfigInvalid(_))));
    }

    #[test]
    fn test_bad_tolerance_rejected() {
        assert!(parse_thresholds_str(r#"{ "balance_tolerance": 0 }"#).is_err());
        assert!(parse_thresholds_str(r#"{ "balance_tolerance": 1.5 }"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_thresholds(Path::new("/nonexistent/thresholds.json"));
        assert!(matches!(result, Err(DockError::ConfigLoad { .. })));
    }
}
