use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThresholdError {
    #[error("failed to read thresholds from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid thresholds JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("inverted range for {field}: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("proximity tolerance must be positive, got ({x}, {y})")]
    NonPositiveTolerance { x: f64, y: f64 },
}

/// Inclusive angle range in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
}

impl AngleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, degrees: f64) -> bool {
        degrees >= self.min && degrees <= self.max
    }
}

pub const HORIZONTAL_TOLERANCE: f64 = 30.0;
pub const VERTICAL_TOLERANCE: f64 = 40.0;

const NOMINAL_SCREEN_WIDTH: f64 = 1080.0;
const NOMINAL_SCREEN_HEIGHT: f64 = 1920.0;

/// Spatial window the face center must fall into before angle
/// classification applies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityGate {
    pub center_x: f64,
    pub center_y: f64,
    pub tolerance_x: f64,
    pub tolerance_y: f64,
}

impl ProximityGate {
    /// Reference point for a given screen: horizontal center, slightly
    /// above vertical center (the capture ring sits at height / 2.5).
    pub fn for_screen(width: f64, height: f64) -> Self {
        Self {
            center_x: width / 2.0,
            center_y: height / 2.5,
            tolerance_x: HORIZONTAL_TOLERANCE,
            tolerance_y: VERTICAL_TOLERANCE,
        }
    }

    pub fn admits(&self, cx: f64, cy: f64) -> bool {
        (cx - self.center_x).abs() <= self.tolerance_x
            && (cy - self.center_y).abs() <= self.tolerance_y
    }
}

impl Default for ProximityGate {
    fn default() -> Self {
        Self::for_screen(NOMINAL_SCREEN_WIDTH, NOMINAL_SCREEN_HEIGHT)
    }
}

/// The five-zone angle-range table plus the proximity gate.
///
/// The numeric values are empirically tuned, not invariants: deployments
/// override them via JSON without code changes. `Default` carries the
/// production table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneThresholds {
    pub proximity: ProximityGate,
    pub center_yaw: AngleRange,
    pub center_pitch: AngleRange,
    pub center_roll: AngleRange,
    pub left_yaw: AngleRange,
    pub left_pitch: AngleRange,
    pub right_yaw: AngleRange,
    pub right_pitch: AngleRange,
    pub upper_pitch: AngleRange,
    pub upper_yaw: AngleRange,
    pub upper_roll: AngleRange,
    pub bottom_pitch: AngleRange,
    pub bottom_yaw: AngleRange,
    pub bottom_roll: AngleRange,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            proximity: ProximityGate::default(),
            center_yaw: AngleRange::new(-5.0, 5.0),
            center_pitch: AngleRange::new(-5.0, 30.0),
            center_roll: AngleRange::new(-5.0, 5.0),
            left_yaw: AngleRange::new(10.0, 60.0),
            left_pitch: AngleRange::new(-5.0, 25.0),
            right_yaw: AngleRange::new(-60.0, -20.0),
            right_pitch: AngleRange::new(-5.0, 25.0),
            upper_pitch: AngleRange::new(20.0, 60.0),
            upper_yaw: AngleRange::new(-15.0, 15.0),
            upper_roll: AngleRange::new(-15.0, 15.0),
            bottom_pitch: AngleRange::new(-30.0, -8.0),
            bottom_yaw: AngleRange::new(-15.0, 15.0),
            bottom_roll: AngleRange::new(-15.0, 15.0),
        }
    }
}

impl ZoneThresholds {
    /// Load and validate a threshold table from a JSON file. Missing fields
    /// fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ThresholdError> {
        let text = fs::read_to_string(path).map_err(|source| ThresholdError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let thresholds: Self = serde_json::from_str(&text)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.proximity.tolerance_x <= 0.0 || self.proximity.tolerance_y <= 0.0 {
            return Err(ThresholdError::NonPositiveTolerance {
                x: self.proximity.tolerance_x,
                y: self.proximity.tolerance_y,
            });
        }
        let ranges: [(&'static str, &AngleRange); 13] = [
            ("center_yaw", &self.center_yaw),
            ("center_pitch", &self.center_pitch),
            ("center_roll", &self.center_roll),
            ("left_yaw", &self.left_yaw),
            ("left_pitch", &self.left_pitch),
            ("right_yaw", &self.right_yaw),
            ("right_pitch", &self.right_pitch),
            ("upper_pitch", &self.upper_pitch),
            ("upper_yaw", &self.upper_yaw),
            ("upper_roll", &self.upper_roll),
            ("bottom_pitch", &self.bottom_pitch),
            ("bottom_yaw", &self.bottom_yaw),
            ("bottom_roll", &self.bottom_roll),
        ];
        for (field, range) in ranges {
            if range.min > range.max {
                return Err(ThresholdError::InvertedRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_range_is_inclusive() {
        let r = AngleRange::new(-5.0, 5.0);
        assert!(r.contains(-5.0));
        assert!(r.contains(5.0));
        assert!(r.contains(0.0));
        assert!(!r.contains(5.01));
        assert!(!r.contains(-5.01));
    }

    #[test]
    fn test_proximity_gate_for_screen() {
        let gate = ProximityGate::for_screen(1080.0, 1920.0);
        assert_relative_eq!(gate.center_x, 540.0);
        assert_relative_eq!(gate.center_y, 768.0);
        assert_relative_eq!(gate.tolerance_x, 30.0);
        assert_relative_eq!(gate.tolerance_y, 40.0);
    }

    #[test]
    fn test_proximity_gate_window_is_inclusive() {
        let gate = ProximityGate::for_screen(1080.0, 1920.0);
        assert!(gate.admits(540.0, 768.0));
        assert!(gate.admits(570.0, 808.0));
        assert!(gate.admits(510.0, 728.0));
        assert!(!gate.admits(570.1, 768.0));
        assert!(!gate.admits(540.0, 808.1));
    }

    #[test]
    fn test_default_table_matches_tuned_values() {
        let t = ZoneThresholds::default();
        assert_eq!(t.center_yaw, AngleRange::new(-5.0, 5.0));
        assert_eq!(t.center_pitch, AngleRange::new(-5.0, 30.0));
        assert_eq!(t.left_yaw, AngleRange::new(10.0, 60.0));
        assert_eq!(t.right_yaw, AngleRange::new(-60.0, -20.0));
        assert_eq!(t.upper_pitch, AngleRange::new(20.0, 60.0));
        assert_eq!(t.bottom_pitch, AngleRange::new(-30.0, -8.0));
    }

    #[test]
    fn test_default_table_validates() {
        ZoneThresholds::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_overrides_fall_back_to_defaults() {
        let json = r#"{ "left_yaw": { "min": 15.0, "max": 50.0 } }"#;
        let t: ZoneThresholds = serde_json::from_str(json).unwrap();
        assert_eq!(t.left_yaw, AngleRange::new(15.0, 50.0));
        assert_eq!(t.right_yaw, ZoneThresholds::default().right_yaw);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut t = ZoneThresholds::default();
        t.upper_pitch = AngleRange::new(60.0, 20.0);
        let err = t.validate().unwrap_err();
        assert!(matches!(
            err,
            ThresholdError::InvertedRange {
                field: "upper_pitch",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_tolerance() {
        let mut t = ZoneThresholds::default();
        t.proximity.tolerance_y = 0.0;
        assert!(matches!(
            t.validate().unwrap_err(),
            ThresholdError::NonPositiveTolerance { .. }
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thresholds.json");
        std::fs::write(&path, r#"{ "bottom_pitch": { "min": -30.0, "max": -10.0 } }"#).unwrap();

        let t = ZoneThresholds::from_json_file(&path).unwrap();
        assert_eq!(t.bottom_pitch, AngleRange::new(-30.0, -10.0));
    }

    #[test]
    fn test_from_json_file_missing_file() {
        let err = ZoneThresholds::from_json_file(Path::new("/nonexistent/t.json")).unwrap_err();
        assert!(matches!(err, ThresholdError::Read { .. }));
    }

    #[test]
    fn test_from_json_file_rejects_invalid_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thresholds.json");
        std::fs::write(&path, r#"{ "left_yaw": { "min": 60.0, "max": 10.0 } }"#).unwrap();

        assert!(matches!(
            ZoneThresholds::from_json_file(&path).unwrap_err(),
            ThresholdError::InvertedRange { .. }
        ));
    }
}
