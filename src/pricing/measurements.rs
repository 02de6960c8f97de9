//! Roof measurements supplied for one estimate

use serde::{Deserialize, Serialize};

/// Largest area (sqft) or run length (lf) taken from input; larger values are capped
pub const MAX_MEASUREMENT: f64 = 1.0e9;

/// Largest waste or markup percentage taken from input
pub const MAX_PERCENT: f64 = 1.0e4;

/// Coerce a raw number to a usable measurement: non-finite or negative becomes 0
pub fn coerce(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse free-form numeric text the way an input field would: anything that is
/// not a finite, non-negative number becomes 0
pub fn coerce_str(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(coerce).unwrap_or(0.0)
}

/// Area and linear-foot measurements for one roof
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementSet {
    /// Roof area in square feet
    pub area: f64,
    /// Waste allowance applied to panels only
    pub waste_pct: f64,
    pub hips: f64,
    pub ridges: f64,
    /// Gable rakes
    pub gables: f64,
    /// Eaves, bought as drip edge
    pub eaves: f64,
    pub valleys: f64,
    pub sidewalls: f64,
    pub endwalls: f64,
    pub transitions: f64,
}

impl MeasurementSet {
    /// Create a measurement set with only an area
    pub fn with_area(area: f64) -> Self {
        Self {
            area,
            ..Default::default()
        }
    }

    /// Copy with every field coerced to a finite, non-negative value and
    /// capped so derived quantities stay finite
    pub fn sanitized(&self) -> Self {
        let length = |v: f64| coerce(v).min(MAX_MEASUREMENT);
        Self {
            area: length(self.area),
            waste_pct: coerce(self.waste_pct).min(MAX_PERCENT),
            hips: length(self.hips),
            ridges: length(self.ridges),
            gables: length(self.gables),
            eaves: length(self.eaves),
            valleys: length(self.valleys),
            sidewalls: length(self.sidewalls),
            endwalls: length(self.endwalls),
            transitions: length(self.transitions),
        }
    }

    /// Area inflated by the waste percentage; the basis for panel quantities
    pub fn effective_area(&self) -> f64 {
        let m = self.sanitized();
        m.area * (1.0 + m.waste_pct / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce() {
        assert_eq!(coerce(12.5), 12.5);
        assert_eq!(coerce(-3.0), 0.0);
        assert_eq!(coerce(f64::NAN), 0.0);
        assert_eq!(coerce(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_coerce_str() {
        assert_eq!(coerce_str(" 42 "), 42.0);
        assert_eq!(coerce_str("1e3"), 1000.0);
        assert_eq!(coerce_str("abc"), 0.0);
        assert_eq!(coerce_str(""), 0.0);
        assert_eq!(coerce_str("-7"), 0.0);
        assert_eq!(coerce_str("inf"), 0.0);
    }

    #[test]
    fn test_sanitized_clamps_every_field() {
        let m = MeasurementSet {
            area: -1.0,
            waste_pct: f64::NAN,
            hips: 10.0,
            transitions: f64::NEG_INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(m.area, 0.0);
        assert_eq!(m.waste_pct, 0.0);
        assert_eq!(m.hips, 10.0);
        assert_eq!(m.transitions, 0.0);
    }

    #[test]
    fn test_sanitized_caps_huge_values() {
        let m = MeasurementSet {
            area: 1e308,
            waste_pct: f64::MAX,
            hips: 5e300,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(m.area, MAX_MEASUREMENT);
        assert_eq!(m.waste_pct, MAX_PERCENT);
        assert_eq!(m.hips, MAX_MEASUREMENT);
        assert!(m.effective_area().is_finite());
    }

    #[test]
    fn test_effective_area() {
        let m = MeasurementSet {
            area: 1000.0,
            waste_pct: 10.0,
            ..Default::default()
        };
        assert!((m.effective_area() - 1100.0).abs() < 1e-9);
        assert_eq!(MeasurementSet::default().effective_area(), 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let m: MeasurementSet = serde_json::from_str(r#"{"area": 500, "legacy": true}"#).unwrap();
        assert_eq!(m.area, 500.0);
        assert_eq!(m.hips, 0.0);
    }
}
