//! Reference decay curve for a single patch application.
//!
//! Index `n` of the curve is the concentration contribution `n` whole hours
//! after one patch was applied at time 0. The curve is validated once on
//! construction and then shared read-only by every simulation.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

/// One week of hourly values, bundled with the crate
const BUILTIN_CURVE_JSON: &str = include_str!("../data/reference_curve.json");

static BUILTIN_CURVE: Lazy<std::result::Result<ReferenceCurve, String>> =
    Lazy::new(|| ReferenceCurve::from_json_str(BUILTIN_CURVE_JSON).map_err(|e| e.to_string()));

/// Immutable, cheaply clonable reference curve.
///
/// Always holds at least one value, and every value is finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceCurve {
    values: Arc<[f64]>,
}

impl ReferenceCurve {
    /// Validate and wrap a sequence of hourly values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::MalformedReferenceCurve(
                "curve must contain at least one value".into(),
            ));
        }

        if let Some((hour, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(Error::MalformedReferenceCurve(format!(
                "value {} at hour {} is not a finite non-negative number",
                value, hour
            )));
        }

        Ok(Self {
            values: values.into(),
        })
    }

    /// Parse a curve from a JSON array of numbers
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let values: Vec<f64> = serde_json::from_str(contents).map_err(|e| {
            Error::MalformedReferenceCurve(format!("expected a JSON array of numbers: {}", e))
        })?;
        Self::new(values)
    }

    /// Load a curve from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let curve = Self::from_json_str(&contents)?;
        tracing::info!(
            "Loaded reference curve with {} hourly values from {:?}",
            curve.len(),
            path
        );
        Ok(curve)
    }

    /// The curve bundled with the crate (parsed once, shared afterwards)
    pub fn builtin() -> Result<Self> {
        match &*BUILTIN_CURVE {
            Ok(curve) => Ok(curve.clone()),
            Err(e) => Err(Error::MalformedReferenceCurve(format!(
                "bundled curve is invalid: {}",
                e
            ))),
        }
    }

    /// Number of tabulated hours
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty curves
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Direct lookup at `elapsed` hours; None before application or past the table
    pub fn get(&self, elapsed: i64) -> Option<f64> {
        usize::try_from(elapsed)
            .ok()
            .and_then(|index| self.values.get(index).copied())
    }

    /// Final tabulated value, the base of the post-wear taper
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Highest value and the first hour it occurs at
    pub fn peak(&self) -> (usize, f64) {
        self.values
            .iter()
            .copied()
            .enumerate()
            .fold((0, self.values[0]), |best, (hour, value)| {
                if value > best.1 {
                    (hour, value)
                } else {
                    best
                }
            })
    }

    /// All tabulated values, hour 0 first
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_curve_is_one_week() {
        let curve = ReferenceCurve::builtin().unwrap();
        assert_eq!(curve.len(), 168);
        assert!(curve.last() > 0.0);
    }

    #[test]
    fn test_builtin_curve_is_shared() {
        let a = ReferenceCurve::builtin().unwrap();
        let b = ReferenceCurve::builtin().unwrap();
        assert!(Arc::ptr_eq(&a.values, &b.values));
    }

    #[test]
    fn test_empty_curve_rejected() {
        let result = ReferenceCurve::new(vec![]);
        assert!(matches!(result, Err(Error::MalformedReferenceCurve(_))));

        let result = ReferenceCurve::from_json_str("[]");
        assert!(matches!(result, Err(Error::MalformedReferenceCurve(_))));
    }

    #[test]
    fn test_non_numeric_curve_rejected() {
        for json in [r#"[1.0, "two", 3.0]"#, "[1.0, null]", r#"{"values": [1.0]}"#, "not json"] {
            let result = ReferenceCurve::from_json_str(json);
            assert!(
                matches!(result, Err(Error::MalformedReferenceCurve(_))),
                "expected rejection for {}",
                json
            );
        }
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(ReferenceCurve::new(vec![1.0, -0.5]).is_err());
        assert!(ReferenceCurve::new(vec![f64::NAN]).is_err());
        assert!(ReferenceCurve::new(vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_lookup_bounds() {
        let curve = ReferenceCurve::new(vec![10.0, 5.0, 0.0]).unwrap();
        assert_eq!(curve.get(-1), None);
        assert_eq!(curve.get(0), Some(10.0));
        assert_eq!(curve.get(2), Some(0.0));
        assert_eq!(curve.get(3), None);
        assert_eq!(curve.last(), 0.0);
    }

    #[test]
    fn test_peak_reports_first_maximum() {
        let curve = ReferenceCurve::new(vec![1.0, 4.0, 2.0, 4.0]).unwrap();
        assert_eq!(curve.peak(), (1, 4.0));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("curve.json");
        std::fs::write(&path, "[0, 12.5, 7.25]").unwrap();

        let curve = ReferenceCurve::load(&path).unwrap();
        assert_eq!(curve.values(), &[0.0, 12.5, 7.25]);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = ReferenceCurve::load(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
