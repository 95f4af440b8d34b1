//! Core domain types for the patch simulation.
//!
//! - `SimulationParameters`: the regimen being simulated
//! - `Sample`: one hour of the generated series

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters of a repeated patch regimen.
///
/// All durations are whole hours.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimulationParameters {
    /// Multiplier applied to every application (e.g. number of patches worn at once)
    #[serde(default = "default_patch_strength")]
    pub patch_strength: f64,

    /// Hours between successive applications; must be non-zero
    #[serde(default = "default_application_spacing")]
    pub application_spacing: u32,

    /// Total hours to simulate
    #[serde(default = "default_horizon")]
    pub horizon: u32,

    /// Hours a patch is worn before it starts tapering off
    #[serde(default = "default_wear_duration")]
    pub wear_duration: u32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            patch_strength: default_patch_strength(),
            application_spacing: default_application_spacing(),
            horizon: default_horizon(),
            wear_duration: default_wear_duration(),
        }
    }
}

impl SimulationParameters {
    /// Check the values the generator assumes its caller has vetted
    ///
    /// Strength must be finite and non-negative, spacing at least one hour.
    pub fn validate(&self) -> Result<()> {
        if self.application_spacing == 0 {
            return Err(Error::InvalidParameter(
                "application spacing must be at least 1 hour".into(),
            ));
        }
        if !self.patch_strength.is_finite() || self.patch_strength < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "patch strength must be a non-negative number, got {}",
                self.patch_strength
            )));
        }
        Ok(())
    }
}

fn default_patch_strength() -> f64 {
    1.0
}

// Twice weekly
fn default_application_spacing() -> u32 {
    84
}

fn default_horizon() -> u32 {
    336
}

fn default_wear_duration() -> u32 {
    84
}

/// One hour of simulated output
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub time: u32,
    /// Summed concentration contribution of every application
    pub value: f64,
    /// Strength-weighted count of patches currently worn
    pub patches: f64,
}

impl Sample {
    /// Empty accumulator for hour `time`
    pub fn zero(time: u32) -> Self {
        Self {
            time,
            value: 0.0,
            patches: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = SimulationParameters::default();
        assert_eq!(params.patch_strength, 1.0);
        assert_eq!(params.application_spacing, 84);
        assert_eq!(params.horizon, 336);
        assert_eq!(params.wear_duration, 84);
    }

    #[test]
    fn test_partial_parameters_use_defaults() {
        let params: SimulationParameters = serde_json::from_str(r#"{"horizon": 48}"#).unwrap();
        assert_eq!(params.horizon, 48);
        assert_eq!(params.application_spacing, 84);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(SimulationParameters::default().validate().is_ok());

        let params = SimulationParameters {
            patch_strength: 0.0,
            ..SimulationParameters::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_strength() {
        for strength in [-1.0, f64::NAN, f64::INFINITY] {
            let params = SimulationParameters {
                patch_strength: strength,
                ..SimulationParameters::default()
            };
            assert!(
                matches!(params.validate(), Err(Error::InvalidParameter(_))),
                "expected rejection for {}",
                strength
            );
        }
    }

    #[test]
    fn test_validate_rejects_zero_spacing() {
        let params = SimulationParameters {
            application_spacing: 0,
            ..SimulationParameters::default()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_negative_spacing_rejected_by_serde() {
        let result = serde_json::from_str::<SimulationParameters>(r#"{"application_spacing": -4}"#);
        assert!(result.is_err());
    }
}
