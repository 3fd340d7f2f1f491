use super::traits::ConfigSection;
use crate::error::VolSpreadError;
use serde::{Deserialize, Serialize};

/// Derived-column settings applied when a dataset lacks HV, spread or z-score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub hv_windows: Vec<usize>,
    pub z_window: usize,
    pub trading_days: f64,
    /// Synthesises IV from HV when the dataset carries no IV column.
    pub iv_simulation: Option<IvSimulation>,
}

/// IV = HV x multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IvSimulation {
    /// Uniform multiplier in `[low, high)`, reproducible through `seed`.
    Random { low: f64, high: f64, seed: u64 },
    /// Midpoint of `[low, high]` on every date.
    Fixed { low: f64, high: f64 },
}

impl IvSimulation {
    pub fn validate(&self) -> Result<(), VolSpreadError> {
        match *self {
            Self::Random { low, high, .. } if !(low.is_finite() && high.is_finite() && low < high) => {
                Err(VolSpreadError::Configuration(format!(
                    "Random IV multiplier range [{}, {}) is empty or not finite",
                    low, high
                )))
            }
            Self::Fixed { low, high } if !(low.is_finite() && high.is_finite() && low <= high) => {
                Err(VolSpreadError::Configuration(format!(
                    "Fixed IV multiplier range [{}, {}] is invalid",
                    low, high
                )))
            }
            _ => Ok(()),
        }
    }
}

impl FeatureConfig {
    /// HV window closest to 30 days, used for the IV - HV spread.
    pub fn reference_window(&self) -> Option<usize> {
        self.hv_windows
            .iter()
            .copied()
            .min_by_key(|w| (*w as i64 - 30).abs())
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            hv_windows: vec![10, 20, 30],
            z_window: 60,
            trading_days: 252.0,
            iv_simulation: None,
        }
    }
}

impl ConfigSection for FeatureConfig {
    fn section_name() -> &'static str {
        "features"
    }

    fn validate(&self) -> Result<(), VolSpreadError> {
        if self.hv_windows.is_empty() {
            return Err(VolSpreadError::Configuration(
                "At least one HV window is required".to_string(),
            ));
        }
        if self.hv_windows.iter().any(|&w| w < 2) {
            return Err(VolSpreadError::Configuration(
                "HV windows must span at least 2 returns".to_string(),
            ));
        }
        if self.z_window < 2 {
            return Err(VolSpreadError::Configuration(
                "z_window must be at least 2".to_string(),
            ));
        }
        if !(self.trading_days.is_finite() && self.trading_days > 0.0) {
            return Err(VolSpreadError::Configuration(
                "trading_days must be positive".to_string(),
            ));
        }
        if let Some(sim) = &self.iv_simulation {
            sim.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_window_prefers_closest_to_30() {
        let cfg = FeatureConfig {
            hv_windows: vec![10, 21, 45],
            ..Default::default()
        };
        assert_eq!(cfg.reference_window(), Some(21));
        assert_eq!(FeatureConfig::default().reference_window(), Some(30));
    }

    #[test]
    fn test_empty_random_range_rejected() {
        let sim = IvSimulation::Random { low: 1.0, high: 1.0, seed: 7 };
        assert!(sim.validate().is_err());
        let sim = IvSimulation::Fixed { low: 1.0, high: 1.0 };
        assert!(sim.validate().is_ok());
    }
}
