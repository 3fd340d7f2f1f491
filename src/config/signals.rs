use super::traits::ConfigSection;
use crate::error::VolSpreadError;
use serde::{Deserialize, Serialize};

/// How the IV/HV relationship is turned into a decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalMode {
    /// Compares `IV / HV` against a threshold pair (strict inequalities).
    Ratio { upper: f64, lower: f64 },
    /// Compares the spread z-score against a threshold pair (inclusive).
    #[serde(rename = "zscore", alias = "z_score")]
    ZScore { z_hi: f64, z_lo: f64 },
}

impl SignalMode {
    pub fn ratio() -> Self {
        Self::Ratio { upper: 1.1, lower: 0.7 }
    }

    pub fn zscore() -> Self {
        Self::ZScore { z_hi: 1.5, z_lo: -1.5 }
    }

    /// Mode with default thresholds by name.
    pub fn from_name(name: &str) -> Result<Self, VolSpreadError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ratio" => Ok(Self::ratio()),
            "zscore" | "z_score" | "z-score" => Ok(Self::zscore()),
            other => Err(VolSpreadError::Configuration(format!(
                "Unknown signal mode '{}' (expected 'ratio' or 'zscore')",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ratio { .. } => "ratio",
            Self::ZScore { .. } => "zscore",
        }
    }

    pub fn validate(&self) -> Result<(), VolSpreadError> {
        let (hi, lo, hi_name, lo_name) = match *self {
            Self::Ratio { upper, lower } => (upper, lower, "upper", "lower"),
            Self::ZScore { z_hi, z_lo } => (z_hi, z_lo, "z_hi", "z_lo"),
        };
        if !hi.is_finite() || !lo.is_finite() {
            return Err(VolSpreadError::Configuration(format!(
                "Signal thresholds must be finite ({}={}, {}={})",
                hi_name, hi, lo_name, lo
            )));
        }
        if hi <= lo {
            return Err(VolSpreadError::Configuration(format!(
                "{} ({}) must be greater than {} ({})",
                hi_name, hi, lo_name, lo
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    pub mode: SignalMode,
    /// Also produce the change-only view of the signal series.
    pub compact: bool,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            mode: SignalMode::zscore(),
            compact: true,
        }
    }
}

impl ConfigSection for SignalConfig {
    fn section_name() -> &'static str {
        "signals"
    }

    fn validate(&self) -> Result<(), VolSpreadError> {
        self.mode.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(matches!(
            SignalMode::from_name("momentum"),
            Err(VolSpreadError::Configuration(_))
        ));
        assert_eq!(SignalMode::from_name("Ratio").unwrap(), SignalMode::ratio());
    }

    #[test]
    fn test_inverted_thresholds_are_rejected() {
        let mode = SignalMode::ZScore { z_hi: -1.0, z_lo: 1.0 };
        assert!(mode.validate().is_err());
        let mode = SignalMode::ZScore { z_hi: 1.0, z_lo: 1.0 };
        assert!(mode.validate().is_err());
        assert!(SignalMode::ratio().validate().is_ok());
    }

    #[test]
    fn test_mode_roundtrips_through_toml() {
        let cfg = SignalConfig {
            mode: SignalMode::Ratio { upper: 1.2, lower: 0.8 },
            compact: false,
        };
        let text = toml::to_string(&cfg).unwrap();
        assert!(text.contains("kind = \"ratio\""));
        let back: SignalConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.mode, cfg.mode);
    }
}
