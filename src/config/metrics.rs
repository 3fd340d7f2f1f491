use super::traits::ConfigSection;
use crate::error::VolSpreadError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Annualization factor
    pub trading_days: f64,
    pub risk_free_rate: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            trading_days: 252.0,
            risk_free_rate: 0.0,
        }
    }
}

impl ConfigSection for MetricsConfig {
    fn section_name() -> &'static str {
        "metrics"
    }

    fn validate(&self) -> Result<(), VolSpreadError> {
        if !(self.trading_days.is_finite() && self.trading_days > 0.0) {
            return Err(VolSpreadError::Configuration(
                "trading_days must be positive".to_string(),
            ));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(VolSpreadError::Configuration(
                "risk_free_rate must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
