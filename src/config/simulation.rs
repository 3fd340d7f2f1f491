use super::traits::{ensure_rate, ConfigSection};
use crate::error::VolSpreadError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Maximum forward trading days per trade. Zero is rejected.
    pub hold_period: usize,
    /// Flat premium as a fraction of entry price.
    pub premium_pct: f64,
    /// Round-trip commission rate, charged at entry and exit.
    pub commission_pct: f64,
    /// Per-leg slippage rate, charged at entry and exit.
    pub slippage_pct: f64,
    /// Fraction of premium tolerated as loss.
    pub stop_loss_pct: f64,
    /// Fraction of premium taken as profit.
    pub profit_target_pct: f64,
    /// Prefer a dataset premium column over `premium_pct` when one exists.
    pub use_premium_column: bool,
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            hold_period: 5,
            premium_pct: 0.03,
            commission_pct: 0.001,
            slippage_pct: 0.0005,
            stop_loss_pct: 1.0,
            profit_target_pct: 1.0,
            use_premium_column: true,
            parallel: false,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), VolSpreadError> {
        if self.hold_period == 0 {
            return Err(VolSpreadError::Configuration(
                "hold_period must be a positive number of trading days".to_string(),
            ));
        }
        let section = Self::section_name();
        ensure_rate(section, "premium_pct", self.premium_pct)?;
        ensure_rate(section, "commission_pct", self.commission_pct)?;
        ensure_rate(section, "slippage_pct", self.slippage_pct)?;
        ensure_rate(section, "stop_loss_pct", self.stop_loss_pct)?;
        ensure_rate(section, "profit_target_pct", self.profit_target_pct)?;
        Ok(())
    }
}
