use super::iv_simulator::IvSimulator;
use super::volatility::{realized_volatility, rolling_zscore};
use crate::config::{ConfigSection, FeatureConfig};
use crate::data::MarketDataset;
use crate::error::{Result, VolSpreadError};

/// Fills in derived columns a dataset does not already carry.
///
/// Columns present in the input are never recomputed.
pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn enrich(&self, mut dataset: MarketDataset) -> Result<MarketDataset> {
        for &window in &self.config.hv_windows {
            if dataset.hv(window).is_none() {
                let hv = realized_volatility(dataset.spot().values(), window, self.config.trading_days);
                dataset = dataset.with_hv(window, hv)?;
                log::debug!("Computed HV{} from spot", window);
            }
        }

        let reference = self.config.reference_window().ok_or_else(|| {
            VolSpreadError::Configuration("No HV window configured".to_string())
        })?;

        if dataset.iv().is_none() {
            if let Some(mode) = self.config.iv_simulation {
                let iv = IvSimulator::new(mode)?.simulate(dataset.require_hv(reference)?);
                log::info!("Dataset has no IV column; simulated IV from HV{} ({:?})", reference, mode);
                dataset = dataset.with_iv(iv.values().to_vec())?;
            }
        }

        if dataset.spread().is_none() {
            if let Some(iv) = dataset.iv() {
                let hv = dataset.require_hv(reference)?;
                let spread: Vec<f64> = iv
                    .values()
                    .iter()
                    .zip(hv.values())
                    .map(|(i, h)| i - h)
                    .collect();
                dataset = dataset.with_spread(spread)?;
            }
        }

        if dataset.zscore().is_none() {
            if let Some(spread) = dataset.spread() {
                let z = rolling_zscore(spread.values(), self.config.z_window);
                dataset = dataset.with_zscore(z)?;
            }
        }

        Ok(dataset)
    }
}
