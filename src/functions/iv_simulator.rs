use crate::config::IvSimulation;
use crate::data::TimeSeries;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stand-in for scraped implied volatility: HV scaled by a multiplier.
pub struct IvSimulator {
    mode: IvSimulation,
}

impl IvSimulator {
    pub fn new(mode: IvSimulation) -> Result<Self> {
        mode.validate()?;
        Ok(Self { mode })
    }

    pub fn simulate(&self, hv: &TimeSeries<f64>) -> TimeSeries<f64> {
        match self.mode {
            IvSimulation::Random { low, high, seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                hv.map(|&v| v * rng.gen_range(low..high))
            }
            IvSimulation::Fixed { low, high } => {
                let multiplier = (low + high) / 2.0;
                hv.map(|&v| v * multiplier)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hv_series() -> TimeSeries<f64> {
        let pairs = (1..=5)
            .map(|d| (NaiveDate::from_ymd_opt(2024, 3, d).unwrap(), 20.0))
            .collect();
        TimeSeries::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_fixed_uses_midpoint() {
        let sim = IvSimulator::new(IvSimulation::Fixed { low: 0.5, high: 1.5 }).unwrap();
        let iv = sim.simulate(&hv_series());
        assert!(iv.values().iter().all(|&v| v == 20.0));
    }

    #[test]
    fn test_random_is_seeded_and_bounded() {
        let mode = IvSimulation::Random { low: 0.5, high: 1.5, seed: 42 };
        let a = IvSimulator::new(mode).unwrap().simulate(&hv_series());
        let b = IvSimulator::new(mode).unwrap().simulate(&hv_series());
        assert_eq!(a.values(), b.values());
        assert!(a.values().iter().all(|&v| (10.0..30.0).contains(&v)));
    }

    #[test]
    fn test_invalid_range_rejected() {
        assert!(IvSimulator::new(IvSimulation::Random { low: 2.0, high: 1.0, seed: 1 }).is_err());
    }
}
