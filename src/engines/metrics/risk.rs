// src/engines/metrics/risk.rs

pub struct RiskMetrics;

impl RiskMetrics {
    /// Sample standard deviation (n - 1); NaN below two observations.
    pub fn std_dev(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return f64::NAN;
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance = values.iter()
            .map(|&v| (v - mean).powi(2))
            .sum::<f64>() / (values.len() - 1) as f64;

        variance.sqrt()
    }

    pub fn annualized_volatility(pnl: &[f64], trading_days: f64) -> f64 {
        Self::std_dev(pnl) * trading_days.sqrt()
    }

    pub fn sharpe_ratio(pnl: &[f64], risk_free_rate: f64, trading_days: f64) -> f64 {
        let ann_vol = Self::annualized_volatility(pnl, trading_days);
        Self::excess_over(pnl, risk_free_rate, trading_days, ann_vol)
    }

    /// Same numerator as Sharpe over the annualized std of losing records only.
    pub fn sortino_ratio(pnl: &[f64], risk_free_rate: f64, trading_days: f64) -> f64 {
        let downside: Vec<f64> = pnl.iter()
            .filter(|&&p| p < 0.0)
            .copied()
            .collect();
        let downside_vol = Self::std_dev(&downside) * trading_days.sqrt();
        Self::excess_over(pnl, risk_free_rate, trading_days, downside_vol)
    }

    /// Largest fall of cumulative PnL below its running peak. Never negative.
    pub fn max_drawdown(cum_pnl: &[f64]) -> f64 {
        let Some(&first) = cum_pnl.first() else {
            return f64::NAN;
        };

        let mut peak = first;
        let mut max_dd = 0.0;
        for &value in cum_pnl {
            if value > peak {
                peak = value;
            }
            let dd = peak - value;
            if dd > max_dd {
                max_dd = dd;
            }
        }

        max_dd
    }

    pub fn calmar_ratio(annualized_return: f64, max_drawdown: f64) -> f64 {
        if !Self::is_usable_denominator(max_drawdown) {
            return f64::NAN;
        }
        annualized_return / max_drawdown
    }

    fn excess_over(pnl: &[f64], risk_free_rate: f64, trading_days: f64, denominator: f64) -> f64 {
        if pnl.is_empty() || !Self::is_usable_denominator(denominator) {
            return f64::NAN;
        }
        let ann_ret = pnl.iter().sum::<f64>() / pnl.len() as f64 * trading_days;
        (ann_ret - risk_free_rate) / denominator
    }

    fn is_usable_denominator(value: f64) -> bool {
        value.is_finite() && value != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_dev_is_sample() {
        let sd = RiskMetrics::std_dev(&[1.0, 3.0]);
        assert!((sd - 2f64.sqrt()).abs() < 1e-12);
        assert!(RiskMetrics::std_dev(&[1.0]).is_nan());
    }

    #[test]
    fn test_max_drawdown_uses_running_peak() {
        let dd = RiskMetrics::max_drawdown(&[1.0, 3.0, 2.0, 0.5, 4.0]);
        assert!((dd - 2.5).abs() < 1e-12);
        assert_eq!(RiskMetrics::max_drawdown(&[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_sortino_needs_two_losses() {
        assert!(RiskMetrics::sortino_ratio(&[1.0, -0.5], 0.0, 252.0).is_nan());
        let s = RiskMetrics::sortino_ratio(&[1.0, -1.0, -3.0], 0.0, 252.0);
        let expected = (-1.0 / 3.0 * 252.0) / (2f64.sqrt() * 252f64.sqrt());
        assert!((s - expected).abs() < 1e-9);
    }

    #[test]
    fn test_calmar_undefined_without_drawdown() {
        assert!(RiskMetrics::calmar_ratio(0.2, 0.0).is_nan());
        assert!(RiskMetrics::calmar_ratio(0.2, f64::NAN).is_nan());
        assert_eq!(RiskMetrics::calmar_ratio(0.2, 0.1), 2.0);
    }
}
