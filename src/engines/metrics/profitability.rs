// src/engines/metrics/profitability.rs

pub struct ProfitabilityMetrics;

impl ProfitabilityMetrics {
    /// Last cumulative value.
    pub fn total_return(cum_pnl: &[f64]) -> f64 {
        cum_pnl.last().copied().unwrap_or(f64::NAN)
    }

    /// `(1 + total)^(trading_days / elapsed_days) - 1`, NaN for a zero-day span.
    pub fn annualized_return(total_return: f64, elapsed_days: i64, trading_days: f64) -> f64 {
        if elapsed_days <= 0 {
            return f64::NAN;
        }
        (1.0 + total_return).powf(trading_days / elapsed_days as f64) - 1.0
    }

    /// Fraction of records strictly above zero.
    pub fn win_rate(pnl: &[f64]) -> f64 {
        if pnl.is_empty() {
            return f64::NAN;
        }
        let wins = pnl.iter().filter(|&&p| p > 0.0).count();
        wins as f64 / pnl.len() as f64
    }
}
