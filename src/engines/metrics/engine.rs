// src/engines/metrics/engine.rs
use crate::config::MetricsConfig;
use crate::engines::metrics::{PnlSeries, ProfitabilityMetrics, RiskMetrics};
use crate::types::MetricsBundle;

pub struct MetricsEngine {
    trading_days: f64,
    risk_free_rate: f64,
}

impl MetricsEngine {
    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            trading_days: config.trading_days,
            risk_free_rate: config.risk_free_rate,
        }
    }

    /// Never fails: degenerate statistics come back as NaN and an empty
    /// series yields [`MetricsBundle::empty`].
    pub fn calculate_all(&self, series: &PnlSeries) -> MetricsBundle {
        if series.is_empty() {
            log::warn!("No trades to evaluate; returning empty metrics");
            return MetricsBundle::empty();
        }

        let pnl = &series.pnl;
        let cum = &series.cum_pnl;
        let elapsed_days = series.elapsed_days();

        let total_return = ProfitabilityMetrics::total_return(cum);
        let annualized_return =
            ProfitabilityMetrics::annualized_return(total_return, elapsed_days, self.trading_days);
        let max_drawdown = RiskMetrics::max_drawdown(cum);

        MetricsBundle {
            total_return,
            annualized_return,
            annualized_volatility: RiskMetrics::annualized_volatility(pnl, self.trading_days),
            sharpe_ratio: RiskMetrics::sharpe_ratio(pnl, self.risk_free_rate, self.trading_days),
            sortino_ratio: RiskMetrics::sortino_ratio(pnl, self.risk_free_rate, self.trading_days),
            max_drawdown,
            calmar_ratio: RiskMetrics::calmar_ratio(annualized_return, max_drawdown),
            num_trades: pnl.len(),
            win_rate: ProfitabilityMetrics::win_rate(pnl),
        }
    }
}
