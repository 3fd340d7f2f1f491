use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical trade decision for one date.
///
/// The ratio generator historically spoke `Buy`/`Sell`/`Hold`; those names
/// are accepted as aliases of the volatility-flavoured ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "BUY_VOL", alias = "Buy")]
    BuyVol,
    #[serde(rename = "SELL_VOL", alias = "Sell")]
    SellVol,
    #[serde(rename = "NEUTRAL", alias = "Hold")]
    Neutral,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuyVol => "BUY_VOL",
            Self::SellVol => "SELL_VOL",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// Long volatility: profits from a large absolute move.
    pub fn is_long_vol(&self) -> bool {
        matches!(self, Self::BuyVol)
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    ProfitTarget,
    StopLoss,
    TimeExit,  // hold_period reached
    EndOfData, // series ran out before hold_period
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfitTarget => "profit_target",
            Self::StopLoss => "stop_loss",
            Self::TimeExit => "time_exit",
            Self::EndOfData => "end_of_data",
        }
    }
}

/// One simulated straddle-proxy trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub signal: Signal,
    pub entry_price: f64,
    pub exit_price: f64,
    pub exit_date: NaiveDate,
    pub days_held: usize,
    pub premium: f64,
    pub commission: f64,
    pub slippage: f64,
    pub pnl: f64,
    pub exit_reason: ExitReason,
}

/// Fixed set of performance statistics for one trade sequence.
///
/// Statistically undefined values are `f64::NAN`, never zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricsBundle {
    #[serde(rename = "Total Return")]
    pub total_return: f64,
    #[serde(rename = "Annualized Return")]
    pub annualized_return: f64,
    #[serde(rename = "Annualized Volatility")]
    pub annualized_volatility: f64,
    #[serde(rename = "Sharpe Ratio")]
    pub sharpe_ratio: f64,
    #[serde(rename = "Sortino Ratio")]
    pub sortino_ratio: f64,
    #[serde(rename = "Max Drawdown")]
    pub max_drawdown: f64,
    #[serde(rename = "Calmar Ratio")]
    pub calmar_ratio: f64,
    #[serde(rename = "Number of Trades")]
    pub num_trades: usize,
    #[serde(rename = "Win Rate")]
    pub win_rate: f64,
}

impl MetricsBundle {
    /// Result for a backtest that produced no trades.
    pub fn empty() -> Self {
        Self {
            total_return: f64::NAN,
            annualized_return: f64::NAN,
            annualized_volatility: f64::NAN,
            sharpe_ratio: f64::NAN,
            sortino_ratio: f64::NAN,
            max_drawdown: f64::NAN,
            calmar_ratio: f64::NAN,
            num_trades: 0,
            win_rate: f64::NAN,
        }
    }

    /// Metric name -> display value, in report order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Return", self.total_return.to_string()),
            ("Annualized Return", self.annualized_return.to_string()),
            ("Annualized Volatility", self.annualized_volatility.to_string()),
            ("Sharpe Ratio", self.sharpe_ratio.to_string()),
            ("Sortino Ratio", self.sortino_ratio.to_string()),
            ("Max Drawdown", self.max_drawdown.to_string()),
            ("Calmar Ratio", self.calmar_ratio.to_string()),
            ("Number of Trades", self.num_trades.to_string()),
            ("Win Rate", self.win_rate.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_accepts_ratio_names() {
        let s: Signal = serde_json::from_str("\"Buy\"").unwrap();
        assert_eq!(s, Signal::BuyVol);
        let s: Signal = serde_json::from_str("\"Hold\"").unwrap();
        assert_eq!(s, Signal::Neutral);
        assert_eq!(serde_json::to_string(&Signal::SellVol).unwrap(), "\"SELL_VOL\"");
    }

    #[test]
    fn test_empty_bundle_is_nan_with_zero_count() {
        let m = MetricsBundle::empty();
        assert_eq!(m.num_trades, 0);
        assert!(m.sharpe_ratio.is_nan());
        assert!(m.total_return.is_nan());
        let entries = m.entries();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[3].1, "NaN");
    }
}
