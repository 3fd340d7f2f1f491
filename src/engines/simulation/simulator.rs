use super::premium::PremiumSource;
use crate::config::{ConfigSection, SimulationConfig};
use crate::data::{DateIndex, TimeSeries};
use crate::error::{Result, VolSpreadError};
use crate::types::{ExitReason, Signal, TradeRecord};
use rayon::prelude::*;

/// Entry-time quantities, fixed for the life of a trade.
#[derive(Debug, Clone, Copy)]
struct TradeSetup {
    position: usize,
    signal: Signal,
    entry_price: f64,
    premium: f64,
    commission: f64,
    slippage: f64,
    max_loss: f64,
    target_win: f64,
}

impl TradeSetup {
    /// Straddle proxy: absolute move against the premium, no strike or decay.
    fn net_payoff(&self, exit_price: f64) -> f64 {
        let move_size = (exit_price - self.entry_price).abs();
        let raw = if self.signal.is_long_vol() {
            move_size - self.premium
        } else {
            self.premium - move_size
        };
        raw - self.commission - self.slippage
    }
}

/// Simulates one trade per non-neutral signal by walking forward through
/// at most `hold_period` days.
pub struct PayoffSimulator {
    config: SimulationConfig,
}

impl PayoffSimulator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(
        &self,
        prices: &TimeSeries<f64>,
        signals: &TimeSeries<Signal>,
        premium: &PremiumSource<'_>,
    ) -> Result<Vec<TradeRecord>> {
        if prices.is_empty() {
            return Err(VolSpreadError::Data("Price series is empty".to_string()));
        }
        prices.ensure_same_index(signals, "price vs signal")?;
        if let Some((date, value)) = prices.iter().find(|(_, v)| !v.is_finite()) {
            return Err(VolSpreadError::Data(format!(
                "Price on {} is not a finite number ({})",
                date, value
            )));
        }

        log::debug!(
            "Simulating straddle payoff: hold_period={}, profit_target_pct={}, stop_loss_pct={}, parallel={}",
            self.config.hold_period,
            self.config.profit_target_pct,
            self.config.stop_loss_pct,
            self.config.parallel
        );

        // Resolve premiums up front so a missing date fails before any walk.
        let setups = signals
            .iter()
            .enumerate()
            .filter(|(_, (_, signal))| !signal.is_neutral())
            .map(|(i, (date, signal))| self.setup(i, *signal, prices.values()[i], date, premium))
            .collect::<Result<Vec<_>>>()?;

        let index = prices.index();
        let values = prices.values();
        let mut trades: Vec<TradeRecord> = if self.config.parallel {
            setups
                .par_iter()
                .map(|setup| self.walk(setup, values, index))
                .collect()
        } else {
            setups
                .iter()
                .map(|setup| self.walk(setup, values, index))
                .collect()
        };
        trades.sort_by_key(|t| t.date);

        log::info!("Simulated {} trades from {} dates", trades.len(), prices.len());
        Ok(trades)
    }

    fn setup(
        &self,
        position: usize,
        signal: Signal,
        entry_price: f64,
        date: chrono::NaiveDate,
        premium: &PremiumSource<'_>,
    ) -> Result<TradeSetup> {
        let premium = premium.premium_at(date, entry_price)?;
        Ok(TradeSetup {
            position,
            signal,
            entry_price,
            premium,
            commission: entry_price * self.config.commission_pct * 2.0,
            slippage: entry_price * self.config.slippage_pct * 2.0,
            max_loss: -premium * self.config.stop_loss_pct,
            target_win: premium * self.config.profit_target_pct,
        })
    }

    fn walk(&self, setup: &TradeSetup, prices: &[f64], index: &DateIndex) -> TradeRecord {
        let i = setup.position;
        let last = prices.len() - 1;
        let hold = self.config.hold_period;

        for d in 1..=hold {
            let j = i.saturating_add(d);
            if j > last {
                break;
            }
            let net = setup.net_payoff(prices[j]);

            // Profit target is checked first when both bounds are hit on the same day.
            if net >= setup.target_win {
                return self.record(setup, prices, index, j, net, ExitReason::ProfitTarget);
            }
            if net <= setup.max_loss {
                return self.record(setup, prices, index, j, net, ExitReason::StopLoss);
            }
        }

        let horizon = i.saturating_add(hold);
        let j = horizon.min(last);
        let reason = if horizon <= last {
            ExitReason::TimeExit
        } else {
            ExitReason::EndOfData
        };
        let net = setup.net_payoff(prices[j]);
        self.record(setup, prices, index, j, net, reason)
    }

    fn record(
        &self,
        setup: &TradeSetup,
        prices: &[f64],
        index: &DateIndex,
        exit_position: usize,
        pnl: f64,
        exit_reason: ExitReason,
    ) -> TradeRecord {
        let dates = index.dates();
        TradeRecord {
            date: dates[setup.position],
            signal: setup.signal,
            entry_price: setup.entry_price,
            exit_price: prices[exit_position],
            exit_date: dates[exit_position],
            days_held: exit_position - setup.position,
            premium: setup.premium,
            commission: setup.commission,
            slippage: setup.slippage,
            pnl,
            exit_reason,
        }
    }
}
