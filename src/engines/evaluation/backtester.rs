use crate::{
    config::{AppConfig, SignalMode},
    data::{MarketDataset, TimeSeries},
    engines::metrics::{MetricsEngine, PnlSeries},
    engines::signals::{compact, ratio, SignalGenerator, SignalInput},
    engines::simulation::{PayoffSimulator, PremiumSource},
    error::{Result, VolSpreadError},
    types::{MetricsBundle, Signal, TradeRecord},
};

/// Everything one backtest produces, in pipeline order.
#[derive(Debug, Clone)]
pub struct BacktestReport {
    pub mode: SignalMode,
    /// Ratio or z-score the signals were classified from.
    pub statistic: TimeSeries<f64>,
    pub signals: TimeSeries<Signal>,
    pub compact_signals: Option<TimeSeries<Option<Signal>>>,
    pub trades: Vec<TradeRecord>,
    pub pnl: PnlSeries,
    pub metrics: MetricsBundle,
}

impl BacktestReport {
    pub fn last_signal(&self) -> Option<(chrono::NaiveDate, Signal)> {
        self.signals.iter().last().map(|(d, s)| (d, *s))
    }
}

/// Signal generation -> payoff simulation -> metrics over one dataset.
pub struct Backtester {
    config: AppConfig,
    generator: SignalGenerator,
    simulator: PayoffSimulator,
    metrics: MetricsEngine,
}

impl Backtester {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            generator: SignalGenerator::new(config.signals.mode)?,
            simulator: PayoffSimulator::new(config.simulation.clone())?,
            metrics: MetricsEngine::new(&config.metrics),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn run(&self, dataset: &MarketDataset) -> Result<BacktestReport> {
        let mode = self.generator.mode();
        let (statistic, signals) = match mode {
            SignalMode::Ratio { .. } => {
                let window = self.config.features.reference_window().ok_or_else(|| {
                    VolSpreadError::Configuration("No HV window configured".to_string())
                })?;
                let iv = dataset.require_iv()?;
                let hv = dataset.require_hv(window)?;
                let signals = self.generator.generate(SignalInput::Ratio { iv, hv })?;
                (ratio(iv, hv), signals)
            }
            SignalMode::ZScore { .. } => {
                let spread = dataset.spread().ok_or_else(|| {
                    VolSpreadError::Data("Dataset has no spread column".to_string())
                })?;
                let z = dataset.zscore().ok_or_else(|| {
                    VolSpreadError::Data("Dataset has no z-score column".to_string())
                })?;
                let signals = self.generator.generate(SignalInput::ZScore { spread, z })?;
                (z.clone(), signals)
            }
        };

        let compact_signals = self.config.signals.compact.then(|| compact(&signals));

        let premium_series = if self.config.simulation.use_premium_column {
            dataset.premium()
        } else {
            None
        };
        let premium = PremiumSource::resolve(self.config.simulation.premium_pct, premium_series);

        let trades = self.simulator.run(dataset.spot(), &signals, &premium)?;
        let pnl = PnlSeries::from_trades(&trades);
        let metrics = self.metrics.calculate_all(&pnl);

        log::info!(
            "Backtest finished: mode={}, trades={}, total_return={}",
            mode.name(),
            metrics.num_trades,
            metrics.total_return
        );

        Ok(BacktestReport {
            mode,
            statistic,
            signals,
            compact_signals,
            trades,
            pnl,
            metrics,
        })
    }
}
