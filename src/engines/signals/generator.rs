use crate::config::SignalMode;
use crate::data::TimeSeries;
use crate::error::{Result, VolSpreadError};
use crate::types::Signal;

/// Series a [`SignalGenerator`] reads, matching its [`SignalMode`].
#[derive(Debug, Clone, Copy)]
pub enum SignalInput<'a> {
    Ratio {
        iv: &'a TimeSeries<f64>,
        hv: &'a TimeSeries<f64>,
    },
    ZScore {
        spread: &'a TimeSeries<f64>,
        z: &'a TimeSeries<f64>,
    },
}

impl SignalInput<'_> {
    fn mode_name(&self) -> &'static str {
        match self {
            Self::Ratio { .. } => "ratio",
            Self::ZScore { .. } => "zscore",
        }
    }
}

/// Turns the IV/HV relationship into one [`Signal`] per date.
///
/// Each date is classified from its own statistic only.
pub struct SignalGenerator {
    mode: SignalMode,
}

impl SignalGenerator {
    pub fn new(mode: SignalMode) -> Result<Self> {
        mode.validate()?;
        Ok(Self { mode })
    }

    pub fn mode(&self) -> SignalMode {
        self.mode
    }

    /// Classifies one statistic (an IV/HV ratio or a z-score).
    ///
    /// Undefined statistics are always neutral.
    pub fn classify(&self, value: f64) -> Signal {
        if !value.is_finite() {
            return Signal::Neutral;
        }
        match self.mode {
            SignalMode::Ratio { upper, lower } => {
                if value > upper {
                    Signal::SellVol
                } else if value < lower {
                    Signal::BuyVol
                } else {
                    Signal::Neutral
                }
            }
            SignalMode::ZScore { z_hi, z_lo } => {
                if value >= z_hi {
                    Signal::SellVol
                } else if value <= z_lo {
                    Signal::BuyVol
                } else {
                    Signal::Neutral
                }
            }
        }
    }

    pub fn generate(&self, input: SignalInput<'_>) -> Result<TimeSeries<Signal>> {
        let statistic = match (self.mode, input) {
            (SignalMode::Ratio { .. }, SignalInput::Ratio { iv, hv }) => {
                ensure_non_empty(iv, "IV")?;
                iv.ensure_same_index(hv, "IV vs HV")?;
                ratio(iv, hv)
            }
            (SignalMode::ZScore { .. }, SignalInput::ZScore { spread, z }) => {
                ensure_non_empty(z, "z-score")?;
                spread.ensure_same_index(z, "spread vs z-score")?;
                z.clone()
            }
            (mode, input) => {
                return Err(VolSpreadError::Configuration(format!(
                    "Signal mode '{}' cannot consume '{}' inputs",
                    mode.name(),
                    input.mode_name()
                )));
            }
        };

        let signals = statistic.map(|&v| self.classify(v));
        log::debug!(
            "Generated {} {} signals ({} non-neutral)",
            signals.len(),
            self.mode.name(),
            signals.values().iter().filter(|s| !s.is_neutral()).count()
        );
        Ok(signals)
    }
}

fn ensure_non_empty(series: &TimeSeries<f64>, what: &str) -> Result<()> {
    if series.is_empty() {
        return Err(VolSpreadError::Data(format!("{} series is empty", what)));
    }
    Ok(())
}

/// Pointwise IV / HV; NaN wherever HV is zero or either side is undefined.
pub fn ratio(iv: &TimeSeries<f64>, hv: &TimeSeries<f64>) -> TimeSeries<f64> {
    let mut hv_values = hv.values().iter();
    iv.map(|&iv_value| {
        let hv_value = hv_values.next().copied().unwrap_or(f64::NAN);
        if !iv_value.is_finite() || !hv_value.is_finite() || hv_value == 0.0 {
            f64::NAN
        } else {
            iv_value / hv_value
        }
    })
}

/// Change-only view: a date keeps its signal only when it differs from the
/// previous date's. The first date always keeps it.
///
/// Display aid only; simulation must read the full series.
pub fn compact(signals: &TimeSeries<Signal>) -> TimeSeries<Option<Signal>> {
    let mut previous: Option<Signal> = None;
    signals.map(|&s| {
        let marked = if previous == Some(s) { None } else { Some(s) };
        previous = Some(s);
        marked
    })
}
