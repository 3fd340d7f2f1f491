use crate::data::TimeSeries;
use crate::error::Result;
use crate::types::{MetricsBundle, Signal, TradeRecord};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const TRADES_FILE: &str = "trades_summary.csv";
pub const SIGNALS_FILE: &str = "signals.csv";
pub const STATS_TEXT_FILE: &str = "strategy_stats.txt";
pub const STATS_JSON_FILE: &str = "strategy_stats.json";

/// Persists backtest output into one directory. Every file is written to a
/// temporary sibling first and renamed into place.
pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Result<Self> {
        fs::create_dir_all(out_dir.as_ref())?;
        Ok(Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn trades_frame(trades: &[TradeRecord]) -> Result<DataFrame> {
        let mut cum = 0.0;
        let cum_pnl: Vec<f64> = trades
            .iter()
            .map(|t| {
                cum += t.pnl;
                cum
            })
            .collect();

        let df = df! {
            "date" => trades.iter().map(|t| t.date.to_string()).collect::<Vec<_>>(),
            "signal" => trades.iter().map(|t| t.signal.as_str()).collect::<Vec<_>>(),
            "entry_price" => trades.iter().map(|t| t.entry_price).collect::<Vec<_>>(),
            "exit_price" => trades.iter().map(|t| t.exit_price).collect::<Vec<_>>(),
            "exit_date" => trades.iter().map(|t| t.exit_date.to_string()).collect::<Vec<_>>(),
            "days_held" => trades.iter().map(|t| t.days_held as u64).collect::<Vec<_>>(),
            "premium" => trades.iter().map(|t| t.premium).collect::<Vec<_>>(),
            "commission" => trades.iter().map(|t| t.commission).collect::<Vec<_>>(),
            "slippage" => trades.iter().map(|t| t.slippage).collect::<Vec<_>>(),
            "pnl" => trades.iter().map(|t| t.pnl).collect::<Vec<_>>(),
            "cum_pnl" => cum_pnl,
            "exit_reason" => trades.iter().map(|t| t.exit_reason.as_str()).collect::<Vec<_>>(),
        }?;
        Ok(df)
    }

    /// Signal table: date, spot, statistic, full signal and change-only signal.
    pub fn signals_frame(
        spot: &TimeSeries<f64>,
        statistic: &TimeSeries<f64>,
        signals: &TimeSeries<Signal>,
        compact: Option<&TimeSeries<Option<Signal>>>,
    ) -> Result<DataFrame> {
        spot.ensure_same_index(signals, "spot vs signal")?;
        statistic.ensure_same_index(signals, "statistic vs signal")?;

        let dates: Vec<String> = signals.iter().map(|(d, _)| d.to_string()).collect();
        let mut df = df! {
            "date" => dates,
            "spot" => spot.values().to_vec(),
            "statistic" => statistic.values().to_vec(),
            "signal" => signals.values().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        }?;

        if let Some(compact) = compact {
            compact.ensure_same_index(signals, "compact vs signal")?;
            let values: Vec<Option<&str>> = compact.values().iter().map(|s| s.map(|s| s.as_str())).collect();
            df.with_column(Series::new("signal_compact".into(), values))?;
        }
        Ok(df)
    }

    pub fn write_frame(&self, name: &str, df: &mut DataFrame) -> Result<PathBuf> {
        self.atomic_write(name, |tmp| {
            let mut file = File::create(tmp)?;
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
            Ok(())
        })
    }

    pub fn write_trades(&self, trades: &[TradeRecord]) -> Result<PathBuf> {
        let mut df = Self::trades_frame(trades)?;
        self.write_frame(TRADES_FILE, &mut df)
    }

    /// One `name: value` line per metric; undefined values print as `NaN`.
    pub fn write_stats_text(&self, metrics: &MetricsBundle) -> Result<PathBuf> {
        let body: String = metrics
            .entries()
            .into_iter()
            .map(|(name, value)| format!("{}: {}\n", name, value))
            .collect();
        self.atomic_write(STATS_TEXT_FILE, |tmp| Ok(fs::write(tmp, body)?))
    }

    /// Undefined values serialize as `null`.
    pub fn write_stats_json(&self, metrics: &MetricsBundle) -> Result<PathBuf> {
        let body = serde_json::to_string_pretty(metrics)?;
        self.atomic_write(STATS_JSON_FILE, |tmp| Ok(fs::write(tmp, body)?))
    }

    fn atomic_write<F>(&self, name: &str, write: F) -> Result<PathBuf>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let path = self.out_dir.join(name);
        let tmp = self.out_dir.join(format!("{}.tmp", name));
        write(&tmp)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExitReason;
    use chrono::NaiveDate;

    fn trade(day: u32, pnl: f64) -> TradeRecord {
        let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        TradeRecord {
            date,
            signal: Signal::SellVol,
            entry_price: 100.0,
            exit_price: 101.0,
            exit_date: date,
            days_held: 0,
            premium: 3.0,
            commission: 0.2,
            slippage: 0.1,
            pnl,
            exit_reason: ExitReason::EndOfData,
        }
    }

    #[test]
    fn test_trades_frame_has_running_sum() {
        let df = ReportWriter::trades_frame(&[trade(3, 1.0), trade(4, -0.25)]).unwrap();
        assert_eq!(df.height(), 2);
        let cum: Vec<Option<f64>> = df.column("cum_pnl").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(cum, vec![Some(1.0), Some(0.75)]);
    }

    #[test]
    fn test_stats_files_written() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();
        let text = writer.write_stats_text(&MetricsBundle::empty()).unwrap();
        let json = writer.write_stats_json(&MetricsBundle::empty()).unwrap();

        let body = fs::read_to_string(text).unwrap();
        assert!(body.contains("Sharpe Ratio: NaN"));
        assert!(body.contains("Number of Trades: 0"));

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(json).unwrap()).unwrap();
        assert!(value["Sharpe Ratio"].is_null());
        assert_eq!(value["Number of Trades"], 0);
        assert!(!dir.path().join("strategy_stats.txt.tmp").exists());
    }

    #[test]
    fn test_empty_trades_still_write_header() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();
        let path = writer.write_trades(&[]).unwrap();
        let body = fs::read_to_string(path).unwrap();
        assert!(body.starts_with("date,signal,entry_price"));
    }
}
