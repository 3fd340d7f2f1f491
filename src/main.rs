use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use volspread::config::{ConfigManager, SignalMode};
use volspread::data::{writer::SIGNALS_FILE, CsvConnector, ReportWriter};
use volspread::engines::evaluation::Backtester;
use volspread::functions::FeatureBuilder;

const USAGE: &str = "usage: volspread <dataset.csv> [config.toml] [out_dir] [ratio|zscore]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(dataset_path) = args.next().map(PathBuf::from) else {
        bail!("{}", USAGE);
    };
    let config_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("outputs"));
    let mode_name = args.next();

    let manager = ConfigManager::from_env().context("invalid environment configuration")?;
    if let Some(path) = &config_path {
        manager
            .load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
    }
    if let Some(name) = &mode_name {
        // Default thresholds for the named mode replace the configured ones.
        let mode = SignalMode::from_name(name)?;
        manager.update(|c| c.signals.mode = mode)?;
    }
    let config = manager.get();

    let dataset = CsvConnector::load_dataset(&dataset_path, None)
        .with_context(|| format!("failed to load dataset {}", dataset_path.display()))?;
    let dataset = FeatureBuilder::new(config.features.clone())?.enrich(dataset)?;

    let backtester = Backtester::new(config)?;
    let report = backtester.run(&dataset).context("backtest failed")?;

    let writer = ReportWriter::new(&out_dir)?;
    let trades = writer.write_trades(&report.trades)?;
    let mut signal_table = ReportWriter::signals_frame(
        dataset.spot(),
        &report.statistic,
        &report.signals,
        report.compact_signals.as_ref(),
    )?;
    let signals = writer.write_frame(SIGNALS_FILE, &mut signal_table)?;
    let stats = writer.write_stats_text(&report.metrics)?;
    let stats_json = writer.write_stats_json(&report.metrics)?;

    log::info!(
        "Wrote: {}, {}, {}, {}",
        trades.display(),
        signals.display(),
        stats.display(),
        stats_json.display()
    );
    for (name, value) in report.metrics.entries() {
        println!("{}: {}", name, value);
    }
    if let Some((date, signal)) = report.last_signal() {
        println!("Latest signal {}: {}", date, signal);
    }

    Ok(())
}
