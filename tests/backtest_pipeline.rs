use std::fs;
use volspread::config::{AppConfig, FeatureConfig, SignalMode};
use volspread::data::{writer, CsvConnector, MarketDataset, ReportWriter};
use volspread::engines::evaluation::Backtester;
use volspread::functions::FeatureBuilder;

const SAMPLE: &str = "tests/data/spy_vix_sample.csv";

fn load_enriched(config: &AppConfig) -> MarketDataset {
    let dataset = CsvConnector::load_dataset(SAMPLE, Some(30)).unwrap();
    FeatureBuilder::new(config.features.clone())
        .unwrap()
        .enrich(dataset)
        .unwrap()
}

fn base_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.features = FeatureConfig {
        hv_windows: vec![10, 20],
        z_window: 15,
        ..Default::default()
    };
    config.signals.mode = SignalMode::ZScore { z_hi: 1.0, z_lo: -1.0 };
    config
}

#[test]
fn test_zscore_backtest_over_sample() {
    let config = base_config();
    let dataset = load_enriched(&config);
    assert_eq!(dataset.len(), 80);

    let report = Backtester::new(config).unwrap().run(&dataset).unwrap();

    let active = report.signals.values().iter().filter(|s| !s.is_neutral()).count();
    assert_eq!(report.trades.len(), active);
    assert_eq!(report.metrics.num_trades, active);
    assert_eq!(report.signals.len(), dataset.len());
    assert!(report.trades.windows(2).all(|w| w[0].date < w[1].date));
    assert!(report.trades.iter().all(|t| t.days_held <= 5));

    let compact = report.compact_signals.as_ref().unwrap();
    assert_eq!(compact.values()[0], Some(report.signals.values()[0]));

    if let Some(last) = report.pnl.cum_pnl.last() {
        assert!((report.metrics.total_return - last).abs() < 1e-12);
    }
}

#[test]
fn test_ratio_backtest_uses_reference_hv() {
    let mut config = base_config();
    config.signals.mode = SignalMode::Ratio { upper: 1.05, lower: 0.95 };
    let dataset = load_enriched(&config);

    let report = Backtester::new(config).unwrap().run(&dataset).unwrap();

    // HV20 is undefined for the first 20 rows, so those dates stay neutral.
    assert!(report.signals.values()[..20].iter().all(|s| s.is_neutral()));
    assert!(report.statistic.values()[..20].iter().all(|v| v.is_nan()));
}

#[test]
fn test_no_signals_yields_empty_metrics() {
    let mut config = base_config();
    config.signals.mode = SignalMode::ZScore { z_hi: 100.0, z_lo: -100.0 };
    let dataset = load_enriched(&config);

    let report = Backtester::new(config).unwrap().run(&dataset).unwrap();

    assert!(report.trades.is_empty());
    assert_eq!(report.metrics.num_trades, 0);
    assert!(report.metrics.sharpe_ratio.is_nan());
}

#[test]
fn test_reports_written() {
    let config = base_config();
    let dataset = load_enriched(&config);
    let report = Backtester::new(config).unwrap().run(&dataset).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = ReportWriter::new(dir.path().join("outputs")).unwrap();
    out.write_trades(&report.trades).unwrap();
    let mut table = ReportWriter::signals_frame(
        dataset.spot(),
        &report.statistic,
        &report.signals,
        report.compact_signals.as_ref(),
    )
    .unwrap();
    assert_eq!(table.height(), 80);
    out.write_frame(writer::SIGNALS_FILE, &mut table).unwrap();
    out.write_stats_text(&report.metrics).unwrap();

    let signals_csv = fs::read_to_string(out.out_dir().join(writer::SIGNALS_FILE)).unwrap();
    let header = signals_csv.lines().next().unwrap();
    assert_eq!(header, "date,spot,statistic,signal,signal_compact");

    let trades_csv = fs::read_to_string(out.out_dir().join(writer::TRADES_FILE)).unwrap();
    assert_eq!(trades_csv.lines().count(), report.trades.len() + 1);

    let stats = fs::read_to_string(out.out_dir().join(writer::STATS_TEXT_FILE)).unwrap();
    assert!(stats.starts_with("Total Return: "));
    assert_eq!(stats.lines().count(), 9);
}
