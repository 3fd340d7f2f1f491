pub mod backtester;

pub use backtester::{BacktestReport, Backtester};
