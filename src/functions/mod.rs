pub mod volatility;
pub mod iv_simulator;
pub mod features;

pub use features::FeatureBuilder;
pub use iv_simulator::IvSimulator;
pub use volatility::{log_returns, realized_volatility, rolling_zscore};
