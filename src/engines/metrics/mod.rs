pub mod profitability;
pub mod risk;
pub mod returns;
pub mod engine;

pub use profitability::ProfitabilityMetrics;
pub use risk::RiskMetrics;
pub use returns::PnlSeries;
pub use engine::MetricsEngine;
