pub mod traits;
pub mod signals;
pub mod simulation;
pub mod metrics;
pub mod features;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use signals::{SignalConfig, SignalMode};
pub use simulation::SimulationConfig;
pub use metrics::MetricsConfig;
pub use features::{FeatureConfig, IvSimulation};
pub use traits::ConfigSection;
