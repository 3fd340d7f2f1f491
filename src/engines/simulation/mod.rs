pub mod premium;
pub mod simulator;

pub use premium::PremiumSource;
pub use simulator::PayoffSimulator;
