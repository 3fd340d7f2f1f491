//! Volatility-spread backtesting: IV/HV signals, straddle-proxy trade
//! simulation and risk-adjusted performance metrics.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod types;

pub use error::{Result, VolSpreadError};
