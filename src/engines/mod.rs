pub mod signals;
pub mod simulation;
pub mod metrics;
pub mod evaluation;
