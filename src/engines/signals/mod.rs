pub mod generator;

pub use generator::{compact, ratio, SignalGenerator, SignalInput};
