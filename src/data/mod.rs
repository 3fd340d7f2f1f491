pub mod series;
pub mod dataset;
pub mod connectors;
pub mod writer;

pub use connectors::CsvConnector;
pub use dataset::MarketDataset;
pub use series::{DateIndex, TimeSeries};
pub use writer::ReportWriter;
