mod csv;
mod types;
mod validator;

pub use csv::CsvConnector;
pub use types::{hv_window, ColumnMap, MarketColumn};
pub use validator::DataValidator;
