use crate::data::MarketDataset;
use crate::error::{Result, VolSpreadError};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::Path;
use super::{types::ColumnMap, validator::DataValidator};

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(1000))
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| VolSpreadError::Data(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load a CSV file and convert it into a [`MarketDataset`].
    pub fn load_dataset<P: AsRef<Path>>(path: P, min_rows: Option<usize>) -> Result<MarketDataset> {
        let df = Self::load(&path)?;
        DataValidator::validate_minimum_rows(&df, min_rows.unwrap_or(2))?;
        let dataset = Self::to_dataset(&df)?;
        log::info!(
            "Loaded {} rows from {} ({} to {})",
            dataset.len(),
            path.as_ref().display(),
            dataset.index().first().map(|d| d.to_string()).unwrap_or_default(),
            dataset.index().last().map(|d| d.to_string()).unwrap_or_default()
        );
        Ok(dataset)
    }

    /// Rows without a date, spot or (when present) IV are dropped; the rest
    /// are sorted by date. Duplicate dates are rejected.
    pub fn to_dataset(df: &DataFrame) -> Result<MarketDataset> {
        let columns = DataValidator::resolve_columns(df)?;

        let null_report = DataValidator::check_nulls(df);
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        let dates = Self::date_column(df, &columns.date)?;
        let spot = Self::float_column(df, &columns.spot)?;
        let iv = Self::optional_float_column(df, columns.iv.as_deref())?;

        let mut rows: Vec<(NaiveDate, usize)> = dates
            .iter()
            .enumerate()
            .filter_map(|(i, date)| date.map(|d| (d, i)))
            .filter(|&(_, i)| spot[i].is_finite())
            .filter(|&(_, i)| iv.as_ref().map_or(true, |v| v[i].is_finite()))
            .collect();
        rows.sort_by_key(|&(date, _)| date);

        let dropped = df.height() - rows.len();
        if dropped > 0 {
            log::warn!("Dropped {} rows with missing date, spot or IV", dropped);
        }

        let pick = |values: &[f64]| -> Vec<f64> { rows.iter().map(|&(_, i)| values[i]).collect() };

        let mut dataset = MarketDataset::new(rows.iter().map(|&(d, _)| d).collect(), pick(&spot))?;
        if let Some(iv) = &iv {
            dataset = dataset.with_iv(pick(iv))?;
        }
        for (window, name) in &columns.hv {
            dataset = dataset.with_hv(*window, pick(&Self::float_column(df, name)?))?;
        }
        if let Some(spread) = Self::optional_float_column(df, columns.spread.as_deref())? {
            dataset = dataset.with_spread(pick(&spread))?;
        }
        if let Some(z) = Self::optional_float_column(df, columns.zscore.as_deref())? {
            dataset = dataset.with_zscore(pick(&z))?;
        }
        if let Some(premium) = Self::premium_column(df, &columns)? {
            dataset = dataset.with_premium(pick(&premium))?;
        }

        Ok(dataset)
    }

    fn premium_column(df: &DataFrame, columns: &ColumnMap) -> Result<Option<Vec<f64>>> {
        if let Some(name) = &columns.premium {
            return Ok(Some(Self::float_column(df, name)?));
        }
        match &columns.legs {
            Some((ce, pe)) => {
                let ce = Self::float_column(df, ce)?;
                let pe = Self::float_column(df, pe)?;
                Ok(Some(ce.iter().zip(&pe).map(|(c, p)| c + p).collect()))
            }
            None => Ok(None),
        }
    }

    /// Nulls become NaN.
    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
        let column = df.column(name)?.cast(&DataType::Float64)?;
        Ok(column
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }

    fn optional_float_column(df: &DataFrame, name: Option<&str>) -> Result<Option<Vec<f64>>> {
        name.map(|n| Self::float_column(df, n)).transpose()
    }

    /// Accepts `YYYY-MM-DD`, optionally followed by a time part.
    fn date_column(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
        let column = df.column(name)?.cast(&DataType::String)?;
        column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                None => Ok(None),
                Some(text) => Self::parse_date(text).map(Some).ok_or_else(|| {
                    VolSpreadError::Data(format!("Unparseable date '{}' at row {}", text, row))
                }),
            })
            .collect()
    }

    fn parse_date(text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .or_else(|| text.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_to_dataset_sorts_and_drops() {
        let df = df! {
            "date" => &[Some("2024-01-04"), Some("2024-01-02"), None, Some("2024-01-03")],
            "PRICE" => &[Some(102.0), Some(100.0), Some(101.0), None],
            "IV" => &[15.0, 14.0, 14.5, 14.2],
            "HV30" => &[13.0, 12.0, 12.5, 12.1],
        }
        .unwrap();

        let ds = CsvConnector::to_dataset(&df).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.spot().values(), &[100.0, 102.0]);
        assert_eq!(ds.require_iv().unwrap().values(), &[14.0, 15.0]);
        assert_eq!(ds.require_hv(30).unwrap().values(), &[12.0, 13.0]);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let df = df! {
            "date" => &["2024-01-02", "2024-01-02"],
            "spot" => &[100.0, 101.0],
        }
        .unwrap();

        assert!(matches!(CsvConnector::to_dataset(&df), Err(VolSpreadError::Data(_))));
    }

    #[test]
    fn test_premium_from_option_legs() {
        let df = df! {
            "date" => &["2024-01-02 00:00:00", "2024-01-03 00:00:00"],
            "spot" => &[22000.0, 22100.0],
            "ce_price" => &[180.0, 175.0],
            "pe_price" => &[165.0, 170.0],
        }
        .unwrap();

        let ds = CsvConnector::to_dataset(&df).unwrap();
        assert_eq!(ds.premium().unwrap().values(), &[345.0, 345.0]);
    }

    #[test]
    fn test_bad_date_is_data_error() {
        let df = df! {
            "date" => &["yesterday"],
            "spot" => &[100.0],
        }
        .unwrap();

        assert!(CsvConnector::to_dataset(&df).is_err());
    }
}
