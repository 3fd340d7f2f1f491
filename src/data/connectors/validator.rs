use crate::error::{Result, VolSpreadError};
use polars::prelude::*;
use super::types::{hv_window, ColumnMap, MarketColumn};

pub struct DataValidator;

impl DataValidator {
    /// Map dataset columns to their CSV headers. Date and spot are mandatory.
    pub fn resolve_columns(df: &DataFrame) -> Result<ColumnMap> {
        let required = |column: MarketColumn| -> Result<String> {
            Self::find_column(df, &column).map(str::to_string).ok_or_else(|| {
                VolSpreadError::Data(format!(
                    "Missing required column: {} (tried aliases: {:?})",
                    column.as_str(),
                    column.aliases()
                ))
            })
        };
        let optional = |column: MarketColumn| Self::find_column(df, &column).map(str::to_string);

        let mut map = ColumnMap {
            date: required(MarketColumn::Date)?,
            spot: required(MarketColumn::Spot)?,
            iv: optional(MarketColumn::Iv),
            spread: optional(MarketColumn::Spread),
            zscore: optional(MarketColumn::ZScore),
            premium: optional(MarketColumn::Premium),
            ..Default::default()
        };

        if map.premium.is_none() {
            if let (Some(ce), Some(pe)) = (optional(MarketColumn::CallPrice), optional(MarketColumn::PutPrice)) {
                map.legs = Some((ce, pe));
            }
        }

        for name in df.get_column_names() {
            if let Some(window) = hv_window(name.as_str()) {
                map.hv.insert(window, name.to_string());
            }
        }

        // Validate column types are numeric
        let numeric = [Some(&map.spot), map.iv.as_ref(), map.spread.as_ref(), map.zscore.as_ref(), map.premium.as_ref()];
        for name in numeric.into_iter().flatten().chain(map.hv.values()) {
            let column = df.column(name)?;
            if !matches!(column.dtype(), DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32) {
                return Err(VolSpreadError::Data(format!(
                    "Column '{}' must be numeric, found {:?}",
                    name,
                    column.dtype()
                )));
            }
        }

        Ok(map)
    }

    /// Find column by checking aliases
    fn find_column(df: &DataFrame, column: &MarketColumn) -> Option<&'static str> {
        let columns = df.get_column_names();
        for alias in column.aliases() {
            if columns.iter().any(|c| c.as_str() == alias) {
                return Some(alias);
            }
        }
        None
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(VolSpreadError::Data(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Null counts per column, only for columns that have any.
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_resolve_full_dataset() {
        let df = df! {
            "date" => &["2024-01-02", "2024-01-03"],
            "PRICE" => &[470.0, 468.5],
            "IV" => &[13.2, 14.1],
            "HV10" => &[11.0, 11.5],
            "HV30" => &[12.0, 12.2],
            "Spread" => &[1.2, 1.9],
            "Spread_z" => &[0.4, 1.6],
        }
        .unwrap();

        let map = DataValidator::resolve_columns(&df).unwrap();
        assert_eq!(map.spot, "PRICE");
        assert_eq!(map.iv.as_deref(), Some("IV"));
        assert_eq!(map.hv.keys().copied().collect::<Vec<_>>(), vec![10, 30]);
        assert_eq!(map.zscore.as_deref(), Some("Spread_z"));
        assert!(map.premium.is_none());
    }

    #[test]
    fn test_missing_spot_column() {
        let df = df! {
            "date" => &["2024-01-02"],
            "IV" => &[13.2],
        }
        .unwrap();

        let result = DataValidator::resolve_columns(&df);
        assert!(matches!(result, Err(VolSpreadError::Data(_))));
    }

    #[test]
    fn test_option_legs_detected() {
        let df = df! {
            "Date" => &["2024-01-02"],
            "spot" => &[22000.0],
            "ce_price" => &[180.0],
            "pe_price" => &[165.0],
        }
        .unwrap();

        let map = DataValidator::resolve_columns(&df).unwrap();
        assert_eq!(map.date, "Date");
        assert_eq!(map.legs, Some(("ce_price".to_string(), "pe_price".to_string())));
    }

    #[test]
    fn test_text_price_rejected() {
        let df = df! {
            "date" => &["2024-01-02"],
            "close" => &["n/a"],
        }
        .unwrap();

        assert!(DataValidator::resolve_columns(&df).is_err());
    }
}
