use std::collections::BTreeMap;

/// Named columns of a volatility dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketColumn {
    Date,
    Spot,
    Iv,
    Spread,
    ZScore,
    Premium,
    CallPrice,
    PutPrice,
}

impl MarketColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Spot => "spot",
            Self::Iv => "iv",
            Self::Spread => "spread",
            Self::ZScore => "z",
            Self::Premium => "premium",
            Self::CallPrice => "ce_price",
            Self::PutPrice => "pe_price",
        }
    }

    /// Common alternative column names
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Date => vec!["date", "Date", "DATE", "datetime", "timestamp"],
            Self::Spot => vec!["PRICE", "price", "Price", "spot", "Spot", "close", "Close"],
            Self::Iv => vec!["IV", "iv", "implied_vol"],
            Self::Spread => vec!["Spread", "spread"],
            Self::ZScore => vec!["Spread_z", "spread_z", "z", "zscore"],
            Self::Premium => vec!["premium", "Premium", "straddle_premium"],
            Self::CallPrice => vec!["ce_price", "CE_PRICE", "call_price"],
            Self::PutPrice => vec!["pe_price", "PE_PRICE", "put_price"],
        }
    }
}

/// Actual CSV header for each recognised column.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    pub date: String,
    pub spot: String,
    pub iv: Option<String>,
    pub hv: BTreeMap<usize, String>,
    pub spread: Option<String>,
    pub zscore: Option<String>,
    pub premium: Option<String>,
    /// Call and put legs summed into a straddle premium when no premium column exists.
    pub legs: Option<(String, String)>,
}

/// Parses `HV20` / `hv20` into the window length.
pub fn hv_window(column: &str) -> Option<usize> {
    let prefix = column.get(..2)?;
    if !prefix.eq_ignore_ascii_case("hv") {
        return None;
    }
    column[2..].parse().ok().filter(|&w: &usize| w > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hv_window_parsing() {
        assert_eq!(hv_window("HV30"), Some(30));
        assert_eq!(hv_window("hv10"), Some(10));
        assert_eq!(hv_window("HV"), None);
        assert_eq!(hv_window("HVx"), None);
        assert_eq!(hv_window("IV30"), None);
    }
}
