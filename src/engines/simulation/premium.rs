use crate::data::TimeSeries;
use crate::error::{Result, VolSpreadError};
use chrono::NaiveDate;

/// Notional premium of a trade.
#[derive(Debug, Clone, Copy)]
pub enum PremiumSource<'a> {
    /// Fraction of the entry price.
    Flat(f64),
    /// Explicit premium per date. Every signal date must be covered.
    Series(&'a TimeSeries<f64>),
}

impl<'a> PremiumSource<'a> {
    /// An explicit series wins over the flat percentage.
    pub fn resolve(premium_pct: f64, series: Option<&'a TimeSeries<f64>>) -> Self {
        match series {
            Some(series) => Self::Series(series),
            None => Self::Flat(premium_pct),
        }
    }

    pub fn premium_at(&self, date: NaiveDate, entry_price: f64) -> Result<f64> {
        match self {
            Self::Flat(pct) => Ok(entry_price * pct),
            Self::Series(series) => {
                let premium = series.get_by_date(&date).copied().ok_or_else(|| {
                    VolSpreadError::Data(format!("No premium available for signal date {}", date))
                })?;
                if !premium.is_finite() {
                    return Err(VolSpreadError::Data(format!(
                        "Premium for signal date {} is not a number",
                        date
                    )));
                }
                Ok(premium)
            }
        }
    }
}
