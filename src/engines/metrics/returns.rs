use crate::types::TradeRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Chronological PnL stream and its running sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlSeries {
    pub dates: Vec<NaiveDate>,
    pub pnl: Vec<f64>,
    pub cum_pnl: Vec<f64>,
}

impl PnlSeries {
    /// Trades must already be in ascending date order.
    pub fn from_trades(trades: &[TradeRecord]) -> Self {
        let dates = trades.iter().map(|t| t.date).collect();
        let pnl: Vec<f64> = trades.iter().map(|t| t.pnl).collect();
        Self::new(dates, pnl)
    }

    pub fn new(dates: Vec<NaiveDate>, pnl: Vec<f64>) -> Self {
        let cum_pnl = pnl
            .iter()
            .scan(0.0, |acc, &p| {
                *acc += p;
                Some(*acc)
            })
            .collect();
        Self { dates, pnl, cum_pnl }
    }

    pub fn len(&self) -> usize {
        self.pnl.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pnl.is_empty()
    }

    /// Calendar days between the first and last record.
    pub fn elapsed_days(&self) -> i64 {
        match (self.dates.first(), self.dates.last()) {
            (Some(first), Some(last)) => (*last - *first).num_days(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_sum_and_span() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let series = PnlSeries::new(vec![d1, d2], vec![1.0, -0.25]);
        assert_eq!(series.cum_pnl, vec![1.0, 0.75]);
        assert_eq!(series.elapsed_days(), 30);
        assert_eq!(PnlSeries::default().elapsed_days(), 0);
    }
}
