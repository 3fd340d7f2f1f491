use super::series::{DateIndex, TimeSeries};
use crate::error::{Result, VolSpreadError};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Daily market columns sharing one date index.
#[derive(Debug, Clone)]
pub struct MarketDataset {
    index: Arc<DateIndex>,
    spot: TimeSeries<f64>,
    iv: Option<TimeSeries<f64>>,
    hv: BTreeMap<usize, TimeSeries<f64>>,
    spread: Option<TimeSeries<f64>>,
    zscore: Option<TimeSeries<f64>>,
    premium: Option<TimeSeries<f64>>,
}

impl MarketDataset {
    pub fn new(dates: Vec<NaiveDate>, spot: Vec<f64>) -> Result<Self> {
        if dates.is_empty() {
            return Err(VolSpreadError::Data("Market dataset has no rows".to_string()));
        }
        let index = Arc::new(DateIndex::new(dates)?);
        let spot = TimeSeries::new(Arc::clone(&index), spot)?;
        Ok(Self {
            index,
            spot,
            iv: None,
            hv: BTreeMap::new(),
            spread: None,
            zscore: None,
            premium: None,
        })
    }

    fn column(&self, values: Vec<f64>) -> Result<TimeSeries<f64>> {
        TimeSeries::new(Arc::clone(&self.index), values)
    }

    pub fn with_iv(mut self, values: Vec<f64>) -> Result<Self> {
        self.iv = Some(self.column(values)?);
        Ok(self)
    }

    pub fn with_hv(mut self, window: usize, values: Vec<f64>) -> Result<Self> {
        let series = self.column(values)?;
        self.hv.insert(window, series);
        Ok(self)
    }

    pub fn with_spread(mut self, values: Vec<f64>) -> Result<Self> {
        self.spread = Some(self.column(values)?);
        Ok(self)
    }

    pub fn with_zscore(mut self, values: Vec<f64>) -> Result<Self> {
        self.zscore = Some(self.column(values)?);
        Ok(self)
    }

    pub fn with_premium(mut self, values: Vec<f64>) -> Result<Self> {
        self.premium = Some(self.column(values)?);
        Ok(self)
    }

    pub fn index(&self) -> &Arc<DateIndex> {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn spot(&self) -> &TimeSeries<f64> {
        &self.spot
    }

    pub fn iv(&self) -> Option<&TimeSeries<f64>> {
        self.iv.as_ref()
    }

    pub fn hv(&self, window: usize) -> Option<&TimeSeries<f64>> {
        self.hv.get(&window)
    }

    pub fn hv_windows(&self) -> Vec<usize> {
        self.hv.keys().copied().collect()
    }

    pub fn spread(&self) -> Option<&TimeSeries<f64>> {
        self.spread.as_ref()
    }

    pub fn zscore(&self) -> Option<&TimeSeries<f64>> {
        self.zscore.as_ref()
    }

    pub fn premium(&self) -> Option<&TimeSeries<f64>> {
        self.premium.as_ref()
    }

    pub fn require_iv(&self) -> Result<&TimeSeries<f64>> {
        self.iv()
            .ok_or_else(|| VolSpreadError::Data("Dataset has no IV column".to_string()))
    }

    pub fn require_hv(&self, window: usize) -> Result<&TimeSeries<f64>> {
        self.hv(window).ok_or_else(|| {
            VolSpreadError::Data(format!(
                "Dataset has no HV{} column (available: {:?})",
                window,
                self.hv_windows()
            ))
        })
    }
}
