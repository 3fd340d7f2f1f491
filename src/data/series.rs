use crate::error::{Result, VolSpreadError};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

/// Strictly increasing trading dates with O(1) date -> position lookup.
///
/// Positional offsets ("entry + N days") go through the ordered vector,
/// keyed access goes through the map. Both views are built once.
#[derive(Debug, Clone)]
pub struct DateIndex {
    dates: Vec<NaiveDate>,
    positions: HashMap<NaiveDate, usize>,
}

impl DateIndex {
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self> {
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(VolSpreadError::Data(format!(
                    "Dates must be strictly increasing: {} at position {} follows {}",
                    pair[1],
                    i + 1,
                    pair[0]
                )));
            }
        }

        let positions = dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        Ok(Self { dates, positions })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn date(&self, position: usize) -> Option<NaiveDate> {
        self.dates.get(position).copied()
    }

    pub fn position(&self, date: &NaiveDate) -> Option<usize> {
        self.positions.get(date).copied()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

impl PartialEq for DateIndex {
    fn eq(&self, other: &Self) -> bool {
        self.dates == other.dates
    }
}

/// Values aligned one-to-one with a shared [`DateIndex`].
#[derive(Debug, Clone)]
pub struct TimeSeries<T> {
    index: Arc<DateIndex>,
    values: Vec<T>,
}

impl<T> TimeSeries<T> {
    pub fn new(index: Arc<DateIndex>, values: Vec<T>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(VolSpreadError::Configuration(format!(
                "Series length {} does not match index length {}",
                values.len(),
                index.len()
            )));
        }
        Ok(Self { index, values })
    }

    /// Builds a series with its own index from `(date, value)` pairs.
    pub fn from_pairs(pairs: Vec<(NaiveDate, T)>) -> Result<Self> {
        let (dates, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        let index = Arc::new(DateIndex::new(dates)?);
        Ok(Self { index, values })
    }

    pub fn index(&self) -> &Arc<DateIndex> {
        &self.index
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.values.get(position)
    }

    pub fn get_by_date(&self, date: &NaiveDate) -> Option<&T> {
        self.index.position(date).and_then(|i| self.values.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &T)> {
        self.index.dates().iter().copied().zip(self.values.iter())
    }

    /// Fails with a configuration error unless both series share the same dates.
    /// No reindexing or alignment is attempted.
    pub fn ensure_same_index<U>(&self, other: &TimeSeries<U>, what: &str) -> Result<()> {
        if Arc::ptr_eq(&self.index, &other.index) || *self.index == *other.index {
            return Ok(());
        }
        Err(VolSpreadError::Configuration(format!(
            "Mismatched date index for {}: {} dates vs {} dates",
            what,
            self.index.len(),
            other.index.len()
        )))
    }

    pub fn map<U, F>(&self, f: F) -> TimeSeries<U>
    where
        F: FnMut(&T) -> U,
    {
        TimeSeries {
            index: Arc::clone(&self.index),
            values: self.values.iter().map(f).collect(),
        }
    }
}
