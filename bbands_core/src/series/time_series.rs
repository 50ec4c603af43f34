use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{band_error::BandError, utils::from_option};

/// Ordered observations with their index. Missing values are NaN.
///
/// The index is expected to increase monotonically; it is carried through
/// to the output untouched and never inspected. `index` and `values` always
/// have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawSeries<I>",
    bound(deserialize = "I: Deserialize<'de>")
)]
pub struct TimeSeries<I = usize> {
    index: Vec<I>,
    values: Vec<f64>,
}

/// Unchecked wire shape of a [`TimeSeries`].
#[derive(Deserialize)]
struct RawSeries<I> {
    index: Vec<I>,
    values: Vec<f64>,
}

impl<I> TryFrom<RawSeries<I>> for TimeSeries<I> {
    type Error = BandError;

    fn try_from(raw: RawSeries<I>) -> Result<Self, Self::Error> {
        Self::new(raw.index, raw.values)
    }
}

impl TimeSeries<usize> {
    /// Series indexed by integer position.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            index: (0..values.len()).collect(),
            values,
        }
    }

    /// Series indexed by integer position, `None` marking a missing value.
    pub fn from_options(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::from_values(values.into_iter().map(from_option).collect::<Vec<_>>())
    }
}

impl TimeSeries<NaiveDateTime> {
    /// Series indexed by unix timestamp (seconds). Fails on the first
    /// timestamp chrono cannot represent.
    pub fn from_timestamps(
        rows: impl IntoIterator<Item = (i64, f64)>,
    ) -> Result<Self, BandError> {
        rows.into_iter()
            .enumerate()
            .map(|(row, (ts, v))| {
                chrono::DateTime::from_timestamp(ts, 0)
                    .map(|dt| (dt.naive_utc(), v))
                    .ok_or_else(|| {
                        BandError::series_format(format!(
                            "timestamp {} at row {} is out of range",
                            ts, row
                        ))
                    })
            })
            .collect()
    }
}

impl<I> TimeSeries<I> {
    pub fn new(index: Vec<I>, values: Vec<f64>) -> Result<Self, BandError> {
        if index.len() != values.len() {
            return Err(BandError::series_format(format!(
                "index has {} rows, values has {}",
                index.len(),
                values.len()
            )));
        }
        Ok(Self { index, values })
    }

    pub fn from_pairs(rows: impl IntoIterator<Item = (I, f64)>) -> Self {
        let (index, values) = rows.into_iter().unzip();
        Self { index, values }
    }

    pub fn index(&self) -> &[I] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<(&I, f64)> {
        Some((self.index.get(i)?, *self.values.get(i)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&I, f64)> + '_ {
        self.index.iter().zip(self.values.iter().copied())
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

impl<I> FromIterator<(I, f64)> for TimeSeries<I> {
    fn from_iter<T: IntoIterator<Item = (I, f64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
