use serde::ser::{Serialize, SerializeMap, Serializer};
use strum::IntoEnumIterator;

use crate::common::enums::BandColumn;
use crate::math::boll::BollMetric;

/// Column-oriented Bollinger output aligned row for row with the input.
///
/// Undefined cells are NaN in every column.
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable<I = usize> {
    col_prefix: String,
    index: Vec<I>,
    mid: Vec<f64>,
    upper: Vec<f64>,
    lower: Vec<f64>,
    percent_b: Option<Vec<f64>>,
}

/// One row of a [`BandTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRow<'a, I> {
    pub index: &'a I,
    pub mid: f64,
    pub upper: f64,
    pub lower: f64,
    pub percent_b: Option<f64>,
}

impl<I> BandTable<I> {
    /// Lay out per-row results as columns. Lengths must match `index`.
    pub(crate) fn assemble(
        col_prefix: impl Into<String>,
        index: Vec<I>,
        bands: &[BollMetric],
        percent_b: Option<Vec<f64>>,
    ) -> Self {
        debug_assert_eq!(index.len(), bands.len());
        debug_assert!(percent_b.as_ref().map_or(true, |pb| pb.len() == index.len()));

        Self {
            col_prefix: col_prefix.into(),
            index,
            mid: bands.iter().map(|b| b.mid).collect(),
            upper: bands.iter().map(|b| b.upper).collect(),
            lower: bands.iter().map(|b| b.lower).collect(),
            percent_b,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[I] {
        &self.index
    }

    pub fn col_prefix(&self) -> &str {
        &self.col_prefix
    }

    pub fn mid(&self) -> &[f64] {
        &self.mid
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn percent_b(&self) -> Option<&[f64]> {
        self.percent_b.as_deref()
    }

    pub fn has_percent_b(&self) -> bool {
        self.percent_b.is_some()
    }

    pub fn column_of(&self, kind: BandColumn) -> Option<&[f64]> {
        match kind {
            BandColumn::Mid => Some(&self.mid),
            BandColumn::Upper => Some(&self.upper),
            BandColumn::Lower => Some(&self.lower),
            BandColumn::PercentB => self.percent_b(),
        }
    }

    /// Look a column up by its full, prefixed name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let suffix = name.strip_prefix(self.col_prefix.as_str())?;
        self.column_of(suffix.parse().ok()?)
    }

    /// `(name, values)` for every present column, in layout order.
    pub fn columns(&self) -> Vec<(String, &[f64])> {
        BandColumn::iter()
            .filter_map(|kind| {
                self.column_of(kind)
                    .map(|values| (kind.with_prefix(&self.col_prefix), values))
            })
            .collect()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns().into_iter().map(|(name, _)| name).collect()
    }

    pub fn row(&self, i: usize) -> Option<BandRow<'_, I>> {
        Some(BandRow {
            index: self.index.get(i)?,
            mid: self.mid[i],
            upper: self.upper[i],
            lower: self.lower[i],
            percent_b: self.percent_b.as_ref().map(|pb| pb[i]),
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = BandRow<'_, I>> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}

/// Serializes as `{"index": [...], "<prefix>mid": [...], ...}`; NaN cells
/// come out as `null`.
impl<I: Serialize> Serialize for BandTable<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let columns = self.columns();
        let mut map = serializer.serialize_map(Some(columns.len() + 1))?;
        map.serialize_entry("index", &self.index)?;
        for (name, values) in columns {
            let cells: Vec<Option<f64>> = values
                .iter()
                .map(|v| if v.is_nan() { None } else { Some(*v) })
                .collect();
            map.serialize_entry(&name, &cells)?;
        }
        map.end()
    }
}
