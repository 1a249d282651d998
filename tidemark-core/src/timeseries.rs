//! Yearly timeseries.
//!
//! A [`Series`] holds one value per year, with the years strictly increasing.
//! Series are never edited in place; every transformation returns a new series.

use crate::errors::{TrendError, TrendResult};
use ndarray::Array1;
use serde::Serialize;

pub type FloatValue = f64;
pub type Year = i32;

/// An ordered sequence of `(year, value)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    years: Array1<Year>,
    values: Array1<FloatValue>,
}

impl Series {
    /// Create a new series
    ///
    /// Fails if the two columns differ in length or the years are not strictly increasing.
    pub fn new(years: Array1<Year>, values: Array1<FloatValue>) -> TrendResult<Self> {
        if years.len() != values.len() {
            return Err(TrendError::MisalignedSeries(format!(
                "{} years but {} values",
                years.len(),
                values.len()
            )));
        }

        if let Some((previous, year)) = years
            .iter()
            .zip(years.iter().skip(1))
            .find(|(previous, year)| year <= previous)
        {
            return Err(TrendError::MisalignedSeries(format!(
                "year {} follows {}; years must be strictly increasing",
                year, previous
            )));
        }

        Ok(Self { years, values })
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Year, FloatValue)>) -> TrendResult<Self> {
        let (years, values): (Vec<Year>, Vec<FloatValue>) = pairs.into_iter().unzip();
        Self::new(Array1::from(years), Array1::from(values))
    }

    pub fn years(&self) -> &Array1<Year> {
        &self.years
    }

    pub fn values(&self) -> &Array1<FloatValue> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Year, FloatValue)> + '_ {
        self.years.iter().copied().zip(self.values.iter().copied())
    }

    /// Value recorded for `year`, if the series covers it
    pub fn value_at(&self, year: Year) -> Option<FloatValue> {
        self.years
            .iter()
            .position(|y| *y == year)
            .map(|index| self.values[index])
    }

    /// Whether both series have the same years in the same order
    pub fn is_aligned_with(&self, other: &Series) -> bool {
        self.years == other.years
    }

    /// Build a new series on the same years with transformed values
    pub fn map_values(&self, f: impl FnMut(FloatValue) -> FloatValue) -> Series {
        Series {
            years: self.years.clone(),
            values: self.values.mapv(f),
        }
    }

    pub fn first_year(&self) -> Option<Year> {
        self.years.iter().next().copied()
    }

    pub fn last_year(&self) -> Option<Year> {
        self.years.iter().last().copied()
    }
}
