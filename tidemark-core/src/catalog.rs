//! Per-indicator catalog of observed series, fitted models and predictions.
//!
//! The catalog is built once from historical data and never mutated afterwards. Every
//! entry is shared through an [`Arc`], so consumers (both chart axes and the scenario
//! engine) read the same series without copying them. Changing the regression settings
//! or the horizon builds a new catalog.

use crate::errors::{TrendError, TrendResult};
use crate::extraction::SeriesExtractor;
use crate::extrapolate::{extended_years, extrapolate, DEFAULT_HORIZON_YEARS};
use crate::indicator::Indicator;
use crate::regression::{fit, RegressionConfig, RegressionModel};
use crate::timeseries::{Series, Year};
use log::debug;
use ndarray::Array1;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything known about one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub indicator: Indicator,
    /// Observed values over the historical years
    pub series: Arc<Series>,
    pub model: Arc<RegressionModel>,
    /// Model evaluated over the extended years
    pub prediction: Arc<Series>,
}

/// Immutable map from [`Indicator`] to its [`CatalogEntry`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorCatalog {
    entries: BTreeMap<Indicator, CatalogEntry>,
    historical_years: Array1<Year>,
    extended_years: Array1<Year>,
    regression: RegressionConfig,
    horizon: Year,
}

impl IndicatorCatalog {
    pub fn get(&self, indicator: Indicator) -> Option<&CatalogEntry> {
        self.entries.get(&indicator)
    }

    pub fn contains(&self, indicator: Indicator) -> bool {
        self.entries.contains_key(&indicator)
    }

    /// Resolve a key or label to an indicator held by this catalog
    pub fn resolve(&self, name: &str) -> TrendResult<Indicator> {
        let indicator: Indicator = name.parse()?;
        if self.contains(indicator) {
            Ok(indicator)
        } else {
            Err(TrendError::UnknownIndicator(name.to_string()))
        }
    }

    /// Indicators available for selection, in registry order
    pub fn indicators(&self) -> Vec<Indicator> {
        self.entries.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn historical_years(&self) -> &Array1<Year> {
        &self.historical_years
    }

    pub fn extended_years(&self) -> &Array1<Year> {
        &self.extended_years
    }

    pub fn regression(&self) -> &RegressionConfig {
        &self.regression
    }

    pub fn horizon(&self) -> Year {
        self.horizon
    }

    /// A catalog with the same observations and models predicted over a new horizon
    pub fn with_horizon(&self, horizon: Year) -> TrendResult<IndicatorCatalog> {
        let extended_years = extended_years(&self.historical_years, horizon)?;
        let entries = self
            .entries
            .iter()
            .map(|(indicator, entry)| {
                let prediction = extrapolate(&entry.model, &extended_years)?;
                Ok((
                    *indicator,
                    CatalogEntry {
                        indicator: *indicator,
                        series: Arc::clone(&entry.series),
                        model: Arc::clone(&entry.model),
                        prediction: Arc::new(prediction),
                    },
                ))
            })
            .collect::<TrendResult<BTreeMap<_, _>>>()?;

        debug!("Re-extrapolated {} indicators to horizon {}", entries.len(), horizon);
        Ok(IndicatorCatalog {
            entries,
            historical_years: self.historical_years.clone(),
            extended_years,
            regression: self.regression,
            horizon,
        })
    }

    /// A catalog refitted with new regression settings
    pub fn with_regression(&self, regression: RegressionConfig) -> TrendResult<IndicatorCatalog> {
        let mut builder = CatalogBuilder::new();
        builder
            .with_regression(regression)
            .with_horizon(self.horizon);
        for entry in self.entries.values() {
            builder.with_series(entry.indicator, (*entry.series).clone());
        }
        builder.build()
    }
}

/// Build an [`IndicatorCatalog`] from historical series.
///
/// All series must cover the same years. Each one is fitted with the configured
/// regression and extrapolated over the extended axis.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    series: BTreeMap<Indicator, Series>,
    regression: RegressionConfig,
    horizon: Year,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            series: BTreeMap::new(),
            regression: RegressionConfig::default(),
            horizon: DEFAULT_HORIZON_YEARS,
        }
    }

    /// Add (or replace) the observed series for an indicator
    pub fn with_series(&mut self, indicator: Indicator, series: Series) -> &mut Self {
        self.series.insert(indicator, series);
        self
    }

    /// Extract and add the given indicators from raw records
    pub fn with_records(
        &mut self,
        records: &[Value],
        indicators: impl IntoIterator<Item = Indicator>,
    ) -> TrendResult<&mut Self> {
        let extracted = SeriesExtractor::new(indicators).extract(records)?;
        self.series.extend(extracted);
        Ok(self)
    }

    pub fn with_regression(&mut self, regression: RegressionConfig) -> &mut Self {
        self.regression = regression;
        self
    }

    pub fn with_horizon(&mut self, horizon: Year) -> &mut Self {
        self.horizon = horizon;
        self
    }

    pub fn build(&self) -> TrendResult<IndicatorCatalog> {
        let historical_years = match self.series.values().next() {
            Some(series) => series.years().clone(),
            None => {
                return Err(TrendError::InvalidDataset(
                    "no indicators were provided".to_string(),
                ))
            }
        };

        if let Some((indicator, _)) = self
            .series
            .iter()
            .find(|(_, series)| series.years() != &historical_years)
        {
            return Err(TrendError::MisalignedSeries(format!(
                "{} does not cover the same years as the other indicators",
                indicator
            )));
        }

        let extended_years = extended_years(&historical_years, self.horizon)?;

        let entries = self
            .series
            .iter()
            .map(|(indicator, series)| {
                let model = fit(series, &self.regression)?;
                let prediction = extrapolate(&model, &extended_years)?;
                debug!("{}: {}", indicator.key(), model);
                Ok((
                    *indicator,
                    CatalogEntry {
                        indicator: *indicator,
                        series: Arc::new(series.clone()),
                        model: Arc::new(model),
                        prediction: Arc::new(prediction),
                    },
                ))
            })
            .collect::<TrendResult<BTreeMap<_, _>>>()?;

        Ok(IndicatorCatalog {
            entries,
            historical_years,
            extended_years,
            regression: self.regression,
            horizon: self.horizon,
        })
    }
}
