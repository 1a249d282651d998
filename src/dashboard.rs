//! The dashboard: a catalog built from configuration and data, plus the axis selector.

use crate::config::TidemarkConfig;
use crate::dataset::{load_records, load_records_str};
use log::{debug, info};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tidemark_chart::payload::{ChartOptions, ChartPayload};
use tidemark_chart::selector::DisplaySelector;
use tidemark_chart::style::ChartAxis;
use tidemark_core::catalog::{CatalogBuilder, IndicatorCatalog};
use tidemark_core::errors::{TrendError, TrendResult};
use tidemark_core::indicator::Indicator;
use tidemark_core::regression::RegressionConfig;
use tidemark_core::timeseries::{FloatValue, Year};

pub const CHART_TITLE: &str = "Chart.js Line Chart - Multi Axis";

#[derive(Debug, Clone)]
pub struct Dashboard {
    config: TidemarkConfig,
    selector: DisplaySelector,
}

impl Dashboard {
    /// Fit and extrapolate every configured indicator found in `records`
    pub fn new(config: TidemarkConfig, records: &[Value]) -> TrendResult<Self> {
        config.validate()?;

        let catalog = CatalogBuilder::new()
            .with_records(records, config.indicators.iter().copied())?
            .with_regression(config.regression)
            .with_horizon(config.horizon_years)
            .build()?;
        info!(
            "Built catalog of {} indicators over {} years",
            catalog.indicators().len(),
            catalog.historical_years().len()
        );

        Ok(Self {
            config,
            selector: DisplaySelector::new(Arc::new(catalog)),
        })
    }

    pub fn from_json_str(config: TidemarkConfig, content: &str) -> TrendResult<Self> {
        Self::new(config, &load_records_str(content)?)
    }

    pub fn from_files(
        config_path: impl AsRef<Path>,
        dataset_path: impl AsRef<Path>,
    ) -> TrendResult<Self> {
        let config = TidemarkConfig::from_path(config_path)?;
        Self::new(config, &load_records(dataset_path)?)
    }

    pub fn config(&self) -> &TidemarkConfig {
        &self.config
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        self.selector.catalog()
    }

    pub fn selector(&self) -> &DisplaySelector {
        &self.selector
    }

    /// Indicators offered in both axis menus
    pub fn available_indicators(&self) -> Vec<Indicator> {
        self.catalog().indicators()
    }

    /// The fitted line of an indicator, e.g. `y = 5.0000x - 9700.0000`
    pub fn fitted_line(&self, indicator: Indicator) -> TrendResult<String> {
        self.catalog()
            .get(indicator)
            .map(|entry| entry.model.to_string())
            .ok_or_else(|| TrendError::UnknownIndicator(indicator.key().to_string()))
    }

    pub fn select_axis(&mut self, axis: ChartAxis, name: &str) -> TrendResult<ChartPayload> {
        self.selector.select_axis(axis, name)
    }

    pub fn toggle_display_predictions(&mut self) -> ChartPayload {
        self.selector.toggle_display_predictions()
    }

    pub fn set_scenario_percentage(&mut self, percentage: FloatValue) -> TrendResult<ChartPayload> {
        self.selector.set_scenario_percentage(percentage)
    }

    pub fn clear_scenario(&mut self) -> ChartPayload {
        self.selector.clear_scenario()
    }

    /// Predict `horizon` years past the observations, keeping the current selection
    pub fn set_horizon(&mut self, horizon: Year) -> TrendResult<ChartPayload> {
        let catalog = self.catalog().with_horizon(horizon)?;
        let payload = self.selector.replace_catalog(Arc::new(catalog))?;
        self.config.horizon_years = horizon;
        debug!("Horizon set to {} years", horizon);
        Ok(payload)
    }

    /// Refit every indicator, keeping the current selection
    pub fn set_regression(&mut self, regression: RegressionConfig) -> TrendResult<ChartPayload> {
        let catalog = self.catalog().with_regression(regression)?;
        let payload = self.selector.replace_catalog(Arc::new(catalog))?;
        self.config.regression = regression;
        debug!("Regression set to {:?}", regression);
        Ok(payload)
    }

    pub fn payload(&self) -> ChartPayload {
        self.selector.payload()
    }

    pub fn payload_json(&self) -> serde_json::Result<String> {
        self.payload().to_json()
    }

    pub fn options(&self) -> ChartOptions {
        ChartOptions::multi_axis(CHART_TITLE)
    }
}
