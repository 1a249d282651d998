//! Selection state behind the dual-axis chart.
//!
//! The selector tracks which indicator is bound to each [`ChartAxis`], whether the
//! predictions are overlaid, and the active what-if scenario (if any). Its states are
//! the product of [`AxisState`] and [`PredictionState`]:
//!
//! | Transition                     | Effect                                                   |
//! |--------------------------------|----------------------------------------------------------|
//! | `select_axis`                  | binds an indicator to an axis, clears the scenario       |
//! | `toggle_display_predictions`   | flips the overlay; no-op unless both axes are bound      |
//! | `set_scenario_percentage`      | replaces the overlay with scenario predictions           |
//! | `clear_scenario`               | restores the plain predictions                           |
//!
//! Every transition returns the recomputed [`ChartPayload`]. A rejected transition
//! returns an error and leaves the state, and therefore the payload, unchanged.

use crate::payload::{ChartDataset, ChartPayload};
use crate::style::ChartAxis;
use log::{debug, warn};
use std::sync::Arc;
use tidemark_core::catalog::{CatalogEntry, IndicatorCatalog};
use tidemark_core::errors::{TrendError, TrendResult};
use tidemark_core::indicator::Indicator;
use tidemark_core::scenario::{apply_scenario, Percentage, ScenarioOutcome, ScenarioSide};
use tidemark_core::timeseries::FloatValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisState {
    NoSelection,
    OneAxisSelected,
    BothAxesSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionState {
    PredictionsOff,
    PredictionsOn,
}

/// Indicator bound to each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisSelection {
    primary: Option<Indicator>,
    secondary: Option<Indicator>,
}

impl AxisSelection {
    pub fn get(&self, axis: ChartAxis) -> Option<Indicator> {
        match axis {
            ChartAxis::Primary => self.primary,
            ChartAxis::Secondary => self.secondary,
        }
    }

    fn set(&mut self, axis: ChartAxis, indicator: Indicator) {
        match axis {
            ChartAxis::Primary => self.primary = Some(indicator),
            ChartAxis::Secondary => self.secondary = Some(indicator),
        }
    }

    /// `(primary, secondary)` once both axes are bound
    pub fn pair(&self) -> Option<(Indicator, Indicator)> {
        self.primary.zip(self.secondary)
    }

    pub fn state(&self) -> AxisState {
        match (self.primary, self.secondary) {
            (None, None) => AxisState::NoSelection,
            (Some(_), Some(_)) => AxisState::BothAxesSelected,
            _ => AxisState::OneAxisSelected,
        }
    }

    fn bound(&self) -> impl Iterator<Item = (ChartAxis, Indicator)> + '_ {
        ChartAxis::BOTH
            .into_iter()
            .filter_map(move |axis| self.get(axis).map(|indicator| (axis, indicator)))
    }
}

/// Interactive selection over an [`IndicatorCatalog`].
#[derive(Debug, Clone)]
pub struct DisplaySelector {
    catalog: Arc<IndicatorCatalog>,
    selection: AxisSelection,
    show_predictions: bool,
    scenario: Option<ScenarioOutcome>,
}

impl DisplaySelector {
    pub fn new(catalog: Arc<IndicatorCatalog>) -> Self {
        Self {
            catalog,
            selection: AxisSelection::default(),
            show_predictions: false,
            scenario: None,
        }
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &AxisSelection {
        &self.selection
    }

    pub fn show_predictions(&self) -> bool {
        self.show_predictions
    }

    pub fn scenario(&self) -> Option<&ScenarioOutcome> {
        self.scenario.as_ref()
    }

    pub fn state(&self) -> (AxisState, PredictionState) {
        let predictions = if self.show_predictions {
            PredictionState::PredictionsOn
        } else {
            PredictionState::PredictionsOff
        };
        (self.selection.state(), predictions)
    }

    /// Bind the indicator named `name` (key or label) to `axis`
    ///
    /// Fails with [`TrendError::UnknownIndicator`] if the catalog does not hold it.
    pub fn select_axis(&mut self, axis: ChartAxis, name: &str) -> TrendResult<ChartPayload> {
        let indicator = self.catalog.resolve(name).inspect_err(|e| {
            warn!("Rejected selection of {:?} on axis {}: {}", name, axis, e);
        })?;
        self.select_indicator(axis, indicator)
    }

    pub fn select_indicator(
        &mut self,
        axis: ChartAxis,
        indicator: Indicator,
    ) -> TrendResult<ChartPayload> {
        if !self.catalog.contains(indicator) {
            warn!("Rejected selection of {} on axis {}", indicator.key(), axis);
            return Err(TrendError::UnknownIndicator(indicator.key().to_string()));
        }

        self.selection.set(axis, indicator);
        self.scenario = None;
        debug!("Bound {} to axis {}", indicator.key(), axis);
        Ok(self.payload())
    }

    /// Overlay (or remove) the predictions of both bound indicators
    ///
    /// Does nothing until both axes are bound.
    pub fn toggle_display_predictions(&mut self) -> ChartPayload {
        if self.selection.pair().is_none() {
            warn!("Ignoring prediction toggle: both axes must be selected first");
            return self.payload();
        }

        self.show_predictions = !self.show_predictions;
        self.scenario = None;
        debug!("Predictions shown: {}", self.show_predictions);
        self.payload()
    }

    /// Scale the primary prediction to `percentage` and propagate it to the secondary one
    ///
    /// The percentage is validated first. Without two bound axes and visible predictions
    /// the call changes nothing.
    pub fn set_scenario_percentage(&mut self, percentage: FloatValue) -> TrendResult<ChartPayload> {
        let percentage = Percentage::new(percentage)?;

        let Some((primary, secondary)) = self.selection.pair() else {
            warn!("Ignoring scenario: both axes must be selected first");
            return Ok(self.payload());
        };
        if !self.show_predictions {
            warn!("Ignoring scenario: predictions are not shown");
            return Ok(self.payload());
        }

        let primary = self.entry(primary)?;
        let secondary = self.entry(secondary)?;
        let outcome = apply_scenario(
            ScenarioSide::new(&primary.prediction, &primary.model),
            ScenarioSide::new(&secondary.prediction, &secondary.model),
            percentage,
        )
        .inspect_err(|e| warn!("Rejected scenario: {}", e))?;

        self.scenario = Some(outcome);
        Ok(self.payload())
    }

    pub fn clear_scenario(&mut self) -> ChartPayload {
        self.scenario = None;
        self.payload()
    }

    /// Swap in a rebuilt catalog, keeping the current bindings
    ///
    /// Fails if a bound indicator is missing from the new catalog.
    pub fn replace_catalog(&mut self, catalog: Arc<IndicatorCatalog>) -> TrendResult<ChartPayload> {
        if let Some((_, missing)) = self
            .selection
            .bound()
            .find(|(_, indicator)| !catalog.contains(*indicator))
        {
            return Err(TrendError::UnknownIndicator(missing.key().to_string()));
        }

        self.catalog = catalog;
        self.scenario = None;
        Ok(self.payload())
    }

    /// The chart contents for the current state
    pub fn payload(&self) -> ChartPayload {
        let years = if self.show_predictions {
            self.catalog.extended_years()
        } else {
            self.catalog.historical_years()
        };

        let mut datasets: Vec<ChartDataset> = self
            .selection
            .bound()
            .filter_map(|(axis, indicator)| {
                self.catalog
                    .get(indicator)
                    .map(|entry| ChartDataset::observed(indicator, axis, &entry.series, years))
            })
            .collect();

        if self.show_predictions {
            if let Some((primary, secondary)) = self.selection.pair() {
                match &self.scenario {
                    Some(outcome) => {
                        datasets.push(ChartDataset::scenario(
                            primary,
                            ChartAxis::Primary,
                            &outcome.primary,
                            years,
                            outcome.percentage,
                        ));
                        datasets.push(ChartDataset::scenario(
                            secondary,
                            ChartAxis::Secondary,
                            &outcome.secondary,
                            years,
                            outcome.percentage,
                        ));
                    }
                    None => {
                        for (axis, indicator) in [
                            (ChartAxis::Primary, primary),
                            (ChartAxis::Secondary, secondary),
                        ] {
                            if let Some(entry) = self.catalog.get(indicator) {
                                datasets.push(ChartDataset::prediction(
                                    indicator,
                                    axis,
                                    &entry.prediction,
                                    years,
                                ));
                            }
                        }
                    }
                }
            }
        }

        ChartPayload::new(years, datasets)
    }

    fn entry(&self, indicator: Indicator) -> TrendResult<&CatalogEntry> {
        self.catalog
            .get(indicator)
            .ok_or_else(|| TrendError::UnknownIndicator(indicator.key().to_string()))
    }
}
