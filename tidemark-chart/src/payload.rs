//! Data handed to the chart renderer.
//!
//! A [`ChartPayload`] is derived from the current selection on every change and is
//! never used as a source of truth. Every dataset carries exactly one point per label;
//! years a series does not cover are `null`.
//!
//! The JSON form follows the Chart.js `data` object:
//!
//! ```json
//! {
//!   "labels": ["2000", "2001"],
//!   "datasets": [
//!     {
//!       "label": "Carbon Dioxide (ppm)",
//!       "data": [369.7, 371.3],
//!       "borderColor": "rgb(255, 99, 132)",
//!       "backgroundColor": "rgba(255, 99, 132, 0.5)",
//!       "yAxisID": "y"
//!     }
//!   ]
//! }
//! ```

use crate::style::{style_for, AxisPosition, ChartAxis};
use ndarray::Array1;
use serde::Serialize;
use std::collections::BTreeMap;
use tidemark_core::indicator::Indicator;
use tidemark_core::scenario::Percentage;
use tidemark_core::timeseries::{FloatValue, Series, Year};

/// What a dataset shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Observed,
    Prediction,
    Scenario,
}

/// A single line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Option<FloatValue>>,
    pub border_color: String,
    pub background_color: String,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: ChartAxis,
    #[serde(skip)]
    pub indicator: Indicator,
    #[serde(skip)]
    pub kind: DatasetKind,
}

impl ChartDataset {
    fn new(
        indicator: Indicator,
        axis: ChartAxis,
        kind: DatasetKind,
        label: String,
        series: &Series,
        years: &Array1<Year>,
    ) -> Self {
        let style = style_for(indicator);
        Self {
            label,
            data: years.iter().map(|year| series.value_at(*year)).collect(),
            border_color: style.border_color.to_string(),
            background_color: style.background_color.to_string(),
            y_axis_id: axis,
            indicator,
            kind,
        }
    }

    pub fn observed(
        indicator: Indicator,
        axis: ChartAxis,
        series: &Series,
        years: &Array1<Year>,
    ) -> Self {
        Self::new(
            indicator,
            axis,
            DatasetKind::Observed,
            indicator.label().to_string(),
            series,
            years,
        )
    }

    pub fn prediction(
        indicator: Indicator,
        axis: ChartAxis,
        series: &Series,
        years: &Array1<Year>,
    ) -> Self {
        Self::new(
            indicator,
            axis,
            DatasetKind::Prediction,
            format!("{} Prediction", indicator.label()),
            series,
            years,
        )
    }

    pub fn scenario(
        indicator: Indicator,
        axis: ChartAxis,
        series: &Series,
        years: &Array1<Year>,
        percentage: Percentage,
    ) -> Self {
        Self::new(
            indicator,
            axis,
            DatasetKind::Scenario,
            format!("{} Prediction ({}%)", indicator.label(), percentage.value()),
            series,
            years,
        )
    }
}

/// Labels and datasets for one render of the chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartPayload {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartPayload {
    pub fn new(years: &Array1<Year>, datasets: Vec<ChartDataset>) -> Self {
        Self {
            labels: years.iter().map(|year| year.to_string()).collect(),
            datasets,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dataset_labels(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.label.as_str()).collect()
    }

    /// Whether every dataset has exactly one point per label
    pub fn is_aligned(&self) -> bool {
        self.datasets
            .iter()
            .all(|dataset| dataset.data.len() == self.labels.len())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Renderer options for a dual-axis line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub interaction: Interaction,
    pub stacked: bool,
    pub plugins: Plugins,
    pub scales: BTreeMap<ChartAxis, AxisScale>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: &'static str,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisScale {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub display: bool,
    pub position: AxisPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub draw_on_chart_area: bool,
}

impl ChartOptions {
    /// Two linear y axes, the secondary one drawn on the right without its grid
    pub fn multi_axis(title: impl Into<String>) -> Self {
        let scales = ChartAxis::BOTH
            .into_iter()
            .map(|axis| {
                let grid = match axis {
                    ChartAxis::Primary => None,
                    ChartAxis::Secondary => Some(Grid {
                        draw_on_chart_area: false,
                    }),
                };
                (
                    axis,
                    AxisScale {
                        kind: "linear",
                        display: true,
                        position: axis.position(),
                        grid,
                    },
                )
            })
            .collect();

        Self {
            responsive: true,
            interaction: Interaction {
                mode: "index",
                intersect: false,
            },
            stacked: false,
            plugins: Plugins {
                title: Title {
                    display: true,
                    text: title.into(),
                },
            },
            scales,
        }
    }
}
