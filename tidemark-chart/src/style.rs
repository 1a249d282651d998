//! Chart axes and per-indicator dataset colours.

use serde::{Deserialize, Serialize};
use std::fmt;
use tidemark_core::indicator::Indicator;

/// One of the two y axes of the chart.
///
/// Serialised as the renderer's axis id (`"y"` or `"y1"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChartAxis {
    /// Left-hand axis
    #[serde(rename = "y")]
    Primary,
    /// Right-hand axis
    #[serde(rename = "y1")]
    Secondary,
}

impl ChartAxis {
    pub const BOTH: [ChartAxis; 2] = [ChartAxis::Primary, ChartAxis::Secondary];

    pub fn id(&self) -> &'static str {
        match self {
            ChartAxis::Primary => "y",
            ChartAxis::Secondary => "y1",
        }
    }

    pub fn position(&self) -> AxisPosition {
        match self {
            ChartAxis::Primary => AxisPosition::Left,
            ChartAxis::Secondary => AxisPosition::Right,
        }
    }
}

impl fmt::Display for ChartAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
}

/// Line and fill colours of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStyle {
    pub border_color: &'static str,
    pub background_color: &'static str,
}

/// Colours used for an indicator's observed and predicted datasets
pub fn style_for(indicator: Indicator) -> DatasetStyle {
    match indicator {
        Indicator::CarbonDioxide => DatasetStyle {
            border_color: "rgb(255, 99, 132)",
            background_color: "rgba(255, 99, 132, 0.5)",
        },
        Indicator::OceanPh => DatasetStyle {
            border_color: "rgb(53, 162, 235)",
            background_color: "rgba(53, 162, 235, 0.5)",
        },
        Indicator::SeaTemperatureAnomaly => DatasetStyle {
            border_color: "rgb(10, 50, 150)",
            background_color: "rgba(53, 162, 235, 0.5)",
        },
        Indicator::MolluskDensity => DatasetStyle {
            border_color: "rgb(75, 192, 192)",
            background_color: "rgba(75, 192, 192, 0.5)",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_ids() {
        assert_eq!(serde_json::to_string(&ChartAxis::Primary).unwrap(), "\"y\"");
        assert_eq!(
            serde_json::to_string(&ChartAxis::Secondary).unwrap(),
            "\"y1\""
        );
        assert_eq!(ChartAxis::Secondary.to_string(), "y1");
        assert_eq!(ChartAxis::Primary.position(), AxisPosition::Left);
    }

    #[test]
    fn every_indicator_has_distinct_line_colour() {
        for (i, a) in Indicator::ALL.iter().enumerate() {
            for b in Indicator::ALL.iter().skip(i + 1) {
                assert_ne!(style_for(*a).border_color, style_for(*b).border_color);
            }
        }
    }
}
