//! Indicator definitions.
//!
//! Each tracked environmental indicator has a static [`IndicatorDefinition`] describing
//! how it is labelled and where its value lives inside a raw yearly record.
//!
//! # Available Indicators
//!
//! - `VAR_CARBON_DIOXIDE` - Atmospheric CO2 concentration in ppm
//! - `VAR_OCEAN_PH` - Surface ocean pH (Hawaii station)
//! - `VAR_SEA_TEMPERATURE_ANOMALY` - Global sea temperature anomaly in °F
//! - `VAR_MOLLUSK_DENSITY` - Mollusk population density
//!
//! Indicators are identified by the [`Indicator`] enum. Labels are for display only and
//! never used as lookup keys, although [`Indicator::from_str`] accepts either the key or
//! the label so that values coming back from a dropdown can be resolved.

use crate::errors::TrendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the value of an indicator is nested beneath its record key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// `"key": 1.0` (a singleton list `[1.0]` is also accepted)
    Scalar,
    /// `"key": [1.0, ...]`
    FirstElement,
    /// `"key": [{"inner": 1.0}, ...]`
    FirstElementKey(&'static str),
}

/// Location of an indicator's value inside a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordField {
    pub key: &'static str,
    pub nesting: Nesting,
}

/// Static metadata for an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorDefinition {
    /// Stable identifier (e.g. "carbon_dioxide")
    pub key: &'static str,
    /// Human-readable label used for chart legends and dropdowns
    pub label: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
    pub field: RecordField,
}

// ============================================================================
// Indicator definitions
// ============================================================================

pub const VAR_CARBON_DIOXIDE: IndicatorDefinition = IndicatorDefinition {
    key: "carbon_dioxide",
    label: "Carbon Dioxide (ppm)",
    unit: "ppm",
    description: "Mean atmospheric carbon dioxide concentration",
    field: RecordField {
        key: "carbon_dioxide_ppm",
        nesting: Nesting::FirstElement,
    },
};

pub const VAR_OCEAN_PH: IndicatorDefinition = IndicatorDefinition {
    key: "ocean_ph",
    label: "Ocean pH",
    unit: "pH",
    description: "Surface seawater pH measured at the Hawaii ocean time-series station",
    field: RecordField {
        key: "hawaii_acidity",
        nesting: Nesting::FirstElementKey("hawaii_ph"),
    },
};

pub const VAR_SEA_TEMPERATURE_ANOMALY: IndicatorDefinition = IndicatorDefinition {
    key: "sea_temperature_anomaly",
    label: "Sea Temperature Anomaly (°F)",
    unit: "°F",
    description: "Global annual sea surface temperature anomaly",
    field: RecordField {
        key: "global_sea_year_anomaly_farenheit",
        nesting: Nesting::Scalar,
    },
};

pub const VAR_MOLLUSK_DENSITY: IndicatorDefinition = IndicatorDefinition {
    key: "mollusk_density",
    label: "Mollusk Density",
    unit: "individuals / m^2",
    description: "Observed mollusk population density",
    field: RecordField {
        key: "mollusk_density",
        nesting: Nesting::Scalar,
    },
};

/// Identity of a tracked indicator.
///
/// Ordering follows declaration order, which is also the order indicators are offered
/// for selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    CarbonDioxide,
    OceanPh,
    SeaTemperatureAnomaly,
    MolluskDensity,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::CarbonDioxide,
        Indicator::OceanPh,
        Indicator::SeaTemperatureAnomaly,
        Indicator::MolluskDensity,
    ];

    pub fn definition(&self) -> &'static IndicatorDefinition {
        match self {
            Indicator::CarbonDioxide => &VAR_CARBON_DIOXIDE,
            Indicator::OceanPh => &VAR_OCEAN_PH,
            Indicator::SeaTemperatureAnomaly => &VAR_SEA_TEMPERATURE_ANOMALY,
            Indicator::MolluskDensity => &VAR_MOLLUSK_DENSITY,
        }
    }

    pub fn key(&self) -> &'static str {
        self.definition().key
    }

    pub fn label(&self) -> &'static str {
        self.definition().label
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Indicator {
    type Err = TrendError;

    /// Resolve an indicator from its key or its label (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Indicator::ALL
            .into_iter()
            .find(|indicator| {
                let definition = indicator.definition();
                definition.key.eq_ignore_ascii_case(name)
                    || definition.label.eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| TrendError::UnknownIndicator(s.to_string()))
    }
}
