//! Dashboard configuration.
//!
//! Read from TOML. Every field is optional:
//!
//! ```toml
//! horizon_years = 30
//! indicators = ["carbon_dioxide", "ocean_ph"]
//!
//! [regression]
//! degree = 1
//! precision = 4
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tidemark_core::errors::{TrendError, TrendResult};
use tidemark_core::extrapolate::DEFAULT_HORIZON_YEARS;
use tidemark_core::indicator::Indicator;
use tidemark_core::regression::RegressionConfig;
use tidemark_core::timeseries::Year;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TidemarkConfig {
    /// Offset added to each historical year to form the prediction axis
    pub horizon_years: Year,
    /// Indicators extracted from the dataset and offered for selection
    pub indicators: Vec<Indicator>,
    pub regression: RegressionConfig,
}

impl Default for TidemarkConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            indicators: Indicator::ALL.to_vec(),
            regression: RegressionConfig::default(),
        }
    }
}

impl TidemarkConfig {
    pub fn from_toml_str(content: &str) -> TrendResult<Self> {
        let config: TidemarkConfig =
            toml::from_str(content).map_err(|e| TrendError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TrendResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TrendError::InvalidConfiguration(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> TrendResult<String> {
        toml::to_string(self).map_err(|e| TrendError::InvalidConfiguration(e.to_string()))
    }

    pub fn validate(&self) -> TrendResult<()> {
        if self.horizon_years <= 0 {
            return Err(TrendError::InvalidConfiguration(format!(
                "horizon_years must be positive, got {}",
                self.horizon_years
            )));
        }
        if self.indicators.is_empty() {
            return Err(TrendError::InvalidConfiguration(
                "at least one indicator is required".to_string(),
            ));
        }
        Ok(())
    }
}
