//! Compare environmental indicators on a dual-axis chart and explore their trends.
//!
//! ```no_run
//! use tidemark::{ChartAxis, Dashboard, TidemarkConfig};
//!
//! let mut dashboard = Dashboard::from_files("tidemark.toml", "data.json")?;
//! dashboard.select_axis(ChartAxis::Primary, "Carbon Dioxide (ppm)")?;
//! dashboard.select_axis(ChartAxis::Secondary, "Ocean pH")?;
//! dashboard.toggle_display_predictions();
//! let payload = dashboard.set_scenario_percentage(50.0)?;
//! # let _ = (payload, TidemarkConfig::default());
//! # Ok::<(), tidemark::TrendError>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod dataset;

pub use config::TidemarkConfig;
pub use dashboard::Dashboard;
pub use tidemark_chart::payload::{ChartOptions, ChartPayload};
pub use tidemark_chart::style::ChartAxis;
pub use tidemark_core::errors::{TrendError, TrendResult};
pub use tidemark_core::indicator::Indicator;
