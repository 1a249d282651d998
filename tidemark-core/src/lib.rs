//! Prediction engine for environmental indicators.
//!
//! Raw yearly records are projected into per-indicator [`timeseries::Series`], each
//! series is fitted against year ([`regression`]) and extrapolated past the observed
//! years ([`extrapolate`]). Two straight-line fits can be related directly to each other
//! ([`relation`]), which drives the what-if [`scenario`] engine.
//!
//! The [`catalog::IndicatorCatalog`] ties these together: one immutable entry per
//! indicator holding its observations, model and prediction.

pub mod catalog;
pub mod extraction;
pub mod extrapolate;
pub mod indicator;
pub mod regression;
pub mod relation;
pub mod scenario;
pub mod timeseries;

pub mod errors;
