//! Dual-axis display of tidemark indicators.
//!
//! [`selector::DisplaySelector`] holds which indicator is bound to each axis and
//! whether predictions (or a what-if scenario) are overlaid. Every change produces a
//! fresh [`payload::ChartPayload`] ready to be serialised for a Chart.js style renderer.

pub mod payload;
pub mod selector;
pub mod style;
