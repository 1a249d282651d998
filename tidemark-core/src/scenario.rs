//! What-if scaling of one prediction and its propagation to a second indicator.
//!
//! For a percentage $p$, predictions $P_1, P_2$ and the relation slope $s$ derived
//! from the two source models:
//!
//! $$ S_1[i] = P_1[i] \cdot \frac{p}{100} $$
//! $$ S_2[i] = P_2[i] + \left|P_1[i] - S_1[i]\right| \cdot s $$
//!
//! The adjustment uses the absolute difference rather than a signed or proportional
//! one. It reproduces the behaviour of the dashboard this engine serves and is not a
//! statistically derived propagation.

use crate::errors::{TrendError, TrendResult};
use crate::regression::RegressionModel;
use crate::relation::{derive_relation, DerivedRelation};
use crate::timeseries::{FloatValue, Series};
use log::debug;
use serde::Serialize;

/// A validated scenario percentage (strictly positive, finite, unbounded above).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Percentage(FloatValue);

impl Percentage {
    pub fn new(value: FloatValue) -> TrendResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(TrendError::InvalidPercentage(value))
        }
    }

    pub fn value(&self) -> FloatValue {
        self.0
    }

    /// The percentage as a multiplier (50% -> 0.5)
    pub fn fraction(&self) -> FloatValue {
        self.0 / 100.0
    }
}

impl TryFrom<FloatValue> for Percentage {
    type Error = TrendError;

    fn try_from(value: FloatValue) -> Result<Self, Self::Error> {
        Percentage::new(value)
    }
}

/// One side of a scenario: a prediction and the model it was evaluated from.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSide<'a> {
    pub prediction: &'a Series,
    pub model: &'a RegressionModel,
}

impl<'a> ScenarioSide<'a> {
    pub fn new(prediction: &'a Series, model: &'a RegressionModel) -> Self {
        Self { prediction, model }
    }
}

/// Freshly computed scenario predictions for both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    /// Scaled prediction of the driving indicator
    pub primary: Series,
    /// Adjusted prediction of the dependent indicator
    pub secondary: Series,
    pub relation: DerivedRelation,
    pub percentage: Percentage,
}

/// Scale `primary` to `percentage` of its prediction and adjust `secondary` accordingly
///
/// Fails if the predictions are not on the same years, or with the errors of
/// [`derive_relation`] when the models cannot be related.
pub fn apply_scenario(
    primary: ScenarioSide<'_>,
    secondary: ScenarioSide<'_>,
    percentage: Percentage,
) -> TrendResult<ScenarioOutcome> {
    if !primary.prediction.is_aligned_with(secondary.prediction) {
        return Err(TrendError::MisalignedSeries(format!(
            "scenario predictions cover {} and {} years on different axes",
            primary.prediction.len(),
            secondary.prediction.len()
        )));
    }

    let relation = derive_relation(primary.model, secondary.model)?;
    let fraction = percentage.fraction();

    let scaled_primary = primary.prediction.map_values(|value| value * fraction);
    let deltas = (primary.prediction.values() - scaled_primary.values()).mapv(FloatValue::abs);
    let scaled_secondary = Series::new(
        secondary.prediction.years().clone(),
        secondary.prediction.values() + &(deltas * relation.slope),
    )?;

    debug!(
        "Applied {}% scenario with relation slope {}",
        percentage.value(),
        relation.slope
    );

    Ok(ScenarioOutcome {
        primary: scaled_primary,
        secondary: scaled_secondary,
        relation,
        percentage,
    })
}
