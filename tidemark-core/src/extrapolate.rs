//! Evaluation of fitted models beyond the observed years.
//!
//! The prediction axis is the historical years together with each historical year
//! shifted forward by the horizon. No confidence bound is attached to the values: an
//! extrapolated point is exactly the fitted polynomial evaluated at that year.

use crate::errors::{TrendError, TrendResult};
use crate::regression::RegressionModel;
use crate::timeseries::{Series, Year};
use ndarray::Array1;
use std::collections::BTreeSet;

/// Number of years the prediction axis extends past each historical year
pub const DEFAULT_HORIZON_YEARS: Year = 30;

/// Sorted union of `historical` and `historical + horizon`
///
/// Years shared by both sets (when the history spans more than the horizon) appear once.
pub fn extended_years(historical: &Array1<Year>, horizon: Year) -> TrendResult<Array1<Year>> {
    if horizon <= 0 {
        return Err(TrendError::InvalidConfiguration(format!(
            "prediction horizon must be a positive number of years, got {}",
            horizon
        )));
    }

    let mut years: BTreeSet<Year> = historical.iter().copied().collect();
    for year in historical.iter() {
        let future = year.checked_add(horizon).ok_or_else(|| {
            TrendError::InvalidConfiguration(format!(
                "year {} shifted by {} overflows",
                year, horizon
            ))
        })?;
        years.insert(future);
    }

    Ok(years.into_iter().collect())
}

/// Evaluate `model` at every year in `years`
pub fn extrapolate(model: &RegressionModel, years: &Array1<Year>) -> TrendResult<Series> {
    Series::new(years.clone(), years.mapv(|year| model.evaluate(year)))
}

/// Prediction for a historical series over its extended axis
pub fn predict(model: &RegressionModel, historical: &Series, horizon: Year) -> TrendResult<Series> {
    let years = extended_years(historical.years(), horizon)?;
    extrapolate(model, &years)
}
