//! Least-squares polynomial regression of a series against year.
//!
//! Fits
//!
//! $$ y = \sum_{k=0}^{d} c_k x^{d-k} $$
//!
//! for degree $d \in \{1, 2\}$, with coefficients stored highest order first.
//!
//! The design matrix is built on years centred on their mean, which keeps the
//! quadratic column well conditioned for calendar years, and the solution is expanded
//! back into the raw-year basis afterwards. Coefficients are kept at full precision;
//! `precision` only affects how they are reported.

use crate::errors::{TrendError, TrendResult};
use crate::timeseries::{FloatValue, Series, Year};
use log::debug;
use nalgebra::{DMatrix, DVector};
use num::Float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiple of machine epsilon (per point, relative to the largest observation) below
/// which a fitted term is treated as zero
const NEGLIGIBLE_TERM_ULPS: FloatValue = 16.0;

/// Degree of the fitted polynomial.
///
/// Serialised as the integer degree (`1` or `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RegressionDegree {
    Linear,
    Quadratic,
}

impl RegressionDegree {
    pub fn order(&self) -> usize {
        match self {
            RegressionDegree::Linear => 1,
            RegressionDegree::Quadratic => 2,
        }
    }

    /// Number of coefficients, and so the minimum number of points needed for a fit
    pub fn coefficient_count(&self) -> usize {
        self.order() + 1
    }
}

impl TryFrom<u8> for RegressionDegree {
    type Error = TrendError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RegressionDegree::Linear),
            2 => Ok(RegressionDegree::Quadratic),
            _ => Err(TrendError::InvalidConfiguration(format!(
                "regression degree must be 1 or 2, got {}",
                value
            ))),
        }
    }
}

impl From<RegressionDegree> for u8 {
    fn from(value: RegressionDegree) -> Self {
        value.order() as u8
    }
}

/// Parameters for fitting a [`RegressionModel`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Polynomial degree
    ///
    /// Default: 1
    pub degree: RegressionDegree,

    /// Decimal places used when reporting coefficients
    ///
    /// Default: 4
    pub precision: u32,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            degree: RegressionDegree::Linear,
            precision: 4,
        }
    }
}

impl RegressionConfig {
    pub fn linear(precision: u32) -> Self {
        Self {
            degree: RegressionDegree::Linear,
            precision,
        }
    }

    pub fn quadratic(precision: u32) -> Self {
        Self {
            degree: RegressionDegree::Quadratic,
            precision,
        }
    }
}

/// A polynomial fitted against year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionModel {
    degree: RegressionDegree,
    /// Full precision, highest order first
    coefficients: Vec<FloatValue>,
    precision: u32,
}

impl RegressionModel {
    /// Build a model from known coefficients (highest order first)
    ///
    /// Fails if the number of coefficients does not match the degree.
    pub fn from_coefficients(
        degree: RegressionDegree,
        coefficients: Vec<FloatValue>,
        precision: u32,
    ) -> TrendResult<Self> {
        if coefficients.len() != degree.coefficient_count() {
            return Err(TrendError::InvalidConfiguration(format!(
                "a degree {} model needs {} coefficients, got {}",
                degree.order(),
                degree.coefficient_count(),
                coefficients.len()
            )));
        }
        Ok(Self {
            degree,
            coefficients,
            precision,
        })
    }

    pub fn degree(&self) -> RegressionDegree {
        self.degree
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn coefficients(&self) -> &[FloatValue] {
        &self.coefficients
    }

    /// Coefficients rounded to `precision` decimal places, for display only
    pub fn rounded_coefficients(&self) -> Vec<FloatValue> {
        self.coefficients
            .iter()
            .map(|c| round_to(*c, self.precision))
            .collect()
    }

    /// `(slope, intercept)` of a straight-line model
    pub fn linear_terms(&self) -> TrendResult<(FloatValue, FloatValue)> {
        match (self.degree, self.coefficients.as_slice()) {
            (RegressionDegree::Linear, [slope, intercept]) => Ok((*slope, *intercept)),
            _ => Err(TrendError::UnsupportedDegree {
                degree: self.degree.order(),
            }),
        }
    }

    /// Evaluate the polynomial at `year` using Horner's scheme
    pub fn evaluate(&self, year: Year) -> FloatValue {
        let x = year as FloatValue;
        self.coefficients.iter().fold(0.0, |acc, c| acc * x + c)
    }
}

impl fmt::Display for RegressionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.precision as usize;
        let order = self.coefficients.len() - 1;

        write!(f, "y =")?;
        for (i, coefficient) in self.rounded_coefficients().into_iter().enumerate() {
            let power = order - i;
            let sign = if coefficient.is_sign_negative() { "-" } else { "+" };
            if i == 0 {
                let sign = if sign == "-" { "-" } else { "" };
                write!(f, " {}{:.*}", sign, precision, coefficient.abs())?;
            } else {
                write!(f, " {} {:.*}", sign, precision, coefficient.abs())?;
            }
            match power {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", power)?,
            }
        }
        Ok(())
    }
}

/// Fit a polynomial of the configured degree to `series`
///
/// Fails with [`TrendError::InsufficientData`] when the series has fewer than
/// `degree + 1` points.
pub fn fit(series: &Series, config: &RegressionConfig) -> TrendResult<RegressionModel> {
    let k = config.degree.coefficient_count();
    let n = series.len();
    if n < k {
        return Err(TrendError::InsufficientData {
            points: n,
            required: k,
        });
    }

    let xs: Vec<FloatValue> = series.years().iter().map(|y| *y as FloatValue).collect();
    let centre = xs.iter().sum::<FloatValue>() / n as FloatValue;

    let design = DMatrix::from_fn(n, k, |i, j| (xs[i] - centre).powi((k - 1 - j) as i32));
    let observed = DVector::from_iterator(n, series.values().iter().copied());

    let solution = design
        .svd(true, true)
        .solve(&observed, FloatValue::EPSILON)
        .map_err(|e| TrendError::SingularFit(e.to_string()))?;

    let centred = drop_negligible_terms(solution.as_slice(), &xs, centre, series);
    let coefficients = expand_centred(&centred, centre);
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(TrendError::SingularFit(
            "solution contains non-finite coefficients".to_string(),
        ));
    }

    let model = RegressionModel {
        degree: config.degree,
        coefficients,
        precision: config.precision,
    };
    debug!("Fitted {} over {} points", model, n);
    Ok(model)
}

/// Zero the non-constant centred coefficients whose contribution over the observed
/// years is at rounding-error level.
///
/// A flat series otherwise comes back with a slope of order `1e-17` rather than `0.0`.
fn drop_negligible_terms(
    centred: &[FloatValue],
    xs: &[FloatValue],
    centre: FloatValue,
    series: &Series,
) -> Vec<FloatValue> {
    let half_span = xs
        .iter()
        .map(|x| (x - centre).abs())
        .fold(0.0, FloatValue::max);
    let max_abs = series
        .values()
        .iter()
        .map(|v| v.abs())
        .fold(0.0, FloatValue::max);
    let tolerance = NEGLIGIBLE_TERM_ULPS * FloatValue::EPSILON * xs.len() as FloatValue * max_abs;

    let order = centred.len() - 1;
    centred
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let power = (order - i) as i32;
            if power > 0 && (c * half_span.powi(power)).abs() <= tolerance {
                0.0
            } else {
                c
            }
        })
        .collect()
}

/// Rewrite a polynomial in `(x - centre)` as a polynomial in `x`.
///
/// Both coefficient lists are highest order first.
fn expand_centred(centred: &[FloatValue], centre: FloatValue) -> Vec<FloatValue> {
    // Horner's scheme over polynomials, lowest order first while accumulating
    let mut expanded: Vec<FloatValue> = Vec::with_capacity(centred.len());
    for &coefficient in centred {
        let mut next = vec![0.0; expanded.len() + 1];
        for (power, &c) in expanded.iter().enumerate() {
            next[power + 1] += c;
            next[power] -= c * centre;
        }
        next[0] += coefficient;
        expanded = next;
    }
    expanded.reverse();
    expanded
}

/// Round to `precision` decimal places, leaving `value` as is when the scaled value
/// is not representable
fn round_to<T: Float>(value: T, precision: u32) -> T {
    let Ok(exponent) = i32::try_from(precision) else {
        return value;
    };
    let scale = T::from(10.0_f64.powi(exponent)).unwrap_or_else(T::one);
    let rounded = (value * scale).round() / scale;
    if scale.is_finite() && rounded.is_finite() {
        rounded
    } else {
        value
    }
}
