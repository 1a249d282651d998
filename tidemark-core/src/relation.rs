//! Direct relation between two indicators fitted against the same years.
//!
//! Given two straight lines sharing the independent variable $x$ (year)
//!
//! $$ y_1 = m_1 x + b_1 \qquad y_2 = m_2 x + b_2 $$
//!
//! eliminating $x = (y_1 - b_1) / m_1$ gives
//!
//! $$ y_2 = \frac{m_2}{m_1} y_1 + \left(b_2 - \frac{m_2 b_1}{m_1}\right) $$
//!
//! Only degree 1 models can be inverted this way.

use crate::errors::{TrendError, TrendResult};
use crate::regression::RegressionModel;
use crate::timeseries::FloatValue;
use serde::Serialize;

/// Linear map from one indicator's value to another's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedRelation {
    pub slope: FloatValue,
    pub intercept: FloatValue,
}

impl DerivedRelation {
    pub fn apply(&self, value: FloatValue) -> FloatValue {
        self.slope * value + self.intercept
    }

    /// The relation mapping in the opposite direction
    pub fn inverse(&self) -> TrendResult<DerivedRelation> {
        if self.slope == 0.0 {
            return Err(TrendError::DegenerateRelation);
        }
        finite(DerivedRelation {
            slope: 1.0 / self.slope,
            intercept: -self.intercept / self.slope,
        })
    }

    /// Apply `self` and then `next`
    pub fn then(&self, next: &DerivedRelation) -> DerivedRelation {
        DerivedRelation {
            slope: next.slope * self.slope,
            intercept: next.slope * self.intercept + next.intercept,
        }
    }
}

/// Derive the relation expressing `dependent` in terms of `independent`
///
/// Both models must be degree 1 and `independent` must have a non-zero slope.
pub fn derive_relation(
    independent: &RegressionModel,
    dependent: &RegressionModel,
) -> TrendResult<DerivedRelation> {
    let (m1, b1) = independent.linear_terms()?;
    let (m2, b2) = dependent.linear_terms()?;

    if m1 == 0.0 {
        return Err(TrendError::DegenerateRelation);
    }

    finite(DerivedRelation {
        slope: m2 / m1,
        intercept: b2 - m2 * b1 / m1,
    })
}

fn finite(relation: DerivedRelation) -> TrendResult<DerivedRelation> {
    if relation.slope.is_finite() && relation.intercept.is_finite() {
        Ok(relation)
    } else {
        Err(TrendError::DegenerateRelation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::RegressionDegree;
    use is_close::is_close;

    fn line(slope: FloatValue, intercept: FloatValue) -> RegressionModel {
        RegressionModel::from_coefficients(RegressionDegree::Linear, vec![slope, intercept], 4)
            .unwrap()
    }

    #[test]
    fn eliminates_year() {
        let co2 = line(5.0, -9700.0);
        let ph = line(-0.02, 48.1);
        let relation = derive_relation(&co2, &ph).unwrap();

        assert!(is_close!(relation.slope, -0.004));
        assert!(is_close!(relation.intercept, 48.1 - 0.02 * 9700.0 / 5.0));
        for year in [1990, 2000, 2050] {
            assert!(is_close!(
                relation.apply(co2.evaluate(year)),
                ph.evaluate(year)
            ));
        }
    }

    #[test]
    fn zero_slope_is_degenerate() {
        let flat = line(0.0, 8.1);
        let rising = line(5.0, -9700.0);

        assert_eq!(
            derive_relation(&flat, &rising),
            Err(TrendError::DegenerateRelation)
        );
        // A flat dependent is fine
        let relation = derive_relation(&rising, &flat).unwrap();
        assert_eq!(relation.slope, 0.0);
        assert_eq!(relation.intercept, 8.1);
    }

    #[test]
    fn fitted_flat_series_is_degenerate() {
        use crate::regression::{fit, RegressionConfig};
        use crate::timeseries::Series;

        let rising = line(5.0, -9700.0);
        for flat in [
            Series::from_pairs((1990..=1994).map(|year| (year, 8.07))).unwrap(),
            Series::from_pairs((2000..=2002).map(|year| (year, 0.2))).unwrap(),
        ] {
            let model = fit(&flat, &RegressionConfig::linear(4)).unwrap();
            assert_eq!(
                derive_relation(&model, &rising),
                Err(TrendError::DegenerateRelation)
            );
        }
    }

    #[test]
    fn overflow_is_degenerate() {
        let tiny = line(FloatValue::MIN_POSITIVE, 0.0);
        let huge = line(FloatValue::MAX, 0.0);
        assert_eq!(
            derive_relation(&tiny, &huge),
            Err(TrendError::DegenerateRelation)
        );
    }

    #[test]
    fn rejects_quadratic() {
        let quadratic =
            RegressionModel::from_coefficients(RegressionDegree::Quadratic, vec![1.0, 2.0, 3.0], 4)
                .unwrap();
        let linear = line(1.0, 0.0);

        assert_eq!(
            derive_relation(&quadratic, &linear),
            Err(TrendError::UnsupportedDegree { degree: 2 })
        );
        assert_eq!(
            derive_relation(&linear, &quadratic),
            Err(TrendError::UnsupportedDegree { degree: 2 })
        );
    }

    #[test]
    fn round_trip_is_identity() {
        let a = line(1.918_620_689_655, -3463.787_931);
        let b = line(-0.001_379_310_344, 10.852_068_965_517);

        let forward = derive_relation(&a, &b).unwrap();
        let backward = derive_relation(&b, &a).unwrap();
        let identity = forward.then(&backward);

        assert!(is_close!(identity.slope, 1.0));
        assert!(identity.intercept.abs() < 1e-9, "{}", identity.intercept);
        for value in [300.0, 350.0, 420.0] {
            assert!(is_close!(backward.apply(forward.apply(value)), value));
        }
    }

    #[test]
    fn inverse_matches_reverse_derivation() {
        let a = line(5.0, -9700.0);
        let b = line(-0.02, 48.1);

        let inverse = derive_relation(&a, &b).unwrap().inverse().unwrap();
        let reverse = derive_relation(&b, &a).unwrap();
        assert!(is_close!(inverse.slope, reverse.slope));
        assert!(is_close!(inverse.intercept, reverse.intercept));

        let flat = DerivedRelation {
            slope: 0.0,
            intercept: 1.0,
        };
        assert_eq!(flat.inverse(), Err(TrendError::DegenerateRelation));
    }
}
