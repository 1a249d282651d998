//! Projection of raw yearly records into per-indicator series.
//!
//! Records arrive as JSON objects, one per year, e.g.
//!
//! ```json
//! {
//!   "year": "1991",
//!   "carbon_dioxide_ppm": [355.7],
//!   "hawaii_acidity": [{"hawaii_ph": 8.11}],
//!   "global_sea_year_anomaly_farenheit": 0.43
//! }
//! ```
//!
//! Every requested indicator must be present in every record. Nothing is defaulted.

use crate::errors::{TrendError, TrendResult};
use crate::indicator::{Indicator, Nesting, RecordField};
use crate::timeseries::{FloatValue, Series, Year};
use log::debug;
use ndarray::Array1;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const YEAR_KEY: &str = "year";

/// Extracts a fixed set of indicators from raw records.
#[derive(Debug, Clone)]
pub struct SeriesExtractor {
    indicators: Vec<Indicator>,
}

impl SeriesExtractor {
    pub fn new(indicators: impl IntoIterator<Item = Indicator>) -> Self {
        let mut indicators: Vec<Indicator> = indicators.into_iter().collect();
        indicators.sort();
        indicators.dedup();
        Self { indicators }
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Build one series per indicator, in record order
    ///
    /// Fails with [`TrendError::MalformedRecord`] on the first record that is missing
    /// a field, holds a non-numeric value or breaks chronological order.
    pub fn extract(&self, records: &[Value]) -> TrendResult<BTreeMap<Indicator, Series>> {
        let mut years: Vec<Year> = Vec::with_capacity(records.len());
        let mut columns: Vec<Vec<FloatValue>> =
            vec![Vec::with_capacity(records.len()); self.indicators.len()];

        for (index, record) in records.iter().enumerate() {
            let malformed = |reason: String| TrendError::MalformedRecord { index, reason };

            let object = record
                .as_object()
                .ok_or_else(|| malformed("record is not an object".to_string()))?;

            let year = read_year(object).map_err(malformed)?;
            if let Some(previous) = years.last() {
                if year <= *previous {
                    return Err(malformed(format!(
                        "year {} does not follow {}",
                        year, previous
                    )));
                }
            }
            years.push(year);

            for (indicator, column) in self.indicators.iter().zip(columns.iter_mut()) {
                let value = read_field(object, &indicator.definition().field).map_err(malformed)?;
                column.push(value);
            }
        }

        debug!(
            "Extracted {} indicators over {} records",
            self.indicators.len(),
            records.len()
        );

        let years = Array1::from(years);
        self.indicators
            .iter()
            .zip(columns)
            .map(|(indicator, column)| {
                Series::new(years.clone(), Array1::from(column)).map(|series| (*indicator, series))
            })
            .collect()
    }
}

fn read_year(object: &Map<String, Value>) -> Result<Year, String> {
    let raw = object
        .get(YEAR_KEY)
        .ok_or_else(|| format!("missing field `{}`", YEAR_KEY))?;

    let year = as_number(raw).ok_or_else(|| format!("year {} is not a number", raw))?;
    if year.fract() != 0.0 || year < Year::MIN as f64 || year > Year::MAX as f64 {
        return Err(format!("year {} is not a whole number", raw));
    }
    Ok(year as Year)
}

fn read_field(object: &Map<String, Value>, field: &RecordField) -> Result<FloatValue, String> {
    let raw = object
        .get(field.key)
        .ok_or_else(|| format!("missing field `{}`", field.key))?;

    let value = match field.nesting {
        Nesting::Scalar => raw,
        Nesting::FirstElement | Nesting::FirstElementKey(_) => first_element(raw, field.key)?,
    };

    let value = match field.nesting {
        Nesting::FirstElementKey(inner) => value
            .get(inner)
            .ok_or_else(|| format!("missing field `{}.0.{}`", field.key, inner))?,
        _ => value,
    };

    as_scalar(value).ok_or_else(|| format!("field `{}` holds non-numeric value {}", field.key, value))
}

fn first_element<'a>(value: &'a Value, key: &str) -> Result<&'a Value, String> {
    match value {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| format!("field `{}` is an empty list", key)),
        _ => Err(format!("field `{}` is not a list", key)),
    }
}

/// A number, a numeric string, or either wrapped in a single-element list
fn as_scalar(value: &Value) -> Option<FloatValue> {
    match value {
        Value::Array(items) if items.len() == 1 => as_number(&items[0]),
        _ => as_number(value),
    }
}

fn as_number(value: &Value) -> Option<FloatValue> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<FloatValue>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({
                "year": "2000",
                "carbon_dioxide_ppm": [369.7, 0.1],
                "hawaii_acidity": [{"hawaii_ph": 8.11}],
                "global_sea_year_anomaly_farenheit": 0.5,
                "mollusk_density": "12.5"
            }),
            json!({
                "year": 2001,
                "carbon_dioxide_ppm": [371.3],
                "hawaii_acidity": [{"hawaii_ph": "8.10"}],
                "global_sea_year_anomaly_farenheit": [0.6],
                "mollusk_density": 12.0
            }),
        ]
    }

    #[test]
    fn extracts_all_indicators() {
        let extractor = SeriesExtractor::new(Indicator::ALL);
        let series = extractor.extract(&records()).unwrap();

        assert_eq!(series.len(), 4);
        for s in series.values() {
            assert_eq!(s.years(), &array![2000, 2001]);
        }
        assert_eq!(
            series[&Indicator::CarbonDioxide].values(),
            &array![369.7, 371.3]
        );
        assert_eq!(series[&Indicator::OceanPh].values(), &array![8.11, 8.10]);
        assert_eq!(
            series[&Indicator::SeaTemperatureAnomaly].values(),
            &array![0.5, 0.6]
        );
        assert_eq!(
            series[&Indicator::MolluskDensity].values(),
            &array![12.5, 12.0]
        );
    }

    #[test]
    fn extracts_subset() {
        let extractor =
            SeriesExtractor::new([Indicator::OceanPh, Indicator::CarbonDioxide, Indicator::OceanPh]);
        assert_eq!(
            extractor.indicators(),
            &[Indicator::CarbonDioxide, Indicator::OceanPh]
        );

        let series = extractor.extract(&records()).unwrap();
        assert_eq!(
            series.keys().copied().collect::<Vec<_>>(),
            vec![Indicator::CarbonDioxide, Indicator::OceanPh]
        );
    }

    #[test]
    fn missing_field() {
        let mut data = records();
        data[1]
            .as_object_mut()
            .unwrap()
            .remove("hawaii_acidity");

        let res = SeriesExtractor::new([Indicator::OceanPh]).extract(&data);
        assert_eq!(
            res.unwrap_err(),
            TrendError::MalformedRecord {
                index: 1,
                reason: "missing field `hawaii_acidity`".to_string()
            }
        );
    }

    #[test]
    fn missing_field_is_ignored_when_not_requested() {
        let mut data = records();
        data[1]
            .as_object_mut()
            .unwrap()
            .remove("mollusk_density");

        assert!(SeriesExtractor::new([Indicator::CarbonDioxide])
            .extract(&data)
            .is_ok());
    }

    #[test]
    fn rejects_malformed_values() {
        let cases = vec![
            json!({"year": 2000, "carbon_dioxide_ppm": []}),
            json!({"year": 2000, "carbon_dioxide_ppm": 370.0}),
            json!({"year": 2000, "carbon_dioxide_ppm": ["n/a"]}),
            json!({"year": "two thousand", "carbon_dioxide_ppm": [370.0]}),
            json!({"year": 2000.5, "carbon_dioxide_ppm": [370.0]}),
            json!({"carbon_dioxide_ppm": [370.0]}),
            json!([2000, 370.0]),
        ];

        let extractor = SeriesExtractor::new([Indicator::CarbonDioxide]);
        for case in cases {
            let res = extractor.extract(&[case.clone()]);
            assert!(
                matches!(res, Err(TrendError::MalformedRecord { index: 0, .. })),
                "expected rejection of {}",
                case
            );
        }
    }

    #[test]
    fn rejects_out_of_order_years() {
        let data = vec![
            json!({"year": 2001, "global_sea_year_anomaly_farenheit": 0.5}),
            json!({"year": 2001, "global_sea_year_anomaly_farenheit": 0.6}),
        ];

        let res = SeriesExtractor::new([Indicator::SeaTemperatureAnomaly]).extract(&data);
        assert_eq!(
            res.unwrap_err(),
            TrendError::MalformedRecord {
                index: 1,
                reason: "year 2001 does not follow 2001".to_string()
            }
        );
    }

    #[test]
    fn empty_records() {
        let series = SeriesExtractor::new([Indicator::CarbonDioxide])
            .extract(&[])
            .unwrap();
        assert!(series[&Indicator::CarbonDioxide].is_empty());
    }
}
