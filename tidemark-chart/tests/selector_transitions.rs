use is_close::is_close;
use serde_json::{json, Value};
use std::sync::Arc;
use tidemark_chart::payload::{ChartPayload, DatasetKind};
use tidemark_chart::selector::{AxisState, DisplaySelector, PredictionState};
use tidemark_chart::style::ChartAxis;
use tidemark_core::catalog::{CatalogBuilder, IndicatorCatalog};
use tidemark_core::errors::TrendError;
use tidemark_core::indicator::Indicator;

fn records() -> Vec<Value> {
    vec![
        json!({
            "year": 2000,
            "carbon_dioxide_ppm": [300.0],
            "hawaii_acidity": [{"hawaii_ph": 8.1}],
            "global_sea_year_anomaly_farenheit": 0.1,
            "mollusk_density": 40.0
        }),
        json!({
            "year": 2001,
            "carbon_dioxide_ppm": [305.0],
            "hawaii_acidity": [{"hawaii_ph": 8.08}],
            "global_sea_year_anomaly_farenheit": 0.3,
            "mollusk_density": 38.0
        }),
        json!({
            "year": 2002,
            "carbon_dioxide_ppm": [310.0],
            "hawaii_acidity": [{"hawaii_ph": 8.06}],
            "global_sea_year_anomaly_farenheit": 0.5,
            "mollusk_density": 36.0
        }),
    ]
}

fn catalog() -> Arc<IndicatorCatalog> {
    let catalog = CatalogBuilder::new()
        .with_records(&records(), Indicator::ALL)
        .unwrap()
        .build()
        .unwrap();
    Arc::new(catalog)
}

fn both_axes() -> DisplaySelector {
    let mut selector = DisplaySelector::new(catalog());
    selector
        .select_axis(ChartAxis::Primary, "Carbon Dioxide (ppm)")
        .unwrap();
    selector
        .select_axis(ChartAxis::Secondary, "Ocean pH")
        .unwrap();
    selector
}

#[test]
fn empty_selection_has_no_datasets() {
    let selector = DisplaySelector::new(catalog());
    let payload = selector.payload();

    assert_eq!(payload.labels, vec!["2000", "2001", "2002"]);
    assert!(payload.datasets.is_empty());
}

#[test]
fn base_datasets_follow_axis_order() {
    let mut selector = DisplaySelector::new(catalog());
    selector
        .select_axis(ChartAxis::Secondary, "mollusk_density")
        .unwrap();
    let payload = selector
        .select_axis(ChartAxis::Primary, "Sea Temperature Anomaly (°F)")
        .unwrap();

    assert_eq!(
        payload.dataset_labels(),
        vec!["Sea Temperature Anomaly (°F)", "Mollusk Density"]
    );
    assert_eq!(payload.datasets[0].y_axis_id, ChartAxis::Primary);
    assert_eq!(payload.datasets[1].y_axis_id, ChartAxis::Secondary);
    assert_eq!(
        payload.datasets[1].data,
        vec![Some(40.0), Some(38.0), Some(36.0)]
    );
}

#[test]
fn toggling_twice_restores_payload() {
    let mut selector = both_axes();
    let before = selector.payload();

    let shown = selector.toggle_display_predictions();
    assert_eq!(
        selector.state(),
        (AxisState::BothAxesSelected, PredictionState::PredictionsOn)
    );
    assert_eq!(
        shown.labels,
        vec!["2000", "2001", "2002", "2030", "2031", "2032"]
    );
    assert_eq!(
        shown.dataset_labels(),
        vec![
            "Carbon Dioxide (ppm)",
            "Ocean pH",
            "Carbon Dioxide (ppm) Prediction",
            "Ocean pH Prediction"
        ]
    );
    assert!(shown.is_aligned());
    // Observations are null past the last observed year
    assert_eq!(shown.datasets[0].data[3], None);
    assert!(shown.datasets[2].data.iter().all(Option::is_some));

    let hidden = selector.toggle_display_predictions();
    assert_eq!(hidden, before);
}

#[test]
fn unknown_indicator_keeps_payload() {
    let mut selector = both_axes();
    selector.toggle_display_predictions();
    let before = selector.payload();

    assert_eq!(
        selector.select_axis(ChartAxis::Primary, "Sea Level"),
        Err(TrendError::UnknownIndicator("Sea Level".to_string()))
    );
    assert_eq!(selector.payload(), before);
}

#[test]
fn half_scenario_values() {
    let mut selector = both_axes();
    selector.toggle_display_predictions();
    let payload = selector.set_scenario_percentage(50.0).unwrap();

    assert_eq!(
        payload.dataset_labels(),
        vec![
            "Carbon Dioxide (ppm)",
            "Ocean pH",
            "Carbon Dioxide (ppm) Prediction (50%)",
            "Ocean pH Prediction (50%)"
        ]
    );
    assert_eq!(payload.datasets[2].kind, DatasetKind::Scenario);

    // CO2 predicted at 300 in 2000 is halved to 150, lowering pH by 150 * 0.004
    let co2 = payload.datasets[2].data[0].unwrap();
    let ph = payload.datasets[3].data[0].unwrap();
    assert!(is_close!(co2, 150.0), "got {}", co2);
    assert!(is_close!(ph, 7.5), "got {}", ph);
}

#[test]
fn failed_scenario_keeps_state() {
    let mut selector = DisplaySelector::new(catalog());
    selector
        .select_axis(ChartAxis::Primary, "carbon_dioxide")
        .unwrap();
    selector
        .select_axis(ChartAxis::Secondary, "ocean_ph")
        .unwrap();
    selector.toggle_display_predictions();
    let with_scenario = selector.set_scenario_percentage(80.0).unwrap();

    assert!(matches!(
        selector.set_scenario_percentage(f64::NAN),
        Err(TrendError::InvalidPercentage(_))
    ));
    assert_eq!(selector.payload(), with_scenario);
    assert_eq!(selector.scenario().unwrap().percentage.value(), 80.0);
}

#[test]
fn payload_json_is_renderable() {
    let mut selector = both_axes();
    let payload: ChartPayload = selector.toggle_display_predictions();
    let value: Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

    assert_eq!(value["labels"].as_array().unwrap().len(), 6);
    assert_eq!(value["datasets"][1]["yAxisID"], "y1");
    assert_eq!(value["datasets"][0]["data"][5], Value::Null);
    assert!(value["datasets"][0].get("kind").is_none());
}

#[test]
fn flat_driver_scenario_is_rejected() {
    let flat_sst: Vec<Value> = (1990..=1994)
        .map(|year| {
            json!({
                "year": year,
                "carbon_dioxide_ppm": [350.0 + 2.0 * (year - 1990) as f64],
                "global_sea_year_anomaly_farenheit": 8.07
            })
        })
        .collect();
    let catalog = CatalogBuilder::new()
        .with_records(
            &flat_sst,
            [Indicator::CarbonDioxide, Indicator::SeaTemperatureAnomaly],
        )
        .unwrap()
        .build()
        .unwrap();

    let mut selector = DisplaySelector::new(Arc::new(catalog));
    selector
        .select_axis(ChartAxis::Primary, "sea_temperature_anomaly")
        .unwrap();
    selector
        .select_axis(ChartAxis::Secondary, "carbon_dioxide")
        .unwrap();
    let shown = selector.toggle_display_predictions();

    assert_eq!(
        selector.set_scenario_percentage(50.0),
        Err(TrendError::DegenerateRelation)
    );
    assert!(selector.scenario().is_none());
    assert_eq!(selector.payload(), shown);
    // Predictions of the flat indicator stay at its observed level
    assert!(shown.datasets[2]
        .data
        .iter()
        .all(|value| is_close!(value.unwrap(), 8.07)));
}
