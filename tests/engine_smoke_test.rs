//! Smoke test: one component through prediction, derating and allocation

use pretty_assertions::assert_eq;
use ramstk_engine::*;
use serde_json::json;

#[test]
fn smoke_test_resistor_record() {
    let input: PredictionInput = attributes::from_text(
        r#"
category: resistor
subcategory_id: 1
environment_active_id: 1
quality_id: 1
specification_id: 1
resistance: 3300.0
power_ratio: 0.45
temperature_active: 39.5
"#,
    )
    .unwrap();
    assert_eq!(input.category_id(), 3);

    let prediction = milhdbk217f::calculate(&input, Method::PartStress).unwrap();
    assert!((prediction.hazard_rate_active - 1.961_972_602_964_040_2e-5).abs() < 1e-15);
    assert_eq!(prediction.pi_factor("piR"), Some(1.1));

    let adjusted = milhdbk217f::apply_adjustments(
        prediction.hazard_rate_active,
        &Adjustments {
            quantity: 4,
            ..Default::default()
        },
    );
    assert!((adjusted - 4.0 * prediction.hazard_rate_active).abs() < 1e-18);

    let limits = StressLimits::builtin().unwrap();
    let stress: DeratingInput = attributes::from_attributes(json!({
        "family": "resistor",
        "subcategory_id": 1,
        "power_rated": 0.25,
        "power_ratio": 0.45,
        "temperature_active": 39.5,
        "temperature_knee": 70.0,
        "temperature_rated_max": 130.0,
    }))
    .unwrap();
    let result = do_derating_analysis(1, &stress, &limits).unwrap();
    assert_eq!(result, DeratingResult::default());
}

#[test]
fn smoke_test_attribute_errors() {
    let missing: Result<PredictionInput> = attributes::from_attributes(json!({
        "category": "meter",
        "subcategory_id": 1,
    }));
    assert!(matches!(missing, Err(AnalysisError::Lookup { .. })));

    let wrong: Result<PredictionInput> = attributes::from_attributes(json!({
        "category": "meter",
        "subcategory_id": 1,
        "environment_active_id": "GB",
    }));
    assert!(matches!(wrong, Err(AnalysisError::Type(_))));
}

#[test]
fn smoke_test_merge_prediction_into_record() {
    let mut record = json!({"hardware_id": 7, "hazard_rate_active": 0.0});
    let prediction = Prediction {
        lambda_b: 0.5,
        hazard_rate_active: 1.5,
        ..Default::default()
    };
    attributes::merge_into(&mut record, &prediction).unwrap();
    assert_eq!(record["hardware_id"], 7);
    assert_eq!(record["hazard_rate_active"], 1.5);
    assert_eq!(record["lambda_b"], 0.5);
}

#[test]
fn smoke_test_dormancy_and_mtbf() {
    let table = DormancyTable::builtin();
    let dormant = calculate_dormant_hazard_rate(&table, 3, 1, 1, 2, 0.5);
    assert!((dormant - 0.1).abs() < 1e-15);
    assert_eq!(calculate_dormant_hazard_rate(&table, 3, 1, 13, 2, 0.5), 0.0);

    let logistics = milhdbk217f::hazard_rate_logistics(0.5, dormant, 0.0);
    assert!((milhdbk217f::mtbf(logistics) - 1.0 / 0.6).abs() < 1e-12);
    assert_eq!(milhdbk217f::mtbf(0.0), f64::INFINITY);
}

#[test]
fn smoke_test_growth_assessment() {
    let request: GrowthRequest = attributes::from_text(
        r#"
model: crow_amsaa
n_failures: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
fail_times: [4.3, 10.6, 28.7, 45.0, 93.1, 144.2, 247.3, 391.8, 522.4, 667.9]
"#,
    )
    .unwrap();
    let assessment = growth::assess(&request).unwrap();
    assert!(assessment.shape > 0.0 && assessment.shape < 1.0);
    assert!(assessment.cramer_vonmises.is_some());
    assert!(assessment.cramer_vonmises_critical.is_some());
    assert!(assessment.standard_error.is_none());
}
