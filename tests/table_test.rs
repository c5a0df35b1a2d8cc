//! Data-driven table tests
//!
//! Each case pins one table entry or band so a transcription error in a
//! handbook table shows up as a single failing case.

use ramstk_engine::allocation::calculate_goals;
use ramstk_engine::growth::crow_amsaa::cramer_vonmises_critical_value;
use ramstk_engine::milhdbk217f::{meter, resistor};
use ramstk_engine::*;
use rstest::rstest;

fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * b.abs().max(1.0)
}

// ============================================================================
// Part count tables
// ============================================================================

#[rstest]
#[case(1, 1, 1, 10.0)]
#[case(1, 1, 3, 120.0)]
#[case(1, 3, 13, 1520.0)]
#[case(2, 2, 3, 2.8)]
#[case(2, 1, 11, 0.099)]
fn test_meter_part_count_lambda_b(
    #[case] subcategory_id: i64,
    #[case] type_id: i64,
    #[case] environment_active_id: i64,
    #[case] expected: f64,
) {
    assert_eq!(
        meter::get_part_count_lambda_b(subcategory_id, type_id, environment_active_id).unwrap(),
        expected
    );
}

#[rstest]
#[case(1, 0, 2, 0.0022)]
#[case(2, 3, 1, 0.0014)]
#[case(6, 2, 14, 8.6)]
fn test_resistor_part_count_lambda_b(
    #[case] subcategory_id: i64,
    #[case] specification_id: i64,
    #[case] environment_active_id: i64,
    #[case] expected: f64,
) {
    assert_eq!(
        resistor::get_part_count_lambda_b(subcategory_id, specification_id, environment_active_id)
            .unwrap(),
        expected
    );
}

#[rstest]
#[case(3, 1, 1)]
#[case(1, 1, 0)]
#[case(1, 1, 15)]
#[case(1, 4, 1)]
fn test_meter_part_count_misses(
    #[case] subcategory_id: i64,
    #[case] type_id: i64,
    #[case] environment_active_id: i64,
) {
    assert!(meter::get_part_count_lambda_b(subcategory_id, type_id, environment_active_id).is_err());
}

// ============================================================================
// Bands
// ============================================================================

#[rstest]
#[case(30.0, 75.0, 0.5)]
#[case(37.5, 75.0, 0.5)]
#[case(40.0, 75.0, 0.6)]
#[case(45.0, 75.0, 0.6)]
#[case(60.0, 75.0, 0.8)]
#[case(75.0, 75.0, 1.0)]
fn test_meter_temperature_bands(#[case] active: f64, #[case] rated: f64, #[case] expected: f64) {
    assert_eq!(
        meter::get_temperature_stress_factor(active, rated).unwrap(),
        expected
    );
}

#[rstest]
#[case("Level E - Extremely Unlikely", "Insignificant", 1)]
#[case("Level D - Remote", "Slight", 4)]
#[case("Level C - Occasional", "Medium", 12)]
#[case("Level B - Reasonably Probable", "High", 20)]
#[case("Level A - Frequent", "Major", 30)]
fn test_hri(#[case] probability: &str, #[case] severity: &str, #[case] expected: u32) {
    assert_eq!(calculate_hri(probability, severity).unwrap(), expected);
}

#[rstest]
#[case(16, 90.0, 0.171)]
#[case(16, 0.9, 0.171)]
#[case(26, 90.0, 0.172)]
#[case(500, 99.0, 0.34)]
fn test_cramer_vonmises_critical(#[case] n: u32, #[case] confidence: f64, #[case] expected: f64) {
    assert!(close(
        cramer_vonmises_critical_value(n, confidence).unwrap(),
        expected,
        1e-12
    ));
}

// ============================================================================
// Goal measures
// ============================================================================

#[rstest]
#[case(GoalMeasure::Reliability, Goals { reliability_goal: 0.99732259, ..Default::default() })]
#[case(GoalMeasure::HazardRate, Goals { hazard_rate_goal: 0.0000268099, ..Default::default() })]
#[case(GoalMeasure::Mtbf, Goals { mtbf_goal: 37299.5151063, ..Default::default() })]
fn test_goal_measures_agree(#[case] measure: GoalMeasure, #[case] goals: Goals) {
    let g = calculate_goals(measure, &goals, 100.0).unwrap();
    assert!(close(g.reliability_goal, 0.99732259, 1e-6));
    assert!(close(g.hazard_rate_goal * 1e6, 26.8099, 1e-4));
    assert!(close(g.mtbf_goal, 37299.5151063, 1e-4));
}

#[rstest]
#[case(GoalMeasure::Reliability, Goals { reliability_goal: 1.0, ..Default::default() }, "reliability_goal")]
#[case(GoalMeasure::HazardRate, Goals::default(), "hazard_rate_goal")]
#[case(GoalMeasure::Mtbf, Goals { mtbf_goal: -1.0, ..Default::default() }, "mtbf_goal")]
fn test_goal_measure_range(
    #[case] measure: GoalMeasure,
    #[case] goals: Goals,
    #[case] field: &str,
) {
    let err = calculate_goals(measure, &goals, 100.0).unwrap_err();
    assert_eq!(err.field(), Some(field));
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_mode_criticality_scenario() {
    let c = calculate_mode_criticality(0.00021595, 5.28, 0.75).unwrap();
    assert!((c - 0.000855162).abs() < 1e-9);
}

#[rstest]
#[case(1, 0.7, false)]
#[case(2, 0.7, false)]
#[case(2, 0.75, true)]
#[case(3, 0.75, true)]
fn test_film_voltage_by_environment(
    #[case] environment_id: i64,
    #[case] voltage_ratio: f64,
    #[case] overstress: bool,
) {
    let limits = StressLimits::builtin().unwrap();
    let input: DeratingInput = attributes::from_text(&format!(
        "family: resistor\nsubcategory_id: 2\npower_rated: 0.25\npower_ratio: 0.3\n\
         temperature_active: 40.0\ntemperature_knee: 70.0\ntemperature_rated_max: 150.0\n\
         voltage_ratio: {}\n",
        voltage_ratio
    ))
    .unwrap();
    let result = do_derating_analysis(environment_id, &input, &limits).unwrap();
    assert_eq!(result.overstress, overstress);
    assert_eq!(result.reason.is_empty(), !overstress);
}
