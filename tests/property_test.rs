//! Property-based tests for the calculation invariants
//!
//! Uses proptest to generate inputs across each valid domain

use proptest::prelude::*;
use ramstk_engine::derating::ResistorStress;
use ramstk_engine::growth::duane;
use ramstk_engine::statistics::{exponential, normal, weibull};
use ramstk_engine::{
    calculate_rpn, do_allocate, do_calculate_beta_bounds, do_derating_analysis, AllocationChild,
    AllocationParent, DeratingInput, Goals, StressLimits,
};

fn composition_limits(power: f64) -> StressLimits {
    StressLimits::from_yaml(&format!(
        "resistor:\n  fixed_composition:\n    low_power:\n      power: [{p}, {p}, {p}]\n",
        p = power
    ))
    .unwrap()
}

fn resistor(power_ratio: f64) -> DeratingInput {
    DeratingInput::Resistor(ResistorStress {
        subcategory_id: 1,
        power_rated: 0.25,
        power_ratio,
        ..Default::default()
    })
}

fn any_child() -> impl Strategy<Value = AllocationChild> {
    (
        1.0f64..1000.0,
        1.0f64..=100.0,
        1e-6f64..1e-2,
        1u32..5,
        0.5f64..2.0,
        (1u32..10, 1u32..10, 1u32..10, 1u32..10),
    )
        .prop_map(
            |(mission_time, duty_cycle, hazard_rate, n_sub_elements, weight_factor, foo)| {
                AllocationChild {
                    mission_time,
                    duty_cycle,
                    hazard_rate,
                    n_sub_elements,
                    weight_factor,
                    int_factor: foo.0,
                    soa_factor: foo.1,
                    op_time_factor: foo.2,
                    env_factor: foo.3,
                    ..Default::default()
                }
            },
        )
}

proptest! {
    #[test]
    fn test_rpn_is_product(s in 1i64..=10, o in 1i64..=10, d in 1i64..=10) {
        prop_assert_eq!(calculate_rpn(s, o, d).unwrap(), (s * o * d) as u32);
    }

    #[test]
    fn test_rpn_out_of_range_names_field(bad in prop_oneof![-5i64..1, 11i64..20], slot in 0usize..3) {
        let mut ranks = [5i64, 5, 5];
        ranks[slot] = bad;
        let err = calculate_rpn(ranks[0], ranks[1], ranks[2]).unwrap_err();
        let expected = ["rpn_severity", "rpn_occurrence", "rpn_detection"][slot];
        prop_assert_eq!(err.field(), Some(expected));
    }

    #[test]
    fn test_derating_is_idempotent(ratio in 0.0f64..2.0, environment_id in 1i64..=3) {
        let limits = StressLimits::builtin().unwrap();
        let input = resistor(ratio);
        let first = do_derating_analysis(environment_id, &input, &limits).unwrap();
        let second = do_derating_analysis(environment_id, &input, &limits).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_limit_is_inclusive(limit in 0.05f64..1.0) {
        let limits = composition_limits(limit);
        let at = do_derating_analysis(1, &resistor(limit), &limits).unwrap();
        prop_assert!(!at.overstress);
        prop_assert_eq!(at.reason, "");

        let above = f64::from_bits(limit.to_bits() + 1);
        let over = do_derating_analysis(1, &resistor(above), &limits).unwrap();
        prop_assert!(over.overstress);
        prop_assert!(over.reason.starts_with("Power ratio of"));
    }

    #[test]
    fn test_allocation_round_trip(
        method in 1i64..=4,
        reliability_goal in 0.5f64..0.999,
        mission_time in 1.0f64..500.0,
        children in prop::collection::vec(any_child(), 1..6),
    ) {
        let system_hazard_rate: f64 = children.iter().map(|c| c.hazard_rate).sum();
        let parent = AllocationParent {
            allocation_method_id: method,
            goal_measure_id: 1,
            goals: Goals { reliability_goal, ..Default::default() },
            mission_time,
            hazard_rate: system_hazard_rate,
        };
        let result = do_allocate(&parent, &children).unwrap();
        prop_assert_eq!(result.children.len(), children.len());
        for (child, allocated) in children.iter().zip(&result.children) {
            let expected = (-allocated.hazard_rate_alloc * child.mission_time).exp();
            prop_assert!((allocated.reliability_alloc - expected).abs() <= 1e-12);
            prop_assert!((allocated.mtbf_alloc * allocated.hazard_rate_alloc - 1.0).abs() <= 1e-12);
        }
    }

    #[test]
    fn test_survival_at_time_zero(shape in 0.1f64..10.0, scale in 0.1f64..1e4, mean in 1.0f64..1e3) {
        prop_assert_eq!(weibull::get_survival(shape, scale, 0.0, 0.0), 1.0);
        prop_assert_eq!(weibull::get_hazard_rate(shape, scale, 0.0, 0.0), 0.0);
        prop_assert_eq!(exponential::get_survival(scale, 0.0, 0.0), 1.0);
        prop_assert_eq!(exponential::get_hazard_rate(scale, 0.0, 0.0), 0.0);
        prop_assert_eq!(normal::get_survival(mean, scale, 0.0), 1.0);
        prop_assert_eq!(normal::get_hazard_rate(mean, scale, 0.0), 0.0);
    }

    #[test]
    fn test_zero_scale_is_nan(shape in 0.1f64..10.0, time in 0.0f64..1e3) {
        prop_assert!(weibull::get_survival(shape, 0.0, 0.0, time).is_nan());
        prop_assert!(weibull::get_hazard_rate(shape, 0.0, 0.0, time).is_nan());
        prop_assert!(exponential::get_survival(0.0, 0.0, time).is_nan());
        prop_assert!(exponential::get_hazard_rate(0.0, 0.0, time).is_nan());
        prop_assert!(normal::get_survival(100.0, 0.0, time).is_nan());
        prop_assert!(normal::get_hazard_rate(100.0, 0.0, time).is_nan());
    }

    #[test]
    fn test_duane_unit_alpha_means_agree(time in 0.1f64..1e5, beta in 0.01f64..100.0) {
        let (cumulative, instantaneous) = duane::calculate_duane_mean(time, 1.0, beta);
        prop_assert_eq!(cumulative, instantaneous);
    }

    #[test]
    fn test_confidence_percent_or_fraction(
        a in 0.0f64..100.0,
        spread in 0.0f64..100.0,
        confidence in 0.5f64..0.99,
    ) {
        let mode = a + spread / 3.0;
        let b = a + spread;
        let fraction = do_calculate_beta_bounds(a, mode, b, confidence).unwrap();
        let percent = do_calculate_beta_bounds(a, mode, b, confidence * 100.0).unwrap();
        prop_assert!((fraction.mean_ll - percent.mean_ll).abs() <= 1e-9 * b.max(1.0));
        prop_assert!((fraction.mean_ul - percent.mean_ul).abs() <= 1e-9 * b.max(1.0));
        prop_assert!(fraction.mean_ll <= fraction.mean && fraction.mean <= fraction.mean_ul);
    }
}

#[test]
fn test_duane_empty_sample() {
    assert_eq!(duane::calculate_duane_parameters(&[], &[]).unwrap(), (0.0, 1.0));
}
