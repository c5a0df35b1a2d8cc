//! Meters (MIL-HDBK-217F section 18)
//!
//! Subcategory 1 is elapsed-time meters, subcategory 2 is panel meters.

use super::Prediction;
use crate::error::{select, AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

type EnvRow = [f64; 14];

const PART_COUNT_ELAPSED_TIME: [EnvRow; 3] = [
    [
        10.0, 20.0, 120.0, 70.0, 180.0, 50.0, 80.0, 160.0, 250.0, 260.0, 5.0, 140.0, 380.0, 0.0,
    ],
    [
        15.0, 30.0, 180.0, 105.0, 270.0, 75.0, 120.0, 240.0, 375.0, 390.0, 7.5, 210.0, 570.0, 0.0,
    ],
    [
        40.0, 80.0, 480.0, 280.0, 720.0, 200.0, 320.0, 640.0, 1000.0, 1040.0, 20.0, 560.0, 1520.0,
        0.0,
    ],
];

const PART_COUNT_PANEL: [EnvRow; 2] = [
    [
        0.09, 0.36, 2.3, 1.1, 3.2, 2.5, 3.8, 5.2, 6.6, 5.4, 0.099, 5.4, 0.0, 0.0,
    ],
    [
        0.15, 0.81, 2.8, 1.8, 5.4, 4.3, 6.4, 8.9, 11.0, 9.2, 0.17, 9.2, 0.0, 0.0,
    ],
];

const ELAPSED_TIME_LAMBDA_B: [f64; 3] = [20.0, 30.0, 80.0];
const ELAPSED_TIME_PI_E: EnvRow = [
    1.0, 2.0, 12.0, 7.0, 18.0, 5.0, 8.0, 16.0, 25.0, 26.0, 0.5, 14.0, 38.0, 0.0,
];

const PANEL_LAMBDA_B: f64 = 0.09;
const PANEL_PI_A: [f64; 2] = [1.0, 1.7];
const PANEL_PI_F: [f64; 3] = [1.0, 1.0, 2.8];
const PANEL_PI_Q: [f64; 2] = [1.0, 3.4];
const PANEL_PI_E: EnvRow = [
    1.0, 4.0, 25.0, 12.0, 35.0, 28.0, 42.0, 58.0, 73.0, 60.0, 1.1, 60.0, 0.0, 0.0,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeterInputs {
    pub subcategory_id: i64,
    pub environment_active_id: i64,
    #[serde(default = "default_id")]
    pub quality_id: i64,
    /// Elapsed-time meter type: 1 = A.C., 2 = inverter driven, 3 = commutator D.C.
    #[serde(default = "default_id")]
    pub type_id: i64,
    /// Panel meter application: 1 = D.C., 2 = A.C.
    #[serde(default = "default_id")]
    pub application_id: i64,
    /// Panel meter function: 1 = ammeter, 2 = voltmeter, 3 = other
    #[serde(default = "default_id")]
    pub function_id: i64,
    #[serde(default)]
    pub temperature_active: f64,
    #[serde(default)]
    pub temperature_rated_max: f64,
}

fn default_id() -> i64 {
    1
}

pub fn get_part_count_lambda_b(
    subcategory_id: i64,
    type_id: i64,
    environment_active_id: i64,
) -> Result<f64> {
    let rows: &[EnvRow] = match subcategory_id {
        1 => &PART_COUNT_ELAPSED_TIME,
        2 => &PART_COUNT_PANEL,
        _ => return Err(AnalysisError::lookup("meter subcategories", subcategory_id)),
    };
    let row = select(rows, type_id, "meter types")?;
    select(&row, environment_active_id, "meter part count lambda b")
}

/// Part count λb; panel meters are keyed by application, elapsed-time meters by type
pub fn calculate_part_count(inputs: &MeterInputs) -> Result<Prediction> {
    let key = if inputs.subcategory_id == 2 {
        inputs.application_id
    } else {
        inputs.type_id
    };
    let lambda_b =
        get_part_count_lambda_b(inputs.subcategory_id, key, inputs.environment_active_id)?;
    let mut prediction = Prediction::new(lambda_b);
    let pi_q = if inputs.subcategory_id == 2 {
        prediction.pi(
            "piQ",
            select(&PANEL_PI_Q, inputs.quality_id, "meter quality factors")?,
        )
    } else {
        1.0
    };
    prediction.hazard_rate_active = lambda_b * pi_q;
    Ok(prediction)
}

/// πT from the ratio of operating to rated temperature
pub fn get_temperature_stress_factor(
    temperature_active: f64,
    temperature_rated_max: f64,
) -> Result<f64> {
    if temperature_rated_max <= 0.0 {
        return Err(AnalysisError::range(
            "temperature_rated_max",
            temperature_rated_max,
            "> 0",
        ));
    }
    let ratio = temperature_active / temperature_rated_max;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(AnalysisError::range("temperature ratio", ratio, "(0, 1]"));
    }
    Ok(if ratio <= 0.5 {
        0.5
    } else if ratio <= 0.6 {
        0.6
    } else if ratio <= 0.8 {
        0.8
    } else {
        1.0
    })
}

pub fn calculate_part_stress(inputs: &MeterInputs) -> Result<Prediction> {
    match inputs.subcategory_id {
        1 => {
            let lambda_b = select(&ELAPSED_TIME_LAMBDA_B, inputs.type_id, "meter types")?;
            let mut prediction = Prediction::new(lambda_b);
            let pi_t = prediction.pi(
                "piT",
                get_temperature_stress_factor(
                    inputs.temperature_active,
                    inputs.temperature_rated_max,
                )?,
            );
            let pi_e = prediction.pi(
                "piE",
                select(
                    &ELAPSED_TIME_PI_E,
                    inputs.environment_active_id,
                    "meter environment factors",
                )?,
            );
            prediction.hazard_rate_active = lambda_b * pi_t * pi_e;
            Ok(prediction)
        }
        2 => {
            let mut prediction = Prediction::new(PANEL_LAMBDA_B);
            let pi_a = prediction.pi(
                "piA",
                select(&PANEL_PI_A, inputs.application_id, "meter applications")?,
            );
            let pi_f = prediction.pi(
                "piF",
                select(&PANEL_PI_F, inputs.function_id, "meter functions")?,
            );
            let pi_q = prediction.pi(
                "piQ",
                select(&PANEL_PI_Q, inputs.quality_id, "meter quality factors")?,
            );
            let pi_e = prediction.pi(
                "piE",
                select(
                    &PANEL_PI_E,
                    inputs.environment_active_id,
                    "meter environment factors",
                )?,
            );
            prediction.hazard_rate_active = PANEL_LAMBDA_B * pi_a * pi_f * pi_q * pi_e;
            Ok(prediction)
        }
        _ => Err(AnalysisError::lookup(
            "meter subcategories",
            inputs.subcategory_id,
        )),
    }
}
