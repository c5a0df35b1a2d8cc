//! Inductive devices (MIL-HDBK-217F section 11)
//!
//! Subcategory 1 is transformers, subcategory 2 is coils. Part stress is
//! modelled for transformers only.

use super::Prediction;
use crate::error::{select, AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

type EnvRow = [f64; 14];

/// Part count λb for transformers, by family
const PART_COUNT_TRANSFORMER: [EnvRow; 4] = [
    [
        0.0035, 0.023, 0.049, 0.019, 0.065, 0.027, 0.037, 0.041, 0.052, 0.11, 0.0018, 0.053, 0.16,
        2.3,
    ],
    [
        0.0071, 0.046, 0.097, 0.038, 0.13, 0.055, 0.073, 0.081, 0.10, 0.22, 0.035, 0.11, 0.31, 4.7,
    ],
    [
        0.023, 0.16, 0.35, 0.13, 0.45, 0.21, 0.27, 0.35, 0.45, 0.82, 0.011, 0.37, 1.2, 16.0,
    ],
    [
        0.028, 0.18, 0.39, 0.15, 0.52, 0.22, 0.29, 0.33, 0.42, 0.88, 0.015, 0.42, 1.2, 19.0,
    ],
];

/// Part count λb for coils, by family
const PART_COUNT_COIL: [EnvRow; 2] = [
    [
        0.0017, 0.0073, 0.023, 0.0091, 0.031, 0.011, 0.015, 0.016, 0.022, 0.052, 0.00083, 0.25,
        0.073, 1.1,
    ],
    [
        0.0033, 0.015, 0.046, 0.018, 0.061, 0.022, 0.03, 0.033, 0.044, 0.10, 0.0017, 0.05, 0.15,
        2.2,
    ],
];

const PART_COUNT_PI_Q: [f64; 3] = [0.25, 1.0, 10.0];
const PART_STRESS_PI_Q: [f64; 2] = [3.0, 7.5];
const PI_E: EnvRow = [
    1.0, 6.0, 12.0, 5.0, 16.0, 6.0, 8.0, 7.0, 9.0, 24.0, 0.5, 13.0, 34.0, 610.0,
];

/// Insulation class constants `(Tref, K1, K2)`
const INSULATION: [(f64, f64, f64); 6] = [
    (329.0, 0.0018, 15.6),
    (352.0, 0.002, 14.0),
    (364.0, 0.0018, 8.7),
    (400.0, 0.002, 10.0),
    (398.0, 0.00125, 3.8),
    (477.0, 0.00159, 8.4),
];

/// Temperature rise assumed when nothing is known about the load
const DEFAULT_TEMPERATURE_RISE: f64 = 35.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InductorInputs {
    pub subcategory_id: i64,
    pub environment_active_id: i64,
    pub quality_id: i64,
    #[serde(default = "default_id")]
    pub family_id: i64,
    #[serde(default = "default_id")]
    pub insulation_id: i64,
    /// Ambient temperature in °C
    #[serde(default)]
    pub temperature_active: f64,
    /// Power loss in W
    #[serde(default)]
    pub power_operating: f64,
    #[serde(default)]
    pub power_input: f64,
    /// Case radiating surface in in²
    #[serde(default)]
    pub area: f64,
    /// Weight in lb
    #[serde(default)]
    pub weight: f64,
}

fn default_id() -> i64 {
    1
}

pub fn get_part_count_lambda_b(
    subcategory_id: i64,
    family_id: i64,
    environment_active_id: i64,
) -> Result<f64> {
    let rows: &[EnvRow] = match subcategory_id {
        1 => &PART_COUNT_TRANSFORMER,
        2 => &PART_COUNT_COIL,
        _ => return Err(AnalysisError::lookup("inductor subcategories", subcategory_id)),
    };
    let row = match usize::try_from(family_id - 1).ok().and_then(|i| rows.get(i)) {
        Some(row) => row,
        None => return Err(AnalysisError::lookup("inductor families", family_id)),
    };
    select(row, environment_active_id, "inductor part count lambda b")
}

pub fn calculate_part_count(inputs: &InductorInputs) -> Result<Prediction> {
    let lambda_b = get_part_count_lambda_b(
        inputs.subcategory_id,
        inputs.family_id,
        inputs.environment_active_id,
    )?;
    let mut prediction = Prediction::new(lambda_b);
    let pi_q = prediction.pi(
        "piQ",
        select(&PART_COUNT_PI_Q, inputs.quality_id, "inductor quality factors")?,
    );
    prediction.hazard_rate_active = lambda_b * pi_q;
    Ok(prediction)
}

pub fn calculate_temperature_rise_power_loss_surface(power_operating: f64, area: f64) -> Result<f64> {
    if area <= 0.0 {
        return Err(AnalysisError::range("area", area, "> 0"));
    }
    Ok(125.0 * power_operating / area)
}

pub fn calculate_temperature_rise_power_loss_weight(power_operating: f64, weight: f64) -> Result<f64> {
    if weight <= 0.0 {
        return Err(AnalysisError::range("weight", weight, "> 0"));
    }
    Ok(11.5 * power_operating / weight.powf(0.6766))
}

pub fn calculate_temperature_rise_input_power_weight(power_input: f64, weight: f64) -> Result<f64> {
    if weight <= 0.0 {
        return Err(AnalysisError::range("weight", weight, "> 0"));
    }
    Ok(2.1 * power_input / weight.powf(0.6766))
}

/// Pick the best available temperature-rise estimate
pub fn calculate_temperature_rise(inputs: &InductorInputs) -> Result<f64> {
    if inputs.power_operating > 0.0 && inputs.area > 0.0 {
        calculate_temperature_rise_power_loss_surface(inputs.power_operating, inputs.area)
    } else if inputs.power_operating > 0.0 && inputs.weight > 0.0 {
        calculate_temperature_rise_power_loss_weight(inputs.power_operating, inputs.weight)
    } else if inputs.power_input > 0.0 && inputs.weight > 0.0 {
        calculate_temperature_rise_input_power_weight(inputs.power_input, inputs.weight)
    } else {
        Ok(DEFAULT_TEMPERATURE_RISE)
    }
}

pub fn calculate_hot_spot_temperature(temperature_active: f64, temperature_rise: f64) -> f64 {
    temperature_active + 1.1 * temperature_rise
}

pub fn calculate_part_stress_lambda_b(
    subcategory_id: i64,
    insulation_id: i64,
    temperature_hot_spot: f64,
) -> Result<f64> {
    if subcategory_id != 1 {
        return Err(AnalysisError::lookup(
            "inductor part stress subcategories",
            subcategory_id,
        ));
    }
    let (t_ref, k_1, k_2) = match usize::try_from(insulation_id - 1)
        .ok()
        .and_then(|i| INSULATION.get(i))
    {
        Some(constants) => *constants,
        None => return Err(AnalysisError::lookup("insulation classes", insulation_id)),
    };
    Ok(k_1 * ((temperature_hot_spot + 273.0) / t_ref).powf(k_2).exp())
}

pub fn calculate_part_stress(inputs: &InductorInputs) -> Result<Prediction> {
    let temperature_rise = calculate_temperature_rise(inputs)?;
    let temperature_hot_spot =
        calculate_hot_spot_temperature(inputs.temperature_active, temperature_rise);
    let lambda_b = calculate_part_stress_lambda_b(
        inputs.subcategory_id,
        inputs.insulation_id,
        temperature_hot_spot,
    )?;

    let mut prediction = Prediction::new(lambda_b);
    prediction.derive("temperature_rise", temperature_rise);
    prediction.derive("temperature_hot_spot", temperature_hot_spot);
    let pi_q = prediction.pi(
        "piQ",
        select(&PART_STRESS_PI_Q, inputs.quality_id, "inductor quality factors")?,
    );
    let pi_e = prediction.pi(
        "piE",
        select(&PI_E, inputs.environment_active_id, "inductor environment factors")?,
    );
    prediction.hazard_rate_active = lambda_b * pi_q * pi_e;
    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs()
    }

    #[test]
    fn test_part_count_lambda_b() {
        assert_eq!(get_part_count_lambda_b(1, 1, 1).unwrap(), 0.0035);
        assert_eq!(get_part_count_lambda_b(1, 4, 14).unwrap(), 19.0);
        assert_eq!(get_part_count_lambda_b(2, 1, 1).unwrap(), 0.0017);
        assert_eq!(get_part_count_lambda_b(2, 2, 12).unwrap(), 0.05);
    }

    #[test]
    fn test_part_count_errors() {
        assert!(matches!(
            get_part_count_lambda_b(20, 1, 3),
            Err(AnalysisError::Lookup { .. })
        ));
        assert!(matches!(
            get_part_count_lambda_b(2, 12, 3),
            Err(AnalysisError::Lookup { .. })
        ));
        assert!(matches!(
            get_part_count_lambda_b(2, 1, 31),
            Err(AnalysisError::Index { .. })
        ));
    }

    #[test]
    fn test_part_count_quality() {
        let inputs = InductorInputs {
            subcategory_id: 1,
            environment_active_id: 2,
            quality_id: 3,
            family_id: 2,
            ..Default::default()
        };
        let p = calculate_part_count(&inputs).unwrap();
        assert!(approx(p.hazard_rate_active, 0.46));
    }

    #[test]
    fn test_temperature_rise() {
        assert!(approx(
            calculate_temperature_rise_input_power_weight(0.387, 0.015).unwrap(),
            13.931_148_25
        ));
        assert!(approx(
            calculate_temperature_rise_power_loss_surface(0.387, 12.5).unwrap(),
            3.87
        ));
        assert!(approx(
            calculate_temperature_rise_power_loss_weight(0.387, 2.5).unwrap(),
            2.394_211_958
        ));
        assert!(calculate_temperature_rise_power_loss_surface(0.387, 0.0).is_err());
        assert!(calculate_temperature_rise_power_loss_weight(0.387, 0.0).is_err());
    }

    #[test]
    fn test_hot_spot_and_lambda_b() {
        assert!(approx(calculate_hot_spot_temperature(43.2, 38.7), 85.77));
        assert!(approx(
            calculate_part_stress_lambda_b(1, 4, 85.77).unwrap(),
            0.002_801_33
        ));
        assert!(calculate_part_stress_lambda_b(101, 4, 85.77).is_err());
        assert!(calculate_part_stress_lambda_b(1, 41, 85.77).is_err());
    }

    #[test]
    fn test_part_stress_transformer() {
        let inputs = InductorInputs {
            subcategory_id: 1,
            environment_active_id: 2,
            quality_id: 1,
            family_id: 1,
            insulation_id: 2,
            temperature_active: 30.0,
            power_operating: 0.387,
            weight: 2.5,
            ..Default::default()
        };
        let p = calculate_part_stress(&inputs).unwrap();
        assert!(approx(p.derived["temperature_rise"], 2.394_211_957_611_957_6));
        assert!(approx(p.lambda_b, 0.002_296_930_158_912_021_5));
        assert!(approx(p.hazard_rate_active, 0.041_344_742_860_416_39));
    }

    #[test]
    fn test_part_stress_default_rise() {
        let inputs = InductorInputs {
            subcategory_id: 1,
            environment_active_id: 1,
            quality_id: 2,
            insulation_id: 1,
            temperature_active: 30.0,
            ..Default::default()
        };
        let p = calculate_part_stress(&inputs).unwrap();
        assert_eq!(p.derived["temperature_rise"], 35.0);
        assert!(approx(p.hazard_rate_active, 0.080_786_340_619_537_81));
    }

    #[test]
    fn test_part_stress_coil_unsupported() {
        let inputs = InductorInputs {
            subcategory_id: 2,
            environment_active_id: 1,
            quality_id: 1,
            insulation_id: 1,
            ..Default::default()
        };
        assert!(matches!(
            calculate_part_stress(&inputs),
            Err(AnalysisError::Lookup { .. })
        ));
    }
}
