//! Resistor models (MIL-HDBK-217F section 9)
//!
//! | Subcategory | Style                                   |
//! |-------------|-----------------------------------------|
//! | 1           | Fixed, composition (RC, RCR)            |
//! | 2           | Fixed, film (RL, RLR, RN, RNC, RNN, RNR)|
//! | 3           | Fixed, film, power (RD)                 |
//! | 4           | Fixed, film, network (RZ)               |
//! | 5           | Fixed, wirewound (RB, RBR)              |
//! | 6           | Fixed, wirewound, power (RW, RWR)       |
//! | 7           | Fixed, wirewound, chassis mount (RE)    |
//! | 8           | Thermistor                              |
//! | 9           | Variable, wirewound (RT, RTR)           |
//! | 10          | Variable, wirewound, precision (RR)     |
//! | 11          | Variable, wirewound, semiprecision      |
//! | 12          | Variable, wirewound, power (RP)         |
//! | 13          | Variable, non-wirewound (RJ, RJR)       |
//! | 14          | Variable, composition (RV)              |
//! | 15          | Variable, non-wirewound, film (RQ, RVC) |

use super::{band_index, Prediction};
use crate::error::{select, AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

type EnvRow = [f64; 14];

const PART_COUNT_LAMBDA_B_FILM_MIL: EnvRow = [
    0.0012, 0.0027, 0.011, 0.0054, 0.020, 0.0063, 0.013, 0.018, 0.033, 0.030, 0.00025, 0.014,
    0.044, 0.69,
];
const PART_COUNT_LAMBDA_B_FILM_EST: EnvRow = [
    0.0014, 0.0031, 0.013, 0.0061, 0.023, 0.0072, 0.014, 0.021, 0.038, 0.034, 0.00028, 0.016,
    0.050, 0.78,
];

fn part_count_lambda_b_row(subcategory_id: i64, specification_id: i64) -> Result<EnvRow> {
    Ok(match (subcategory_id, specification_id) {
        (1, _) => [
            0.0005, 0.0022, 0.0071, 0.0037, 0.012, 0.0052, 0.0065, 0.016, 0.025, 0.025, 0.00025,
            0.0098, 0.035, 0.36,
        ],
        (2, 1 | 2) => PART_COUNT_LAMBDA_B_FILM_MIL,
        (2, 3 | 4) => PART_COUNT_LAMBDA_B_FILM_EST,
        (3, _) => [
            0.012, 0.025, 0.13, 0.062, 0.21, 0.078, 0.10, 0.19, 0.24, 0.32, 0.0060, 0.18, 0.47,
            8.2,
        ],
        (4, _) => [
            0.0023, 0.0066, 0.031, 0.013, 0.055, 0.022, 0.043, 0.077, 0.15, 0.10, 0.0011, 0.055,
            0.15, 1.7,
        ],
        (5, _) => [
            0.0085, 0.018, 0.10, 0.045, 0.16, 0.15, 0.17, 0.30, 0.38, 0.26, 0.0068, 0.13, 0.37,
            5.4,
        ],
        (6, 1) => [
            0.014, 0.031, 0.16, 0.077, 0.26, 0.073, 0.15, 0.19, 0.39, 0.42, 0.0042, 0.21, 0.62,
            9.4,
        ],
        (6, 2) => [
            0.013, 0.028, 0.15, 0.070, 0.24, 0.065, 0.13, 0.18, 0.35, 0.38, 0.0038, 0.19, 0.56,
            8.6,
        ],
        (7, _) => [
            0.008, 0.18, 0.096, 0.045, 0.15, 0.044, 0.088, 0.12, 0.24, 0.25, 0.004, 0.13, 0.37,
            5.5,
        ],
        (8, _) => [
            0.065, 0.32, 1.4, 0.71, 1.6, 0.71, 1.9, 1.0, 2.7, 2.4, 0.032, 1.3, 3.4, 62.0,
        ],
        (9, _) => [
            0.025, 0.055, 0.35, 0.15, 0.58, 0.16, 0.26, 0.35, 0.58, 1.1, 0.013, 0.52, 1.6, 24.0,
        ],
        (10, _) => [
            0.33, 0.73, 7.0, 2.9, 12.0, 3.5, 5.3, 7.1, 9.8, 23.0, 0.16, 11.0, 33.0, 510.0,
        ],
        (11, _) => [
            0.15, 0.35, 3.1, 1.2, 5.4, 1.9, 2.8, 0.0, 0.0, 9.0, 0.075, 0.0, 0.0, 0.0,
        ],
        (12, _) => [
            0.15, 0.34, 2.9, 1.2, 5.0, 1.6, 2.4, 0.0, 0.0, 7.6, 0.076, 0.0, 0.0, 0.0,
        ],
        (13, _) => [
            0.043, 0.15, 0.75, 0.35, 1.3, 0.39, 0.78, 1.8, 2.8, 2.5, 0.21, 1.2, 3.7, 49.0,
        ],
        (14, _) => [
            0.05, 0.11, 1.1, 0.45, 1.7, 2.8, 4.6, 4.6, 7.5, 3.3, 0.025, 1.5, 4.7, 67.0,
        ],
        (15, _) => [
            0.048, 0.16, 0.76, 0.36, 1.3, 0.36, 0.72, 1.4, 2.2, 2.3, 0.024, 1.2, 3.4, 52.0,
        ],
        (2 | 6, spec) => {
            return Err(AnalysisError::lookup("resistor specifications", spec));
        }
        (sub, _) => return Err(AnalysisError::lookup("resistor subcategories", sub)),
    })
}

const PART_COUNT_PI_Q: [f64; 6] = [0.030, 0.10, 0.30, 1.0, 3.0, 10.0];

fn part_stress_pi_q(subcategory_id: i64) -> Result<&'static [f64]> {
    Ok(match subcategory_id {
        1 | 5 | 6 | 7 => &[0.03, 0.1, 0.3, 1.0, 5.0, 15.0],
        2 => &[0.03, 0.1, 0.3, 1.0, 5.0, 5.0, 15.0],
        3 | 4 => &[1.0, 3.0],
        8 => &[1.0, 15.0],
        9 | 13 => &[0.02, 0.06, 0.2, 0.6, 3.0, 10.0],
        10 | 14 => &[2.5, 5.0],
        11 | 12 | 15 => &[2.0, 4.0],
        _ => return Err(AnalysisError::lookup("resistor subcategories", subcategory_id)),
    })
}

fn pi_e_row(subcategory_id: i64) -> Result<EnvRow> {
    Ok(match subcategory_id {
        1 => [
            1.0, 3.0, 8.0, 5.0, 13.0, 4.0, 5.0, 7.0, 11.0, 19.0, 0.5, 11.0, 27.0, 490.0,
        ],
        2 => [
            1.0, 2.0, 8.0, 4.0, 14.0, 4.0, 8.0, 10.0, 18.0, 19.0, 0.2, 10.0, 28.0, 510.0,
        ],
        3 | 4 => [
            1.0, 2.0, 10.0, 5.0, 17.0, 6.0, 8.0, 14.0, 18.0, 25.0, 0.5, 14.0, 36.0, 660.0,
        ],
        5 => [
            1.0, 2.0, 11.0, 5.0, 18.0, 15.0, 18.0, 28.0, 35.0, 27.0, 0.8, 14.0, 38.0, 610.0,
        ],
        6 => [
            1.0, 2.0, 10.0, 5.0, 16.0, 4.0, 8.0, 9.0, 18.0, 23.0, 0.3, 13.0, 34.0, 610.0,
        ],
        7 => [
            1.0, 2.0, 10.0, 5.0, 16.0, 4.0, 8.0, 9.0, 18.0, 23.0, 0.5, 13.0, 34.0, 610.0,
        ],
        8 => [
            1.0, 5.0, 21.0, 11.0, 24.0, 11.0, 30.0, 16.0, 42.0, 37.0, 0.5, 20.0, 53.0, 950.0,
        ],
        9 => [
            1.0, 2.0, 12.0, 6.0, 20.0, 5.0, 8.0, 9.0, 15.0, 33.0, 0.5, 18.0, 48.0, 870.0,
        ],
        10 => [
            1.0, 2.0, 18.0, 8.0, 30.0, 8.0, 12.0, 13.0, 18.0, 53.0, 0.5, 29.0, 76.0, 1400.0,
        ],
        11 => [
            1.0, 2.0, 16.0, 7.0, 28.0, 8.0, 12.0, 0.0, 0.0, 38.0, 0.5, 0.0, 0.0, 0.0,
        ],
        12 => [
            1.0, 3.0, 16.0, 7.0, 28.0, 8.0, 12.0, 0.0, 0.0, 38.0, 0.5, 0.0, 0.0, 0.0,
        ],
        13 | 15 => [
            1.0, 3.0, 14.0, 6.0, 24.0, 5.0, 7.0, 12.0, 18.0, 39.0, 0.5, 22.0, 57.0, 1000.0,
        ],
        14 => [
            1.0, 2.0, 19.0, 8.0, 29.0, 40.0, 65.0, 48.0, 78.0, 46.0, 0.5, 25.0, 66.0, 1200.0,
        ],
        _ => return Err(AnalysisError::lookup("resistor subcategories", subcategory_id)),
    })
}

const PI_C_PRECISION: [f64; 4] = [2.0, 1.0, 3.0, 1.5];
const PI_C_POWER: [f64; 2] = [2.0, 1.0];

const PI_R_WIREWOUND_POWER_SPEC1: [[f64; 8]; 8] = [
    [1.0, 1.0, 1.2, 1.2, 1.6, 1.6, 1.6, 0.0],
    [1.0, 1.0, 1.0, 1.2, 1.6, 1.6, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.0, 1.2, 1.2, 1.2, 1.6],
    [1.0, 1.2, 1.6, 1.6, 0.0, 0.0, 0.0, 0.0],
    [1.0, 1.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 1.6, 1.6, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.1, 1.2, 1.2, 1.6, 0.0, 0.0],
    [1.0, 1.0, 1.4, 0.0, 0.0, 0.0, 0.0, 0.0],
];

const PI_R_WIREWOUND_POWER_SPEC2: [[f64; 6]; 35] = [
    [1.0, 1.0, 1.0, 1.0, 1.2, 1.6],
    [1.0, 1.0, 1.0, 1.2, 1.6, 0.0],
    [1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    [1.0, 1.0, 1.0, 2.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 2.0, 0.0, 0.0],
    [1.0, 1.0, 1.2, 2.0, 0.0, 0.0],
    [1.0, 1.2, 1.4, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.6, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.2, 2.0, 0.0, 0.0],
    [1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.4, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.2, 0.0, 0.0],
    [1.0, 1.0, 1.4, 0.0, 0.0, 0.0],
    [1.0, 1.2, 1.6, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.4, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.2, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.4, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.4, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.4, 0.0, 0.0],
    [1.0, 1.0, 1.2, 1.5, 0.0, 0.0],
    [1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.4, 1.6, 0.0],
    [1.0, 1.0, 1.0, 1.4, 1.6, 2.0],
    [1.0, 1.0, 1.0, 1.4, 1.6, 2.0],
    [1.0, 1.0, 1.4, 2.4, 0.0, 0.0],
    [1.0, 1.0, 1.2, 2.6, 0.0, 0.0],
    [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    [1.0, 1.2, 1.4, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
    [1.0, 1.0, 1.0, 1.6, 0.0, 0.0],
    [1.0, 1.0, 1.4, 0.0, 0.0, 0.0],
    [1.0, 1.2, 1.5, 0.0, 0.0, 0.0],
    [1.0, 1.2, 0.0, 0.0, 0.0, 0.0],
];

const PI_R_CHASSIS_MOUNT: [[[f64; 6]; 6]; 2] = [
    [
        [1.0, 1.2, 1.2, 1.6, 0.0, 0.0],
        [1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
        [1.0, 1.0, 1.2, 1.2, 1.6, 0.0],
        [1.0, 1.0, 1.0, 1.1, 1.2, 1.6],
        [1.0, 1.0, 1.0, 1.0, 1.2, 1.6],
        [1.0, 1.0, 1.0, 1.0, 1.2, 1.6],
    ],
    [
        [1.0, 1.2, 1.6, 0.0, 0.0, 0.0],
        [1.0, 1.2, 1.6, 0.0, 0.0, 0.0],
        [1.0, 1.0, 1.2, 1.6, 0.0, 0.0],
        [1.0, 1.0, 1.1, 1.2, 1.4, 0.0],
        [1.0, 1.0, 1.0, 1.2, 1.6, 0.0],
        [1.0, 1.0, 1.0, 1.1, 1.4, 0.0],
    ],
];

const PI_V_VARIABLE_WIREWOUND: [f64; 7] = [1.1, 1.05, 1.0, 1.1, 1.22, 1.4, 2.0];
const PI_V_VARIABLE_NON_WIREWOUND: [f64; 3] = [1.0, 1.05, 1.2];

/// Part stress λb equation factors `[f0, f1, f2, f3, f4, f5]` and the
/// reference temperature in K.
fn lambda_b_factors(subcategory_id: i64, specification_id: i64) -> Result<([f64; 6], f64)> {
    Ok(match (subcategory_id, specification_id) {
        (1, _) => ([4.5e-9, 12.0, 1.0, 0.6, 1.0, 1.0], 343.0),
        (2, 1 | 2) => ([3.25e-4, 1.0, 3.0, 1.0, 1.0, 1.0], 343.0),
        (2, 3 | 4) => ([5.0e-5, 3.5, 1.0, 1.0, 1.0, 1.0], 398.0),
        (2, spec) => return Err(AnalysisError::lookup("resistor specifications", spec)),
        (3, _) => ([7.33e-3, 0.202, 2.6, 1.45, 0.89, 1.3], 298.0),
        (5, _) => ([0.0031, 1.0, 10.0, 1.0, 1.0, 1.5], 398.0),
        (6, _) => ([0.00148, 1.0, 2.0, 0.5, 1.0, 1.0], 298.0),
        (7, _) => ([0.00015, 2.64, 1.0, 0.466, 1.0, 1.0], 298.0),
        (9, _) => ([0.0062, 1.0, 5.0, 1.0, 1.0, 1.0], 358.0),
        (10, _) => ([0.0735, 1.03, 4.45, 2.74, 3.51, 1.0], 358.0),
        (11, _) => ([0.0398, 0.514, 5.28, 1.44, 4.46, 1.0], 313.0),
        (12, _) => ([0.0481, 0.334, 4.66, 1.47, 2.83, 1.0], 298.0),
        (13, _) => ([0.019, 0.445, 7.3, 2.69, 2.46, 1.0], 358.0),
        (14, _) => ([0.0246, 0.459, 9.3, 2.32, 5.3, 1.0], 343.0),
        (15, _) => ([0.018, 1.0, 7.4, 2.55, 3.6, 1.0], 343.0),
        (sub, _) => return Err(AnalysisError::lookup("resistor subcategories", sub)),
    })
}

const THERMISTOR_LAMBDA_B: [f64; 3] = [0.021, 0.065, 0.105];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResistorInputs {
    pub subcategory_id: i64,
    pub environment_active_id: i64,
    pub quality_id: i64,
    #[serde(default)]
    pub specification_id: i64,
    #[serde(default)]
    pub type_id: i64,
    #[serde(default)]
    pub family_id: i64,
    #[serde(default)]
    pub construction_id: i64,
    /// Ohms; 0 selects the subcategory default
    #[serde(default)]
    pub resistance: f64,
    /// 0 selects the default of 0.5
    #[serde(default)]
    pub power_ratio: f64,
    #[serde(default)]
    pub voltage_ratio: f64,
    #[serde(default)]
    pub temperature_active: f64,
    /// 0 selects the subcategory default
    #[serde(default)]
    pub n_elements: u32,
}

impl ResistorInputs {
    /// Fill unset operating values with handbook defaults
    pub fn with_defaults(&self) -> Result<Self> {
        let mut out = self.clone();
        if out.power_ratio <= 0.0 {
            out.power_ratio = 0.5;
        }
        if out.resistance <= 0.0 {
            out.resistance = default_resistance(out.subcategory_id)?;
        }
        if out.n_elements == 0 {
            out.n_elements = default_elements(out.subcategory_id);
        }
        Ok(out)
    }
}

fn default_resistance(subcategory_id: i64) -> Result<f64> {
    Ok(match subcategory_id {
        1 | 2 => 1.0e6,
        3 => 100.0,
        4 | 8 => 1000.0,
        5 => 1.0e5,
        6 | 7 | 9 | 11 | 12 => 5000.0,
        10 => 5.0e4,
        13..=15 => 2.0e5,
        _ => return Err(AnalysisError::lookup("resistor subcategories", subcategory_id)),
    })
}

fn default_elements(subcategory_id: i64) -> u32 {
    match subcategory_id {
        4 => 10,
        9..=15 => 3,
        _ => 0,
    }
}

pub fn get_part_count_lambda_b(
    subcategory_id: i64,
    specification_id: i64,
    environment_active_id: i64,
) -> Result<f64> {
    let row = part_count_lambda_b_row(subcategory_id, specification_id)?;
    select(&row, environment_active_id, "resistor part count lambda b")
}

pub fn get_environment_factor(subcategory_id: i64, environment_active_id: i64) -> Result<f64> {
    select(
        &pi_e_row(subcategory_id)?,
        environment_active_id,
        "resistor environment factors",
    )
}

pub fn calculate_part_count(inputs: &ResistorInputs) -> Result<Prediction> {
    let lambda_b = get_part_count_lambda_b(
        inputs.subcategory_id,
        inputs.specification_id,
        inputs.environment_active_id,
    )?;
    let mut prediction = Prediction::new(lambda_b);
    let pi_q = prediction.pi(
        "piQ",
        select(&PART_COUNT_PI_Q, inputs.quality_id, "resistor quality factors")?,
    );
    prediction.hazard_rate_active = lambda_b * pi_q;
    Ok(prediction)
}

pub fn calculate_part_stress_lambda_b(
    subcategory_id: i64,
    specification_id: i64,
    type_id: i64,
    temperature_active: f64,
    power_ratio: f64,
) -> Result<f64> {
    match subcategory_id {
        4 => Ok(0.00006),
        8 => select(&THERMISTOR_LAMBDA_B, type_id, "thermistor types"),
        _ => {
            let ([f0, f1, f2, f3, f4, f5], ref_temp) =
                lambda_b_factors(subcategory_id, specification_id)?;
            let kelvin = temperature_active + 273.0;
            Ok(f0
                * (f1 * (kelvin / ref_temp)).exp().powf(f2)
                * ((power_ratio / f3) * (kelvin / 273.0))
                    .powf(f4)
                    .exp()
                    .powf(f5))
        }
    }
}

/// Case temperature and temperature factor πT for film networks
pub fn calculate_temperature_factor(temperature_active: f64, power_ratio: f64) -> (f64, f64) {
    let temperature_case = temperature_active + 55.0 * power_ratio;
    let pi_t = (-4056.0 * (1.0 / (temperature_case + 273.0) - 1.0 / 298.0)).exp();
    (temperature_case, pi_t)
}

fn resistance_breaks(subcategory_id: i64, specification_id: i64) -> Result<&'static [f64]> {
    Ok(match subcategory_id {
        1 | 2 => &[1.0e5, 1.0e6, 1.0e7],
        3 => &[100.0, 1.0e5, 1.0e6],
        5 => &[1.0e4, 1.0e5, 1.0e6],
        6 => match specification_id {
            1 => &[500.0, 1.0e3, 5.0e3, 7.5e3, 1.0e4, 1.5e4, 2.0e4],
            2 => &[100.0, 1.0e3, 1.0e4, 1.0e5, 1.5e5, 2.0e5],
            _ => {
                return Err(AnalysisError::index(
                    "resistor specifications",
                    specification_id,
                ))
            }
        },
        7 => &[500.0, 1.0e3, 5.0e3, 1.0e4, 2.0e4],
        9 | 11 | 12 => &[2.0e3, 5.0e3],
        10 => &[1.0e4, 2.0e4, 5.0e4, 1.0e5, 2.0e5],
        13 | 14 => &[5.0e4, 1.0e5, 2.0e5, 5.0e5],
        15 => &[1.0e4, 5.0e4, 2.0e5, 1.0e6],
        _ => return Err(AnalysisError::lookup("resistor subcategories", subcategory_id)),
    })
}

/// Resistance factor πR; 0.0 for networks and thermistors.
///
/// The factor is taken one column past the matched resistance band, so a
/// resistance beyond the last breakpoint of a table without a spare column
/// is an index error.
pub fn get_resistance_factor(
    subcategory_id: i64,
    specification_id: i64,
    family_id: i64,
    resistance: f64,
) -> Result<f64> {
    if matches!(subcategory_id, 4 | 8) {
        return Ok(0.0);
    }
    let breaks = resistance_breaks(subcategory_id, specification_id)?;
    let column = band_index(breaks, resistance) + 1;
    let row: &[f64] = match subcategory_id {
        1 | 2 => &[1.0, 1.1, 1.6, 2.5],
        3 => &[1.0, 1.2, 1.3, 3.5],
        5 => &[1.0, 1.7, 3.0, 5.0],
        6 if specification_id == 1 => {
            &PI_R_WIREWOUND_POWER_SPEC1[family_index(family_id, 8)?]
        }
        6 => &PI_R_WIREWOUND_POWER_SPEC2[family_index(family_id, 35)?],
        7 => {
            let spec = usize::try_from(specification_id - 1)
                .ok()
                .filter(|s| *s < 2)
                .ok_or_else(|| AnalysisError::index("resistor specifications", specification_id))?;
            &PI_R_CHASSIS_MOUNT[spec][family_index(family_id, 6)?]
        }
        9 | 11 | 12 => &[1.0, 1.4, 2.0],
        10 => &[1.0, 1.1, 1.4, 2.0, 2.5, 3.5],
        _ => &[1.0, 1.1, 1.2, 1.4, 1.8],
    };
    row.get(column)
        .copied()
        .ok_or_else(|| AnalysisError::index("resistor resistance factors", column as i64 + 1))
}

fn family_index(family_id: i64, len: usize) -> Result<usize> {
    usize::try_from(family_id - 1)
        .ok()
        .filter(|f| *f < len)
        .ok_or_else(|| AnalysisError::index("resistor families", family_id))
}

/// Voltage factor πV for variable resistors
pub fn get_voltage_factor(subcategory_id: i64, voltage_ratio: f64) -> Result<f64> {
    let (breaks, factors): (&[f64], &[f64]) = match subcategory_id {
        9..=12 => (
            &[0.1, 0.2, 0.6, 0.7, 0.8, 0.9],
            &PI_V_VARIABLE_WIREWOUND,
        ),
        13..=15 => (&[0.8, 0.9], &PI_V_VARIABLE_NON_WIREWOUND),
        _ => {
            return Err(AnalysisError::lookup(
                "resistor voltage factors",
                subcategory_id,
            ))
        }
    };
    Ok(factors[band_index(breaks, voltage_ratio)])
}

pub fn calculate_part_stress(inputs: &ResistorInputs) -> Result<Prediction> {
    let inputs = inputs.with_defaults()?;
    let sub = inputs.subcategory_id;
    let lambda_b = calculate_part_stress_lambda_b(
        sub,
        inputs.specification_id,
        inputs.type_id,
        inputs.temperature_active,
        inputs.power_ratio,
    )?;
    let mut prediction = Prediction::new(lambda_b);
    prediction.derive("power_ratio", inputs.power_ratio);
    prediction.derive("resistance", inputs.resistance);
    prediction.derive("n_elements", f64::from(inputs.n_elements));

    let pi_q = prediction.pi(
        "piQ",
        select(part_stress_pi_q(sub)?, inputs.quality_id, "resistor quality factors")?,
    );
    let pi_e = prediction.pi(
        "piE",
        get_environment_factor(sub, inputs.environment_active_id)?,
    );
    let pi_r = prediction.pi(
        "piR",
        get_resistance_factor(
            sub,
            inputs.specification_id,
            inputs.family_id,
            inputs.resistance,
        )?,
    );
    let (temperature_case, pi_t) =
        calculate_temperature_factor(inputs.temperature_active, inputs.power_ratio);
    prediction.derive("temperature_case", temperature_case);

    let mut hazard_rate = lambda_b * pi_q * pi_e;
    match sub {
        4 => {
            hazard_rate *= prediction.pi("piT", pi_t) * f64::from(inputs.n_elements);
        }
        9..=15 => {
            let pi_v = prediction.pi("piV", get_voltage_factor(sub, inputs.voltage_ratio)?);
            let pi_taps = prediction.pi(
                "piTAPS",
                f64::from(inputs.n_elements).powf(1.5) / 25.0 + 0.792,
            );
            hazard_rate *= pi_taps * pi_r * pi_v;
            if sub == 10 || sub == 12 {
                let table: &[f64] = if sub == 10 {
                    &PI_C_PRECISION
                } else {
                    &PI_C_POWER
                };
                hazard_rate *= prediction.pi(
                    "piC",
                    select(table, inputs.construction_id, "resistor construction factors")?,
                );
            }
        }
        8 => {}
        _ => hazard_rate *= pi_r,
    }
    prediction.hazard_rate_active = hazard_rate;
    Ok(prediction)
}
