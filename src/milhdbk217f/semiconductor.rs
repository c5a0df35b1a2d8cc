//! Discrete semiconductor models (MIL-HDBK-217F section 6)
//!
//! | Subcategory | Device                                      |
//! |-------------|---------------------------------------------|
//! | 1           | Diode, low frequency                        |
//! | 2           | Diode, high frequency                       |
//! | 3           | Transistor, low frequency, bipolar          |
//! | 4           | Transistor, low frequency, Si FET           |
//! | 5           | Transistor, unijunction                     |
//! | 6           | Transistor, high frequency, low noise, BJT  |
//! | 7           | Transistor, high frequency, high power, BJT |
//! | 8           | Transistor, high frequency, GaAs FET        |
//! | 9           | Transistor, high frequency, Si FET          |
//! | 10          | Thyristor / SCR                             |
//! | 11          | Optoelectronic detector, isolator, emitter  |
//! | 12          | Optoelectronic alphanumeric display         |
//! | 13          | Optoelectronic laser diode                  |

use super::Prediction;
use crate::error::{select, AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

type EnvRow = [f64; 14];

fn part_count_lambda_b_row(subcategory_id: i64, type_id: i64) -> Result<EnvRow> {
    let row = match (subcategory_id, type_id) {
        (1, 1) => [
            0.00360, 0.0280, 0.049, 0.043, 0.100, 0.092, 0.210, 0.200, 0.44, 0.170, 0.00180,
            0.076, 0.23, 1.50,
        ],
        (1, 2) => [
            0.00094, 0.0075, 0.013, 0.011, 0.027, 0.024, 0.054, 0.054, 0.12, 0.045, 0.00047,
            0.020, 0.06, 0.40,
        ],
        (1, 3) => [
            0.06500, 0.5200, 0.890, 0.780, 1.900, 1.700, 3.700, 3.700, 8.00, 3.100, 0.03200,
            1.400, 4.10, 28.0,
        ],
        (1, 4) => [
            0.00280, 0.0220, 0.039, 0.034, 0.062, 0.073, 0.160, 0.160, 0.35, 0.130, 0.00140,
            0.060, 0.18, 1.20,
        ],
        (1, 5) => [
            0.00290, 0.0230, 0.040, 0.035, 0.084, 0.075, 0.170, 0.170, 0.36, 0.140, 0.00150,
            0.062, 0.18, 1.20,
        ],
        (1, 6) => [
            0.00330, 0.0240, 0.039, 0.035, 0.082, 0.066, 0.150, 0.130, 0.27, 0.120, 0.00160,
            0.060, 0.16, 1.30,
        ],
        (1, 7) => [
            0.00580, 0.0400, 0.066, 0.060, 0.140, 0.110, 0.250, 0.220, 0.460, 0.21, 0.00280,
            0.100, 0.28, 2.10,
        ],
        (2, 1) => [
            0.86, 2.80, 8.9, 5.6, 20.0, 11.0, 14.0, 36.0, 62.0, 44.0, 0.43, 16.0, 67.0, 350.0,
        ],
        (2, 2) => [
            0.31, 0.76, 2.1, 1.5, 4.60, 2.00, 2.50, 4.50, 7.60, 7.90, 0.16, 3.70, 12.0, 94.00,
        ],
        (2, 3) => [
            0.004, 0.0096, 0.0026, 0.0019, 0.058, 0.025, 0.032, 0.057, 0.097, 0.10, 0.002, 0.048,
            0.15, 1.2,
        ],
        (2, 4) => [
            0.028, 0.068, 0.19, 0.14, 0.41, 0.18, 0.22, 0.40, 0.69, 0.71, 0.014, 0.34, 1.1, 8.5,
        ],
        (2, 5) => [
            0.047, 0.11, 0.31, 0.23, 0.68, 0.3, 0.37, 0.67, 1.1, 1.2, 0.023, 0.56, 1.8, 14.0,
        ],
        (2, 6) => [
            0.0043, 0.010, 0.029, 0.021, 0.063, 0.028, 0.034, 0.062, 0.11, 0.11, 0.0022, 0.052,
            0.17, 1.3,
        ],
        (3, 1) => [
            0.00015, 0.0011, 0.0017, 0.0017, 0.0037, 0.0030, 0.0067, 0.0060, 0.013, 0.0056,
            0.000073, 0.0027, 0.0074, 0.056,
        ],
        (3, 2) => [
            0.0057, 0.042, 0.069, 0.063, 0.15, 0.12, 0.26, 0.23, 0.50, 0.22, 0.0029, 0.11, 0.29,
            1.1,
        ],
        (4 | 9, _) => [
            0.014, 0.099, 0.16, 0.15, 0.34, 0.28, 0.62, 0.53, 1.1, 0.51, 0.0069, 0.25, 0.68, 5.3,
        ],
        (5, _) => [
            0.016, 0.12, 0.20, 0.18, 0.42, 0.35, 0.80, 0.74, 1.6, 0.66, 0.0079, 0.31, 0.88, 6.4,
        ],
        (6, _) => [
            0.094, 0.23, 0.63, 0.46, 1.4, 0.60, 0.75, 1.3, 2.3, 2.4, 0.047, 1.1, 3.6, 28.0,
        ],
        (7, _) => [
            0.074, 0.15, 0.37, 0.29, 0.81, 0.29, 0.37, 0.52, 0.88, 0.037, 0.33, 0.66, 1.8, 18.0,
        ],
        (8, 1) => [
            0.17, 0.51, 1.5, 1.0, 3.4, 1.8, 2.3, 5.4, 9.2, 7.2, 0.083, 2.8, 11.0, 63.0,
        ],
        (8, 2) => [
            0.42, 1.3, 3.8, 2.5, 8.5, 4.5, 5.6, 13.0, 23.0, 18.0, 0.21, 6.9, 27.0, 160.0,
        ],
        (10, _) => [
            0.0025, 0.020, 0.034, 0.030, 0.072, 0.064, 0.14, 0.14, 0.31, 0.12, 0.0012, 0.053,
            0.16, 1.1,
        ],
        (11, 1) => [
            0.01100, 0.0290, 0.0830, 0.0590, 0.1800, 0.0840, 0.1100, 0.2100, 0.3500, 0.3400,
            0.00570, 0.1500, 0.510, 3.70,
        ],
        (11, 2) => [
            0.02700, 0.0700, 0.2000, 0.1400, 0.4300, 0.2000, 0.2500, 0.4900, 0.8300, 0.8000,
            0.01300, 0.3500, 1.200, 8.70,
        ],
        (11, 3) => [
            0.00047, 0.0012, 0.0035, 0.0025, 0.0077, 0.0035, 0.0044, 0.0086, 0.0150, 0.0140,
            0.00024, 0.0053, 0.021, 0.15,
        ],
        (12, _) => [
            0.0062, 0.016, 0.045, 0.032, 0.10, 0.046, 0.058, 0.11, 0.19, 0.18, 0.0031, 0.082,
            0.28, 2.0,
        ],
        (13, 1) => [
            5.1, 16.0, 49.0, 32.0, 110.0, 58.0, 72.0, 100.0, 170.0, 230.0, 2.6, 87.0, 350.0,
            2000.0,
        ],
        (13, 2) => [
            8.9, 28.0, 85.0, 55.0, 190.0, 100.0, 130.0, 180.0, 300.0, 400.0, 4.5, 150.0, 600.0,
            3500.0,
        ],
        (1..=3 | 8 | 11 | 13, t) => {
            return Err(AnalysisError::lookup("semiconductor types", t));
        }
        (s, _) => return Err(AnalysisError::lookup("semiconductor subcategories", s)),
    };
    Ok(row)
}

const PI_Q_STANDARD: [f64; 5] = [0.7, 1.0, 2.4, 5.5, 8.0];
const PI_Q_HIGH_FREQUENCY_TRANSISTOR: [f64; 4] = [0.5, 1.0, 2.0, 5.0];
const PI_Q_LASER_DIODE: [f64; 3] = [1.0, 1.0, 3.3];
const PI_Q_HF_DIODE: [f64; 5] = [0.5, 1.0, 5.0, 25.0, 50.0];
const PI_Q_HF_DIODE_SCHOTTKY: [f64; 4] = [0.5, 1.0, 1.8, 2.5];

const PI_E_DIODE_LF: EnvRow = [
    1.0, 6.0, 9.0, 9.0, 19.0, 13.0, 29.0, 20.0, 43.0, 24.0, 0.5, 14.0, 32.0, 320.0,
];
const PI_E_HIGH_FREQUENCY: EnvRow = [
    1.0, 2.0, 5.0, 4.0, 11.0, 4.0, 5.0, 7.0, 12.0, 16.0, 0.5, 9.0, 24.0, 250.0,
];
const PI_E_GAAS_FET: EnvRow = [
    1.0, 2.0, 5.0, 4.0, 11.0, 4.0, 5.0, 7.0, 12.0, 16.0, 0.5, 7.5, 24.0, 250.0,
];
const PI_E_OPTOELECTRONIC: EnvRow = [
    1.0, 2.0, 8.0, 5.0, 12.0, 4.0, 6.0, 6.0, 8.0, 17.0, 0.5, 9.0, 24.0, 450.0,
];

/// Default case temperature by active environment
const CASE_TEMPERATURE: EnvRow = [
    35.0, 45.0, 50.0, 45.0, 50.0, 60.0, 60.0, 75.0, 75.0, 60.0, 35.0, 50.0, 60.0, 45.0,
];

/// Default junction-to-case thermal resistance by package
const THETA_JC: [f64; 65] = [
    70.0, 10.0, 70.0, 70.0, 70.0, 70.0, 70.0, 5.0, 70.0, 70.0, 10.0, 70.0, 70.0, 70.0, 5.0, 5.0,
    5.0, 5.0, 5.0, 5.0, 10.0, 70.0, 70.0, 5.0, 22.0, 70.0, 5.0, 70.0, 5.0, 5.0, 1.0, 10.0, 70.0,
    70.0, 5.0, 5.0, 5.0, 10.0, 5.0, 5.0, 10.0, 5.0, 10.0, 10.0, 10.0, 5.0, 70.0, 5.0, 70.0, 70.0,
    70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0, 70.0,
];

const PI_C: [f64; 2] = [1.0, 2.0];
const PI_M: [f64; 3] = [1.0, 2.0, 4.0];

const LAMBDA_B_DIODE_LF: [f64; 8] = [0.0038, 0.0010, 0.069, 0.003, 0.005, 0.0013, 0.0034, 0.002];
const LAMBDA_B_DIODE_HF: [f64; 7] = [0.22, 0.18, 0.0023, 0.0081, 0.027, 0.0025, 0.0025];
const LAMBDA_B_OPTOELECTRONIC: [f64; 12] = [
    0.0055, 0.004, 0.0025, 0.013, 0.013, 0.0064, 0.0033, 0.017, 0.017, 0.0086, 0.0013, 0.00023,
];

/// Activation energy constants for the temperature factor
const PI_T_DIODE_LF: [f64; 8] = [3091.0, 3091.0, 3091.0, 3091.0, 3091.0, 3091.0, 1925.0, 1925.0];
const PI_T_DIODE_HF: [f64; 6] = [5260.0, 2100.0, 2100.0, 2100.0, 2100.0, 2100.0];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SemiconductorInputs {
    pub subcategory_id: i64,
    pub environment_active_id: i64,
    pub quality_id: i64,
    #[serde(default = "default_id")]
    pub type_id: i64,
    #[serde(default = "default_id")]
    pub application_id: i64,
    #[serde(default = "default_id")]
    pub package_id: i64,
    #[serde(default = "default_id")]
    pub construction_id: i64,
    #[serde(default = "default_id")]
    pub matching_id: i64,
    /// Percent
    #[serde(default)]
    pub duty_cycle: f64,
    #[serde(default)]
    pub voltage_ratio: f64,
    /// 0 or below selects the environment default
    #[serde(default)]
    pub temperature_case: f64,
    /// 0 or below selects the package default
    #[serde(default)]
    pub theta_jc: f64,
    #[serde(default)]
    pub power_operating: f64,
    /// GHz
    #[serde(default)]
    pub frequency_operating: f64,
    #[serde(default)]
    pub n_elements: u32,
    #[serde(default)]
    pub power_rated: f64,
    #[serde(default)]
    pub current_rated: f64,
    #[serde(default)]
    pub current_operating: f64,
    #[serde(default)]
    pub power_ratio: f64,
}

fn default_id() -> i64 {
    1
}

pub fn get_part_count_lambda_b(
    subcategory_id: i64,
    type_id: i64,
    environment_active_id: i64,
) -> Result<f64> {
    select(
        &part_count_lambda_b_row(subcategory_id, type_id)?,
        environment_active_id,
        "semiconductor part count lambda b",
    )
}

pub fn get_part_count_quality_factor(
    subcategory_id: i64,
    type_id: i64,
    quality_id: i64,
) -> Result<f64> {
    let table: &[f64] = match subcategory_id {
        2 if type_id == 5 => &PI_Q_HF_DIODE_SCHOTTKY,
        2 => &PI_Q_HF_DIODE,
        1 | 3..=12 => &PI_Q_STANDARD,
        13 => &PI_Q_LASER_DIODE,
        _ => {
            return Err(AnalysisError::lookup(
                "semiconductor subcategories",
                subcategory_id,
            ))
        }
    };
    select(table, quality_id, "semiconductor quality factors")
}

pub fn get_part_stress_quality_factor(
    subcategory_id: i64,
    type_id: i64,
    quality_id: i64,
) -> Result<f64> {
    let table: &[f64] = match subcategory_id {
        2 => match type_id {
            1..=4 | 6 => &PI_Q_HF_DIODE,
            5 => &PI_Q_HF_DIODE_SCHOTTKY,
            _ => return Err(AnalysisError::lookup("high frequency diode types", type_id)),
        },
        1 | 3 | 4 | 5 | 10 | 11 | 12 => &PI_Q_STANDARD,
        6..=9 => &PI_Q_HIGH_FREQUENCY_TRANSISTOR,
        13 => &PI_Q_LASER_DIODE,
        _ => {
            return Err(AnalysisError::lookup(
                "semiconductor subcategories",
                subcategory_id,
            ))
        }
    };
    select(table, quality_id, "semiconductor quality factors")
}

pub fn get_environment_factor(subcategory_id: i64, environment_active_id: i64) -> Result<f64> {
    let row = match subcategory_id {
        1 | 3 | 4 | 5 | 9 | 10 => &PI_E_DIODE_LF,
        2 | 6 | 7 => &PI_E_HIGH_FREQUENCY,
        8 => &PI_E_GAAS_FET,
        11..=13 => &PI_E_OPTOELECTRONIC,
        _ => {
            return Err(AnalysisError::lookup(
                "semiconductor subcategories",
                subcategory_id,
            ))
        }
    };
    select(row, environment_active_id, "semiconductor environment factors")
}

pub fn calculate_part_count(inputs: &SemiconductorInputs) -> Result<Prediction> {
    let lambda_b = get_part_count_lambda_b(
        inputs.subcategory_id,
        inputs.type_id,
        inputs.environment_active_id,
    )?;
    let mut prediction = Prediction::new(lambda_b);
    let pi_q = prediction.pi(
        "piQ",
        get_part_count_quality_factor(inputs.subcategory_id, inputs.type_id, inputs.quality_id)?,
    );
    prediction.hazard_rate_active = lambda_b * pi_q;
    Ok(prediction)
}

pub fn calculate_part_stress_lambda_b(inputs: &SemiconductorInputs) -> Result<f64> {
    let frequency = inputs.frequency_operating;
    let power = inputs.power_operating;
    match inputs.subcategory_id {
        3 => Ok(0.00074),
        5 => Ok(0.0083),
        6 => Ok(0.18),
        10 => Ok(0.0022),
        7 => Ok(0.032 * (0.354 * frequency + 0.00558 * power).exp()),
        8 => {
            if frequency > 1.0 && frequency <= 10.0 && power < 0.1 {
                Ok(0.052)
            } else {
                Ok(0.0093 * (0.429 * frequency + 0.486 * power).exp())
            }
        }
        12 => {
            let lambda_b = 0.00043 * f64::from(inputs.n_elements);
            if matches!(inputs.application_id, 1 | 3) {
                Ok(lambda_b + 0.000043)
            } else {
                Ok(lambda_b)
            }
        }
        1 => select(&LAMBDA_B_DIODE_LF, inputs.type_id, "low frequency diode types"),
        2 => select(&LAMBDA_B_DIODE_HF, inputs.type_id, "high frequency diode types"),
        4 => select(&[0.012, 0.0045], inputs.type_id, "low frequency FET types"),
        9 => select(&[0.06, 0.023], inputs.type_id, "high frequency FET types"),
        11 => select(
            &LAMBDA_B_OPTOELECTRONIC,
            inputs.type_id,
            "optoelectronic types",
        ),
        13 => select(&[3.23, 5.65], inputs.type_id, "laser diode types"),
        sub => Err(AnalysisError::lookup("semiconductor subcategories", sub)),
    }
}

/// Case temperature, θJC and junction temperature, substituting defaults
/// for a non-positive case temperature or thermal resistance.
pub fn calculate_junction_temperature(
    environment_active_id: i64,
    package_id: i64,
    temperature_case: f64,
    theta_jc: f64,
    power_operating: f64,
) -> Result<(f64, f64, f64)> {
    let temperature_case = if temperature_case <= 0.0 {
        select(
            &CASE_TEMPERATURE,
            environment_active_id,
            "semiconductor case temperatures",
        )?
    } else {
        temperature_case
    };
    let theta_jc = if theta_jc <= 0.0 {
        select(&THETA_JC, package_id, "semiconductor packages")?
    } else {
        theta_jc
    };
    Ok((
        temperature_case,
        theta_jc,
        temperature_case + theta_jc * power_operating,
    ))
}

pub fn calculate_temperature_factor(
    subcategory_id: i64,
    type_id: i64,
    voltage_ratio: f64,
    temperature_junction: f64,
) -> Result<f64> {
    let arrhenius = |ea: f64| (-ea * (1.0 / (temperature_junction + 273.0) - 1.0 / 298.0)).exp();
    let ea = match subcategory_id {
        1 => select(&PI_T_DIODE_LF, type_id, "low frequency diode types")?,
        2 => select(&PI_T_DIODE_HF, type_id, "high frequency diode types")?,
        7 => {
            let (ea, f1, f2) = match type_id {
                1 => (2903.0, 0.1, 2.0),
                2 => (5794.0, 0.38, 7.55),
                _ => return Err(AnalysisError::lookup("high power transistor types", type_id)),
            };
            return Ok(if voltage_ratio <= 0.4 {
                f1 * arrhenius(ea)
            } else {
                f2 * (voltage_ratio - 0.35) * arrhenius(ea)
            });
        }
        3 | 6 => 2114.0,
        4 | 9 => 1925.0,
        5 => 2483.0,
        8 => 4485.0,
        10 => 3082.0,
        11 | 12 => 2790.0,
        13 => 4635.0,
        _ => {
            return Err(AnalysisError::lookup(
                "semiconductor subcategories",
                subcategory_id,
            ))
        }
    };
    Ok(arrhenius(ea))
}

/// Application factor πA; `duty_cycle` in percent
pub fn calculate_application_factor(
    subcategory_id: i64,
    application_id: i64,
    duty_cycle: f64,
) -> Result<f64> {
    match subcategory_id {
        2 => select(&[0.5, 2.5, 1.0], application_id, "semiconductor applications"),
        3 => select(&[1.5, 0.7], application_id, "semiconductor applications"),
        4 => select(
            &[1.5, 0.7, 2.0, 4.0, 8.0, 10.0],
            application_id,
            "semiconductor applications",
        ),
        8 => select(&[1.0, 4.0], application_id, "semiconductor applications"),
        7 if application_id == 1 => Ok(7.6),
        7 => Ok(0.06 * (duty_cycle / 100.0) + 0.4),
        13 if application_id == 1 => Ok(4.4),
        13 => {
            if duty_cycle < 0.0 {
                return Err(AnalysisError::range("duty_cycle", duty_cycle, ">= 0"));
            }
            Ok((duty_cycle / 100.0).sqrt())
        }
        _ => Ok(0.0),
    }
}

pub fn calculate_power_rating_factor(
    subcategory_id: i64,
    type_id: i64,
    power_rated: f64,
    current_rated: f64,
) -> Result<f64> {
    match subcategory_id {
        2 if type_id == 4 => {
            if power_rated <= 0.0 {
                return Err(AnalysisError::range("power_rated", power_rated, "> 0"));
            }
            Ok(0.326 * power_rated.ln() - 0.25)
        }
        2 => Ok(1.0),
        3 | 6 if power_rated < 0.1 => Ok(0.43),
        3 | 6 => Ok(power_rated.powf(0.37)),
        10 => Ok(current_rated.powf(0.4)),
        _ => Ok(0.0),
    }
}

pub fn calculate_electrical_stress_factor(
    subcategory_id: i64,
    type_id: i64,
    voltage_ratio: f64,
) -> f64 {
    match subcategory_id {
        1 if type_id > 5 => 1.0,
        1 if voltage_ratio <= 0.3 => 0.054,
        1 => voltage_ratio.powf(2.43),
        3 | 6 => 0.045 * (3.1 * voltage_ratio).exp(),
        10 if voltage_ratio <= 0.3 => 0.1,
        10 => voltage_ratio.powf(1.9),
        _ => 0.0,
    }
}

pub fn calculate_part_stress(inputs: &SemiconductorInputs) -> Result<Prediction> {
    let sub = inputs.subcategory_id;
    let pi_q = get_part_stress_quality_factor(sub, inputs.type_id, inputs.quality_id)?;
    let lambda_b = calculate_part_stress_lambda_b(inputs)?;
    let mut prediction = Prediction::new(lambda_b);
    prediction.pi("piQ", pi_q);

    let (temperature_case, theta_jc, temperature_junction) = calculate_junction_temperature(
        inputs.environment_active_id,
        inputs.package_id,
        inputs.temperature_case,
        inputs.theta_jc,
        inputs.power_operating,
    )?;
    prediction.derive("temperature_case", temperature_case);
    prediction.derive("theta_jc", theta_jc);
    prediction.derive("temperature_junction", temperature_junction);

    let pi_t = prediction.pi(
        "piT",
        calculate_temperature_factor(sub, inputs.type_id, inputs.voltage_ratio, temperature_junction)?,
    );
    let pi_e = prediction.pi(
        "piE",
        get_environment_factor(sub, inputs.environment_active_id)?,
    );
    let pi_a = prediction.pi(
        "piA",
        calculate_application_factor(sub, inputs.application_id, inputs.duty_cycle)?,
    );
    let pi_r = prediction.pi(
        "piR",
        calculate_power_rating_factor(sub, inputs.type_id, inputs.power_rated, inputs.current_rated)?,
    );
    let pi_s = prediction.pi(
        "piS",
        calculate_electrical_stress_factor(sub, inputs.type_id, inputs.voltage_ratio),
    );

    let mut hazard_rate = lambda_b * pi_t * pi_q * pi_e;
    match sub {
        1 => {
            let pi_c = prediction.pi(
                "piC",
                select(&PI_C, inputs.construction_id, "diode constructions")?,
            );
            hazard_rate *= pi_s * pi_c;
        }
        2 => hazard_rate *= pi_a * pi_r,
        3 => hazard_rate *= pi_a * pi_r * pi_s,
        4 => hazard_rate *= pi_a,
        6 | 10 => hazard_rate *= pi_r * pi_s,
        7 | 8 => {
            let pi_m = prediction.pi(
                "piM",
                select(&PI_M, inputs.matching_id, "matching networks")?,
            );
            hazard_rate *= pi_a * pi_m;
        }
        13 => {
            let pi_i = prediction.pi("piI", inputs.current_operating.powf(0.68));
            let pi_p = prediction.pi("piP", 1.0 / (2.0 * (1.0 - inputs.power_ratio)));
            hazard_rate *= pi_i * pi_a * pi_p;
        }
        _ => {}
    }
    prediction.hazard_rate_active = hazard_rate;
    Ok(prediction)
}
