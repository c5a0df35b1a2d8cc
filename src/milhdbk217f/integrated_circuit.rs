//! Microcircuit models (MIL-HDBK-217F section 5)
//!
//! | Subcategory | Device                          |
//! |-------------|---------------------------------|
//! | 1           | Linear                          |
//! | 2           | Logic                           |
//! | 3           | PAL/PLA                         |
//! | 4           | Microprocessor/microcontroller  |
//! | 5           | Memory, ROM                     |
//! | 6           | Memory, EEPROM                  |
//! | 7           | Memory, DRAM                    |
//! | 8           | Memory, SRAM                    |
//! | 9           | GaAs MMIC / digital             |
//! | 10          | VHSIC/VLSI CMOS                 |
//!
//! Element-count tables are keyed by the breakpoint nearest to the part's
//! gate, bit or transistor count.

use super::{nearest_index, Prediction};
use crate::error::{select, AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

type EnvRow = [f64; 14];

const PART_COUNT_LINEAR: [EnvRow; 4] = [
    [
        0.0095, 0.024, 0.039, 0.034, 0.049, 0.057, 0.062, 0.12, 0.13, 0.076, 0.0095, 0.044, 0.096,
        1.1,
    ],
    [0.017, 0.041, 0.065, 0.054, 0.078, 0.1, 0.11, 0.22, 0.24, 0.13, 0.017, 0.072, 0.15, 1.4],
    [0.033, 0.074, 0.11, 0.092, 0.13, 0.19, 0.19, 0.41, 0.44, 0.22, 0.033, 0.12, 0.26, 2.0],
    [0.05, 0.12, 0.18, 0.15, 0.21, 0.3, 0.3, 0.63, 0.67, 0.35, 0.05, 0.19, 0.41, 3.4],
];
const PART_COUNT_LOGIC_BIPOLAR: [EnvRow; 6] = [
    [
        0.0036, 0.012, 0.024, 0.024, 0.035, 0.025, 0.03, 0.032, 0.049, 0.047, 0.0036, 0.03, 0.069,
        1.2,
    ],
    [0.006, 0.02, 0.038, 0.037, 0.055, 0.039, 0.048, 0.051, 0.077, 0.074, 0.006, 0.046, 0.11, 1.9],
    [0.011, 0.035, 0.066, 0.065, 0.097, 0.07, 0.085, 0.091, 0.14, 0.13, 0.011, 0.082, 0.19, 3.3],
    [0.033, 0.12, 0.22, 0.22, 0.33, 0.23, 0.28, 0.3, 0.46, 0.44, 0.033, 0.28, 0.65, 12.0],
    [0.052, 0.17, 0.33, 0.33, 0.48, 0.34, 0.42, 0.45, 0.68, 0.65, 0.052, 0.41, 0.95, 17.0],
    [0.075, 0.23, 0.44, 0.43, 0.63, 0.46, 0.56, 0.61, 0.9, 0.85, 0.075, 0.53, 1.2, 21.0],
];
const PART_COUNT_LOGIC_MOS: [EnvRow; 6] = [
    [
        0.0057, 0.015, 0.027, 0.027, 0.039, 0.029, 0.035, 0.039, 0.056, 0.052, 0.0057, 0.033,
        0.074, 1.2,
    ],
    [0.01, 0.028, 0.045, 0.043, 0.062, 0.049, 0.057, 0.068, 0.092, 0.083, 0.01, 0.053, 0.12, 1.9],
    [0.019, 0.047, 0.08, 0.077, 0.11, 0.088, 0.1, 0.12, 0.17, 0.15, 0.019, 0.095, 0.21, 3.3],
    [0.049, 0.14, 0.25, 0.24, 0.36, 0.27, 0.32, 0.36, 0.51, 0.48, 0.049, 0.3, 0.69, 12.0],
    [0.084, 0.22, 0.39, 0.37, 0.54, 0.42, 0.49, 0.56, 0.79, 0.72, 0.084, 0.46, 1.0, 17.0],
    [0.13, 0.31, 0.53, 0.51, 0.73, 0.59, 0.69, 0.82, 1.1, 0.98, 0.13, 0.83, 1.4, 21.0],
];
const PART_COUNT_PAL_PLA_BIPOLAR: [EnvRow; 3] = [
    [
        0.0061, 0.016, 0.029, 0.027, 0.04, 0.032, 0.037, 0.044, 0.061, 0.054, 0.0061, 0.034, 0.076,
        1.2,
    ],
    [0.011, 0.028, 0.048, 0.046, 0.065, 0.054, 0.063, 0.077, 0.1, 0.089, 0.011, 0.057, 0.12, 1.9],
    [0.022, 0.052, 0.087, 0.082, 0.12, 0.099, 0.11, 0.14, 0.19, 0.16, 0.022, 0.1, 0.22, 3.3],
];
const PART_COUNT_PAL_PLA_MOS: [EnvRow; 4] = [
    [0.0046, 0.018, 0.035, 0.035, 0.052, 0.035, 0.044, 0.044, 0.07, 0.07, 0.0046, 0.044, 0.1, 1.9],
    [
        0.0056, 0.021, 0.042, 0.042, 0.062, 0.042, 0.052, 0.053, 0.084, 0.083, 0.0056, 0.052, 0.12,
        2.3,
    ],
    [
        0.0061, 0.022, 0.043, 0.042, 0.063, 0.043, 0.054, 0.055, 0.086, 0.084, 0.0081, 0.053, 0.13,
        2.3,
    ],
    [0.0095, 0.033, 0.064, 0.063, 0.094, 0.065, 0.08, 0.083, 0.13, 0.13, 0.0095, 0.079, 0.19, 3.3],
];
const PART_COUNT_MICROPROCESSOR_BIPOLAR: [EnvRow; 3] = [
    [0.028, 0.061, 0.098, 0.091, 0.13, 0.12, 0.13, 0.17, 0.22, 0.18, 0.028, 0.11, 0.24, 3.3],
    [0.052, 0.11, 0.18, 0.16, 0.23, 0.21, 0.24, 0.32, 0.39, 0.31, 0.052, 0.2, 0.41, 5.6],
    [0.11, 0.23, 0.36, 0.33, 0.47, 0.44, 0.49, 0.65, 0.81, 0.65, 0.11, 0.42, 0.86, 12.0],
];
const PART_COUNT_MICROPROCESSOR_MOS: [EnvRow; 3] = [
    [0.048, 0.089, 0.13, 0.12, 0.16, 0.16, 0.17, 0.24, 0.28, 0.22, 0.048, 0.15, 0.28, 3.4],
    [0.093, 0.17, 0.24, 0.22, 0.29, 0.3, 0.32, 0.45, 0.52, 0.4, 0.093, 0.27, 0.5, 5.6],
    [0.19, 0.34, 0.49, 0.45, 0.6, 0.61, 0.66, 0.9, 1.1, 0.82, 0.19, 0.54, 1.0, 12.0],
];
const PART_COUNT_ROM_BIPOLAR: [EnvRow; 4] = [
    [0.01, 0.028, 0.05, 0.046, 0.067, 0.062, 0.07, 0.1, 0.13, 0.096, 0.01, 0.058, 0.13, 1.9],
    [0.017, 0.043, 0.071, 0.063, 0.091, 0.095, 0.11, 0.18, 0.21, 0.14, 0.017, 0.081, 0.18, 2.3],
    [0.028, 0.065, 0.1, 0.085, 0.12, 0.15, 0.18, 0.3, 0.33, 0.19, 0.028, 0.11, 0.23, 2.3],
    [0.053, 0.12, 0.18, 0.15, 0.21, 0.27, 0.29, 0.56, 0.61, 0.33, 0.053, 0.19, 0.39, 3.4],
];
const PART_COUNT_ROM_MOS: [EnvRow; 4] = [
    [
        0.0047, 0.018, 0.036, 0.035, 0.053, 0.037, 0.045, 0.048, 0.074, 0.071, 0.0047, 0.044, 0.11,
        1.9,
    ],
    [0.0059, 0.022, 0.043, 0.042, 0.063, 0.045, 0.055, 0.06, 0.09, 0.086, 0.0059, 0.053, 0.13, 2.3],
    [
        0.0067, 0.023, 0.045, 0.044, 0.066, 0.048, 0.059, 0.068, 0.099, 0.089, 0.0067, 0.055, 0.13,
        2.3,
    ],
    [0.011, 0.036, 0.068, 0.066, 0.098, 0.075, 0.09, 0.11, 0.15, 0.14, 0.011, 0.083, 0.2, 3.3],
];
const PART_COUNT_EEPROM_MOS: [EnvRow; 4] = [
    [
        0.0049, 0.018, 0.036, 0.036, 0.053, 0.037, 0.046, 0.049, 0.075, 0.072, 0.0048, 0.045, 0.11,
        1.9,
    ],
    [
        0.0061, 0.022, 0.044, 0.043, 0.064, 0.046, 0.056, 0.062, 0.093, 0.087, 0.0062, 0.054, 0.13,
        2.3,
    ],
    [0.0072, 0.024, 0.048, 0.045, 0.067, 0.051, 0.061, 0.073, 0.1, 0.092, 0.0072, 0.057, 0.13, 2.3],
    [0.012, 0.038, 0.071, 0.068, 0.1, 0.08, 0.095, 0.12, 0.18, 0.14, 0.012, 0.086, 0.2, 3.3],
];
const PART_COUNT_DRAM_MOS: [EnvRow; 4] = [
    [0.004, 0.014, 0.027, 0.027, 0.04, 0.029, 0.035, 0.04, 0.059, 0.055, 0.004, 0.034, 0.08, 1.4],
    [0.0055, 0.019, 0.039, 0.034, 0.051, 0.039, 0.047, 0.056, 0.079, 0.07, 0.0055, 0.043, 0.1, 1.7],
    [0.0074, 0.023, 0.043, 0.04, 0.06, 0.049, 0.058, 0.076, 0.1, 0.084, 0.0074, 0.051, 0.12, 1.9],
    [0.011, 0.032, 0.057, 0.053, 0.077, 0.07, 0.08, 0.12, 0.15, 0.11, 0.011, 0.067, 0.15, 2.3],
];
const PART_COUNT_SRAM_BIPOLAR: [EnvRow; 4] = [
    [0.0075, 0.023, 0.043, 0.041, 0.06, 0.05, 0.058, 0.077, 0.1, 0.084, 0.0075, 0.052, 0.12, 1.9],
    [0.012, 0.033, 0.058, 0.054, 0.079, 0.072, 0.083, 0.12, 0.15, 0.11, 0.012, 0.069, 0.15, 2.3],
    [0.018, 0.045, 0.074, 0.065, 0.095, 0.1, 0.11, 0.19, 0.22, 0.14, 0.018, 0.084, 0.18, 2.3],
    [0.033, 0.079, 0.13, 0.11, 0.16, 0.18, 0.2, 0.35, 0.39, 0.24, 0.033, 0.14, 0.3, 3.4],
];
const PART_COUNT_SRAM_MOS: [EnvRow; 4] = [
    [0.0079, 0.022, 0.038, 0.034, 0.05, 0.048, 0.054, 0.083, 0.1, 0.073, 0.0079, 0.044, 0.098, 1.4],
    [0.014, 0.034, 0.057, 0.05, 0.073, 0.077, 0.085, 0.14, 0.17, 0.11, 0.014, 0.065, 0.14, 1.8],
    [0.023, 0.053, 0.084, 0.071, 0.1, 0.12, 0.13, 0.25, 0.27, 0.16, 0.023, 0.092, 0.19, 1.9],
    [0.043, 0.092, 0.14, 0.11, 0.16, 0.22, 0.23, 0.46, 0.49, 0.26, 0.043, 0.15, 0.3, 2.3],
];
const PART_COUNT_GAAS_BIPOLAR: [EnvRow; 2] = [
    [0.019, 0.034, 0.046, 0.039, 0.052, 0.065, 0.068, 0.11, 0.12, 0.076, 0.019, 0.049, 0.086, 0.61],
    [0.025, 0.047, 0.067, 0.058, 0.079, 0.091, 0.097, 0.15, 0.17, 0.11, 0.025, 0.073, 0.14, 1.3],
];
const PART_COUNT_GAAS_MOS: [EnvRow; 2] = [
    [0.0085, 0.03, 0.057, 0.057, 0.084, 0.06, 0.073, 0.08, 0.12, 0.11, 0.0085, 0.071, 0.17, 3.0],
    [0.014, 0.053, 0.1, 0.1, 0.15, 0.11, 0.13, 0.14, 0.22, 0.21, 0.014, 0.13, 0.31, 5.5],
];

const PI_E: EnvRow = [
    0.5, 2.0, 4.0, 4.0, 6.0, 4.0, 5.0, 5.0, 8.0, 8.0, 0.5, 5.0, 12.0, 220.0,
];
const PI_Q: [f64; 3] = [0.25, 1.0, 2.0];

const BOLTZMANN: f64 = 8.617e-5;

/// Element-count breakpoints
fn element_breaks(subcategory_id: i64, technology_id: i64) -> Result<&'static [f64]> {
    Ok(match (subcategory_id, technology_id) {
        (1, _) => &[100.0, 300.0, 1000.0, 10000.0],
        (2, _) => &[100.0, 1000.0, 3000.0, 10000.0, 30000.0, 60000.0],
        (3, 1) => &[200.0, 1000.0, 5000.0],
        (3, 2) => &[16000.0, 64000.0, 256000.0, 1.0e6],
        (4, _) => &[8.0, 16.0, 32.0],
        (5..=8, _) => &[16000.0, 64000.0, 256000.0, 1.0e6],
        (9, 1) => &[10.0, 100.0],
        (9, 2) => &[1000.0, 10000.0],
        (3 | 9, t) => return Err(AnalysisError::lookup("microcircuit technologies", t)),
        (s, _) => return Err(AnalysisError::lookup("microcircuit subcategories", s)),
    })
}

fn part_count_rows(subcategory_id: i64, technology_id: i64) -> Result<&'static [EnvRow]> {
    Ok(match (subcategory_id, technology_id) {
        (1, _) => &PART_COUNT_LINEAR,
        (2, 1) => &PART_COUNT_LOGIC_BIPOLAR,
        (2, 2) => &PART_COUNT_LOGIC_MOS,
        (3, 1) => &PART_COUNT_PAL_PLA_BIPOLAR,
        (3, 2) => &PART_COUNT_PAL_PLA_MOS,
        (4, 1) => &PART_COUNT_MICROPROCESSOR_BIPOLAR,
        (4, 2) => &PART_COUNT_MICROPROCESSOR_MOS,
        (5, 1) => &PART_COUNT_ROM_BIPOLAR,
        (5, 2) => &PART_COUNT_ROM_MOS,
        (6, 2) => &PART_COUNT_EEPROM_MOS,
        (7, 2) => &PART_COUNT_DRAM_MOS,
        (8, 1) => &PART_COUNT_SRAM_BIPOLAR,
        (8, 2) => &PART_COUNT_SRAM_MOS,
        (9, 1) => &PART_COUNT_GAAS_BIPOLAR,
        (9, 2) => &PART_COUNT_GAAS_MOS,
        (2..=9, t) => return Err(AnalysisError::lookup("microcircuit technologies", t)),
        (s, _) => return Err(AnalysisError::lookup("microcircuit subcategories", s)),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IntegratedCircuitInputs {
    pub subcategory_id: i64,
    pub environment_active_id: i64,
    pub quality_id: i64,
    /// 1 = bipolar, 2 = MOS; logic uses 11 for its MOS die complexity row
    #[serde(default = "default_id")]
    pub technology_id: i64,
    #[serde(default = "default_id")]
    pub family_id: i64,
    #[serde(default = "default_id")]
    pub type_id: i64,
    #[serde(default = "default_id")]
    pub application_id: i64,
    #[serde(default = "default_id")]
    pub package_id: i64,
    #[serde(default = "default_id")]
    pub construction_id: i64,
    #[serde(default = "default_id")]
    pub manufacturing_id: i64,
    /// Gates, bits or transistors
    #[serde(default)]
    pub n_elements: u32,
    #[serde(default)]
    pub n_active_pins: u32,
    /// Lifetime write cycles (EEPROM)
    #[serde(default)]
    pub n_cycles: u32,
    #[serde(default)]
    pub years_in_production: f64,
    #[serde(default)]
    pub temperature_case: f64,
    #[serde(default)]
    pub theta_jc: f64,
    #[serde(default)]
    pub power_operating: f64,
    /// Die area in cm²
    #[serde(default)]
    pub area: f64,
    /// Feature size in microns
    #[serde(default)]
    pub feature_size: f64,
    /// ESD susceptibility in volts
    #[serde(default)]
    pub voltage_esd: f64,
}

fn default_id() -> i64 {
    1
}

pub fn get_part_count_lambda_b(
    subcategory_id: i64,
    technology_id: i64,
    environment_active_id: i64,
    n_elements: u32,
) -> Result<f64> {
    let rows = part_count_rows(subcategory_id, technology_id)?;
    let index = nearest_index(
        element_breaks(subcategory_id, technology_id)?,
        f64::from(n_elements),
    );
    let row = rows
        .get(index)
        .ok_or_else(|| AnalysisError::index("microcircuit part count lambda b", index as i64 + 1))?;
    select(row, environment_active_id, "microcircuit part count lambda b")
}

pub fn calculate_part_count(inputs: &IntegratedCircuitInputs) -> Result<Prediction> {
    let lambda_b = get_part_count_lambda_b(
        inputs.subcategory_id,
        inputs.technology_id,
        inputs.environment_active_id,
        inputs.n_elements,
    )?;
    let mut prediction = Prediction::new(lambda_b);
    let pi_q = prediction.pi(
        "piQ",
        select(&PI_Q, inputs.quality_id, "microcircuit quality factors")?,
    );
    prediction.hazard_rate_active = lambda_b * pi_q;
    Ok(prediction)
}

pub fn calculate_junction_temperature(
    temperature_case: f64,
    power_operating: f64,
    theta_jc: f64,
) -> f64 {
    temperature_case + power_operating * theta_jc
}

/// Temperature factor πT from the family/type activation energy
pub fn calculate_temperature_factor(
    subcategory_id: i64,
    family_id: i64,
    type_id: i64,
    temperature_junction: f64,
) -> Result<f64> {
    let (ea, ref_temp) = match subcategory_id {
        1 | 3 | 4 => (0.65, 296.0),
        2 => (
            select(
                &[
                    0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.45, 0.45, 0.5, 0.5, 0.6, 0.6, 0.6,
                ],
                family_id,
                "logic families",
            )?,
            296.0,
        ),
        5..=8 => (0.6, 296.0),
        9 => (select(&[1.5, 1.4], type_id, "GaAs types")?, 423.0),
        10 => (0.35, 296.0),
        _ => {
            return Err(AnalysisError::lookup(
                "microcircuit subcategories",
                subcategory_id,
            ))
        }
    };
    Ok(0.1 * ((-ea / BOLTZMANN) * (1.0 / (temperature_junction + 273.0) - 1.0 / ref_temp)).exp())
}

/// Die complexity failure rate C1
pub fn get_die_complexity_factor(
    subcategory_id: i64,
    technology_id: i64,
    application_id: i64,
    n_elements: u32,
) -> Result<f64> {
    let technology = match subcategory_id {
        2 if technology_id == 11 => 2,
        2 => 1,
        _ => technology_id,
    };
    let breaks: &[f64] = match subcategory_id {
        3 => element_breaks(3, technology)?,
        9 => match application_id {
            1 => &[10.0, 1000.0],
            2 => &[1000.0, 10000.0],
            _ => return Err(AnalysisError::lookup("GaAs applications", application_id)),
        },
        _ => element_breaks(subcategory_id, technology)?,
    };
    let rows: [&[f64]; 2] = match subcategory_id {
        1 => [&[0.01, 0.02, 0.04, 0.06], &[0.01, 0.02, 0.04, 0.06]],
        2 => [
            &[0.0025, 0.005, 0.01, 0.02, 0.04, 0.08],
            &[0.01, 0.02, 0.04, 0.08, 0.16, 0.29],
        ],
        3 => [&[0.01, 0.021, 0.042], &[0.00085, 0.0017, 0.0034, 0.0068]],
        4 => [&[0.06, 0.12, 0.24, 0.48], &[0.14, 0.28, 0.56, 1.12]],
        5 => [&[0.00065, 0.0013, 0.0026, 0.0052], &[0.0094, 0.019, 0.038, 0.075]],
        6 => [&[0.00085, 0.0017, 0.0034, 0.0068], &[0.0, 0.0, 0.0, 0.0]],
        7 => [&[0.0013, 0.0025, 0.005, 0.01], &[0.0, 0.0, 0.0, 0.0]],
        8 => [&[0.0078, 0.016, 0.031, 0.062], &[0.0052, 0.011, 0.021, 0.042]],
        9 => [&[4.5, 7.2], &[25.0, 51.0]],
        _ => {
            return Err(AnalysisError::lookup(
                "microcircuit subcategories",
                subcategory_id,
            ))
        }
    };
    let row = select(&rows, technology, "microcircuit technologies")?;
    let index = nearest_index(breaks, f64::from(n_elements));
    row.get(index)
        .copied()
        .ok_or_else(|| AnalysisError::index("microcircuit die complexity", index as i64 + 1))
}

/// Package failure rate C2
pub fn calculate_package_factor(package_id: i64, n_active_pins: u32) -> f64 {
    let (f0, f1) = match package_id {
        1..=3 => (2.8e-4, 1.08),
        4 => (9.0e-5, 1.51),
        5 => (3.0e-5, 1.82),
        6 => (3.0e-5, 2.01),
        _ => (3.6e-4, 1.08),
    };
    f0 * f64::from(n_active_pins).powf(f1)
}

/// Learning factor πL
pub fn calculate_learning_factor(years_in_production: f64) -> f64 {
    0.01 * (5.35 - 0.35 * years_in_production).exp()
}

/// EEPROM write-cycle factors `(A1, A2, B1, B2)`
pub fn calculate_lambda_cyclic_factors(
    n_cycles: u32,
    construction_id: i64,
    n_elements: u32,
    temperature_junction: f64,
) -> (f64, f64, f64, f64) {
    let cycles = f64::from(n_cycles);
    let elements = f64::from(n_elements);
    let inv_t = 1.0 / (temperature_junction + 273.0);
    let a_1 = 6.817e-6 * cycles;
    match construction_id {
        // Flotox
        1 => {
            let b_1 = (elements / 16000.0).sqrt()
                * ((-0.15 / 8.63e-5) * (inv_t - 1.0 / 333.0)).exp();
            (a_1, 0.0, b_1, 0.0)
        }
        // Textured poly
        2 => {
            let a_2 = if n_cycles > 300_000 && n_cycles <= 400_000 {
                1.1
            } else {
                2.3
            };
            let scale = (elements / 64000.0).powf(0.25);
            let b_1 = scale * ((0.1 / 8.63e-5) * (inv_t - 1.0 / 303.0)).exp();
            let b_2 = scale * ((-0.12 / 8.63e-5) * (inv_t - 1.0 / 303.0)).exp();
            (a_1, a_2, b_1, b_2)
        }
        _ => (a_1, 0.0, 0.0, 0.0),
    }
}

pub fn get_error_correction_factor(type_id: i64) -> Result<f64> {
    match type_id {
        1 => Ok(1.0),
        2 => Ok(0.72),
        3 => Ok(0.68),
        _ => Err(AnalysisError::lookup("error correction types", type_id)),
    }
}

pub fn get_application_factor(type_id: i64, application_id: i64) -> Result<f64> {
    match type_id {
        1 => select(&[1.0, 3.0, 3.0], application_id, "GaAs applications"),
        2 => select(&[1.0], application_id, "GaAs applications"),
        _ => Err(AnalysisError::lookup("GaAs types", type_id)),
    }
}

pub fn calculate_die_complexity_correction(area: f64, feature_size: f64) -> Result<f64> {
    if feature_size <= 0.0 {
        return Err(AnalysisError::range("feature_size", feature_size, "> 0"));
    }
    Ok((area / 0.21) * (2.0 / feature_size).powi(2) * 0.64 + 0.36)
}

pub fn calculate_eos_hazard_rate(voltage_esd: f64) -> f64 {
    -(1.0 - 0.00057 * (-0.0002 * voltage_esd).exp()).ln() / 0.00876
}

pub fn calculate_package_base_hazard_rate(n_active_pins: u32) -> f64 {
    0.0022 + 1.72e-5 * f64::from(n_active_pins)
}

pub fn get_package_type_correction_factor(package_id: i64) -> Result<f64> {
    match package_id {
        1 => Ok(1.0),
        2 => Ok(2.2),
        3 => Ok(4.7),
        7 => Ok(1.3),
        8 => Ok(2.9),
        9 => Ok(6.1),
        _ => Err(AnalysisError::lookup("VHSIC package types", package_id)),
    }
}

pub fn calculate_part_stress(inputs: &IntegratedCircuitInputs) -> Result<Prediction> {
    let sub = inputs.subcategory_id;
    let temperature_junction = calculate_junction_temperature(
        inputs.temperature_case,
        inputs.power_operating,
        inputs.theta_jc,
    );
    let pi_t = calculate_temperature_factor(
        sub,
        inputs.family_id,
        inputs.type_id,
        temperature_junction,
    )?;
    let pi_q = select(&PI_Q, inputs.quality_id, "microcircuit quality factors")?;
    let pi_e = select(&PI_E, inputs.environment_active_id, "microcircuit environment factors")?;
    let pi_l = calculate_learning_factor(inputs.years_in_production);

    let mut prediction = Prediction::default();
    prediction.derive("temperature_junction", temperature_junction);
    prediction.pi("piT", pi_t);
    prediction.pi("piQ", pi_q);
    prediction.pi("piE", pi_e);
    prediction.pi("piL", pi_l);

    if sub == 10 {
        let lambda_bd = if inputs.type_id == 1 { 0.16 } else { 0.24 };
        let lambda_bp = calculate_package_base_hazard_rate(inputs.n_active_pins);
        let lambda_eos = calculate_eos_hazard_rate(inputs.voltage_esd);
        let pi_cd = prediction.pi(
            "piCD",
            calculate_die_complexity_correction(inputs.area, inputs.feature_size)?,
        );
        let pi_mfg = prediction.pi(
            "piMFG",
            if inputs.manufacturing_id == 1 { 0.55 } else { 2.0 },
        );
        let pi_pt = prediction.pi(
            "piPT",
            get_package_type_correction_factor(inputs.package_id)?,
        );
        prediction.lambda_b = lambda_bd;
        prediction.derive("lambdaBD", lambda_bd);
        prediction.derive("lambdaBP", lambda_bp);
        prediction.derive("lambdaEOS", lambda_eos);
        prediction.hazard_rate_active = lambda_bd * pi_mfg * pi_t * pi_cd
            + lambda_bp * pi_e * pi_q * pi_pt
            + lambda_eos;
        return Ok(prediction);
    }

    let c1 = get_die_complexity_factor(
        sub,
        inputs.technology_id,
        inputs.application_id,
        inputs.n_elements,
    )?;
    let c2 = calculate_package_factor(inputs.package_id, inputs.n_active_pins);
    prediction.lambda_b = c1;
    prediction.derive("C1", c1);
    prediction.derive("C2", c2);

    prediction.hazard_rate_active = match sub {
        1..=4 => (c1 * pi_t + c2 * pi_e) * pi_q * pi_l,
        5..=8 => {
            let lambda_cyc = if sub == 6 {
                let pi_ecc = prediction.pi("piECC", get_error_correction_factor(inputs.type_id)?);
                let (a_1, a_2, b_1, b_2) = calculate_lambda_cyclic_factors(
                    inputs.n_cycles,
                    inputs.construction_id,
                    inputs.n_elements,
                    temperature_junction,
                );
                (a_1 * b_1 + a_2 * b_2 / pi_q) * pi_ecc
            } else {
                0.0
            };
            prediction.derive("lambda_cyc", lambda_cyc);
            (c1 * pi_t + c2 * pi_e + lambda_cyc) * pi_q * pi_l
        }
        _ => {
            let pi_a = prediction.pi(
                "piA",
                get_application_factor(inputs.type_id, inputs.application_id)?,
            );
            (c1 * pi_t * pi_a + c2 * pi_e) * pi_q * pi_l
        }
    };
    Ok(prediction)
}
