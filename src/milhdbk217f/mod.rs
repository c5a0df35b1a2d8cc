//! MIL-HDBK-217F hazard rate prediction
//!
//! Two interchangeable methods per component family:
//!
//! - **Part count**: `λ = λg × πQ`, a table lookup keyed by subcategory,
//!   type/specification and active environment.
//! - **Part stress**: a base rate λb multiplied by a chain of π-factors
//!   computed from the part's operating stresses.
//!
//! Every function here is pure: identical inputs give bit-identical results.
//! Handbook constants are compile-time tables in each family module.
//!
//! Hazard rates are failures per 10⁶ hours.

pub mod inductor;
pub mod integrated_circuit;
pub mod meter;
pub mod resistor;
pub mod semiconductor;

use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use inductor::InductorInputs;
pub use integrated_circuit::IntegratedCircuitInputs;
pub use meter::MeterInputs;
pub use resistor::ResistorInputs;
pub use semiconductor::SemiconductorInputs;

/// Hardware category ids as stored on hardware records
pub const CATEGORY_INTEGRATED_CIRCUIT: i64 = 1;
pub const CATEGORY_SEMICONDUCTOR: i64 = 2;
pub const CATEGORY_RESISTOR: i64 = 3;
pub const CATEGORY_CAPACITOR: i64 = 4;
pub const CATEGORY_INDUCTOR: i64 = 5;
pub const CATEGORY_RELAY: i64 = 6;
pub const CATEGORY_SWITCH: i64 = 7;
pub const CATEGORY_CONNECTION: i64 = 8;
pub const CATEGORY_METER: i64 = 9;
pub const CATEGORY_MISCELLANEOUS: i64 = 10;

/// Hazard rate method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    PartCount,
    PartStress,
}

impl Method {
    /// From a `hazard_rate_method_id` (1 = part count, 2 = part stress)
    pub fn from_id(hazard_rate_method_id: i64) -> Result<Self> {
        match hazard_rate_method_id {
            1 => Ok(Method::PartCount),
            2 => Ok(Method::PartStress),
            _ => Err(AnalysisError::lookup(
                "hazard rate methods",
                hazard_rate_method_id,
            )),
        }
    }
}

/// Result of one prediction: the base rate, every π-factor used, derived
/// operating values (temperatures, defaulted inputs) and the active rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Prediction {
    pub lambda_b: f64,
    pub pi_factors: BTreeMap<String, f64>,
    pub derived: BTreeMap<String, f64>,
    pub hazard_rate_active: f64,
}

impl Prediction {
    pub(crate) fn new(lambda_b: f64) -> Self {
        Prediction {
            lambda_b,
            ..Default::default()
        }
    }

    /// Record a π-factor, returning its value for chaining
    pub(crate) fn pi(&mut self, name: &str, value: f64) -> f64 {
        self.pi_factors.insert(name.to_string(), value);
        value
    }

    pub(crate) fn derive(&mut self, name: &str, value: f64) {
        self.derived.insert(name.to_string(), value);
    }

    pub fn pi_factor(&self, name: &str) -> Option<f64> {
        self.pi_factors.get(name).copied()
    }
}

/// Component inputs for any supported category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum PredictionInput {
    IntegratedCircuit(IntegratedCircuitInputs),
    Semiconductor(SemiconductorInputs),
    Resistor(ResistorInputs),
    Inductor(InductorInputs),
    Meter(MeterInputs),
}

impl PredictionInput {
    pub fn category_id(&self) -> i64 {
        match self {
            PredictionInput::IntegratedCircuit(_) => CATEGORY_INTEGRATED_CIRCUIT,
            PredictionInput::Semiconductor(_) => CATEGORY_SEMICONDUCTOR,
            PredictionInput::Resistor(_) => CATEGORY_RESISTOR,
            PredictionInput::Inductor(_) => CATEGORY_INDUCTOR,
            PredictionInput::Meter(_) => CATEGORY_METER,
        }
    }

    pub fn subcategory_id(&self) -> i64 {
        match self {
            PredictionInput::IntegratedCircuit(i) => i.subcategory_id,
            PredictionInput::Semiconductor(i) => i.subcategory_id,
            PredictionInput::Resistor(i) => i.subcategory_id,
            PredictionInput::Inductor(i) => i.subcategory_id,
            PredictionInput::Meter(i) => i.subcategory_id,
        }
    }
}

/// Predict the active hazard rate of one component
pub fn calculate(input: &PredictionInput, method: Method) -> Result<Prediction> {
    match (input, method) {
        (PredictionInput::IntegratedCircuit(i), Method::PartCount) => {
            integrated_circuit::calculate_part_count(i)
        }
        (PredictionInput::IntegratedCircuit(i), Method::PartStress) => {
            integrated_circuit::calculate_part_stress(i)
        }
        (PredictionInput::Semiconductor(i), Method::PartCount) => {
            semiconductor::calculate_part_count(i)
        }
        (PredictionInput::Semiconductor(i), Method::PartStress) => {
            semiconductor::calculate_part_stress(i)
        }
        (PredictionInput::Resistor(i), Method::PartCount) => resistor::calculate_part_count(i),
        (PredictionInput::Resistor(i), Method::PartStress) => resistor::calculate_part_stress(i),
        (PredictionInput::Inductor(i), Method::PartCount) => inductor::calculate_part_count(i),
        (PredictionInput::Inductor(i), Method::PartStress) => inductor::calculate_part_stress(i),
        (PredictionInput::Meter(i), Method::PartCount) => meter::calculate_part_count(i),
        (PredictionInput::Meter(i), Method::PartStress) => meter::calculate_part_stress(i),
    }
}

/// Record-level adjustments applied on top of the model hazard rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Adjustments {
    #[serde(default)]
    pub add_adj_factor: f64,
    #[serde(default = "default_one")]
    pub mult_adj_factor: f64,
    /// Percent of mission time the part operates
    #[serde(default = "default_duty_cycle")]
    pub duty_cycle: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_one() -> f64 {
    1.0
}

fn default_duty_cycle() -> f64 {
    100.0
}

fn default_quantity() -> u32 {
    1
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            add_adj_factor: 0.0,
            mult_adj_factor: 1.0,
            duty_cycle: 100.0,
            quantity: 1,
        }
    }
}

/// `(λ + add) × duty/100 × mult × quantity`
pub fn apply_adjustments(hazard_rate: f64, adjustments: &Adjustments) -> f64 {
    (hazard_rate + adjustments.add_adj_factor)
        * (adjustments.duty_cycle / 100.0)
        * adjustments.mult_adj_factor
        * f64::from(adjustments.quantity)
}

/// Logistics hazard rate: active + dormant + software
pub fn hazard_rate_logistics(active: f64, dormant: f64, software: f64) -> f64 {
    active + dormant + software
}

/// Mission hazard rate weighted by the operating fraction `duty_cycle` ∈ [0, 1]
pub fn hazard_rate_mission(active: f64, dormant: f64, software: f64, duty_cycle: f64) -> f64 {
    active * duty_cycle + dormant * (1.0 - duty_cycle) + software
}

/// MTBF from a hazard rate; infinite for a zero rate
pub fn mtbf(hazard_rate: f64) -> f64 {
    if hazard_rate > 0.0 {
        1.0 / hazard_rate
    } else {
        f64::INFINITY
    }
}

/// Index of the first breakpoint at or above `value`, or the last index.
pub(crate) fn band_index(breaks: &[f64], value: f64) -> usize {
    breaks
        .iter()
        .position(|b| b - value >= 0.0)
        .unwrap_or_else(|| breaks.len().saturating_sub(1))
}

/// Index of the breakpoint closest to `value`.
pub(crate) fn nearest_index(breaks: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_diff = f64::INFINITY;
    for (i, b) in breaks.iter().enumerate() {
        let diff = (b - value).abs();
        if diff < best_diff {
            best = i;
            best_diff = diff;
        }
    }
    best
}
