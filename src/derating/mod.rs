//! Stress/derating checks
//!
//! Each component family compares its operating stresses against the limits
//! in a [`StressLimits`] table for one derating environment and reports
//! whether any limit is exceeded, with a diagnostic line per violation.
//!
//! | Family | Stresses checked (in order) | Temperature limit |
//! |--------|-----------------------------|-------------------|
//! | capacitor | temperature, voltage, reverse voltage | rated max − margin |
//! | connection | current | – |
//! | inductor | temperature, voltage, current, surge | rated max − margin |
//! | integrated circuit | temperature, voltage, current, fanout, frequency | absolute junction |
//! | lamp | current | – |
//! | relay | temperature, current | rated max − margin |
//! | resistor | power, temperature, voltage | knee-derated |
//! | semiconductor | power, temperature, voltage, current, surge | absolute junction |
//! | switch | power, current, surge | – |
//!
//! A stress exactly equal to its limit is not an overstress.

pub mod capacitor;
pub mod inductor;
pub mod integrated_circuit;
pub mod misc;
pub mod relay;
pub mod resistor;
pub mod semiconductor;
pub mod switch;

use crate::error::Result;
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use capacitor::CapacitorStress;
pub use inductor::InductorStress;
pub use integrated_circuit::IntegratedCircuitStress;
pub use misc::{ConnectionStress, LampStress};
pub use relay::RelayStress;
pub use resistor::ResistorStress;
pub use semiconductor::SemiconductorStress;
pub use switch::SwitchStress;

/// Outcome of one derating analysis.
///
/// `reason` is empty exactly when `overstress` is false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeratingResult {
    pub overstress: bool,
    pub reason: String,
}

impl DeratingResult {
    /// Overstress as the 0|1 flag stored on hardware records
    pub fn flag(&self) -> u8 {
        u8::from(self.overstress)
    }

    pub(crate) fn check_ratio(&mut self, label: &str, actual: f64, limit: Option<f64>) {
        if let Some(limit) = limit {
            if actual > limit {
                self.flag_with(format!(
                    "{} ratio of {} exceeds the allowable limit of {}.\n",
                    label, actual, limit
                ));
            }
        }
    }

    pub(crate) fn check_temperature(&mut self, label: &str, actual: f64, max_allowed: f64) {
        if actual > max_allowed {
            self.flag_with(format!(
                "{} temperature of {}C exceeds the derated maximum temperature of {}C.\n",
                label, actual, max_allowed
            ));
        }
    }

    fn flag_with(&mut self, reason: String) {
        self.overstress = true;
        self.reason.push_str(&reason);
    }
}

/// Operating-to-rated stress ratio; zero when the rating is unknown.
pub fn stress_ratio(operating: f64, rated: f64) -> f64 {
    if rated > 0.0 {
        operating / rated
    } else {
        0.0
    }
}

/// Voltage stress ratio from the AC and DC operating components
pub fn voltage_ratio(voltage_ac_operating: f64, voltage_dc_operating: f64, voltage_rated: f64) -> f64 {
    stress_ratio(voltage_ac_operating + voltage_dc_operating, voltage_rated)
}

/// Derating input for any supported family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum DeratingInput {
    Capacitor(CapacitorStress),
    Connection(ConnectionStress),
    Inductor(InductorStress),
    IntegratedCircuit(IntegratedCircuitStress),
    Lamp(LampStress),
    Relay(RelayStress),
    Resistor(ResistorStress),
    Semiconductor(SemiconductorStress),
    Switch(SwitchStress),
}

/// Run the derating analysis for one component in one environment.
///
/// `environment_id` is 1-based into the derating environments
/// (protected, normal, severe).
pub fn do_derating_analysis(
    environment_id: i64,
    input: &DeratingInput,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    match input {
        DeratingInput::Capacitor(i) => capacitor::do_derating_analysis(environment_id, i, limits),
        DeratingInput::Connection(i) => misc::do_connection_analysis(environment_id, i, limits),
        DeratingInput::Inductor(i) => inductor::do_derating_analysis(environment_id, i, limits),
        DeratingInput::IntegratedCircuit(i) => {
            integrated_circuit::do_derating_analysis(environment_id, i, limits)
        }
        DeratingInput::Lamp(i) => misc::do_lamp_analysis(environment_id, i, limits),
        DeratingInput::Relay(i) => relay::do_derating_analysis(environment_id, i, limits),
        DeratingInput::Resistor(i) => resistor::do_derating_analysis(environment_id, i, limits),
        DeratingInput::Semiconductor(i) => {
            semiconductor::do_derating_analysis(environment_id, i, limits)
        }
        DeratingInput::Switch(i) => switch::do_derating_analysis(environment_id, i, limits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_equal_to_limit_is_ok() {
        let mut result = DeratingResult::default();
        result.check_ratio("Power", 0.85, Some(0.85));
        assert!(!result.overstress);
        assert!(result.reason.is_empty());
    }

    #[test]
    fn test_ratio_reasons_concatenate() {
        let mut result = DeratingResult::default();
        result.check_ratio("Power", 0.9, Some(0.85));
        result.check_ratio("Voltage", 0.8, Some(0.7));
        assert_eq!(result.flag(), 1);
        assert_eq!(
            result.reason,
            "Power ratio of 0.9 exceeds the allowable limit of 0.85.\n\
             Voltage ratio of 0.8 exceeds the allowable limit of 0.7.\n"
        );
    }

    #[test]
    fn test_stress_ratio_unknown_rating() {
        assert_eq!(stress_ratio(1.0, 0.0), 0.0);
        assert_eq!(stress_ratio(1.0, 4.0), 0.25);
        assert_eq!(voltage_ratio(0.04, 3.3, 12.0), (0.04 + 3.3) / 12.0);
    }

    #[test]
    fn test_tagged_input_from_yaml() {
        let input: DeratingInput = serde_norway::from_str(
            "family: connection\ncurrent_ratio: 0.5\n",
        )
        .unwrap();
        let limits = StressLimits::builtin().unwrap();
        let result = do_derating_analysis(1, &input, &limits).unwrap();
        assert_eq!(result, DeratingResult::default());
    }
}
