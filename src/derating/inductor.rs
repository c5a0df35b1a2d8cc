//! Inductive device derating

use super::DeratingResult;
use crate::error::{AnalysisError, Result};
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Operating frequency at or below which low-frequency limits apply (Hz)
pub const LOW_FREQUENCY_LIMIT: f64 = 400.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InductorStress {
    /// 1 = transformer, 2 = coil
    pub subcategory_id: i64,
    #[serde(default)]
    pub frequency_operating: f64,
    #[serde(default)]
    pub temperature_hot_spot: f64,
    #[serde(default)]
    pub temperature_rated_max: f64,
    #[serde(default)]
    pub voltage_ratio: f64,
    #[serde(default)]
    pub current_ratio: f64,
    #[serde(default)]
    pub surge_current_ratio: f64,
    #[serde(default)]
    pub surge_voltage_ratio: f64,
}

pub fn do_derating_analysis(
    environment_id: i64,
    input: &InductorStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    if !matches!(input.subcategory_id, 1 | 2) {
        return Err(AnalysisError::lookup(
            "inductor subcategories",
            input.subcategory_id,
        ));
    }
    let style = if input.frequency_operating <= LOW_FREQUENCY_LIMIT {
        "low_frequency"
    } else {
        "high_frequency"
    };
    let path = ["inductor", style];
    let mut result = DeratingResult::default();

    if let Some(margin) = limits.limit(&path, "temperature", environment_id)? {
        result.check_temperature(
            "Hot spot",
            input.temperature_hot_spot,
            input.temperature_rated_max - margin,
        );
    }
    result.check_ratio(
        "Voltage",
        input.voltage_ratio,
        limits.limit(&path, "voltage", environment_id)?,
    );
    result.check_ratio(
        "Current",
        input.current_ratio,
        limits.limit(&path, "current", environment_id)?,
    );
    result.check_ratio(
        "Surge current",
        input.surge_current_ratio,
        limits.limit(&path, "surge_current", environment_id)?,
    );
    result.check_ratio(
        "Surge voltage",
        input.surge_voltage_ratio,
        limits.limit(&path, "surge_voltage", environment_id)?,
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InductorStress {
        InductorStress {
            subcategory_id: 1,
            frequency_operating: 60.0,
            temperature_hot_spot: 95.0,
            temperature_rated_max: 130.0,
            voltage_ratio: 0.5,
            current_ratio: 0.5,
            surge_current_ratio: 0.0,
            surge_voltage_ratio: 0.0,
        }
    }

    #[test]
    fn test_low_frequency_ok() {
        let limits = StressLimits::builtin().unwrap();
        let result = do_derating_analysis(1, &sample(), &limits).unwrap();
        assert!(!result.overstress);
    }

    #[test]
    fn test_high_frequency_current() {
        let limits = StressLimits::builtin().unwrap();
        let mut input = sample();
        input.frequency_operating = 1.0e6;
        input.current_ratio = 0.85;
        input.voltage_ratio = 0.99;
        // High-frequency parts carry no voltage limit.
        let result = do_derating_analysis(3, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Current ratio of 0.85 exceeds the allowable limit of 0.8.\n"
        );
    }

    #[test]
    fn test_hot_spot() {
        let limits = StressLimits::builtin().unwrap();
        let mut input = sample();
        input.temperature_hot_spot = 105.0;
        let result = do_derating_analysis(1, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Hot spot temperature of 105C exceeds the derated maximum temperature of 100C.\n"
        );
    }
}
