//! Relay derating

use super::DeratingResult;
use crate::error::{AnalysisError, Result};
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RelayStress {
    /// 1 = resistive, 2 = inductive, 3 = capacitive
    pub load_type_id: i64,
    #[serde(default)]
    pub temperature_active: f64,
    #[serde(default)]
    pub temperature_rated_max: f64,
    #[serde(default)]
    pub current_ratio: f64,
}

/// Stress-limit key for a contact load type (shared with switches)
pub fn load_key(load_type_id: i64) -> Result<&'static str> {
    Ok(match load_type_id {
        1 => "resistive_load",
        2 => "inductive_load",
        3 => "capacitive_load",
        _ => return Err(AnalysisError::lookup("contact load types", load_type_id)),
    })
}

pub fn do_derating_analysis(
    environment_id: i64,
    input: &RelayStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    let path = ["relay", load_key(input.load_type_id)?];
    let mut result = DeratingResult::default();

    if let Some(margin) = limits.limit(&path, "temperature", environment_id)? {
        result.check_temperature(
            "Operating",
            input.temperature_active,
            input.temperature_rated_max - margin,
        );
    }
    result.check_ratio(
        "Current",
        input.current_ratio,
        limits.limit(&path, "current", environment_id)?,
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inductive_load_current() {
        let limits = StressLimits::builtin().unwrap();
        let input = RelayStress {
            load_type_id: 2,
            temperature_active: 40.0,
            temperature_rated_max: 125.0,
            current_ratio: 0.45,
        };
        let result = do_derating_analysis(2, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Current ratio of 0.45 exceeds the allowable limit of 0.4.\n"
        );
        assert!(do_derating_analysis(1, &input, &limits).unwrap().reason.is_empty());
    }

    #[test]
    fn test_severe_temperature_margin() {
        let limits = StressLimits::builtin().unwrap();
        let input = RelayStress {
            load_type_id: 1,
            temperature_active: 100.0,
            temperature_rated_max: 125.0,
            current_ratio: 0.1,
        };
        let result = do_derating_analysis(3, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Operating temperature of 100C exceeds the derated maximum temperature of 95C.\n"
        );
    }

    #[test]
    fn test_unknown_load() {
        let limits = StressLimits::builtin().unwrap();
        let input = RelayStress {
            load_type_id: 4,
            ..Default::default()
        };
        assert!(matches!(
            do_derating_analysis(1, &input, &limits),
            Err(AnalysisError::Lookup { .. })
        ));
    }
}
