//! Switch derating

use super::relay::load_key;
use super::DeratingResult;
use crate::error::Result;
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwitchStress {
    /// 1 = resistive, 2 = inductive, 3 = capacitive
    pub load_type_id: i64,
    #[serde(default)]
    pub power_ratio: f64,
    #[serde(default)]
    pub current_ratio: f64,
    #[serde(default)]
    pub surge_current_ratio: f64,
}

pub fn do_derating_analysis(
    environment_id: i64,
    input: &SwitchStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    let path = ["switch", load_key(input.load_type_id)?];
    let mut result = DeratingResult::default();
    result.check_ratio(
        "Power",
        input.power_ratio,
        limits.limit(&path, "power", environment_id)?,
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
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_and_surge() {
        let limits = StressLimits::builtin().unwrap();
        let input = SwitchStress {
            load_type_id: 3,
            power_ratio: 0.65,
            current_ratio: 0.3,
            surge_current_ratio: 0.9,
        };
        let result = do_derating_analysis(2, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Power ratio of 0.65 exceeds the allowable limit of 0.6.\n\
             Surge current ratio of 0.9 exceeds the allowable limit of 0.8.\n"
        );
    }

    #[test]
    fn test_idempotent() {
        let limits = StressLimits::builtin().unwrap();
        let input = SwitchStress {
            load_type_id: 1,
            power_ratio: 0.8,
            current_ratio: 0.8,
            surge_current_ratio: 0.0,
        };
        let a = do_derating_analysis(1, &input, &limits).unwrap();
        let b = do_derating_analysis(1, &input, &limits).unwrap();
        assert_eq!(a, b);
        assert!(a.overstress);
    }
}
