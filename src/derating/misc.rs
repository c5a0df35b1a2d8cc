//! Connection and lamp derating

use super::DeratingResult;
use crate::error::Result;
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionStress {
    #[serde(default)]
    pub current_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LampStress {
    #[serde(default)]
    pub current_ratio: f64,
}

pub fn do_connection_analysis(
    environment_id: i64,
    input: &ConnectionStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    let mut result = DeratingResult::default();
    let limit = limits.require(&["connection"], "current", environment_id)?;
    result.check_ratio("Current", input.current_ratio, Some(limit));
    Ok(result)
}

pub fn do_lamp_analysis(
    environment_id: i64,
    input: &LampStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    let mut result = DeratingResult::default();
    let limit = limits.require(&["miscellaneous", "lamp"], "current", environment_id)?;
    result.check_ratio("Current", input.current_ratio, Some(limit));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lamp_current() {
        let limits = StressLimits::builtin().unwrap();
        let input = LampStress { current_ratio: 0.15 };
        assert!(!do_lamp_analysis(1, &input, &limits).unwrap().overstress);
        let result = do_lamp_analysis(2, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Current ratio of 0.15 exceeds the allowable limit of 0.1.\n"
        );
    }

    #[test]
    fn test_connection_at_limit() {
        let limits = StressLimits::builtin().unwrap();
        let input = ConnectionStress { current_ratio: 1.0 };
        assert!(!do_connection_analysis(3, &input, &limits).unwrap().overstress);
    }
}
