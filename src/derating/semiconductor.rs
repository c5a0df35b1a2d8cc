//! Discrete semiconductor derating

use super::DeratingResult;
use crate::error::{AnalysisError, Result};
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SemiconductorStress {
    pub subcategory_id: i64,
    #[serde(default = "default_type")]
    pub type_id: i64,
    /// 1 = JANTXV, 2 = JANTX, 3 = JAN, 4 = lower, 5 = plastic
    pub quality_id: i64,
    #[serde(default)]
    pub power_ratio: f64,
    #[serde(default)]
    pub temperature_junction: f64,
    #[serde(default)]
    pub voltage_ratio: f64,
    #[serde(default)]
    pub current_ratio: f64,
    #[serde(default)]
    pub surge_current_ratio: f64,
}

fn default_type() -> i64 {
    1
}

fn quality_key(quality_id: i64) -> Result<&'static str> {
    Ok(match quality_id {
        1 | 2 => "jantx",
        3 => "military",
        4 | 5 => "commercial",
        _ => return Err(AnalysisError::lookup("semiconductor qualities", quality_id)),
    })
}

fn diode_key(type_id: i64) -> Result<&'static str> {
    Ok(match type_id {
        1 | 2 => "general_purpose",
        3 | 5 => "power_rectifier",
        4 => "schottky",
        6 => "suppressor",
        7 | 8 => "regulator",
        _ => return Err(AnalysisError::lookup("diode types", type_id)),
    })
}

/// Stress-limit path (without quality) for a subcategory/type pair
pub fn style_path(subcategory_id: i64, type_id: i64) -> Result<Vec<&'static str>> {
    Ok(match subcategory_id {
        1 => vec!["semiconductor", "diode", diode_key(type_id)?],
        2 => vec!["semiconductor", "diode", "general_purpose"],
        3 | 5 | 6 | 7 => vec!["semiconductor", "transistor", "bjt"],
        4 | 8 | 9 => vec!["semiconductor", "transistor", "fet"],
        10 => vec!["semiconductor", "thyristor"],
        _ => {
            return Err(AnalysisError::lookup(
                "semiconductor subcategories",
                subcategory_id,
            ))
        }
    })
}

pub fn do_derating_analysis(
    environment_id: i64,
    input: &SemiconductorStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    let mut path = style_path(input.subcategory_id, input.type_id)?;
    path.push(quality_key(input.quality_id)?);
    let mut result = DeratingResult::default();

    result.check_ratio(
        "Power",
        input.power_ratio,
        limits.limit(&path, "power", environment_id)?,
    );
    if let Some(limit) = limits.limit(&path, "temperature", environment_id)? {
        result.check_temperature("Junction", input.temperature_junction, limit);
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
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_military_bjt() {
        let limits = StressLimits::builtin().unwrap();
        let input = SemiconductorStress {
            subcategory_id: 3,
            type_id: 1,
            quality_id: 3,
            power_ratio: 0.85,
            temperature_junction: 90.0,
            voltage_ratio: 0.5,
            current_ratio: 0.5,
            surge_current_ratio: 0.0,
        };
        let result = do_derating_analysis(2, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Power ratio of 0.85 exceeds the allowable limit of 0.8.\n\
             Junction temperature of 90C exceeds the derated maximum temperature of 85C.\n"
        );
    }

    #[test]
    fn test_schottky_has_power_limit() {
        let limits = StressLimits::builtin().unwrap();
        let input = SemiconductorStress {
            subcategory_id: 1,
            type_id: 4,
            quality_id: 1,
            power_ratio: 0.95,
            temperature_junction: 100.0,
            voltage_ratio: 0.5,
            current_ratio: 5.0,
            surge_current_ratio: 5.0,
        };
        let result = do_derating_analysis(3, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Power ratio of 0.95 exceeds the allowable limit of 0.9.\n"
        );
    }

    #[test]
    fn test_optoelectronics_have_no_limits() {
        let limits = StressLimits::builtin().unwrap();
        let input = SemiconductorStress {
            subcategory_id: 11,
            type_id: 1,
            quality_id: 1,
            ..Default::default()
        };
        assert!(matches!(
            do_derating_analysis(1, &input, &limits),
            Err(AnalysisError::Lookup { .. })
        ));
    }
}
