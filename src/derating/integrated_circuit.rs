//! Integrated circuit derating

use super::DeratingResult;
use crate::error::{AnalysisError, Result};
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IntegratedCircuitStress {
    pub subcategory_id: i64,
    /// 1 = bipolar, 2 = MOS
    pub technology_id: i64,
    /// 1 = hermetic, 2 = plastic class 1, 3 = plastic class 2
    pub package_id: i64,
    #[serde(default)]
    pub temperature_junction: f64,
    #[serde(default)]
    pub voltage_ratio: f64,
    #[serde(default)]
    pub current_ratio: f64,
    #[serde(default)]
    pub fanout_ratio: f64,
    #[serde(default)]
    pub frequency_ratio: f64,
}

/// Stress-limit key for a MIL-HDBK-217F microcircuit subcategory
pub fn type_key(subcategory_id: i64) -> Result<&'static str> {
    Ok(match subcategory_id {
        1 => "linear",
        2 | 3 | 9 | 10 => "digital",
        4 => "microprocessor",
        5..=8 => "memory",
        _ => {
            return Err(AnalysisError::lookup(
                "integrated circuit subcategories",
                subcategory_id,
            ))
        }
    })
}

fn technology_key(technology_id: i64) -> Result<&'static str> {
    Ok(match technology_id {
        1 => "bipolar",
        2 => "mos",
        _ => return Err(AnalysisError::lookup("integrated circuit technologies", technology_id)),
    })
}

fn package_key(package_id: i64) -> Result<&'static str> {
    Ok(match package_id {
        1 => "hermetic",
        2 => "plastic1",
        3 => "plastic2",
        _ => return Err(AnalysisError::lookup("integrated circuit packages", package_id)),
    })
}

pub fn do_derating_analysis(
    environment_id: i64,
    input: &IntegratedCircuitStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    let path = [
        "integrated_circuit",
        type_key(input.subcategory_id)?,
        technology_key(input.technology_id)?,
        package_key(input.package_id)?,
    ];
    let mut result = DeratingResult::default();

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
        "Fanout",
        input.fanout_ratio,
        limits.limit(&path, "fanout", environment_id)?,
    );
    result.check_ratio(
        "Frequency",
        input.frequency_ratio,
        limits.limit(&path, "frequency", environment_id)?,
    );
    Ok(result)
}
