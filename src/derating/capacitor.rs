//! Capacitor derating

use super::DeratingResult;
use crate::error::{AnalysisError, Result};
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CapacitorStress {
    pub subcategory_id: i64,
    #[serde(default)]
    pub temperature_active: f64,
    #[serde(default)]
    pub temperature_rated_max: f64,
    #[serde(default)]
    pub voltage_ratio: f64,
    /// Reverse voltage as a fraction of rated voltage (polarized parts)
    #[serde(default)]
    pub reverse_voltage_ratio: f64,
}

/// Stress-limit key for a MIL-HDBK-217F capacitor subcategory
pub fn style_key(subcategory_id: i64) -> Result<&'static str> {
    Ok(match subcategory_id {
        1 | 2 => "paper",
        3 | 5 => "plastic",
        4 | 6 => "metallized",
        7 => "mica",
        8 => "mica_button",
        9 => "glass",
        10 => "ceramic_fixed",
        11 => "temp_comp_ceramic",
        12 => "ceramic_chip",
        13 => "tantalum_chip",
        14 => "tantalum_solid",
        15 => "tantalum_wet",
        16 => "aluminum",
        17 => "aluminum_dry",
        18 => "ceramic_variable",
        19 => "piston",
        20 => "trimmer",
        21 => "vacuum",
        _ => return Err(AnalysisError::lookup("capacitor subcategories", subcategory_id)),
    })
}

pub fn do_derating_analysis(
    environment_id: i64,
    input: &CapacitorStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    let path = ["capacitor", style_key(input.subcategory_id)?];
    let mut result = DeratingResult::default();

    if let Some(margin) = limits.limit(&path, "temperature", environment_id)? {
        result.check_temperature(
            "Operating",
            input.temperature_active,
            input.temperature_rated_max - margin,
        );
    }
    result.check_ratio(
        "Voltage",
        input.voltage_ratio,
        limits.limit(&path, "voltage", environment_id)?,
    );
    result.check_ratio(
        "Reverse voltage",
        input.reverse_voltage_ratio,
        limits.limit(&path, "reverse_voltage", environment_id)?,
    );
    Ok(result)
}
