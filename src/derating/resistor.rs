//! Resistor derating

use super::DeratingResult;
use crate::error::{AnalysisError, Result};
use crate::tables::StressLimits;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rated power above which the high-power limits apply (W)
pub const HIGH_POWER_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResistorStress {
    pub subcategory_id: i64,
    #[serde(default)]
    pub power_rated: f64,
    #[serde(default)]
    pub power_ratio: f64,
    #[serde(default)]
    pub temperature_active: f64,
    #[serde(default)]
    pub temperature_knee: f64,
    #[serde(default)]
    pub temperature_rated_max: f64,
    #[serde(default)]
    pub voltage_ratio: f64,
}

/// Stress-limit key for a MIL-HDBK-217F resistor subcategory
pub fn style_key(subcategory_id: i64) -> Result<&'static str> {
    Ok(match subcategory_id {
        1 => "fixed_composition",
        2 => "fixed_film",
        3 => "fixed_film_power",
        4 => "fixed_film_network",
        5 => "fixed_wirewound",
        6 => "fixed_wirewound_power",
        7 => "fixed_wirewound_chassis",
        9 | 11 => "variable_wirewound",
        10 => "variable_wirewound_precision",
        12 => "variable_wirewound_power",
        13 => "variable_non_wirewound",
        14 => "variable_composition",
        15 => "variable_film",
        _ => return Err(AnalysisError::lookup("resistor subcategories", subcategory_id)),
    })
}

/// Derated maximum temperature.
///
/// Limits up to 1.0 are fractions of the span between the knee and the rated
/// maximum; larger limits are absolute temperatures.
pub fn derated_max_temperature(limit: f64, temperature_knee: f64, temperature_rated_max: f64) -> f64 {
    if limit <= 1.0 {
        temperature_knee + limit * (temperature_rated_max - temperature_knee)
    } else {
        limit
    }
}

pub fn do_derating_analysis(
    environment_id: i64,
    input: &ResistorStress,
    limits: &StressLimits,
) -> Result<DeratingResult> {
    let key = style_key(input.subcategory_id)?;
    let group = limits.group(&["resistor", key])?;

    let band = if group.contains_key("low_power") || group.contains_key("high_power") {
        Some(if input.power_rated > HIGH_POWER_THRESHOLD {
            "high_power"
        } else {
            "low_power"
        })
    } else {
        None
    };
    let path: Vec<&str> = match band {
        Some(band) => vec!["resistor", key, band],
        None => vec!["resistor", key],
    };

    let mut result = DeratingResult::default();
    result.check_ratio(
        "Power",
        input.power_ratio,
        limits.limit(&path, "power", environment_id)?,
    );
    if let Some(limit) = limits.limit(&path, "temperature", environment_id)? {
        let max_allowed =
            derated_max_temperature(limit, input.temperature_knee, input.temperature_rated_max);
        result.check_temperature("Operating", input.temperature_active, max_allowed);
    }
    result.check_ratio(
        "Voltage",
        input.voltage_ratio,
        limits.limit(&path, "voltage", environment_id)?,
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits_with_high_power(power: f64) -> StressLimits {
        StressLimits::from_yaml(&format!(
            r#"
resistor:
  fixed_composition:
    low_power:
      power: [0.7, 0.7, 0.7]
      temperature: [0.7, 0.7, 0.7]
    high_power:
      power: [{p}, {p}, {p}]
      temperature: [0.85, 0.85, 0.85]
"#,
            p = power
        ))
        .unwrap()
    }

    fn sample() -> ResistorStress {
        ResistorStress {
            subcategory_id: 1,
            power_rated: 0.6,
            power_ratio: 0.9,
            temperature_active: 30.0,
            temperature_knee: 70.0,
            temperature_rated_max: 150.0,
            voltage_ratio: 0.4,
        }
    }

    #[test]
    fn test_high_power_overstress_reason() {
        let limits = limits_with_high_power(0.85);
        let result = do_derating_analysis(1, &sample(), &limits).unwrap();
        assert_eq!(result.flag(), 1);
        assert_eq!(
            result.reason,
            "Power ratio of 0.9 exceeds the allowable limit of 0.85.\n"
        );
    }

    #[test]
    fn test_low_power_band_selected() {
        let limits = limits_with_high_power(0.85);
        let mut input = sample();
        input.power_rated = 0.25;
        input.power_ratio = 0.7;
        let result = do_derating_analysis(1, &input, &limits).unwrap();
        assert!(!result.overstress);
        assert_eq!(result.reason, "");
    }

    #[test]
    fn test_one_ulp_above_limit_is_overstress() {
        let limits = limits_with_high_power(0.85);
        let mut input = sample();
        input.power_ratio = 0.85;
        assert!(!do_derating_analysis(1, &input, &limits).unwrap().overstress);
        input.power_ratio = f64::from_bits(0.85f64.to_bits() + 1);
        assert!(do_derating_analysis(1, &input, &limits).unwrap().overstress);
    }

    #[test]
    fn test_knee_temperature() {
        assert_eq!(derated_max_temperature(0.5, 70.0, 150.0), 110.0);
        assert_eq!(derated_max_temperature(110.0, 70.0, 150.0), 110.0);

        let limits = limits_with_high_power(0.85);
        let mut input = sample();
        input.power_ratio = 0.5;
        input.temperature_active = 140.0;
        let result = do_derating_analysis(1, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Operating temperature of 140C exceeds the derated maximum temperature of 138C.\n"
        );
    }

    #[test]
    fn test_builtin_film_voltage() {
        let limits = StressLimits::builtin().unwrap();
        let input = ResistorStress {
            subcategory_id: 2,
            power_rated: 0.25,
            power_ratio: 0.3,
            temperature_active: 40.0,
            temperature_knee: 70.0,
            temperature_rated_max: 150.0,
            voltage_ratio: 0.75,
        };
        let result = do_derating_analysis(2, &input, &limits).unwrap();
        assert_eq!(
            result.reason,
            "Voltage ratio of 0.75 exceeds the allowable limit of 0.7.\n"
        );
    }

    #[test]
    fn test_unknown_subcategory() {
        let limits = StressLimits::builtin().unwrap();
        let mut input = sample();
        input.subcategory_id = 8;
        assert!(matches!(
            do_derating_analysis(1, &input, &limits),
            Err(AnalysisError::Lookup { .. })
        ));
    }

    #[test]
    fn test_unknown_environment() {
        let limits = StressLimits::builtin().unwrap();
        assert!(matches!(
            do_derating_analysis(7, &sample(), &limits),
            Err(AnalysisError::Index { .. })
        ));
    }
}
