//! FMEA criticality, risk priority numbers and hazard risk indices
//!
//! Bounds are checked before any arithmetic and reported as range errors
//! naming the offending field. Nothing is clamped.

use crate::equation::{EquationLimits, Evaluator};
use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// MIL-STD-882 probability levels, rank 1 through 5
pub const HRI_PROBABILITY: [&str; 5] = [
    "Level E - Extremely Unlikely",
    "Level D - Remote",
    "Level C - Occasional",
    "Level B - Reasonably Probable",
    "Level A - Frequent",
];

/// Severity levels, rank 1 through 6
pub const HRI_SEVERITY: [&str; 6] = ["Insignificant", "Slight", "Low", "Medium", "High", "Major"];

/// Identifiers a user-defined equation may reference
pub const USER_VARIABLES: [&str; 18] = [
    "hr", "pi1", "pi2", "pi3", "pi4", "pi5", "uf1", "uf2", "uf3", "ui1", "ui2", "ui3", "res1",
    "res2", "res3", "res4", "res5", "0",
];

fn check_rank(field: &str, value: i64) -> Result<u32> {
    if (1..=10).contains(&value) {
        Ok(value as u32)
    } else {
        Err(AnalysisError::range(field, value as f64, "[1, 10]"))
    }
}

fn check_fraction(field: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AnalysisError::range(field, value, "[0, 1]"))
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<f64> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(AnalysisError::range(field, value, ">= 0"))
    }
}

/// Risk priority number `S × O × D`
pub fn calculate_rpn(severity: i64, occurrence: i64, detection: i64) -> Result<u32> {
    let s = check_rank("rpn_severity", severity)?;
    let o = check_rank("rpn_occurrence", occurrence)?;
    let d = check_rank("rpn_detection", detection)?;
    Ok(s * o * d)
}

pub fn calculate_mode_hazard_rate(item_hazard_rate: f64, mode_ratio: f64) -> Result<f64> {
    let item_hazard_rate = check_non_negative("item_hazard_rate", item_hazard_rate)?;
    let mode_ratio = check_fraction("mode_ratio", mode_ratio)?;
    Ok(item_hazard_rate * mode_ratio)
}

/// MIL-STD-1629A mode criticality `λ_mode × t × β`
pub fn calculate_mode_criticality(
    mode_hazard_rate: f64,
    mode_op_time: f64,
    effect_probability: f64,
) -> Result<f64> {
    let mode_op_time = check_non_negative("mode_op_time", mode_op_time)?;
    let effect_probability = check_fraction("effect_probability", effect_probability)?;
    Ok(mode_hazard_rate * mode_op_time * effect_probability)
}

/// Item criticality: the sum of mode criticalities per severity class
pub fn calculate_item_criticality<'a, I>(modes: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut totals = BTreeMap::new();
    for (severity_class, mode_criticality) in modes {
        *totals.entry(severity_class.to_string()).or_insert(0.0) += mode_criticality;
    }
    totals
}

/// Hazard risk index: probability rank × severity rank
pub fn calculate_hri(probability: &str, severity: &str) -> Result<u32> {
    let p = HRI_PROBABILITY
        .iter()
        .position(|level| *level == probability)
        .ok_or_else(|| AnalysisError::lookup("hazard probabilities", probability))?;
    let s = HRI_SEVERITY
        .iter()
        .position(|level| *level == severity)
        .ok_or_else(|| AnalysisError::lookup("hazard severities", severity))?;
    Ok((p as u32 + 1) * (s as u32 + 1))
}

/// Inputs for the five user-defined equation slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserDefinedInputs {
    #[serde(default)]
    pub hr: f64,
    #[serde(default)]
    pub pi: [f64; 5],
    #[serde(default)]
    pub uf: [f64; 3],
    #[serde(default)]
    pub ui: [i64; 3],
    /// Prior results, usable as five more user values
    #[serde(default)]
    pub res: [f64; 5],
    #[serde(default)]
    pub equations: [String; 5],
}

impl UserDefinedInputs {
    fn bindings(&self) -> HashMap<String, f64> {
        let mut vars = HashMap::from([("hr".to_string(), self.hr), ("0".to_string(), 0.0)]);
        for (i, value) in self.pi.iter().enumerate() {
            vars.insert(format!("pi{}", i + 1), *value);
        }
        for (i, value) in self.uf.iter().enumerate() {
            vars.insert(format!("uf{}", i + 1), *value);
        }
        for (i, value) in self.ui.iter().enumerate() {
            vars.insert(format!("ui{}", i + 1), *value as f64);
        }
        for (i, value) in self.res.iter().enumerate() {
            vars.insert(format!("res{}", i + 1), *value);
        }
        vars
    }
}

/// Evaluate every equation slot against the same bindings.
///
/// `resN` always refers to the prior result passed in, not a result
/// computed earlier in the same call.
pub fn calculate_user_defined(
    inputs: &UserDefinedInputs,
    limits: &EquationLimits,
) -> Result<[f64; 5]> {
    let vars = inputs.bindings();
    let mut results = [0.0; 5];
    for (slot, equation) in inputs.equations.iter().enumerate() {
        results[slot] = Evaluator::eval_str(equation, &vars, &USER_VARIABLES, limits)?;
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpn() {
        assert_eq!(calculate_rpn(7, 4, 2).unwrap(), 56);
        assert_eq!(calculate_rpn(10, 10, 10).unwrap(), 1000);
    }

    #[test]
    fn test_rpn_names_offending_field() {
        let err = calculate_rpn(11, 4, 2).unwrap_err();
        assert_eq!(err.field(), Some("rpn_severity"));
        let err = calculate_rpn(1, 0, 2).unwrap_err();
        assert_eq!(err.field(), Some("rpn_occurrence"));
        let err = calculate_rpn(1, 1, -2).unwrap_err();
        assert_eq!(err.field(), Some("rpn_detection"));
    }

    #[test]
    fn test_mode_hazard_rate() {
        assert!((calculate_mode_hazard_rate(0.5, 0.2).unwrap() - 0.1).abs() < 1e-15);
        assert_eq!(
            calculate_mode_hazard_rate(0.5, 1.2).unwrap_err().field(),
            Some("mode_ratio")
        );
        assert_eq!(
            calculate_mode_hazard_rate(-0.5, 0.2).unwrap_err().field(),
            Some("item_hazard_rate")
        );
    }

    #[test]
    fn test_mode_criticality() {
        let c = calculate_mode_criticality(0.00021595, 5.28, 0.75).unwrap();
        assert!((c - 0.000855162).abs() < 1e-9);
        assert_eq!(
            calculate_mode_criticality(0.1, -1.0, 0.5).unwrap_err().field(),
            Some("mode_op_time")
        );
        assert_eq!(
            calculate_mode_criticality(0.1, 1.0, 1.5).unwrap_err().field(),
            Some("effect_probability")
        );
        assert_eq!(
            calculate_mode_criticality(f64::INFINITY, 1.0, 0.5).unwrap(),
            f64::INFINITY
        );
    }

    #[test]
    fn test_item_criticality() {
        let totals = calculate_item_criticality([("I", 0.1), ("II", 0.2), ("I", 0.3)]);
        assert!((totals["I"] - 0.4).abs() < 1e-15);
        assert_eq!(totals["II"], 0.2);
    }

    #[test]
    fn test_hri() {
        assert_eq!(calculate_hri("Level A - Frequent", "Major").unwrap(), 30);
        assert_eq!(calculate_hri("Level E - Extremely Unlikely", "Insignificant").unwrap(), 1);
        assert_eq!(calculate_hri("Level C - Occasional", "Medium").unwrap(), 12);
        assert!(matches!(
            calculate_hri("Sometimes", "Major"),
            Err(AnalysisError::Lookup { .. })
        ));
        assert!(calculate_hri("Level A - Frequent", "Huge").is_err());
    }

    #[test]
    fn test_user_defined() {
        let inputs = UserDefinedInputs {
            hr: 0.00051,
            pi: [1.0, 2.0, 3.0, 4.0, 5.0],
            uf: [0.5, 0.0, 0.0],
            ui: [3, 0, 0],
            res: [0.0, 0.0, 0.0, 0.0, 9.0],
            equations: [
                "hr * pi2 * 1000".to_string(),
                "uf1 * ui1".to_string(),
                String::new(),
                "(pi3 + pi4) / 7".to_string(),
                "res5 - 1".to_string(),
            ],
        };
        let results = calculate_user_defined(&inputs, &EquationLimits::default()).unwrap();
        assert!((results[0] - 1.02).abs() < 1e-12);
        assert_eq!(results[1], 1.5);
        assert_eq!(results[2], 0.0);
        assert_eq!(results[3], 1.0);
        assert_eq!(results[4], 8.0);
    }

    #[test]
    fn test_user_defined_rejects_unknown_names() {
        let mut inputs = UserDefinedInputs::default();
        inputs.equations[0] = "hr * secret".to_string();
        let err = calculate_user_defined(&inputs, &EquationLimits::default()).unwrap_err();
        assert!(err.to_string().contains("Undefined variable 'secret'"));
    }
}
