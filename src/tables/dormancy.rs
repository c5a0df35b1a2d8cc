//! Dormant-to-active hazard rate multipliers (MIL-HDBK-338, table 6.3.4-1)

use crate::error::Result;
use crate::tables::{environment_class, EnvironmentClass};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Multiplier columns, in table order
pub const DORMANCY_COLUMNS: [&str; 7] = [
    "ground->ground",
    "airborne->airborne",
    "airborne->ground",
    "naval->naval",
    "naval->ground",
    "space->space",
    "space->ground",
];

const BUILTIN: [(&str, [f64; 7]); 10] = [
    ("integrated_circuit", [0.08, 0.06, 0.04, 0.06, 0.05, 0.10, 0.30]),
    ("diode", [0.04, 0.05, 0.01, 0.04, 0.03, 0.20, 0.80]),
    ("transistor", [0.05, 0.06, 0.02, 0.05, 0.03, 0.20, 1.00]),
    ("capacitor", [0.10, 0.10, 0.03, 0.10, 0.04, 0.20, 0.40]),
    ("resistor", [0.20, 0.06, 0.03, 0.10, 0.06, 0.50, 1.00]),
    ("switch", [0.40, 0.20, 0.10, 0.40, 0.20, 0.80, 1.00]),
    ("relay", [0.20, 0.20, 0.04, 0.30, 0.08, 0.40, 0.90]),
    ("connection", [0.005, 0.0005, 0.003, 0.008, 0.003, 0.02, 0.03]),
    ("circuit_board", [0.04, 0.02, 0.01, 0.03, 0.01, 0.08, 0.20]),
    ("transformer", [0.20, 0.20, 0.20, 0.30, 0.30, 0.50, 1.00]),
];

/// Multiplier rows keyed by part type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct DormancyTable {
    rows: BTreeMap<String, [f64; 7]>,
}

impl Default for DormancyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DormancyTable {
    pub fn builtin() -> Self {
        DormancyTable {
            rows: BTreeMap::from(BUILTIN.map(|(key, row)| (key.to_string(), row))),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_norway::from_str(content)?)
    }

    pub fn part_types(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(|k| k.as_str())
    }

    /// Multiplier for a part type and column, if both exist
    pub fn multiplier(&self, part_type: &str, column: usize) -> Option<f64> {
        self.rows.get(part_type).and_then(|row| row.get(column)).copied()
    }
}

/// Column for an active environment id and a dormant environment id
/// (1 airborne, 2 ground, 3 naval, 4 space). Missile environments and
/// unlisted pairs have no column.
pub fn dormancy_column(environment_active_id: i64, environment_dormant_id: i64) -> Option<usize> {
    use EnvironmentClass::*;
    match (environment_class(environment_active_id)?, environment_dormant_id) {
        (Ground, 2) => Some(0),
        (Airborne, 1) => Some(1),
        (Airborne, 2) => Some(2),
        (Naval, 3) => Some(3),
        (Naval, 2) => Some(4),
        (Space, 4) => Some(5),
        (Space, 2) => Some(6),
        _ => None,
    }
}
