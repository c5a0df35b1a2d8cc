//! Lookup tables and environment vocabularies
//!
//! MIL-HDBK-217F constants live next to the model that consumes them (see
//! [`crate::milhdbk217f`]); they are compile-time data. Tables a program may
//! tailor (stress limits, dormancy multipliers) are values built once and
//! passed into each call.

pub mod dormancy;
pub mod stress;

pub use dormancy::{dormancy_column, DormancyTable, DORMANCY_COLUMNS};
pub use stress::{LimitNode, StressLimits};

use crate::error::{select, Result};

/// MIL-HDBK-217F active environments, 1-based in this order
pub const ACTIVE_ENVIRONMENTS: [&str; 14] = [
    "GB", "GF", "GM", "NS", "NU", "AIC", "AIF", "AUC", "AUF", "ARW", "SF", "MF", "ML", "CL",
];

/// Dormant (storage) environments, 1-based in this order
pub const DORMANT_ENVIRONMENTS: [&str; 4] = ["Airborne", "Ground", "Naval", "Space"];

/// Derating environments, 1-based in this order
pub const DERATING_ENVIRONMENTS: [&str; 3] = ["Protected", "Normal", "Severe"];

pub fn active_environment_name(environment_active_id: i64) -> Result<&'static str> {
    select(&ACTIVE_ENVIRONMENTS, environment_active_id, "active_environments")
}

/// Broad class of an active environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentClass {
    Ground,
    Naval,
    Airborne,
    Space,
    Missile,
}

pub fn environment_class(environment_active_id: i64) -> Option<EnvironmentClass> {
    match environment_active_id {
        1..=3 => Some(EnvironmentClass::Ground),
        4..=5 => Some(EnvironmentClass::Naval),
        6..=10 => Some(EnvironmentClass::Airborne),
        11 => Some(EnvironmentClass::Space),
        12..=14 => Some(EnvironmentClass::Missile),
        _ => None,
    }
}
