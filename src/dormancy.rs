//! Dormant hazard rate
//!
//! `λ_dormant = λ_active × multiplier(part type, active env, dormant env)`.
//! Combinations the multiplier table does not cover give a multiplier of
//! 0.0 rather than an error.

use crate::milhdbk217f::{
    CATEGORY_CAPACITOR, CATEGORY_CONNECTION, CATEGORY_INDUCTOR, CATEGORY_INTEGRATED_CIRCUIT,
    CATEGORY_RELAY, CATEGORY_RESISTOR, CATEGORY_SEMICONDUCTOR, CATEGORY_SWITCH,
};
use crate::tables::{dormancy_column, DormancyTable};

/// Dormancy table row for a hardware category/subcategory
pub fn part_type(category_id: i64, subcategory_id: i64) -> Option<&'static str> {
    match category_id {
        CATEGORY_INTEGRATED_CIRCUIT => Some("integrated_circuit"),
        CATEGORY_SEMICONDUCTOR => match subcategory_id {
            1 | 2 => Some("diode"),
            3..=9 => Some("transistor"),
            _ => None,
        },
        CATEGORY_RESISTOR => Some("resistor"),
        CATEGORY_CAPACITOR => Some("capacitor"),
        CATEGORY_INDUCTOR if subcategory_id == 1 => Some("transformer"),
        CATEGORY_RELAY => Some("relay"),
        CATEGORY_SWITCH => Some("switch"),
        CATEGORY_CONNECTION => Some("connection"),
        _ => None,
    }
}

pub fn get_dormant_multiplier(
    table: &DormancyTable,
    category_id: i64,
    subcategory_id: i64,
    environment_active_id: i64,
    environment_dormant_id: i64,
) -> f64 {
    part_type(category_id, subcategory_id)
        .zip(dormancy_column(environment_active_id, environment_dormant_id))
        .and_then(|(part, column)| table.multiplier(part, column))
        .unwrap_or(0.0)
}

pub fn calculate_dormant_hazard_rate(
    table: &DormancyTable,
    category_id: i64,
    subcategory_id: i64,
    environment_active_id: i64,
    environment_dormant_id: i64,
    hazard_rate_active: f64,
) -> f64 {
    hazard_rate_active
        * get_dormant_multiplier(
            table,
            category_id,
            subcategory_id,
            environment_active_id,
            environment_dormant_id,
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_multipliers() {
        let table = DormancyTable::builtin();
        let cases = [
            (1, 2, 0.005),
            (4, 3, 0.008),
            (4, 2, 0.003),
            (6, 1, 0.0005),
            (8, 2, 0.003),
            (11, 4, 0.02),
            (11, 2, 0.03),
        ];
        for (active, dormant, expected) in cases {
            assert_eq!(
                get_dormant_multiplier(&table, CATEGORY_CONNECTION, 1, active, dormant),
                expected
            );
        }
    }

    #[test]
    fn test_connection_airborne() {
        let table = DormancyTable::builtin();
        assert_eq!(get_dormant_multiplier(&table, CATEGORY_CONNECTION, 1, 6, 1), 0.0005);
        assert_eq!(get_dormant_multiplier(&table, 8, 1, 10, 1), 0.0005);
    }

    #[test]
    fn test_semiconductor_split() {
        let table = DormancyTable::builtin();
        assert_eq!(get_dormant_multiplier(&table, 2, 1, 1, 2), 0.04);
        assert_eq!(get_dormant_multiplier(&table, 2, 6, 1, 2), 0.05);
        assert_eq!(get_dormant_multiplier(&table, 2, 12, 1, 2), 0.0);
    }

    #[test]
    fn test_unmapped_is_zero() {
        let table = DormancyTable::builtin();
        // Missile environments have no dormant column.
        assert_eq!(calculate_dormant_hazard_rate(&table, 1, 1, 13, 2, 1.5), 0.0);
        assert_eq!(calculate_dormant_hazard_rate(&table, 9, 1, 1, 2, 1.5), 0.0);
        assert_eq!(calculate_dormant_hazard_rate(&table, 5, 2, 1, 2, 1.5), 0.0);
    }

    #[test]
    fn test_dormant_hazard_rate() {
        let table = DormancyTable::builtin();
        let rate = calculate_dormant_hazard_rate(&table, CATEGORY_RESISTOR, 1, 7, 1, 0.5);
        assert!((rate - 0.03).abs() < 1e-15);
    }
}
