//! Growth planning (SPLAN): management strategy, fix effectiveness,
//! growth potential and the probability of observing a failure
//!
//! Each function returns a fixed value when its denominator vanishes: 1.0
//! for the ratios, 0.0 for the probability and infinity for the growth
//! potential.

/// Fraction of the initial failure intensity addressed by corrective action
pub fn calculate_management_strategy(fef: f64, mtbfa: f64, mtbfgp: f64) -> f64 {
    if fef == 0.0 || mtbfgp == 0.0 {
        return 1.0;
    }
    (1.0 - mtbfa / mtbfgp) / fef
}

/// Average fix effectiveness factor
pub fn calculate_fef(ms: f64, mtbfa: f64, mtbfgp: f64) -> f64 {
    if ms == 0.0 || mtbfgp == 0.0 {
        return 1.0;
    }
    (1.0 - mtbfa / mtbfgp) / ms
}

/// Probability of seeing at least one failure in `time`
pub fn calculate_probability(time: f64, ms: f64, mtbfi: f64) -> f64 {
    if mtbfi == 0.0 {
        return 0.0;
    }
    1.0 - (-time * ms / mtbfi).exp()
}

/// Growth potential MTBF `MI / (1 - MS·FEF)`
pub fn calculate_growth_potential(mtbfi: f64, ms: f64, fef: f64) -> f64 {
    let denominator = 1.0 - ms * fef;
    if denominator == 0.0 {
        return f64::INFINITY;
    }
    mtbfi / denominator
}
