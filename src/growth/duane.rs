//! Duane postulate: cumulative MTBF `β·T^α`

use super::validate_non_decreasing;
use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Residual variance and standard errors of `ln β` and `α`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DuaneStandardError {
    pub variance: f64,
    pub se_ln_beta: f64,
    pub se_alpha: f64,
}

/// Log sums shared by the estimator and its standard error
struct LogSums {
    total: f64,
    log_t: f64,
    log_t2: f64,
    log_m: f64,
    log_t_log_m: f64,
}

impl LogSums {
    fn new(n_failures: &[u32], fail_times: &[f64]) -> Self {
        let mut sums = LogSums {
            total: 0.0,
            log_t: 0.0,
            log_t2: 0.0,
            log_m: 0.0,
            log_t_log_m: 0.0,
        };
        let mut cumulative = 0.0;
        for (n, t) in n_failures.iter().zip(fail_times) {
            cumulative += f64::from(*n);
            let ln_t = t.ln();
            let ln_m = (t / cumulative).ln();
            sums.log_t += ln_t;
            sums.log_t2 += ln_t * ln_t;
            sums.log_m += ln_m;
            sums.log_t_log_m += ln_t * ln_m;
        }
        sums.total = cumulative;
        sums
    }

    fn sxx(&self) -> f64 {
        self.log_t2 - self.log_t * self.log_t / self.total
    }
}

/// Regression of log cumulative MTBF on log time; returns `(β, α)`.
///
/// Times must be positive and non-decreasing. No failures gives
/// `(0.0, 1.0)`. A zero regression denominator (every failure at the same
/// time) gives `α = 0`; a scale that overflows gives `β = 1`.
pub fn calculate_duane_parameters(n_failures: &[u32], fail_times: &[f64]) -> Result<(f64, f64)> {
    if fail_times.is_empty() || n_failures.iter().sum::<u32>() == 0 {
        return Ok((0.0, 1.0));
    }
    validate_non_decreasing(n_failures, fail_times)?;
    if n_failures[0] == 0 {
        return Err(AnalysisError::range("n_failures", 0.0, ">= 1 at the first time"));
    }

    let sums = LogSums::new(n_failures, fail_times);
    let sxx = sums.sxx();
    let all_equal = fail_times.iter().all(|t| *t == fail_times[0]);
    let alpha = if all_equal || sxx == 0.0 {
        0.0
    } else {
        (sums.log_t_log_m - sums.log_t * sums.log_m / sums.total) / sxx
    };
    let beta = ((sums.log_m - alpha * sums.log_t) / sums.total).exp();
    let beta = if beta.is_finite() { beta } else { 1.0 };
    Ok((beta, alpha))
}

/// Standard errors from the residual sum of squares.
///
/// With two or fewer failures the raw SSE stands in for the variance.
pub fn calculate_duane_standard_error(
    n_failures: &[u32],
    fail_times: &[f64],
    alpha: f64,
    beta: f64,
) -> Result<DuaneStandardError> {
    validate_non_decreasing(n_failures, fail_times)?;
    let sums = LogSums::new(n_failures, fail_times);
    if sums.total == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "standard error needs at least one failure".to_string(),
        ));
    }

    let mut sse = 0.0;
    let mut cumulative = 0.0;
    for (n, t) in n_failures.iter().zip(fail_times) {
        cumulative += f64::from(*n);
        let fitted = beta.ln() + alpha * t.ln();
        sse += (fitted - (t / cumulative).ln()).powi(2);
    }
    let variance = if sums.total > 2.0 {
        sse / (sums.total - 2.0)
    } else {
        sse
    };

    let sxx = sums.sxx();
    let (se_ln_beta, se_alpha) = if sxx == 0.0 {
        (0.0, 0.0)
    } else {
        (
            variance.sqrt() * (sums.log_t2 / (sums.total * sxx)).sqrt(),
            variance.sqrt() / sxx.sqrt(),
        )
    };
    Ok(DuaneStandardError {
        variance,
        se_ln_beta,
        se_alpha,
    })
}

/// `(cumulative, instantaneous)` MTBF at `time`
pub fn calculate_duane_mean(time: f64, alpha: f64, beta: f64) -> (f64, f64) {
    let cumulative = beta * time.powf(alpha);
    let instantaneous = if alpha == 1.0 {
        cumulative
    } else {
        cumulative / (1.0 - alpha)
    };
    (cumulative, instantaneous)
}

/// Expected cumulative failures by `time`: `T^(1-α) / β`
pub fn calculate_duane_cumulative_failures(time: f64, alpha: f64, beta: f64) -> f64 {
    if beta == 0.0 {
        return f64::INFINITY;
    }
    time.powf(1.0 - alpha) / beta
}

/// Test time needed to accumulate `n_failures`: `(N·β)^(1/(1-α))`
pub fn calculate_duane_cumulative_time(n_failures: f64, alpha: f64, beta: f64) -> f64 {
    if alpha == 1.0 {
        return f64::INFINITY;
    }
    (n_failures * beta).powf(1.0 / (1.0 - alpha))
}
