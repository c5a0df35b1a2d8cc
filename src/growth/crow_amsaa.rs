//! Crow-AMSAA (NHPP power law): cumulative failures `λ·T^β`

use super::validate;
use crate::error::{AnalysisError, Result};
use crate::statistics::bounds::normalize_confidence;

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-12;

/// Significance levels heading the critical value columns
const CVM_SIGNIFICANCE: [f64; 5] = [0.2, 0.15, 0.1, 0.05, 0.01];

/// Cramér-von Mises critical values by number of failures
const CVM_TABLE: [(u32, [f64; 5]); 22] = [
    (2, [0.138, 0.149, 0.162, 0.175, 0.186]),
    (3, [0.121, 0.135, 0.154, 0.184, 0.23]),
    (4, [0.121, 0.134, 0.155, 0.191, 0.28]),
    (5, [0.121, 0.137, 0.160, 0.199, 0.30]),
    (6, [0.123, 0.139, 0.162, 0.204, 0.31]),
    (7, [0.124, 0.140, 0.165, 0.208, 0.32]),
    (8, [0.124, 0.141, 0.165, 0.210, 0.32]),
    (9, [0.125, 0.142, 0.167, 0.212, 0.32]),
    (10, [0.125, 0.142, 0.167, 0.212, 0.32]),
    (11, [0.126, 0.143, 0.169, 0.214, 0.32]),
    (12, [0.126, 0.144, 0.169, 0.214, 0.32]),
    (13, [0.126, 0.144, 0.169, 0.214, 0.33]),
    (14, [0.126, 0.144, 0.169, 0.214, 0.33]),
    (15, [0.126, 0.144, 0.169, 0.215, 0.33]),
    (16, [0.127, 0.145, 0.171, 0.216, 0.33]),
    (17, [0.127, 0.145, 0.171, 0.217, 0.33]),
    (18, [0.127, 0.146, 0.171, 0.217, 0.33]),
    (19, [0.127, 0.146, 0.171, 0.217, 0.33]),
    (20, [0.128, 0.146, 0.172, 0.217, 0.33]),
    (30, [0.128, 0.146, 0.172, 0.218, 0.33]),
    (60, [0.128, 0.147, 0.173, 0.220, 0.33]),
    (100, [0.129, 0.147, 0.173, 0.220, 0.34]),
];

/// Score equation for β with grouped data; zero at the estimate
fn beta_grouped(beta: f64, n_failures: &[u32], fail_times: &[f64]) -> f64 {
    let t_max = fail_times.last().copied().unwrap_or(1.0);
    let mut score = 0.0;
    let mut previous = 0.0f64;
    for (n, t) in n_failures.iter().zip(fail_times) {
        let upper = t.powf(beta);
        let lower = previous.powf(beta);
        let lower_log = if previous > 0.0 { lower * previous.ln() } else { 0.0 };
        score += f64::from(*n) * ((upper * t.ln() - lower_log) / (upper - lower) - t_max.ln());
        previous = *t;
    }
    score
}

fn solve_grouped(n_failures: &[u32], fail_times: &[f64], initial: f64) -> Option<f64> {
    let mut beta = initial;
    for _ in 0..MAX_ITERATIONS {
        let h = 1e-7 * beta.abs().max(1.0);
        let slope = (beta_grouped(beta + h, n_failures, fail_times)
            - beta_grouped(beta - h, n_failures, fail_times))
            / (2.0 * h);
        let step = beta_grouped(beta, n_failures, fail_times) / slope;
        beta -= step;
        if !beta.is_finite() || beta <= 0.0 {
            return None;
        }
        if step.abs() < TOLERANCE {
            return Some(beta);
        }
    }
    None
}

/// Maximum likelihood `(λ, β)`.
///
/// Empty input gives `(0.0, 0.0)`. A failure-terminated test is assumed when
/// `t_star` is not positive. Grouped data that fails to converge gives
/// `(1.0, 1.0)`.
pub fn calculate_crow_amsaa_parameters(
    n_failures: &[u32],
    fail_times: &[f64],
    t_star: f64,
    grouped: bool,
) -> Result<(f64, f64)> {
    if n_failures.is_empty() || fail_times.is_empty() {
        return Ok((0.0, 0.0));
    }
    validate(n_failures, fail_times)?;

    let t_star = if t_star > 0.0 {
        t_star
    } else {
        fail_times[fail_times.len() - 1]
    };
    let total = f64::from(n_failures.iter().sum::<u32>());
    let sum_log: f64 = n_failures
        .iter()
        .zip(fail_times)
        .map(|(n, t)| f64::from(*n) * t.ln())
        .sum();
    let denominator = total * t_star.ln() - sum_log;
    let initial = if denominator == 0.0 { 1.0 } else { total / denominator };

    let beta = if grouped {
        match solve_grouped(n_failures, fail_times, initial) {
            Some(beta) => beta,
            None => return Ok((1.0, 1.0)),
        }
    } else {
        initial
    };
    Ok((total / t_star.powf(beta), beta))
}

/// `(cumulative, instantaneous)` MTBF at `time`
pub fn calculate_crow_amsaa_mean(time: f64, alpha: f64, beta: f64) -> (f64, f64) {
    let cumulative = (1.0 / alpha) * time.powf(1.0 - beta);
    let instantaneous = 1.0 / (alpha * beta * time.powf(beta - 1.0));
    (cumulative, instantaneous)
}

/// Cramér-von Mises goodness-of-fit statistic for exact failure times.
///
/// A failure-terminated test ends at the last failure and uses the
/// unbiased `β̄ = (N-1)·β/N` over the first `N-1` failures.
pub fn calculate_cramer_vonmises(
    n_failures: &[u32],
    fail_times: &[f64],
    beta: f64,
    t_star: f64,
    failure_terminated: bool,
) -> Result<f64> {
    validate(n_failures, fail_times)?;
    let times: Vec<f64> = n_failures
        .iter()
        .zip(fail_times)
        .flat_map(|(n, t)| std::iter::repeat(*t).take(*n as usize))
        .collect();
    let total = times.len();
    if total < 2 {
        return Err(AnalysisError::DegenerateInput(
            "Cramér-von Mises needs at least two failures".to_string(),
        ));
    }

    let (end, beta_bar, m) = if failure_terminated {
        let n = total as f64;
        (times[total - 1], (n - 1.0) * beta / n, total - 1)
    } else {
        if t_star <= 0.0 {
            return Err(AnalysisError::range("t_star", t_star, "> 0"));
        }
        (t_star, beta, total)
    };
    let mf = m as f64;
    let sum: f64 = times[..m]
        .iter()
        .enumerate()
        .map(|(i, t)| ((t / end).powf(beta_bar) - (2.0 * (i as f64 + 1.0) - 1.0) / (2.0 * mf)).powi(2))
        .sum();
    Ok(sum + 1.0 / (12.0 * mf))
}

/// Chi-square goodness-of-fit statistic.
///
/// Exact data gives `2N/β`. Grouped data compares observed counts with the
/// power-law expectation `N·(tᵢ^β - tᵢ₋₁^β) / T^β`, skipping empty intervals.
pub fn calculate_crow_amsaa_chi_square(
    n_failures: &[u32],
    fail_times: &[f64],
    beta: f64,
    ttt: f64,
    grouped: bool,
) -> f64 {
    let total = f64::from(n_failures.iter().sum::<u32>());
    if !grouped {
        return 2.0 * total / beta;
    }
    let scale = ttt.powf(beta);
    let mut chi_square = 0.0;
    let mut previous = 0.0f64;
    for (n, t) in n_failures.iter().zip(fail_times) {
        let theta = total * (t.powf(beta) - previous.powf(beta)) / scale;
        if theta != 0.0 {
            chi_square += (f64::from(*n) - theta).powi(2) / theta;
        }
        previous = *t;
    }
    chi_square
}

/// Critical value for `n_failures` at a confidence (fraction or percent).
///
/// Failures between table rows and significance levels between columns
/// are interpolated linearly. Beyond the last row or column the edge value
/// is used.
pub fn cramer_vonmises_critical_value(n_failures: u32, confidence: f64) -> Result<f64> {
    let significance = 1.0 - normalize_confidence(confidence)?;
    let first = CVM_TABLE[0].0;
    if n_failures < first {
        return Err(AnalysisError::range(
            "n_failures",
            f64::from(n_failures),
            format!(">= {}", first),
        ));
    }

    let row = match CVM_TABLE.iter().position(|(df, _)| *df >= n_failures) {
        Some(i) if CVM_TABLE[i].0 == n_failures || i == 0 => CVM_TABLE[i].1,
        Some(i) => {
            let (lo_df, lo) = CVM_TABLE[i - 1];
            let (hi_df, hi) = CVM_TABLE[i];
            let w = f64::from(n_failures - lo_df) / f64::from(hi_df - lo_df);
            let mut row = [0.0; 5];
            for (k, value) in row.iter_mut().enumerate() {
                *value = lo[k] + w * (hi[k] - lo[k]);
            }
            row
        }
        None => CVM_TABLE[CVM_TABLE.len() - 1].1,
    };

    if significance >= CVM_SIGNIFICANCE[0] - 1e-9 {
        return Ok(row[0]);
    }
    for k in 1..CVM_SIGNIFICANCE.len() {
        let (hi_s, lo_s) = (CVM_SIGNIFICANCE[k - 1], CVM_SIGNIFICANCE[k]);
        if (significance - lo_s).abs() < 1e-9 {
            return Ok(row[k]);
        }
        if significance > lo_s {
            let w = (hi_s - significance) / (hi_s - lo_s);
            return Ok(row[k - 1] + w * (row[k] - row[k - 1]));
        }
    }
    Ok(row[CVM_SIGNIFICANCE.len() - 1])
}

/// Initial MTBF of the first phase; 0.0 unless every input is positive
pub fn calculate_initial_mtbf(alpha: f64, mtbfg: f64, cum_time: f64, t1: f64) -> f64 {
    if mtbfg > 0.0 && cum_time > 0.0 && t1 > 0.0 {
        (mtbfg.ln() - alpha * (cum_time.ln() - t1.ln()) + (1.0 - alpha).ln()).exp()
    } else {
        0.0
    }
}

/// Final MTBF of a phase; 0.0 when a divisor is zero
pub fn calculate_final_mtbf(alpha: f64, mtbfa: f64, cum_time: f64, t1: f64) -> f64 {
    if t1 == 0.0 || alpha == 1.0 {
        return 0.0;
    }
    mtbfa * (cum_time / t1).powf(alpha) / (1.0 - alpha)
}

/// Failures expected during a phase; 0.0 when a divisor is zero
pub fn calculate_n_failures(alpha: f64, mtbfa: f64, cum_time: f64, t1: f64, cum_fails: f64) -> f64 {
    if mtbfa == 0.0 || t1 == 0.0 {
        return 0.0;
    }
    (t1 / mtbfa) * (cum_time / t1).powf(1.0 - alpha) - cum_fails
}

/// Average MTBF from time and failures, else from the phase end points
pub fn calculate_average_mtbf(cum_time: f64, n_failures: f64, mtbfi: f64, mtbff: f64) -> f64 {
    if cum_time > 0.0 && n_failures > 0.0 {
        cum_time / n_failures
    } else if mtbfi > 0.0 && mtbff > 0.0 {
        (mtbfi + mtbff) / 2.0
    } else {
        0.0
    }
}

/// Total test time, rounded up; 0.0 when undefined
pub fn calculate_total_time(alpha: f64, mtbfa: f64, mtbfg: f64, t1: f64) -> f64 {
    if alpha == 0.0 || mtbfa == 0.0 {
        return 0.0;
    }
    let ttt = t1 * (mtbfg * (1.0 - alpha) / mtbfa).powf(1.0 / alpha);
    if ttt.is_finite() {
        ttt.ceil()
    } else {
        0.0
    }
}

/// Minimum first-phase time, rounded up; 0.0 when undefined
pub fn calculate_t1(alpha: f64, mtbfa: f64, mtbfg: f64, ttt: f64) -> f64 {
    if alpha == 0.0 || mtbfa == 0.0 {
        return 0.0;
    }
    let t1 = ttt / (mtbfg * (1.0 - alpha) / mtbfa).powf(1.0 / alpha);
    if t1.is_finite() {
        t1.ceil()
    } else {
        0.0
    }
}

/// Minimum growth rate to reach `mtbfg` from `mtbfa`; 0.0 when undefined
pub fn calculate_growth_rate(mtbfa: f64, mtbfg: f64, ttt: f64, t1: f64) -> f64 {
    if t1 == 0.0 || mtbfa == 0.0 {
        return 0.0;
    }
    let log_ratio = (ttt / t1).ln();
    let alpha = -log_ratio - 1.0 + ((1.0 + log_ratio).powi(2) + 2.0 * (mtbfg / mtbfa).ln()).sqrt();
    if alpha.is_finite() {
        alpha
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXACT_TIMES: [f64; 22] = [
        2.7, 10.3, 12.5, 30.6, 57.0, 61.3, 80.0, 109.5, 125.0, 128.6, 143.8, 167.9, 229.2, 296.7,
        320.6, 328.2, 366.2, 396.7, 421.1, 438.2, 501.2, 620.0,
    ];
    const GROUP_FAILS: [u32; 6] = [12, 6, 15, 3, 18, 16];
    const GROUP_TIMES: [f64; 6] = [62.0, 100.0, 187.0, 210.0, 350.0, 500.0];
    const GOF_TIMES: [f64; 46] = [
        2.4, 24.9, 52.5, 53.4, 54.7, 57.2, 118.6, 140.2, 185.0, 207.6, 293.9, 322.3, 365.9, 366.8,
        544.8, 616.8, 627.5, 646.8, 664.0, 738.1, 764.7, 765.1, 779.6, 799.9, 852.9, 1116.3,
        1161.1, 1257.1, 1276.3, 1308.9, 1340.3, 1437.3, 1482.0, 1489.9, 1715.1, 1828.9, 1971.5,
        2303.4, 2429.7, 2457.4, 2535.2, 2609.9, 2674.2, 2704.8, 2849.6, 2923.5,
    ];

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_parameters_exact() {
        let (alpha, beta) =
            calculate_crow_amsaa_parameters(&[1; 22], &EXACT_TIMES, 0.0, false).unwrap();
        assert!(close(alpha, 0.423_942_214_880_575_04, 1e-9));
        assert!(close(beta, 0.614_210_399_931_729_7, 1e-9));
    }

    #[test]
    fn test_parameters_grouped() {
        let (alpha, beta) =
            calculate_crow_amsaa_parameters(&GROUP_FAILS, &GROUP_TIMES, 0.0, true).unwrap();
        assert!(close(beta, 0.813_608_539_656_774_2, 1e-7));
        assert!(close(alpha, 0.445_854_337_675_315_35, 1e-6));
        assert!(beta_grouped(beta, &GROUP_FAILS, &GROUP_TIMES).abs() < 1e-6);
    }

    #[test]
    fn test_parameters_empty() {
        assert_eq!(
            calculate_crow_amsaa_parameters(&[], &[], 0.0, false).unwrap(),
            (0.0, 0.0)
        );
    }

    #[test]
    fn test_mean() {
        let (cumulative, instantaneous) =
            calculate_crow_amsaa_mean(620.0, 0.423_942_214_880_575_04, 0.614_210_399_931_729_7);
        assert!(close(cumulative, 28.181_818_181_818_183, 1e-9));
        assert!(close(instantaneous, 45.883_003_910_306_04, 1e-9));
        assert_eq!(calculate_crow_amsaa_mean(620.0, 0.0, 0.6).0, f64::INFINITY);
    }

    #[test]
    fn test_cramer_vonmises() {
        let time_terminated =
            calculate_cramer_vonmises(&[1; 46], &GOF_TIMES, 0.616, 3000.0, false).unwrap();
        assert!(close(time_terminated, 0.048_653_250_550_386_35, 1e-9));
        let failure_terminated =
            calculate_cramer_vonmises(&[1; 46], &GOF_TIMES, 0.616, 0.0, true).unwrap();
        assert!(close(failure_terminated, 0.047_049_618_605_914_45, 1e-9));
        assert!(calculate_cramer_vonmises(&[1; 46], &GOF_TIMES, 0.616, 0.0, false).is_err());
    }

    #[test]
    fn test_chi_square() {
        let exact = calculate_crow_amsaa_chi_square(&[1; 46], &GOF_TIMES, 0.616, 3000.0, false);
        assert!(close(exact, 149.350_649_350_649_35, 1e-12));

        let fails = [12, 6, 7, 5, 4, 3, 1, 4, 4];
        let times = [330.0, 660.0, 990.0, 1320.0, 1650.0, 1980.0, 2310.0, 2640.0, 3000.0];
        let grouped = calculate_crow_amsaa_chi_square(&fails, &times, 0.616, 3000.0, true);
        assert!(close(grouped, 2.940_642_625_415_008, 1e-9));
    }

    #[test]
    fn test_critical_value() {
        assert!(close(cramer_vonmises_critical_value(16, 90.0).unwrap(), 0.171, 1e-12));
        assert!(close(cramer_vonmises_critical_value(16, 0.9).unwrap(), 0.171, 1e-12));
        assert!(close(cramer_vonmises_critical_value(16, 75.0).unwrap(), 0.127, 1e-12));
        assert!(close(cramer_vonmises_critical_value(26, 90.0).unwrap(), 0.172, 1e-12));
        assert!(close(cramer_vonmises_critical_value(25, 95.0).unwrap(), 0.2175, 1e-12));
        assert!(close(cramer_vonmises_critical_value(500, 99.0).unwrap(), 0.34, 1e-12));
        assert!(close(cramer_vonmises_critical_value(2, 92.5).unwrap(), 0.1685, 1e-12));
        assert!(cramer_vonmises_critical_value(1, 90.0).is_err());
    }

    #[test]
    fn test_planning() {
        assert!(close(calculate_initial_mtbf(0.23, 78.957_302_3, 10000.0, 1000.0), 35.8, 1e-8));
        assert_eq!(calculate_initial_mtbf(0.23, 0.0, 10000.0, 1000.0), 0.0);
        assert!(close(
            calculate_final_mtbf(0.23, 35.8, 10000.0, 1000.0),
            78.957_302_283_286_28,
            1e-9
        ));
        assert_eq!(calculate_final_mtbf(0.23, 35.8, 10000.0, 0.0), 0.0);
        assert!(close(
            calculate_n_failures(0.23, 35.8, 10000.0, 1000.0, 0.0),
            164.481_467_976_421_53,
            1e-9
        ));
        assert_eq!(calculate_average_mtbf(1000.0, 20.0, 0.0, 0.0), 50.0);
        assert_eq!(calculate_average_mtbf(0.0, 0.0, 40.0, 60.0), 50.0);
        assert_eq!(calculate_total_time(0.3, 50.0, 100.0, 1000.0), 3070.0);
        assert_eq!(calculate_total_time(0.0, 50.0, 100.0, 1000.0), 0.0);
        assert_eq!(calculate_t1(0.3, 50.0, 100.0, 20000.0), 6516.0);
        assert!(close(
            calculate_growth_rate(35.8, 78.957_302_3, 10000.0, 1000.0),
            0.231_390_991_805_613_4,
            1e-9
        ));
        assert_eq!(calculate_growth_rate(35.8, 78.9, 10000.0, 0.0), 0.0);
    }
}
