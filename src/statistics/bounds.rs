//! Confidence bounds: PERT beta approximation and observed Fisher information

use crate::error::{AnalysisError, Result};
use nalgebra::DMatrix;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Relative step used for the finite-difference Hessian
const STEP: f64 = 1e-4;

/// Two-sided bounds on a PERT mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BetaBounds {
    pub mean_ll: f64,
    pub mean: f64,
    pub mean_ul: f64,
    pub std_dev: f64,
}

/// Accept a confidence as a fraction or a percentage
pub fn normalize_confidence(confidence: f64) -> Result<f64> {
    let fraction = if confidence > 1.0 {
        confidence / 100.0
    } else {
        confidence
    };
    if fraction > 0.0 && fraction < 1.0 {
        Ok(fraction)
    } else {
        Err(AnalysisError::range("confidence", confidence, "(0, 1) or (1, 100)"))
    }
}

/// Two-sided standard normal quantile for a confidence level
pub fn z_value(confidence: f64) -> Result<f64> {
    let fraction = normalize_confidence(confidence)?;
    let standard = Normal::new(0.0, 1.0).map_err(|e| AnalysisError::Other(e.to_string()))?;
    Ok(standard.inverse_cdf(1.0 - (1.0 - fraction) / 2.0))
}

/// Bounds from a three-point (minimum, most likely, maximum) estimate.
///
/// The mean is `(a + 4m + b) / 6` and the standard deviation `(b - a) / 6`.
pub fn do_calculate_beta_bounds(a: f64, mode: f64, b: f64, confidence: f64) -> Result<BetaBounds> {
    let z = z_value(confidence)?;
    let mean = (a + 4.0 * mode + b) / 6.0;
    let std_dev = (b - a) / 6.0;
    Ok(BetaBounds {
        mean_ll: mean - z * std_dev,
        mean,
        mean_ul: mean + z * std_dev,
        std_dev,
    })
}

/// Observed information matrix: the negated Hessian of the summed
/// log-likelihood at `params`, by central differences.
pub fn do_calculate_fisher_information<F>(
    log_pdf: F,
    params: &[f64],
    data: &[f64],
) -> Result<DMatrix<f64>>
where
    F: Fn(&[f64], f64) -> f64,
{
    if params.is_empty() || data.is_empty() {
        return Err(AnalysisError::DegenerateInput(
            "Fisher information needs parameters and data".to_string(),
        ));
    }
    let log_likelihood = |p: &[f64]| data.iter().map(|x| log_pdf(p, *x)).sum::<f64>();
    let steps: Vec<f64> = params.iter().map(|p| STEP * p.abs().max(1.0)).collect();
    let k = params.len();
    let center = log_likelihood(params);

    let mut info = DMatrix::<f64>::zeros(k, k);
    let mut p = params.to_vec();
    for i in 0..k {
        let hi = steps[i];
        p[i] = params[i] + hi;
        let up = log_likelihood(&p);
        p[i] = params[i] - hi;
        let down = log_likelihood(&p);
        p[i] = params[i];
        info[(i, i)] = -(up - 2.0 * center + down) / (hi * hi);

        for j in (i + 1)..k {
            let hj = steps[j];
            let mut corner = |si: f64, sj: f64| {
                p[i] = params[i] + si * hi;
                p[j] = params[j] + sj * hj;
                let value = log_likelihood(&p);
                p[i] = params[i];
                p[j] = params[j];
                value
            };
            let mixed =
                (corner(1.0, 1.0) - corner(1.0, -1.0) - corner(-1.0, 1.0) + corner(-1.0, -1.0))
                    / (4.0 * hi * hj);
            info[(i, j)] = -mixed;
            info[(j, i)] = -mixed;
        }
    }
    if info.iter().any(|v| !v.is_finite()) {
        return Err(AnalysisError::DegenerateInput(
            "log-likelihood is not finite near the estimate".to_string(),
        ));
    }
    Ok(info)
}

/// Asymptotic covariance: the inverse of the information matrix
pub fn calculate_covariance(info: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    info.clone().try_inverse().ok_or_else(|| {
        AnalysisError::DegenerateInput("information matrix is singular".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_beta_bounds() {
        let bounds = do_calculate_beta_bounds(10.0, 20.0, 40.0, 0.95).unwrap();
        assert!(close(bounds.mean_ll, 11.866_846_74, 1e-8));
        assert!(close(bounds.mean, 21.666_666_67, 1e-8));
        assert!(close(bounds.mean_ul, 31.466_486_59, 1e-8));
        assert_eq!(bounds.std_dev, 5.0);
    }

    #[test]
    fn test_beta_bounds_percent_matches_fraction() {
        let fraction = do_calculate_beta_bounds(10.0, 20.0, 40.0, 0.95).unwrap();
        let percent = do_calculate_beta_bounds(10.0, 20.0, 40.0, 95.0).unwrap();
        assert!(close(fraction.mean_ll, percent.mean_ll, 1e-12));
        assert!(close(fraction.mean_ul, percent.mean_ul, 1e-12));
    }

    #[test]
    fn test_beta_bounds_bad_confidence() {
        assert!(do_calculate_beta_bounds(10.0, 20.0, 40.0, 0.0).is_err());
        assert!(do_calculate_beta_bounds(10.0, 20.0, 40.0, 100.0).is_err());
    }

    #[test]
    fn test_fisher_exponential() {
        let log_pdf = |p: &[f64], x: f64| p[0].ln() - p[0] * x;
        let info = do_calculate_fisher_information(log_pdf, &[0.5], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(close(info[(0, 0)], 16.0, 1e-5));
    }

    #[test]
    fn test_fisher_normal_and_covariance() {
        let log_pdf = |p: &[f64], x: f64| {
            -p[1].ln() - 0.5 * (2.0 * std::f64::consts::PI).ln() - (x - p[0]).powi(2) / (2.0 * p[1] * p[1])
        };
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sigma = 2.0f64.sqrt();
        let info = do_calculate_fisher_information(log_pdf, &[3.0, sigma], &data).unwrap();
        assert!(close(info[(0, 0)], 2.5, 1e-5));
        assert!(close(info[(1, 1)], 5.0, 1e-5));
        assert!(info[(0, 1)].abs() < 1e-5);

        let cov = calculate_covariance(&info).unwrap();
        assert!(close(cov[(0, 0)], 0.4, 1e-5));
    }

    #[test]
    fn test_singular_information() {
        let info = DMatrix::<f64>::zeros(2, 2);
        assert!(calculate_covariance(&info).is_err());
    }
}
