//! Exponential distribution, parameterised by its scale (mean life θ)

use super::bounds::{do_calculate_fisher_information, z_value};
use super::{mean, shifted, FitMethod, FitResult, GoodnessOfFit, LifeDistribution};
use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const MAX_BISECTIONS: usize = 200;
const MAX_BRACKETS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Exponential {
    pub scale: f64,
    #[serde(default)]
    pub location: f64,
}

impl LifeDistribution for Exponential {
    fn hazard_rate(&self, time: f64) -> f64 {
        get_hazard_rate(self.scale, self.location, time)
    }

    fn mtbf(&self) -> f64 {
        get_mtbf(self.scale, self.location)
    }

    fn survival(&self, time: f64) -> f64 {
        get_survival(self.scale, self.location, time)
    }
}

pub fn get_hazard_rate(scale: f64, location: f64, time: f64) -> f64 {
    if !(scale > 0.0) {
        return f64::NAN;
    }
    if time - location <= 0.0 {
        return 0.0;
    }
    1.0 / scale
}

pub fn get_mtbf(scale: f64, location: f64) -> f64 {
    if !(scale > 0.0) {
        return f64::NAN;
    }
    scale + location
}

pub fn get_survival(scale: f64, location: f64, time: f64) -> f64 {
    if !(scale > 0.0) {
        return f64::NAN;
    }
    let t = time - location;
    if t <= 0.0 {
        return 1.0;
    }
    (-t / scale).exp()
}

/// Fit exact failure times. Both methods give the sample mean.
pub fn do_fit(data: &[f64], _method: FitMethod, floc: Option<f64>) -> Result<FitResult> {
    let times = shifted(data, floc, 1)?;
    Ok(FitResult {
        shape: 0.0,
        scale: mean(&times),
        location: floc.unwrap_or(0.0),
    })
}

/// Observation status of a survival record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Event,
    RightCensored,
    LeftCensored,
    IntervalCensored,
}

/// One grouped observation `[left, right]` with a count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurvivalRecord {
    #[serde(default)]
    pub left: f64,
    pub right: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub status: Status,
}

fn default_quantity() -> u32 {
    1
}

/// Maximum likelihood scale for mixed exact and censored data.
///
/// Left- and interval-censored failures are placed at the midpoint of
/// their interval.
pub fn do_fit_censored(records: &[SurvivalRecord]) -> Result<FitResult> {
    let mut failures = 0.0;
    let mut exposure = 0.0;
    for record in records {
        let n = f64::from(record.quantity);
        match record.status {
            Status::Event => {
                failures += n;
                exposure += n * record.right;
            }
            Status::RightCensored => exposure += n * record.right,
            Status::LeftCensored | Status::IntervalCensored => {
                failures += n;
                exposure += n * (record.left + record.right) / 2.0;
            }
        }
    }
    if failures == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "no failures to estimate an exponential rate from".to_string(),
        ));
    }
    Ok(FitResult {
        shape: 0.0,
        scale: exposure / failures,
        location: 0.0,
    })
}

/// Maximum-likelihood fit of survival records with its fit statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExponentialMle {
    #[serde(flatten)]
    pub parameters: FitResult,
    /// Inverse of the observed information at the estimate
    pub scale_variance: f64,
    #[serde(flatten)]
    pub goodness: GoodnessOfFit,
    pub n_failures: u64,
    pub n_suspensions: u64,
}

fn record_log_likelihood(record: &SurvivalRecord, scale: f64) -> f64 {
    let n = f64::from(record.quantity);
    match record.status {
        Status::Event => n * (-scale.ln() - record.right / scale),
        Status::RightCensored => -n * record.right / scale,
        Status::LeftCensored | Status::IntervalCensored => {
            n * ((-record.left / scale).exp() - (-record.right / scale).exp()).ln()
        }
    }
}

/// Log-likelihood of the records for a scale
pub fn log_likelihood(scale: f64, records: &[SurvivalRecord]) -> f64 {
    if !(scale > 0.0) {
        return f64::NAN;
    }
    records.iter().map(|r| record_log_likelihood(r, scale)).sum()
}

/// Records whose interval lies inside `[start, end]`
pub fn records_in_window(records: &[SurvivalRecord], start: f64, end: f64) -> Vec<SurvivalRecord> {
    records
        .iter()
        .filter(|r| r.left >= start && r.right <= end)
        .copied()
        .collect()
}

/// Fit the records observed inside `[start, end]`.
///
/// A record is kept when its interval starts at or after `start` and ends
/// at or before `end`. The criteria count one parameter and one
/// observation per record.
pub fn do_mle(records: &[SurvivalRecord], start: f64, end: f64) -> Result<ExponentialMle> {
    let window = records_in_window(records, start, end);
    if window.is_empty() {
        return Err(AnalysisError::DegenerateInput(format!(
            "no records between {} and {}",
            start, end
        )));
    }

    let parameters = do_fit_censored(&window)?;
    let (mut n_failures, mut n_suspensions) = (0u64, 0u64);
    for record in &window {
        match record.status {
            Status::RightCensored => n_suspensions += u64::from(record.quantity),
            _ => n_failures += u64::from(record.quantity),
        }
    }

    let indices: Vec<f64> = (0..window.len()).map(|i| i as f64).collect();
    let info = do_calculate_fisher_information(
        |p: &[f64], i: f64| record_log_likelihood(&window[i as usize], p[0]),
        &[parameters.scale],
        &indices,
    )?;
    let scale_variance = 1.0 / info[(0, 0)];
    if !(scale_variance > 0.0) || !scale_variance.is_finite() {
        return Err(AnalysisError::DegenerateInput(
            "observed information at the scale estimate is not positive".to_string(),
        ));
    }

    let goodness = GoodnessOfFit::new(log_likelihood(parameters.scale, &window), 1, window.len());
    Ok(ExponentialMle {
        parameters,
        scale_variance,
        goodness,
        n_failures,
        n_suspensions,
    })
}

/// Likelihood-ratio bounds on the scale.
///
/// Finds the scales on either side of the estimate where the
/// log-likelihood has dropped by half the one-degree chi-square quantile.
pub fn likelihood_bounds(
    scale: f64,
    confidence: f64,
    records: &[SurvivalRecord],
) -> Result<(f64, f64)> {
    let z = z_value(confidence)?;
    let peak = log_likelihood(scale, records);
    if !peak.is_finite() {
        return Err(AnalysisError::DegenerateInput(
            "log-likelihood is not finite at the scale estimate".to_string(),
        ));
    }
    // χ²(c, 1) is the square of the two-sided normal quantile
    let target = peak - z * z / 2.0;
    let excess = |theta: f64| log_likelihood(theta, records) - target;

    let lower = bracket_root(&excess, scale, 0.5)?;
    let upper = bracket_root(&excess, scale, 2.0)?;
    Ok((lower, upper))
}

/// Step away from `inside` by `factor` until `excess` changes sign, then
/// bisect.
fn bracket_root<F: Fn(f64) -> f64>(excess: &F, inside: f64, factor: f64) -> Result<f64> {
    let mut near = inside;
    let mut far = inside * factor;
    let mut found = false;
    for _ in 0..MAX_BRACKETS {
        // NaN at a tiny scale counts as outside
        if !(excess(far) > 0.0) {
            found = true;
            break;
        }
        near = far;
        far *= factor;
    }
    if !found {
        return Err(AnalysisError::DegenerateInput(
            "likelihood bound could not be bracketed".to_string(),
        ));
    }

    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (near + far);
        if excess(mid) > 0.0 {
            near = mid;
        } else {
            far = mid;
        }
        if (far - near).abs() <= f64::EPSILON * mid.abs() {
            break;
        }
    }
    Ok(0.5 * (near + far))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_functions() {
        assert_eq!(get_hazard_rate(100.0, 0.0, 10.0), 0.01);
        assert_eq!(get_mtbf(100.0, 5.0), 105.0);
        assert!((get_survival(100.0, 0.0, 100.0) - (-1.0f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_time_zero() {
        assert_eq!(get_hazard_rate(100.0, 0.0, 0.0), 0.0);
        assert_eq!(get_survival(100.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_zero_scale_is_nan() {
        assert!(get_hazard_rate(0.0, 0.0, 10.0).is_nan());
        assert!(get_mtbf(0.0, 0.0).is_nan());
        assert!(get_survival(0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_fit_exact() {
        let data = [16.0, 34.0, 53.0, 75.0, 93.0, 120.0, 150.0, 191.0, 240.0, 339.0];
        let fit = do_fit(&data, FitMethod::Mle, None).unwrap();
        assert!((fit.scale - 131.1).abs() < 1e-9);
        let fit = do_fit(&data, FitMethod::Mm, Some(10.0)).unwrap();
        assert!((fit.scale - 121.1).abs() < 1e-9);
        assert_eq!(fit.location, 10.0);
    }

    #[test]
    fn test_fit_censored() {
        let records = [
            SurvivalRecord { left: 0.0, right: 100.0, quantity: 2, status: Status::Event },
            SurvivalRecord { left: 0.0, right: 300.0, quantity: 1, status: Status::RightCensored },
            SurvivalRecord { left: 100.0, right: 200.0, quantity: 1, status: Status::IntervalCensored },
        ];
        let fit = do_fit_censored(&records).unwrap();
        assert!((fit.scale - 650.0 / 3.0).abs() < 1e-9);

        let censored_only = [SurvivalRecord {
            left: 0.0,
            right: 300.0,
            quantity: 1,
            status: Status::RightCensored,
        }];
        assert!(do_fit_censored(&censored_only).is_err());
    }

    fn event(time: f64, quantity: u32) -> SurvivalRecord {
        SurvivalRecord { left: 0.0, right: time, quantity, status: Status::Event }
    }

    #[test]
    fn test_mle_statistics() {
        let records = [
            event(100.0, 2),
            SurvivalRecord { left: 0.0, right: 300.0, quantity: 1, status: Status::RightCensored },
        ];
        let fit = do_mle(&records, 0.0, f64::INFINITY).unwrap();
        assert_eq!(fit.parameters.scale, 250.0);
        assert_eq!((fit.n_failures, fit.n_suspensions), (2, 1));
        assert!((fit.scale_variance - 31_250.0).abs() < 1e-5 * 31_250.0);
        assert!((fit.goodness.log_likelihood - -13.042_921_835_724_492).abs() < 1e-12);
        assert!((fit.goodness.aic - 28.085_843_671_448_984).abs() < 1e-12);
        assert!((fit.goodness.bic - 27.184_455_960_117_095).abs() < 1e-12);
    }

    #[test]
    fn test_mle_window() {
        let records = [event(5.0, 1), event(100.0, 2), event(900.0, 1)];
        let fit = do_mle(&records, 0.0, 500.0).unwrap();
        assert!((fit.parameters.scale - 205.0 / 3.0).abs() < 1e-12);
        assert_eq!(fit.n_failures, 3);

        let late = [SurvivalRecord { left: 50.0, right: 60.0, quantity: 1, status: Status::IntervalCensored }];
        assert!(do_mle(&late, 0.0, 40.0).is_err());
        assert!(do_mle(&late, 10.0, 100.0).is_ok());
    }

    #[test]
    fn test_likelihood_bounds() {
        let times = [16.0, 34.0, 53.0, 75.0, 93.0, 120.0, 150.0, 191.0, 240.0, 339.0];
        let records: Vec<SurvivalRecord> = times.iter().map(|t| event(*t, 1)).collect();
        let (lower, upper) = likelihood_bounds(131.1, 0.9, &records).unwrap();
        assert!((lower - 81.227_725_915_915_24).abs() < 1e-6);
        assert!((upper - 231.687_333_304_582_47).abs() < 1e-6);

        let (lower_pct, upper_pct) = likelihood_bounds(131.1, 90.0, &records).unwrap();
        assert_eq!((lower, upper), (lower_pct, upper_pct));
        assert!(likelihood_bounds(0.0, 0.9, &records).is_err());
    }
}
