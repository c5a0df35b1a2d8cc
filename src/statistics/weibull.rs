//! Two- and three-parameter Weibull distribution

use super::{shifted, FitMethod, FitResult, LifeDistribution};
use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use statrs::function::gamma::gamma;

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Weibull {
    pub shape: f64,
    pub scale: f64,
    #[serde(default)]
    pub location: f64,
}

impl LifeDistribution for Weibull {
    fn hazard_rate(&self, time: f64) -> f64 {
        get_hazard_rate(self.shape, self.scale, self.location, time)
    }

    fn mtbf(&self) -> f64 {
        get_mtbf(self.shape, self.scale, self.location)
    }

    fn survival(&self, time: f64) -> f64 {
        get_survival(self.shape, self.scale, self.location, time)
    }
}

fn degenerate(shape: f64, scale: f64) -> bool {
    !(shape > 0.0 && scale > 0.0)
}

pub fn get_hazard_rate(shape: f64, scale: f64, location: f64, time: f64) -> f64 {
    if degenerate(shape, scale) {
        return f64::NAN;
    }
    let t = time - location;
    if t <= 0.0 {
        return 0.0;
    }
    (shape / scale) * (t / scale).powf(shape - 1.0)
}

/// `location + scale · Γ(1 + 1/shape)`
pub fn get_mtbf(shape: f64, scale: f64, location: f64) -> f64 {
    if degenerate(shape, scale) {
        return f64::NAN;
    }
    location + scale * gamma(1.0 + 1.0 / shape)
}

pub fn get_survival(shape: f64, scale: f64, location: f64, time: f64) -> f64 {
    if degenerate(shape, scale) {
        return f64::NAN;
    }
    let t = time - location;
    if t <= 0.0 {
        return 1.0;
    }
    (-(t / scale).powf(shape)).exp()
}

/// Fit exact failure times.
///
/// `Mle` solves the profile likelihood for the shape by Newton iteration;
/// `Mm` is median-rank regression using Benard's approximation.
pub fn do_fit(data: &[f64], method: FitMethod, floc: Option<f64>) -> Result<FitResult> {
    let times = shifted(data, floc, 2)?;
    if let Some(bad) = times.iter().find(|t| **t <= 0.0) {
        return Err(AnalysisError::range("failure time", *bad, "> location"));
    }
    let (shape, scale) = match method {
        FitMethod::Mle => fit_mle(&times)?,
        FitMethod::Mm => fit_rank_regression(&times),
    };
    Ok(FitResult {
        shape,
        scale,
        location: floc.unwrap_or(0.0),
    })
}

fn fit_mle(times: &[f64]) -> Result<(f64, f64)> {
    let n = times.len() as f64;
    let logs: Vec<f64> = times.iter().map(|t| t.ln()).collect();
    let mean_log = logs.iter().sum::<f64>() / n;

    let mut shape = 1.0;
    for _ in 0..MAX_ITERATIONS {
        let (mut s0, mut s1, mut s2) = (0.0, 0.0, 0.0);
        for (t, l) in times.iter().zip(&logs) {
            let w = t.powf(shape);
            s0 += w;
            s1 += w * l;
            s2 += w * l * l;
        }
        let g = s1 / s0 - 1.0 / shape - mean_log;
        let dg = (s2 * s0 - s1 * s1) / (s0 * s0) + 1.0 / (shape * shape);
        let step = g / dg;
        shape -= step;
        if !shape.is_finite() || shape <= 0.0 {
            break;
        }
        if step.abs() < TOLERANCE {
            let scale = (times.iter().map(|t| t.powf(shape)).sum::<f64>() / n).powf(1.0 / shape);
            return Ok((shape, scale));
        }
    }
    Err(AnalysisError::DegenerateInput(
        "Weibull shape estimate did not converge".to_string(),
    ))
}

fn fit_rank_regression(times: &[f64]) -> (f64, f64) {
    let mut sorted = times.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;

    let xs: Vec<f64> = sorted.iter().map(|t| t.ln()).collect();
    let ys: Vec<f64> = (0..sorted.len())
        .map(|i| {
            let rank = (i as f64 + 1.0 - 0.3) / (n + 0.4);
            (-(1.0 - rank).ln()).ln()
        })
        .collect();
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let sxy: f64 = xs.iter().zip(&ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    let sxx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();

    let shape = sxy / sxx;
    (shape, (mx - my / shape).exp())
}
