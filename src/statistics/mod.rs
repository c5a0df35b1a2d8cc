//! Life distributions, parameter fitting and confidence bounds
//!
//! Every distribution exposes the same three functions of its parameters:
//! hazard rate at a time, MTBF and survival at a time. Degenerate
//! parameters (a zero scale, a zero Weibull shape) yield NaN instead of an
//! error so that callers tabulating curves see the gap rather than a
//! failure. Times at or before zero give a hazard rate of 0 and a survival
//! of 1.

pub mod bounds;
pub mod exponential;
pub mod normal;
pub mod weibull;

use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use bounds::{do_calculate_beta_bounds, do_calculate_fisher_information, BetaBounds};

/// Parameter estimation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FitMethod {
    /// Maximum likelihood
    #[serde(rename = "MLE")]
    Mle,
    /// Method of moments (median-rank regression for Weibull)
    #[serde(rename = "MM")]
    Mm,
}

impl std::str::FromStr for FitMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MLE" | "mle" => Ok(FitMethod::Mle),
            "MM" | "mm" => Ok(FitMethod::Mm),
            other => Err(AnalysisError::lookup("fit methods", other)),
        }
    }
}

/// Fitted parameters. Unused parameters are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FitResult {
    pub shape: f64,
    pub scale: f64,
    pub location: f64,
}

/// Log-likelihood at the estimate with the Akaike and Bayesian criteria
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GoodnessOfFit {
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
}

impl GoodnessOfFit {
    /// `AIC = 2k - 2 ln L`, `BIC = k ln n - 2 ln L`
    pub fn new(log_likelihood: f64, n_parameters: usize, n_observations: usize) -> Self {
        let k = n_parameters as f64;
        GoodnessOfFit {
            log_likelihood,
            aic: 2.0 * k - 2.0 * log_likelihood,
            bic: k * (n_observations as f64).ln() - 2.0 * log_likelihood,
        }
    }
}

/// Shift data by a fixed location, requiring at least `min_len` points
pub(crate) fn shifted(data: &[f64], floc: Option<f64>, min_len: usize) -> Result<Vec<f64>> {
    if data.len() < min_len {
        return Err(AnalysisError::DegenerateInput(format!(
            "fitting needs at least {} observations, got {}",
            min_len,
            data.len()
        )));
    }
    let location = floc.unwrap_or(0.0);
    Ok(data.iter().map(|x| x - location).collect())
}

pub(crate) fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Shared shape of a life distribution
pub trait LifeDistribution {
    fn hazard_rate(&self, time: f64) -> f64;
    fn mtbf(&self) -> f64;
    fn survival(&self, time: f64) -> f64;
}
