//! Reliability growth: Duane and Crow-AMSAA estimation, SPLAN planning
//!
//! The Duane model writes cumulative MTBF as `β·T^α` (β scale, α shape).
//! Crow-AMSAA writes cumulative failure intensity as `λ·T^(β-1)` with λ as
//! the scale and β as the shape, so the two models swap the meaning of the
//! Greek letters. Functions keep each model's own convention.

pub mod crow_amsaa;
pub mod duane;
pub mod splan;

use crate::error::{AnalysisError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Failure counts at strictly increasing cumulative test times
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrowthSample {
    pub n_failures: Vec<u32>,
    pub fail_times: Vec<f64>,
}

impl GrowthSample {
    pub fn new(n_failures: Vec<u32>, fail_times: Vec<f64>) -> Self {
        Self {
            n_failures,
            fail_times,
        }
    }

    pub fn total_failures(&self) -> u32 {
        self.n_failures.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fail_times.is_empty() || self.total_failures() == 0
    }

    /// Check the two sequences line up and times are positive and increasing
    pub fn validate(&self) -> Result<()> {
        validate(&self.n_failures, &self.fail_times)
    }
}

pub(crate) fn validate(n_failures: &[u32], fail_times: &[f64]) -> Result<()> {
    check_times(n_failures, fail_times, true)
}

/// Like [`validate`], but repeated times are allowed
pub(crate) fn validate_non_decreasing(n_failures: &[u32], fail_times: &[f64]) -> Result<()> {
    check_times(n_failures, fail_times, false)
}

fn check_times(n_failures: &[u32], fail_times: &[f64], strict: bool) -> Result<()> {
    if n_failures.len() != fail_times.len() {
        return Err(AnalysisError::DegenerateInput(format!(
            "{} failure counts but {} failure times",
            n_failures.len(),
            fail_times.len()
        )));
    }
    let mut previous = 0.0;
    for (i, time) in fail_times.iter().enumerate() {
        let out_of_order = if strict || i == 0 {
            *time <= previous
        } else {
            *time < previous
        };
        if out_of_order {
            let bound = if strict || i == 0 { ">" } else { ">=" };
            return Err(AnalysisError::range(
                "fail_times",
                *time,
                format!("{} {}", bound, previous),
            ));
        }
        previous = *time;
    }
    Ok(())
}

/// Growth model to assess a sample with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GrowthModel {
    Duane,
    CrowAmsaa,
}

/// Request for a growth assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrowthRequest {
    pub model: GrowthModel,
    #[serde(flatten)]
    pub sample: GrowthSample,
    /// Crow-AMSAA only: failure times are interval end points
    #[serde(default)]
    pub grouped: bool,
    /// Crow-AMSAA only: termination time of a time-terminated test
    #[serde(default)]
    pub t_star: f64,
    /// Crow-AMSAA only: confidence for the Cramér-von Mises critical value
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    0.9
}

/// Estimated parameters and means at the end of the sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrowthAssessment {
    pub scale: f64,
    pub shape: f64,
    pub cumulative_mean: f64,
    pub instantaneous_mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_error: Option<duane::DuaneStandardError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chi_square: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cramer_vonmises: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cramer_vonmises_critical: Option<f64>,
}

pub fn assess(request: &GrowthRequest) -> Result<GrowthAssessment> {
    let sample = &request.sample;
    let end = sample.fail_times.last().copied().unwrap_or(0.0);
    match request.model {
        GrowthModel::Duane => {
            let (beta, alpha) =
                duane::calculate_duane_parameters(&sample.n_failures, &sample.fail_times)?;
            let (cumulative_mean, instantaneous_mean) =
                duane::calculate_duane_mean(end, alpha, beta);
            let standard_error = if sample.is_empty() {
                None
            } else {
                Some(duane::calculate_duane_standard_error(
                    &sample.n_failures,
                    &sample.fail_times,
                    alpha,
                    beta,
                )?)
            };
            Ok(GrowthAssessment {
                scale: beta,
                shape: alpha,
                cumulative_mean,
                instantaneous_mean,
                standard_error,
                ..Default::default()
            })
        }
        GrowthModel::CrowAmsaa => {
            let (alpha, beta) = crow_amsaa::calculate_crow_amsaa_parameters(
                &sample.n_failures,
                &sample.fail_times,
                request.t_star,
                request.grouped,
            )?;
            let (cumulative_mean, instantaneous_mean) =
                crow_amsaa::calculate_crow_amsaa_mean(end, alpha, beta);
            let ttt = if request.t_star > 0.0 { request.t_star } else { end };
            let chi_square = crow_amsaa::calculate_crow_amsaa_chi_square(
                &sample.n_failures,
                &sample.fail_times,
                beta,
                ttt,
                request.grouped,
            );
            let (cramer_vonmises, cramer_vonmises_critical) = if request.grouped || sample.is_empty() {
                (None, None)
            } else {
                let statistic = crow_amsaa::calculate_cramer_vonmises(
                    &sample.n_failures,
                    &sample.fail_times,
                    beta,
                    request.t_star,
                    request.t_star <= 0.0,
                )?;
                let critical = crow_amsaa::cramer_vonmises_critical_value(
                    sample.total_failures(),
                    request.confidence,
                )?;
                (Some(statistic), Some(critical))
            };
            Ok(GrowthAssessment {
                scale: alpha,
                shape: beta,
                cumulative_mean,
                instantaneous_mean,
                standard_error: None,
                chi_square: Some(chi_square),
                cramer_vonmises,
                cramer_vonmises_critical,
            })
        }
    }
}
