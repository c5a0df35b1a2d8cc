//! Normal distribution; `location` is the mean and `scale` the standard deviation

use super::{mean, shifted, FitMethod, FitResult, LifeDistribution};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal as StatrsNormal};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Normal {
    pub location: f64,
    pub scale: f64,
}

impl LifeDistribution for Normal {
    fn hazard_rate(&self, time: f64) -> f64 {
        get_hazard_rate(self.location, self.scale, time)
    }

    fn mtbf(&self) -> f64 {
        get_mtbf(self.location, self.scale)
    }

    fn survival(&self, time: f64) -> f64 {
        get_survival(self.location, self.scale, time)
    }
}

fn distribution(location: f64, scale: f64) -> Option<StatrsNormal> {
    StatrsNormal::new(location, scale).ok()
}

/// `pdf / sf`
pub fn get_hazard_rate(location: f64, scale: f64, time: f64) -> f64 {
    match distribution(location, scale) {
        None => f64::NAN,
        Some(_) if time <= 0.0 => 0.0,
        Some(d) => d.pdf(time) / d.sf(time),
    }
}

pub fn get_mtbf(location: f64, scale: f64) -> f64 {
    match distribution(location, scale) {
        None => f64::NAN,
        Some(_) => location,
    }
}

pub fn get_survival(location: f64, scale: f64, time: f64) -> f64 {
    match distribution(location, scale) {
        None => f64::NAN,
        Some(_) if time <= 0.0 => 1.0,
        Some(d) => d.sf(time),
    }
}

/// Mean and population standard deviation; with `floc` the mean is fixed.
///
/// Maximum likelihood and moments coincide for the normal distribution.
pub fn do_fit(data: &[f64], _method: FitMethod, floc: Option<f64>) -> Result<FitResult> {
    let values = shifted(data, None, 2)?;
    let location = floc.unwrap_or_else(|| mean(&values));
    let variance =
        values.iter().map(|x| (x - location).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(FitResult {
        shape: 0.0,
        scale: variance.sqrt(),
        location,
    })
}
