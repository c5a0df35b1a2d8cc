//! Analysis CLI commands: allocate, criticality, growth, bounds, fit

use super::util::{
    load_config, parse_flag_value, parse_number, parse_output_arg, positional, read_input,
    render, write_output,
};
use ramstk_engine::statistics::exponential::{self, ExponentialMle, SurvivalRecord};
use ramstk_engine::statistics::{normal, weibull};
use ramstk_engine::{
    calculate_hri, calculate_mode_criticality, calculate_mode_hazard_rate, calculate_rpn,
    calculate_user_defined, do_allocate, do_calculate_beta_bounds, growth, AllocationChild,
    AllocationParent, FitMethod, FitResult, GoodnessOfFit, GrowthRequest, Result,
    UserDefinedInputs,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Input file for `ramstk allocate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AllocationRequest {
    pub parent: AllocationParent,
    #[serde(default)]
    pub children: Vec<AllocationChild>,
}

pub fn cmd_allocate(args: &[String]) -> Result<()> {
    let files = positional(args);
    let Some(input_path) = files.first() else {
        return Err("Usage: ramstk allocate <input.yaml> [--json]".into());
    };

    let request: AllocationRequest = read_input(input_path)?;
    tracing::info!(
        input = %input_path,
        children = request.children.len(),
        method = request.parent.allocation_method_id,
        "allocating goal"
    );
    let result = do_allocate(&request.parent, &request.children)?;

    let content = render(args, &result, |r| {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Goals: R = {}, h = {}, MTBF = {}",
            r.goals.reliability_goal, r.goals.hazard_rate_goal, r.goals.mtbf_goal
        );
        let _ = writeln!(
            out,
            "{:>4}  {:>12}  {:>14}  {:>14}  {:>12}",
            "#", "weight", "hazard_rate", "mtbf", "reliability"
        );
        for (i, child) in r.children.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>4}  {:>12.6}  {:>14.6e}  {:>14.4}  {:>12.6}",
                i + 1,
                child.weight_factor,
                child.hazard_rate_alloc,
                child.mtbf_alloc,
                child.reliability_alloc
            );
        }
        out.trim_end().to_string()
    })?;
    write_output(&parse_output_arg(args), &content)
}

pub fn cmd_criticality(args: &[String]) -> Result<()> {
    let values = positional(args);
    let usage = "Usage: ramstk criticality <rpn|hri|mode|user> ...";
    let Some(subcommand) = values.first() else {
        return Err(usage.into());
    };

    let content = match *subcommand {
        "rpn" => {
            if values.len() < 4 {
                return Err("Usage: ramstk criticality rpn <severity> <occurrence> <detection>".into());
            }
            let rpn = calculate_rpn(
                parse_number("severity", values[1])?,
                parse_number("occurrence", values[2])?,
                parse_number("detection", values[3])?,
            )?;
            render(args, &serde_json::json!({ "rpn": rpn }), |_| format!("RPN: {}", rpn))?
        }
        "hri" => {
            if values.len() < 3 {
                return Err("Usage: ramstk criticality hri <probability> <severity>".into());
            }
            let hri = calculate_hri(values[1], values[2])?;
            render(args, &serde_json::json!({ "hri": hri }), |_| format!("HRI: {}", hri))?
        }
        "mode" => {
            if values.len() < 5 {
                return Err(
                    "Usage: ramstk criticality mode <item_hr> <mode_ratio> <op_time> <effect_probability>"
                        .into(),
                );
            }
            let mode_hazard_rate = calculate_mode_hazard_rate(
                parse_number("item_hr", values[1])?,
                parse_number("mode_ratio", values[2])?,
            )?;
            let mode_criticality = calculate_mode_criticality(
                mode_hazard_rate,
                parse_number("op_time", values[3])?,
                parse_number("effect_probability", values[4])?,
            )?;
            let report = serde_json::json!({
                "mode_hazard_rate": mode_hazard_rate,
                "mode_criticality": mode_criticality,
            });
            render(args, &report, |_| {
                format!(
                    "mode_hazard_rate {}\nmode_criticality {}",
                    mode_hazard_rate, mode_criticality
                )
            })?
        }
        "user" => {
            let Some(input_path) = values.get(1) else {
                return Err("Usage: ramstk criticality user <input.yaml>".into());
            };
            let config = load_config(args)?;
            let inputs: UserDefinedInputs = read_input(input_path)?;
            let results = calculate_user_defined(&inputs, &config.equation)?;
            render(args, &results, |r| {
                r.iter()
                    .enumerate()
                    .map(|(i, value)| format!("res{} {}", i + 1, value))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?
        }
        other => {
            return Err(format!("Unknown criticality analysis: {}. {}", other, usage).into());
        }
    };
    write_output(&parse_output_arg(args), &content)
}

pub fn cmd_growth(args: &[String]) -> Result<()> {
    let files = positional(args);
    let Some(input_path) = files.first() else {
        return Err("Usage: ramstk growth <input.yaml> [--json]".into());
    };

    let request: GrowthRequest = read_input(input_path)?;
    request.sample.validate()?;
    tracing::info!(
        input = %input_path,
        model = ?request.model,
        failures = request.sample.total_failures(),
        "assessing reliability growth"
    );
    let assessment = growth::assess(&request)?;

    let content = render(args, &assessment, |a| {
        let mut out = String::new();
        let _ = writeln!(out, "Model: {:?}", request.model);
        let _ = writeln!(out, "  scale              {}", a.scale);
        let _ = writeln!(out, "  shape              {}", a.shape);
        let _ = writeln!(out, "  cumulative mean    {}", a.cumulative_mean);
        let _ = writeln!(out, "  instantaneous mean {}", a.instantaneous_mean);
        if let Some(se) = &a.standard_error {
            let _ = writeln!(out, "  se(ln beta)        {}", se.se_ln_beta);
            let _ = writeln!(out, "  se(alpha)          {}", se.se_alpha);
        }
        if let Some(chi_square) = a.chi_square {
            let _ = writeln!(out, "  chi-square         {}", chi_square);
        }
        if let (Some(statistic), Some(critical)) = (a.cramer_vonmises, a.cramer_vonmises_critical) {
            let verdict = if statistic <= critical { "accept" } else { "reject" };
            let _ = writeln!(
                out,
                "  Cramer-von Mises   {} (critical {}, {})",
                statistic, critical, verdict
            );
        }
        out.trim_end().to_string()
    })?;
    write_output(&parse_output_arg(args), &content)
}

pub fn cmd_bounds(args: &[String]) -> Result<()> {
    let values = positional(args);
    if values.len() < 4 {
        return Err("Usage: ramstk bounds <min> <mode> <max> <confidence>".into());
    }
    let bounds = do_calculate_beta_bounds(
        parse_number("min", values[0])?,
        parse_number("mode", values[1])?,
        parse_number("max", values[2])?,
        parse_number("confidence", values[3])?,
    )?;
    let content = render(args, &bounds, |b| {
        format!(
            "mean {} [{}, {}]\nstd_dev {}",
            b.mean, b.mean_ll, b.mean_ul, b.std_dev
        )
    })?;
    write_output(&parse_output_arg(args), &content)
}

/// Input file for `ramstk fit`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FitRequest {
    /// Exact failure times
    #[serde(default)]
    pub data: Vec<f64>,
    /// Fixed location; the data are shifted by it before fitting
    #[serde(default)]
    pub floc: Option<f64>,
    /// Censored survival records (exponential only), used instead of `data`
    #[serde(default)]
    pub records: Vec<SurvivalRecord>,
    /// Records starting before this time are left out
    #[serde(default)]
    pub start: Option<f64>,
    /// Records ending after this time are left out
    #[serde(default)]
    pub end: Option<f64>,
    /// Confidence for likelihood-ratio bounds on the scale
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
struct FitReport {
    distribution: String,
    method: FitMethod,
    #[serde(flatten)]
    parameters: FitResult,
    mtbf: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_variance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    goodness: Option<GoodnessOfFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_bounds: Option<(f64, f64)>,
}

/// Exponential maximum likelihood over survival records, with
/// likelihood-ratio bounds when a confidence is given
pub fn fit_records(request: &FitRequest) -> Result<(ExponentialMle, Option<(f64, f64)>)> {
    let start = request.start.unwrap_or(0.0);
    let end = request.end.unwrap_or(f64::INFINITY);
    let mle = exponential::do_mle(&request.records, start, end)?;
    let bounds = match request.confidence {
        Some(confidence) => {
            let window = exponential::records_in_window(&request.records, start, end);
            Some(exponential::likelihood_bounds(
                mle.parameters.scale,
                confidence,
                &window,
            )?)
        }
        None => None,
    };
    Ok((mle, bounds))
}

pub fn fit(distribution: &str, request: &FitRequest, method: FitMethod) -> Result<(FitResult, f64)> {
    match distribution {
        "exponential" => {
            let p = exponential::do_fit(&request.data, method, request.floc)?;
            Ok((p, exponential::get_mtbf(p.scale, p.location)))
        }
        "normal" => {
            let p = normal::do_fit(&request.data, method, request.floc)?;
            Ok((p, normal::get_mtbf(p.location, p.scale)))
        }
        "weibull" => {
            let p = weibull::do_fit(&request.data, method, request.floc)?;
            Ok((p, weibull::get_mtbf(p.shape, p.scale, p.location)))
        }
        other => Err(format!(
            "Unknown distribution: {}. Use 'exponential', 'normal' or 'weibull'.",
            other
        )
        .into()),
    }
}

pub fn cmd_fit(args: &[String]) -> Result<()> {
    let values = positional(args);
    if values.len() < 2 {
        return Err(
            "Usage: ramstk fit <exponential|normal|weibull> <input.yaml> [--method MLE|MM]".into(),
        );
    }
    let method: FitMethod = parse_flag_value(args, "--method", None)
        .unwrap_or("MLE")
        .parse()?;
    let request: FitRequest = read_input(values[1])?;
    tracing::info!(
        distribution = values[0],
        ?method,
        points = request.data.len(),
        "fitting life distribution"
    );

    let report = if request.records.is_empty() {
        let (parameters, mtbf) = fit(values[0], &request, method)?;
        FitReport {
            distribution: values[0].to_string(),
            method,
            parameters,
            mtbf,
            scale_variance: None,
            goodness: None,
            scale_bounds: None,
        }
    } else {
        if values[0] != "exponential" {
            return Err(
                "Survival records can only be fitted to the exponential distribution".into(),
            );
        }
        let (mle, scale_bounds) = fit_records(&request)?;
        tracing::debug!(
            failures = mle.n_failures,
            suspensions = mle.n_suspensions,
            "fitted survival records"
        );
        FitReport {
            distribution: values[0].to_string(),
            method: FitMethod::Mle,
            parameters: mle.parameters,
            mtbf: exponential::get_mtbf(mle.parameters.scale, mle.parameters.location),
            scale_variance: Some(mle.scale_variance),
            goodness: Some(mle.goodness),
            scale_bounds,
        }
    };
    let content = render(args, &report, |r| {
        let mut out = format!(
            "{} ({:?})\n  shape    {}\n  scale    {}\n  location {}\n  MTBF     {}",
            r.distribution,
            r.method,
            r.parameters.shape,
            r.parameters.scale,
            r.parameters.location,
            r.mtbf
        );
        if let Some(variance) = r.scale_variance {
            let _ = write!(out, "\n  var(scale) {}", variance);
        }
        if let Some(g) = &r.goodness {
            let _ = write!(out, "\n  lnL {}  AIC {}  BIC {}", g.log_likelihood, g.aic, g.bic);
        }
        if let Some((lower, upper)) = r.scale_bounds {
            let _ = write!(out, "\n  scale bounds [{}, {}]", lower, upper);
        }
        out
    })?;
    write_output(&parse_output_arg(args), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramstk_engine::attributes;

    #[test]
    fn test_allocation_request() {
        let request: AllocationRequest = attributes::from_text(
            r#"
parent:
  allocation_method_id: 1
  goal_measure_id: 1
  reliability_goal: 0.99
  mission_time: 10.0
children:
  - {}
  - mission_time: 10.0
"#,
        )
        .unwrap();
        assert_eq!(request.children.len(), 2);
        assert_eq!(request.children[0], AllocationChild::default());
        let result = do_allocate(&request.parent, &request.children).unwrap();
        assert_eq!(result.children.len(), 2);
    }

    #[test]
    fn test_criticality_usage() {
        assert!(cmd_criticality(&[]).is_err());
        let args = vec!["rpn".to_string(), "7".to_string()];
        assert!(cmd_criticality(&args).unwrap_err().to_string().starts_with("Usage"));
        let args = vec!["fmeca".to_string()];
        assert!(cmd_criticality(&args).is_err());
    }

    #[test]
    fn test_bounds_rejects_bad_confidence() {
        let args: Vec<String> = ["10", "20", "40", "100"].iter().map(|s| s.to_string()).collect();
        assert!(cmd_bounds(&args).is_err());
    }

    #[test]
    fn test_fit_dispatch() {
        let request = FitRequest {
            data: vec![10.0, 20.0, 30.0, 40.0],
            ..Default::default()
        };
        let (p, mtbf) = fit("exponential", &request, FitMethod::Mle).unwrap();
        assert_eq!(p.scale, 25.0);
        assert_eq!(mtbf, 25.0);
        let (p, mtbf) = fit("normal", &request, FitMethod::Mm).unwrap();
        assert_eq!(p.location, 25.0);
        assert_eq!(mtbf, 25.0);
        assert!(fit("lognormal", &request, FitMethod::Mle).is_err());
    }

    #[test]
    fn test_fit_records() {
        let request: FitRequest = attributes::from_text(
            r#"
records:
  - {right: 100.0, quantity: 2, status: event}
  - {right: 300.0, status: right_censored}
  - {right: 900.0, status: event}
end: 500.0
confidence: 0.9
"#,
        )
        .unwrap();
        let (mle, bounds) = fit_records(&request).unwrap();
        assert_eq!(mle.parameters.scale, 250.0);
        assert_eq!(mle.n_suspensions, 1);
        let (lower, upper) = bounds.unwrap();
        assert!(lower < 250.0 && 250.0 < upper);

        let no_bounds = FitRequest {
            confidence: None,
            ..request
        };
        assert!(fit_records(&no_bounds).unwrap().1.is_none());
    }
}
