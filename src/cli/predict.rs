//! Prediction CLI commands: predict, dormancy

use super::util::{
    load_config, parse_flag_value, parse_number, parse_output_arg, positional, read_input,
    render, write_output,
};
use ramstk_engine::milhdbk217f::{self, hazard_rate_logistics, mtbf};
use ramstk_engine::{
    calculate_dormant_hazard_rate, dormancy, Adjustments, Method, Prediction, PredictionInput,
    Result,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One component record: category inputs plus record-level adjustments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictRequest {
    #[serde(flatten)]
    pub adjustments: Adjustments,
    /// 1 = part count, 2 = part stress; `--method` overrides
    #[serde(default)]
    pub hazard_rate_method_id: Option<i64>,
    /// Dormant environment, when the part also spends time dormant
    #[serde(default)]
    pub environment_dormant_id: Option<i64>,
    #[serde(flatten)]
    pub component: PredictionInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictReport {
    pub category_id: i64,
    pub subcategory_id: i64,
    pub method: Method,
    #[serde(flatten)]
    pub prediction: Prediction,
    pub hazard_rate_adjusted: f64,
    pub hazard_rate_dormant: f64,
    pub hazard_rate_logistics: f64,
    pub mtbf_logistics: f64,
}

fn parse_method(args: &[String], request: &PredictRequest) -> Result<Method> {
    if let Some(name) = parse_flag_value(args, "--method", None) {
        return match name {
            "part_count" | "part-count" | "1" => Ok(Method::PartCount),
            "part_stress" | "part-stress" | "2" => Ok(Method::PartStress),
            other => Err(format!("Unknown method: {}. Use 'part_count' or 'part_stress'.", other).into()),
        };
    }
    match request.hazard_rate_method_id {
        Some(id) => Method::from_id(id),
        None => Ok(Method::PartStress),
    }
}

pub fn predict(request: &PredictRequest, method: Method, args: &[String]) -> Result<PredictReport> {
    let prediction = milhdbk217f::calculate(&request.component, method)?;
    let hazard_rate_adjusted =
        milhdbk217f::apply_adjustments(prediction.hazard_rate_active, &request.adjustments);

    let category_id = request.component.category_id();
    let subcategory_id = request.component.subcategory_id();
    let hazard_rate_dormant = match request.environment_dormant_id {
        Some(dormant_id) => {
            let table = load_config(args)?.dormancy();
            calculate_dormant_hazard_rate(
                &table,
                category_id,
                subcategory_id,
                environment_active_id(&request.component),
                dormant_id,
                hazard_rate_adjusted,
            )
        }
        None => 0.0,
    };
    let logistics = hazard_rate_logistics(hazard_rate_adjusted, hazard_rate_dormant, 0.0);

    Ok(PredictReport {
        category_id,
        subcategory_id,
        method,
        prediction,
        hazard_rate_adjusted,
        hazard_rate_dormant,
        hazard_rate_logistics: logistics,
        mtbf_logistics: mtbf(logistics),
    })
}

fn environment_active_id(component: &PredictionInput) -> i64 {
    match component {
        PredictionInput::IntegratedCircuit(i) => i.environment_active_id,
        PredictionInput::Semiconductor(i) => i.environment_active_id,
        PredictionInput::Resistor(i) => i.environment_active_id,
        PredictionInput::Inductor(i) => i.environment_active_id,
        PredictionInput::Meter(i) => i.environment_active_id,
    }
}

fn to_text(report: &PredictReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Category {} / subcategory {} ({:?})",
        report.category_id, report.subcategory_id, report.method
    );
    let _ = writeln!(out, "  lambda_b             {}", report.prediction.lambda_b);
    for (name, value) in &report.prediction.pi_factors {
        let _ = writeln!(out, "  {:<20} {}", name, value);
    }
    for (name, value) in &report.prediction.derived {
        let _ = writeln!(out, "  {:<20} {}", name, value);
    }
    let _ = writeln!(out, "hazard_rate_active     {}", report.prediction.hazard_rate_active);
    let _ = writeln!(out, "hazard_rate_adjusted   {}", report.hazard_rate_adjusted);
    if report.hazard_rate_dormant > 0.0 {
        let _ = writeln!(out, "hazard_rate_dormant    {}", report.hazard_rate_dormant);
    }
    let _ = write!(out, "MTBF                   {}", report.mtbf_logistics);
    out
}

pub fn cmd_predict(args: &[String]) -> Result<()> {
    let files = positional(args);
    let Some(input_path) = files.first() else {
        return Err("Usage: ramstk predict <input.yaml> [--method part_count|part_stress] [--json]".into());
    };

    let request: PredictRequest = read_input(input_path)?;
    let method = parse_method(args, &request)?;
    tracing::info!(input = %input_path, ?method, "predicting hazard rate");

    let report = predict(&request, method, args)?;
    let content = render(args, &report, to_text)?;
    write_output(&parse_output_arg(args), &content)
}

pub fn cmd_dormancy(args: &[String]) -> Result<()> {
    let values = positional(args);
    if values.len() < 5 {
        return Err(
            "Usage: ramstk dormancy <category> <subcategory> <env_active> <env_dormant> <hazard_rate>"
                .into(),
        );
    }
    let category_id: i64 = parse_number("category", values[0])?;
    let subcategory_id: i64 = parse_number("subcategory", values[1])?;
    let environment_active_id: i64 = parse_number("env_active", values[2])?;
    let environment_dormant_id: i64 = parse_number("env_dormant", values[3])?;
    let hazard_rate_active: f64 = parse_number("hazard_rate", values[4])?;

    let table = load_config(args)?.dormancy();
    let multiplier = dormancy::get_dormant_multiplier(
        &table,
        category_id,
        subcategory_id,
        environment_active_id,
        environment_dormant_id,
    );
    if multiplier == 0.0 {
        tracing::warn!(
            category_id,
            subcategory_id,
            environment_active_id,
            environment_dormant_id,
            "no dormancy multiplier for this combination"
        );
    }
    let report = serde_json::json!({
        "multiplier": multiplier,
        "hazard_rate_dormant": hazard_rate_active * multiplier,
    });
    let content = render(args, &report, |_| {
        format!(
            "multiplier {}\nhazard_rate_dormant {}",
            multiplier,
            hazard_rate_active * multiplier
        )
    })?;
    write_output(&parse_output_arg(args), &content)
}
