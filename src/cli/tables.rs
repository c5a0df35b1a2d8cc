//! Table and schema CLI commands

use super::analysis::{AllocationRequest, FitRequest};
use super::predict::PredictRequest;
use super::util::{load_config, parse_output_arg, render, write_output};
use ramstk_engine::tables::{
    ACTIVE_ENVIRONMENTS, DERATING_ENVIRONMENTS, DORMANCY_COLUMNS, DORMANT_ENVIRONMENTS,
};
use ramstk_engine::{
    DeratingInput, DormancyTable, EngineConfig, GrowthRequest, Result, StressLimits,
    UserDefinedInputs,
};
use serde::Serialize;
use std::fmt::Write;

/// Which tables a run would use
#[derive(Debug, Serialize)]
struct TablesReport {
    stress_limit_families: Vec<String>,
    stress_limit_fingerprint: String,
    dormancy_part_types: Vec<String>,
    dormancy_columns: Vec<String>,
    active_environments: Vec<String>,
    dormant_environments: Vec<String>,
    derating_environments: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn report(limits: &StressLimits, dormancy: &DormancyTable) -> Result<TablesReport> {
    Ok(TablesReport {
        stress_limit_families: limits.families().map(String::from).collect(),
        stress_limit_fingerprint: limits.fingerprint()?,
        dormancy_part_types: dormancy.part_types().map(String::from).collect(),
        dormancy_columns: owned(&DORMANCY_COLUMNS),
        active_environments: owned(&ACTIVE_ENVIRONMENTS),
        dormant_environments: owned(&DORMANT_ENVIRONMENTS),
        derating_environments: owned(&DERATING_ENVIRONMENTS),
    })
}

fn numbered(out: &mut String, title: &str, names: &[String]) {
    let _ = writeln!(out, "{}:", title);
    for (i, name) in names.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}  {}", i + 1, name);
    }
}

pub fn cmd_tables(args: &[String]) -> Result<()> {
    let config = load_config(args)?;
    let limits = config.stress_limits()?;
    let report = report(&limits, &config.dormancy())?;

    let content = render(args, &report, |r| {
        let mut out = String::new();
        let _ = writeln!(out, "Stress limits ({})", r.stress_limit_fingerprint);
        let _ = writeln!(out, "  families: {}", r.stress_limit_families.join(", "));
        let _ = writeln!(out, "Dormancy multipliers");
        let _ = writeln!(out, "  part types: {}", r.dormancy_part_types.join(", "));
        let _ = writeln!(out, "  columns: {}", r.dormancy_columns.join(", "));
        numbered(&mut out, "Active environments", &r.active_environments);
        numbered(&mut out, "Dormant environments", &r.dormant_environments);
        numbered(&mut out, "Derating environments", &r.derating_environments);
        out.trim_end().to_string()
    })?;
    write_output(&parse_output_arg(args), &content)
}

pub fn cmd_schema(args: &[String]) -> Result<()> {
    let schema_name = args.first().map(|s| s.as_str()).unwrap_or("list");

    let schema = match schema_name {
        "list" => {
            println!(
                "Available schemas: prediction, derating, allocation, criticality, growth, fit, config"
            );
            return Ok(());
        }
        "prediction" | "predict" => schemars::schema_for!(PredictRequest),
        "derating" | "derate" => schemars::schema_for!(DeratingInput),
        "allocation" | "allocate" => schemars::schema_for!(AllocationRequest),
        "criticality" => schemars::schema_for!(UserDefinedInputs),
        "growth" => schemars::schema_for!(GrowthRequest),
        "fit" => schemars::schema_for!(FitRequest),
        "config" => schemars::schema_for!(EngineConfig),
        _ => return Err(format!("Unknown schema: {}", schema_name).into()),
    };
    write_output(&parse_output_arg(args), &serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_uses_builtin_tables() {
        let limits = StressLimits::builtin().unwrap();
        let report = report(&limits, &DormancyTable::builtin()).unwrap();
        assert_eq!(report.stress_limit_fingerprint.len(), 64);
        assert!(report.dormancy_part_types.contains(&"resistor".to_string()));
        assert_eq!(report.active_environments.len(), 14);
        assert_eq!(report.derating_environments[1], "Normal");
    }

    #[test]
    fn test_unknown_schema() {
        let args = vec!["fmea".to_string()];
        assert!(cmd_schema(&args).is_err());
    }
}
