//! CLI utility helpers

use ramstk_engine::{attributes, AnalysisError, EngineConfig, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Value following a `--flag`, if present
pub fn parse_flag_value<'a>(args: &'a [String], long: &str, short: Option<&str>) -> Option<&'a str> {
    for (i, arg) in args.iter().enumerate() {
        if arg == long || Some(arg.as_str()) == short {
            return args.get(i + 1).map(|s| s.as_str());
        }
    }
    None
}

/// Parse --output argument to determine output file path
pub fn parse_output_arg(args: &[String]) -> Option<PathBuf> {
    parse_flag_value(args, "--output", Some("-o")).map(PathBuf::from)
}

pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Positional arguments, skipping flags and their values
pub fn positional(args: &[String]) -> Vec<&str> {
    const VALUED: [&str; 6] = ["--output", "-o", "--config", "--method", "--environment", "-e"];
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
        } else if VALUED.contains(&arg.as_str()) {
            skip = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

/// Parse a numeric argument, naming it in the error
pub fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AnalysisError::Type(format!("{} must be a number, got '{}'", name, value)))
}

/// Read a YAML or JSON input file into a typed value
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content = fs::read_to_string(path)?;
    attributes::from_text(&content)
}

/// `--config <file>` if given, else `ramstk.yaml` in the working directory
pub fn load_config(args: &[String]) -> Result<EngineConfig> {
    if let Some(path) = parse_flag_value(args, "--config", None) {
        return EngineConfig::load(Path::new(path));
    }
    let current_dir = std::env::current_dir()?;
    Ok(EngineConfig::load_from_dir(&current_dir)?.unwrap_or_default())
}

/// Render as pretty JSON when `--json` is given, otherwise with `text`
pub fn render<T: Serialize>(args: &[String], value: &T, text: impl FnOnce(&T) -> String) -> Result<String> {
    if has_flag(args, "--json") {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}

/// Write content to file or stdout
pub fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
