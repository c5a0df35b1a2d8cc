//! Derating CLI command

use super::util::{
    load_config, parse_flag_value, parse_number, parse_output_arg, positional, read_input,
    render, write_output,
};
use ramstk_engine::tables::DERATING_ENVIRONMENTS;
use ramstk_engine::{do_derating_analysis, DeratingInput, Result};

pub fn cmd_derate(args: &[String]) -> Result<()> {
    let files = positional(args);
    let Some(input_path) = files.first() else {
        return Err("Usage: ramstk derate <input.yaml> [--environment <1|2|3>] [--json]".into());
    };
    let environment_id: i64 = match parse_flag_value(args, "--environment", Some("-e")) {
        Some(value) => parse_number("environment", value)?,
        None => 1,
    };

    let config = load_config(args)?;
    let limits = config.stress_limits()?;
    let input: DeratingInput = read_input(input_path)?;
    tracing::info!(input = %input_path, environment_id, "running derating analysis");

    let result = do_derating_analysis(environment_id, &input, &limits)?;
    if result.overstress {
        tracing::warn!(input = %input_path, "component is overstressed");
    }

    let content = render(args, &result, |r| {
        let environment = usize::try_from(environment_id - 1)
            .ok()
            .and_then(|i| DERATING_ENVIRONMENTS.get(i))
            .copied()
            .unwrap_or("?");
        if r.overstress {
            format!("Environment: {}\nOverstress: yes\n{}", environment, r.reason.trim_end())
        } else {
            format!("Environment: {}\nOverstress: no", environment)
        }
    })?;
    write_output(&parse_output_arg(args), &content)
}
