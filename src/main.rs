//! RAMSTK engine CLI - Command-line interface
//!
//! Commands:
//!   predict      - MIL-HDBK-217F hazard rate of one component
//!   derate       - Check a component against its stress limits
//!   dormancy     - Dormant hazard rate
//!   allocate     - Apportion a reliability goal to children
//!   criticality  - RPN, HRI, mode criticality, user equations
//!   growth       - Duane / Crow-AMSAA assessment
//!   bounds       - PERT beta confidence bounds
//!   fit          - Fit a life distribution to failure times
//!   tables       - Show the lookup tables in use

mod cli;

use cli::*;
use ramstk_engine::VERSION;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    tracing::debug!(command = %args[1], "dispatching");
    let result = match args[1].as_str() {
        "predict" => cmd_predict(&args[2..]),
        "derate" => cmd_derate(&args[2..]),
        "dormancy" => cmd_dormancy(&args[2..]),
        "allocate" => cmd_allocate(&args[2..]),
        "criticality" => cmd_criticality(&args[2..]),
        "growth" => cmd_growth(&args[2..]),
        "bounds" => cmd_bounds(&args[2..]),
        "fit" => cmd_fit(&args[2..]),
        "tables" => cmd_tables(&args[2..]),
        "schema" => cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("ramstk {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Log to stderr, filtered by `RAMSTK_LOG` (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_env("RAMSTK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_usage() {
    println!(
        r#"
RAMSTK engine - reliability prediction and derating calculations

USAGE:
    ramstk <COMMAND> [OPTIONS]

COMMANDS:
    predict <input.yaml> [--method part_count|part_stress]
                                      Hazard rate of one component
    derate <input.yaml> [--environment <1|2|3>]
                                      Check stress against derating limits
    dormancy <category> <subcategory> <env_active> <env_dormant> <hazard_rate>
                                      Dormant hazard rate
    allocate <input.yaml>             Apportion a goal to child items
    criticality rpn <S> <O> <D>       Risk priority number
    criticality hri <probability> <severity>
                                      Hazard risk index
    criticality mode <item_hr> <mode_ratio> <op_time> <effect_probability>
                                      Mode hazard rate and criticality
    criticality user <input.yaml>     Evaluate user-defined equations
    growth <input.yaml>               Duane or Crow-AMSAA assessment
    bounds <min> <mode> <max> <confidence>
                                      PERT beta confidence bounds
    fit <exponential|normal|weibull> <input.yaml> [--method MLE|MM]
                                      Fit a life distribution
    tables                            Show lookup tables and fingerprint
    schema [name]                     Print JSON schema for an input type

OPTIONS:
    --config <ramstk.yaml>            Engine configuration (default: ./ramstk.yaml)
    --output <file>                   Output file (default: stdout)
    --json                            JSON output format

ENVIRONMENT:
    RAMSTK_LOG                        Log filter, e.g. info or ramstk_engine=debug

EXAMPLES:
    ramstk predict resistor.yaml --method part_stress --json
    ramstk derate capacitor.yaml --environment 2
    ramstk criticality rpn 7 4 2
    ramstk bounds 10 20 40 95
    ramstk fit weibull failures.yaml --method MM
"#
    );
}
