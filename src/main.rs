use slotcalc::{run, RunConfig};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match RunConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: slotcalc [<a> <op> <b>]");
            return ExitCode::from(2);
        }
    };

    let report = run(config);
    println!("{}", report);
    ExitCode::from(report.exit_code())
}
