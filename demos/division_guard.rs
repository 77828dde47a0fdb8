// demos/division_guard.rs
use slotcalc::driver::{run, Outcome, RunConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Same buffer lifecycle, once with a valid divisor and once without.
    for b in [5, 0] {
        let report = run(RunConfig::default().with_operation(10, '/', b));
        println!("{}", report);
        match report.outcome {
            Outcome::Computed { value, .. } => println!("  -> value {}", value),
            Outcome::EvaluationFailed(err) => println!("  -> no value: {}", err),
            Outcome::AllocationFailed(err) => println!("  -> nothing ran: {}", err),
        }
        println!("  trace: {:?}", report.trace.visited());
    }
}
