use cdsim::{step, Scenario, ScenarioConfig};

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "chain.yaml")]
    file_name: String,

    /// Override the scenario's total simulated time
    #[arg(long)]
    t_end: Option<f64>,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let Scenario {
        parameters,
        mut state,
        forces,
        constraints,
    } = Scenario::build(scenario_cfg)?;

    let t_end = args.t_end.unwrap_or(parameters.t_end);

    let mut t = 0.0;
    let mut next_report = 0.0;

    while t < t_end {
        step(
            &mut state,
            &forces,
            &constraints,
            parameters.dt,
            parameters.sub_steps,
        );
        t += parameters.dt;

        if t >= next_report {
            println!("t = {t:8.3}, total error = {:.6e}", state.total_error);
            next_report += 1.0;
        }
    }

    println!("done at t = {t:.3}, final total error = {:.6e}", state.total_error);

    Ok(())
}
