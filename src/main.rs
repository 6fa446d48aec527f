use ballsim::{ScenarioConfig, Scenario};
use ballsim::run_2d;
use ballsim::bench_step;

use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run the step benchmark instead of the viewer
    #[arg(long)]
    bench: bool,

    /// Physics steps per second
    #[arg(long, default_value_t = 60.0)]
    hz: f64,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("loading scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_step();
        return Ok(());
    }

    anyhow::ensure!(args.hz.is_finite() && args.hz > 0.0, "--hz must be a positive number");

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;
    run_2d(scenario, args.hz);

    Ok(())
}
