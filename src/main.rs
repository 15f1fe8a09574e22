use impactsim::{ScenarioConfig, Scenario};
use impactsim::run_headless;
use impactsim::bench_step;

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file; bare names are looked up under `scenarios/`
    #[arg(short, default_value = "bouncing.yaml")]
    file_name: String,

    /// Time `World::step` for a range of body counts instead of running a scenario
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.is_absolute() || direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();

    if args.bench {
        bench_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = run_headless(&mut scenario, &mut out)?;
    out.flush()?;

    log::info!(
        "{} bodies, {} steps, t = {:.4}",
        summary.bodies,
        summary.steps,
        summary.elapsed
    );

    Ok(())
}
