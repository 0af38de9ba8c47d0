use std::path::PathBuf;

use clap::Parser;

use prisoner_bench::config::{ResolvedOutputs, SimulationConfig};
use prisoner_bench::logging::init_logging;
use prisoner_bench::simulation::SimulationRunner;

/// Seeded simulation harness for the hidden-chip deduction game.
#[derive(Debug, Parser)]
#[command(
    name = "prisoner-bench",
    author,
    version,
    about = "Deterministic hidden-chip round simulator"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to simulate.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for scenario generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no rounds are simulated).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.scenarios.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.scenarios.seed = Some(seed);
    }

    config.advisor = config.advisor.with_env_overrides();
    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.scenarios.rounds;
    let variant = config.scenarios.variant.as_str();

    println!("Loaded configuration '{run_id}' ({rounds} rounds, variant {variant})");

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SimulationRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} rounds → {} rows at {}",
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Overall success rate: {:.1}%", summary.success_rate * 100.0);
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(path) = summary.arbitration_path.as_ref() {
        println!("Arbitration table: {}", path.display());
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
