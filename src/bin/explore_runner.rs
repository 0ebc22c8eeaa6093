//! Headless Exploration Runner
//!
//! Runs one policy (or two side by side) over a generated world and prints
//! the result as JSON or text.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use frontier_explore::core::config::{load_scenario, ScenarioConfig};
use frontier_explore::core::error::Result;
use frontier_explore::scheduler::{compare_policies, Episode, EpisodeReport};
use frontier_explore::{PolicyKind, Simulation};
use tracing_subscriber::EnvFilter;

/// Headless Exploration Runner - frontier policies on a seeded grid world
#[derive(Parser, Debug)]
#[command(name = "explore_runner")]
#[command(about = "Run frontier exploration policies and report coverage, time and distance")]
struct Args {
    /// Scenario name (loaded from data/scenarios/)
    #[arg(long, default_value = "default")]
    scenario: String,

    /// Explicit scenario file; overrides --scenario
    #[arg(long)]
    config: Option<PathBuf>,

    /// Policy: nearest, ratio, lambda, hysteresis
    #[arg(long, default_value = "nearest")]
    policy: String,

    /// Second policy to run side by side on a clone of the same world
    #[arg(long)]
    compare: Option<String>,

    /// Random seed (overrides the scenario)
    #[arg(long)]
    seed: Option<u64>,

    /// Grid side length (overrides the scenario)
    #[arg(long)]
    size: Option<usize>,

    /// Use the single divided room layout
    #[arg(long)]
    simple_room: bool,

    /// Write the final world snapshot as JSON to this path (single runs only)
    #[arg(long, conflicts_with = "compare")]
    snapshot: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "frontier_explore=debug"
    } else {
        "frontier_explore=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();

    let mut scenario = match &args.config {
        Some(path) => ScenarioConfig::from_path(path)?,
        None => load_scenario(&args.scenario).unwrap_or_else(|e| {
            tracing::warn!("Failed to load scenario '{}': {}", args.scenario, e);
            tracing::warn!("Using default scenario");
            ScenarioConfig::default()
        }),
    };
    if let Some(seed) = args.seed {
        scenario.sim.seed = seed;
    }
    if let Some(size) = args.size {
        scenario.sim.size = size;
    }
    if args.simple_room {
        scenario.sim.simple_room_mode = true;
    }
    scenario.validate()?;

    let policy: PolicyKind = args.policy.parse()?;
    let challenger: Option<PolicyKind> = args
        .compare
        .as_deref()
        .map(str::parse::<PolicyKind>)
        .transpose()?;

    let mut sim = Simulation::new(scenario.sim.clone())?;
    tracing::info!(
        scenario = %scenario.name,
        size = scenario.sim.size,
        seed = scenario.sim.seed,
        clutter = sim.clutter(),
        "world generated"
    );

    let mut baseline = Episode::from_scenario(policy, &scenario);

    let output = match challenger {
        Some(kind) => {
            let mut other = Episode::from_scenario(kind, &scenario);
            let report = compare_policies(&sim, &mut baseline, &mut other);
            match args.format.as_str() {
                "text" => format!(
                    "{}\n{}\ncoverage delta: {:+.3}  elapsed delta: {:+.1}s",
                    format_text(&report.baseline),
                    format_text(&report.challenger),
                    report.coverage_delta(),
                    report.elapsed_delta()
                ),
                _ => serde_json::to_string_pretty(&report)?,
            }
        }
        None => {
            let report = baseline.run(&mut sim);
            if let Some(path) = &args.snapshot {
                fs::write(path, serde_json::to_string(&sim.snapshot())?)?;
                tracing::info!("Wrote snapshot to {:?}", path);
            }
            match args.format.as_str() {
                "text" => format_text(&report),
                _ => serde_json::to_string_pretty(&report)?,
            }
        }
    };

    println!("{}", output);
    Ok(())
}

fn format_text(report: &EpisodeReport) -> String {
    let m = &report.metrics;
    format!(
        "{:<11} {:?} after {} ticks: coverage {:.1}%, distance {:.0}, time {:.1}s, steps {}",
        report.policy,
        report.stop_reason,
        report.ticks,
        m.coverage * 100.0,
        m.total_distance,
        m.elapsed,
        m.steps
    )
}
