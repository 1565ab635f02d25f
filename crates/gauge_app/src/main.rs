//! # gauge_app: scenario runner
//!
//! Runs a scenario file against the headless host and prints the outcome of
//! every gauge as JSON.
//!
//! ## Sequence
//!
//! 1. Load and validate the scenario.
//! 2. Build the host pictures, screen geometry and gauges it describes.
//! 3. Run the frame loop until every gauge has finished and the script is
//!    exhausted, or the tick limit is hit.
//! 4. Print the gauge results and the side effects the host recorded.

mod scenario;
mod tick;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gauge_host::HostEvent;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scenario::Scenario;
use tick::{GaugeReport, TickConfig, TickLoop};

#[derive(Parser)]
#[command(name = "gauge_app", about = "Run a gauge scenario headlessly")]
struct Args {
    /// Path to the scenario JSON file
    scenario: PathBuf,

    /// Ticks per second (overrides GAUGE_TICK_RATE)
    #[arg(short, long)]
    tick_rate: Option<f64>,

    /// Stop after this many ticks (0 = until the scenario settles)
    #[arg(short, long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Pace ticks in real time instead of running flat out
    #[arg(short, long)]
    realtime: bool,
}

/// Everything printed at the end of a run.
#[derive(Serialize)]
struct Outcome<'a> {
    ticks: u64,
    gauges: Vec<GaugeReport>,
    events: &'a [HostEvent],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gauge_app=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!(path = %args.scenario.display(), "loading scenario");
    let scenario = Scenario::load(&args.scenario)?;
    info!(
        gauges = scenario.gauges.len(),
        pictures = scenario.pictures.len(),
        steps = scenario.script.len(),
        "scenario loaded"
    );

    let mut config = TickConfig::from_env();
    if let Some(rate) = args.tick_rate.filter(|rate| *rate > 0.0) {
        config.tick_rate = rate;
    }
    config.max_ticks = args.max_ticks;
    config.realtime = args.realtime;

    let mut tick_loop = TickLoop::new(config, scenario)?;
    tick_loop.run();

    let outcome = Outcome {
        ticks: tick_loop.tick_id(),
        gauges: tick_loop.report(),
        events: tick_loop.host().events(),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    info!("scenario finished");
    Ok(())
}
