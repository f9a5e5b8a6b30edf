//! grid: congestion demo for the traffic simulation.
//!
//! Spawns cars and walkers with random trips across a synthetic grid city,
//! runs the simulation to completion, and writes the travel history as CSV
//! and JSON lines.
//!
//! ```text
//! RUST_LOG=info cargo run -p grid --release -- output/grid
//! ```

mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use traffic_core::{Agent, SimConfig, Tick};
use traffic_output::{write_simulation, CsvWriter, JsonLinesWriter};
use traffic_sim::{SimObserver, Simulation, TickStats};

use network::{build_grid, cell};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROWS:          usize = 8;
const COLS:          usize = 8;
const CAR_COUNT:     usize = 400;
const WALKER_COUNT:  usize = 100;
const SEED:          u64   = 42;
const MAX_LEAVE:     u64   = 30;
const LOG_EVERY:     u64   = 10;

// ── Agents ────────────────────────────────────────────────────────────────────

struct Trip {
    id:          String,
    group:       &'static str,
    start:       String,
    destination: String,
    leave:       u64,
}

impl Agent for Trip {
    fn id(&self) -> &str { &self.id }
    fn group(&self) -> &str { self.group }
    fn start(&self) -> &str { &self.start }
    fn destination(&self) -> &str { &self.destination }
    fn leave_time(&self) -> u64 { self.leave }
}

fn random_trip(rng: &mut SmallRng, id: String, group: &'static str) -> Trip {
    let start = cell(rng.gen_range(0..ROWS), rng.gen_range(0..COLS));
    let destination = cell(rng.gen_range(0..ROWS), rng.gen_range(0..COLS));
    Trip { id, group, start, destination, leave: rng.gen_range(0..=MAX_LEAVE) }
}

// ── Progress ──────────────────────────────────────────────────────────────────

struct Progress {
    total: usize,
}

impl SimObserver for Progress {
    fn on_tick_end(&mut self, stats: &TickStats) {
        if stats.tick.0 % LOG_EVERY == 0 {
            info!(
                tick      = %stats.tick,
                refreshed = stats.refreshed,
                moved     = stats.moved,
                arrived   = stats.finished,
                total     = self.total,
                "progress"
            );
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(ticks = final_tick.0, "all agents arrived");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output/grid"));

    // 1. Network.
    let config = SimConfig::default().with_max_ticks(10_000);
    let mut sim = Simulation::new(config)?;
    let edges = build_grid(&mut sim, ROWS, COLS);
    info!(rows = ROWS, cols = COLS, edges, "grid built");

    // 2. Agents.
    let mut rng = SmallRng::seed_from_u64(SEED);
    for i in 0..CAR_COUNT {
        sim.add_agent(random_trip(&mut rng, format!("car-{i}"), "car"))?;
    }
    for i in 0..WALKER_COUNT {
        sim.add_agent(random_trip(&mut rng, format!("walker-{i}"), "walker"))?;
    }

    // 3. Run.
    let t0 = Instant::now();
    sim.run(&mut Progress { total: CAR_COUNT + WALKER_COUNT })?;
    info!(elapsed_s = t0.elapsed().as_secs_f64(), ticks = sim.current_tick().0, "simulation complete");

    // 4. Output.
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut csv = CsvWriter::new(&out_dir)?;
    write_simulation(&sim, &mut csv)?;
    let mut jsonl = JsonLinesWriter::create(&out_dir.join("history.jsonl"))?;
    write_simulation(&sim, &mut jsonl)?;

    // 5. Summary.
    println!("{:<8} {:>7} {:>12} {:>10}", "Group", "Agents", "Traversals", "Avg time");
    println!("{}", "-".repeat(40));
    for report in sim.reports() {
        println!(
            "{:<8} {:>7} {:>12} {:>10.1}",
            report.group,
            report.overall.agent_count,
            report.overall.traversal_count,
            report.overall.average_delta_travel_time,
        );
    }
    println!("\nHistory written to {}", out_dir.display());
    Ok(())
}
