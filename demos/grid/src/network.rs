//! Synthetic grid city: roads for cars, footpaths for walkers.

use traffic_core::{Agent, Edge};
use traffic_sim::Simulation;

/// Node name of grid cell `(row, col)`.
pub fn cell(row: usize, col: usize) -> String {
    format!("r{row}c{col}")
}

// ── Edges ─────────────────────────────────────────────────────────────────────

/// A road segment with BPR-style congestion: travel cost grows with the
/// square of `load / capacity`.  Walkers may use roads at triple cost.
pub struct Road {
    from:      String,
    to:        String,
    minutes:   u32,
    capacity:  u32,
    load:      u32,
}

impl Road {
    pub fn new(from: String, to: String, minutes: u32, capacity: u32) -> Self {
        Self { from, to, minutes, capacity, load: 0 }
    }

    fn congested_minutes(&self) -> f64 {
        let ratio = self.load as f64 / self.capacity.max(1) as f64;
        self.minutes as f64 * (1.0 + 0.15 * ratio.powi(4)) * (1.0 + ratio)
    }
}

impl Edge for Road {
    fn from(&self) -> &str { &self.from }
    fn to(&self) -> &str { &self.to }

    fn weight(&self, agent: &dyn Agent) -> f64 {
        match agent.group() {
            "walker" => 3.0 * self.congested_minutes(),
            _        => self.congested_minutes(),
        }
    }

    fn time(&self) -> u32 {
        self.congested_minutes().ceil() as u32
    }

    fn add_agent(&mut self) { self.load += 1; }

    fn remove_agent(&mut self) { self.load = self.load.saturating_sub(1); }
}

/// A footpath: fixed cost, closed to cars.
pub struct Footpath {
    from:    String,
    to:      String,
    minutes: u32,
}

impl Edge for Footpath {
    fn from(&self) -> &str { &self.from }
    fn to(&self) -> &str { &self.to }

    fn weight(&self, agent: &dyn Agent) -> f64 {
        match agent.group() {
            "walker" => self.minutes as f64,
            _        => f64::INFINITY,
        }
    }

    fn time(&self) -> u32 { self.minutes }
    fn add_agent(&mut self) {}
    fn remove_agent(&mut self) {}
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Connect a `rows × cols` grid with two-way roads between neighbours and
/// footpaths along every other row.
///
/// Returns the number of edges added.
pub fn build_grid(sim: &mut Simulation, rows: usize, cols: usize) -> usize {
    let mut edges = 0;
    let mut link = |sim: &mut Simulation, a: String, b: String, path: bool| {
        sim.add_edge(Road::new(a.clone(), b.clone(), 4, 6));
        sim.add_edge(Road::new(b.clone(), a.clone(), 4, 6));
        edges += 2;
        if path {
            sim.add_edge(Footpath { from: a.clone(), to: b.clone(), minutes: 9 });
            sim.add_edge(Footpath { from: b, to: a, minutes: 9 });
            edges += 2;
        }
    };

    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                link(sim, cell(row, col), cell(row, col + 1), row % 2 == 0);
            }
            if row + 1 < rows {
                link(sim, cell(row, col), cell(row + 1, col), false);
            }
        }
    }
    edges
}
