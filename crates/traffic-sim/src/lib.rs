//! `traffic-sim`: tick loop orchestrator for the traffic simulation.
//!
//! # Two-phase tick loop
//!
//! ```text
//! while some agent has not arrived:
//!   ① Refresh: every unfinished agent whose path is at least
//!               `path_timeout_ticks` old gets a new path.  Stale agents
//!               are grouped by current node and the groups are searched
//!               in parallel on a Rayon pool.
//!   ② Move:    sequentially, in registration order: count down, and when
//!               the countdown elapses step onto the next edge, moving the
//!               agent's occupancy from the previous edge to the new one and
//!               recording a Choice.
//!   ③ Advance the clock.
//! ```
//!
//! Refresh only reads the graph; move is the only phase that touches edge
//! occupancy.  Because refresh borrows the graph shared and move borrows it
//! exclusively, the barrier between them is enforced at compile time.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use traffic_core::SimConfig;
//! use traffic_sim::Simulation;
//!
//! let mut sim = Simulation::new(SimConfig::default())?;
//! sim.add_edge(Road::new("a", "b", 3));
//! sim.add_agent(Car::new("car-0", "a", "b", 0))?;
//! sim.simulate()?;
//! for report in sim.reports() {
//!     println!("{}: {:.1}", report.group, report.overall.average_delta_travel_time);
//! }
//! ```

pub mod error;
pub mod history;
pub mod meta;
pub mod observer;
mod refresh;
pub mod sim;


pub use error::{SimError, SimResult};
pub use history::{AgentRecord, AverageData, GroupReport};
pub use meta::MetaAgent;
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Simulation, TickStats};
