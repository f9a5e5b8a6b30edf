//! Simulation observer trait for progress reporting.

use traffic_core::Tick;

use crate::TickStats;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at tick
/// boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &TickStats) {
///         println!("{}: {} moved, {} arrived", stats.tick, stats.moved, stats.finished);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the refresh phase.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the move phase of each tick.
    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called once after the last agent arrives.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
