//! The `Edge` capability trait.

use crate::Agent;

/// A directed, weighted, timed connection between two named nodes.
///
/// An edge keeps track of how many agents are currently on it (through
/// [`add_agent`](Edge::add_agent) and [`remove_agent`](Edge::remove_agent))
/// and is expected to derive its weight and travel time from that count.
/// It may also price itself differently for different agents.
///
/// # Invariants expected of implementations
///
/// - `weight` is `>= 0`.  `f64::INFINITY` closes the edge to that agent.
/// - `time` is `> 0`.
/// - `remove_agent` is never called more often than `add_agent`.
///
/// # Thread safety
///
/// `weight` is called concurrently from the path-refresh pool while the
/// occupancy methods take `&mut self` and only run in the single-threaded
/// movement phase.  No interior mutability is required.
pub trait Edge: Send + Sync {
    /// Name of the source node.
    fn from(&self) -> &str;

    /// Name of the target node.
    fn to(&self) -> &str;

    /// Cost of traversing this edge for `agent` under the current occupancy.
    fn weight(&self, agent: &dyn Agent) -> f64;

    /// Ticks needed to traverse this edge under the current occupancy.
    fn time(&self) -> u32;

    /// An agent has entered the edge.
    fn add_agent(&mut self);

    /// An agent has left the edge.
    fn remove_agent(&mut self);

    /// Classification tag recorded in every [`Choice`](crate::Choice) made
    /// on this edge.  Defaults to the unqualified name of the implementing
    /// type, so `Road` and `Sidewalk` edges are reported separately without
    /// extra code.  Generic arguments are dropped: `Lane<Car>` reports as
    /// `Lane`.
    fn kind(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let path = full.split('<').next().unwrap_or(full);
        path.rsplit("::").next().unwrap_or(path)
    }
}
