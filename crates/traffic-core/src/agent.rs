//! The `Agent` capability trait.

/// A traveller that moves from [`start`](Agent::start) to
/// [`destination`](Agent::destination), leaving at
/// [`leave_time`](Agent::leave_time).
///
/// The simulation never inspects concrete agent types; edges may downcast or
/// branch on [`group`](Agent::group) to price themselves differently for
/// different kinds of traveller (car, pedestrian, bus…).
///
/// # Thread safety
///
/// Agents are read from the path-refresh worker pool, so implementations must
/// be `Send + Sync`.
pub trait Agent: Send + Sync {
    /// Unique identifier within a simulation.
    fn id(&self) -> &str;

    /// Group tag.  Agents sharing a tag are reported together and are
    /// assumed to perceive identical edge weights.
    fn group(&self) -> &str;

    /// Name of the node the agent starts at.
    fn start(&self) -> &str;

    /// Name of the node the agent travels to.
    fn destination(&self) -> &str;

    /// Number of ticks before the agent takes its first step.
    fn leave_time(&self) -> u64;
}
