//! Per-agent simulation state.

use std::fmt;

use traffic_core::{Agent, Choice, EdgeId, NodeId, Tick};
use traffic_graph::{Graph, Step};

/// Simulation-private state wrapped around one [`Agent`].
///
/// Created by `Simulation::add_agent` and kept for the whole run, including
/// after the agent arrives, so its history can be reported.
pub struct MetaAgent {
    pub(crate) agent:        Box<dyn Agent>,
    /// Node the agent last stepped onto (or its start node).
    pub(crate) position:     NodeId,
    /// Remaining route, destination first; the next step is at the back.
    pub(crate) path:         Vec<Step>,
    /// Tick of the last path computation; `None` until the first search.
    pub(crate) path_updated: Option<Tick>,
    /// Edge whose occupancy this agent currently holds.
    pub(crate) last_edge:    Option<EdgeId>,
    /// Ticks until the next step.  Starts at the agent's leave time.
    pub(crate) countdown:    i64,
    pub(crate) history:      Vec<Choice>,
}

impl MetaAgent {
    pub(crate) fn new(agent: Box<dyn Agent>, position: NodeId) -> Self {
        let countdown = i64::try_from(agent.leave_time()).unwrap_or(i64::MAX);
        Self {
            agent,
            position,
            path:         Vec::new(),
            path_updated: None,
            last_edge:    None,
            countdown,
            history:      Vec::new(),
        }
    }

    pub fn agent(&self) -> &dyn Agent {
        self.agent.as_ref()
    }

    pub fn position(&self) -> NodeId {
        self.position
    }

    /// Remaining steps, destination first.
    pub fn path(&self) -> &[Step] {
        &self.path
    }

    pub fn path_updated(&self) -> Option<Tick> {
        self.path_updated
    }

    pub fn last_edge(&self) -> Option<EdgeId> {
        self.last_edge
    }

    pub fn countdown(&self) -> i64 {
        self.countdown
    }

    /// Every traversal made so far, oldest first.
    pub fn history(&self) -> &[Choice] {
        &self.history
    }

    /// `true` if the path has never been computed or is `timeout` ticks old.
    #[inline]
    pub fn is_path_stale(&self, now: Tick, timeout: u64) -> bool {
        match self.path_updated {
            None          => true,
            Some(updated) => now.since(updated) >= timeout,
        }
    }

    pub(crate) fn set_path(&mut self, path: Vec<Step>, now: Tick) {
        self.path = path;
        self.path_updated = Some(now);
    }

    /// Step onto `step.edge`: move the agent, transfer its occupancy from the
    /// previous edge, and record the choice.
    pub(crate) fn enter(&mut self, graph: &mut Graph, step: Step, now: Tick) {
        self.position = step.node;

        let travel_time = graph.edge(step.edge).time();
        self.countdown = travel_time as i64;

        if let Some(previous) = self.last_edge.replace(step.edge) {
            graph.edge_mut(previous).remove_agent();
        }
        let edge = graph.edge_mut(step.edge);
        edge.add_agent();

        self.history.push(Choice {
            to:          edge.to().to_owned(),
            edge_kind:   edge.kind().to_owned(),
            timestamp:   now,
            travel_time,
        });
    }
}

impl fmt::Debug for MetaAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaAgent")
            .field("id", &self.agent.id())
            .field("position", &self.position)
            .field("remaining_steps", &self.path.len())
            .field("path_updated", &self.path_updated)
            .field("last_edge", &self.last_edge)
            .field("countdown", &self.countdown)
            .field("choices", &self.history.len())
            .finish()
    }
}
