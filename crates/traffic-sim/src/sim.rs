//! The `Simulation` struct and its tick loop.

use std::collections::BTreeMap;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, trace, warn};

use traffic_core::{Agent, Edge, EdgeId, NodeId, SimConfig, Tick};
use traffic_graph::{Graph, Node};

use crate::refresh::{plan_group, stale_groups, PlannedPath};
use crate::{AgentRecord, GroupReport, MetaAgent, NoopObserver, SimError, SimObserver, SimResult};

// ── TickStats ─────────────────────────────────────────────────────────────────

/// What happened during one call to [`Simulation::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    /// The tick that was processed.
    pub tick:      Tick,
    /// Agents that received a new path in the refresh phase.
    pub refreshed: usize,
    /// Agents that stepped onto a new edge in the move phase.
    pub moved:     usize,
    /// Agents that have arrived, including earlier ticks.
    pub finished:  usize,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns the graph and one [`MetaAgent`] per registered agent, and drives the
/// two-phase tick loop described in the crate docs.
pub struct Simulation {
    config:   SimConfig,
    graph:    Graph,
    agents:   Vec<MetaAgent>,
    by_id:    FxHashMap<String, usize>,
    by_group: BTreeMap<String, Vec<usize>>,
    finished: FxHashSet<String>,
    now:      Tick,
    pool:     ThreadPool,
}

impl Simulation {
    /// Create an empty simulation.
    ///
    /// # Errors
    ///
    /// [`SimError::ThreadPool`] if the refresh pool cannot be started.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_graph(config, Graph::new())
    }

    /// Create a simulation over a pre-built graph.
    pub fn with_graph(config: SimConfig, graph: Graph) -> SimResult<Self> {
        // 0 lets Rayon pick one thread per logical core.
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.num_threads.unwrap_or(0))
            .thread_name(|i| format!("path-refresh-{i}"))
            .build()?;

        Ok(Self {
            config,
            graph,
            agents:   Vec::new(),
            by_id:    FxHashMap::default(),
            by_group: BTreeMap::new(),
            finished: FxHashSet::default(),
            now:      Tick::ZERO,
            pool,
        })
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Add an edge to the underlying graph.  See [`Graph::add_edge`].
    pub fn add_edge<E: Edge + 'static>(&mut self, edge: E) -> EdgeId {
        self.graph.add_edge(edge)
    }

    /// Register a node.  See [`Graph::add_node`].
    pub fn add_node(&mut self, node: Node) -> SimResult<NodeId> {
        Ok(self.graph.add_node(node)?)
    }

    /// Register `agent` at its start node.
    ///
    /// The agent's first refresh happens on the next tick regardless of the
    /// path timeout; it takes its first step once `leave_time` ticks have
    /// elapsed.
    ///
    /// # Errors
    ///
    /// - [`SimError::DuplicateAgent`] if the id is already registered.
    /// - [`SimError::Graph`] with `MissingNode` if the start node does not
    ///   exist yet.  Add edges before agents.
    pub fn add_agent<A: Agent + 'static>(&mut self, agent: A) -> SimResult<()> {
        self.add_boxed_agent(Box::new(agent))
    }

    /// [`add_agent`](Self::add_agent) for an already boxed agent.
    pub fn add_boxed_agent(&mut self, agent: Box<dyn Agent>) -> SimResult<()> {
        if self.by_id.contains_key(agent.id()) {
            return Err(SimError::DuplicateAgent(agent.id().to_owned()));
        }
        let position = self.graph.require_node(agent.start())?;

        let index = self.agents.len();
        self.by_id.insert(agent.id().to_owned(), index);
        self.by_group.entry(agent.group().to_owned()).or_default().push(index);
        self.agents.push(MetaAgent::new(agent, position));
        Ok(())
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Tick until every agent has arrived.
    ///
    /// # Errors
    ///
    /// The first error from any tick, or [`SimError::TickLimit`] if
    /// `config.max_ticks` is reached first.
    pub fn simulate(&mut self) -> SimResult<()> {
        self.run(&mut NoopObserver)
    }

    /// [`simulate`](Self::simulate) with observer callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.agents.len(),
            nodes  = self.graph.node_count(),
            edges  = self.graph.edge_count(),
            "simulation starting"
        );

        while !self.is_finished() {
            if let Some(limit) = self.config.max_ticks {
                if self.now.0 >= limit {
                    warn!(limit, unfinished = self.agents.len() - self.finished.len(), "tick limit reached");
                    return Err(SimError::TickLimit(limit));
                }
            }

            observer.on_tick_start(self.now);
            let stats = self.tick()?;
            observer.on_tick_end(&stats);
        }

        observer.on_sim_end(self.now);
        info!(ticks = self.now.0, "simulation finished");
        Ok(())
    }

    /// Process one tick: refresh stale paths, move agents, advance the clock.
    ///
    /// An error in the refresh phase aborts the tick before any agent moves;
    /// the clock is not advanced.
    pub fn tick(&mut self) -> SimResult<TickStats> {
        let refreshed = self.refresh_paths().inspect_err(|e| {
            warn!(tick = %self.now, error = %e, "path refresh failed");
        })?;
        let moved = self.move_agents()?;

        let stats = TickStats {
            tick: self.now,
            refreshed,
            moved,
            finished: self.finished.len(),
        };
        debug!(
            tick      = %stats.tick,
            refreshed = stats.refreshed,
            moved     = stats.moved,
            finished  = stats.finished,
            "tick complete"
        );

        self.now = self.now.next();
        Ok(stats)
    }

    /// Recompute the path of every unfinished agent whose path is stale.
    ///
    /// Searches run on the refresh pool, one work unit per start node.
    /// Results are only written back once every unit has succeeded; on the
    /// first error all results of this call are discarded.
    ///
    /// Returns the number of agents that received a new path.
    pub fn refresh_paths(&mut self) -> SimResult<usize> {
        let now = self.now;
        let finished = &self.finished;
        let groups = stale_groups(
            &self.agents,
            now,
            self.config.path_timeout_ticks,
            |meta| finished.contains(meta.agent.id()),
        );
        if groups.is_empty() {
            return Ok(0);
        }

        let jobs: Vec<(NodeId, Vec<usize>)> = groups.into_iter().collect();
        let graph  = &self.graph;
        let agents = self.agents.as_slice();

        let planned: Vec<Vec<PlannedPath>> = self.pool.install(|| {
            jobs.par_iter()
                .map(|(start, members)| plan_group(graph, agents, *start, members))
                .collect::<SimResult<_>>()
        })?;

        let mut refreshed = 0;
        for (index, path) in planned.into_iter().flatten() {
            self.agents[index].set_path(path, now);
            refreshed += 1;
        }
        trace!(tick = %now, groups = jobs.len(), refreshed, "paths refreshed");
        Ok(refreshed)
    }

    /// Advance every unfinished agent by one tick, in registration order.
    ///
    /// Returns the number of agents that stepped onto a new edge.
    ///
    /// # Errors
    ///
    /// [`SimError::MissingSearch`] if an unfinished agent has never had a
    /// path computed.  Checked before any agent moves.
    pub fn move_agents(&mut self) -> SimResult<usize> {
        if let Some(meta) = self
            .agents
            .iter()
            .find(|m| m.path_updated.is_none() && !self.finished.contains(m.agent.id()))
        {
            return Err(SimError::MissingSearch(meta.agent.id().to_owned()));
        }

        let now = self.now;
        let Self { graph, agents, finished, .. } = self;
        let mut moved = 0;

        for meta in agents.iter_mut() {
            if finished.contains(meta.agent.id()) {
                continue;
            }

            meta.countdown -= 1;
            if meta.countdown <= 0 {
                if let Some(step) = meta.path.pop() {
                    meta.enter(graph, step, now);
                    moved += 1;
                    trace!(agent = meta.agent.id(), to = %graph.name(step.node), tick = %now, "agent moved");
                }
            }

            if meta.path.is_empty() {
                debug!(agent = meta.agent.id(), tick = %now, "agent arrived");
                finished.insert(meta.agent.id().to_owned());
            }
        }
        Ok(moved)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// `true` once every registered agent has arrived.
    pub fn is_finished(&self) -> bool {
        self.finished.len() == self.agents.len()
    }

    /// `true` if the agent with this id has arrived.
    pub fn is_agent_finished(&self, id: &str) -> bool {
        self.finished.contains(id)
    }

    /// The tick the next call to [`tick`](Self::tick) will process.
    pub fn current_tick(&self) -> Tick {
        self.now
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// All agents in registration order.
    pub fn agents(&self) -> &[MetaAgent] {
        &self.agents
    }

    /// Look up an agent's state by id.
    pub fn agent(&self, id: &str) -> Option<&MetaAgent> {
        self.by_id.get(id).map(|&i| &self.agents[i])
    }

    /// Group tags in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.by_group.keys().map(String::as_str)
    }

    // ── History ───────────────────────────────────────────────────────────

    /// History and travel-time aggregates for the agents tagged `group`.
    pub fn group_report(&self, group: &str) -> Option<GroupReport> {
        let members = self.by_group.get(group)?;
        let records = members
            .iter()
            .map(|&i| AgentRecord::from_meta(&self.agents[i]))
            .collect();
        Some(GroupReport::from_records(group, records))
    }

    /// One [`GroupReport`] per group, in sorted group order.
    pub fn reports(&self) -> Vec<GroupReport> {
        self.by_group
            .keys()
            .filter_map(|group| self.group_report(group))
            .collect()
    }
}
