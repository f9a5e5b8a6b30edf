//! Work units for the parallel path-refresh phase.
//!
//! Stale agents are grouped by the node they stand on.  Each group is one
//! unit of work for the pool: the worker runs one search per distinct
//! (destination, group tag) among its agents and reconstructs one path per
//! agent.  Workers only read the graph and the agent slice; results come back
//! as `(agent index, path)` pairs and are written by the caller after the
//! pool has joined.

use std::collections::BTreeMap;
use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::trace;

use traffic_core::{NodeId, Tick};
use traffic_graph::{Graph, SpanningTree, Step};

use crate::{MetaAgent, SimResult};

/// A fresh path for the agent at this index of the simulation's agent list.
pub(crate) type PlannedPath = (usize, Vec<Step>);

/// Indices of agents that need a new path, grouped by current node.
///
/// `BTreeMap` keeps group order stable between runs.
pub(crate) fn stale_groups(
    agents:   &[MetaAgent],
    now:      Tick,
    timeout:  u64,
    finished: impl Fn(&MetaAgent) -> bool,
) -> BTreeMap<NodeId, Vec<usize>> {
    let mut groups: BTreeMap<NodeId, Vec<usize>> = BTreeMap::new();
    for (i, meta) in agents.iter().enumerate() {
        if !finished(meta) && meta.is_path_stale(now, timeout) {
            groups.entry(meta.position).or_default().push(i);
        }
    }
    groups
}

/// Plan every agent in one group sharing the start node `start`.
///
/// # Errors
///
/// The first missing destination or unreachable destination aborts the
/// whole group.
pub(crate) fn plan_group(
    graph:   &Graph,
    agents:  &[MetaAgent],
    start:   NodeId,
    members: &[usize],
) -> SimResult<Vec<PlannedPath>> {
    let mut trees: FxHashMap<(&str, &str), SpanningTree> = FxHashMap::default();
    let mut planned = Vec::with_capacity(members.len());

    for &i in members {
        let agent = agents[i].agent();
        let tree = match trees.entry((agent.destination(), agent.group())) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let destination = graph.require_node(agent.destination())?;
                e.insert(graph.dijkstra_ids(start, destination, agent))
            }
        };
        planned.push((i, tree.path()?));
    }

    trace!(
        start    = %graph.name(start),
        agents   = members.len(),
        searches = trees.len(),
        "planned group"
    );
    Ok(planned)
}
