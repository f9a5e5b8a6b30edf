//! Agent-aware Dijkstra search and path reconstruction.
//!
//! # Cost model
//!
//! Every relaxation asks the edge for `weight(agent)`, so two agents can see
//! different costs on the same edge (vehicle class, congestion tolerance…).
//! A [`SpanningTree`] is therefore only meaningful for the agent it was
//! computed for, or for agents known to price edges identically.
//!
//! # Early termination
//!
//! The search stops as soon as the destination is settled, or when the
//! cheapest remaining node is unreachable (+∞).  Nodes outside the settled
//! set have no reliable predecessor, so a tree answers exactly one question:
//! the path to its own destination.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use traffic_core::{Agent, EdgeId, NodeId};

use crate::{Graph, GraphError, GraphResult, MinQueue};

// ── Step ──────────────────────────────────────────────────────────────────────

/// A node on a path and the edge used to arrive at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub node: NodeId,
    pub edge: EdgeId,
}

// ── SpanningTree ──────────────────────────────────────────────────────────────

/// Result of one [`Graph::dijkstra`] call.
///
/// Self-contained: it refers to nodes and edges by id only and carries its
/// own start and destination, so [`path`](Self::path) needs no arguments.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    pub(crate) start:            NodeId,
    pub(crate) destination:      NodeId,
    pub(crate) start_name:       String,
    pub(crate) destination_name: String,
    pub(crate) visited:          FxHashSet<NodeId>,
    pub(crate) distances:        FxHashMap<NodeId, f64>,
    pub(crate) prev_node:        FxHashMap<NodeId, NodeId>,
    pub(crate) prev_edge:        FxHashMap<NodeId, EdgeId>,
}

impl SpanningTree {
    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// `true` if the search settled `node`.
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Number of settled nodes.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Best known distance to `node`.  Final only for visited nodes.
    pub fn distance(&self, node: NodeId) -> Option<f64> {
        self.distances.get(&node).copied()
    }

    /// Total cost of the path to the destination, if it was reached.
    pub fn cost(&self) -> Option<f64> {
        if self.is_visited(self.destination) {
            self.distance(self.destination)
        } else {
            None
        }
    }

    /// Reconstruct the path by walking predecessors from the destination
    /// back to the start.
    ///
    /// The returned steps are ordered **destination first**: popping from the
    /// back of the `Vec` yields the step adjacent to the start.  A search from
    /// a node to itself yields an empty path.
    ///
    /// # Errors
    ///
    /// - [`GraphError::MissingNode`] if the start or the destination was
    ///   never settled.  This covers both "no path exists" and "the search
    ///   stopped before reaching it".
    /// - [`GraphError::Disconnected`] if the predecessor chain breaks before
    ///   reaching the start.
    pub fn path(&self) -> GraphResult<Vec<Step>> {
        if !self.is_visited(self.start) {
            return Err(GraphError::MissingNode(self.start_name.clone()));
        }
        if !self.is_visited(self.destination) {
            return Err(GraphError::MissingNode(self.destination_name.clone()));
        }

        let mut path = Vec::new();
        let mut walk = self.destination;
        while walk != self.start {
            let (Some(&edge), Some(&prev)) = (self.prev_edge.get(&walk), self.prev_node.get(&walk))
            else {
                return Err(self.disconnected());
            };
            path.push(Step { node: walk, edge });
            // A chain longer than the settled set can only be a cycle.
            if path.len() > self.visited.len() {
                return Err(self.disconnected());
            }
            walk = prev;
        }
        Ok(path)
    }

    fn disconnected(&self) -> GraphError {
        GraphError::Disconnected {
            from: self.start_name.clone(),
            to:   self.destination_name.clone(),
        }
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

impl Graph {
    /// Shortest-path search from `start` to `destination` as seen by `agent`.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNode`] if either endpoint is not in the graph.
    pub fn dijkstra(
        &self,
        start:       &str,
        destination: &str,
        agent:       &dyn Agent,
    ) -> GraphResult<SpanningTree> {
        let start       = self.require_node(start)?;
        let destination = self.require_node(destination)?;
        Ok(self.dijkstra_ids(start, destination, agent))
    }

    /// [`dijkstra`](Self::dijkstra) with endpoints already resolved.
    ///
    /// # Panics
    /// Panics if either id was not issued by this graph.
    pub fn dijkstra_ids(
        &self,
        start:       NodeId,
        destination: NodeId,
        agent:       &dyn Agent,
    ) -> SpanningTree {
        let n = self.node_count();
        let mut tree = SpanningTree {
            start,
            destination,
            start_name:       self.name(start).to_owned(),
            destination_name: self.name(destination).to_owned(),
            visited:          FxHashSet::default(),
            distances:        FxHashMap::default(),
            prev_node:        FxHashMap::default(),
            prev_edge:        FxHashMap::default(),
        };

        let mut queue = MinQueue::with_capacity(n);
        for node in self.node_ids() {
            queue.push(node);
        }
        queue.update(start, 0.0);
        tree.distances.insert(start, 0.0);

        while let Some((current, dist)) = queue.pop() {
            // Everything left is unreachable from `start`.
            if dist.is_infinite() {
                break;
            }
            tree.visited.insert(current);
            if current == destination {
                break;
            }

            for edge_id in self.out_edges(current) {
                let (_, to) = self.edge_endpoints(edge_id);
                if tree.visited.contains(&to) {
                    continue;
                }
                let weight = self.edge(edge_id).weight(agent);
                debug_assert!(weight >= 0.0, "negative weight on {edge_id}");

                let candidate = dist + weight;
                let known = tree.distances.get(&to).copied().unwrap_or(f64::INFINITY);
                if candidate < known {
                    tree.distances.insert(to, candidate);
                    tree.prev_node.insert(to, current);
                    tree.prev_edge.insert(to, edge_id);
                    queue.update(to, candidate);
                }
            }
        }

        trace!(
            agent       = agent.id(),
            start       = %tree.start_name,
            destination = %tree.destination_name,
            settled     = tree.visited.len(),
            nodes       = n,
            "dijkstra search complete"
        );
        tree
    }
}
