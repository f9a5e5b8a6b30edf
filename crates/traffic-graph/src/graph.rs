//! Named-node graph with an edge arena.
//!
//! # Data layout
//!
//! ```text
//! nodes:     Vec<Node>            indexed by NodeId
//! index:     name → NodeId
//! edges:     Vec<Box<dyn Edge>>   indexed by EdgeId
//! edge_ends: Vec<(from, to)>      indexed by EdgeId
//! ```
//!
//! `edge_ends` duplicates what each edge reports through `from()`/`to()` so
//! that the search's inner loop never hashes a node name.
//!
//! The graph is append-only: nodes and edges can be added but never removed,
//! so every `NodeId`/`EdgeId` handed out stays valid for the graph's
//! lifetime.

use std::fmt;

use rustc_hash::FxHashMap;

use traffic_core::{Edge, EdgeId, NodeId};

use crate::{GraphError, GraphResult};

// ── Node ──────────────────────────────────────────────────────────────────────

/// A named vertex and its ordered list of outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name:  String,
    edges: Vec<EdgeId>,
}

impl Node {
    /// A node with no outgoing edges.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), edges: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed graph whose nodes are addressed by name and whose edges are
/// caller-supplied [`Edge`] implementations.
#[derive(Default)]
pub struct Graph {
    nodes:     Vec<Node>,
    index:     FxHashMap<String, NodeId>,
    edges:     Vec<Box<dyn Edge>>,
    edge_ends: Vec<(NodeId, NodeId)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Register `node` under its name.
    ///
    /// Registering a node equal to the one already stored under that name is
    /// a no-op returning the existing id.
    ///
    /// # Errors
    ///
    /// [`GraphError::ExistingNode`] if a node with the same name but a
    /// different adjacency list is already registered.
    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeId> {
        if let Some(&id) = self.index.get(node.name()) {
            if self.nodes[id.index()] == node {
                return Ok(id);
            }
            return Err(GraphError::ExistingNode(node.name));
        }
        Ok(self.insert_node(node))
    }

    /// Append `edge` to the adjacency list of its source node.
    ///
    /// Missing endpoints are created with empty adjacency lists, so edges can
    /// be added in any order relative to nodes.
    pub fn add_edge<E: Edge + 'static>(&mut self, edge: E) -> EdgeId {
        self.add_boxed_edge(Box::new(edge))
    }

    /// [`add_edge`](Self::add_edge) for an already boxed edge.
    pub fn add_boxed_edge(&mut self, edge: Box<dyn Edge>) -> EdgeId {
        let from = self.ensure_node(edge.from());
        let to   = self.ensure_node(edge.to());

        let id = EdgeId(self.edges.len() as u32);
        self.nodes[from.index()].edges.push(id);
        self.edges.push(edge);
        self.edge_ends.push((from, to));
        id
    }

    fn ensure_node(&mut self, name: &str) -> NodeId {
        match self.index.get(name) {
            Some(&id) => id,
            None      => self.insert_node(Node::new(name)),
        }
    }

    fn insert_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.index.insert(node.name.clone(), id);
        self.nodes.push(node);
        id
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Id of the node named `name`, if registered.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Id of the node named `name`, or [`GraphError::MissingNode`].
    pub fn require_node(&self, name: &str) -> GraphResult<NodeId> {
        self.node_id(name)
            .ok_or_else(|| GraphError::MissingNode(name.to_owned()))
    }

    /// # Panics
    /// Panics if `id` was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Name of node `id`.
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    /// Iterator over every node id in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// # Panics
    /// Panics if `id` was not issued by this graph.
    pub fn edge(&self, id: EdgeId) -> &dyn Edge {
        self.edges[id.index()].as_ref()
    }

    /// Mutable access for occupancy bookkeeping.
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut dyn Edge {
        self.edges[id.index()].as_mut()
    }

    /// `(from, to)` node ids of edge `id`.
    #[inline]
    pub fn edge_endpoints(&self, id: EdgeId) -> (NodeId, NodeId) {
        self.edge_ends[id.index()]
    }

    /// Outgoing edges of `node` in insertion order.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.nodes[node.index()].edges.iter().copied()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .finish()
    }
}
