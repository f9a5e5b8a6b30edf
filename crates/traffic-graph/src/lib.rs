//! `traffic-graph`: graph storage and shortest-path search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`graph`]  | `Graph` (node + edge arenas, name index), `Node`              |
//! | [`queue`]  | `MinQueue`: binary min-heap with decrease-key                |
//! | [`search`] | `Graph::dijkstra`, `SpanningTree`, `Step`                     |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                                |
//!
//! # Ownership
//!
//! The graph owns every node and every edge.  Nodes hold their outgoing
//! edges as `EdgeId`s into the edge arena, and search results refer to both
//! by id, so a `SpanningTree` never borrows the graph and can be sent back
//! from a worker thread freely.

pub mod error;
pub mod graph;
pub mod queue;
pub mod search;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{Graph, Node};
pub use queue::MinQueue;
pub use search::{SpanningTree, Step};
