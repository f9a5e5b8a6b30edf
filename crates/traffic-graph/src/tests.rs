//! Unit tests for traffic-graph.
//!
//! All tests use hand-built graphs of small fixture edges.

#[cfg(test)]
mod helpers {
    use traffic_core::{Agent, Edge};

    use crate::Graph;

    /// Fixed-cost edge.  Agents in group `"walk"` pay `walk_weight`.
    pub struct TestEdge {
        pub from:        String,
        pub to:          String,
        pub weight:      f64,
        pub walk_weight: f64,
        pub time:        u32,
    }

    impl TestEdge {
        pub fn new(from: &str, to: &str, weight: f64) -> Self {
            Self {
                from:        from.into(),
                to:          to.into(),
                weight,
                walk_weight: weight,
                time:        1,
            }
        }

        pub fn walking(mut self, walk_weight: f64) -> Self {
            self.walk_weight = walk_weight;
            self
        }
    }

    impl Edge for TestEdge {
        fn from(&self) -> &str { &self.from }
        fn to(&self) -> &str { &self.to }
        fn weight(&self, agent: &dyn Agent) -> f64 {
            if agent.group() == "walk" { self.walk_weight } else { self.weight }
        }
        fn time(&self) -> u32 { self.time }
        fn add_agent(&mut self) {}
        fn remove_agent(&mut self) {}
    }

    pub struct TestAgent(pub &'static str);

    impl Agent for TestAgent {
        fn id(&self) -> &str { "a0" }
        fn group(&self) -> &str { self.0 }
        fn start(&self) -> &str { "a" }
        fn destination(&self) -> &str { "e" }
        fn leave_time(&self) -> u64 { 0 }
    }

    pub const CAR: TestAgent = TestAgent("car");
    pub const WALKER: TestAgent = TestAgent("walk");

    /// ```text
    ///   a ─1─ b ─1─ c ─1─ e        (walkers pay 10 per hop)
    ///   └──────5───── d ─1─┘
    /// ```
    ///
    /// Cars: a→b→c→e (3).  Walkers: a→d→e (6).
    pub fn diamond() -> Graph {
        let mut g = Graph::new();
        g.add_edge(TestEdge::new("a", "b", 1.0).walking(10.0));
        g.add_edge(TestEdge::new("b", "c", 1.0).walking(10.0));
        g.add_edge(TestEdge::new("c", "e", 1.0).walking(10.0));
        g.add_edge(TestEdge::new("a", "d", 5.0));
        g.add_edge(TestEdge::new("d", "e", 1.0));
        g
    }

    /// Node names of a destination-first path, reversed into travel order.
    pub fn travel_order(g: &Graph, path: &[crate::Step]) -> Vec<String> {
        path.iter().rev().map(|s| g.name(s.node).to_owned()).collect()
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use super::helpers::TestEdge;
    use crate::{Graph, GraphError, Node};

    #[test]
    fn empty_graph() {
        let g = Graph::new();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn add_edge_creates_both_endpoints() {
        let mut g = Graph::new();
        g.add_edge(TestEdge::new("x", "y", 1.0));
        assert_eq!(g.node_count(), 2);
        let x = g.node_id("x").unwrap();
        let y = g.node_id("y").unwrap();
        assert_eq!(g.node(x).edges().len(), 1);
        assert!(g.node(y).edges().is_empty());
    }

    #[test]
    fn add_edge_appends_to_existing_source() {
        let mut g = Graph::new();
        g.add_edge(TestEdge::new("x", "y", 1.0));
        let x = g.node_id("x").unwrap();
        assert_eq!(g.node(x).edges().len(), 1);

        g.add_edge(TestEdge::new("x", "z", 1.0));
        assert_eq!(g.node(x).edges().len(), 2);
        g.add_edge(TestEdge::new("x", "y", 2.0));
        assert_eq!(g.node(x).edges().len(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn edge_endpoints_match_names() {
        let mut g = Graph::new();
        let e = g.add_edge(TestEdge::new("x", "y", 1.0));
        let (from, to) = g.edge_endpoints(e);
        assert_eq!(g.name(from), "x");
        assert_eq!(g.name(to), "y");
        assert_eq!(g.edge(e).to(), "y");
    }

    #[test]
    fn add_node_is_idempotent_for_equal_node() {
        let mut g = Graph::new();
        let a = g.add_node(Node::new("a")).unwrap();
        let again = g.add_node(Node::new("a")).unwrap();
        assert_eq!(a, again);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn add_node_rejects_different_node_with_same_name() {
        let mut g = Graph::new();
        g.add_edge(TestEdge::new("a", "b", 1.0));
        // "a" now owns an edge; a fresh empty "a" is a different node.
        let err = g.add_node(Node::new("a")).unwrap_err();
        assert_eq!(err, GraphError::ExistingNode("a".into()));
        // "b" has no edges, so an empty "b" is the same node.
        assert!(g.add_node(Node::new("b")).is_ok());
    }

    #[test]
    fn nodes_added_before_edges_are_reused() {
        let mut g = Graph::new();
        let a = g.add_node(Node::new("a")).unwrap();
        g.add_edge(TestEdge::new("a", "b", 1.0));
        assert_eq!(g.node_id("a"), Some(a));
        assert_eq!(g.node(a).edges().len(), 1);
    }

    #[test]
    fn require_node_reports_name() {
        let g = Graph::new();
        assert_eq!(g.require_node("q"), Err(GraphError::MissingNode("q".into())));
    }
}

// ── MinQueue ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use traffic_core::NodeId;

    use crate::MinQueue;

    fn drain(q: &mut MinQueue) -> Vec<u32> {
        let mut out = Vec::new();
        while let Some((n, _)) = q.pop() {
            assert!(q.is_consistent());
            out.push(n.0);
        }
        out
    }

    #[test]
    fn setup_is_empty() {
        let q = MinQueue::with_capacity(5);
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
        assert!(q.is_consistent());
    }

    #[test]
    fn pop_order_follows_updated_priorities() {
        let mut q = MinQueue::with_capacity(5);
        for i in 0..5 {
            q.push(NodeId(i));
        }
        q.update(NodeId(0), 3.14);
        q.update(NodeId(1), 0.2);
        q.update(NodeId(2), 1.0);
        q.update(NodeId(3), 0.1);
        // Revise one.
        q.update(NodeId(0), 0.5);
        assert!(q.is_consistent());

        assert_eq!(drain(&mut q), [3, 1, 0, 2, 4]);
    }

    #[test]
    fn pushed_nodes_start_at_infinity() {
        let mut q = MinQueue::new();
        q.push(NodeId(9));
        assert_eq!(q.priority(NodeId(9)), Some(f64::INFINITY));
        assert_eq!(q.pop(), Some((NodeId(9), f64::INFINITY)));
        assert!(q.pop().is_none());
    }

    #[test]
    fn duplicate_push_is_ignored() {
        let mut q = MinQueue::new();
        q.push(NodeId(1));
        q.update(NodeId(1), 2.0);
        q.push(NodeId(1));
        assert_eq!(q.len(), 1);
        assert_eq!(q.priority(NodeId(1)), Some(2.0));
    }

    #[test]
    fn update_of_absent_node_is_rejected() {
        let mut q = MinQueue::new();
        assert!(!q.update(NodeId(4), 1.0));
        q.push(NodeId(4));
        q.pop();
        assert!(!q.contains(NodeId(4)));
        assert!(!q.update(NodeId(4), 1.0));
    }

    #[test]
    fn priority_increase_sinks() {
        let mut q = MinQueue::new();
        for i in 0..4 {
            q.push(NodeId(i));
            q.update(NodeId(i), i as f64);
        }
        q.update(NodeId(0), 10.0);
        assert!(q.is_consistent());
        assert_eq!(drain(&mut q), [1, 2, 3, 0]);
    }

    #[test]
    fn interleaved_operations_keep_invariants() {
        let mut q = MinQueue::new();
        for i in 0..20 {
            q.push(NodeId(i));
        }
        // Deterministic pseudo-random priorities.
        for i in 0..20u32 {
            q.update(NodeId(i), ((i * 7919) % 23) as f64);
            assert!(q.is_consistent());
        }
        let mut last = f64::NEG_INFINITY;
        for round in 0..10u32 {
            let (_, p) = q.pop().unwrap();
            assert!(p >= last);
            last = p;
            // Only raise priorities so popped values stay monotone.
            let target = NodeId(19 - round);
            if q.contains(target) {
                q.update(target, 100.0 + round as f64);
            }
            assert!(q.is_consistent());
        }
        let mut rest = Vec::new();
        while let Some((_, p)) = q.pop() {
            rest.push(p);
        }
        assert!(rest.windows(2).all(|w| w[0] <= w[1]));
    }
}

// ── Dijkstra & SpanningTree ───────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use super::helpers::{diamond, travel_order, TestEdge, CAR, WALKER};
    use crate::{Graph, GraphError, Node};

    #[test]
    fn missing_endpoints_error() {
        let g = diamond();
        assert_eq!(
            g.dijkstra("nowhere", "e", &CAR).unwrap_err(),
            GraphError::MissingNode("nowhere".into())
        );
        assert_eq!(
            g.dijkstra("a", "nowhere", &CAR).unwrap_err(),
            GraphError::MissingNode("nowhere".into())
        );
    }

    #[test]
    fn shortest_path_for_car() {
        let g = diamond();
        let tree = g.dijkstra("a", "e", &CAR).unwrap();
        let path = tree.path().unwrap();
        assert_eq!(travel_order(&g, &path), ["b", "c", "e"]);
        assert_eq!(tree.cost(), Some(3.0));
    }

    #[test]
    fn agent_specific_weights_change_route() {
        let g = diamond();
        let tree = g.dijkstra("a", "e", &WALKER).unwrap();
        let path = tree.path().unwrap();
        assert_eq!(travel_order(&g, &path), ["d", "e"]);
        assert_eq!(tree.cost(), Some(6.0));
    }

    #[test]
    fn path_is_destination_first_and_chains_edges() {
        let g = diamond();
        let path = g.dijkstra("a", "e", &CAR).unwrap().path().unwrap();
        let e = g.node_id("e").unwrap();
        let a = g.node_id("a").unwrap();
        assert_eq!(path[0].node, e);

        // Tail step leaves the start; each step's edge arrives at its node.
        let (first_from, _) = g.edge_endpoints(path.last().unwrap().edge);
        assert_eq!(first_from, a);
        for step in &path {
            assert_eq!(g.edge_endpoints(step.edge).1, step.node);
        }
        for pair in path.windows(2) {
            assert_eq!(g.edge_endpoints(pair[0].edge).0, pair[1].node);
        }
    }

    #[test]
    fn stops_once_destination_is_settled() {
        let g = diamond();
        let tree = g.dijkstra("a", "b", &CAR).unwrap();
        assert!(tree.is_visited(g.node_id("b").unwrap()));
        // e is 3 away; the search never needed to settle it.
        assert!(!tree.is_visited(g.node_id("e").unwrap()));
        assert!(tree.visited_count() < g.node_count());
    }

    #[test]
    fn visited_nodes_have_finite_distance_and_predecessors() {
        let g = diamond();
        let tree = g.dijkstra("a", "e", &CAR).unwrap();
        for node in g.node_ids().filter(|&n| tree.is_visited(n)) {
            let d = tree.distance(node).unwrap();
            assert!(d.is_finite());
        }
        // Every non-start visited node has a path back to the start.
        let a = g.node_id("a").unwrap();
        for node in g.node_ids().filter(|&n| tree.is_visited(n) && n != a) {
            let sub = g.dijkstra_ids(a, node, &CAR).path().unwrap();
            assert!(!sub.is_empty());
        }
    }

    #[test]
    fn unreachable_destination_is_missing_node() {
        let mut g = diamond();
        g.add_node(Node::new("island")).unwrap();
        let tree = g.dijkstra("a", "island", &CAR).unwrap();
        assert_eq!(tree.cost(), None);
        assert_eq!(tree.path().unwrap_err(), GraphError::MissingNode("island".into()));
    }

    #[test]
    fn one_way_edges_are_respected() {
        let g = diamond();
        // No edge leaves e.
        let tree = g.dijkstra("e", "a", &CAR).unwrap();
        assert!(matches!(tree.path(), Err(GraphError::MissingNode(_))));
    }

    #[test]
    fn start_equals_destination_is_empty_path() {
        let g = diamond();
        let tree = g.dijkstra("c", "c", &CAR).unwrap();
        assert_eq!(tree.path().unwrap(), vec![]);
        assert_eq!(tree.cost(), Some(0.0));
    }

    #[test]
    fn parallel_edges_pick_cheapest() {
        let mut g = Graph::new();
        g.add_edge(TestEdge::new("a", "b", 4.0));
        let cheap = g.add_edge(TestEdge::new("a", "b", 2.0));
        g.add_edge(TestEdge::new("a", "b", 3.0));
        let path = g.dijkstra("a", "b", &CAR).unwrap().path().unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].edge, cheap);
    }

    /// a → b → c, searched by car from a to c.
    fn line_tree() -> (Graph, crate::SpanningTree) {
        let mut g = Graph::new();
        g.add_edge(TestEdge::new("a", "b", 1.0));
        g.add_edge(TestEdge::new("b", "c", 1.0));
        let tree = g.dijkstra("a", "c", &CAR).unwrap();
        (g, tree)
    }

    fn is_disconnected(err: &GraphError) -> bool {
        matches!(err, GraphError::Disconnected { from, to } if from == "a" && to == "c")
    }

    #[test]
    fn missing_predecessor_is_disconnected() {
        let (g, mut tree) = line_tree();
        let c = g.node_id("c").unwrap();
        tree.prev_node.remove(&c);
        assert!(tree.is_visited(c));
        assert!(is_disconnected(&tree.path().unwrap_err()));
    }

    #[test]
    fn predecessor_cycle_is_disconnected() {
        let (g, mut tree) = line_tree();
        let b = g.node_id("b").unwrap();
        let c = g.node_id("c").unwrap();
        let any_edge = g.out_edges(b).next().unwrap();
        tree.prev_node.insert(b, c);
        tree.prev_edge.insert(b, any_edge);
        assert!(is_disconnected(&tree.path().unwrap_err()));
    }

    #[test]
    fn infinite_weight_closes_edge() {
        let mut g = Graph::new();
        g.add_edge(TestEdge::new("a", "b", f64::INFINITY));
        g.add_edge(TestEdge::new("a", "c", 5.0));
        g.add_edge(TestEdge::new("c", "b", 5.0));
        let tree = g.dijkstra("a", "b", &CAR).unwrap();
        assert_eq!(travel_order(&g, &tree.path().unwrap()), ["c", "b"]);

        let mut closed = Graph::new();
        closed.add_edge(TestEdge::new("a", "b", f64::INFINITY));
        let tree = closed.dijkstra("a", "b", &CAR).unwrap();
        assert_eq!(tree.path().unwrap_err(), GraphError::MissingNode("b".into()));
    }

    #[test]
    fn zero_weight_edges_are_allowed() {
        let mut g = Graph::new();
        g.add_edge(TestEdge::new("a", "b", 0.0));
        g.add_edge(TestEdge::new("b", "c", 0.0));
        let tree = g.dijkstra("a", "c", &CAR).unwrap();
        assert_eq!(tree.cost(), Some(0.0));
        assert_eq!(tree.path().unwrap().len(), 2);
    }
}

// ── Brute-force cross-check ───────────────────────────────────────────────────

#[cfg(test)]
mod brute_force {
    use proptest::prelude::*;

    use super::helpers::{TestEdge, CAR};
    use crate::{Graph, GraphError, Node};

    /// Cheapest simple path cost from `s` to `d` by exhaustive DFS.
    fn brute(edges: &[(usize, usize, f64)], s: usize, d: usize, n: usize) -> Option<f64> {
        fn dfs(
            edges: &[(usize, usize, f64)],
            at: usize,
            d: usize,
            seen: &mut Vec<bool>,
            cost: f64,
            best: &mut Option<f64>,
        ) {
            if at == d {
                *best = Some(best.map_or(cost, |b: f64| b.min(cost)));
                return;
            }
            for &(from, to, w) in edges {
                if from == at && !seen[to] {
                    seen[to] = true;
                    dfs(edges, to, d, seen, cost + w, best);
                    seen[to] = false;
                }
            }
        }
        let mut seen = vec![false; n];
        seen[s] = true;
        let mut best = None;
        dfs(edges, s, d, &mut seen, 0.0, &mut best);
        best
    }

    proptest! {
        #[test]
        fn dijkstra_matches_exhaustive_search(
            n   in 2usize..7,
            raw in prop::collection::vec((0usize..7, 0usize..7, 0u32..10), 0..18),
        ) {
            let edges: Vec<(usize, usize, f64)> = raw
                .into_iter()
                .map(|(f, t, w)| (f % n, t % n, w as f64))
                .collect();

            let mut g = Graph::new();
            for i in 0..n {
                g.add_node(Node::new(format!("n{i}"))).unwrap();
            }
            for &(f, t, w) in &edges {
                g.add_edge(TestEdge::new(&format!("n{f}"), &format!("n{t}"), w));
            }

            let dest = format!("n{}", n - 1);
            let tree = g.dijkstra("n0", &dest, &CAR).unwrap();

            match brute(&edges, 0, n - 1, n) {
                None => {
                    prop_assert_eq!(tree.path().unwrap_err(), GraphError::MissingNode(dest));
                }
                Some(best) => {
                    let path = tree.path().unwrap();
                    let total: f64 = path.iter().map(|s| g.edge(s.edge).weight(&CAR)).sum();
                    prop_assert_eq!(total, best);
                    prop_assert_eq!(tree.cost(), Some(best));
                    if let Some(last) = path.last() {
                        prop_assert_eq!(g.name(g.edge_endpoints(last.edge).0), "n0");
                    }
                    if let Some(first) = path.first() {
                        prop_assert_eq!(g.name(first.node), dest.as_str());
                    }
                }
            }
        }
    }
}
