//! Binary min-heap over nodes with decrease-key.
//!
//! `std::collections::BinaryHeap` cannot change an element's priority in
//! place, so this is a hand-rolled array heap plus a `NodeId → slot` lookup
//! that is rewritten on every swap.  `update` finds the element through the
//! lookup and re-heapifies from its slot in O(log n).
//!
//! Invariant: `lookup[heap[i].node] == i` for every slot `i`, and the lookup
//! has no other entries.

use rustc_hash::FxHashMap;

use traffic_core::NodeId;

#[derive(Debug, Clone, Copy)]
struct Item {
    node:     NodeId,
    priority: f64,
}

/// Minimum priority queue keyed by `f64`, supporting arbitrary priority
/// updates.
#[derive(Debug, Default)]
pub struct MinQueue {
    heap:   Vec<Item>,
    lookup: FxHashMap<NodeId, usize>,
}

impl MinQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut lookup = FxHashMap::default();
        lookup.reserve(capacity);
        Self { heap: Vec::with_capacity(capacity), lookup }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.lookup.contains_key(&node)
    }

    /// Current priority of `node`, if queued.
    pub fn priority(&self, node: NodeId) -> Option<f64> {
        self.lookup.get(&node).map(|&i| self.heap[i].priority)
    }

    /// Insert `node` with priority +∞.  Pushing a node that is already queued
    /// does nothing.
    pub fn push(&mut self, node: NodeId) {
        if self.lookup.contains_key(&node) {
            return;
        }
        // +∞ sorts last, so appending keeps the heap property.
        let slot = self.heap.len();
        self.heap.push(Item { node, priority: f64::INFINITY });
        self.lookup.insert(node, slot);
    }

    /// Remove and return the minimum-priority node with its priority.
    pub fn pop(&mut self) -> Option<(NodeId, f64)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let item = self.heap.pop()?;
        self.lookup.remove(&item.node);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((item.node, item.priority))
    }

    /// Set `node`'s priority and restore heap order.
    ///
    /// Returns `false` (and changes nothing) if `node` is not queued.
    pub fn update(&mut self, node: NodeId, priority: f64) -> bool {
        let Some(&slot) = self.lookup.get(&node) else {
            return false;
        };
        debug_assert!(!priority.is_nan(), "NaN priority for {node}");
        self.heap[slot].priority = priority;
        // Same as a heap "fix": at most one of these moves the item.
        let slot = self.sift_up(slot);
        self.sift_down(slot);
        true
    }

    // ── Heap mechanics ────────────────────────────────────────────────────

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].priority < self.heap[b].priority
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.lookup.insert(self.heap[a].node, a);
        self.lookup.insert(self.heap[b].node, b);
    }

    /// Move the item at `slot` towards the root; returns its final slot.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left  = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    /// Check both structural invariants.  Test helper.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let heap_ok = (1..self.heap.len())
            .all(|i| self.heap[(i - 1) / 2].priority <= self.heap[i].priority);
        let lookup_ok = self.lookup.len() == self.heap.len()
            && self.heap.iter().enumerate().all(|(i, item)| self.lookup.get(&item.node) == Some(&i));
        heap_ok && lookup_ok
    }
}
