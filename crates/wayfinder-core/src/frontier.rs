//! Open set ordered by estimated total cost

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::node::NodeId;

/// Entry in the frontier heap
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    estimated_total_cost: f64,
    node: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; earlier discovered nodes win ties
        other
            .estimated_total_cost
            .total_cmp(&self.estimated_total_cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of open nodes keyed by `(estimated_total_cost, NodeId)`.
///
/// Node ids are assigned in discovery order, so ties go to the node
/// discovered first, whether or not it was relaxed since.
///
/// A relaxed node is pushed again with its lower cost rather than moved in
/// place, so the heap may hold superseded entries. The caller discards
/// entries for nodes it has already closed.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<OpenEntry>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: NodeId, estimated_total_cost: f64) {
        self.heap.push(OpenEntry {
            estimated_total_cost,
            node,
        });
    }

    /// Remove the entry with the lowest estimated total cost
    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_cost_first() {
        let mut frontier = Frontier::new();
        frontier.push(NodeId(0), 3.0);
        frontier.push(NodeId(1), 1.0);
        frontier.push(NodeId(2), 2.0);

        assert_eq!(frontier.pop(), Some(NodeId(1)));
        assert_eq!(frontier.pop(), Some(NodeId(2)));
        assert_eq!(frontier.pop(), Some(NodeId(0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_ties_break_by_discovery_order() {
        let mut frontier = Frontier::new();
        for id in [4, 2, 7, 1] {
            frontier.push(NodeId(id), 5.0);
        }
        // Re-pushed after relaxation: still ahead of later discoveries
        frontier.push(NodeId(3), 5.0);

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(
            order,
            vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4), NodeId(7)]
        );
    }

    #[test]
    fn test_clear() {
        let mut frontier = Frontier::new();
        frontier.push(NodeId(0), 1.0);
        frontier.clear();
        assert_eq!(frontier.len(), 0);
        assert_eq!(frontier.pop(), None);
    }
}
