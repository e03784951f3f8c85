//! Per-state search bookkeeping

use serde::{Deserialize, Serialize};

/// Index of a node in the pathfinder's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the search graph: the best known route to one state
///
/// Nodes are created open and closed at most once. The estimate to the
/// destination is computed when the node is created and never changes;
/// only the predecessor and the cost from the source are relaxed.
#[derive(Debug, Clone)]
pub struct PathNode<S> {
    state: S,
    previous_node: Option<NodeId>,
    cost_from_source: f64,
    estimated_cost_to_destination: f64,
    estimated_total_cost: f64,
    is_open: bool,
}

impl<S> PathNode<S> {
    /// Create an open node
    pub fn new(
        state: S,
        previous_node: Option<NodeId>,
        cost_from_source: f64,
        estimated_cost_to_destination: f64,
    ) -> Self {
        Self {
            state,
            previous_node,
            cost_from_source,
            estimated_cost_to_destination,
            estimated_total_cost: cost_from_source + estimated_cost_to_destination,
            is_open: true,
        }
    }

    /// The state associated with this node
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Predecessor on the cheapest known route, `None` for the source
    pub fn previous_node(&self) -> Option<NodeId> {
        self.previous_node
    }

    /// Movement cost from the source along the cheapest known route
    pub fn cost_from_source(&self) -> f64 {
        self.cost_from_source
    }

    /// Optimistic estimate of the remaining cost to the destination
    pub fn estimated_cost_to_destination(&self) -> f64 {
        self.estimated_cost_to_destination
    }

    /// `cost_from_source + estimated_cost_to_destination`
    pub fn estimated_total_cost(&self) -> f64 {
        self.estimated_total_cost
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_closed(&self) -> bool {
        !self.is_open
    }

    /// A zero estimate marks a destination state
    pub fn is_destination(&self) -> bool {
        self.estimated_cost_to_destination == 0.0
    }

    /// Route this node through a cheaper predecessor
    pub(crate) fn update(&mut self, previous_node: NodeId, cost_from_source: f64) {
        debug_assert!(cost_from_source <= self.cost_from_source);
        self.previous_node = Some(previous_node);
        self.cost_from_source = cost_from_source;
        self.estimated_total_cost = cost_from_source + self.estimated_cost_to_destination;
    }

    pub(crate) fn close(&mut self) {
        self.is_open = false;
    }
}
