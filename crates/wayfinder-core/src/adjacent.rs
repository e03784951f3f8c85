//! Adjacent state (edge) produced while expanding a node

use serde::{Deserialize, Serialize};

/// A state reachable from the node being expanded, with the cost of the move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacentState<S> {
    /// The neighbouring state
    pub state: S,

    /// Non-negative cost of moving to `state`
    pub movement_cost: f64,
}

impl<S> AdjacentState<S> {
    pub fn new(state: S, movement_cost: f64) -> Self {
        Self {
            state,
            movement_cost,
        }
    }
}

impl<S> From<(S, f64)> for AdjacentState<S> {
    fn from((state, movement_cost): (S, f64)) -> Self {
        Self::new(state, movement_cost)
    }
}
