//! Search statistics

use serde::{Deserialize, Serialize};

/// Counters collected during one search run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Distinct states with a node (source included)
    pub nodes_discovered: usize,
    /// Nodes closed and expanded
    pub nodes_expanded: usize,
    /// Nodes taken from the frontier
    pub nodes_visited: usize,
    /// Open nodes rerouted through a cheaper predecessor
    pub nodes_relaxed: usize,
    /// Adjacent states returned by the query
    pub edges_examined: usize,
    /// Calls to the query's estimate
    pub estimates_computed: usize,
    /// Largest number of entries held by the frontier
    pub peak_frontier: usize,
    pub path_found: bool,
    /// Total movement cost of the returned path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_cost: Option<f64>,
    /// Number of states in the returned path
    pub path_len: usize,
}
