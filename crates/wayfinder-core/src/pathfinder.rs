//! A* search driver

use std::collections::HashMap;
use std::hash::Hash;

use crate::adjacent::AdjacentState;
use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::node::{NodeId, PathNode};
use crate::observer::SearchObserver;
use crate::query::PathfindingQuery;
use crate::stats::SearchStats;

/// Resolves pathfinding queries over a graph of states.
///
/// A pathfinder owns the node arena, the state index and the frontier of a
/// search. These are cleared whenever a search returns, successfully or
/// not, and their allocations are kept for the next search. Searches on one
/// pathfinder run one at a time (`&mut self`).
pub struct Pathfinder<S> {
    nodes: Vec<PathNode<S>>,
    index: HashMap<S, NodeId>,
    frontier: Frontier,
    adjacent: Vec<AdjacentState<S>>,
    stats: SearchStats,
}

impl<S> Default for Pathfinder<S>
where
    S: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Pathfinder<S>
where
    S: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            frontier: Frontier::new(),
            adjacent: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Create a pathfinder with room for `capacity` nodes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Find the cheapest path from the query's source to a destination.
    ///
    /// Returns the states from source to destination inclusive, or an empty
    /// vector when no destination is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] if the query fails; the search is abandoned.
    pub fn find<Q>(&mut self, query: &mut Q) -> Result<Vec<S>>
    where
        Q: PathfindingQuery<State = S> + ?Sized,
    {
        self.find_observed(query, &mut ())
    }

    /// Like [`find`](Self::find), reporting node events to `observer`
    pub fn find_observed<Q, O>(&mut self, query: &mut Q, observer: &mut O) -> Result<Vec<S>>
    where
        Q: PathfindingQuery<State = S> + ?Sized,
        O: SearchObserver<S> + ?Sized,
    {
        let mut path = Vec::new();
        self.run(query, observer, &mut path)?;
        Ok(path)
    }

    /// Append the cheapest path to `path`.
    ///
    /// Returns whether a path was found; `path` is left untouched otherwise.
    pub fn find_into<Q>(&mut self, query: &mut Q, path: &mut Vec<S>) -> Result<bool>
    where
        Q: PathfindingQuery<State = S> + ?Sized,
    {
        self.run(query, &mut (), path)
    }

    /// Statistics of the most recent search
    pub fn last_stats(&self) -> &SearchStats {
        &self.stats
    }

    fn run<Q, O>(&mut self, query: &mut Q, observer: &mut O, path: &mut Vec<S>) -> Result<bool>
    where
        Q: PathfindingQuery<State = S> + ?Sized,
        O: SearchObserver<S> + ?Sized,
    {
        self.clear();
        self.stats = SearchStats::default();

        let outcome = self.search(query, observer, path);
        self.clear();

        match &outcome {
            Ok(true) => tracing::debug!(
                "Path found: {} states, cost {:?}, {} nodes expanded",
                self.stats.path_len,
                self.stats.path_cost,
                self.stats.nodes_expanded
            ),
            Ok(false) => tracing::debug!(
                "No path found after expanding {} nodes",
                self.stats.nodes_expanded
            ),
            Err(e) => tracing::debug!("Search aborted: {}", e),
        }

        outcome
    }

    fn search<Q, O>(&mut self, query: &mut Q, observer: &mut O, path: &mut Vec<S>) -> Result<bool>
    where
        Q: PathfindingQuery<State = S> + ?Sized,
        O: SearchObserver<S> + ?Sized,
    {
        let source = query.source();
        let estimate = query
            .estimate_cost_to_destination(&source)
            .map_err(Error::query)?;
        self.stats.estimates_computed += 1;

        if estimate == 0.0 {
            tracing::debug!("Source is already a destination");
            path.push(source);
            self.record_path(0.0, 1);
            return Ok(true);
        }

        let source_id = self.insert_node(PathNode::new(source, None, 0.0, estimate));
        observer.on_discovered(&self.nodes[source_id.index()]);
        self.nodes[source_id.index()].close();
        self.expand(query, observer, source_id)?;

        while let Some(id) = self.frontier.pop() {
            let node = &self.nodes[id.index()];

            // Superseded by a cheaper entry for the same node
            if node.is_closed() {
                continue;
            }

            self.stats.nodes_visited += 1;
            tracing::trace!(
                "Visiting node {} (g={}, f={})",
                id,
                node.cost_from_source(),
                node.estimated_total_cost()
            );
            observer.on_visited(node);

            if node.is_destination() {
                let cost = node.cost_from_source();
                let len = self.reconstruct_path(id, path);
                self.record_path(cost, len);
                return Ok(true);
            }

            self.nodes[id.index()].close();
            self.expand(query, observer, id)?;
        }

        Ok(false)
    }

    fn expand<Q, O>(&mut self, query: &mut Q, observer: &mut O, current: NodeId) -> Result<()>
    where
        Q: PathfindingQuery<State = S> + ?Sized,
        O: SearchObserver<S> + ?Sized,
    {
        let mut adjacent = std::mem::take(&mut self.adjacent);
        adjacent.clear();

        let result = self.open_adjacent_nodes(query, observer, current, &mut adjacent);

        adjacent.clear();
        self.adjacent = adjacent;
        result
    }

    fn open_adjacent_nodes<Q, O>(
        &mut self,
        query: &mut Q,
        observer: &mut O,
        current: NodeId,
        adjacent: &mut Vec<AdjacentState<S>>,
    ) -> Result<()>
    where
        Q: PathfindingQuery<State = S> + ?Sized,
        O: SearchObserver<S> + ?Sized,
    {
        query
            .adjacent_states(&self.nodes[current.index()], adjacent)
            .map_err(Error::query)?;

        let adjacent_count = adjacent.len();
        self.stats.nodes_expanded += 1;
        self.stats.edges_examined += adjacent_count;

        let base_cost = self.nodes[current.index()].cost_from_source();

        for AdjacentState {
            state,
            movement_cost,
        } in adjacent.drain(..)
        {
            debug_assert!(movement_cost >= 0.0, "negative movement cost");
            let cost_from_source = base_cost + movement_cost;

            if let Some(&id) = self.index.get(&state) {
                let node = &mut self.nodes[id.index()];
                if node.is_open() && cost_from_source < node.cost_from_source() {
                    node.update(current, cost_from_source);
                    self.frontier.push(id, node.estimated_total_cost());
                    self.stats.nodes_relaxed += 1;
                    self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
                    observer.on_relaxed(node);
                }
                continue;
            }

            let estimate = query
                .estimate_cost_to_destination(&state)
                .map_err(Error::query)?;
            self.stats.estimates_computed += 1;

            let id = self.insert_node(PathNode::new(
                state,
                Some(current),
                cost_from_source,
                estimate,
            ));
            let node = &self.nodes[id.index()];
            self.frontier.push(id, node.estimated_total_cost());
            self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
            observer.on_discovered(node);
        }

        observer.on_expanded(&self.nodes[current.index()], adjacent_count);
        Ok(())
    }

    fn insert_node(&mut self, node: PathNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(node.state().clone(), id);
        self.nodes.push(node);
        self.stats.nodes_discovered += 1;
        id
    }

    /// Append the states from the source to `last`; returns how many were added
    fn reconstruct_path(&self, last: NodeId, path: &mut Vec<S>) -> usize {
        let start = path.len();
        let mut current = Some(last);

        while let Some(id) = current {
            let node = &self.nodes[id.index()];
            path.push(node.state().clone());
            current = node.previous_node();
        }

        path[start..].reverse();
        path.len() - start
    }

    fn record_path(&mut self, cost: f64, len: usize) {
        self.stats.path_found = true;
        self.stats.path_cost = Some(cost);
        self.stats.path_len = len;
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.frontier.clear();
        self.adjacent.clear();
    }
}
