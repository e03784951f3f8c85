//! Pathfinding query trait: the caller's side of a search

use std::convert::Infallible;
use std::hash::Hash;

use crate::adjacent::AdjacentState;
use crate::node::PathNode;

/// Describes a state space to the pathfinder
///
/// The pathfinder never inspects states. It learns about the space only
/// through these three operations, and only for states it actually reaches.
pub trait PathfindingQuery {
    /// A point in the search space
    type State: Clone + Eq + Hash;

    /// Failure raised while computing adjacency or estimates.
    /// Use [`Infallible`] for queries that cannot fail.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Starting state of the search
    fn source(&self) -> Self::State;

    /// Push the states reachable from `node` into `adjacent`.
    ///
    /// `adjacent` is empty on entry. Movement costs must be non-negative.
    fn adjacent_states(
        &mut self,
        node: &PathNode<Self::State>,
        adjacent: &mut Vec<AdjacentState<Self::State>>,
    ) -> Result<(), Self::Error>;

    /// Optimistic estimate of the cost from `state` to the destination.
    ///
    /// Must never overestimate for the returned path to be optimal. Expanded
    /// states are never revisited, so the estimate should also be consistent
    /// (no larger than a move's cost plus the estimate after it). It must
    /// depend on `state` alone: it is evaluated once per state per search.
    /// Exactly `0.0` means `state` is a destination.
    fn estimate_cost_to_destination(&mut self, state: &Self::State) -> Result<f64, Self::Error>;
}

/// Query assembled from a source state and two closures
pub struct FnQuery<S, A, H> {
    source: S,
    adjacent: A,
    estimate: H,
}

impl<S, A, H> FnQuery<S, A, H>
where
    S: Clone + Eq + Hash,
    A: FnMut(&PathNode<S>, &mut Vec<AdjacentState<S>>),
    H: FnMut(&S) -> f64,
{
    pub fn new(source: S, adjacent: A, estimate: H) -> Self {
        Self {
            source,
            adjacent,
            estimate,
        }
    }
}

impl<S, A, H> PathfindingQuery for FnQuery<S, A, H>
where
    S: Clone + Eq + Hash,
    A: FnMut(&PathNode<S>, &mut Vec<AdjacentState<S>>),
    H: FnMut(&S) -> f64,
{
    type State = S;
    type Error = Infallible;

    fn source(&self) -> S {
        self.source.clone()
    }

    fn adjacent_states(
        &mut self,
        node: &PathNode<S>,
        adjacent: &mut Vec<AdjacentState<S>>,
    ) -> Result<(), Infallible> {
        (self.adjacent)(node, adjacent);
        Ok(())
    }

    fn estimate_cost_to_destination(&mut self, state: &S) -> Result<f64, Infallible> {
        Ok((self.estimate)(state))
    }
}
