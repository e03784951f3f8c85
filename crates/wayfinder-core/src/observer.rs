//! Search progress callbacks

use crate::node::PathNode;

/// Receives node events while a search runs.
///
/// All methods default to doing nothing. Observers see nodes as read-only
/// snapshots and cannot influence the search.
pub trait SearchObserver<S> {
    /// A state was reached for the first time and its node created
    fn on_discovered(&mut self, _node: &PathNode<S>) {}

    /// A node was taken from the frontier
    fn on_visited(&mut self, _node: &PathNode<S>) {}

    /// A node was closed and its adjacent states processed
    fn on_expanded(&mut self, _node: &PathNode<S>, _adjacent_count: usize) {}

    /// An open node was rerouted through a cheaper predecessor
    fn on_relaxed(&mut self, _node: &PathNode<S>) {}
}

impl<S> SearchObserver<S> for () {}

impl<S, O: SearchObserver<S> + ?Sized> SearchObserver<S> for &mut O {
    fn on_discovered(&mut self, node: &PathNode<S>) {
        (**self).on_discovered(node);
    }

    fn on_visited(&mut self, node: &PathNode<S>) {
        (**self).on_visited(node);
    }

    fn on_expanded(&mut self, node: &PathNode<S>, adjacent_count: usize) {
        (**self).on_expanded(node, adjacent_count);
    }

    fn on_relaxed(&mut self, node: &PathNode<S>) {
        (**self).on_relaxed(node);
    }
}
