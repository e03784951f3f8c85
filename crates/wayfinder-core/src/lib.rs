//! Wayfinder Core - A* pathfinding over lazily expanded state spaces
//!
//! The engine knows nothing about the states it searches. A
//! [`PathfindingQuery`] supplies the source state, the states adjacent to a
//! node and an optimistic estimate of the remaining cost; a zero estimate
//! marks the destination. [`Pathfinder`] returns the cheapest path when the
//! estimate never overestimates.

pub mod adjacent;
pub mod error;
mod frontier;
pub mod graph;
pub mod node;
pub mod observer;
pub mod pathfinder;
pub mod query;
pub mod stats;

pub use adjacent::AdjacentState;
pub use error::{BoxError, Error, Result};
pub use graph::{GraphEdge, WeightedGraph};
pub use node::{NodeId, PathNode};
pub use observer::SearchObserver;
pub use pathfinder::Pathfinder;
pub use query::{FnQuery, PathfindingQuery};
pub use stats::SearchStats;
