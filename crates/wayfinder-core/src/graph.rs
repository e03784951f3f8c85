//! Explicit weighted graph usable as a pathfinding query

use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::adjacent::AdjacentState;
use crate::error::{Error, Result};
use crate::node::PathNode;
use crate::query::PathfindingQuery;

fn default_directed() -> bool {
    true
}

/// A weighted edge between two named states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

/// Graph description with a source, a goal and a heuristic table.
///
/// States missing from `heuristic` are estimated with `default_estimate`, or
/// with the cheapest positive edge cost when no default is given. That
/// fallback is only sound when every edge costs something, so graphs with
/// zero-cost edges must estimate every state explicitly or set a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedGraph {
    pub source: String,

    pub goal: String,

    /// Edges are followed only from `from` to `to` unless false
    #[serde(default = "default_directed")]
    pub directed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_estimate: Option<f64>,

    #[serde(default)]
    pub edges: Vec<GraphEdge>,

    #[serde(default)]
    pub heuristic: HashMap<String, f64>,

    /// Outgoing edge indices per state, built by `validate`
    #[serde(skip)]
    adjacency: HashMap<String, Vec<(String, f64)>>,

    #[serde(skip)]
    fallback_estimate: f64,
}

impl WeightedGraph {
    pub fn new(source: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            goal: goal.into(),
            directed: true,
            default_estimate: None,
            edges: Vec::new(),
            heuristic: HashMap::new(),
            adjacency: HashMap::new(),
            fallback_estimate: 0.0,
        }
    }

    /// Parse and validate a JSON graph description
    pub fn from_json(json: &str) -> Result<Self> {
        let mut graph: Self = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    pub fn with_edge(mut self, from: impl Into<String>, to: impl Into<String>, cost: f64) -> Self {
        self.edges.push(GraphEdge {
            from: from.into(),
            to: to.into(),
            cost,
        });
        self
    }

    pub fn with_estimate(mut self, state: impl Into<String>, estimate: f64) -> Self {
        self.heuristic.insert(state.into(), estimate);
        self
    }

    pub fn with_default_estimate(mut self, estimate: f64) -> Self {
        self.default_estimate = Some(estimate);
        self
    }

    /// Follow every edge in both directions
    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }

    /// Every state named by an edge, sorted
    pub fn states(&self) -> BTreeSet<&str> {
        self.edges
            .iter()
            .flat_map(|edge| [edge.from.as_str(), edge.to.as_str()])
            .collect()
    }

    /// Check the description and build the adjacency index.
    ///
    /// Must be called after the graph is modified and before searching.
    pub fn validate(&mut self) -> Result<()> {
        if self.source.is_empty() {
            return Err(Error::Validation("source state name is empty".into()));
        }
        if self.goal.is_empty() {
            return Err(Error::Validation("goal state name is empty".into()));
        }

        for edge in &self.edges {
            if !edge.cost.is_finite() || edge.cost < 0.0 {
                return Err(Error::Validation(format!(
                    "edge {} -> {} has invalid cost {}",
                    edge.from, edge.to, edge.cost
                )));
            }
        }

        for (state, estimate) in &self.heuristic {
            if !estimate.is_finite() || *estimate < 0.0 {
                return Err(Error::Validation(format!(
                    "estimate for {} is invalid: {}",
                    state, estimate
                )));
            }
            if *state == self.goal && *estimate != 0.0 {
                return Err(Error::Validation(format!(
                    "goal {} must have a zero estimate, got {}",
                    state, estimate
                )));
            }
            if *state != self.goal && *estimate == 0.0 {
                return Err(Error::Validation(format!(
                    "estimate for {} is zero but it is not the goal",
                    state
                )));
            }
        }

        if self.source != self.goal {
            let states = self.states();
            for (role, name) in [("source", &self.source), ("goal", &self.goal)] {
                if !states.contains(name.as_str()) {
                    return Err(Error::Validation(format!(
                        "{} {} does not appear in any edge",
                        role, name
                    )));
                }
            }
        }

        self.fallback_estimate = match self.default_estimate {
            Some(estimate) if estimate.is_finite() && estimate > 0.0 => estimate,
            Some(estimate) => {
                return Err(Error::Validation(format!(
                    "default estimate must be positive, got {}",
                    estimate
                )))
            }
            None => {
                if let Some(state) = self.unestimated_state_with_free_edges() {
                    return Err(Error::Validation(format!(
                        "graph has zero-cost edges, so {} needs an explicit estimate \
                         (add it to the heuristic table or set default_estimate)",
                        state
                    )));
                }
                self.cheapest_positive_cost().unwrap_or(1.0)
            }
        };

        self.adjacency.clear();
        for edge in &self.edges {
            self.adjacency
                .entry(edge.from.clone())
                .or_default()
                .push((edge.to.clone(), edge.cost));
            if !self.directed {
                self.adjacency
                    .entry(edge.to.clone())
                    .or_default()
                    .push((edge.from.clone(), edge.cost));
            }
        }

        tracing::debug!(
            "Validated graph: {} edges, source={}, goal={}",
            self.edges.len(),
            self.source,
            self.goal
        );

        Ok(())
    }

    /// Estimated cost from `state` to the goal
    pub fn estimate(&self, state: &str) -> f64 {
        if state == self.goal {
            return 0.0;
        }
        self.heuristic
            .get(state)
            .copied()
            .unwrap_or(self.fallback_estimate)
    }

    /// Cost of following `path` through the cheapest edge at every step.
    ///
    /// Returns `None` if two consecutive states are not adjacent.
    pub fn path_cost(&self, path: &[String]) -> Option<f64> {
        path.windows(2).try_fold(0.0, |total, pair| {
            let step = self
                .adjacency
                .get(&pair[0])?
                .iter()
                .filter(|(to, _)| *to == pair[1])
                .map(|(_, cost)| *cost)
                .min_by(f64::total_cmp)?;
            Some(total + step)
        })
    }

    /// A non-goal state without a table estimate, if any edge is free
    fn unestimated_state_with_free_edges(&self) -> Option<&str> {
        if !self.edges.iter().any(|edge| edge.cost == 0.0) {
            return None;
        }
        self.states()
            .into_iter()
            .find(|state| *state != self.goal && !self.heuristic.contains_key(*state))
    }

    fn cheapest_positive_cost(&self) -> Option<f64> {
        self.edges
            .iter()
            .map(|edge| edge.cost)
            .filter(|cost| *cost > 0.0)
            .min_by(f64::total_cmp)
    }
}

impl PathfindingQuery for WeightedGraph {
    type State = String;
    type Error = Infallible;

    fn source(&self) -> String {
        self.source.clone()
    }

    fn adjacent_states(
        &mut self,
        node: &PathNode<String>,
        adjacent: &mut Vec<AdjacentState<String>>,
    ) -> std::result::Result<(), Infallible> {
        if let Some(edges) = self.adjacency.get(node.state()) {
            adjacent.extend(
                edges
                    .iter()
                    .map(|(to, cost)| AdjacentState::new(to.clone(), *cost)),
            );
        }
        Ok(())
    }

    fn estimate_cost_to_destination(
        &mut self,
        state: &String,
    ) -> std::result::Result<f64, Infallible> {
        Ok(self.estimate(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinder::Pathfinder;

    fn strings(states: &[&str]) -> Vec<String> {
        states.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_graph() -> WeightedGraph {
        // A --5--> B --1--> D
        // |        ^
        // 1        1
        // v        |
        // C -------+
        WeightedGraph::new("A", "D")
            .with_edge("A", "B", 5.0)
            .with_edge("A", "C", 1.0)
            .with_edge("C", "B", 1.0)
            .with_edge("B", "D", 1.0)
            .with_estimate("A", 2.0)
            .with_estimate("B", 1.0)
            .with_estimate("C", 1.0)
    }

    #[test]
    fn test_finds_cheaper_detour() {
        let mut graph = create_test_graph();
        graph.validate().unwrap();

        let path = Pathfinder::new().find(&mut graph).unwrap();

        assert_eq!(path, strings(&["A", "C", "B", "D"]));
        assert_eq!(graph.path_cost(&path), Some(3.0));
    }

    #[test]
    fn test_undirected_edges() {
        let mut graph = WeightedGraph::new("D", "A")
            .with_edge("A", "B", 5.0)
            .with_edge("A", "C", 1.0)
            .with_edge("C", "B", 1.0)
            .with_edge("B", "D", 1.0)
            .undirected();
        graph.validate().unwrap();

        let path = Pathfinder::new().find(&mut graph).unwrap();
        assert_eq!(path, strings(&["D", "B", "C", "A"]));

        let mut directed = WeightedGraph::new("D", "A").with_edge("A", "D", 1.0);
        directed.validate().unwrap();
        assert!(Pathfinder::new().find(&mut directed).unwrap().is_empty());
    }

    #[test]
    fn test_estimate_fallbacks() {
        let mut graph = create_test_graph().with_edge("D", "E", 0.5);
        graph.heuristic.remove("C");
        graph.validate().unwrap();

        assert_eq!(graph.estimate("D"), 0.0);
        assert_eq!(graph.estimate("A"), 2.0);
        assert_eq!(graph.estimate("C"), 0.5);

        let mut graph = graph.with_default_estimate(0.25);
        graph.validate().unwrap();
        assert_eq!(graph.estimate("C"), 0.25);
    }

    #[test]
    fn test_zero_cost_edges_need_explicit_estimates() {
        // Only route through X is free at the end; a positive fallback for X
        // would overestimate and steer the search to S, Y, G
        let free_edge = || {
            WeightedGraph::new("S", "G")
                .with_edge("S", "X", 2.0)
                .with_edge("X", "G", 0.0)
                .with_edge("S", "Y", 1.0)
                .with_edge("Y", "G", 1.5)
        };

        let err = free_edge().validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("zero-cost edges"), "{}", err);

        let mut graph = free_edge()
            .with_estimate("S", 1.0)
            .with_estimate("X", 0.5)
            .with_estimate("Y", 1.0);
        graph.validate().unwrap();
        let path = Pathfinder::new().find(&mut graph).unwrap();
        assert_eq!(path, strings(&["S", "X", "G"]));
        assert_eq!(graph.path_cost(&path), Some(2.0));

        let mut graph = free_edge().with_default_estimate(0.1);
        graph.validate().unwrap();
        let path = Pathfinder::new().find(&mut graph).unwrap();
        assert_eq!(path, strings(&["S", "X", "G"]));
    }

    #[test]
    fn test_validation_rejects_bad_descriptions() {
        let cases = vec![
            create_test_graph().with_edge("B", "C", -1.0),
            create_test_graph().with_edge("B", "C", f64::NAN),
            create_test_graph().with_estimate("D", 1.0),
            create_test_graph().with_estimate("C", 0.0),
            create_test_graph().with_estimate("C", -2.0),
            create_test_graph().with_default_estimate(0.0),
            WeightedGraph::new("A", "Z").with_edge("A", "B", 1.0),
            WeightedGraph::new("", "B").with_edge("A", "B", 1.0),
        ];

        for mut graph in cases {
            let err = graph.validate().unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{}", err);
        }
    }

    #[test]
    fn test_source_is_goal() {
        let mut graph = WeightedGraph::new("A", "A");
        graph.validate().unwrap();

        assert_eq!(Pathfinder::new().find(&mut graph).unwrap(), strings(&["A"]));
    }

    #[test]
    fn test_path_cost_rejects_non_edges() {
        let mut graph = create_test_graph();
        graph.validate().unwrap();

        assert_eq!(graph.path_cost(&strings(&["A"])), Some(0.0));
        assert_eq!(graph.path_cost(&strings(&["A", "D"])), None);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "source": "A",
            "goal": "C",
            "edges": [
                {"from": "A", "to": "B", "cost": 1.5},
                {"from": "B", "to": "C", "cost": 2.0}
            ],
            "heuristic": {"B": 1.0}
        }"#;

        let mut graph = WeightedGraph::from_json(json).unwrap();
        assert!(graph.directed);
        assert_eq!(graph.states().len(), 3);

        let path = Pathfinder::new().find(&mut graph).unwrap();
        assert_eq!(path, strings(&["A", "B", "C"]));

        let err = WeightedGraph::from_json("{\"source\": 1}").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
            source = "A"
            goal = "B"
            directed = false

            [[edges]]
            from = "B"
            to = "A"
            cost = 4.0
        "#;

        let mut graph: WeightedGraph = toml::from_str(text).unwrap();
        graph.validate().unwrap();

        assert_eq!(graph.estimate("A"), 4.0);
        let path = Pathfinder::new().find(&mut graph).unwrap();
        assert_eq!(path, strings(&["A", "B"]));
    }
}
