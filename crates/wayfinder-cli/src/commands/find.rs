//! Find command

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use wayfinder_core::{PathNode, Pathfinder, SearchObserver, SearchStats};

use super::load_graph;
use crate::config::Config;
use crate::output::{format_output, Render};
use crate::Cli;

#[derive(Args)]
pub struct FindArgs {
    /// Graph file (.json or .toml)
    pub file: PathBuf,

    /// Start from this state instead of the file's source
    #[arg(long)]
    pub from: Option<String>,

    /// Search for this state instead of the file's goal
    #[arg(long)]
    pub to: Option<String>,

    /// Follow edges in both directions
    #[arg(long)]
    pub undirected: bool,

    /// Include search statistics in the output
    #[arg(long)]
    pub stats: bool,
}

/// Result of a search, as printed
#[derive(Debug, Serialize)]
pub struct PathReport {
    pub source: String,
    pub goal: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
}

impl Render for PathReport {
    fn table(&self) -> String {
        let mut out = if self.found {
            let mut out = format!(
                "Path from {} to {} (cost {}, {} states):",
                self.source,
                self.goal,
                self.cost.unwrap_or_default(),
                self.path.len()
            );
            for state in &self.path {
                out.push_str("\n  ");
                out.push_str(state);
            }
            out
        } else {
            format!("No path found from {} to {}", self.source, self.goal)
        };

        if let Some(ref stats) = self.stats {
            out.push_str(&format!(
                "\n\nNodes discovered: {}\nNodes expanded:   {}\nNodes relaxed:    {}\nEdges examined:   {}\nPeak frontier:    {}",
                stats.nodes_discovered,
                stats.nodes_expanded,
                stats.nodes_relaxed,
                stats.edges_examined,
                stats.peak_frontier
            ));
        }
        out
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let mut rows = vec![vec!["step".to_string(), "state".to_string()]];
        rows.extend(
            self.path
                .iter()
                .enumerate()
                .map(|(step, state)| vec![step.to_string(), state.clone()]),
        );
        rows
    }
}

/// Logs search progress through tracing
struct LogObserver;

impl SearchObserver<String> for LogObserver {
    fn on_discovered(&mut self, node: &PathNode<String>) {
        tracing::trace!(
            "Discovered {} (estimate {})",
            node.state(),
            node.estimated_cost_to_destination()
        );
    }

    fn on_visited(&mut self, node: &PathNode<String>) {
        tracing::info!(
            "Visiting {} (cost {}, estimated total {})",
            node.state(),
            node.cost_from_source(),
            node.estimated_total_cost()
        );
    }

    fn on_relaxed(&mut self, node: &PathNode<String>) {
        tracing::debug!(
            "Cheaper route to {} (cost {})",
            node.state(),
            node.cost_from_source()
        );
    }
}

/// Run the search; returns whether a path was found
pub fn run(args: &FindArgs, cli: &Cli, config: &Config) -> anyhow::Result<bool> {
    let mut graph = load_graph(&args.file)?;

    if let Some(ref from) = args.from {
        graph.source = from.clone();
    }
    if let Some(ref to) = args.to {
        if *to != graph.goal {
            // Estimates in the file are relative to its own goal
            tracing::warn!("Goal overridden to {}; ignoring the file's heuristic", to);
            graph.heuristic.clear();
            graph.default_estimate = None;
            graph.goal = to.clone();
        }
    }
    if args.undirected || config.undirected {
        graph.directed = false;
    }
    graph.validate()?;

    let mut pathfinder = Pathfinder::new();
    let path = pathfinder.find_observed(&mut graph, &mut LogObserver)?;
    let stats = pathfinder.last_stats();

    tracing::info!(
        "Search finished: {} nodes expanded, path found: {}",
        stats.nodes_expanded,
        stats.path_found
    );

    let report = PathReport {
        source: graph.source.clone(),
        goal: graph.goal.clone(),
        found: stats.path_found,
        cost: stats.path_cost,
        path,
        stats: (args.stats || config.show_stats).then(|| stats.clone()),
    };

    println!("{}", format_output(&report, cli.output_format(config)));
    Ok(report.found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(found: bool) -> PathReport {
        PathReport {
            source: "A".into(),
            goal: "C".into(),
            found,
            cost: found.then_some(2.5),
            path: if found {
                vec!["A".into(), "B".into(), "C".into()]
            } else {
                vec![]
            },
            stats: None,
        }
    }

    #[test]
    fn test_table_output() {
        assert_eq!(
            report(true).table(),
            "Path from A to C (cost 2.5, 3 states):\n  A\n  B\n  C"
        );
        assert_eq!(report(false).table(), "No path found from A to C");
    }

    #[test]
    fn test_csv_rows() {
        let rows = report(true).csv_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], vec!["2".to_string(), "C".to_string()]);
        assert_eq!(report(false).csv_rows().len(), 1);
    }
}
