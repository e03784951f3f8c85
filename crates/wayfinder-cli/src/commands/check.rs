//! Check command for validating graph files

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::load_graph;
use crate::config::Config;
use crate::output::{format_output, Render};
use crate::Cli;

#[derive(Args)]
pub struct CheckArgs {
    /// Graph file (.json or .toml)
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub source: String,
    pub goal: String,
    pub directed: bool,
    pub states: usize,
    pub edges: usize,
    pub estimates: usize,
}

impl Render for GraphSummary {
    fn table(&self) -> String {
        format!(
            "Graph is valid\n  Source:    {}\n  Goal:      {}\n  Directed:  {}\n  States:    {}\n  Edges:     {}\n  Estimates: {}",
            self.source, self.goal, self.directed, self.states, self.edges, self.estimates
        )
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        vec![
            ["source", "goal", "directed", "states", "edges", "estimates"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![
                self.source.clone(),
                self.goal.clone(),
                self.directed.to_string(),
                self.states.to_string(),
                self.edges.to_string(),
                self.estimates.to_string(),
            ],
        ]
    }
}

pub fn run(args: &CheckArgs, cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let mut graph = load_graph(&args.file)?;
    graph.validate()?;

    let summary = GraphSummary {
        source: graph.source.clone(),
        goal: graph.goal.clone(),
        directed: graph.directed,
        states: graph.states().len(),
        edges: graph.edges.len(),
        estimates: graph.heuristic.len(),
    };

    println!("{}", format_output(&summary, cli.output_format(config)));
    Ok(())
}
