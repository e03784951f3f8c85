//! CLI command implementations

use std::path::Path;

use anyhow::Context;
use wayfinder_core::WeightedGraph;

pub mod check;
pub mod completions;
pub mod config;
pub mod find;

/// Read a graph description from a `.json` or `.toml` file.
///
/// The graph is not validated yet so callers can adjust it first.
pub fn load_graph(path: &Path) -> anyhow::Result<WeightedGraph> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading graph file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    let graph = match extension.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON graph {}", path.display()))?,
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("parsing TOML graph {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported graph file {}: expected a .json or .toml extension",
            path.display()
        ),
    };

    tracing::debug!("Loaded graph from {}", path.display());
    Ok(graph)
}
