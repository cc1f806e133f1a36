//! Output renderings handed to whoever displays the dashboard.
//!
//! - `text` - terminal output
//! - `json` - machine-readable JSON
//! - `dot`  - Graphviz DOT, topology only; layout is the renderer's job

mod explain;
pub mod text;

pub use explain::explanation;

use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;

use crate::error::ArchError;
use crate::risk::RiskTable;
use crate::topology::TopologyGraph;
use crate::Snapshot;

/// Name of the digraph emitted in DOT output
pub const DOT_GRAPH_NAME: &str = "multi_cloud_architecture";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Dot,
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            _ => Err(ArchError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn render_graph(graph: &TopologyGraph, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_graph(graph)),
        OutputFormat::Dot => Ok(graph.to_dot(DOT_GRAPH_NAME)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(graph).context("Failed to serialize topology")
        }
    }
}

pub fn render_risk(table: &RiskTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_table(table)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(table).context("Failed to serialize FMEA table")
        }
        OutputFormat::Dot => Err(ArchError::UnsupportedFormat {
            format: format.name(),
            output: "FMEA",
        }
        .into()),
    }
}

pub fn render_snapshot(snapshot: &Snapshot, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_snapshot(snapshot)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(snapshot).context("Failed to serialize dashboard")
        }
        OutputFormat::Dot => Ok(snapshot.topology.to_dot(DOT_GRAPH_NAME)),
    }
}
