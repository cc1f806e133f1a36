use std::collections::HashMap;

use petgraph::algo::{connected_components, has_path_connecting};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Directed "feeds into" graph of labelled architecture nodes.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    graph: DiGraph<String, ()>,
    // label -> index, labels are unique
    node_map: HashMap<String, NodeIndex>,
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning the existing index if the label is known.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeIndex {
        let label = label.into();
        if let Some(&idx) = self.node_map.get(&label) {
            idx
        } else {
            let idx = self.graph.add_node(label.clone());
            self.node_map.insert(label, idx);
            idx
        }
    }

    /// Insert `from -> to`, creating missing nodes. Duplicate edges are ignored.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        if self.graph.find_edge(from_idx, to_idx).is_none() {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.node_map.contains_key(label)
    }

    /// Node labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Edges as `(from, to)` label pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    pub fn successors(&self, label: &str) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(label) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        // petgraph yields newest edge first
        out.reverse();
        out
    }

    pub fn predecessors(&self, label: &str) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(label) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].as_str())
            .collect();
        out.reverse();
        out
    }

    /// Whether a directed path leads from `from` to `to`.
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }

    /// True when ignoring edge direction leaves a single component.
    pub fn is_weakly_connected(&self) -> bool {
        connected_components(&self.graph) == 1
    }

    /// Graphviz DOT for an external renderer. Layout is left to the renderer.
    pub fn to_dot(&self, name: &str) -> String {
        let mut output = format!("digraph {} {{\n", dot_id(name));
        output.push_str("  rankdir=LR;\n");
        output.push_str("  node [shape=box, style=filled, fillcolor=skyblue, fontsize=9];\n\n");

        for label in self.labels() {
            output.push_str(&format!("  {};\n", dot_id(label)));
        }
        output.push('\n');
        for (from, to) in self.edges() {
            output.push_str(&format!("  {} -> {};\n", dot_id(from), dot_id(to)));
        }

        output.push_str("}\n");
        output
    }
}

fn dot_id(label: &str) -> String {
    format!("\"{}\"", label.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Structural equality: same labels and same edge set in the same order.
impl PartialEq for TopologyGraph {
    fn eq(&self, other: &Self) -> bool {
        self.labels().eq(other.labels()) && self.edges().eq(other.edges())
    }
}

impl Eq for TopologyGraph {}

impl Serialize for TopologyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<&str> = self.labels().collect();
        let edges: Vec<[&str; 2]> = self.edges().map(|(a, b)| [a, b]).collect();
        let mut state = serializer.serialize_struct("TopologyGraph", 2)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}
