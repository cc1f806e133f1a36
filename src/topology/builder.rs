use crate::sliders::Configuration;

use super::graph::TopologyGraph;
use super::stages::{SERVICE_PREFIX, StageLayout};

pub fn service_label(index: usize) -> String {
    format!("{SERVICE_PREFIX}{index}")
}

/// Build the architecture graph for `config` using `layout`.
///
/// Only the service count changes the shape: entry fans out to every
/// service, the pipeline and CI/CD chains hang off the entry, the security
/// chain continues from the last CI/CD stage, and services plus the last
/// pipeline stage all feed the end-user node. `layout` is expected to have
/// passed [`StageLayout::validate`].
pub fn build(config: &Configuration, layout: &StageLayout) -> TopologyGraph {
    let mut graph = TopologyGraph::new();
    let entry = layout.entry.as_str();
    graph.add_node(entry);

    let services: Vec<String> = (1..=config.num_services()).map(service_label).collect();
    for service in &services {
        graph.add_edge(entry, service);
    }

    let last_pipeline = add_chain(&mut graph, entry, &layout.pipeline);
    let last_ci_cd = add_chain(&mut graph, entry, &layout.ci_cd);
    let security_root = last_ci_cd.unwrap_or(entry);
    let last_security = add_chain(&mut graph, security_root, &layout.security);

    let end_user = layout.end_user.as_str();
    graph.add_edge(last_security.unwrap_or(security_root), end_user);

    for service in &services {
        graph.add_edge(service, end_user);
    }
    if let Some(last) = last_pipeline {
        graph.add_edge(last, end_user);
    }

    crate::log_debug!(
        "Built topology: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

/// Chain `stages` off `root`; returns the last stage, if any.
fn add_chain<'a>(
    graph: &mut TopologyGraph,
    root: &'a str,
    stages: &'a [String],
) -> Option<&'a str> {
    let mut previous = root;
    for stage in stages {
        graph.add_edge(previous, stage);
        previous = stage.as_str();
    }
    stages.last().map(String::as_str)
}
