// mod topology
mod builder;
mod graph;
pub mod stages;

pub use builder::{build, service_label};
pub use graph::TopologyGraph;
pub use stages::{END_USER_NODE, ENTRY_NODE, StageLayout};
