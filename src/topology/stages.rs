use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ArchError, ArchResult};

pub const ENTRY_NODE: &str = "Cloud Entry";
pub const END_USER_NODE: &str = "EndUser";

/// Prefix of the generated service nodes (`Service_1`, `Service_2`, ...).
pub const SERVICE_PREFIX: &str = "Service_";

fn default_entry() -> String {
    ENTRY_NODE.to_string()
}

fn default_end_user() -> String {
    END_USER_NODE.to_string()
}

/// Ordered stage chains that give a topology its shape.
///
/// The three dashboard variants only differ in these lists, so a layout can
/// also be supplied from the application config under `[stages]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StageLayout {
    #[serde(default = "default_entry")]
    pub entry: String,
    /// ML/data pipeline, chained from the entry node
    #[serde(default)]
    pub pipeline: Vec<String>,
    /// CI/CD chain, chained from the entry node
    #[serde(default)]
    pub ci_cd: Vec<String>,
    /// Security chain, chained from the last CI/CD stage
    #[serde(default)]
    pub security: Vec<String>,
    #[serde(default = "default_end_user")]
    pub end_user: String,
}

impl StageLayout {
    pub fn new<S: Into<String>>(
        pipeline: impl IntoIterator<Item = S>,
        ci_cd: impl IntoIterator<Item = S>,
        security: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            entry: default_entry(),
            pipeline: pipeline.into_iter().map(Into::into).collect(),
            ci_cd: ci_cd.into_iter().map(Into::into).collect(),
            security: security.into_iter().map(Into::into).collect(),
            end_user: default_end_user(),
        }
    }

    /// Number of nodes that do not depend on the service count: entry,
    /// every stage and the end-user node.
    pub fn fixed_stage_count(&self) -> usize {
        2 + self.pipeline.len() + self.ci_cd.len() + self.security.len()
    }

    /// All fixed labels in insertion order.
    pub fn fixed_labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.entry.as_str())
            .chain(self.pipeline.iter().map(String::as_str))
            .chain(self.ci_cd.iter().map(String::as_str))
            .chain(self.security.iter().map(String::as_str))
            .chain(std::iter::once(self.end_user.as_str()))
    }

    /// Labels must be unique, non-blank and must not shadow generated
    /// service nodes, otherwise the node count invariant breaks.
    ///
    /// Labels are compared exactly as the builder inserts them, so
    /// `"Build"` and `"Build "` are two different nodes.
    pub fn validate(&self) -> ArchResult<()> {
        let mut seen = HashSet::new();
        for label in self.fixed_labels() {
            if label.trim().is_empty() {
                return Err(ArchError::EmptyNodeLabel);
            }
            let shadows_service = label
                .strip_prefix(SERVICE_PREFIX)
                .is_some_and(|n| n.parse::<u32>().is_ok());
            if shadows_service || !seen.insert(label) {
                return Err(ArchError::DuplicateNode(label.to_string()));
            }
        }
        Ok(())
    }
}
