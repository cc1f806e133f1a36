//! Multi-cloud architecture simulator
//!
//! This library turns a set of bounded slider values into an architecture
//! topology graph, an explanation text and an FMEA risk table.

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod risk;
pub mod sliders;
pub mod topology;
pub mod variant;

use serde::{Deserialize, Serialize};

pub use error::{ArchError, ArchResult};
pub use risk::{RiskRow, RiskRule, RiskTable};
pub use sliders::{Configuration, Slider};
pub use topology::{StageLayout, TopologyGraph};
pub use variant::Variant;

/// Application configuration, loaded from `cloud_architect.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArchConfig {
    /// Which dashboard variant supplies the default layout and FMEA rows
    #[serde(default)]
    pub variant: Variant,
    /// Slider values used when no override is given
    #[serde(default)]
    pub sliders: Configuration,
    /// Replaces the variant's stage chains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<StageLayout>,
    /// Replaces the variant's FMEA rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_rules: Option<Vec<RiskRule>>,
}

/// Everything one refresh produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub variant: Variant,
    /// Demo scenario label; informational only, never changes slider values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub sliders: Configuration,
    pub topology: TopologyGraph,
    pub explanation: String,
    pub fmea: RiskTable,
}

impl Snapshot {
    pub fn with_scenario(mut self, scenario: Option<String>) -> Self {
        self.scenario = scenario;
        self
    }
}

/// Resolved layout and FMEA rows; every refresh is a pure function of the
/// configuration passed in.
#[derive(Debug, Clone)]
pub struct Dashboard {
    variant: Variant,
    layout: StageLayout,
    rules: Vec<RiskRule>,
}

impl Dashboard {
    /// Dashboard for a built-in variant
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            layout: variant.stage_layout(),
            rules: variant.risk_rules(),
        }
    }

    /// Apply config overrides and validate them
    pub fn new(config: &ArchConfig) -> ArchResult<Self> {
        let mut dashboard = Self::from_variant(config.variant);
        if let Some(layout) = &config.stages {
            layout.validate()?;
            crate::log_info!("Using custom stage layout from config");
            dashboard.layout = layout.clone();
        }
        if let Some(rules) = &config.risk_rules {
            risk::validate_rules(rules)?;
            crate::log_info!("Using {} custom FMEA rules from config", rules.len());
            dashboard.rules = rules.clone();
        }
        Ok(dashboard)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn layout(&self) -> &StageLayout {
        &self.layout
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    pub fn topology(&self, config: &Configuration) -> TopologyGraph {
        topology::build(config, &self.layout)
    }

    pub fn risk(&self, config: &Configuration) -> RiskTable {
        risk::score(config, &self.rules)
    }

    /// Recompute all three outputs for `config`
    pub fn refresh(&self, config: &Configuration) -> Snapshot {
        crate::log_debug!("Refreshing {} dashboard", self.variant);
        Snapshot {
            variant: self.variant,
            scenario: None,
            sliders: *config,
            topology: self.topology(config),
            explanation: report::explanation(config),
            fmea: self.risk(config),
        }
    }
}
