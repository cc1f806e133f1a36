//! The three dashboard variants expressed as data.
//!
//! They only differ in stage-chain granularity and FMEA row count, so each
//! variant is a [`StageLayout`] plus a list of [`RiskRule`]s.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArchError;
use crate::risk::{RiskRule, Term};
use crate::sliders::Slider;
use crate::topology::StageLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Five FMEA rows, coarse chains
    Compact,
    /// Seven FMEA rows
    Standard,
    /// Nine FMEA rows, full Dataiku pipeline
    #[default]
    Extended,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Compact, Variant::Standard, Variant::Extended];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Compact => "compact",
            Variant::Standard => "standard",
            Variant::Extended => "extended",
        }
    }

    pub fn stage_layout(self) -> StageLayout {
        match self {
            Variant::Compact => StageLayout::new(
                ["Ingest", "FeatureEng", "Train", "Deploy", "Monitor"],
                ["Repo", "Build"],
                ["Sec_Net"],
            ),
            Variant::Standard => StageLayout::new(
                vec!["Dataiku", "Ingest", "Train", "Deploy", "Monitor"],
                vec!["Repo", "Build", "Deploy_CICD"],
                vec!["Sec_Net", "Sec_ID"],
            ),
            Variant::Extended => StageLayout::new(
                vec!["Dataiku", "Ingest", "FeatureEng", "Train", "Deploy", "Monitor"],
                vec!["Repo", "Build", "Deploy_CICD", "Monitor_CICD"],
                vec!["Sec_Net", "Sec_ID", "Sec_Vuln"],
            ),
        }
    }

    pub fn risk_rules(self) -> Vec<RiskRule> {
        match self {
            Variant::Compact => vec![
                service_rule(),
                dataiku_rule(),
                RiskRule::new(
                    "ML Pipeline",
                    "Train Error",
                    Term::plus(6, Slider::MlComplexity, 2),
                    Term::plus(5, Slider::MlComplexity, 2),
                    Term::constant(5),
                ),
                ci_cd_rule(),
                security_rule(),
            ],
            Variant::Standard => vec![
                service_rule(),
                dataiku_rule(),
                ingest_rule(),
                train_rule(),
                deploy_rule(),
                ci_cd_rule(),
                security_rule(),
            ],
            Variant::Extended => vec![
                service_rule(),
                dataiku_rule(),
                ingest_rule(),
                RiskRule::new(
                    "FeatureEng",
                    "Feature Error",
                    Term::plus(6, Slider::MlComplexity, 2),
                    Term::constant(5),
                    Term::constant(5),
                ),
                train_rule(),
                deploy_rule(),
                RiskRule::new(
                    "Monitor",
                    "Monitor Fail",
                    Term::constant(6),
                    Term::constant(4),
                    Term::constant(5),
                ),
                ci_cd_rule(),
                security_rule(),
            ],
        }
    }
}

fn service_rule() -> RiskRule {
    RiskRule::new(
        "Service",
        "Crash",
        Term::plus(6, Slider::Containers, 2),
        Term::constant(5),
        Term::plus(5, Slider::CiCd, 3),
    )
}

fn dataiku_rule() -> RiskRule {
    RiskRule::new(
        "Dataiku",
        "Pipeline Fail",
        Term::constant(7),
        Term::plus(4, Slider::Dataiku, 2),
        Term::minus(6, Slider::Dataiku, 3),
    )
}

fn ingest_rule() -> RiskRule {
    RiskRule::new(
        "Ingest",
        "Data Error",
        Term::constant(6),
        Term::constant(5),
        Term::constant(5),
    )
}

fn train_rule() -> RiskRule {
    RiskRule::new(
        "Train",
        "Train Error",
        Term::constant(7),
        Term::plus(5, Slider::MlComplexity, 2),
        Term::constant(5),
    )
}

fn deploy_rule() -> RiskRule {
    RiskRule::new(
        "Deploy",
        "Deploy Error",
        Term::constant(7),
        Term::constant(4),
        Term::plus(4, Slider::CiCd, 2),
    )
}

fn ci_cd_rule() -> RiskRule {
    RiskRule::new(
        "CI/CD",
        "CI/CD Error",
        Term::constant(8),
        Term::plus(4, Slider::CiCd, 3),
        Term::constant(4),
    )
}

fn security_rule() -> RiskRule {
    RiskRule::new(
        "Security",
        "Sec Misconfig",
        Term::minus(9, Slider::Security, 2),
        Term::plus(3, Slider::Serverless, 2),
        Term::constant(5),
    )
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "5" => Ok(Variant::Compact),
            "standard" | "7" => Ok(Variant::Standard),
            "extended" | "9" => Ok(Variant::Extended),
            _ => Err(ArchError::UnknownVariant(s.trim().to_string())),
        }
    }
}
