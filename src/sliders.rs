//! Slider parameters and the validated [`Configuration`] built from them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ArchError, ArchResult};

/// One of the bounded integer inputs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slider {
    NumServices,
    Containers,
    Serverless,
    MlComplexity,
    Security,
    CiCd,
    Dataiku,
    Cost,
    Scalability,
    Ai,
}

const SLIDER_COUNT: usize = 10;

impl Slider {
    pub const ALL: [Slider; SLIDER_COUNT] = [
        Slider::NumServices,
        Slider::Containers,
        Slider::Serverless,
        Slider::MlComplexity,
        Slider::Security,
        Slider::CiCd,
        Slider::Dataiku,
        Slider::Cost,
        Slider::Scalability,
        Slider::Ai,
    ];

    /// Key used in config files and `key=value` assignments
    pub fn key(self) -> &'static str {
        match self {
            Slider::NumServices => "num_services",
            Slider::Containers => "containers",
            Slider::Serverless => "serverless",
            Slider::MlComplexity => "ml_complexity",
            Slider::Security => "security",
            Slider::CiCd => "ci_cd",
            Slider::Dataiku => "dataiku",
            Slider::Cost => "cost",
            Slider::Scalability => "scalability",
            Slider::Ai => "ai",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slider::NumServices => "Number of Services",
            Slider::Containers => "Containers Usage (AKS/GKE)",
            Slider::Serverless => "Serverless Ratio",
            Slider::MlComplexity => "ML Workflow Complexity",
            Slider::Security => "Security Level",
            Slider::CiCd => "CI/CD Automation Level",
            Slider::Dataiku => "Dataiku Integration",
            Slider::Cost => "Cost Efficiency",
            Slider::Scalability => "Scalability",
            Slider::Ai => "LLM/AI Integration",
        }
    }

    /// Inclusive `(min, max)` bounds.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Slider::Containers | Slider::Serverless | Slider::Dataiku | Slider::Ai => (0, 10),
            _ => (1, 10),
        }
    }

    pub fn default_value(self) -> i64 {
        match self {
            Slider::NumServices => 5,
            Slider::Containers => 5,
            Slider::Serverless => 3,
            Slider::MlComplexity => 5,
            Slider::Security => 7,
            Slider::CiCd => 6,
            Slider::Dataiku => 5,
            Slider::Cost => 7,
            Slider::Scalability => 8,
            Slider::Ai => 4,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn check(self, value: i64) -> ArchResult<i64> {
        let (min, max) = self.bounds();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(ArchError::OutOfRange {
                key: self.key(),
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Slider {
    type Err = ArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Slider::ALL
            .into_iter()
            .find(|slider| slider.key() == normalized)
            .ok_or_else(|| ArchError::UnknownSlider(s.trim().to_string()))
    }
}

/// Immutable snapshot of every slider value, each inside its declared range.
///
/// Built fresh for every refresh. Serializes as a `key -> value` table; when
/// deserializing, missing keys take their defaults and out-of-range values
/// are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>", into = "BTreeMap<String, i64>")]
pub struct Configuration {
    values: [i64; SLIDER_COUNT],
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            values: Slider::ALL.map(Slider::default_value),
        }
    }
}

impl Configuration {
    /// Start from the defaults and apply `values`, validating each one.
    pub fn new(values: impl IntoIterator<Item = (Slider, i64)>) -> ArchResult<Self> {
        values
            .into_iter()
            .try_fold(Self::default(), |config, (slider, value)| {
                config.with(slider, value)
            })
    }

    /// Copy of this configuration with one slider replaced.
    pub fn with(mut self, slider: Slider, value: i64) -> ArchResult<Self> {
        self.values[slider.index()] = slider.check(value)?;
        Ok(self)
    }

    pub fn get(&self, slider: Slider) -> i64 {
        self.values[slider.index()]
    }

    /// Service count as a node count. Always at least 1.
    pub fn num_services(&self) -> usize {
        usize::try_from(self.get(Slider::NumServices)).unwrap_or(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slider, i64)> + '_ {
        Slider::ALL.into_iter().map(|slider| (slider, self.get(slider)))
    }

    /// Apply a `key=value` assignment such as `security=9`.
    pub fn assign(self, assignment: &str) -> ArchResult<Self> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ArchError::InvalidAssignment(assignment.to_string()))?;
        let slider: Slider = key.parse()?;
        let parsed = value
            .trim()
            .parse::<i64>()
            .map_err(|_| ArchError::InvalidValue {
                key: slider.key().to_string(),
                value: value.trim().to_string(),
            })?;
        self.with(slider, parsed)
    }

    /// Apply every entry of a JSON object, as loaded from a JSON or TOML
    /// slider file. Integers and integer strings are accepted.
    pub fn apply_overrides(
        self,
        overrides: &serde_json::Map<String, Value>,
    ) -> ArchResult<Self> {
        overrides.iter().try_fold(self, |config, (key, value)| {
            let slider: Slider = key.parse()?;
            let parsed = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(|| ArchError::InvalidValue {
                key: key.clone(),
                value: value.to_string(),
            })?;
            config.with(slider, parsed)
        })
    }
}

impl TryFrom<BTreeMap<String, i64>> for Configuration {
    type Error = ArchError;

    fn try_from(map: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        map.into_iter()
            .try_fold(Self::default(), |config, (key, value)| {
                config.with(key.parse()?, value)
            })
    }
}

impl From<Configuration> for BTreeMap<String, i64> {
    fn from(config: Configuration) -> Self {
        config
            .iter()
            .map(|(slider, value)| (slider.key().to_string(), value))
            .collect()
    }
}
