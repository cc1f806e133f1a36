use thiserror::Error;

/// Errors raised while turning user input into a validated configuration.
///
/// The computations themselves never fail; everything here comes from the
/// input surface or from a custom layout/rule set supplied by configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArchError {
    #[error("Unknown slider '{0}'. Run `cloud_architect sliders` to list valid keys")]
    UnknownSlider(String),

    #[error("Slider '{key}' value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        key: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid value '{value}' for slider '{key}': expected an integer")]
    InvalidValue { key: String, value: String },

    #[error("Invalid assignment '{0}', expected 'key=value'")]
    InvalidAssignment(String),

    #[error("Duplicate node label '{0}' in stage layout")]
    DuplicateNode(String),

    #[error("Stage layout contains an empty node label")]
    EmptyNodeLabel,

    #[error("Invalid risk rule for '{component}': {reason}")]
    InvalidRule { component: String, reason: String },

    #[error("Unknown variant '{0}', expected compact, standard or extended")]
    UnknownVariant(String),

    #[error("Unknown format '{0}'. Valid formats: text, json, dot")]
    UnknownFormat(String),

    #[error("Format '{format}' is not available for {output} output")]
    UnsupportedFormat {
        format: &'static str,
        output: &'static str,
    },
}

pub type ArchResult<T> = std::result::Result<T, ArchError>;
