//! FMEA scoring: Severity, Occurrence and Detection per architecture
//! component, combined into a Risk Priority Number.

mod rules;
mod table;

pub use rules::{MAX_RATING, Op, RiskRule, Term, validate_rules};
pub use table::{RiskRow, RiskTable, score};
