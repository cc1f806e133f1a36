use serde::{Deserialize, Serialize};

use crate::error::{ArchError, ArchResult};
use crate::sliders::{Configuration, Slider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    #[default]
    Add,
    Sub,
}

/// One FMEA rating formula: a constant, or `base ± slider / divisor`.
///
/// Division truncates toward zero. Slider values are never negative, so this
/// is also floor division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Term {
    Constant(i64),
    Scaled {
        base: i64,
        slider: Slider,
        divisor: i64,
        #[serde(default)]
        op: Op,
    },
}

impl Term {
    pub const fn constant(value: i64) -> Self {
        Term::Constant(value)
    }

    pub const fn plus(base: i64, slider: Slider, divisor: i64) -> Self {
        Term::Scaled {
            base,
            slider,
            divisor,
            op: Op::Add,
        }
    }

    pub const fn minus(base: i64, slider: Slider, divisor: i64) -> Self {
        Term::Scaled {
            base,
            slider,
            divisor,
            op: Op::Sub,
        }
    }

    /// Rating for `config`. Saturates instead of overflowing; rules that
    /// pass [`RiskRule::validate`] never get near the limits.
    pub fn eval(&self, config: &Configuration) -> i64 {
        match *self {
            Term::Constant(value) => value,
            Term::Scaled {
                base,
                slider,
                divisor,
                op,
            } => {
                let quotient = config.get(slider).checked_div(divisor).unwrap_or(0);
                match op {
                    Op::Add => base.saturating_add(quotient),
                    Op::Sub => base.saturating_sub(quotient),
                }
            }
        }
    }

    /// Inclusive `(min, max)` over the full range of the slider involved.
    /// `None` when the divisor is not positive or the result leaves `i64`.
    pub fn range(&self) -> Option<(i64, i64)> {
        match *self {
            Term::Constant(value) => Some((value, value)),
            Term::Scaled {
                base,
                slider,
                divisor,
                op,
            } => {
                if divisor <= 0 {
                    return None;
                }
                let (lo, hi) = slider.bounds();
                let a = checked_apply(base, op, lo / divisor)?;
                let b = checked_apply(base, op, hi / divisor)?;
                Some((a.min(b), a.max(b)))
            }
        }
    }
}

fn checked_apply(base: i64, op: Op, quotient: i64) -> Option<i64> {
    match op {
        Op::Add => base.checked_add(quotient),
        Op::Sub => base.checked_sub(quotient),
    }
}

/// Largest rating a rule may produce; `S * O * D` stays below 10^9.
pub const MAX_RATING: i64 = 1_000;

/// A fixed FMEA row: which component, how it fails, and how each rating is
/// derived from the sliders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RiskRule {
    pub component: String,
    pub failure_mode: String,
    pub severity: Term,
    pub occurrence: Term,
    pub detection: Term,
}

impl RiskRule {
    pub fn new(
        component: impl Into<String>,
        failure_mode: impl Into<String>,
        severity: Term,
        occurrence: Term,
        detection: Term,
    ) -> Self {
        Self {
            component: component.into(),
            failure_mode: failure_mode.into(),
            severity,
            occurrence,
            detection,
        }
    }

    /// Every rating must stay within `1..=MAX_RATING` for every slider value.
    pub fn validate(&self) -> ArchResult<()> {
        let terms = [
            ("severity", &self.severity),
            ("occurrence", &self.occurrence),
            ("detection", &self.detection),
        ];
        for (name, term) in terms {
            let invalid = |reason: String| ArchError::InvalidRule {
                component: self.component.clone(),
                reason,
            };
            let (min, max) = term.range().ok_or_else(|| {
                invalid(format!("{name} needs a positive divisor and a base that fits i64"))
            })?;
            if min < 1 {
                return Err(invalid(format!(
                    "{name} can drop to {min}, ratings must be >= 1"
                )));
            }
            if max > MAX_RATING {
                return Err(invalid(format!(
                    "{name} can reach {max}, ratings must be <= {MAX_RATING}"
                )));
            }
        }
        Ok(())
    }
}

pub fn validate_rules(rules: &[RiskRule]) -> ArchResult<()> {
    rules.iter().try_for_each(RiskRule::validate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_truncates_division() {
        let config = Configuration::default().with(Slider::Security, 7).unwrap();
        assert_eq!(Term::minus(9, Slider::Security, 2).eval(&config), 6);
        assert_eq!(Term::plus(4, Slider::Security, 3).eval(&config), 6);
        assert_eq!(Term::constant(5).eval(&config), 5);
    }

    #[test]
    fn security_severity_extremes() {
        let term = Term::minus(9, Slider::Security, 2);
        let high = Configuration::default().with(Slider::Security, 10).unwrap();
        let low = Configuration::default().with(Slider::Security, 1).unwrap();
        assert_eq!(term.eval(&high), 4);
        assert_eq!(term.eval(&low), 9);
        assert_eq!(term.range(), Some((4, 9)));
    }

    #[test]
    fn validate_rejects_zero_divisor() {
        let rule = RiskRule::new(
            "Broken",
            "Oops",
            Term::plus(1, Slider::Ai, 0),
            Term::constant(1),
            Term::constant(1),
        );
        assert!(matches!(rule.validate(), Err(ArchError::InvalidRule { .. })));
    }

    #[test]
    fn validate_rejects_non_positive_ratings() {
        let rule = RiskRule::new(
            "Fragile",
            "Underflow",
            Term::constant(3),
            Term::minus(2, Slider::Dataiku, 2),
            Term::constant(1),
        );
        let err = rule.validate().unwrap_err();
        assert!(err.to_string().contains("occurrence can drop to -3"), "{err}");
    }

    #[test]
    fn validate_rejects_ratings_above_limit() {
        let rule = RiskRule::new(
            "Huge",
            "Overflow",
            Term::constant(10_000_000),
            Term::constant(10_000_000),
            Term::constant(10_000_000),
        );
        let err = rule.validate().unwrap_err();
        assert!(err.to_string().contains("severity can reach 10000000"), "{err}");

        let scaled = RiskRule::new(
            "Edge",
            "Drift",
            Term::constant(1),
            Term::plus(MAX_RATING - 1, Slider::Security, 5),
            Term::constant(1),
        );
        assert!(scaled.validate().is_err());
    }

    #[test]
    fn range_reports_overflow_instead_of_panicking() {
        let near_max = Term::plus(i64::MAX - 1, Slider::Security, 1);
        assert_eq!(near_max.range(), None);
        let near_min = Term::minus(i64::MIN + 1, Slider::Security, 1);
        assert_eq!(near_min.range(), None);

        let rule = RiskRule::new("Edge", "Wrap", near_max, Term::constant(1), Term::constant(1));
        let err = rule.validate().unwrap_err();
        assert!(err.to_string().contains("fits i64"), "{err}");
    }

    #[test]
    fn builtin_rules_stay_within_limit() {
        for variant in crate::variant::Variant::ALL {
            assert_eq!(validate_rules(&variant.risk_rules()), Ok(()), "{variant}");
        }
    }

    #[test]
    fn term_deserializes_from_constant_or_table() {
        #[derive(Deserialize)]
        struct Wrapper {
            a: Term,
            b: Term,
            c: Term,
        }
        let parsed: Wrapper = toml::from_str(
            r#"
a = 5
b = { base = 9, slider = "security", divisor = 2, op = "sub" }
c = { base = 4, slider = "ci_cd", divisor = 3 }
"#,
        )
        .unwrap();
        assert_eq!(parsed.a, Term::constant(5));
        assert_eq!(parsed.b, Term::minus(9, Slider::Security, 2));
        assert_eq!(parsed.c, Term::plus(4, Slider::CiCd, 3));
    }
}
