use serde::Serialize;

use crate::sliders::Configuration;

use super::rules::RiskRule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskRow {
    pub component: String,
    pub failure_mode: String,
    pub severity: i64,
    pub occurrence: i64,
    pub detection: i64,
    /// Risk Priority Number, always `severity * occurrence * detection`
    pub rpn: i64,
}

impl RiskRow {
    /// Exact for validated rules. Unvalidated rules saturate rather than wrap.
    fn new(rule: &RiskRule, config: &Configuration) -> Self {
        let severity = rule.severity.eval(config);
        let occurrence = rule.occurrence.eval(config);
        let detection = rule.detection.eval(config);
        Self {
            component: rule.component.clone(),
            failure_mode: rule.failure_mode.clone(),
            severity,
            occurrence,
            detection,
            rpn: severity.saturating_mul(occurrence).saturating_mul(detection),
        }
    }
}

/// FMEA table in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct RiskTable {
    rows: Vec<RiskRow>,
}

impl RiskTable {
    pub fn rows(&self) -> &[RiskRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn severities(&self) -> Vec<i64> {
        self.rows.iter().map(|row| row.severity).collect()
    }

    /// Copy sorted by descending RPN. Ties keep rule order.
    pub fn ranked(&self) -> RiskTable {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.rpn.cmp(&a.rpn));
        RiskTable { rows }
    }

    pub fn highest(&self) -> Option<&RiskRow> {
        // max_by_key returns the last maximum; keep the first instead
        self.rows
            .iter()
            .rev()
            .max_by_key(|row| row.rpn)
    }
}

/// Score every rule against `config`, one row per rule.
pub fn score(config: &Configuration, rules: &[RiskRule]) -> RiskTable {
    let rows: Vec<RiskRow> = rules.iter().map(|rule| RiskRow::new(rule, config)).collect();
    crate::log_debug!("Scored {} FMEA rows", rows.len());
    RiskTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::rules::Term;
    use crate::sliders::Slider;
    use crate::variant::Variant;

    fn sample_sliders() -> Configuration {
        Configuration::new([
            (Slider::Security, 7),
            (Slider::CiCd, 6),
            (Slider::Dataiku, 5),
            (Slider::MlComplexity, 5),
            (Slider::Containers, 5),
            (Slider::Serverless, 3),
        ])
        .unwrap()
    }

    #[test]
    fn compact_variant_severities() {
        let table = score(&sample_sliders(), &Variant::Compact.risk_rules());
        assert_eq!(table.severities(), vec![8, 7, 8, 8, 6]);
    }

    #[test]
    fn rpn_is_product_for_every_variant_and_value() {
        for variant in Variant::ALL {
            let rules = variant.risk_rules();
            for slider in Slider::ALL {
                let (min, max) = slider.bounds();
                for value in min..=max {
                    let config = Configuration::default().with(slider, value).unwrap();
                    let table = score(&config, &rules);
                    assert_eq!(table.len(), rules.len());
                    for row in table.rows() {
                        assert_eq!(row.rpn, row.severity * row.occurrence * row.detection);
                        assert!(row.severity >= 1 && row.occurrence >= 1 && row.detection >= 1);
                    }
                }
            }
        }
    }

    #[test]
    fn rows_keep_rule_order() {
        let rules = Variant::Extended.risk_rules();
        let table = score(&Configuration::default(), &rules);
        let components: Vec<&str> = table.rows().iter().map(|r| r.component.as_str()).collect();
        let expected: Vec<&str> = rules.iter().map(|r| r.component.as_str()).collect();
        assert_eq!(components, expected);
    }

    #[test]
    fn extended_defaults_match_dashboard_table() {
        let table = score(&Configuration::default(), &Variant::Extended.risk_rules());
        let triples: Vec<(i64, i64, i64, i64)> = table
            .rows()
            .iter()
            .map(|r| (r.severity, r.occurrence, r.detection, r.rpn))
            .collect();
        assert_eq!(
            triples,
            vec![
                (8, 5, 7, 280),
                (7, 6, 5, 210),
                (6, 5, 5, 150),
                (8, 5, 5, 200),
                (7, 7, 5, 245),
                (7, 4, 7, 196),
                (6, 4, 5, 120),
                (8, 6, 4, 192),
                (6, 4, 5, 120),
            ]
        );
    }

    #[test]
    fn ranked_sorts_descending_and_is_stable() {
        let table = score(&Configuration::default(), &Variant::Extended.risk_rules());
        let ranked = table.ranked();
        let rpns: Vec<i64> = ranked.rows().iter().map(|r| r.rpn).collect();
        assert_eq!(rpns, vec![280, 245, 210, 200, 196, 192, 150, 120, 120]);
        assert_eq!(ranked.rows()[7].component, "Monitor");
        assert_eq!(ranked.rows()[8].component, "Security");
        assert_eq!(table.highest().map(|r| r.component.as_str()), Some("Service"));
    }

    #[test]
    fn highest_prefers_first_on_ties() {
        let rules = vec![
            RiskRule::new("A", "a", Term::constant(2), Term::constant(1), Term::constant(1)),
            RiskRule::new("B", "b", Term::constant(1), Term::constant(2), Term::constant(1)),
        ];
        let table = score(&Configuration::default(), &rules);
        assert_eq!(table.highest().map(|r| r.component.as_str()), Some("A"));
        assert!(score(&Configuration::default(), &[]).highest().is_none());
    }

    #[test]
    fn unvalidated_huge_ratings_saturate() {
        let huge = Term::constant(10_000_000);
        let rules = vec![RiskRule::new("Huge", "Overflow", huge, huge, huge)];
        let table = score(&Configuration::default(), &rules);
        assert_eq!(table.rows()[0].rpn, i64::MAX);
    }

    #[test]
    fn score_is_idempotent() {
        let rules = Variant::Standard.risk_rules();
        let config = sample_sliders();
        assert_eq!(score(&config, &rules), score(&config, &rules));
    }
}
