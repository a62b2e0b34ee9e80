//! Namespace classification rules
//!
//! An ordered rule table maps namespaces to operational categories.
//! Rules are scanned in declared order and the first rule with any
//! matching pattern wins, so overlaps across categories are resolved
//! by rule order, not by pattern specificity. Reordering the table
//! changes results for namespaces that match more than one category.

use regex::{Regex, RegexBuilder};

use crate::error::ConfigError;

/// Category assigned when no rule matches.
pub const FALLBACK_CATEGORY: &str = "otros";

/// One classification rule: a category and its ordered patterns.
#[derive(Debug, Clone)]
struct CategoryRule {
    category: String,
    raw: Vec<String>,
    patterns: Vec<Regex>,
}

/// Ordered, pre-compiled classification rule table.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
    display_order: Vec<String>,
}

impl RuleSet {
    /// Compile a rule table from `(category, patterns)` entries.
    ///
    /// Entry order is precedence order. Patterns are compiled
    /// case-insensitively; word boundaries must be written explicitly
    /// (`\bepm\b`). The display order is the declaration order with
    /// the fallback category last.
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Result<Self, ConfigError> {
        let mut rules = Vec::with_capacity(entries.len());
        let mut display_order = Vec::with_capacity(entries.len() + 1);

        for (category, raw) in entries {
            let mut patterns = Vec::with_capacity(raw.len());
            for pattern in &raw {
                let compiled = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ConfigError::InvalidPattern {
                        category: category.clone(),
                        pattern: pattern.clone(),
                        source,
                    })?;
                patterns.push(compiled);
            }
            display_order.push(category.clone());
            rules.push(CategoryRule {
                category,
                raw,
                patterns,
            });
        }
        display_order.push(FALLBACK_CATEGORY.to_string());

        Ok(Self {
            rules,
            display_order,
        })
    }

    fn with_display_order(mut self, order: &[&str]) -> Self {
        self.display_order = order.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Classify a namespace. Total: always returns exactly one label.
    pub fn classify<'a>(&'a self, namespace: &str) -> &'a str {
        for rule in &self.rules {
            if rule.patterns.iter().any(|p| p.is_match(namespace)) {
                return &rule.category;
            }
        }
        FALLBACK_CATEGORY
    }

    /// The fixed category order reports are emitted in, fallback
    /// included. Every category appears whether or not it has counts.
    pub fn display_categories(&self) -> &[String] {
        &self.display_order
    }

    /// `(category, patterns)` pairs in precedence order, for the
    /// report legend. Deriving the legend from the configured rules
    /// keeps it in sync with actual classification behavior.
    pub fn legend(&self) -> Vec<(&str, &[String])> {
        self.rules
            .iter()
            .map(|r| (r.category.as_str(), r.raw.as_slice()))
            .collect()
    }
}

impl Default for RuleSet {
    /// The production rule table. Precedence: integraciones before
    /// apps_soporte before plataforma before base_sistema, then the
    /// fallback.
    fn default() -> Self {
        let entries = vec![
            ("integraciones", vec![r"-integraciones"]),
            ("apps_soporte", vec![r"activo", r"tokin", r"\bepm\b", r"vipo"]),
            (
                "plataforma",
                vec![
                    r"cattle",
                    r"rancher",
                    r"\bargo\b",
                    r"harbor",
                    r"fleet",
                    r"cert-manager",
                    r"devops",
                    r"conf-manager",
                ],
            ),
            (
                "base_sistema",
                vec![
                    r"\bkube\b",
                    r"prometheus",
                    r"thanos",
                    r"eck8",
                    r"heartbeat",
                    r"ingress",
                    r"\bvpa\b",
                    r"synthetics",
                    r"uptime",
                ],
            ),
        ]
        .into_iter()
        .map(|(c, ps)| {
            (
                c.to_string(),
                ps.into_iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect();

        Self::new(entries)
            .expect("default rule table must compile")
            .with_display_order(&[
                "apps_soporte",
                "integraciones",
                "plataforma",
                "base_sistema",
                FALLBACK_CATEGORY,
            ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_total() {
        let rules = RuleSet::default();
        let labels = [
            "apps_soporte",
            "integraciones",
            "plataforma",
            "base_sistema",
            "otros",
        ];
        for ns in ["", "random-app", "kube-system", "x-integraciones", "epm"] {
            assert!(labels.contains(&rules.classify(ns)));
        }
    }

    #[test]
    fn first_rule_wins_over_later_matches() {
        let rules = RuleSet::default();
        // Matches both rule 1 (-integraciones) and rule 4 (\bkube\b);
        // rule order decides.
        assert_eq!(rules.classify("kube-integraciones"), "integraciones");
    }

    #[test]
    fn classification_is_case_insensitive() {
        let rules = RuleSet::default();
        assert_eq!(rules.classify("KUBE-SYSTEM"), "base_sistema");
        assert_eq!(rules.classify("Prod-INTEGRACIONES"), "integraciones");
        assert_eq!(rules.classify("ACTIVO-web"), "apps_soporte");
    }

    #[test]
    fn word_bounded_patterns_do_not_match_inside_words() {
        let rules = RuleSet::default();
        assert_eq!(rules.classify("epm"), "apps_soporte");
        assert_eq!(rules.classify("epm-prod"), "apps_soporte");
        assert_eq!(rules.classify("epmx"), "otros");
        assert_eq!(rules.classify("kubernetes-dashboard"), "otros");
        assert_eq!(rules.classify("kube-system"), "base_sistema");
        assert_eq!(rules.classify("vpax"), "otros");
    }

    #[test]
    fn unmatched_namespaces_fall_back() {
        let rules = RuleSet::default();
        assert_eq!(rules.classify("totally-unrelated"), "otros");
        assert_eq!(rules.classify(""), "otros");
    }

    #[test]
    fn display_order_is_fixed_and_includes_fallback() {
        let rules = RuleSet::default();
        assert_eq!(
            rules.display_categories(),
            &[
                "apps_soporte",
                "integraciones",
                "plataforma",
                "base_sistema",
                "otros"
            ]
        );
    }

    #[test]
    fn custom_rule_sets_compile_and_classify() {
        let rules = RuleSet::new(vec![(
            "web".to_string(),
            vec![r"nginx".to_string(), r"\bhttpd\b".to_string()],
        )])
        .unwrap();
        assert_eq!(rules.classify("nginx-ingress"), "web");
        assert_eq!(rules.classify("postgres"), "otros");
        assert_eq!(rules.display_categories(), &["web", "otros"]);
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let err = RuleSet::new(vec![("bad".to_string(), vec![r"(".to_string()])]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { category, .. } if category == "bad"));
    }

    #[test]
    fn legend_reflects_configured_rules() {
        let rules = RuleSet::default();
        let legend = rules.legend();
        assert_eq!(legend.len(), 4);
        assert_eq!(legend[0].0, "integraciones");
        assert!(legend[1].1.contains(&r"\bepm\b".to_string()));
    }
}
