//! Per-node and per-pool workload aggregation
//!
//! Pure computation: filter terminal workloads, count per namespace,
//! classify each namespace once and roll the counts up into category
//! totals. For every aggregate the cross-check invariant holds:
//! `total_active == sum of namespace counts == sum of category counts`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::WorkloadRecord;
use crate::rules::RuleSet;

/// Active-workload counts keyed by category.
///
/// Categories never seen in the data read as zero. Aggregates built
/// by [`summarize_node`] carry the full configured key set, zeros
/// included, so the report shape is uniform across runs; report
/// emission still iterates the rule set's fixed display order since
/// the map itself is ordered alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    counts: BTreeMap<String, u64>,
}

impl CategoryTotals {
    pub fn add(&mut self, category: &str, count: u64) {
        *self.counts.entry(category.to_string()).or_insert(0) += count;
    }

    /// Count for a category, zero when unseen.
    pub fn get(&self, category: &str) -> u64 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    pub fn merge(&mut self, other: &CategoryTotals) {
        for (category, count) in &other.counts {
            self.add(category, *count);
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Aggregated active-workload counts for a single node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeAggregate {
    /// Active workloads per namespace, lexicographically ordered.
    pub namespace_counts: BTreeMap<String, u64>,
    /// The same counts rolled up by category.
    pub categories: CategoryTotals,
    /// Total active workloads on the node.
    pub total_active: u64,
}

/// Build the aggregate for one node from its raw workload records.
///
/// Records in terminal phases are dropped; duplicates within a
/// namespace are counted, not deduplicated, since distinct pods
/// legitimately share a namespace.
pub fn summarize_node(records: &[WorkloadRecord], rules: &RuleSet) -> NodeAggregate {
    let mut namespace_counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_active()) {
        *namespace_counts.entry(record.namespace.clone()).or_insert(0) += 1;
    }

    // Seed every configured category so the aggregate always carries
    // the full, fixed key set even when counts are zero.
    let mut categories = CategoryTotals::default();
    for category in rules.display_categories() {
        categories.add(category, 0);
    }

    let mut total_active = 0;
    for (namespace, count) in &namespace_counts {
        categories.add(rules.classify(namespace), *count);
        total_active += count;
    }

    NodeAggregate {
        namespace_counts,
        categories,
        total_active,
    }
}

/// Running category totals for a pool, fed node by node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolAggregate {
    pub categories: CategoryTotals,
    pub total_active: u64,
}

impl PoolAggregate {
    /// Fold one node's aggregate into the pool totals.
    pub fn absorb(&mut self, node: &NodeAggregate) {
        self.categories.merge(&node.categories);
        self.total_active += node.total_active;
    }
}

/// Percentage of `part` over `total`, zero-guarded.
pub fn pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 * 100.0) / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ns: &str, phase: &str) -> WorkloadRecord {
        WorkloadRecord::new(ns, phase)
    }

    #[test]
    fn terminal_phases_are_excluded() {
        let rules = RuleSet::default();
        let records = vec![
            record("a", "Running"),
            record("a", "Succeeded"),
            record("b", "Failed"),
        ];
        let agg = summarize_node(&records, &rules);

        assert_eq!(agg.namespace_counts.get("a"), Some(&1));
        assert_eq!(agg.namespace_counts.get("b"), None);
        assert_eq!(agg.total_active, 1);
    }

    #[test]
    fn duplicate_namespaces_are_counted() {
        let rules = RuleSet::default();
        let records = vec![
            record("prod-web", "Running"),
            record("prod-web", "Running"),
            record("prod-web", "Pending"),
        ];
        let agg = summarize_node(&records, &rules);

        assert_eq!(agg.namespace_counts["prod-web"], 3);
        assert_eq!(agg.total_active, 3);
    }

    #[test]
    fn counts_land_in_the_classified_category() {
        let rules = RuleSet::default();
        let records = vec![
            record("prod-integraciones", "Running"),
            record("kube-system", "Running"),
            record("kube-system", "Running"),
            record("misc", "Running"),
        ];
        let agg = summarize_node(&records, &rules);

        assert_eq!(agg.categories.get("integraciones"), 1);
        assert_eq!(agg.categories.get("base_sistema"), 2);
        assert_eq!(agg.categories.get("otros"), 1);
        assert_eq!(agg.categories.get("plataforma"), 0);
    }

    #[test]
    fn cross_check_invariant_holds() {
        let rules = RuleSet::default();
        let records = vec![
            record("prod-integraciones", "Running"),
            record("kube-system", "Running"),
            record("epm", "Pending"),
            record("misc", ""),
            record("done", "Succeeded"),
        ];
        let agg = summarize_node(&records, &rules);

        let ns_sum: u64 = agg.namespace_counts.values().sum();
        assert_eq!(agg.total_active, ns_sum);
        assert_eq!(agg.total_active, agg.categories.total());
    }

    #[test]
    fn empty_input_yields_zero_aggregate() {
        let rules = RuleSet::default();
        let agg = summarize_node(&[], &rules);

        assert!(agg.namespace_counts.is_empty());
        assert_eq!(agg.total_active, 0);
        assert_eq!(agg.categories.total(), 0);
        // The full category key set is present even with no data.
        for category in rules.display_categories() {
            assert_eq!(agg.categories.get(category), 0);
        }
    }

    #[test]
    fn pool_absorb_sums_nodes() {
        let rules = RuleSet::default();
        let n1 = summarize_node(&[record("kube-system", "Running")], &rules);
        let n2 = summarize_node(
            &[record("kube-system", "Running"), record("misc", "Running")],
            &rules,
        );

        let mut pool = PoolAggregate::default();
        pool.absorb(&n1);
        pool.absorb(&n2);

        assert_eq!(pool.total_active, 3);
        assert_eq!(pool.categories.get("base_sistema"), 2);
        assert_eq!(pool.categories.get("otros"), 1);
        assert_eq!(pool.categories.total(), pool.total_active);
    }

    #[test]
    fn pool_absorb_is_order_independent() {
        let rules = RuleSet::default();
        let n1 = summarize_node(&[record("a", "Running")], &rules);
        let n2 = summarize_node(&[record("b", "Running"), record("b", "Running")], &rules);

        let mut forward = PoolAggregate::default();
        forward.absorb(&n1);
        forward.absorb(&n2);

        let mut reverse = PoolAggregate::default();
        reverse.absorb(&n2);
        reverse.absorb(&n1);

        assert_eq!(forward.total_active, reverse.total_active);
        assert_eq!(forward.categories, reverse.categories);
    }

    #[test]
    fn pct_is_zero_guarded() {
        assert_eq!(pct(0, 0), 0.0);
        assert_eq!(pct(3, 0), 0.0);
        assert_eq!(pct(1, 4), 25.0);
        assert_eq!(pct(3, 3), 100.0);
    }
}
