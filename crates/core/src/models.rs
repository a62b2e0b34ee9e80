//! Core data models for the pod-mix engine

use serde::{Deserialize, Serialize};

/// One workload (pod) observed on a node.
///
/// The lifecycle phase is kept as the raw string reported by the
/// cluster; an empty or unrecognized phase counts as active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadRecord {
    pub namespace: String,
    pub phase: String,
}

impl WorkloadRecord {
    pub fn new(namespace: impl Into<String>, phase: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            phase: phase.into(),
        }
    }

    /// Whether this workload counts toward active totals.
    ///
    /// Only the terminal phases `Succeeded` and `Failed` are excluded
    /// (case-insensitively); completed jobs and cronjobs would
    /// otherwise add noise to the counts.
    pub fn is_active(&self) -> bool {
        !self.phase.eq_ignore_ascii_case("succeeded") && !self.phase.eq_ignore_ascii_case("failed")
    }
}
