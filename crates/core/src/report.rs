//! Report assembly over an abstract workload source
//!
//! The driver walks the roster in declared order, fetches each node's
//! workloads through the [`WorkloadSource`] seam, aggregates, and
//! rolls the results up per pool. A fetch failure is contained to its
//! node: it becomes an explicit error marker in the report and the
//! node contributes zero to the pool totals.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::{summarize_node, CategoryTotals, NodeAggregate, PoolAggregate};
use crate::error::{ConfigError, FetchError};
use crate::models::WorkloadRecord;
use crate::roster::Roster;
use crate::rules::RuleSet;

/// Provider of workload records for a single node.
///
/// Implementations must return every workload scheduled on the given
/// node; pre-filtering terminal phases is allowed but not required,
/// the engine's own filter is idempotent either way.
#[async_trait]
pub trait WorkloadSource {
    async fn fetch_workloads(&self, node: &str) -> Result<Vec<WorkloadRecord>, FetchError>;
}

/// Outcome for one node: either its aggregate or an error marker.
///
/// Exactly one of `aggregate` and `error` is set; an errored node is
/// never rendered as silently-zero counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeReport {
    pub node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<NodeAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NodeReport {
    fn succeeded(node: &str, aggregate: NodeAggregate) -> Self {
        Self {
            node: node.to_string(),
            aggregate: Some(aggregate),
            error: None,
        }
    }

    fn failed(node: &str, error: &FetchError) -> Self {
        Self {
            node: node.to_string(),
            aggregate: None,
            error: Some(error.to_string()),
        }
    }
}

/// One pool's nodes plus the pool-level rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolReport {
    pub name: String,
    pub id: String,
    pub nodes: Vec<NodeReport>,
    pub categories: CategoryTotals,
    pub total_active: u64,
}

/// The fully assembled report, pools in roster order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Free-form label for the cluster context the data came from.
    pub context: String,
    pub generated_at: DateTime<Utc>,
    pub pools: Vec<PoolReport>,
}

/// Walk the roster and assemble the full report.
///
/// Sequential traversal: each node's fetch and aggregation completes
/// before the next begins. Per-node fetch errors are recorded and the
/// run continues; only a bad roster aborts.
pub async fn build_report<S: WorkloadSource>(
    roster: &Roster,
    rules: &RuleSet,
    source: &S,
    context: &str,
) -> Result<Report, ConfigError> {
    roster.validate()?;

    let mut pools = Vec::with_capacity(roster.pools.len());
    for pool in &roster.pools {
        let mut nodes = Vec::with_capacity(pool.nodes.len());
        let mut totals = PoolAggregate::default();

        for node in &pool.nodes {
            match source.fetch_workloads(node).await {
                Ok(records) => {
                    let aggregate = summarize_node(&records, rules);
                    debug!(pool = %pool.name, node = %node, active = aggregate.total_active, "node aggregated");
                    totals.absorb(&aggregate);
                    nodes.push(NodeReport::succeeded(node, aggregate));
                }
                Err(err) => {
                    warn!(pool = %pool.name, node = %node, error = %err, "workload fetch failed, continuing");
                    nodes.push(NodeReport::failed(node, &err));
                }
            }
        }

        pools.push(PoolReport {
            name: pool.name.clone(),
            id: pool.id.clone(),
            nodes,
            categories: totals.categories,
            total_active: totals.total_active,
        });
    }

    Ok(Report {
        context: context.to_string(),
        generated_at: Utc::now(),
        pools,
    })
}
