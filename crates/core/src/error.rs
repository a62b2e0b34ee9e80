//! Error types for configuration and fetch boundaries
//!
//! Classification and aggregation are total functions and have no
//! error channel; everything that can fail does so either before the
//! run starts (roster/rule configuration) or at the per-node fetch
//! boundary.

use thiserror::Error;

/// Fatal configuration problems, detected before any fetch happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The roster contains no node pools at all.
    #[error("roster contains no node pools")]
    EmptyRoster,

    /// A pool was declared without any nodes.
    #[error("node pool '{0}' contains no nodes")]
    EmptyPool(String),

    /// A pool lists an empty string as a node identifier.
    #[error("node pool '{0}' contains an empty node identifier")]
    EmptyNodeName(String),

    /// A classification pattern failed to compile.
    #[error("invalid pattern '{pattern}' for category '{category}'")]
    InvalidPattern {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Per-node fetch failures, recovered locally by the report driver.
///
/// A `FetchError` never aborts the run: the driver records it in the
/// report and the node contributes zero to pool totals.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The workload source could not be queried for this node.
    #[error("failed to list workloads for node {node}: {reason}")]
    Query { node: String, reason: String },

    /// The workload source gave up waiting for this node.
    #[error("timed out listing workloads for node {node}")]
    Timeout { node: String },
}
