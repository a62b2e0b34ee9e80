//! Core engine for the node pool pod-mix report
//!
//! This crate provides the pure aggregation pipeline:
//! - Roster configuration (node pools and their nodes)
//! - Namespace classification via an ordered rule table
//! - Per-node and per-pool active-workload aggregation
//! - Report assembly over an abstract workload source
//!
//! Everything here is deterministic and side-effect free; cluster
//! access lives behind the [`WorkloadSource`] trait and is provided
//! by the caller.

pub mod aggregate;
pub mod error;
pub mod models;
pub mod report;
pub mod roster;
pub mod rules;

pub use aggregate::{pct, summarize_node, CategoryTotals, NodeAggregate, PoolAggregate};
pub use error::{ConfigError, FetchError};
pub use models::WorkloadRecord;
pub use report::{build_report, NodeReport, PoolReport, Report, WorkloadSource};
pub use roster::{NodePool, Roster};
pub use rules::{RuleSet, FALLBACK_CATEGORY};
