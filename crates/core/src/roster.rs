//! Roster configuration: node pools and their nodes
//!
//! The roster is fixed at process start and treated as read-only
//! input. Pool and node order is display order and is preserved
//! as declared.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named group of cluster nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePool {
    /// Pool name, unique within the roster.
    pub name: String,
    /// Opaque external identifier (an OCID in our deployment).
    pub id: String,
    /// Node identifiers, by convention the node's private IP.
    pub nodes: Vec<String>,
}

impl NodePool {
    pub fn new(name: impl Into<String>, id: impl Into<String>, nodes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            nodes,
        }
    }
}

/// The full set of node pools to inventory, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub pools: Vec<NodePool>,
}

impl Roster {
    pub fn new(pools: Vec<NodePool>) -> Self {
        Self { pools }
    }

    /// Check the roster is usable before any cluster access happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pools.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for pool in &self.pools {
            if pool.nodes.is_empty() {
                return Err(ConfigError::EmptyPool(pool.name.clone()));
            }
            if pool.nodes.iter().any(|n| n.is_empty()) {
                return Err(ConfigError::EmptyNodeName(pool.name.clone()));
            }
        }
        Ok(())
    }
}
