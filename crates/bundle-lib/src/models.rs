//! Core data models for bundle analysis

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// CPU (cores) and memory (MiB) limits and requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub cpu_limit: f64,
    pub memory_limit: f64,
    pub cpu_request: f64,
    pub memory_request: f64,
}

impl AddAssign for ResourceTotals {
    fn add_assign(&mut self, other: Self) {
        self.cpu_limit += other.cpu_limit;
        self.memory_limit += other.memory_limit;
        self.cpu_request += other.cpu_request;
        self.memory_request += other.memory_request;
    }
}

/// Static capacity of a node plus the resources its pods ask for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub pool: String,
    pub cpu_allocatable: f64,
    pub memory_allocatable: f64,
    #[serde(flatten)]
    pub usage: ResourceTotals,
}

impl NodeRecord {
    /// Create a node with zeroed usage accumulators
    pub fn new(pool: impl Into<String>, cpu_allocatable: f64, memory_allocatable: f64) -> Self {
        Self {
            pool: pool.into(),
            cpu_allocatable,
            memory_allocatable,
            usage: ResourceTotals::default(),
        }
    }
}

/// Where a pod is scheduled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "node")]
pub enum Assignment {
    Node(String),
    Unallocated,
}

impl Assignment {
    pub fn node_name(&self) -> Option<&str> {
        match self {
            Assignment::Node(name) => Some(name),
            Assignment::Unallocated => None,
        }
    }
}

/// Summed container resources of a single pod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodRecord {
    pub totals: ResourceTotals,
    pub assignment: Assignment,
}

/// Pods extracted from one pod-list document, keyed by `namespace/name`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodInventory {
    pub pods: BTreeMap<String, PodRecord>,
    /// Keys of pods without a node, in document order
    pub unallocated: Vec<String>,
}

/// A pod that no node accounts for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnallocatedPod {
    pub key: String,
    #[serde(flatten)]
    pub totals: ResourceTotals,
}

/// Result of folding pods into nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub nodes: BTreeMap<String, NodeRecord>,
    /// Sorted by pod key
    pub unallocated: Vec<UnallocatedPod>,
}

impl ClusterSummary {
    /// Usage summed over every node
    pub fn cluster_usage(&self) -> ResourceTotals {
        let mut total = ResourceTotals::default();
        for node in self.nodes.values() {
            total += node.usage;
        }
        total
    }

    /// Node names grouped by pool label
    pub fn nodes_by_pool(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut pools: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (name, node) in &self.nodes {
            pools.entry(node.pool.as_str()).or_default().push(name.as_str());
        }
        pools
    }
}
