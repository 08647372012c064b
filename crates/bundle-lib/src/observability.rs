//! Structured logging for analysis runs
//!
//! All events carry the bundle they belong to so runs over several bundles
//! can be told apart in aggregated logs.

use crate::models::ResourceTotals;
use tracing::{debug, info, warn};

/// Structured logger for analysis events
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    bundle: String,
}

impl StructuredLogger {
    pub fn new(bundle: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
        }
    }

    /// Log a parsed inventory document
    pub fn log_document_loaded(&self, document: &str, items: usize) {
        info!(
            event = "document_loaded",
            bundle = %self.bundle,
            document = %document,
            items = items,
            "Loaded inventory document"
        );
    }

    /// Log a node registered from the node inventory
    pub fn log_node_registered(&self, node: &str, pool: &str, cpu: f64, memory_mib: f64) {
        debug!(
            event = "node_registered",
            bundle = %self.bundle,
            node = %node,
            pool = %pool,
            cpu_allocatable = cpu,
            memory_allocatable_mib = memory_mib,
            "Registered node"
        );
    }

    /// Log a container that fell back to the default resource policy
    pub fn log_default_applied(&self, pod: &str, container: &str, had_limits: bool) {
        debug!(
            event = "default_resources_applied",
            bundle = %self.bundle,
            pod = %pod,
            container = %container,
            limits_ignored = had_limits,
            "Container has no requests block, using default limits"
        );
    }

    /// Log a pod that has not been scheduled
    pub fn log_unallocated_pod(&self, pod: &str) {
        warn!(
            event = "pod_unallocated",
            bundle = %self.bundle,
            pod = %pod,
            "Pod has no node assignment"
        );
    }

    /// Log the end of a successful fold
    pub fn log_aggregation_complete(
        &self,
        nodes: usize,
        pods: usize,
        unallocated: usize,
        usage: &ResourceTotals,
    ) {
        info!(
            event = "aggregation_complete",
            bundle = %self.bundle,
            nodes = nodes,
            pods = pods,
            unallocated = unallocated,
            cpu_request = usage.cpu_request,
            cpu_limit = usage.cpu_limit,
            memory_request_mib = usage.memory_request,
            memory_limit_mib = usage.memory_limit,
            "Aggregated pod resources into nodes"
        );
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new("in-memory")
    }
}
