//! Analysis settings

use serde::{Deserialize, Serialize};

/// Node label carrying the pool name in Konvoy clusters
pub const DEFAULT_POOL_LABEL: &str = "konvoy.mesosphere.com/node_pool";

/// CPU charged to a container without a requests block (cores)
pub const DEFAULT_CONTAINER_CPU: f64 = 1.0;

/// Memory charged to a container without a requests block (MiB)
pub const DEFAULT_CONTAINER_MEMORY_MIB: f64 = 512.0;

/// Resources charged to a container that declares no requests
///
/// Mirrors the platform's default LimitRange. The values are added to the
/// pod's *limit* totals, not its requests, and the container's own limits
/// block is skipped. That asymmetry is how the cluster tooling has always
/// reported it and is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultResourcePolicy {
    pub cpu: f64,
    pub memory_mib: f64,
}

impl Default for DefaultResourcePolicy {
    fn default() -> Self {
        Self {
            cpu: DEFAULT_CONTAINER_CPU,
            memory_mib: DEFAULT_CONTAINER_MEMORY_MIB,
        }
    }
}

/// Knobs for a single analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Label key holding the node's pool
    pub pool_label_key: String,
    pub default_policy: DefaultResourcePolicy,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            pool_label_key: DEFAULT_POOL_LABEL.to_string(),
            default_policy: DefaultResourcePolicy::default(),
        }
    }
}
