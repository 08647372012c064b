//! Folding pod totals into node totals

use crate::error::{AnalysisError, Result};
use crate::models::{ClusterSummary, NodeRecord, PodInventory, UnallocatedPod};
use crate::observability::StructuredLogger;
use std::collections::BTreeMap;

/// Add every scheduled pod's totals to its node.
///
/// Takes ownership of the freshly loaded node map and returns it inside the
/// summary with usage filled in. A pod naming a node that is not in the map
/// aborts the fold. Unallocated pods are reported with their own totals,
/// sorted by key.
pub fn fold(
    mut nodes: BTreeMap<String, NodeRecord>,
    inventory: &PodInventory,
    logger: &StructuredLogger,
) -> Result<ClusterSummary> {
    let mut unallocated = Vec::new();

    for (key, pod) in &inventory.pods {
        match pod.assignment.node_name() {
            Some(node_name) => {
                let node = nodes
                    .get_mut(node_name)
                    .ok_or_else(|| AnalysisError::DanglingNode {
                        pod: key.clone(),
                        node: node_name.to_string(),
                    })?;
                node.usage += pod.totals;
            }
            None => unallocated.push(UnallocatedPod {
                key: key.clone(),
                totals: pod.totals,
            }),
        }
    }

    let summary = ClusterSummary { nodes, unallocated };
    logger.log_aggregation_complete(
        summary.nodes.len(),
        inventory.pods.len(),
        summary.unallocated.len(),
        &summary.cluster_usage(),
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, PodRecord, ResourceTotals};

    fn pod(node: Option<&str>, cpu_request: f64, memory_limit: f64) -> PodRecord {
        PodRecord {
            totals: ResourceTotals {
                cpu_request,
                memory_limit,
                ..Default::default()
            },
            assignment: match node {
                Some(n) => Assignment::Node(n.to_string()),
                None => Assignment::Unallocated,
            },
        }
    }

    fn two_nodes() -> BTreeMap<String, NodeRecord> {
        let mut nodes = BTreeMap::new();
        nodes.insert("node-a".to_string(), NodeRecord::new("default", 4.0, 8192.0));
        nodes.insert("node-b".to_string(), NodeRecord::new("gpu", 8.0, 16384.0));
        nodes
    }

    #[test]
    fn test_fold_sums_per_node() {
        let mut inventory = PodInventory::default();
        inventory.pods.insert("ns/a".into(), pod(Some("node-a"), 0.5, 512.0));
        inventory.pods.insert("ns/b".into(), pod(Some("node-a"), 0.25, 256.0));
        inventory.pods.insert("ns/c".into(), pod(Some("node-b"), 2.0, 0.0));

        let summary = fold(two_nodes(), &inventory, &StructuredLogger::default()).unwrap();

        let a = &summary.nodes["node-a"];
        assert_eq!(a.usage.cpu_request, 0.75);
        assert_eq!(a.usage.memory_limit, 768.0);
        assert_eq!(a.cpu_allocatable, 4.0);
        assert_eq!(summary.nodes["node-b"].usage.cpu_request, 2.0);
        assert!(summary.unallocated.is_empty());
    }

    #[test]
    fn test_fold_conserves_requests() {
        let mut inventory = PodInventory::default();
        inventory.pods.insert("ns/a".into(), pod(Some("node-a"), 0.5, 0.0));
        inventory.pods.insert("ns/b".into(), pod(Some("node-b"), 1.5, 0.0));
        inventory.pods.insert("ns/c".into(), pod(None, 3.0, 0.0));
        inventory.unallocated.push("ns/c".into());

        let summary = fold(two_nodes(), &inventory, &StructuredLogger::default()).unwrap();

        let scheduled: f64 = inventory
            .pods
            .values()
            .filter(|p| p.assignment != Assignment::Unallocated)
            .map(|p| p.totals.cpu_request)
            .sum();
        assert_eq!(summary.cluster_usage().cpu_request, scheduled);
        assert_eq!(summary.cluster_usage().cpu_request, 2.0);
    }

    #[test]
    fn test_fold_reports_unallocated_sorted() {
        let mut inventory = PodInventory::default();
        inventory.pods.insert("zeta/p".into(), pod(None, 1.0, 0.0));
        inventory.pods.insert("alpha/p".into(), pod(None, 0.5, 0.0));

        let summary = fold(two_nodes(), &inventory, &StructuredLogger::default()).unwrap();

        let keys: Vec<_> = summary.unallocated.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["alpha/p", "zeta/p"]);
        assert_eq!(summary.unallocated[1].totals.cpu_request, 1.0);
        assert_eq!(summary.nodes["node-a"].usage, ResourceTotals::default());
    }

    #[test]
    fn test_fold_rejects_unknown_node() {
        let mut inventory = PodInventory::default();
        inventory.pods.insert("ns/lost".into(), pod(Some("node-z"), 1.0, 0.0));

        let err = fold(two_nodes(), &inventory, &StructuredLogger::default()).unwrap_err();
        match err {
            AnalysisError::DanglingNode { pod, node } => {
                assert_eq!(pod, "ns/lost");
                assert_eq!(node, "node-z");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
