//! Node inventory loading

use crate::error::{AnalysisError, Result};
use crate::models::NodeRecord;
use crate::observability::StructuredLogger;
use crate::schema::{NodeItem, NodeList};
use crate::settings::AnalysisSettings;
use crate::units::{convert_cpu, convert_memory};
use std::collections::BTreeMap;

/// Build the node name -> record map from a node-list document.
///
/// Every node must carry the pool label and both allocatable quantities.
/// A node name seen twice aborts the load.
pub fn load_nodes(
    list: &NodeList,
    settings: &AnalysisSettings,
    logger: &StructuredLogger,
) -> Result<BTreeMap<String, NodeRecord>> {
    let mut nodes = BTreeMap::new();

    for item in &list.items {
        let name = &item.metadata.name;
        if nodes.contains_key(name) {
            return Err(AnalysisError::DuplicateNode(name.clone()));
        }

        let record = node_record(item, &settings.pool_label_key)?;
        logger.log_node_registered(
            name,
            &record.pool,
            record.cpu_allocatable,
            record.memory_allocatable,
        );
        nodes.insert(name.clone(), record);
    }

    Ok(nodes)
}

fn node_record(item: &NodeItem, pool_label_key: &str) -> Result<NodeRecord> {
    let record = format!("node `{}`", item.metadata.name);

    let pool = item
        .metadata
        .labels
        .get(pool_label_key)
        .ok_or_else(|| AnalysisError::missing(&record, format!("metadata.labels[{pool_label_key}]")))?;

    let allocatable = item
        .status
        .as_ref()
        .and_then(|status| status.allocatable.as_ref())
        .ok_or_else(|| AnalysisError::missing(&record, "status.allocatable"))?;

    let cpu = allocatable
        .cpu
        .as_ref()
        .ok_or_else(|| AnalysisError::missing(&record, "status.allocatable.cpu"))?;
    let cpu = convert_cpu(cpu.as_str())
        .map_err(|e| AnalysisError::quantity(&record, "status.allocatable.cpu", e))?;

    let memory = allocatable
        .memory
        .as_ref()
        .ok_or_else(|| AnalysisError::missing(&record, "status.allocatable.memory"))?;
    let memory = convert_memory(memory.as_str())
        .map_err(|e| AnalysisError::quantity(&record, "status.allocatable.memory", e))?;

    Ok(NodeRecord::new(pool.clone(), cpu, memory))
}
