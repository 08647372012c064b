//! Pod resource extraction

use crate::error::{AnalysisError, Result};
use crate::models::{Assignment, PodInventory, PodRecord, ResourceTotals};
use crate::observability::StructuredLogger;
use crate::schema::{ContainerSpec, PodItem, PodList, ResourceList};
use crate::settings::DefaultResourcePolicy;
use crate::units::{convert_cpu, convert_memory};

/// `namespace/name` key identifying a pod within a bundle
pub fn pod_key(item: &PodItem) -> Result<String> {
    let namespace = item.metadata.namespace.as_deref().ok_or_else(|| {
        AnalysisError::missing(format!("pod `{}`", item.metadata.name), "metadata.namespace")
    })?;
    Ok(format!("{}/{}", namespace, item.metadata.name))
}

/// Extract every pod of a pod-list document.
///
/// Fails on the first duplicate key or malformed pod; no partial inventory
/// is returned.
pub fn extract_pods(
    list: &PodList,
    policy: &DefaultResourcePolicy,
    logger: &StructuredLogger,
) -> Result<PodInventory> {
    let mut inventory = PodInventory::default();

    for item in &list.items {
        let key = pod_key(item)?;
        if inventory.pods.contains_key(&key) {
            return Err(AnalysisError::DuplicatePod(key));
        }

        let record = pod_record(item, &key, policy, logger)?;
        if record.assignment == Assignment::Unallocated {
            logger.log_unallocated_pod(&key);
            inventory.unallocated.push(key.clone());
        }
        inventory.pods.insert(key, record);
    }

    Ok(inventory)
}

/// Sum the container resources of one pod and resolve its node.
pub fn extract_pod(
    item: &PodItem,
    policy: &DefaultResourcePolicy,
    logger: &StructuredLogger,
) -> Result<PodRecord> {
    let key = pod_key(item)?;
    pod_record(item, &key, policy, logger)
}

fn pod_record(
    item: &PodItem,
    key: &str,
    policy: &DefaultResourcePolicy,
    logger: &StructuredLogger,
) -> Result<PodRecord> {
    let record = format!("pod `{}`", key);

    let spec = item
        .spec
        .as_ref()
        .ok_or_else(|| AnalysisError::missing(&record, "spec"))?;
    let containers = spec
        .containers
        .as_ref()
        .ok_or_else(|| AnalysisError::missing(&record, "spec.containers"))?;

    let assignment = match &spec.node_name {
        Some(node) => Assignment::Node(node.clone()),
        None => Assignment::Unallocated,
    };

    let mut totals = ResourceTotals::default();
    for (index, container) in containers.iter().enumerate() {
        totals += container_totals(container, index, policy, key, logger)?;
    }

    Ok(PodRecord { totals, assignment })
}

/// Resources a single container adds to its pod.
///
/// A container without a requests block is charged the default policy on
/// its limits. Its own limits are still converted so a malformed quantity
/// fails the run, but they do not count towards the totals.
fn container_totals(
    container: &ContainerSpec,
    index: usize,
    policy: &DefaultResourcePolicy,
    pod: &str,
    logger: &StructuredLogger,
) -> Result<ResourceTotals> {
    let record = format!("pod `{}`", pod);
    let label = container
        .name
        .clone()
        .unwrap_or_else(|| index.to_string());
    let resources = &container.resources;

    let limits_field = format!("spec.containers[{label}].resources.limits");
    let limits = match &resources.limits {
        Some(limits) => list_totals(limits, &record, &limits_field)?,
        None => (0.0, 0.0),
    };

    let Some(requests) = &resources.requests else {
        logger.log_default_applied(pod, &label, resources.limits.is_some());
        return Ok(ResourceTotals {
            cpu_limit: policy.cpu,
            memory_limit: policy.memory_mib,
            ..Default::default()
        });
    };

    let mut totals = ResourceTotals {
        cpu_limit: limits.0,
        memory_limit: limits.1,
        ..Default::default()
    };

    let field = format!("spec.containers[{label}].resources.requests");
    let (cpu, memory) = list_totals(requests, &record, &field)?;
    totals.cpu_request = cpu;
    totals.memory_request = memory;

    Ok(totals)
}

/// Converted `(cpu, memory)` of a resource map; absent entries count as zero.
fn list_totals(list: &ResourceList, record: &str, field: &str) -> Result<(f64, f64)> {
    let cpu = match &list.cpu {
        Some(q) => convert_cpu(q.as_str())
            .map_err(|e| AnalysisError::quantity(record, format!("{field}.cpu"), e))?,
        None => 0.0,
    };
    let memory = match &list.memory {
        Some(q) => convert_memory(q.as_str())
            .map_err(|e| AnalysisError::quantity(record, format!("{field}.memory"), e))?,
        None => 0.0,
    };
    Ok((cpu, memory))
}
