//! Per-node resource aggregation command

use anyhow::{Context, Result};
use bundle_lib::{analyze_bundle, AnalysisSettings, ClusterSummary, NodeRecord};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use crate::output::{
    color_utilization, format_cpu, format_mib, print_info, print_table, print_warning,
    utilization, OutputFormat,
};

/// JSON report wrapping the summary with run metadata
#[derive(Serialize)]
struct ResourceReport<'a> {
    bundle: String,
    generated_at: String,
    #[serde(flatten)]
    summary: &'a ClusterSummary,
}

/// Row for the per-node table
#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "Node")]
    name: String,
    #[tabled(rename = "Pool")]
    pool: String,
    #[tabled(rename = "CPU Alloc")]
    cpu_allocatable: String,
    #[tabled(rename = "CPU Req")]
    cpu_request: String,
    #[tabled(rename = "CPU Lim")]
    cpu_limit: String,
    #[tabled(rename = "CPU Req %")]
    cpu_request_pct: String,
    #[tabled(rename = "Mem Alloc")]
    memory_allocatable: String,
    #[tabled(rename = "Mem Req")]
    memory_request: String,
    #[tabled(rename = "Mem Lim")]
    memory_limit: String,
    #[tabled(rename = "Mem Req %")]
    memory_request_pct: String,
}

impl NodeRow {
    fn new(name: &str, node: &NodeRecord) -> Self {
        Self {
            name: name.to_string(),
            pool: node.pool.clone(),
            cpu_allocatable: format_cpu(node.cpu_allocatable),
            cpu_request: format_cpu(node.usage.cpu_request),
            cpu_limit: format_cpu(node.usage.cpu_limit),
            cpu_request_pct: color_utilization(utilization(
                node.usage.cpu_request,
                node.cpu_allocatable,
            )),
            memory_allocatable: format_mib(node.memory_allocatable),
            memory_request: format_mib(node.usage.memory_request),
            memory_limit: format_mib(node.usage.memory_limit),
            memory_request_pct: color_utilization(utilization(
                node.usage.memory_request,
                node.memory_allocatable,
            )),
        }
    }
}

/// Row for the unallocated pods table
#[derive(Tabled)]
struct UnallocatedRow {
    #[tabled(rename = "Pod")]
    pod: String,
    #[tabled(rename = "CPU Req")]
    cpu_request: String,
    #[tabled(rename = "CPU Lim")]
    cpu_limit: String,
    #[tabled(rename = "Mem Req")]
    memory_request: String,
    #[tabled(rename = "Mem Lim")]
    memory_limit: String,
}

/// Analyse a bundle and print node usage
pub fn show_resources(
    bundle_dir: &Path,
    settings: &AnalysisSettings,
    format: OutputFormat,
) -> Result<()> {
    let summary = analyze_bundle(bundle_dir, settings)
        .with_context(|| format!("Failed to analyse bundle {}", bundle_dir.display()))?;

    match format {
        OutputFormat::Json => {
            let report = ResourceReport {
                bundle: bundle_dir.display().to_string(),
                generated_at: Utc::now().to_rfc3339(),
                summary: &summary,
            };
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Table => print_summary(bundle_dir, &summary),
    }

    Ok(())
}

fn print_summary(bundle_dir: &Path, summary: &ClusterSummary) {
    print_info(&format!(
        "Resource usage of the cluster in {}",
        bundle_dir.display()
    ));
    println!();

    if !summary.unallocated.is_empty() {
        print_warning(&format!(
            "{} unallocated pod(s) found",
            summary.unallocated.len()
        ));

        let rows: Vec<UnallocatedRow> = summary
            .unallocated
            .iter()
            .map(|p| UnallocatedRow {
                pod: p.key.clone(),
                cpu_request: format_cpu(p.totals.cpu_request),
                cpu_limit: format_cpu(p.totals.cpu_limit),
                memory_request: format_mib(p.totals.memory_request),
                memory_limit: format_mib(p.totals.memory_limit),
            })
            .collect();
        print_table(&rows);
        println!();
    }

    println!("{}", "Node Resources".bold());
    println!("{}", "=".repeat(50));

    let rows: Vec<NodeRow> = summary
        .nodes
        .iter()
        .map(|(name, node)| NodeRow::new(name, node))
        .collect();
    print_table(&rows);
    println!();

    let total = summary.cluster_usage();
    println!("{}", "Cluster Totals".bold());
    println!("{}", "-".repeat(50));
    println!(
        "CPU:     requests {}  limits {}",
        format_cpu(total.cpu_request).cyan(),
        format_cpu(total.cpu_limit).cyan()
    );
    println!(
        "Memory:  requests {}  limits {}",
        format_mib(total.memory_request).cyan(),
        format_mib(total.memory_limit).cyan()
    );

    for (pool, nodes) in summary.nodes_by_pool() {
        println!("Pool {}: {}", pool.bold(), nodes.join(", "));
    }
}
