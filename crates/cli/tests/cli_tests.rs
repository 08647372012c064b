//! CLI integration tests

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const NODES: &str = r#"
apiVersion: v1
kind: List
items:
- metadata:
    name: node-a
    labels:
      konvoy.mesosphere.com/node_pool: default
  status:
    allocatable:
      cpu: "4"
      memory: 8Gi
"#;

const PODS: &str = r#"
apiVersion: v1
kind: List
items:
- metadata:
    name: app
    namespace: ns
  spec:
    nodeName: node-a
    containers:
    - name: main
      resources:
        requests:
          cpu: 500m
          memory: 256Mi
    - name: helper
      resources: {}
- metadata:
    name: pending
    namespace: ns
  spec:
    containers:
    - name: main
      resources:
        requests:
          cpu: 250m
"#;

fn write_bundle(nodes: &str, pods: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let api = dir.path().join("cluster-data/api-resources");
    fs::create_dir_all(&api).unwrap();
    fs::write(api.join("nodes.yaml"), nodes).unwrap();
    fs::write(api.join("pods.yaml"), pods).unwrap();
    dir
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bundle-resources"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("BUNDLE_POOL_LABEL")
        .env_remove("BUNDLE_DEFAULT_FORMAT")
        .output()
        .expect("Failed to execute command")
}

fn run_resources(bundle: &Path, extra: &[&str]) -> Output {
    let dir = bundle.to_str().unwrap();
    let mut args = vec!["resources", "--bundle-dir", dir];
    args.extend_from_slice(extra);
    run(&args)
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = run(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("resources"), "Should show resources command");
    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("--pool-label"), "Should show pool-label option");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = run(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("bundle-resources"), "Should show binary name");
}

/// Test resources subcommand help
#[test]
fn test_resources_help() {
    let output = run(&["resources", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Resources help should succeed");
    assert!(stdout.contains("--bundle-dir"), "Should show bundle-dir option");
}

/// Test JSON output of a small bundle
#[test]
fn test_resources_json() {
    let bundle = write_bundle(NODES, PODS);
    let output = run_resources(bundle.path(), &["--format", "json"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let node = &report["nodes"]["node-a"];
    assert_eq!(node["pool"], "default");
    assert_eq!(node["cpu_allocatable"], 4.0);
    assert_eq!(node["memory_allocatable"], 8192.0);
    assert_eq!(node["cpu_request"], 0.5);
    assert_eq!(node["memory_request"], 256.0);
    assert_eq!(node["cpu_limit"], 1.0);
    assert_eq!(node["memory_limit"], 512.0);

    let unallocated = report["unallocated"].as_array().unwrap();
    assert_eq!(unallocated.len(), 1);
    assert_eq!(unallocated[0]["key"], "ns/pending");
    assert_eq!(unallocated[0]["cpu_request"], 0.25);
    assert!(report["generated_at"].is_string());
}

/// Test table output of a small bundle
#[test]
fn test_resources_table() {
    let bundle = write_bundle(NODES, PODS);
    let output = run_resources(bundle.path(), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Resources should succeed");
    assert!(stdout.contains("node-a"), "Should list the node");
    assert!(stdout.contains("ns/pending"), "Should list the unallocated pod");
    assert!(stdout.contains("500m"), "Should show the CPU request");
    assert!(stdout.contains("8.00Gi"), "Should show allocatable memory");
}

/// Test that a pod on an unknown node fails the run
#[test]
fn test_resources_dangling_node() {
    let pods = PODS.replace("nodeName: node-a", "nodeName: node-x");
    let bundle = write_bundle(NODES, &pods);
    let output = run_resources(bundle.path(), &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Dangling node should fail");
    assert!(stderr.contains("ns/app"), "Should name the pod: {stderr}");
    assert!(stderr.contains("node-x"), "Should name the node: {stderr}");
}

/// Test that a malformed quantity fails the run
#[test]
fn test_resources_malformed_quantity() {
    let pods = PODS.replace("memory: 256Mi", "memory: 256Q");
    let bundle = write_bundle(NODES, &pods);
    let output = run_resources(bundle.path(), &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Malformed quantity should fail");
    assert!(stderr.contains("256Q"), "Should show the value: {stderr}");
}

/// Test pool-label option
#[test]
fn test_pool_label_option() {
    let nodes = NODES.replace("konvoy.mesosphere.com/node_pool", "example.com/pool");
    let bundle = write_bundle(&nodes, PODS);

    let output = run_resources(bundle.path(), &["--format", "json"]);
    assert!(!output.status.success(), "Missing pool label should fail");

    let output = run_resources(
        bundle.path(),
        &["--format", "json", "--pool-label", "example.com/pool"],
    );
    assert!(output.status.success(), "Custom pool label should succeed");
}

/// Test missing bundle directory
#[test]
fn test_missing_bundle_dir() {
    let dir = TempDir::new().unwrap();
    let output = run_resources(&dir.path().join("absent"), &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success(), "Missing bundle should fail");
    assert!(stderr.contains("nodes.yaml"), "Should name the document: {stderr}");
}
