//! Bundle layout and the end-to-end analysis entry points
//!
//! A diagnostics bundle is expected to be extracted already; this module only
//! knows where the inventory documents live inside the extracted tree.

use crate::aggregate::fold;
use crate::error::{AnalysisError, Result};
use crate::inventory::{extract_pods, load_nodes};
use crate::models::ClusterSummary;
use crate::observability::StructuredLogger;
use crate::schema::{NodeList, PodList};
use crate::settings::AnalysisSettings;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Directory holding the API resource dumps, relative to the bundle root
pub const API_RESOURCES_DIR: &str = "cluster-data/api-resources";

pub const NODES_DOCUMENT: &str = "nodes.yaml";
pub const PODS_DOCUMENT: &str = "pods.yaml";

/// Paths of the inventory documents inside an extracted bundle
#[derive(Debug, Clone)]
pub struct BundleLayout {
    root: PathBuf,
}

/// Parsed inventory documents of one bundle
#[derive(Debug, Clone)]
pub struct BundleDocuments {
    pub nodes: NodeList,
    pub pods: PodList,
}

impl BundleLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.root.join(API_RESOURCES_DIR).join(NODES_DOCUMENT)
    }

    pub fn pods_path(&self) -> PathBuf {
        self.root.join(API_RESOURCES_DIR).join(PODS_DOCUMENT)
    }

    /// Name used to tag log events, the last path component of the root
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Read and parse both inventory documents
    pub fn load(&self, logger: &StructuredLogger) -> Result<BundleDocuments> {
        let nodes: NodeList = read_document(&self.nodes_path())?;
        logger.log_document_loaded(NODES_DOCUMENT, nodes.items.len());

        let pods: PodList = read_document(&self.pods_path())?;
        logger.log_document_loaded(PODS_DOCUMENT, pods.items.len());

        Ok(BundleDocuments { nodes, pods })
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| AnalysisError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// Run node loading, pod extraction and the fold over parsed documents
pub fn analyze(
    documents: &BundleDocuments,
    settings: &AnalysisSettings,
    logger: &StructuredLogger,
) -> Result<ClusterSummary> {
    let nodes = load_nodes(&documents.nodes, settings, logger)?;
    let pods = extract_pods(&documents.pods, &settings.default_policy, logger)?;
    fold(nodes, &pods, logger)
}

/// Load an extracted bundle from disk and analyze it
pub fn analyze_bundle(root: impl AsRef<Path>, settings: &AnalysisSettings) -> Result<ClusterSummary> {
    let layout = BundleLayout::new(root.as_ref());
    let logger = StructuredLogger::new(layout.name());
    let documents = layout.load(&logger)?;
    analyze(&documents, settings, &logger)
}
