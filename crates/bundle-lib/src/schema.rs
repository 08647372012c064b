//! Typed views of the bundle's inventory documents
//!
//! Only the fields the analysis reads are modelled; everything else in the
//! documents is ignored. Fields whose absence should be reported against a
//! named node or pod are optional here and checked by the loaders.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// A raw quantity string such as `"500m"` or `"8Gi"`
///
/// YAML writers occasionally emit whole-core CPU values unquoted, so plain
/// numbers are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity(pub String);

impl Quantity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Quantity(s),
            Repr::Integer(n) => Quantity(n.to_string()),
            Repr::Float(f) => Quantity(f.to_string()),
        })
    }
}

/// `kubectl get nodes -o yaml` output
#[derive(Debug, Clone, Deserialize)]
pub struct NodeList {
    pub items: Vec<NodeItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeItem {
    pub metadata: NodeMetadata,
    #[serde(default)]
    pub status: Option<NodeStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeMetadata {
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeStatus {
    #[serde(default)]
    pub allocatable: Option<ResourceList>,
}

/// `kubectl get pods -o yaml` output
#[derive(Debug, Clone, Deserialize)]
pub struct PodList {
    pub items: Vec<PodItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodItem {
    pub metadata: PodMetadata,
    #[serde(default)]
    pub spec: Option<PodSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodMetadata {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodSpec {
    /// An explicit `nodeName: null` reads as absent, so the pod is unallocated
    #[serde(rename = "nodeName", default)]
    pub node_name: Option<String>,
    #[serde(default)]
    pub containers: Option<Vec<ContainerSpec>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resources: ResourceRequirements,
}

/// Container `resources` block
///
/// `requests: {}` and a missing `requests` key are different things: only
/// the latter triggers the default-resource policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRequirements {
    #[serde(default)]
    pub limits: Option<ResourceList>,
    #[serde(default)]
    pub requests: Option<ResourceList>,
}

/// CPU and memory entries of a resource map; extended resources are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub cpu: Option<Quantity>,
    #[serde(default)]
    pub memory: Option<Quantity>,
}
