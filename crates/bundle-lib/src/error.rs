//! Error types for bundle analysis
//!
//! Every failure is fatal for the run. Variants carry the node or pod key and
//! the field that failed so the message points straight at the bad record.

use std::path::PathBuf;
use thiserror::Error;

/// Resource dimension a quantity string belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Cpu,
    Memory,
}

impl std::fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityKind::Cpu => write!(f, "cpu"),
            QuantityKind::Memory => write!(f, "memory"),
        }
    }
}

/// A quantity string that could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("empty {kind} quantity")]
    Empty { kind: QuantityKind },

    #[error("unsupported {kind} unit in `{value}`")]
    UnsupportedUnit { kind: QuantityKind, value: String },

    #[error("invalid {kind} magnitude in `{value}`")]
    InvalidNumber { kind: QuantityKind, value: String },
}

/// Errors raised while loading or analyzing a diagnostics bundle
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A quantity field held a value outside the recognized unit set
    #[error("{record}: malformed quantity in `{field}`: {source}")]
    Quantity {
        record: String,
        field: String,
        #[source]
        source: QuantityError,
    },

    /// The same node name appeared twice in the node inventory
    #[error("duplicate node `{0}` in node inventory")]
    DuplicateNode(String),

    /// The same `namespace/name` appeared twice in the pod inventory
    #[error("duplicate pod `{0}` in pod inventory")]
    DuplicatePod(String),

    /// A pod is scheduled on a node the node inventory does not list
    #[error("pod `{pod}` is assigned to node `{node}` which is not in the node inventory")]
    DanglingNode { pod: String, node: String },

    /// A field the analysis depends on is absent
    #[error("{record}: missing required field `{field}`")]
    MissingField { record: String, field: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl AnalysisError {
    pub(crate) fn quantity(
        record: impl Into<String>,
        field: impl Into<String>,
        source: QuantityError,
    ) -> Self {
        Self::Quantity {
            record: record.into(),
            field: field.into(),
            source,
        }
    }

    pub(crate) fn missing(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            record: record.into(),
            field: field.into(),
        }
    }
}

/// Result type alias for bundle analysis
pub type Result<T> = std::result::Result<T, AnalysisError>;
