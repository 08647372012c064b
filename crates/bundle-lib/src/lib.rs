//! Resource aggregation for cluster diagnostics bundles
//!
//! This crate provides the core functionality for:
//! - Converting CPU and memory quantity strings into cores and MiB
//! - Loading node capacity and pod resource specs from an extracted bundle
//! - Folding pod requests and limits into per-node totals

pub mod aggregate;
pub mod bundle;
pub mod error;
pub mod inventory;
pub mod models;
pub mod observability;
pub mod schema;
pub mod settings;
pub mod units;

pub use bundle::{analyze, analyze_bundle, BundleDocuments, BundleLayout};
pub use error::{AnalysisError, QuantityError, QuantityKind, Result};
pub use models::*;
pub use observability::StructuredLogger;
pub use settings::{AnalysisSettings, DefaultResourcePolicy, DEFAULT_POOL_LABEL};
pub use units::{convert_cpu, convert_memory};
