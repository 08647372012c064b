//! Inventory extraction
//!
//! Turns the typed node and pod documents into per-run records:
//! - `nodes` builds the node name -> capacity map with zeroed usage
//! - `pods` sums container resources per pod and resolves its node

mod nodes;
mod pods;


pub use nodes::load_nodes;
pub use pods::{extract_pod, extract_pods, pod_key};
